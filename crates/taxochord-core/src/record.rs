use indexmap::IndexMap;
use serde::Serialize;

/// Default structural prefix marking a column as taxonomic (`k__Bacteria|p__...`).
pub const DEFAULT_TAXON_PREFIX: &str = "k__";

/// One input row.
///
/// Metadata fields are kept exactly as read; an empty string and a missing column are both
/// treated as "absent" by [`Record::field`]. `columns` holds every other column in input order
/// with its raw (possibly unparseable) cell text; taxon columns are the ones carrying the
/// taxon prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub dataset_name: Option<String>,
    pub sample_id: Option<String>,
    pub country: Option<String>,
    pub bodysite: Option<String>,
    pub disease: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub columns: IndexMap<String, String>,
}

impl Record {
    pub fn new(dataset_name: impl Into<String>) -> Self {
        Self {
            dataset_name: Some(dataset_name.into()),
            ..Self::default()
        }
    }

    pub fn with_sample_id(mut self, sample_id: impl Into<String>) -> Self {
        self.sample_id = Some(sample_id.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_metadata(
        mut self,
        bodysite: Option<&str>,
        disease: Option<&str>,
        age: Option<&str>,
        gender: Option<&str>,
    ) -> Self {
        self.bodysite = bodysite.map(str::to_string);
        self.disease = disease.map(str::to_string);
        self.age = age.map(str::to_string);
        self.gender = gender.map(str::to_string);
        self
    }

    pub fn with_column(mut self, column: impl Into<String>, raw: impl Into<String>) -> Self {
        self.columns.insert(column.into(), raw.into());
        self
    }

    /// Dataset grouping key. Rows without a dataset name share the empty key.
    pub fn dataset_key(&self) -> &str {
        self.dataset_name.as_deref().unwrap_or("")
    }

    pub fn field(&self, field: MetadataField) -> Option<&str> {
        let raw = match field {
            MetadataField::DatasetName => self.dataset_name.as_deref(),
            MetadataField::SampleId => self.sample_id.as_deref(),
            MetadataField::Country => self.country.as_deref(),
            MetadataField::Bodysite => self.bodysite.as_deref(),
            MetadataField::Disease => self.disease.as_deref(),
            MetadataField::Age => self.age.as_deref(),
            MetadataField::Gender => self.gender.as_deref(),
        };
        raw.filter(|s| !s.is_empty())
    }

    /// Taxon column names carrying `prefix`, in column order.
    pub fn taxon_columns<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.columns
            .keys()
            .map(String::as_str)
            .filter(move |k| k.starts_with(prefix))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    DatasetName,
    SampleId,
    Country,
    Bodysite,
    Disease,
    Age,
    Gender,
}

impl MetadataField {
    /// Column header used by the abundance table format.
    pub fn column(self) -> &'static str {
        match self {
            Self::DatasetName => "dataset_name",
            Self::SampleId => "sampleID",
            Self::Country => "country",
            Self::Bodysite => "bodysite",
            Self::Disease => "disease",
            Self::Age => "age",
            Self::Gender => "gender",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::DatasetName => "Dataset",
            Self::SampleId => "Sample",
            Self::Country => "Country",
            Self::Bodysite => "Bodysite",
            Self::Disease => "Disease",
            Self::Age => "Age",
            Self::Gender => "Gender",
        }
    }

    /// `Unknown Dataset`, `Unknown Sample`, ...
    pub fn placeholder(self) -> String {
        format!("Unknown {}", self.display_name())
    }

    pub fn from_column(name: &str) -> Option<Self> {
        Some(match name {
            "dataset_name" => Self::DatasetName,
            "sampleID" => Self::SampleId,
            "country" => Self::Country,
            "bodysite" => Self::Bodysite,
            "disease" => Self::Disease,
            "age" => Self::Age,
            "gender" => Self::Gender,
            _ => return None,
        })
    }
}
