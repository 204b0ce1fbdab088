//! Per-dataset reduction of abundance rows.

use crate::record::{MetadataField, Record};
use crate::selection::DatasetSelection;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Separator between label segments. Label placement splits on the same string.
pub const LABEL_SEPARATOR: &str = " | ";

/// Ordered taxon column identifiers shared by every profile of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaxonColumns(Vec<String>);

impl TaxonColumns {
    /// Taxon columns of the first row, in column order. No rows yields an empty set.
    pub fn from_first_row<'a>(rows: impl IntoIterator<Item = &'a Record>, prefix: &str) -> Self {
        let Some(first) = rows.into_iter().next() else {
            return Self::default();
        };
        Self(first.taxon_columns(prefix).map(str::to_string).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Metadata of the first row of a dataset: that row without its data columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RepresentativeRecord(Record);

impl RepresentativeRecord {
    pub fn from_record(record: &Record) -> Self {
        let mut metadata = record.clone();
        metadata.columns.clear();
        Self(metadata)
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    /// Non-empty value of `field`.
    pub fn field(&self, field: MetadataField) -> Option<&str> {
        self.0.field(field)
    }

    /// Value of `field`, or its `Unknown ...` placeholder.
    pub fn field_or_placeholder(&self, field: MetadataField) -> String {
        match self.field(field) {
            Some(v) => v.to_string(),
            None => field.placeholder(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedProfile {
    pub dataset_name: String,
    pub label: String,
    /// Summed abundance per taxon column, one entry per column of the run.
    pub profile: IndexMap<String, f64>,
    pub representative: Option<RepresentativeRecord>,
}

impl AggregatedProfile {
    pub fn value(&self, column: &str) -> f64 {
        self.profile.get(column).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.profile.values().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    pub columns: TaxonColumns,
    pub profiles: Vec<AggregatedProfile>,
}

impl Aggregation {
    pub fn label_of(&self, dataset_name: &str) -> Option<&str> {
        self.profiles
            .iter()
            .find(|p| p.dataset_name == dataset_name)
            .map(|p| p.label.as_str())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.label.as_str()).collect()
    }
}

/// `"{dataset} | {sample} | {country}"`, each segment falling back independently.
pub fn label_of(representative: Option<&RepresentativeRecord>, dataset_name: &str) -> String {
    let Some(rep) = representative else {
        return [
            dataset_name.to_string(),
            MetadataField::SampleId.placeholder(),
            MetadataField::Country.placeholder(),
        ]
        .join(LABEL_SEPARATOR);
    };
    [
        rep.field_or_placeholder(MetadataField::DatasetName),
        rep.field_or_placeholder(MetadataField::SampleId),
        rep.field_or_placeholder(MetadataField::Country),
    ]
    .join(LABEL_SEPARATOR)
}

pub fn aggregate(records: &[Record], selection: &DatasetSelection, prefix: &str) -> Aggregation {
    let mut rows_by_dataset: FxHashMap<&str, Vec<&Record>> = FxHashMap::default();
    let mut filtered_first: Option<&Record> = None;
    for record in records {
        let key = record.dataset_key();
        if !selection.contains(key) {
            continue;
        }
        if filtered_first.is_none() {
            filtered_first = Some(record);
        }
        rows_by_dataset.entry(key).or_default().push(record);
    }

    let columns = TaxonColumns::from_first_row(filtered_first, prefix);

    let profiles = selection
        .iter()
        .map(|name| {
            let rows = rows_by_dataset.get(name).map(Vec::as_slice).unwrap_or(&[]);
            let representative = rows.first().map(|r| RepresentativeRecord::from_record(r));
            let label = label_of(representative.as_ref(), name);

            let mut profile = IndexMap::with_capacity(columns.len());
            for col in columns.iter() {
                let sum: f64 = rows
                    .iter()
                    .map(|row| row.columns.get(col).map_or(0.0, |raw| parse_number(raw)))
                    .sum();
                profile.insert(col.to_string(), sum);
            }

            AggregatedProfile {
                dataset_name: name.to_string(),
                label,
                profile,
                representative,
            }
        })
        .collect();

    Aggregation { columns, profiles }
}

/// Lenient float parse: the longest leading decimal literal after whitespace.
///
/// `"3.5abc"` is 3.5; anything without a leading number, and any non-finite result, is 0.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
