//! Record sources.
//!
//! A [`RecordSource`] turns a location into a sequence of [`Record`]s. Any failure is a load
//! failure for the whole session: there is no partial result.

use crate::record::{MetadataField, Record};
use crate::{Error, Result};
use std::io::Read;
use std::path::Path;

pub trait RecordSource {
    fn load(&self, path: &Path) -> Result<Vec<Record>>;
}

/// Delimited text with a header row (comma-separated by default).
#[derive(Debug, Clone, Copy)]
pub struct CsvRecordSource {
    pub delimiter: u8,
}

impl Default for CsvRecordSource {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvRecordSource {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn tsv() -> Self {
        Self::with_delimiter(b'\t')
    }

    /// Reads records from any reader (e.g. stdin).
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<Record>> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let header = rdr.headers()?.clone();
        let dataset_column = MetadataField::DatasetName.column();
        if !header.iter().any(|h| h == dataset_column) {
            return Err(Error::MissingColumn {
                column: dataset_column.to_string(),
            });
        }
        let fields: Vec<Option<MetadataField>> =
            header.iter().map(MetadataField::from_column).collect();

        let mut out = Vec::new();
        for row in rdr.records() {
            let row = row?;
            let mut record = Record::default();
            for (i, name) in header.iter().enumerate() {
                // Short rows still carry every header key; missing cells read as empty.
                let cell = row.get(i).unwrap_or("");
                match fields[i] {
                    Some(field) => set_field(&mut record, field, cell),
                    None => {
                        record.columns.insert(name.to_string(), cell.to_string());
                    }
                }
            }
            out.push(record);
        }
        Ok(out)
    }
}

fn set_field(record: &mut Record, field: MetadataField, cell: &str) {
    let slot = match field {
        MetadataField::DatasetName => &mut record.dataset_name,
        MetadataField::SampleId => &mut record.sample_id,
        MetadataField::Country => &mut record.country,
        MetadataField::Bodysite => &mut record.bodysite,
        MetadataField::Disease => &mut record.disease,
        MetadataField::Age => &mut record.age,
        MetadataField::Gender => &mut record.gender,
    };
    *slot = Some(cell.to_string());
}

impl RecordSource for CsvRecordSource {
    fn load(&self, path: &Path) -> Result<Vec<Record>> {
        let display = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|err| Error::load(&display, err))?;
        self.read(std::io::BufReader::new(file))
            .map_err(|err| Error::load(&display, err))
    }
}

/// Records already in memory; `path` is ignored.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordSource {
    records: Vec<Record>,
}

impl MemoryRecordSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordSource for MemoryRecordSource {
    fn load(&self, _path: &Path) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }
}
