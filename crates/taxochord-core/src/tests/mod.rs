mod aggregate;
mod matrix;

use crate::Record;

/// `dataset`, one `k__X` cell per value.
pub(crate) fn rows(dataset: &str, values: &[&str]) -> Vec<Record> {
    values
        .iter()
        .map(|v| Record::new(dataset).with_column("k__X", *v))
        .collect()
}
