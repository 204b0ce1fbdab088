use crate::record::Record;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Up to `limit` distinct dataset names in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DatasetSelection(Vec<String>);

impl DatasetSelection {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

pub fn select(records: &[Record], limit: usize) -> DatasetSelection {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut out = Vec::new();
    if limit == 0 {
        return DatasetSelection(out);
    }
    for record in records {
        let name = record.dataset_key();
        if seen.insert(name) {
            out.push(name.to_string());
            if out.len() == limit {
                break;
            }
        }
    }
    DatasetSelection(out)
}
