#![forbid(unsafe_code)]

//! Abundance records → per-dataset taxonomic profiles → pairwise similarity matrix (headless).
//!
//! Design goals:
//! - deterministic outputs for a deterministic input order
//! - tolerant ingestion (missing metadata and unparseable numbers are not errors)
//! - runtime-agnostic async APIs (no specific executor required)

pub mod aggregate;
pub mod config;
pub mod error;
pub mod matrix;
pub mod record;
pub mod selection;
pub mod source;

pub use aggregate::{
    AggregatedProfile, Aggregation, LABEL_SEPARATOR, RepresentativeRecord, TaxonColumns,
    label_of, parse_number,
};
pub use config::{ChordConfig, ChordOptions};
pub use error::{Error, Result};
pub use matrix::SimilarityMatrix;
pub use record::{DEFAULT_TAXON_PREFIX, MetadataField, Record};
pub use selection::{DatasetSelection, select};
pub use source::{CsvRecordSource, MemoryRecordSource, RecordSource};

use serde::Serialize;
use std::path::Path;

/// Everything derived from one load. Immutable once built; a new load builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    pub record_count: usize,
    pub selection: DatasetSelection,
    pub columns: TaxonColumns,
    pub profiles: Vec<AggregatedProfile>,
    pub matrix: SimilarityMatrix,
}

impl PipelineOutput {
    pub fn labels(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn label_of(&self, dataset_name: &str) -> Option<&str> {
        self.profiles
            .iter()
            .find(|p| p.dataset_name == dataset_name)
            .map(|p| p.label.as_str())
    }

    pub fn representative(&self, index: usize) -> Option<&RepresentativeRecord> {
        self.profiles.get(index)?.representative.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: ChordOptions,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ChordOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &ChordConfig) -> Result<Self> {
        Ok(Self::with_options(ChordOptions::from_config(config)?))
    }

    pub fn options(&self) -> &ChordOptions {
        &self.options
    }

    /// Runs selection → aggregation → matrix over already-loaded records. Pure.
    pub fn build(&self, records: &[Record]) -> PipelineOutput {
        tracing::debug!(records = records.len(), "building chord pipeline");

        let selection = select(records, self.options.max_datasets);
        if selection.is_empty() {
            tracing::warn!("no datasets selected; the diagram will be empty");
        }
        tracing::debug!(datasets = ?selection.names(), "selected datasets");

        let Aggregation { columns, profiles } =
            aggregate::aggregate(records, &selection, &self.options.taxon_prefix);
        tracing::debug!(columns = columns.len(), "derived taxon columns");
        for p in &profiles {
            tracing::debug!(dataset = %p.dataset_name, label = %p.label, total = p.total(), "aggregated profile");
        }

        let matrix = SimilarityMatrix::build(&profiles, &columns);
        tracing::debug!(size = matrix.len(), total = matrix.total(), "built similarity matrix");

        PipelineOutput {
            record_count: records.len(),
            selection,
            columns,
            profiles,
            matrix,
        }
    }

    /// Synchronous variant of [`Engine::load_and_build`].
    pub fn load_and_build_sync(
        &self,
        source: &dyn RecordSource,
        path: &Path,
    ) -> Result<PipelineOutput> {
        let records = match source.load(path) {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "error loading the dataset");
                return Err(err);
            }
        };
        tracing::debug!(path = %path.display(), rows = records.len(), "loaded records");
        Ok(self.build(&records))
    }

    /// Loads records and builds the pipeline. A load failure halts before selection.
    pub async fn load_and_build(
        &self,
        source: &dyn RecordSource,
        path: &Path,
    ) -> Result<PipelineOutput> {
        self.load_and_build_sync(source, path)
    }
}

#[cfg(test)]
mod tests;
