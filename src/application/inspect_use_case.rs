// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Read-only views of a corpus, used while choosing seq_len or
// checking that tokenizers and corpus agree:
//
//   record(i) → the fully encoded record for one row
//   stats()   → token-length summary over the whole corpus

use anyhow::{Context, Result};

use crate::application::source::{DataSource, FileDataset};
use crate::config::DatasetConfig;
use crate::data::stats::{length_stats, LengthStats};
use crate::domain::pair::EncodedPair;

pub struct InspectUseCase {
    dataset: FileDataset,
}

impl InspectUseCase {
    pub fn new(source: &DataSource, config: &DatasetConfig) -> Result<Self> {
        Ok(Self { dataset: source.open(config)? })
    }

    pub fn dataset(&self) -> &FileDataset {
        &self.dataset
    }

    /// Encode the row at `index`.
    pub fn record(&self, index: usize) -> Result<EncodedPair> {
        self.dataset
            .get(index)
            .with_context(|| format!("Cannot encode row {index}"))?
            .with_context(|| {
                format!("Row {index} is out of range (corpus has {} rows)", self.dataset.len())
            })
    }

    pub fn stats(&self) -> Result<LengthStats> {
        length_stats(&self.dataset).context("Cannot compute length statistics")
    }
}
