// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Encodes a whole corpus once and writes training-ready files.
//
//   Step 1: Load corpus and tokenizers      (Layer 2 - source)
//   Step 2: Encode every row                (Layer 4 - dataset)
//   Step 3: Shuffle and split train / val   (Layer 4 - splitter)
//   Step 4: Write records and config        (Layer 6 - infra)
//
// Rows that exceed seq_len either abort the run (default) or
// are skipped and counted, depending on skip_too_long.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::source::DataSource;
use crate::config::DatasetConfig;
use crate::data::{dataset::LengthPolicy, splitter::split_train_val};
use crate::infra::record_store::RecordStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub source:         DataSource,
    pub dataset:        DatasetConfig,
    pub output_dir:     String,
    pub skip_too_long:  bool,
    pub train_fraction: f64,
    pub seed:           Option<u64>,
}

/// Counts reported back to the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareSummary {
    pub train:   usize,
    pub val:     usize,
    pub skipped: usize,
}

pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PrepareSummary> {
        let cfg = &self.config;

        // ── Step 1: Corpus and tokenizers ─────────────────────────────────────
        let dataset = cfg.source.open(&cfg.dataset)?;
        tracing::info!(
            "Preparing {} rows ({} -> {}, seq_len={})",
            dataset.len(),
            cfg.dataset.src_lang,
            cfg.dataset.tgt_lang,
            cfg.dataset.seq_len
        );

        // ── Step 2: Encode ────────────────────────────────────────────────────
        let policy = if cfg.skip_too_long { LengthPolicy::Skip } else { LengthPolicy::Error };
        let prepared = dataset
            .prepare_all(policy)
            .context("Encoding failed; pass --skip-too-long or raise --seq-len")?;
        let skipped = prepared.skipped.len();

        // ── Step 3: Split ─────────────────────────────────────────────────────
        let (train, val) = split_train_val(prepared.records, cfg.train_fraction, cfg.seed);

        // ── Step 4: Write ─────────────────────────────────────────────────────
        let store = RecordStore::new(&cfg.output_dir)?;
        store.save_config(&cfg.dataset)?;
        store.write_records("train", &train)?;
        store.write_records("val", &val)?;

        Ok(PrepareSummary { train: train.len(), val: val.len(), skipped })
    }
}
