// ============================================================
// Layer 6 — Prepared Record Store
// ============================================================
// Writes the output of `prepare` to disk so a training run can
// read fixed-width records without re-tokenizing the corpus.
//
// Directory layout:
//   prepared/
//     dataset_config.json   ← languages, seq_len, special tokens
//     train.jsonl           ← one EncodedPair per line
//     val.jsonl
//
// The config is saved next to the records because seq_len and
// the special-token spellings define how the records must be
// read; a reader built with a different seq_len would misread
// every mask.

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::DatasetConfig;
use crate::domain::pair::EncodedPair;

const CONFIG_FILE: &str = "dataset_config.json";

pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_config(&self, cfg: &DatasetConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved dataset config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<DatasetConfig> {
        load_config_file(self.dir.join(CONFIG_FILE))
    }

    /// Write `records` as JSON Lines to `{dir}/{name}.jsonl`.
    pub fn write_records(&self, name: &str, records: &[EncodedPair]) -> Result<PathBuf> {
        let path = self.dir.join(format!("{name}.jsonl"));
        let file = File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;

        let mut out = BufWriter::new(file);
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;

        tracing::info!("Wrote {} records to '{}'", records.len(), path.display());
        Ok(path)
    }

    /// Read back a file written by `write_records`.
    ///
    /// Every record is checked against the seq_len in the saved
    /// `dataset_config.json`, so that config must exist.
    pub fn read_records(&self, name: &str) -> Result<Vec<EncodedPair>> {
        let seq_len = self.load_config()?.seq_len;
        let path    = self.dir.join(format!("{name}.jsonl"));
        let file = File::open(&path)
            .with_context(|| format!("Cannot open '{}'", path.display()))?;

        let mut records = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let record: EncodedPair = serde_json::from_str(&line)
                .with_context(|| format!("{}: bad record on line {}", path.display(), i + 1))?;
            record
                .validate(seq_len)
                .with_context(|| format!("{}: bad record on line {}", path.display(), i + 1))?;
            records.push(record);
        }
        Ok(records)
    }
}

/// Load a `DatasetConfig` from any JSON file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<DatasetConfig> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid config in '{}'", path.display()))
}
