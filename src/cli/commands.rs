// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands share the same input flags (corpus,
// tokenizers, languages, seq_len), collected in DataArgs and
// flattened into each command.
//
// A --config JSON file may supply the DatasetConfig instead;
// explicit --src-lang / --tgt-lang / --seq-len flags override it.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::application::prepare_use_case::PrepareConfig;
use crate::application::source::DataSource;
use crate::config::DatasetConfig;
use crate::infra::record_store::load_config_file;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode one corpus row and print its sequences and masks
    Inspect(InspectArgs),

    /// Report tokenized sentence lengths against seq_len
    Stats(StatsArgs),

    /// Encode the whole corpus and write train/val JSON Lines files
    Prepare(PrepareArgs),
}

/// Inputs shared by every command.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Parallel corpus (.jsonl rows with a "translation" map, or .tsv)
    #[arg(long)]
    pub corpus: String,

    /// Directory holding tokenizer_{lang}.json files
    #[arg(long, default_value = "tokenizers")]
    pub tokenizer_dir: String,

    /// JSON file with a DatasetConfig
    #[arg(long)]
    pub config: Option<String>,

    /// Source language key
    #[arg(long)]
    pub src_lang: Option<String>,

    /// Target language key
    #[arg(long)]
    pub tgt_lang: Option<String>,

    /// Width every sequence is padded to
    #[arg(long)]
    pub seq_len: Option<usize>,
}

impl DataArgs {
    pub fn source(&self) -> DataSource {
        DataSource::new(&self.corpus, &self.tokenizer_dir)
    }

    /// Config file (or defaults), then flag overrides.
    pub fn dataset_config(&self) -> Result<DatasetConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config_file(path)?,
            None => DatasetConfig::default(),
        };
        if let Some(lang) = &self.src_lang {
            cfg.src_lang = lang.clone();
        }
        if let Some(lang) = &self.tgt_lang {
            cfg.tgt_lang = lang.clone();
        }
        if let Some(seq_len) = self.seq_len {
            cfg.seq_len = seq_len;
        }
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Corpus row to encode
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Print the full decoder mask instead of a summary
    #[arg(long)]
    pub full_mask: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Directory for dataset_config.json, train.jsonl and val.jsonl
    #[arg(long, default_value = "prepared")]
    pub output_dir: String,

    /// Drop rows that exceed seq_len instead of failing
    #[arg(long)]
    pub skip_too_long: bool,

    /// Share of records written to train.jsonl
    #[arg(long, default_value_t = 0.9)]
    pub train_fraction: f64,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TryFrom<PrepareArgs> for PrepareConfig {
    type Error = anyhow::Error;

    fn try_from(a: PrepareArgs) -> Result<Self> {
        Ok(PrepareConfig {
            source:         a.data.source(),
            dataset:        a.data.dataset_config()?,
            output_dir:     a.output_dir,
            skip_too_long:  a.skip_too_long,
            train_fraction: a.train_fraction,
            seed:           a.seed,
        })
    }
}
