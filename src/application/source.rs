// ============================================================
// Layer 2 — Data Source
// ============================================================
// Every command starts the same way: load the corpus, load one
// tokenizer per language, and wire them into a BilingualDataset.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::DatasetConfig;
use crate::data::{corpus::InMemoryCorpus, dataset::BilingualDataset};
use crate::infra::tokenizer_store::{HfTokenizer, TokenizerStore};

/// The dataset type every command works with.
pub type FileDataset = BilingualDataset<InMemoryCorpus, HfTokenizer, HfTokenizer>;

/// Where the raw inputs live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    /// Corpus file (.jsonl, .tsv or .txt)
    pub corpus:        String,
    /// Directory holding tokenizer_{lang}.json files
    pub tokenizer_dir: String,
}

impl DataSource {
    pub fn new(corpus: impl Into<String>, tokenizer_dir: impl Into<String>) -> Self {
        Self {
            corpus:        corpus.into(),
            tokenizer_dir: tokenizer_dir.into(),
        }
    }

    /// Load corpus and tokenizers and build the dataset.
    pub fn open(&self, config: &DatasetConfig) -> Result<FileDataset> {
        let corpus = InMemoryCorpus::load(&self.corpus, &config.src_lang, &config.tgt_lang)
            .with_context(|| format!("Cannot load corpus '{}'", self.corpus))?;

        let store = TokenizerStore::new(&self.tokenizer_dir);
        let src   = store.load(&config.src_lang)?;
        let tgt   = store.load(&config.tgt_lang)?;

        BilingualDataset::new(corpus, src, tgt, config.clone())
            .context("Cannot build dataset from these tokenizers")
    }
}
