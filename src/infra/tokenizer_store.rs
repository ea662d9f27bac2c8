// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the pre-built HuggingFace tokenizers for both languages
// and adapts them to the TextEncoder contract.
//
// Tokenizers are looked up by language code in one directory:
//
//   tokenizers/
//     tokenizer_en.json
//     tokenizer_it.json
//
// Building or training a vocabulary is out of scope here; the
// files must already exist and contain the special tokens named
// in DatasetConfig ("[SOS]", "[EOS]", "[PAD]" by default).

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

use crate::domain::traits::TextEncoder;
use crate::error::DatasetError;

// ─── HfTokenizer ──────────────────────────────────────────────────────────────
/// A `tokenizers::Tokenizer` behind the `TextEncoder` trait.
pub struct HfTokenizer {
    inner: Tokenizer,
}

impl HfTokenizer {
    pub fn new(inner: Tokenizer) -> Self {
        Self { inner }
    }

    /// Load a `tokenizer.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let inner = Tokenizer::from_file(path).map_err(|e| {
            anyhow::anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e)
        })?;
        Ok(Self { inner })
    }

    pub fn inner(&self) -> &Tokenizer {
        &self.inner
    }

    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }
}

impl TextEncoder for HfTokenizer {
    fn encode(&self, text: &str) -> crate::error::Result<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| DatasetError::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn token_to_id(&self, token: &str) -> Option<u32> {
        self.inner.token_to_id(token)
    }
}

// ─── TokenizerStore ───────────────────────────────────────────────────────────
pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the tokenizer file for `lang`.
    pub fn path_for(&self, lang: &str) -> PathBuf {
        self.dir.join(format!("tokenizer_{lang}.json"))
    }

    /// Load the tokenizer for `lang` from the store directory.
    pub fn load(&self, lang: &str) -> Result<HfTokenizer> {
        let path = self.path_for(lang);
        if !path.exists() {
            anyhow::bail!(
                "No tokenizer for '{}' at '{}'. Tokenizers must be built before preparing data.",
                lang,
                path.display()
            );
        }
        let tokenizer = HfTokenizer::from_file(&path)?;
        tracing::info!(
            "Loaded '{}' tokenizer ({} tokens) from '{}'",
            lang,
            tokenizer.vocab_size(),
            path.display()
        );
        Ok(tokenizer)
    }
}
