// ============================================================
// Dataset Configuration
// ============================================================
// Fixed for the lifetime of a dataset:
//   - which two languages of each corpus row to pair up
//   - the tensor width every sequence is padded to
//   - the spelling of the three special tokens
//
// Serialisable so a prepared dataset can record exactly how
// it was built (see infra::record_store).

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// Smallest usable width: `[SOS] [EOS]` with an empty source sentence.
pub const MIN_SEQ_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub src_lang:  String,
    pub tgt_lang:  String,
    pub seq_len:   usize,
    pub sos_token: String,
    pub eos_token: String,
    pub pad_token: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            src_lang:  "en".to_string(),
            tgt_lang:  "it".to_string(),
            seq_len:   350,
            sos_token: "[SOS]".to_string(),
            eos_token: "[EOS]".to_string(),
            pad_token: "[PAD]".to_string(),
        }
    }
}

impl DatasetConfig {
    pub fn new(src_lang: impl Into<String>, tgt_lang: impl Into<String>, seq_len: usize) -> Self {
        Self {
            src_lang: src_lang.into(),
            tgt_lang: tgt_lang.into(),
            seq_len,
            ..Self::default()
        }
    }

    /// Reject configurations no sentence pair could ever satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.seq_len < MIN_SEQ_LEN {
            return Err(DatasetError::InvalidConfig(format!(
                "seq_len must be at least {MIN_SEQ_LEN}, got {}",
                self.seq_len
            )));
        }
        if self.src_lang.is_empty() || self.tgt_lang.is_empty() {
            return Err(DatasetError::InvalidConfig(
                "src_lang and tgt_lang must be non-empty".to_string(),
            ));
        }
        let specials = [&self.sos_token, &self.eos_token, &self.pad_token];
        if specials.iter().any(|t| t.is_empty()) {
            return Err(DatasetError::InvalidConfig(
                "special token strings must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}
