// ============================================================
// Layer 3 — Sentence Pair Domain Types
// ============================================================
// A translation corpus row stores its sentences keyed by
// language code, e.g.
//
//   {"id": "42", "translation": {"en": "Hello", "it": "Ciao"}}
//
// The dataset selects two of those keys (src_lang / tgt_lang)
// and turns the pair into an EncodedPair: three id sequences
// of exactly seq_len tokens plus two attention masks.
//
//   encoder_input = [SOS] src_ids [EOS] [PAD]...
//   decoder_input = [SOS] tgt_ids [PAD]...
//   label         =       tgt_ids [EOS] [PAD]...
//
// The label is the decoder input shifted left by one, so
// position i of the decoder is trained to predict label[i].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::mask::AttentionMask;
use crate::error::{DatasetError, Result};

/// Which half of a sentence pair a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// One row of a parallel corpus: the same sentence in several languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRow {
    /// Optional row identifier carried through from the corpus file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Language code → sentence text
    pub translation: BTreeMap<String, String>,
}

impl TranslationRow {
    /// Build a row from `(lang, text)` pairs.
    pub fn new<L, T>(texts: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        Self {
            id: None,
            translation: texts
                .into_iter()
                .map(|(lang, text)| (lang.into(), text.into()))
                .collect(),
        }
    }

    /// The text stored under `lang`, if any.
    pub fn text(&self, lang: &str) -> Option<&str> {
        self.translation.get(lang).map(String::as_str)
    }
}

/// The two raw strings selected from a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPair {
    pub src_text: String,
    pub tgt_text: String,
}

impl TranslationPair {
    pub fn new(src_text: impl Into<String>, tgt_text: impl Into<String>) -> Self {
        Self {
            src_text: src_text.into(),
            tgt_text: tgt_text.into(),
        }
    }
}

/// A fully encoded training record.
/// All id sequences have length `seq_len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPair {
    /// `[SOS] src [EOS] [PAD]...`
    pub encoder_input: Vec<u32>,

    /// `[SOS] tgt [PAD]...`
    pub decoder_input: Vec<u32>,

    /// Shape `[1, 1, seq_len]`: true where `encoder_input` is not padding
    pub encoder_mask: AttentionMask,

    /// Shape `[1, seq_len, seq_len]`: not-padding AND causal
    pub decoder_mask: AttentionMask,

    /// `tgt [EOS] [PAD]...`
    pub label: Vec<u32>,

    pub src_text: String,
    pub tgt_text: String,
}

impl EncodedPair {
    /// Width every sequence in this record was padded to.
    pub fn seq_len(&self) -> usize {
        self.encoder_input.len()
    }

    /// Check that every sequence has `seq_len` ids and both masks
    /// have the matching `[1, 1, S]` / `[1, S, S]` shapes.
    pub fn validate(&self, seq_len: usize) -> Result<()> {
        let sequences = [
            ("encoder_input", self.encoder_input.len()),
            ("decoder_input", self.decoder_input.len()),
            ("label", self.label.len()),
        ];
        for (name, len) in sequences {
            if len != seq_len {
                return Err(DatasetError::InvalidRecord(format!(
                    "{name} has {len} ids, expected {seq_len}"
                )));
            }
        }

        let masks = [
            ("encoder_mask", self.encoder_mask.shape(), [1, 1, seq_len]),
            ("decoder_mask", self.decoder_mask.shape(), [1, seq_len, seq_len]),
        ];
        for (name, shape, expected) in masks {
            if shape != expected {
                return Err(DatasetError::InvalidRecord(format!(
                    "{name} has shape {shape:?}, expected {expected:?}"
                )));
            }
        }
        Ok(())
    }
}
