// ============================================================
// Layer 3 — Dataset Errors
// ============================================================
// Typed failures raised by the library layers (domain, data).
// The application and CLI layers wrap these in anyhow::Error
// with extra context, so only library code matches on them.
//
// SequenceTooLong is the one the training side cares about:
// the tokenized sentence plus its special tokens did not fit
// in seq_len. It is never truncated away here; the caller
// decides whether to skip the row or abort.

use crate::domain::pair::Side;

/// Errors produced while loading or encoding translation pairs.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Tokenized content plus special-token overhead exceeds `seq_len`.
    #[error(
        "sentence is too long: {side} side has {tokens} tokens + {overhead} special, \
         seq_len is {seq_len}"
    )]
    SequenceTooLong {
        side:     Side,
        tokens:   usize,
        overhead: usize,
        seq_len:  usize,
    },

    /// A tokenizer has no id for one of the required special tokens.
    #[error("{side} tokenizer has no id for special token '{token}'")]
    MissingSpecialToken { side: Side, token: String },

    /// A corpus row does not carry text for a selected language.
    #[error("row {index} has no '{lang}' text")]
    MissingLanguage { index: usize, lang: String },

    /// A stored record whose sequences or masks disagree with seq_len.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The external tokenizer failed to encode a string.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Malformed corpus line (1-based line number).
    #[error("line {line}: {source}")]
    Json {
        line:   usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
