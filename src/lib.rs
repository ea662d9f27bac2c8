//! Dataset adapter for sequence-to-sequence translation training.
//!
//! Raw parallel sentence pairs go in; fixed-width records come out:
//! encoder input, decoder input and label id sequences of exactly
//! `seq_len` tokens, an encoder padding mask, and a decoder mask that
//! combines padding with a causal (lower-triangular) mask.
//!
//! ```ignore
//! let dataset = BilingualDataset::new(corpus, src_tok, tgt_tok, DatasetConfig::new("en", "it", 350))?;
//! let record  = dataset.get(0)?;
//! ```

#![recursion_limit = "256"]

pub mod application;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;

pub use config::DatasetConfig;
pub use data::dataset::{BilingualDataset, EncodedDataset, LengthPolicy};
pub use domain::mask::{causal_mask, AttentionMask};
pub use domain::pair::{EncodedPair, TranslationPair, TranslationRow};
pub use domain::traits::{Corpus, TextEncoder};
pub use error::{DatasetError, Result};
