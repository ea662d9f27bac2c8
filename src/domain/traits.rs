// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The dataset needs exactly two things from the outside world:
//
//   Corpus       → "give me row i" and "how many rows are there"
//   TextEncoder  → "turn this text into ids" and
//                  "what id does this special token have"
//
// Everything else about the real collaborators (file formats,
// vocabularies, normalisers) stays behind these contracts.
// infra::tokenizer_store implements TextEncoder for the
// HuggingFace tokenizer; data::corpus implements Corpus for
// an in-memory Vec of rows. Tests plug in the small doubles
// at the bottom of this file.

use crate::domain::pair::TranslationRow;
use crate::error::Result;

// ─── TextEncoder ──────────────────────────────────────────────────────────────
/// Maps text to an ordered sequence of token ids.
pub trait TextEncoder {
    /// Encode `text` without adding any special tokens.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Id of a special token such as `"[PAD]"`, if the vocabulary has it.
    fn token_to_id(&self, token: &str) -> Option<u32>;
}

impl<T: TextEncoder + ?Sized> TextEncoder for &T {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        (**self).encode(text)
    }

    fn token_to_id(&self, token: &str) -> Option<u32> {
        (**self).token_to_id(token)
    }
}

// ─── Corpus ───────────────────────────────────────────────────────────────────
/// An indexable collection of parallel corpus rows.
///
/// Mirrors Burn's `Dataset::get` convention: an index past the
/// end returns `None` rather than an error.
pub trait Corpus {
    fn get(&self, index: usize) -> Option<TranslationRow>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
