// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the system
// works with: raw sentence pairs, encoded training records,
// attention masks, and the narrow contracts the corpus and
// tokenizers must satisfy.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Keeping it free of Burn and of the tokenizers crate means
// the padding and masking logic can be tested with small
// hand-written doubles instead of real vocabularies.

/// Raw and encoded sentence-pair types
pub mod pair;

/// Boolean attention masks and the causal mask builder
pub mod mask;

/// Corpus and tokenizer contracts
pub mod traits;
