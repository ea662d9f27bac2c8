// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-system concerns kept out of the domain and data layers:
//
//   tokenizer_store.rs — loads tokenizer_{lang}.json files and
//                        adapts them to the TextEncoder trait
//
//   record_store.rs    — writes prepared records as JSON Lines
//                        and saves the DatasetConfig they were
//                        built with
//
// Errors here are anyhow::Error with file-path context, since
// the caller can only report them.

/// HuggingFace tokenizer loading
pub mod tokenizer_store;

/// Prepared record and config persistence
pub mod record_store;
