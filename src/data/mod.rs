// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a parallel corpus file to tensor batches.
//
//   corpus file (.jsonl / .tsv)
//       │
//       ▼
//   InMemoryCorpus     → rows keyed by language code
//       │
//       ▼
//   BilingualDataset   → tokenize, frame with SOS/EOS, pad,
//       │                build encoder and decoder masks
//       ▼
//   prepare_all        → encode every row, apply LengthPolicy
//       │
//       ▼
//   split_train_val    → shuffled train / validation split
//       │
//       ▼
//   EncodedDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   TranslationBatcher → stacks records into tensor batches
//
// length_stats sits beside the pipeline: it tokenizes the
// corpus once to help pick seq_len.

/// Loads parallel corpora from JSON Lines or TSV
pub mod corpus;

/// The per-example transform and Burn Dataset wrapper
pub mod dataset;

/// Implements Burn's Batcher trait for encoded pairs
pub mod batcher;

/// Shuffles and splits records into train/validation sets
pub mod splitter;

/// Tokenized length statistics over a corpus
pub mod stats;
