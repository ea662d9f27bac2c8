// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the lower layers for each CLI command.
//
// Rules for this layer:
//   - No padding or masking logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination and error context
//
//   source.rs          — opens corpus + tokenizers as a dataset
//   inspect_use_case   — encode one row, or gather length stats
//   prepare_use_case   — encode everything, split, write to disk

/// Opening a BilingualDataset from files
pub mod source;

/// Single-row inspection and corpus statistics
pub mod inspect_use_case;

/// The full corpus preparation workflow
pub mod prepare_use_case;
