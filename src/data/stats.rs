// ============================================================
// Layer 4 — Corpus Length Statistics
// ============================================================
// Before fixing seq_len it helps to know how long the tokenized
// sentences actually are. This pass tokenizes every row once
// and reports, per side, the longest and mean token counts and
// how many rows would be rejected at the configured seq_len.
//
// Over-budget is judged with the same overheads the dataset
// uses: 2 special tokens on the encoder side, 1 on the decoder.

use serde::{Deserialize, Serialize};

use crate::data::dataset::{BilingualDataset, DECODER_OVERHEAD, ENCODER_OVERHEAD};
use crate::domain::traits::{Corpus, TextEncoder};
use crate::error::Result;

/// Token-count summary for one side of the corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideStats {
    pub max_tokens:  usize,
    pub mean_tokens: f64,
    /// Rows whose tokens plus overhead exceed seq_len
    pub over_budget: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub rows:    usize,
    pub seq_len: usize,
    pub source:  SideStats,
    pub target:  SideStats,
    /// Rows rejected by either side
    pub rejected: usize,
}

impl LengthStats {
    /// Smallest seq_len that would accept every row.
    pub fn min_seq_len(&self) -> usize {
        (self.source.max_tokens + ENCODER_OVERHEAD).max(self.target.max_tokens + DECODER_OVERHEAD)
    }
}

/// Tokenize every row of `dataset` and summarise the lengths.
pub fn length_stats<C, S, T>(dataset: &BilingualDataset<C, S, T>) -> Result<LengthStats>
where
    C: Corpus,
    S: TextEncoder,
    T: TextEncoder,
{
    let seq_len = dataset.seq_len();
    let mut stats = LengthStats { seq_len, ..LengthStats::default() };
    let (mut src_total, mut tgt_total) = (0usize, 0usize);

    for index in 0..dataset.len() {
        let Some((src, tgt)) = dataset.token_counts(index)? else {
            break;
        };

        stats.rows += 1;
        src_total  += src;
        tgt_total  += tgt;
        stats.source.max_tokens = stats.source.max_tokens.max(src);
        stats.target.max_tokens = stats.target.max_tokens.max(tgt);

        let src_over = src + ENCODER_OVERHEAD > seq_len;
        let tgt_over = tgt + DECODER_OVERHEAD > seq_len;
        stats.source.over_budget += src_over as usize;
        stats.target.over_budget += tgt_over as usize;
        stats.rejected += (src_over || tgt_over) as usize;
    }

    if stats.rows > 0 {
        stats.source.mean_tokens = src_total as f64 / stats.rows as f64;
        stats.target.mean_tokens = tgt_total as f64 / stats.rows as f64;
    }

    tracing::info!(
        "Max source length: {}, max target length: {}, {} of {} rows exceed seq_len={}",
        stats.source.max_tokens,
        stats.target.max_tokens,
        stats.rejected,
        stats.rows,
        seq_len
    );
    Ok(stats)
}
