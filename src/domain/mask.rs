// ============================================================
// Layer 3 — Attention Masks
// ============================================================
// A mask tells attention which key positions a query position
// may look at. true = may attend, false = blocked.
//
// Two masks are produced per training record:
//
//   encoder_mask  [1, 1, seq_len]
//     true wherever the encoder input is a real token.
//     The leading 1s broadcast over heads and query rows.
//
//   decoder_mask  [1, seq_len, seq_len]
//     row i, column j is true when
//       decoder_input[j] is not padding   AND   j <= i
//     so every position sees itself and earlier real tokens only.
//
// The causal part is the lower triangle including the diagonal:
//
//   size 3:   T F F
//             T T F
//             T T T
//
// Masks are stored row-major in a flat Vec<bool> so they
// serialise compactly and convert straight into Burn tensors.

use serde::{Deserialize, Serialize};

/// A 3-d boolean tensor stored row-major.
///
/// Deserialising rejects data whose length does not match the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MaskParts")]
pub struct AttentionMask {
    shape: [usize; 3],
    data:  Vec<bool>,
}

/// Unchecked wire form of `AttentionMask`.
#[derive(Deserialize)]
struct MaskParts {
    shape: [usize; 3],
    data:  Vec<bool>,
}

impl TryFrom<MaskParts> for AttentionMask {
    type Error = String;

    fn try_from(parts: MaskParts) -> Result<Self, Self::Error> {
        let [d0, d1, d2] = parts.shape;
        let expected = d0 * d1 * d2;
        if parts.data.len() != expected {
            return Err(format!(
                "mask of shape {:?} needs {} values, got {}",
                parts.shape,
                expected,
                parts.data.len()
            ));
        }
        Ok(Self { shape: parts.shape, data: parts.data })
    }
}

impl AttentionMask {
    /// Build a mask by evaluating `f(b, i, j)` at every position.
    pub fn from_fn(shape: [usize; 3], mut f: impl FnMut(usize, usize, usize) -> bool) -> Self {
        let [d0, d1, d2] = shape;
        let mut data = Vec::with_capacity(d0 * d1 * d2);
        for b in 0..d0 {
            for i in 0..d1 {
                for j in 0..d2 {
                    data.push(f(b, i, j));
                }
            }
        }
        Self { shape, data }
    }

    /// Padding mask of shape `[1, 1, len]`: true where `ids[j] != pad_id`.
    pub fn padding(ids: &[u32], pad_id: u32) -> Self {
        Self {
            shape: [1, 1, ids.len()],
            data:  ids.iter().map(|&id| id != pad_id).collect(),
        }
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Flat row-major view of the mask values.
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Value at `(b, i, j)`. Panics when out of bounds, like slice indexing.
    pub fn get(&self, b: usize, i: usize, j: usize) -> bool {
        let [d0, d1, d2] = self.shape;
        assert!(
            b < d0 && i < d1 && j < d2,
            "mask index ({b}, {i}, {j}) out of bounds for shape {:?}",
            self.shape
        );
        self.data[(b * d1 + i) * d2 + j]
    }

    /// Number of positions that may be attended to.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

/// Lower-triangular mask of shape `[1, size, size]`: `(i, j)` is true iff `j <= i`.
pub fn causal_mask(size: usize) -> AttentionMask {
    AttentionMask::from_fn([1, size, size], |_, i, j| j <= i)
}
