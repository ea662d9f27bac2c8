// ============================================================
// Layer 4 — Translation Batcher
// ============================================================
// Implements Burn's Batcher trait to stack EncodedPairs into
// tensors for a DataLoader.
//
//   Input:  Vec of N EncodedPairs, each padded to seq_len S
//   Output: TranslationBatch with
//             encoder_input  [N, S]        Int
//             decoder_input  [N, S]        Int
//             label          [N, S]        Int
//             encoder_mask   [N, 1, 1, S]  Bool
//             decoder_mask   [N, 1, S, S]  Bool
//
// The extra dimension on the masks is the head axis; it has
// size 1 so the same mask broadcasts over every attention head.
//
// Every record is already padded to the same width, so the
// batcher only flattens and reshapes.

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::domain::pair::EncodedPair;

// ─── TranslationBatch ─────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct TranslationBatch<B: Backend> {
    pub encoder_input: Tensor<B, 2, Int>,
    pub decoder_input: Tensor<B, 2, Int>,
    pub encoder_mask:  Tensor<B, 4, Bool>,
    pub decoder_mask:  Tensor<B, 4, Bool>,
    pub label:         Tensor<B, 2, Int>,
}

// ─── TranslationBatcher ───────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct TranslationBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TranslationBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    fn ids(&self, rows: Vec<&[u32]>, seq_len: usize) -> Tensor<B, 2, Int> {
        let batch_size = rows.len();
        let flat: Vec<i32> = rows
            .into_iter()
            .flat_map(|r| r.iter().map(|&id| int_id(id)))
            .collect();
        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len])
    }

    fn mask(&self, masks: Vec<&[bool]>, shape: [usize; 4]) -> Tensor<B, 4, Bool> {
        let flat: Vec<i32> = masks
            .into_iter()
            .flat_map(|m| m.iter().map(|&v| v as i32))
            .collect();
        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .equal_elem(1)
            .reshape(shape)
    }
}

/// Burn Int tensors are built from i32; vocabularies stay far below i32::MAX.
fn int_id(id: u32) -> i32 {
    debug_assert!(id <= i32::MAX as u32, "token id {id} does not fit in an i32 tensor");
    id as i32
}

impl<B: Backend> Batcher<EncodedPair, TranslationBatch<B>> for TranslationBatcher<B> {
    fn batch(&self, items: Vec<EncodedPair>) -> TranslationBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map_or(0, EncodedPair::seq_len);

        let encoder_input = self.ids(items.iter().map(|r| r.encoder_input.as_slice()).collect(), seq_len);
        let decoder_input = self.ids(items.iter().map(|r| r.decoder_input.as_slice()).collect(), seq_len);
        let label         = self.ids(items.iter().map(|r| r.label.as_slice()).collect(), seq_len);

        let encoder_mask = self.mask(
            items.iter().map(|r| r.encoder_mask.as_slice()).collect(),
            [batch_size, 1, 1, seq_len],
        );
        let decoder_mask = self.mask(
            items.iter().map(|r| r.decoder_mask.as_slice()).collect(),
            [batch_size, 1, seq_len, seq_len],
        );

        TranslationBatch { encoder_input, decoder_input, encoder_mask, decoder_mask, label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetConfig;
    use crate::data::{corpus::InMemoryCorpus, dataset::BilingualDataset};
    use crate::domain::pair::TranslationRow;
    use crate::domain::traits::doubles::{NumericEncoder, PAD};

    type TestBackend = burn::backend::NdArray;

    fn records() -> Vec<EncodedPair> {
        let corpus = InMemoryCorpus::new(vec![
            TranslationRow::new([("en", "5 6"), ("it", "7")]),
            TranslationRow::new([("en", "8"), ("it", "9 10 11")]),
        ]);
        let ds = BilingualDataset::new(
            corpus,
            NumericEncoder::default(),
            NumericEncoder::default(),
            DatasetConfig::new("en", "it", 6),
        )
        .unwrap();
        (0..2).map(|i| ds.get(i).unwrap().unwrap()).collect()
    }

    #[test]
    fn test_int_id_in_range() {
        assert_eq!(int_id(0), 0);
        assert_eq!(int_id(i32::MAX as u32), i32::MAX);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn test_int_id_overflow_panics_in_debug() {
        int_id(u32::MAX);
    }

    #[test]
    fn test_batch_shapes() {
        let batcher = TranslationBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(records());

        assert_eq!(batch.encoder_input.dims(), [2, 6]);
        assert_eq!(batch.decoder_input.dims(), [2, 6]);
        assert_eq!(batch.label.dims(),         [2, 6]);
        assert_eq!(batch.encoder_mask.dims(),  [2, 1, 1, 6]);
        assert_eq!(batch.decoder_mask.dims(),  [2, 1, 6, 6]);
    }

    #[test]
    fn test_batch_values_match_records() {
        let items   = records();
        let batcher = TranslationBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(items.clone());

        let label: Vec<i32> = batch.label.into_data().convert::<i32>().to_vec().unwrap();
        let expected: Vec<i32> = items
            .iter()
            .flat_map(|r| r.label.iter().map(|&id| id as i32))
            .collect();
        assert_eq!(label, expected);

        let enc_mask: Vec<bool> = batch.encoder_mask.into_data().to_vec().unwrap();
        let expected: Vec<bool> = items
            .iter()
            .flat_map(|r| r.encoder_input.iter().map(|&id| id != PAD))
            .collect();
        assert_eq!(enc_mask, expected);

        let dec_mask: Vec<bool> = batch.decoder_mask.into_data().to_vec().unwrap();
        assert_eq!(&dec_mask[36..], items[1].decoder_mask.as_slice());
    }
}
