// ============================================================
// Layer 4 — Bilingual Dataset
// ============================================================
// Turns one raw corpus row into one fixed-width training record.
//
// For seq_len = 10, source ids [5, 6, 7], target ids [8, 9]:
//
//   encoder_input  SOS  5   6   7  EOS PAD PAD PAD PAD PAD   (pad = 10-3-2)
//   decoder_input  SOS  8   9  PAD PAD PAD PAD PAD PAD PAD   (pad = 10-2-1)
//   label           8   9  EOS PAD PAD PAD PAD PAD PAD PAD
//
// A sentence that does not fit is rejected with SequenceTooLong.
// Nothing is truncated: a silently shortened target would teach
// the model to stop mid-sentence.
//
// Special-token ids are resolved once in the constructor. The
// source tokenizer supplies the encoder's SOS/EOS/PAD and the
// target tokenizer supplies the decoder's, so two vocabularies
// that number "[PAD]" differently still produce correct masks.
//
// Two dataset types live here:
//   BilingualDataset → lazy, encodes row i on request
//   EncodedDataset   → eager, holds prepared records and
//                      implements Burn's Dataset trait

use burn::data::dataset::Dataset;

use crate::config::DatasetConfig;
use crate::domain::mask::{causal_mask, AttentionMask};
use crate::domain::pair::{EncodedPair, Side, TranslationPair, TranslationRow};
use crate::domain::traits::{Corpus, TextEncoder};
use crate::error::{DatasetError, Result};

/// `[SOS]` and `[EOS]` around the encoder input.
pub const ENCODER_OVERHEAD: usize = 2;

/// `[SOS]` in front of the decoder input, or `[EOS]` after the label.
pub const DECODER_OVERHEAD: usize = 1;

// ─── SpecialIds ───────────────────────────────────────────────────────────────
/// Special-token ids of one tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialIds {
    pub sos: u32,
    pub eos: u32,
    pub pad: u32,
}

impl SpecialIds {
    /// Look up the configured special tokens in `tokenizer`.
    pub fn resolve(tokenizer: &impl TextEncoder, config: &DatasetConfig, side: Side) -> Result<Self> {
        let lookup = |token: &str| {
            tokenizer
                .token_to_id(token)
                .ok_or_else(|| DatasetError::MissingSpecialToken {
                    side,
                    token: token.to_string(),
                })
        };
        Ok(Self {
            sos: lookup(&config.sos_token)?,
            eos: lookup(&config.eos_token)?,
            pad: lookup(&config.pad_token)?,
        })
    }
}

// ─── LengthPolicy ─────────────────────────────────────────────────────────────
/// What `prepare_all` does with rows that exceed `seq_len`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthPolicy {
    /// Stop at the first over-long row and return its error.
    #[default]
    Error,
    /// Drop over-long rows and record their indices.
    Skip,
}

/// Result of encoding a whole corpus.
#[derive(Debug, Clone, Default)]
pub struct Prepared {
    pub records: Vec<EncodedPair>,
    /// Corpus indices dropped under `LengthPolicy::Skip`.
    pub skipped: Vec<usize>,
}

// ─── BilingualDataset ─────────────────────────────────────────────────────────
pub struct BilingualDataset<C, S, T> {
    corpus:        C,
    src_tokenizer: S,
    tgt_tokenizer: T,
    config:        DatasetConfig,
    src_ids:       SpecialIds,
    tgt_ids:       SpecialIds,
    causal:        AttentionMask,
}

impl<C, S, T> BilingualDataset<C, S, T>
where
    C: Corpus,
    S: TextEncoder,
    T: TextEncoder,
{
    /// Validate `config` and resolve both tokenizers' special tokens.
    pub fn new(corpus: C, src_tokenizer: S, tgt_tokenizer: T, config: DatasetConfig) -> Result<Self> {
        config.validate()?;
        let src_ids = SpecialIds::resolve(&src_tokenizer, &config, Side::Source)?;
        let tgt_ids = SpecialIds::resolve(&tgt_tokenizer, &config, Side::Target)?;
        let causal  = causal_mask(config.seq_len);

        tracing::debug!(
            "Dataset {} -> {}, seq_len={}, source ids {:?}, target ids {:?}",
            config.src_lang,
            config.tgt_lang,
            config.seq_len,
            src_ids,
            tgt_ids
        );

        Ok(Self { corpus, src_tokenizer, tgt_tokenizer, config, src_ids, tgt_ids, causal })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn seq_len(&self) -> usize {
        self.config.seq_len
    }

    pub fn source_ids(&self) -> SpecialIds {
        self.src_ids
    }

    pub fn target_ids(&self) -> SpecialIds {
        self.tgt_ids
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// The raw sentence pair at `index`, or `None` past the end.
    pub fn pair(&self, index: usize) -> Result<Option<TranslationPair>> {
        match self.corpus.get(index) {
            Some(row) => self.select(&row, index).map(Some),
            None => Ok(None),
        }
    }

    /// Encode the row at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Result<Option<EncodedPair>> {
        match self.pair(index)? {
            Some(pair) => self.encode_pair(&pair).map(Some),
            None => Ok(None),
        }
    }

    /// Tokenized (source, target) lengths of the row at `index`,
    /// before any special tokens are added.
    pub fn token_counts(&self, index: usize) -> Result<Option<(usize, usize)>> {
        match self.pair(index)? {
            Some(pair) => {
                let src = self.src_tokenizer.encode(&pair.src_text)?.len();
                let tgt = self.tgt_tokenizer.encode(&pair.tgt_text)?.len();
                Ok(Some((src, tgt)))
            }
            None => Ok(None),
        }
    }

    /// Pad, frame and mask one sentence pair.
    pub fn encode_pair(&self, pair: &TranslationPair) -> Result<EncodedPair> {
        let src_tokens = self.src_tokenizer.encode(&pair.src_text)?;
        let tgt_tokens = self.tgt_tokenizer.encode(&pair.tgt_text)?;

        let enc_pad = self.padding(Side::Source, src_tokens.len(), ENCODER_OVERHEAD)?;
        let dec_pad = self.padding(Side::Target, tgt_tokens.len(), DECODER_OVERHEAD)?;

        let src = self.src_ids;
        let tgt = self.tgt_ids;
        let n   = self.config.seq_len;

        let mut encoder_input = Vec::with_capacity(n);
        encoder_input.push(src.sos);
        encoder_input.extend_from_slice(&src_tokens);
        encoder_input.push(src.eos);
        encoder_input.resize(encoder_input.len() + enc_pad, src.pad);

        let mut decoder_input = Vec::with_capacity(n);
        decoder_input.push(tgt.sos);
        decoder_input.extend_from_slice(&tgt_tokens);
        decoder_input.resize(decoder_input.len() + dec_pad, tgt.pad);

        let mut label = Vec::with_capacity(n);
        label.extend_from_slice(&tgt_tokens);
        label.push(tgt.eos);
        label.resize(label.len() + dec_pad, tgt.pad);

        debug_assert_eq!(encoder_input.len(), n);
        debug_assert_eq!(decoder_input.len(), n);
        debug_assert_eq!(label.len(), n);

        let encoder_mask = AttentionMask::padding(&encoder_input, src.pad);
        let decoder_mask = AttentionMask::from_fn([1, n, n], |_, i, j| {
            decoder_input[j] != tgt.pad && self.causal.get(0, i, j)
        });

        tracing::trace!(
            "Encoded pair: {} source tokens, {} target tokens",
            src_tokens.len(),
            tgt_tokens.len()
        );

        Ok(EncodedPair {
            encoder_input,
            decoder_input,
            encoder_mask,
            decoder_mask,
            label,
            src_text: pair.src_text.clone(),
            tgt_text: pair.tgt_text.clone(),
        })
    }

    /// Encode every row, applying `policy` to over-long ones.
    /// Any other error always propagates.
    pub fn prepare_all(&self, policy: LengthPolicy) -> Result<Prepared> {
        let mut prepared = Prepared::default();

        for index in 0..self.len() {
            match self.get(index) {
                Ok(Some(record)) => prepared.records.push(record),
                Ok(None) => break,
                Err(e @ DatasetError::SequenceTooLong { .. }) if policy == LengthPolicy::Skip => {
                    tracing::warn!("Skipping row {}: {}", index, e);
                    prepared.skipped.push(index);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Prepared {} records ({} skipped as too long)",
            prepared.records.len(),
            prepared.skipped.len()
        );
        Ok(prepared)
    }

    fn select(&self, row: &TranslationRow, index: usize) -> Result<TranslationPair> {
        let text = |lang: &str| {
            row.text(lang).ok_or_else(|| DatasetError::MissingLanguage {
                index,
                lang: lang.to_string(),
            })
        };
        Ok(TranslationPair::new(
            text(&self.config.src_lang)?,
            text(&self.config.tgt_lang)?,
        ))
    }

    /// `seq_len - tokens - overhead`, or SequenceTooLong if that is negative.
    fn padding(&self, side: Side, tokens: usize, overhead: usize) -> Result<usize> {
        let seq_len = self.config.seq_len;
        seq_len
            .checked_sub(tokens + overhead)
            .ok_or(DatasetError::SequenceTooLong { side, tokens, overhead, seq_len })
    }
}

// ─── EncodedDataset ───────────────────────────────────────────────────────────
/// Prepared records behind Burn's `Dataset` trait, ready for a DataLoader.
pub struct EncodedDataset {
    records: Vec<EncodedPair>,
}

impl EncodedDataset {
    pub fn new(records: Vec<EncodedPair>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EncodedPair] {
        &self.records
    }
}

impl From<Prepared> for EncodedDataset {
    fn from(prepared: Prepared) -> Self {
        Self::new(prepared.records)
    }
}

impl Dataset<EncodedPair> for EncodedDataset {
    fn get(&self, index: usize) -> Option<EncodedPair> {
        self.records.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::corpus::InMemoryCorpus;
    use crate::domain::traits::doubles::{sentence, NumericEncoder, EOS, PAD, SOS};

    fn corpus(pairs: &[(&str, &str)]) -> InMemoryCorpus {
        pairs
            .iter()
            .map(|(src, tgt)| TranslationRow::new([("en", *src), ("it", *tgt)]))
            .collect::<Vec<_>>()
            .into()
    }

    fn dataset(
        pairs: &[(&str, &str)],
        seq_len: usize,
    ) -> BilingualDataset<InMemoryCorpus, NumericEncoder, NumericEncoder> {
        BilingualDataset::new(
            corpus(pairs),
            NumericEncoder::default(),
            NumericEncoder::default(),
            DatasetConfig::new("en", "it", seq_len),
        )
        .unwrap()
    }

    #[test]
    fn test_encoder_input_layout() {
        let ds  = dataset(&[("5 6 7", "8 9")], 10);
        let rec = ds.get(0).unwrap().unwrap();
        assert_eq!(
            rec.encoder_input,
            vec![SOS, 5, 6, 7, EOS, PAD, PAD, PAD, PAD, PAD]
        );
    }

    #[test]
    fn test_decoder_input_and_label_layout() {
        let ds  = dataset(&[("5 6 7", "8 9")], 10);
        let rec = ds.get(0).unwrap().unwrap();
        assert_eq!(rec.decoder_input, vec![SOS, 8, 9, PAD, PAD, PAD, PAD, PAD, PAD, PAD]);
        assert_eq!(rec.label,         vec![8, 9, EOS, PAD, PAD, PAD, PAD, PAD, PAD, PAD]);
    }

    #[test]
    fn test_all_sequences_have_seq_len() {
        let ds = dataset(&[("5", "6"), ("5 6 7 8", "9 10 11"), ("", "")], 8);
        for i in 0..ds.len() {
            let rec = ds.get(i).unwrap().unwrap();
            assert_eq!(rec.encoder_input.len(), 8);
            assert_eq!(rec.decoder_input.len(), 8);
            assert_eq!(rec.label.len(), 8);
            assert_eq!(rec.seq_len(), 8);
        }
    }

    #[test]
    fn test_keeps_raw_texts() {
        let ds  = dataset(&[("5 6", "7")], 6);
        let rec = ds.get(0).unwrap().unwrap();
        assert_eq!(rec.src_text, "5 6");
        assert_eq!(rec.tgt_text, "7");
    }

    #[test]
    fn test_encoder_mask_marks_non_padding() {
        let ds  = dataset(&[("5 6 7", "8")], 10);
        let rec = ds.get(0).unwrap().unwrap();
        assert_eq!(rec.encoder_mask.shape(), [1, 1, 10]);
        for i in 0..10 {
            assert_eq!(rec.encoder_mask.get(0, 0, i), rec.encoder_input[i] != PAD);
        }
    }

    #[test]
    fn test_decoder_mask_is_padding_and_causal() {
        let ds  = dataset(&[("5", "8 9 10")], 7);
        let rec = ds.get(0).unwrap().unwrap();
        assert_eq!(rec.decoder_mask.shape(), [1, 7, 7]);
        for i in 0..7 {
            for j in 0..7 {
                let expected = rec.decoder_input[j] != PAD && j <= i;
                assert_eq!(rec.decoder_mask.get(0, i, j), expected, "({i}, {j})");
            }
        }
        // Padding columns are blocked even on the diagonal
        assert!(!rec.decoder_mask.get(0, 6, 6));
        assert!(rec.decoder_mask.get(0, 6, 3));
    }

    #[test]
    fn test_exact_fit_has_no_padding() {
        // 3 source tokens + 2 overhead = 5, 4 target tokens + 1 = 5
        let ds  = dataset(&[("5 6 7", "8 9 10 11")], 5);
        let rec = ds.get(0).unwrap().unwrap();
        assert_eq!(rec.encoder_input, vec![SOS, 5, 6, 7, EOS]);
        assert_eq!(rec.label, vec![8, 9, 10, 11, EOS]);
        assert_eq!(rec.encoder_mask.count_true(), 5);
    }

    #[test]
    fn test_target_too_long() {
        let ds  = dataset(&[("5", "8 9 10 11 12")], 5);
        let err = ds.get(0).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::SequenceTooLong { side: Side::Target, tokens: 5, overhead: 1, seq_len: 5 }
        ));
    }

    #[test]
    fn test_source_too_long() {
        // 4 + 2 = 6 > 5
        let ds  = dataset(&[("5 6 7 8", "9")], 5);
        let err = ds.get(0).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::SequenceTooLong { side: Side::Source, tokens: 4, overhead: 2, .. }
        ));
    }

    #[test]
    fn test_out_of_range_is_none() {
        let ds = dataset(&[("5", "6")], 5);
        assert!(ds.get(1).unwrap().is_none());
        assert!(ds.pair(1).unwrap().is_none());
    }

    #[test]
    fn test_missing_language() {
        let corpus = InMemoryCorpus::new(vec![TranslationRow::new([("en", "5")])]);
        let ds = BilingualDataset::new(
            corpus,
            NumericEncoder::default(),
            NumericEncoder::default(),
            DatasetConfig::new("en", "it", 5),
        )
        .unwrap();
        let err = ds.get(0).unwrap_err();
        assert!(matches!(err, DatasetError::MissingLanguage { index: 0, ref lang } if lang == "it"));
    }

    #[test]
    fn test_tokenizer_error_propagates() {
        let ds = dataset(&[("five", "6")], 5);
        assert!(matches!(ds.get(0), Err(DatasetError::Tokenizer(_))));
    }

    #[test]
    fn test_missing_special_token_fails_construction() {
        let result = BilingualDataset::new(
            corpus(&[("5", "6")]),
            NumericEncoder::default(),
            NumericEncoder::default().without("[EOS]"),
            DatasetConfig::new("en", "it", 5),
        );
        assert!(matches!(
            result,
            Err(DatasetError::MissingSpecialToken { side: Side::Target, ref token }) if token == "[EOS]"
        ));
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let result = BilingualDataset::new(
            corpus(&[]),
            NumericEncoder::default(),
            NumericEncoder::default(),
            DatasetConfig::new("en", "it", 1),
        );
        assert!(matches!(result, Err(DatasetError::InvalidConfig(_))));
    }

    #[test]
    fn test_special_ids_resolved_once() {
        let src = NumericEncoder::default();
        let tgt = NumericEncoder::default();
        let ds  = BilingualDataset::new(
            corpus(&[("5", "6"), ("7", "8")]),
            &src,
            &tgt,
            DatasetConfig::new("en", "it", 6),
        )
        .unwrap();
        let after_new = src.lookups.get() + tgt.lookups.get();
        assert_eq!(after_new, 6);

        ds.get(0).unwrap();
        ds.get(1).unwrap();
        assert_eq!(src.lookups.get() + tgt.lookups.get(), after_new);
    }

    #[test]
    fn test_sides_use_their_own_special_ids() {
        // Target vocabulary numbers its specials differently
        let ds = BilingualDataset::new(
            corpus(&[("5", "6")]),
            NumericEncoder::new(1, 2, 0),
            NumericEncoder::new(101, 102, 100),
            DatasetConfig::new("en", "it", 5),
        )
        .unwrap();
        let rec = ds.get(0).unwrap().unwrap();

        assert_eq!(rec.encoder_input, vec![1, 5, 2, 0, 0]);
        assert_eq!(rec.decoder_input, vec![101, 6, 100, 100, 100]);
        assert_eq!(rec.label,         vec![6, 102, 100, 100, 100]);

        // Decoder padding is detected with the target pad id
        assert!(rec.decoder_mask.get(0, 4, 1));
        assert!(!rec.decoder_mask.get(0, 4, 2));
    }

    #[test]
    fn test_repeated_get_is_identical() {
        let ds = dataset(&[("5 6 7", "8 9")], 10);
        assert_eq!(ds.get(0).unwrap(), ds.get(0).unwrap());
    }

    #[test]
    fn test_token_counts() {
        let ds = dataset(&[("5 6 7", "8 9")], 10);
        assert_eq!(ds.token_counts(0).unwrap(), Some((3, 2)));
        assert_eq!(ds.token_counts(1).unwrap(), None);
    }

    #[test]
    fn test_prepare_all_error_policy_stops() {
        let long = sentence(9);
        let ds   = dataset(&[("5", "6"), (long.as_str(), "7"), ("8", "9")], 6);
        let err  = ds.prepare_all(LengthPolicy::Error).unwrap_err();
        assert!(matches!(err, DatasetError::SequenceTooLong { .. }));
    }

    #[test]
    fn test_prepare_all_skip_policy_drops_long_rows() {
        let long = sentence(9);
        let ds   = dataset(&[("5", "6"), (long.as_str(), "7"), ("8", "9")], 6);
        let prepared = ds.prepare_all(LengthPolicy::Skip).unwrap();
        assert_eq!(prepared.records.len(), 2);
        assert_eq!(prepared.skipped, vec![1]);
        assert_eq!(prepared.records[1].src_text, "8");
    }

    #[test]
    fn test_skip_policy_still_propagates_other_errors() {
        let ds = dataset(&[("5", "6"), ("oops", "7")], 6);
        assert!(matches!(
            ds.prepare_all(LengthPolicy::Skip),
            Err(DatasetError::Tokenizer(_))
        ));
    }

    #[test]
    fn test_encoded_dataset_implements_burn_dataset() {
        let ds       = dataset(&[("5", "6"), ("7", "8")], 6);
        let prepared = ds.prepare_all(LengthPolicy::Error).unwrap();
        let encoded  = EncodedDataset::from(prepared);
        assert_eq!(Dataset::len(&encoded), 2);
        assert_eq!(Dataset::get(&encoded, 1).unwrap().src_text, "7");
        assert!(Dataset::get(&encoded, 2).is_none());
    }
}
