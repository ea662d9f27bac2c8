// ============================================================
// Layer 4 — Parallel Corpus Loader
// ============================================================
// Reads translation rows into memory and exposes them through
// the Corpus trait.
//
// Two on-disk formats are accepted:
//
//   JSON Lines (.jsonl) — one row per line, the same layout as
//   the common "opus_books"-style datasets:
//     {"id": "0", "translation": {"en": "...", "it": "..."}}
//
//   TSV (.tsv / .txt) — "source<TAB>target" per line, with the
//   two columns stored under the configured language keys.
//   Blank lines and lines starting with '#' are skipped.
//
// A malformed JSON line is an error (with its line number);
// a malformed TSV line is logged and skipped, since hand-edited
// TSV files commonly carry stray lines.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::pair::TranslationRow;
use crate::domain::traits::Corpus;
use crate::error::{DatasetError, Result};

/// A corpus held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    rows: Vec<TranslationRow>,
}

impl InMemoryCorpus {
    pub fn new(rows: Vec<TranslationRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TranslationRow] {
        &self.rows
    }

    /// Parse JSON Lines from any buffered reader.
    pub fn from_jsonl_reader(reader: impl BufRead) -> Result<Self> {
        let mut rows = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let row: TranslationRow = serde_json::from_str(&line)
                .map_err(|source| DatasetError::Json { line: i + 1, source })?;
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Parse `source<TAB>target` lines, storing them under `src_lang` / `tgt_lang`.
    pub fn from_tsv_reader(reader: impl BufRead, src_lang: &str, tgt_lang: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() != 2 {
                tracing::warn!("Skipping line {}: expected 2 tab-separated columns", i + 1);
                continue;
            }

            let mut row = TranslationRow::new([
                (src_lang, parts[0].trim()),
                (tgt_lang, parts[1].trim()),
            ]);
            row.id = Some((i + 1).to_string());
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Load a corpus file, picking the format from its extension.
    /// Anything other than `.tsv` / `.txt` is read as JSON Lines.
    pub fn load(path: impl AsRef<Path>, src_lang: &str, tgt_lang: &str) -> Result<Self> {
        let path   = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let corpus = match path.extension().and_then(|e| e.to_str()) {
            Some("tsv") | Some("txt") => Self::from_tsv_reader(reader, src_lang, tgt_lang)?,
            _ => Self::from_jsonl_reader(reader)?,
        };

        tracing::info!("Loaded {} rows from '{}'", corpus.len(), path.display());
        Ok(corpus)
    }
}

impl From<Vec<TranslationRow>> for InMemoryCorpus {
    fn from(rows: Vec<TranslationRow>) -> Self {
        Self::new(rows)
    }
}

impl Corpus for InMemoryCorpus {
    fn get(&self, index: usize) -> Option<TranslationRow> {
        self.rows.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jsonl_parses_rows_and_skips_blank_lines() {
        let data = "{\"translation\":{\"en\":\"Hi\",\"it\":\"Ciao\"}}\n\n\
                    {\"id\":\"2\",\"translation\":{\"en\":\"Yes\",\"it\":\"Si\"}}\n";
        let corpus = InMemoryCorpus::from_jsonl_reader(Cursor::new(data)).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(1).unwrap().text("it"), Some("Si"));
        assert!(corpus.get(2).is_none());
    }

    #[test]
    fn test_jsonl_reports_line_number() {
        let data = "{\"translation\":{\"en\":\"Hi\"}}\nnot json\n";
        let err = InMemoryCorpus::from_jsonl_reader(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, DatasetError::Json { line: 2, .. }));
    }

    #[test]
    fn test_tsv_uses_language_keys() {
        let data = "# comment\nHello\tCiao\n\nbroken line\nThanks\tGrazie\n";
        let corpus = InMemoryCorpus::from_tsv_reader(Cursor::new(data), "en", "it").unwrap();
        assert_eq!(corpus.len(), 2);
        let row = corpus.get(1).unwrap();
        assert_eq!(row.text("en"), Some("Thanks"));
        assert_eq!(row.text("it"), Some("Grazie"));
        assert_eq!(row.id.as_deref(), Some("5"));
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = InMemoryCorpus::default();
        assert!(corpus.is_empty());
        assert!(corpus.get(0).is_none());
    }
}
