use std::collections::HashSet;

use crate::kanji::{extract_kanji, is_kanji_bearing};
use crate::segment::{dedup_preserving_order, is_punctuation_token, segment};
use crate::tokenizer::Tokenizer;

/// One ingested text source: a normalized name plus its deduplicated
/// sentences. Candidate lists are batch-local; nothing here touches
/// persistent state.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub name: String,
    pub sentences: Vec<String>,
}

impl SourceBatch {
    /// Segment `text` into sentence candidates, dropping duplicates within
    /// the batch while preserving first-occurrence order.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self {
            name: name.into(),
            sentences: dedup_preserving_order(segment(text)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    fn joined(&self) -> String {
        self.sentences.concat()
    }

    /// Word candidates: tokens of the batch's concatenated sentences,
    /// deduplicated, minus punctuation-only tokens, restricted to
    /// kanji-bearing words (`known_kanji` counts as kanji).
    pub fn word_candidates(
        &self,
        tokenizer: &dyn Tokenizer,
        known_kanji: &HashSet<char>,
    ) -> Vec<String> {
        let tokens = tokenizer.tokenize(&self.joined());
        dedup_preserving_order(tokens)
            .into_iter()
            .filter(|t| !is_punctuation_token(t))
            .filter(|t| is_kanji_bearing(t, known_kanji))
            .collect()
    }

    /// Kanji candidates: every kanji of the batch text, first-occurrence
    /// order, deduplicated.
    pub fn kanji_candidates(&self) -> Vec<char> {
        extract_kanji(&self.joined())
    }
}
