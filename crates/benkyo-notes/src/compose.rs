use std::collections::HashSet;

use benkyo_core::Corpus;
use benkyo_core::kanji::is_kanji;
use benkyo_core::segment::is_punctuation_token;
use benkyo_enrich::{KanjiInfo, Translation, WordInfo};

use crate::schema::{NoteRecord, frame_tag};

/// Sentence front: each non-punctuation token cross-linked to its word note.
pub fn sentence_front(tokens: &[String]) -> String {
    tokens
        .iter()
        .filter(|t| !is_punctuation_token(t))
        .map(|t| frame_tag(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word front: the surface form with every kanji character cross-linked into
/// the kanji corpus. `known_kanji` extends the code-point ranges with
/// characters recorded in earlier runs.
pub fn word_front(word: &str, known_kanji: &HashSet<char>) -> String {
    word.chars()
        .map(|c| {
            if is_kanji(c) || known_kanji.contains(&c) {
                frame_tag(&c.to_string())
            } else {
                c.to_string()
            }
        })
        .collect()
}

/// Kanji front: the character plus its stroke count (blank when unknown).
pub fn kanji_front(kanji: char, stroke_count: Option<u32>) -> String {
    let strokes = stroke_count.map(|n| n.to_string()).unwrap_or_default();
    format!("{kanji}, {strokes}")
}

pub fn sentence_note(tokens: &[String], translation: &Translation, tag: &str) -> NoteRecord {
    NoteRecord::new(
        Corpus::Sentence.deck(),
        vec![sentence_front(tokens)],
        vec![translation.text.clone()],
        tag,
    )
}

pub fn word_note(
    word: &str,
    info: &WordInfo,
    known_kanji: &HashSet<char>,
    tag: &str,
) -> NoteRecord {
    NoteRecord::new(
        Corpus::Word.deck(),
        vec![word_front(word, known_kanji)],
        vec![info.definitions.join("; "), info.reading.clone()],
        tag,
    )
}

pub fn kanji_note(kanji: char, info: &KanjiInfo, tag: &str) -> NoteRecord {
    NoteRecord::new(
        Corpus::Kanji.deck(),
        vec![kanji_front(kanji, info.stroke_count)],
        vec![
            info.keyword.clone(),
            info.readings.join(", "),
            info.radicals.join(", "),
        ],
        tag,
    )
}
