use std::fmt;

/// The four parallel note collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corpus {
    Content,
    Sentence,
    Word,
    Kanji,
}

impl Corpus {
    pub const ALL: [Corpus; 4] = [Corpus::Content, Corpus::Sentence, Corpus::Word, Corpus::Kanji];

    /// The corpora that produce flashcards (content notes are link pages only).
    pub const CARDS: [Corpus; 3] = [Corpus::Sentence, Corpus::Word, Corpus::Kanji];

    /// Directory holding this corpus's note artifacts.
    pub fn dir_name(self) -> &'static str {
        match self {
            Corpus::Content => "Content",
            Corpus::Sentence => "Sentences",
            Corpus::Word => "Words",
            Corpus::Kanji => "Kanji",
        }
    }

    /// File name of the append-only title index.
    pub fn index_name(self) -> &'static str {
        match self {
            Corpus::Content => "Content.md",
            Corpus::Sentence => "Sentences.md",
            Corpus::Word => "Words.md",
            Corpus::Kanji => "Kanji.md",
        }
    }

    /// Target deck written into each note artifact.
    pub fn deck(self) -> &'static str {
        self.dir_name()
    }

    /// Stable index for per-corpus storage arrays.
    pub fn slot(self) -> usize {
        match self {
            Corpus::Content => 0,
            Corpus::Sentence => 1,
            Corpus::Word => 2,
            Corpus::Kanji => 3,
        }
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Corpus::Content => "content",
            Corpus::Sentence => "sentence",
            Corpus::Word => "word",
            Corpus::Kanji => "kanji",
        };
        f.write_str(name)
    }
}

/// Titles double as file names and tag tokens; spaces and path separators
/// are not allowed there.
pub fn filename_safe(title: &str) -> String {
    title.replace([' ', '/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_distinct() {
        let mut seen = [false; 4];
        for corpus in Corpus::ALL {
            assert!(!seen[corpus.slot()]);
            seen[corpus.slot()] = true;
        }
    }

    #[test]
    fn spaces_replaced() {
        assert_eq!(filename_safe("my source 1"), "my_source_1");
        assert_eq!(filename_safe("学校"), "学校");
    }

    #[test]
    fn path_separators_replaced() {
        // '/' survives romanized stripping and is not a sentence terminator,
        // so it can reach a title; it must not nest the artifact path.
        assert_eq!(filename_safe("犬/猫"), "犬_猫");
        assert_eq!(filename_safe("a\\b"), "a_b");
    }
}
