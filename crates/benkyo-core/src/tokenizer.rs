use crate::kanji::is_kanji;
use crate::segment::is_punctuation_char;

/// Word-segmentation seam. Implementations return tokens in order, verbatim;
/// no normalization is applied on top of what the segmenter produced.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Tokenizer for pre-segmented input: whitespace-delimited tokens verbatim.
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Kanji,
    Hiragana,
    Katakana,
    Punctuation,
    Other,
}

fn script_of(c: char) -> Script {
    let cp = c as u32;
    if is_kanji(c) {
        Script::Kanji
    } else if (0x3040..=0x309F).contains(&cp) {
        Script::Hiragana
    } else if (0x30A0..=0x30FF).contains(&cp) || cp == 0xFF70 {
        Script::Katakana
    } else if is_punctuation_char(c) || c.is_whitespace() {
        Script::Punctuation
    } else {
        Script::Other
    }
}

/// Offline fallback segmenter: tokens are maximal runs of a single script
/// class. Coarser than a dictionary-backed segmenter, but deterministic and
/// dependency-free; a service-backed implementation slots in behind the
/// `Tokenizer` trait.
pub struct ScriptBoundaryTokenizer;

impl Tokenizer for ScriptBoundaryTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut current_script = None;

        for c in text.chars() {
            let script = script_of(c);
            if Some(script) != current_script && !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            current_script = Some(script);
            current.push(c);
        }
        if !current.is_empty() {
            tokens.push(current);
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_tokens_verbatim() {
        let tokens = WhitespaceTokenizer.tokenize("犬 が 走る");
        assert_eq!(tokens, vec!["犬", "が", "走る"]);
    }

    #[test]
    fn script_runs_become_tokens() {
        let tokens = ScriptBoundaryTokenizer.tokenize("私は学生です");
        assert_eq!(tokens, vec!["私", "は", "学生", "です"]);
    }

    #[test]
    fn punctuation_separates_runs() {
        let tokens = ScriptBoundaryTokenizer.tokenize("学校、先生");
        assert_eq!(tokens, vec!["学校", "、", "先生"]);
    }

    #[test]
    fn katakana_kept_whole() {
        let tokens = ScriptBoundaryTokenizer.tokenize("テレビを見る");
        assert_eq!(tokens, vec!["テレビ", "を", "見", "る"]);
    }
}
