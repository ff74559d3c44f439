use std::collections::HashSet;

/// Characters that terminate a sentence. Terminators are consumed, never
/// emitted as part of a sentence.
pub const SENTENCE_TERMINATORS: [char; 10] =
    ['\n', '.', '?', '!', '〪', '。', '〭', '！', '．', '？'];

/// Punctuation stripped from token streams before rendering or candidacy.
/// ASCII punctuation plus the CJK symbol and full-width blocks.
const TOKEN_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~\
！＂”“＃＄％＆＇（）＊＋，－．／：；＜＝＞？＠［＼］＾＿｀｛｜｝～\
、。〃〄々〆〇〈〉《》「」『』【】〒〓〔〕〖〗〘〙〚〛〜〝〞〟〠〡〢〣〤〥〦〧〨〩\
〪〭〮〯〫〬〰〱〲〳〴〵〶〷〸〹〺〻〼〽〾〿｟｠｡｢｣､･";

pub fn is_sentence_terminator(c: char) -> bool {
    SENTENCE_TERMINATORS.contains(&c)
}

pub fn is_punctuation_char(c: char) -> bool {
    TOKEN_PUNCTUATION.contains(c)
}

/// True for tokens that consist entirely of punctuation (or are empty).
pub fn is_punctuation_token(token: &str) -> bool {
    token.chars().all(is_punctuation_char)
}

/// Split raw text into sentences. A sentence is any non-empty run of
/// characters between terminators; a trailing run without a terminator is
/// still emitted.
pub fn segment(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if is_sentence_terminator(c) {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

/// Remove romanized annotations: ASCII letters, digits and spaces.
pub fn strip_romanized(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_alphanumeric() && *c != ' ')
        .collect()
}

/// Drop repeated items, keeping the first occurrence of each.
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|s| seen.insert(s.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminators_consumed() {
        assert_eq!(segment("犬が走る。猫も走る！"), vec!["犬が走る", "猫も走る"]);
    }

    #[test]
    fn trailing_content_emitted() {
        assert_eq!(segment("終わり。まだ続く"), vec!["終わり", "まだ続く"]);
    }

    #[test]
    fn empty_runs_dropped() {
        assert_eq!(segment("。。！\n"), Vec::<String>::new());
        assert_eq!(segment("一。。二"), vec!["一", "二"]);
    }

    #[test]
    fn romanized_annotations_removed() {
        assert_eq!(strip_romanized("犬 inu が 123 走る"), "犬が走る");
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let items = vec!["a".into(), "b".into(), "a".into(), "c".into(), "b".into()];
        assert_eq!(dedup_preserving_order(items), vec!["a", "b", "c"]);
    }

    #[test]
    fn punctuation_tokens_detected() {
        assert!(is_punctuation_token("「"));
        assert!(is_punctuation_token("、、"));
        assert!(!is_punctuation_token("学校"));
        assert!(!is_punctuation_token("走る。"));
    }
}
