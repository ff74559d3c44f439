use std::collections::HashSet;

/// CJK code-point ranges treated as kanji (inclusive).
pub const KANJI_RANGES: [(u32, u32); 3] = [(0x3400, 0x4DBF), (0x4E00, 0x9FCB), (0xF900, 0xFA6A)];

pub fn is_kanji(c: char) -> bool {
    let cp = c as u32;
    KANJI_RANGES.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
}

/// Kanji characters of `text` in first-occurrence order, deduplicated.
pub fn extract_kanji(text: &str) -> Vec<char> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for c in text.chars() {
        if is_kanji(c) && seen.insert(c) {
            out.push(c);
        }
    }
    out
}

/// A word qualifies for its own note when it carries at least one kanji,
/// counting characters recorded as kanji in earlier runs.
pub fn is_kanji_bearing(word: &str, known_kanji: &HashSet<char>) -> bool {
    word.chars().any(|c| is_kanji(c) || known_kanji.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kana_excluded() {
        assert_eq!(extract_kanji("私は学生です"), vec!['私', '学', '生']);
    }

    #[test]
    fn first_occurrence_order_without_duplicates() {
        assert_eq!(extract_kanji("学生の学校"), vec!['学', '生', '校']);
    }

    #[test]
    fn range_membership() {
        assert!(is_kanji('犬'));
        assert!(!is_kanji('あ'));
        assert!(!is_kanji('ア'));
        assert!(!is_kanji('a'));
    }

    #[test]
    fn known_kanji_extend_classification() {
        let known: HashSet<char> = ['々'].into_iter().collect();
        assert!(!is_kanji_bearing("あれこれ", &known));
        assert!(is_kanji_bearing("人々", &known));
        assert!(is_kanji_bearing("学校", &HashSet::new()));
    }
}
