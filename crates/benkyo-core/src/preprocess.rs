use unicode_normalization::UnicodeNormalization;

use crate::segment::strip_romanized;

pub trait Preprocessor {
    /// Default intake preprocessing: NFKC normalization, then removal of
    /// romanized annotations. Applied per input line.
    fn process(&self, line: &str) -> String {
        let line = line.trim();
        if line.is_empty() {
            return String::new();
        }

        let normalized: String = line.nfkc().collect();
        strip_romanized(&normalized)
    }
}

pub struct IntakePreprocessor;
impl Preprocessor for IntakePreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nfkc_folds_fullwidth_latin_before_stripping() {
        // Full-width "ＡＢＣ１" normalizes to ASCII and is then stripped.
        let out = IntakePreprocessor.process("ＡＢＣ１犬が走る");
        assert_eq!(out, "犬が走る");
    }

    #[test]
    fn blank_lines_collapse_to_empty() {
        assert_eq!(IntakePreprocessor.process("   "), "");
    }
}
