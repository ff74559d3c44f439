/// Fixed note-record layout shared by the writer, the tag updater and the
/// export compiler:
///
/// ```text
/// TARGET DECK: <deck>
/// START
/// Basic
/// <front line(s)>
/// Back: <first back line>
/// <further back lines>
/// Tags: [[tag]] [[tag]]
///
/// END
/// ```
///
/// All field location goes through the one `render`/`parse` pair below; no
/// other code does marker arithmetic on artifact text.
pub const DECK_PREFIX: &str = "TARGET DECK: ";
pub const BLOCK_START: &str = "START";
pub const BLOCK_END: &str = "END";
pub const FORMAT_MARKER: &str = "Basic";
pub const BACK_PREFIX: &str = "Back: ";
pub const TAGS_PREFIX: &str = "Tags: ";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing deck declaration")]
    MissingDeck,
    #[error("missing format marker")]
    MissingFormatMarker,
    #[error("missing Back marker")]
    MissingBack,
    #[error("missing Tags marker")]
    MissingTags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub deck: String,
    pub front: Vec<String>,
    pub back: Vec<String>,
    pub tags: Vec<String>,
}

impl NoteRecord {
    pub fn new(
        deck: impl Into<String>,
        front: Vec<String>,
        back: Vec<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            deck: deck.into(),
            front,
            back,
            tags: vec![tag.into()],
        }
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.front.len() + self.back.len() + 6);
        lines.push(format!("{DECK_PREFIX}{}", self.deck));
        lines.push(BLOCK_START.to_string());
        lines.push(FORMAT_MARKER.to_string());
        lines.extend(self.front.iter().cloned());

        let (first_back, rest_back) = match self.back.split_first() {
            Some((first, rest)) => (first.as_str(), rest),
            None => ("", &[][..]),
        };
        lines.push(format!("{BACK_PREFIX}{first_back}"));
        lines.extend(rest_back.iter().cloned());

        let tag_tokens: Vec<String> = self.tags.iter().map(|t| frame_tag(t)).collect();
        lines.push(format!("{TAGS_PREFIX}{}", tag_tokens.join(" ")));
        lines.push(String::new());
        lines.push(BLOCK_END.to_string());

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Front begins after the format marker, back at the first `Back: `
    /// line, tags at the last `Tags: ` line.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = text.lines().collect();

        let deck = lines
            .first()
            .and_then(|l| l.strip_prefix(DECK_PREFIX))
            .ok_or(ParseError::MissingDeck)?
            .to_string();

        let marker = lines
            .iter()
            .position(|l| l.trim() == FORMAT_MARKER)
            .ok_or(ParseError::MissingFormatMarker)?;

        let back_idx = lines
            .iter()
            .position(|l| l.starts_with(BACK_PREFIX.trim_end()))
            .filter(|&i| i > marker)
            .ok_or(ParseError::MissingBack)?;

        let tags_idx = lines
            .iter()
            .rposition(|l| l.starts_with(TAGS_PREFIX.trim_end()))
            .filter(|&i| i > back_idx)
            .ok_or(ParseError::MissingTags)?;

        let front = lines[marker + 1..back_idx]
            .iter()
            .map(|l| l.to_string())
            .collect();

        let mut back = Vec::with_capacity(tags_idx - back_idx);
        let first_back = lines[back_idx]
            .strip_prefix(BACK_PREFIX)
            .unwrap_or("")
            .to_string();
        back.push(first_back);
        back.extend(lines[back_idx + 1..tags_idx].iter().map(|l| l.to_string()));

        let tags = parse_tags(lines[tags_idx]);

        Ok(Self {
            deck,
            front,
            back,
            tags,
        })
    }

    pub fn front_text(&self) -> String {
        self.front.join("\n")
    }

    pub fn back_text(&self) -> String {
        self.back.join("\n")
    }
}

pub fn frame_tag(tag: &str) -> String {
    format!("[[{tag}]]")
}

/// Extract bare tag names from a `Tags: ` line.
pub fn parse_tags(line: &str) -> Vec<String> {
    line.trim_start_matches(TAGS_PREFIX.trim_end())
        .split_whitespace()
        .filter_map(|token| {
            token
                .strip_prefix("[[")
                .and_then(|t| t.strip_suffix("]]"))
                .map(str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NoteRecord {
        NoteRecord::new(
            "Words",
            vec!["[[学]][[校]]".into()],
            vec!["school".into(), "がっこう".into()],
            "my_source",
        )
    }

    #[test]
    fn render_layout_is_exact() {
        let text = sample().render();
        assert_eq!(
            text,
            "TARGET DECK: Words\n\
             START\n\
             Basic\n\
             [[学]][[校]]\n\
             Back: school\n\
             がっこう\n\
             Tags: [[my_source]]\n\
             \n\
             END\n"
        );
    }

    #[test]
    fn parse_inverts_render() {
        let record = sample();
        let parsed = NoteRecord::parse(&record.render()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn back_text_recovered_round_trip() {
        let record = sample();
        let parsed = NoteRecord::parse(&record.render()).unwrap();
        assert_eq!(parsed.back_text(), "school\nがっこう");
    }

    #[test]
    fn last_tags_marker_wins() {
        // A front side may legitimately contain a line that looks like a
        // tag line; the tag section is the last occurrence.
        let text = "TARGET DECK: Sentences\nSTART\nBasic\nTags: [[decoy]]\nBack: x\nTags: [[real]]\n\nEND\n";
        let parsed = NoteRecord::parse(text).unwrap();
        assert_eq!(parsed.front, vec!["Tags: [[decoy]]"]);
        assert_eq!(parsed.tags, vec!["real"]);
    }

    #[test]
    fn missing_markers_rejected() {
        assert_eq!(
            NoteRecord::parse("TARGET DECK: Words\nSTART\nBasic\nfront\n"),
            Err(ParseError::MissingBack)
        );
        assert_eq!(
            NoteRecord::parse("TARGET DECK: Words\nSTART\nBasic\nBack: x\n"),
            Err(ParseError::MissingTags)
        );
        assert_eq!(NoteRecord::parse(""), Err(ParseError::MissingDeck));
    }

    #[test]
    fn multiple_tags_parsed_bare() {
        assert_eq!(
            parse_tags("Tags: [[source_one]] [[source_two]]"),
            vec!["source_one", "source_two"]
        );
    }

    #[test]
    fn empty_back_still_renders_marker() {
        let record = NoteRecord::new("Kanji", vec!["私, ".into()], vec![], "src");
        let text = record.render();
        assert!(text.contains("\nBack: \n"));
        let parsed = NoteRecord::parse(&text).unwrap();
        assert_eq!(parsed.back_text(), "");
    }
}
