use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use benkyo_core::SourceBatch;
use benkyo_core::corpus::filename_safe;
use benkyo_core::preprocess::{IntakePreprocessor, Preprocessor};

/// Load every `.txt` file in `input_dir` as a source batch, in file-name
/// order. Lines are NFKC-normalized, stripped of romanized annotations and
/// deduplicated within the file; files left with no usable text are skipped.
pub async fn load_batches(input_dir: &Path) -> anyhow::Result<Vec<SourceBatch>> {
    let mut entries = match tokio::fs::read_dir(input_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("reading input directory {input_dir:?}"));
        }
    };

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("reading input directory {input_dir:?}"))?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut batches = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping source with unusable name");
            continue;
        };
        let name = filename_safe(stem);

        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading source {path:?}"))?;

        let mut seen = HashSet::new();
        let mut blob = String::with_capacity(text.len());
        for line in text.lines() {
            let processed = IntakePreprocessor.process(line);
            if !processed.is_empty() && seen.insert(processed.clone()) {
                blob.push_str(&processed);
                blob.push('\n');
            }
        }

        let batch = SourceBatch::from_text(name, &blob);
        if batch.is_empty() {
            tracing::warn!(path = %path.display(), "source contains no Japanese text; skipping");
            continue;
        }
        batches.push(batch);
    }

    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn batches_from(files: &[(&str, &str)]) -> Vec<SourceBatch> {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        load_batches(dir.path()).await.unwrap()
    }

    #[tokio::test]
    async fn one_batch_per_txt_file() {
        let batches = batches_from(&[
            ("b story.txt", "猫も走る。"),
            ("a story.txt", "犬が走る。"),
            ("notes.md", "ignored"),
        ])
        .await;

        let names: Vec<&str> = batches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["a_story", "b_story"]);
    }

    #[tokio::test]
    async fn romanized_lines_and_duplicates_dropped() {
        let batches = batches_from(&[(
            "s.txt",
            "dog runs 123\n犬が走る。\n犬が走る。\n猫も走る！\n",
        )])
        .await;

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].sentences, vec!["犬が走る", "猫も走る"]);
    }

    #[tokio::test]
    async fn empty_sources_skipped() {
        let batches = batches_from(&[("latin.txt", "only english here\n")]).await;
        assert!(batches.is_empty());
    }

    #[tokio::test]
    async fn missing_input_dir_is_no_sources() {
        let dir = tempfile::tempdir().unwrap();
        let batches = load_batches(&dir.path().join("nope")).await.unwrap();
        assert!(batches.is_empty());
    }
}
