use std::path::{Path, PathBuf};

use benkyo_config::paths::PathsConfig;
use benkyo_core::Corpus;
use benkyo_notes::NoteRecord;

pub mod cloze;

pub use cloze::cloze_front;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One exported flashcard; `cloze` is present only when the front side
/// carried cross-links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    pub front: String,
    pub back: String,
    pub cloze: Option<String>,
}

impl CardRow {
    fn from_record(record: &NoteRecord) -> Self {
        let front = record.front_text();
        let cloze = cloze_front(&front);
        Self {
            front,
            back: record.back_text(),
            cloze,
        }
    }
}

/// Parse every artifact in `dir` into a card row. Malformed artifacts are
/// skipped with a warning; a corrupt note must not sink the whole export.
/// Rows come back in file-name order so the output is stable.
pub async fn compile_dir(dir: &Path) -> Result<Vec<CardRow>, ExportError> {
    let io_err = |source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_err(e)),
    };
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "md") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut rows = Vec::with_capacity(paths.len());
    for path in paths {
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
        match NoteRecord::parse(&text) {
            Ok(record) => rows.push(CardRow::from_record(&record)),
            Err(reason) => {
                tracing::warn!(path = %path.display(), %reason, "skipping malformed artifact");
            }
        }
    }
    Ok(rows)
}

/// Write the `Front,Back` table and the `Cloze,Back` companion table.
pub fn write_csv(
    rows: &[CardRow],
    csv_path: &Path,
    cloze_path: &Path,
) -> Result<(), ExportError> {
    let mut basic = csv::Writer::from_path(csv_path)?;
    basic.write_record(["Front", "Back"])?;
    for row in rows {
        basic.write_record([&row.front, &row.back])?;
    }
    basic.flush().map_err(|source| ExportError::Io {
        path: csv_path.to_path_buf(),
        source,
    })?;

    let mut cloze = csv::Writer::from_path(cloze_path)?;
    cloze.write_record(["Cloze", "Back"])?;
    for row in rows {
        if let Some(text) = &row.cloze {
            cloze.write_record([text, &row.back])?;
        }
    }
    cloze.flush().map_err(|source| ExportError::Io {
        path: cloze_path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Compile one corpus directory and emit its CSV pair. Returns the number of
/// exported rows.
pub async fn export_corpus(paths: &PathsConfig, corpus: Corpus) -> Result<usize, ExportError> {
    let rows = compile_dir(&paths.corpus_dir(corpus)).await?;

    tokio::fs::create_dir_all(&paths.csv_dir)
        .await
        .map_err(|source| ExportError::Io {
            path: paths.csv_dir.clone(),
            source,
        })?;

    let csv_path = paths.csv_dir.join(format!("{}.csv", corpus.dir_name()));
    let cloze_path = paths
        .csv_dir
        .join(format!("{}_cloze.csv", corpus.dir_name()));
    write_csv(&rows, &csv_path, &cloze_path)?;

    tracing::info!(%corpus, rows = rows.len(), "exported");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use benkyo_enrich::Translation;
    use benkyo_notes::NoteStore;
    use benkyo_notes::compose::sentence_note;

    use super::*;

    #[tokio::test]
    async fn round_trip_recovers_back_text() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathsConfig::rooted_at(dir.path());
        let store = NoteStore::init(paths.clone()).await.unwrap();

        let tokens: Vec<String> = ["犬", "が", "走る"].iter().map(|s| s.to_string()).collect();
        let translation = Translation {
            text: "The dog runs".into(),
        };
        let note = sentence_note(&tokens, &translation, "src");
        store.create(Corpus::Sentence, "犬が走る", &note).await.unwrap();

        let rows = compile_dir(&paths.corpus_dir(Corpus::Sentence)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].back, "The dog runs");
        assert_eq!(rows[0].front, "[[犬]] [[が]] [[走る]]");
        assert_eq!(
            rows[0].cloze.as_deref(),
            Some("{{c1::犬}} {{c2::が}} {{c3::走る}}")
        );
    }

    #[tokio::test]
    async fn malformed_artifacts_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathsConfig::rooted_at(dir.path());
        let store = NoteStore::init(paths.clone()).await.unwrap();

        let tokens = vec!["猫".to_string()];
        let note = sentence_note(&tokens, &Translation::degraded(), "src");
        store.create(Corpus::Sentence, "猫", &note).await.unwrap();
        std::fs::write(
            paths.corpus_dir(Corpus::Sentence).join("broken.md"),
            "not a note at all\n",
        )
        .unwrap();

        let rows = compile_dir(&paths.corpus_dir(Corpus::Sentence)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].front, "[[猫]]");
    }

    #[tokio::test]
    async fn missing_corpus_dir_exports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let rows = compile_dir(&dir.path().join("nope")).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn csv_pair_written() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathsConfig::rooted_at(dir.path());
        let store = NoteStore::init(paths.clone()).await.unwrap();

        let tokens = vec!["学校".to_string()];
        let note = sentence_note(&tokens, &Translation { text: "school".into() }, "src");
        store.create(Corpus::Sentence, "学校", &note).await.unwrap();

        let count = export_corpus(&paths, Corpus::Sentence).await.unwrap();
        assert_eq!(count, 1);

        let basic = std::fs::read_to_string(paths.csv_dir.join("Sentences.csv")).unwrap();
        assert!(basic.starts_with("Front,Back\n"));
        assert!(basic.contains("[[学校]]"));
        let cloze = std::fs::read_to_string(paths.csv_dir.join("Sentences_cloze.csv")).unwrap();
        assert!(cloze.contains("{{c1::学校}}"));
    }
}
