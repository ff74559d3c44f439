use std::collections::HashSet;
use std::path::{Path, PathBuf};

use benkyo_config::paths::PathsConfig;
use benkyo_core::Corpus;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub mod router;

pub use router::{Partition, partition};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger index {path} unavailable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of an atomic check-and-record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seen {
    New,
    Existing,
}

struct CorpusLedger {
    titles: HashSet<String>,
    path: PathBuf,
}

impl CorpusLedger {
    fn io_err(&self, source: std::io::Error) -> LedgerError {
        LedgerError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Durable set of previously recorded titles, one index file per corpus.
///
/// `check_and_record` is the single critical section of the whole pipeline:
/// the per-corpus mutex covers both the membership test and the append, so
/// two candidates for the same title can never both observe it as new.
/// Persistence is append-only; prior entries are never rewritten.
pub struct Ledger {
    corpora: [Mutex<CorpusLedger>; 4],
}

impl Ledger {
    /// Load all four indexes. A missing index starts empty; the file is
    /// created on first append.
    pub async fn load(paths: &PathsConfig) -> Result<Self, LedgerError> {
        tokio::fs::create_dir_all(&paths.notes_root)
            .await
            .map_err(|source| LedgerError::Io {
                path: paths.notes_root.clone(),
                source,
            })?;

        let mut slots = Vec::with_capacity(4);
        for corpus in Corpus::ALL {
            let path = paths.index_file(corpus);
            let ledger = Self::load_corpus(&path).await?;
            tracing::debug!(%corpus, titles = ledger.titles.len(), "ledger index loaded");
            slots.push(Mutex::new(ledger));
        }

        let corpora = match <[Mutex<CorpusLedger>; 4]>::try_from(slots) {
            Ok(corpora) => corpora,
            Err(_) => unreachable!("exactly four corpora"),
        };
        Ok(Self { corpora })
    }

    async fn load_corpus(path: &Path) -> Result<CorpusLedger, LedgerError> {
        let titles = match tokio::fs::read_to_string(path).await {
            Ok(text) => text.lines().filter_map(parse_title).collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(source) => {
                return Err(LedgerError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Ok(CorpusLedger {
            titles,
            path: path.to_path_buf(),
        })
    }

    fn slot(&self, corpus: Corpus) -> &Mutex<CorpusLedger> {
        &self.corpora[corpus.slot()]
    }

    pub async fn contains(&self, corpus: Corpus, title: &str) -> bool {
        self.slot(corpus).lock().await.titles.contains(title)
    }

    /// Snapshot of a corpus's known titles.
    pub async fn known_titles(&self, corpus: Corpus) -> HashSet<String> {
        self.slot(corpus).lock().await.titles.clone()
    }

    /// Atomically classify `title` and, when new, record it durably before
    /// releasing the corpus lock. Once this returns `Seen::New`, every later
    /// check in the same run observes the title as existing.
    pub async fn check_and_record(
        &self,
        corpus: Corpus,
        title: &str,
    ) -> Result<Seen, LedgerError> {
        let mut ledger = self.slot(corpus).lock().await;
        if ledger.titles.contains(title) {
            return Ok(Seen::Existing);
        }

        let line = frame_title(title);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&ledger.path)
            .await
            .map_err(|e| ledger.io_err(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| ledger.io_err(e))?;
        ledger.titles.insert(title.to_string());
        Ok(Seen::New)
    }

    /// Fsync all four indexes. Called once at end of run.
    pub async fn flush(&self) -> Result<(), LedgerError> {
        for slot in &self.corpora {
            let ledger = slot.lock().await;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&ledger.path)
                .await
                .map_err(|e| ledger.io_err(e))?;
            file.sync_all().await.map_err(|e| ledger.io_err(e))?;
        }
        Ok(())
    }
}

/// Index lines are framed `[[title]]`; tolerate bare titles from older
/// hand-edited indexes.
fn parse_title(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let bare = line
        .strip_prefix("[[")
        .and_then(|s| s.strip_suffix("]]"))
        .unwrap_or(line);
    (!bare.is_empty()).then(|| bare.to_string())
}

fn frame_title(title: &str) -> String {
    format!("[[{title}]]\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn paths() -> (tempfile::TempDir, PathsConfig) {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathsConfig::rooted_at(dir.path());
        (dir, paths)
    }

    #[tokio::test]
    async fn new_then_existing() {
        let (_dir, paths) = paths();
        let ledger = Ledger::load(&paths).await.unwrap();

        assert_eq!(
            ledger.check_and_record(Corpus::Word, "学校").await.unwrap(),
            Seen::New
        );
        assert_eq!(
            ledger.check_and_record(Corpus::Word, "学校").await.unwrap(),
            Seen::Existing
        );
        assert!(ledger.contains(Corpus::Word, "学校").await);
        // Corpora are independent.
        assert!(!ledger.contains(Corpus::Sentence, "学校").await);
    }

    #[tokio::test]
    async fn titles_survive_reload() {
        let (_dir, paths) = paths();
        {
            let ledger = Ledger::load(&paths).await.unwrap();
            ledger.check_and_record(Corpus::Kanji, "学").await.unwrap();
            ledger.check_and_record(Corpus::Kanji, "校").await.unwrap();
            ledger.flush().await.unwrap();
        }

        let reloaded = Ledger::load(&paths).await.unwrap();
        assert!(reloaded.contains(Corpus::Kanji, "学").await);
        assert!(reloaded.contains(Corpus::Kanji, "校").await);
        assert_eq!(
            reloaded.check_and_record(Corpus::Kanji, "学").await.unwrap(),
            Seen::Existing
        );
    }

    #[tokio::test]
    async fn index_is_append_only_and_bracketed() {
        let (_dir, paths) = paths();
        let ledger = Ledger::load(&paths).await.unwrap();
        ledger.check_and_record(Corpus::Sentence, "犬が走る").await.unwrap();
        ledger.check_and_record(Corpus::Sentence, "猫も走る").await.unwrap();
        ledger.flush().await.unwrap();

        let text = std::fs::read_to_string(paths.index_file(Corpus::Sentence)).unwrap();
        assert_eq!(text, "[[犬が走る]]\n[[猫も走る]]\n");
    }

    #[tokio::test]
    async fn bare_lines_tolerated_on_load() {
        let (_dir, paths) = paths();
        std::fs::create_dir_all(&paths.notes_root).unwrap();
        std::fs::write(paths.index_file(Corpus::Word), "学校\n[[先生]]\n\n").unwrap();

        let ledger = Ledger::load(&paths).await.unwrap();
        assert!(ledger.contains(Corpus::Word, "学校").await);
        assert!(ledger.contains(Corpus::Word, "先生").await);
    }

    #[tokio::test]
    async fn unwritable_index_is_an_error_for_that_corpus_only() {
        let (_dir, paths) = paths();
        let ledger = Ledger::load(&paths).await.unwrap();
        // A directory squatting on the index path makes the append fail.
        std::fs::create_dir_all(paths.index_file(Corpus::Sentence)).unwrap();

        let err = ledger
            .check_and_record(Corpus::Sentence, "犬が走る")
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Io { .. }));
        // The failure did not poison the classification.
        assert!(!ledger.contains(Corpus::Sentence, "犬が走る").await);

        assert_eq!(
            ledger.check_and_record(Corpus::Word, "犬").await.unwrap(),
            Seen::New
        );
    }

    #[tokio::test]
    async fn concurrent_checks_classify_exactly_one_as_new() {
        let (_dir, paths) = paths();
        let ledger = Arc::new(Ledger::load(&paths).await.unwrap());

        let mut handles = Vec::new();
        for _ in 0..16 {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(async move {
                ledger.check_and_record(Corpus::Word, "学校").await.unwrap()
            }));
        }

        let mut new_count = 0;
        for handle in handles {
            if handle.await.unwrap() == Seen::New {
                new_count += 1;
            }
        }
        assert_eq!(new_count, 1);
    }
}
