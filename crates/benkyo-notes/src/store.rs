use std::path::PathBuf;

use benkyo_config::paths::PathsConfig;
use benkyo_core::Corpus;
use benkyo_core::corpus::filename_safe;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::NoteError;
use crate::schema::{NoteRecord, TAGS_PREFIX, frame_tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOutcome {
    Appended,
    AlreadyTagged,
}

/// On-disk artifact store: one markdown file per note, file name derived
/// from the title. Creation and tag appension are the only mutations.
pub struct NoteStore {
    paths: PathsConfig,
    // Tag edits are read-modify-write; serialized per corpus so concurrent
    // batches cannot lose updates on the same artifact.
    edit_locks: [Mutex<()>; 4],
}

impl NoteStore {
    /// Create the store, ensuring every corpus directory exists.
    pub async fn init(paths: PathsConfig) -> Result<Self, NoteError> {
        for corpus in Corpus::ALL {
            let dir = paths.corpus_dir(corpus);
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|source| NoteError::Io { path: dir, source })?;
        }
        Ok(Self {
            paths,
            edit_locks: [const { Mutex::const_new(()) }; 4],
        })
    }

    pub fn artifact_path(&self, corpus: Corpus, title: &str) -> PathBuf {
        self.paths
            .corpus_dir(corpus)
            .join(format!("{}.md", filename_safe(title)))
    }

    /// Persist a freshly created note. Refuses to overwrite: an existing
    /// artifact means the router misclassified, and clobbering it would
    /// drop that note's accumulated tags.
    pub async fn create(
        &self,
        corpus: Corpus,
        title: &str,
        record: &NoteRecord,
    ) -> Result<(), NoteError> {
        let path = self.artifact_path(corpus, title);
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(NoteError::AlreadyExists {
                    corpus,
                    title: title.to_string(),
                });
            }
            Err(source) => return Err(NoteError::Io { path, source }),
        };

        file.write_all(record.render().as_bytes())
            .await
            .map_err(|source| NoteError::Io { path, source })?;
        tracing::debug!(%corpus, title, "note created");
        Ok(())
    }

    /// Append `tag` to an existing artifact's tag line. Idempotent: an
    /// already-present tag leaves the file untouched. Every byte outside the
    /// tag line is preserved.
    pub async fn append_tag(
        &self,
        corpus: Corpus,
        title: &str,
        tag: &str,
    ) -> Result<TagOutcome, NoteError> {
        let _guard = self.edit_locks[corpus.slot()].lock().await;

        let path = self.artifact_path(corpus, title);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(NoteError::MissingArtifact {
                    corpus,
                    title: title.to_string(),
                });
            }
            Err(source) => return Err(NoteError::Io { path, source }),
        };

        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        let tags_idx = lines
            .iter()
            .rposition(|l| l.starts_with(TAGS_PREFIX.trim_end()))
            .ok_or_else(|| NoteError::Malformed {
                path: path.clone(),
                reason: "missing Tags marker".to_string(),
            })?;

        let token = frame_tag(tag);
        if lines[tags_idx]
            .split_whitespace()
            .any(|existing| existing == token)
        {
            return Ok(TagOutcome::AlreadyTagged);
        }

        let line = &mut lines[tags_idx];
        if !line.ends_with(' ') {
            line.push(' ');
        }
        line.push_str(&token);

        let mut updated = lines.join("\n");
        if text.ends_with('\n') {
            updated.push('\n');
        }
        tokio::fs::write(&path, updated)
            .await
            .map_err(|source| NoteError::Io { path, source })?;
        tracing::debug!(%corpus, title, tag, "tag appended");
        Ok(TagOutcome::Appended)
    }

    /// Content artifacts are link pages: one cross-link per batch sentence.
    pub async fn write_content(&self, name: &str, sentences: &[String]) -> Result<(), NoteError> {
        let path = self.artifact_path(Corpus::Content, name);
        let mut body = String::new();
        for sentence in sentences {
            body.push_str(&frame_tag(sentence));
            body.push('\n');
        }
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| NoteError::Io { path, source })?;
        Ok(())
    }

    pub fn corpus_dir(&self, corpus: Corpus) -> PathBuf {
        self.paths.corpus_dir(corpus)
    }
}
