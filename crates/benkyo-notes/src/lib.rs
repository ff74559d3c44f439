use std::path::PathBuf;

use benkyo_core::Corpus;

pub mod compose;
pub mod schema;
pub mod store;

pub use schema::NoteRecord;
pub use store::{NoteStore, TagOutcome};

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    /// Creation was attempted for a title that already has an artifact.
    /// Existing titles belong on the tag-update path, never here.
    #[error("note already exists: {corpus}/{title}")]
    AlreadyExists { corpus: Corpus, title: String },

    /// The ledger recorded this title but its artifact is gone. Indicates
    /// prior-run corruption; surfaced per item, never skipped.
    #[error("artifact missing for known {corpus} title {title:?}")]
    MissingArtifact { corpus: Corpus, title: String },

    #[error("malformed note {path:?}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("note storage error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
