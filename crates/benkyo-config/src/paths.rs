use std::env;
use std::path::PathBuf;

use benkyo_core::Corpus;
use serde::{Deserialize, Serialize};

fn default_notes_root() -> PathBuf {
    PathBuf::from("Notes/Japanese Notes")
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("New Content")
}

#[derive(Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root of the note tree; index files and corpus directories live here.
    pub notes_root: PathBuf,
    /// Directory scanned for new `.txt` sources.
    pub input_dir: PathBuf,
    /// Directory the CSV exports are written to.
    pub csv_dir: PathBuf,
}

impl PathsConfig {
    pub fn new() -> Self {
        let notes_root = env::var("BENKYO_NOTES_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_notes_root());

        let input_dir = env::var("BENKYO_INPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_input_dir());

        let csv_dir = env::var("BENKYO_CSV_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| notes_root.join("CSV"));

        Self {
            notes_root,
            input_dir,
            csv_dir,
        }
    }

    /// Rooted at `root`, with the input and CSV directories alongside.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            input_dir: root.join("New Content"),
            csv_dir: root.join("CSV"),
            notes_root: root,
        }
    }

    /// Append-only title index for one corpus.
    pub fn index_file(&self, corpus: Corpus) -> PathBuf {
        self.notes_root.join(corpus.index_name())
    }

    /// Directory holding one corpus's note artifacts.
    pub fn corpus_dir(&self, corpus: Corpus) -> PathBuf {
        self.notes_root.join(corpus.dir_name())
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self::new()
    }
}
