// src/infrastructure/file_store.rs
use crate::application::NoteStore;
use crate::domain::{DomainError, Note};
use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

/// Note list kept as a JSON array in `<dir>/<key>.json`
#[derive(Debug)]
pub struct FileNoteStore {
    dir: PathBuf,
    path: PathBuf,
}

impl FileNoteStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let path = dir.join(format!("{}.json", key));
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Write to a sibling temp file and rename over the old value
    fn write_all_notes(&self, notes: &[Note]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create store directory {}", self.dir.display()))?;

        let json = serde_json::to_string(notes).context("Failed to serialize notes")?;

        let mut temp = NamedTempFile::new_in(&self.dir)
            .context("Failed to create temporary store file")?;
        temp.write_all(json.as_bytes())
            .context("Failed to write notes to temporary store file")?;
        temp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

impl NoteStore for FileNoteStore {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Vec<Note> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored notes yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored notes, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Note>>(&content) {
            Ok(notes) => {
                debug!(count = notes.len(), "Loaded stored notes");
                notes
            }
            Err(e) => {
                warn!(error = %e, "Stored notes are malformed, starting empty");
                Vec::new()
            }
        }
    }

    #[instrument(level = "debug", skip(self, notes), fields(count = notes.len()))]
    fn save(&mut self, notes: &[Note]) -> Result<(), DomainError> {
        self.write_all_notes(notes)
            .map_err(|e| DomainError::StoreFailed(format!("{:#}", e)))
    }
}
