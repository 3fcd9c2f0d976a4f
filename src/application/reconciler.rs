// src/application/reconciler.rs
use crate::domain::{DomainError, Note};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Persistent key-value slot holding the whole note list
pub trait NoteStore {
    /// Stored notes, or an empty list when nothing usable is stored
    fn load(&self) -> Vec<Note>;

    /// Replace the stored list with `notes`
    fn save(&mut self, notes: &[Note]) -> Result<(), DomainError>;
}

/// Merge remote notes into the local ones, local first.
///
/// Local notes are kept verbatim and in stored order. A remote note is appended
/// only if its id is not already present, so the local copy wins on conflict.
pub fn merge_on_load(remote: &[Note], local: &[Note]) -> Vec<Note> {
    let mut seen: HashSet<i64> = local.iter().map(|n| n.id).collect();
    let mut merged = local.to_vec();

    for note in remote {
        if seen.insert(note.id) {
            merged.push(note.clone());
        }
    }

    merged
}

/// Put `note` in place of the entry with the same id, or append it
pub fn upsert(notes: &mut Vec<Note>, note: Note) {
    match notes.iter_mut().find(|n| n.id == note.id) {
        Some(existing) => {
            debug!(note_id = note.id, "Id already present, replacing entry");
            *existing = note;
        }
        None => notes.push(note),
    }
}

/// Keeps the local store in line with confirmed remote state
pub struct Reconciler<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn local_notes(&self) -> Vec<Note> {
        self.store.load()
    }

    /// Merge the remote page with the stored notes and persist the result
    #[instrument(level = "debug", skip_all, fields(remote = remote.len()))]
    pub fn merge_and_persist(&mut self, remote: &[Note]) -> Result<Vec<Note>, DomainError> {
        let local = self.store.load();
        let merged = merge_on_load(remote, &local);
        debug!(
            local = local.len(),
            merged = merged.len(),
            "Merged remote notes into local store"
        );
        self.store.save(&merged)?;
        Ok(merged)
    }

    pub fn record_create(&mut self, note: &Note) -> Result<(), DomainError> {
        let mut notes = self.store.load();
        upsert(&mut notes, note.clone());
        self.store.save(&notes)
    }

    /// Replace the text of the stored note with `id`; nothing is written if it is absent
    pub fn record_update(&mut self, id: i64, text: &str) -> Result<(), DomainError> {
        let mut notes = self.store.load();
        match notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.text = text.to_string();
                self.store.save(&notes)
            }
            None => {
                debug!(note_id = id, "Updated note not in local store");
                Ok(())
            }
        }
    }

    pub fn record_delete(&mut self, id: i64) -> Result<(), DomainError> {
        let mut notes = self.store.load();
        notes.retain(|n| n.id != id);
        self.store.save(&notes)
    }
}
