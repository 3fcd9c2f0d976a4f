// src/application/note_session.rs
use crate::application::reconciler::{upsert, NoteStore, Reconciler};
use crate::domain::{DomainError, Note};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Remote collection the notes are mirrored to
///
/// Every call resolves to `DomainError::RemoteCallFailed` on a non-2xx status or a
/// network fault.
#[async_trait(?Send)]
pub trait NoteRemote {
    /// First page of remote notes in server order
    async fn list_first_page(&self) -> Result<Vec<Note>, DomainError>;

    /// Create a note; the returned id is assigned by the remote side
    async fn create(&self, text: &str) -> Result<Note, DomainError>;

    async fn update(&self, id: i64, text: &str) -> Result<(), DomainError>;

    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

/// Working set of notes plus the remote and local sides that back it
///
/// Mutations go to the remote first. Only a confirmed call touches the local
/// store and the rendered notes.
pub struct NoteSession<R: NoteRemote, S: NoteStore> {
    remote: R,
    reconciler: Reconciler<S>,
    notes: Vec<Note>,
}

impl<R: NoteRemote, S: NoteStore> NoteSession<R, S> {
    pub fn new(remote: R, store: S) -> Self {
        Self {
            remote,
            reconciler: Reconciler::new(store),
            notes: Vec::new(),
        }
    }

    /// Notes as currently rendered
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn store(&self) -> &S {
        self.reconciler.store()
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Fetch the remote page and merge it with the stored notes.
    ///
    /// A failed fetch is logged and leaves the stored notes as the rendered set
    /// without writing anything back.
    pub async fn load(&mut self) -> Result<&[Note], DomainError> {
        match self.remote.list_first_page().await {
            Ok(remote) => {
                self.notes = self.reconciler.merge_and_persist(&remote)?;
            }
            Err(e) => {
                warn!(error = %e, "Error fetching notes, showing local copy");
                self.notes = self.reconciler.local_notes();
            }
        }
        debug!(count = self.notes.len(), "Loaded notes");
        Ok(&self.notes)
    }

    pub async fn create(&mut self, text: &str) -> Result<Note, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyNote);
        }

        let note = self.remote.create(text).await?;
        self.reconciler.record_create(&note)?;
        upsert(&mut self.notes, note.clone());

        info!(note_id = note.id, "Created note");
        Ok(note)
    }

    /// Replace a note's text. Nothing changes locally until the remote confirms.
    ///
    /// Returns the note as confirmed by the remote.
    pub async fn update(&mut self, id: i64, text: &str) -> Result<Note, DomainError> {
        self.remote.update(id, text).await?;
        self.reconciler.record_update(id, text)?;
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => note.text = text.to_string(),
            None => warn!(note_id = id, "Updated note is not present locally"),
        }

        info!(note_id = id, "Updated note");
        Ok(Note::new(id, text))
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), DomainError> {
        self.remote.delete(id).await?;
        self.reconciler.record_delete(id)?;
        self.notes.retain(|n| n.id != id);

        info!(note_id = id, "Deleted note");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{MemoryNoteStore, MockNoteRemote, RemoteCall};

    #[tokio::test]
    async fn given_blank_text_when_creating_then_rejects_without_remote_call() {
        // Arrange
        let remote = MockNoteRemote::builder().build();
        let mut session = NoteSession::new(remote, MemoryNoteStore::new());

        // Act
        let result = session.create("   ").await;

        // Assert
        assert!(matches!(result, Err(DomainError::EmptyNote)));
        assert!(session.remote().calls().is_empty());
        assert_eq!(session.store().save_count(), 0);
    }

    #[tokio::test]
    async fn given_padded_text_when_creating_then_sends_trimmed_text() {
        // Arrange
        let remote = MockNoteRemote::builder().with_next_id(101).build();
        let mut session = NoteSession::new(remote, MemoryNoteStore::new());

        // Act
        let note = session.create("  hello  ").await.expect("Create should succeed");

        // Assert
        assert_eq!(note, Note::new(101, "hello"));
        assert_eq!(
            session.remote().calls(),
            vec![RemoteCall::Create("hello".to_string())]
        );
    }

    #[tokio::test]
    async fn given_remote_reusing_an_id_when_creating_twice_then_keeps_one_entry() {
        // Arrange
        let remote = MockNoteRemote::builder().with_fixed_create_id(101).build();
        let mut session = NoteSession::new(remote, MemoryNoteStore::new());

        // Act
        session.create("one").await.expect("Create should succeed");
        session.create("two").await.expect("Create should succeed");

        // Assert
        assert_eq!(session.notes(), &[Note::new(101, "two")]);
        assert_eq!(session.store().notes(), &[Note::new(101, "two")]);
    }

    #[tokio::test]
    async fn given_list_failure_when_loading_then_shows_local_notes_without_saving() {
        // Arrange
        let remote = MockNoteRemote::builder().with_list_failure().build();
        let store = MemoryNoteStore::with_notes(vec![Note::new(1, "kept")]);
        let mut session = NoteSession::new(remote, store);

        // Act
        let notes = session.load().await.expect("Load should tolerate remote failure");

        // Assert
        assert_eq!(notes, &[Note::new(1, "kept")]);
        assert_eq!(session.store().save_count(), 0);
    }

    #[tokio::test]
    async fn given_store_write_failure_when_creating_then_rendered_set_is_unchanged() {
        // Arrange
        let remote = MockNoteRemote::builder().with_next_id(101).build();
        let mut session = NoteSession::new(remote, MemoryNoteStore::failing());

        // Act
        let result = session.create("hello").await;

        // Assert
        assert!(matches!(result, Err(DomainError::StoreFailed(_))));
        assert!(session.notes().is_empty());
    }

    #[tokio::test]
    async fn given_note_missing_from_store_when_updating_then_only_rendered_set_changes() {
        // Arrange
        let remote = MockNoteRemote::builder().with_remote_note(3, "remote").build();
        let mut session = NoteSession::new(remote, MemoryNoteStore::new());
        session.load().await.expect("Load should succeed");
        let saves_after_load = session.store().save_count();

        // Act
        let confirmed = session.update(99, "nowhere").await.expect("Update should succeed");

        // Assert
        assert_eq!(confirmed, Note::new(99, "nowhere"));
        assert_eq!(session.notes(), &[Note::new(3, "remote")]);
        assert_eq!(session.store().save_count(), saves_after_load);
    }
}
