// src/application/mod.rs
pub mod note_session;
pub mod reconciler;

pub use note_session::{NoteRemote, NoteSession};
pub use reconciler::{merge_on_load, upsert, NoteStore, Reconciler};
