// src/domain/note.rs
use serde::{Deserialize, Serialize};

/// A single note as kept in the working set and in the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub text: String,
}

impl Note {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
