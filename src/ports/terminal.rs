// src/ports/terminal.rs
use crate::domain::Note;

#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    /// One `id  text` row per note, ids right-aligned
    pub fn render(&self, notes: &[Note]) -> String {
        if notes.is_empty() {
            return "No notes.".to_string();
        }

        let width = notes
            .iter()
            .map(|n| n.id.to_string().len())
            .max()
            .unwrap_or(0);

        notes
            .iter()
            .map(|n| format!("{:>width$}  {}", n.id, n.text, width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_json(&self, notes: &[Note]) -> serde_json::Result<String> {
        serde_json::to_string_pretty(notes)
    }
}
