use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Todo;

/// Title given to freshly created notes
pub const DEFAULT_TITLE: &str = "Untitled Note";

/// Number of content characters shown in list previews
pub const PREVIEW_CHARS: usize = 100;

/// A single note in a collection.
///
/// Deserialization is tolerant: every field falls back to its default when
/// missing so older or hand-edited collections still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    /// Creation time, never changed after the note is created
    pub date: DateTime<Utc>,
    pub archived: bool,
    pub pinned: bool,
    pub todos: Vec<Todo>,
}

impl Note {
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
            summary: String::new(),
            date: Utc::now(),
            archived: false,
            pinned: false,
            todos: Vec::new(),
        }
    }

    /// Title for display, falling back to the default for blank titles
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    /// First `PREVIEW_CHARS` characters of the content, with `...` when cut
    pub fn preview(&self) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }

    /// Completed and total todo counts, or None when the note has no todos
    pub fn todo_progress(&self) -> Option<(usize, usize)> {
        if self.todos.is_empty() {
            return None;
        }
        let done = self.todos.iter().filter(|t| t.done).count();
        Some((done, self.todos.len()))
    }
}

impl Default for Note {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            content: String::new(),
            summary: String::new(),
            date: DateTime::<Utc>::default(),
            archived: false,
            pinned: false,
            todos: Vec::new(),
        }
    }
}

/// Generate an opaque unique id for notes and todos
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
