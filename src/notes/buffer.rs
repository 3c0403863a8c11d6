//! Staging copy of the selected note's editable fields.
//!
//! Nothing here touches the collection: changes only reach the note through
//! an explicit save.

use crate::models::{Note, Todo};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub title: String,
    pub content: String,
    pub todos: Vec<Todo>,
}

impl EditBuffer {
    /// Mirror a note's editable fields
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            todos: note.todos.clone(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Append an empty todo and return its id
    pub fn add_todo(&mut self) -> String {
        let todo = Todo::new();
        let id = todo.id.clone();
        self.todos.push(todo);
        id
    }

    pub fn set_todo_text(&mut self, todo_id: &str, text: impl Into<String>) {
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == todo_id) {
            todo.text = text.into();
        }
    }

    pub fn toggle_todo(&mut self, todo_id: &str) {
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == todo_id) {
            todo.done = !todo.done;
        }
    }

    pub fn remove_todo(&mut self, todo_id: &str) {
        self.todos.retain(|t| t.id != todo_id);
    }

    /// Whether saving would change the note
    pub fn is_dirty(&self, note: &Note) -> bool {
        self.title != note.title || self.content != note.content || self.todos != note.todos
    }

    /// Overwrite the note's editable fields. Identity, flags, date and
    /// summary are left alone.
    pub fn apply_to(&self, note: &mut Note) {
        note.title = self.title.clone();
        note.content = self.content.clone();
        note.todos = self.todos.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_note_mirrors_fields() {
        let mut note = Note::new();
        note.title = "Trip".to_string();
        note.content = "pack bags".to_string();
        note.todos.push(Todo::with_text("passport"));

        let buffer = EditBuffer::from_note(&note);
        assert_eq!(buffer.title, "Trip");
        assert_eq!(buffer.content, "pack bags");
        assert_eq!(buffer.todos, note.todos);
        assert!(!buffer.is_dirty(&note));
    }

    #[test]
    fn test_todo_editing() {
        let mut buffer = EditBuffer::default();
        let first = buffer.add_todo();
        let second = buffer.add_todo();
        assert_ne!(first, second);

        buffer.set_todo_text(&first, "buy milk");
        buffer.toggle_todo(&first);
        buffer.remove_todo(&second);

        assert_eq!(buffer.todos.len(), 1);
        assert_eq!(buffer.todos[0].text, "buy milk");
        assert!(buffer.todos[0].done);

        buffer.toggle_todo(&first);
        assert!(!buffer.todos[0].done);
    }

    #[test]
    fn test_unknown_todo_ids_ignored() {
        let mut buffer = EditBuffer::default();
        buffer.add_todo();
        let before = buffer.clone();

        buffer.set_todo_text("nope", "x");
        buffer.toggle_todo("nope");
        buffer.remove_todo("nope");
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_apply_keeps_identity_and_flags() {
        let mut note = Note::new();
        note.pinned = true;
        note.archived = true;
        note.summary = "short".to_string();
        let id = note.id.clone();
        let date = note.date;

        let mut buffer = EditBuffer::from_note(&note);
        buffer.set_title("Renamed");
        buffer.set_content("new body");
        assert!(buffer.is_dirty(&note));
        buffer.apply_to(&mut note);

        assert_eq!(note.title, "Renamed");
        assert_eq!(note.content, "new body");
        assert_eq!(note.id, id);
        assert_eq!(note.date, date);
        assert!(note.pinned);
        assert!(note.archived);
        assert_eq!(note.summary, "short");
    }
}
