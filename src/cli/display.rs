//! Text rendering of notes for the terminal

use chrono::Local;

use super::short_id;
use super::ui::{selection_prefix, truncate};
use crate::models::Note;

/// Local creation date, e.g. `2024-03-01`
pub fn format_date(note: &Note) -> String {
    note.date.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Marker column: pinned, archived, or blank
fn flag(note: &Note) -> &'static str {
    if note.pinned {
        "*"
    } else if note.archived {
        "~"
    } else {
        " "
    }
}

/// Marker, short id, date, title and todo progress on one line. The short
/// id keeps rows of same-titled notes distinct.
pub fn row_head(note: &Note, selected: bool) -> String {
    let mut head = format!(
        "{}{} {}  {}  {}",
        selection_prefix(selected),
        flag(note),
        short_id(&note.id),
        format_date(note),
        note.display_title(),
    );
    if let Some((done, total)) = note.todo_progress() {
        head.push_str(&format!("  [{}/{}]", done, total));
    }
    head
}

/// One list row: the row head plus a preview line
pub fn format_row(note: &Note, selected: bool, width: usize) -> String {
    let head = truncate(&row_head(note, selected), width);

    let preview = note.preview();
    if preview.is_empty() {
        head
    } else {
        let preview = preview.replace('\n', " ");
        format!("{}\n      {}", head, truncate(&preview, width.saturating_sub(6)))
    }
}

/// Full note: header, content, todos and summary
pub fn print_note(note: &Note) {
    println!("{}", note.display_title());

    let mut meta = vec![format_date(note), note.id.clone()];
    if note.pinned {
        meta.push("pinned".to_string());
    }
    if note.archived {
        meta.push("archived".to_string());
    }
    println!("  {}", meta.join("  "));

    if !note.content.is_empty() {
        println!();
        for line in note.content.lines() {
            println!("  {}", line);
        }
    }

    if let Some((done, total)) = note.todo_progress() {
        println!();
        println!("todos {}/{}", done, total);
        for (i, todo) in note.todos.iter().enumerate() {
            println!("  {}. {} {}", i + 1, todo.checkbox(), todo.text);
        }
    }

    if !note.summary.is_empty() {
        println!();
        println!("summary");
        println!("  {}", note.summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Todo;

    #[test]
    fn test_row_includes_todo_progress() {
        let mut note = Note::new();
        note.title = "Errands".to_string();
        let mut done = Todo::with_text("post office");
        done.done = true;
        note.todos = vec![done, Todo::with_text("bank")];

        let row = format_row(&note, false, 120);
        assert!(row.contains("Errands"));
        assert!(row.contains("[1/2]"));
        assert!(!row.contains('\n'));
    }

    #[test]
    fn test_row_marks_pinned_and_selected() {
        let mut note = Note::new();
        note.pinned = true;
        note.content = "first line\nsecond".to_string();

        let row = format_row(&note, true, 120);
        assert!(row.starts_with("> *"));
        assert!(row.contains("first line second"));
    }

    #[test]
    fn test_same_title_rows_differ() {
        let first = Note::new();
        let mut second = Note::new();
        second.date = first.date;
        assert_eq!(first.display_title(), second.display_title());

        let a = row_head(&first, false);
        let b = row_head(&second, false);
        assert_ne!(a, b);
        assert!(a.contains(short_id(&first.id)));
    }
}
