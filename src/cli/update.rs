//! Note editing through the edit buffer
//!
//! Flags apply their changes and save in one step. Without flags an
//! interactive editor works on the buffer until the user saves or discards.

use anyhow::{anyhow, Result};

use super::ui::{clear_screen, confirm, select, status, text_input, wait_for_continue};
use super::{resolve_note_id, AppSession, EditArgs};
use crate::models::Note;
use crate::notes::EditBuffer;

/// Execute the edit command
pub fn run_edit(session: &mut AppSession, args: &EditArgs) -> Result<()> {
    let id = resolve_note_id(session, &args.note)?;
    session.select_note(Some(&id));

    if args.has_changes() {
        apply_edit_args(session.edit_buffer_mut(), args)?;
        session.save_selected()?;
        status("Saved.");
        return Ok(());
    }

    edit_interactive(session)
}

/// Apply flag edits to the buffer. Todo positions are 1-based and refer to
/// the list before any of this call's changes.
pub fn apply_edit_args(buffer: &mut EditBuffer, args: &EditArgs) -> Result<()> {
    let toggles = todo_ids_at(buffer, &args.toggle_todo)?;
    let removals = todo_ids_at(buffer, &args.remove_todo)?;

    if let Some(title) = &args.title {
        buffer.set_title(title.clone());
    }
    if let Some(content) = &args.content {
        buffer.set_content(content.clone());
    }
    for id in &toggles {
        buffer.toggle_todo(id);
    }
    for id in &removals {
        buffer.remove_todo(id);
    }
    for text in &args.add_todo {
        let id = buffer.add_todo();
        buffer.set_todo_text(&id, text.clone());
    }
    Ok(())
}

fn todo_ids_at(buffer: &EditBuffer, positions: &[usize]) -> Result<Vec<String>> {
    positions
        .iter()
        .map(|&position| {
            position
                .checked_sub(1)
                .and_then(|i| buffer.todos.get(i))
                .map(|t| t.id.clone())
                .ok_or_else(|| anyhow!("No todo at position {}.", position))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditAction {
    Title,
    Content,
    AddTodo,
    EditTodo,
    ToggleTodo,
    RemoveTodo,
    Save,
    Discard,
}

impl EditAction {
    const ALL: &'static [EditAction] = &[
        EditAction::Title,
        EditAction::Content,
        EditAction::AddTodo,
        EditAction::EditTodo,
        EditAction::ToggleTodo,
        EditAction::RemoveTodo,
        EditAction::Save,
        EditAction::Discard,
    ];

    fn label(self) -> &'static str {
        match self {
            EditAction::Title => "Title",
            EditAction::Content => "Content",
            EditAction::AddTodo => "Add todo",
            EditAction::EditTodo => "Edit todo",
            EditAction::ToggleTodo => "Check/uncheck todo",
            EditAction::RemoveTodo => "Remove todo",
            EditAction::Save => "Save",
            EditAction::Discard => "Back without saving",
        }
    }
}

fn print_buffer(buffer: &EditBuffer, dirty: bool) {
    println!("{}{}", buffer.title, if dirty { "  (unsaved)" } else { "" });
    println!();
    for line in buffer.content.lines() {
        println!("  {}", line);
    }
    if !buffer.todos.is_empty() {
        println!();
        for (i, todo) in buffer.todos.iter().enumerate() {
            println!("  {}. {} {}", i + 1, todo.checkbox(), todo.text);
        }
    }
    println!();
}

fn pick_todo(buffer: &EditBuffer) -> Result<Option<String>> {
    let labels: Vec<String> = buffer
        .todos
        .iter()
        .map(|t| format!("{} {}", t.checkbox(), t.text))
        .collect();
    if labels.is_empty() {
        println!("No todos.");
        wait_for_continue();
        return Ok(None);
    }
    Ok(select("todo:", &labels)?.map(|i| buffer.todos[i].id.clone()))
}

/// Interactive buffer editor for the selected note
pub fn edit_interactive(session: &mut AppSession) -> Result<()> {
    let labels: Vec<&str> = EditAction::ALL.iter().map(|a| a.label()).collect();

    loop {
        let Some(note) = session.notes().selected().cloned() else {
            return Ok(());
        };
        let _ = clear_screen();
        print_buffer(session.edit_buffer(), session.edit_buffer().is_dirty(&note));

        let Some(index) = select("edit:", &labels)? else {
            return leave(session, &note);
        };

        match EditAction::ALL[index] {
            EditAction::Title => {
                let current = session.edit_buffer().title.clone();
                if let Some(title) = text_input("title:", Some(&current))? {
                    session.edit_buffer_mut().set_title(title);
                }
            }
            EditAction::Content => {
                let current = session.edit_buffer().content.clone();
                if let Some(content) = text_input("content:", Some(&current))? {
                    session.edit_buffer_mut().set_content(content);
                }
            }
            EditAction::AddTodo => {
                if let Some(text) = text_input("todo:", None)? {
                    let buffer = session.edit_buffer_mut();
                    let id = buffer.add_todo();
                    buffer.set_todo_text(&id, text);
                }
            }
            EditAction::EditTodo => {
                if let Some(id) = pick_todo(session.edit_buffer())? {
                    let current = session
                        .edit_buffer()
                        .todos
                        .iter()
                        .find(|t| t.id == id)
                        .map(|t| t.text.clone())
                        .unwrap_or_default();
                    if let Some(text) = text_input("todo:", Some(&current))? {
                        session.edit_buffer_mut().set_todo_text(&id, text);
                    }
                }
            }
            EditAction::ToggleTodo => {
                if let Some(id) = pick_todo(session.edit_buffer())? {
                    session.edit_buffer_mut().toggle_todo(&id);
                }
            }
            EditAction::RemoveTodo => {
                if let Some(id) = pick_todo(session.edit_buffer())? {
                    session.edit_buffer_mut().remove_todo(&id);
                }
            }
            EditAction::Save => {
                session.save_selected()?;
                status("Saved.");
                return Ok(());
            }
            EditAction::Discard => return leave(session, &note),
        }
    }
}

/// Leave the editor, confirming when unsaved edits would be lost
fn leave(session: &mut AppSession, note: &Note) -> Result<()> {
    if session.edit_buffer().is_dirty(note) && confirm("Save changes?")? {
        session.save_selected()?;
        status("Saved.");
    } else {
        // Reset the buffer to the stored note
        session.select_note(Some(&note.id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Todo;

    fn args() -> EditArgs {
        EditArgs {
            note: "x".to_string(),
            title: None,
            content: None,
            add_todo: Vec::new(),
            toggle_todo: Vec::new(),
            remove_todo: Vec::new(),
        }
    }

    fn buffer_with_todos(texts: &[&str]) -> EditBuffer {
        EditBuffer {
            title: "t".to_string(),
            content: String::new(),
            todos: texts.iter().map(|t| Todo::with_text(*t)).collect(),
        }
    }

    #[test]
    fn test_positions_refer_to_original_list() {
        let mut buffer = buffer_with_todos(&["a", "b", "c"]);
        let mut edit = args();
        edit.remove_todo = vec![1];
        edit.toggle_todo = vec![3];
        edit.add_todo = vec!["d".to_string()];
        apply_edit_args(&mut buffer, &edit).unwrap();

        let texts: Vec<&str> = buffer.todos.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c", "d"]);
        assert!(buffer.todos[1].done);
        assert!(!buffer.todos[2].done);
    }

    #[test]
    fn test_invalid_position_changes_nothing() {
        let mut buffer = buffer_with_todos(&["a"]);
        let before = buffer.clone();
        let mut edit = args();
        edit.title = Some("new".to_string());
        edit.toggle_todo = vec![2];

        assert!(apply_edit_args(&mut buffer, &edit).is_err());
        assert_eq!(buffer, before);

        edit.toggle_todo = vec![0];
        assert!(apply_edit_args(&mut buffer, &edit).is_err());
    }

    #[test]
    fn test_title_and_content() {
        let mut buffer = buffer_with_todos(&[]);
        let mut edit = args();
        edit.title = Some("Plan".to_string());
        edit.content = Some("steps".to_string());
        apply_edit_args(&mut buffer, &edit).unwrap();
        assert_eq!(buffer.title, "Plan");
        assert_eq!(buffer.content, "steps");
    }
}
