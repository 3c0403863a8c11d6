use anyhow::Result;

use super::auth::report;
use super::ui::{confirm, status};
use super::{resolve_note_id, AppSession};
use crate::models::Note;

/// Confirmation question shown before deleting `note`
pub fn delete_prompt(note: &Note) -> String {
    format!(
        "Are you sure you want to delete the note \"{}\"? This action cannot be undone.",
        note.display_title()
    )
}

/// Execute the delete command
pub fn run_delete(session: &mut AppSession, identifier: &str, force: bool) -> Result<()> {
    let id = resolve_note_id(session, identifier)?;
    delete_with_confirm(session, &id, force)
}

/// Delete a note, asking first unless `force` is set
pub fn delete_with_confirm(session: &mut AppSession, id: &str, force: bool) -> Result<()> {
    let result = session.delete_note(id, |note| {
        force || confirm(&delete_prompt(note)).unwrap_or(false)
    });

    match result {
        Ok(Some(_)) => status("Deleted."),
        Ok(None) => status("No such note."),
        Err(e) => report(e)?,
    }
    Ok(())
}
