use anyhow::Result;

use super::display::format_row;
use super::ui::term_size;
use super::{require_identity, AppSession};

/// Execute the list command
pub fn run_list(session: &mut AppSession, archived: bool) -> Result<()> {
    require_identity(session)?;
    session.set_show_archived(archived);

    let notes = session.notes();
    let view = notes.view();
    if view.is_empty() {
        if archived {
            println!("No archived notes.");
        } else {
            println!("No notes yet. Create one with 'notecmd new'.");
        }
        return Ok(());
    }

    let (width, _) = term_size();
    let selected = notes.selected_id();
    for note in &view {
        println!("{}", format_row(note, selected == Some(note.id.as_str()), width));
    }

    let pinned = notes.pinned_count();
    if !archived && pinned > 0 {
        println!();
        println!("{} pinned", pinned);
    }

    Ok(())
}
