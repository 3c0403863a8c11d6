use anyhow::Result;

use super::display::print_note;
use super::{require_identity, resolve_note, AppSession};

/// Execute the show command
pub fn run_show(session: &AppSession, identifier: &str) -> Result<()> {
    require_identity(session)?;
    let note = resolve_note(session.notes().notes(), identifier)?;
    print_note(note);
    Ok(())
}
