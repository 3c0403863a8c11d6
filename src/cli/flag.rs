//! Pin and archive flags

use anyhow::Result;

use super::auth::report;
use super::ui::status;
use super::{resolve_note_id, AppSession};

/// Execute the pin/unpin commands
pub fn run_pin(session: &mut AppSession, identifier: &str, pinned: bool) -> Result<()> {
    let id = resolve_note_id(session, identifier)?;
    match session.set_pinned(&id, pinned) {
        Ok(true) => status(if pinned { "Pinned." } else { "Unpinned." }),
        Ok(false) => status(if pinned { "Already pinned." } else { "Not pinned." }),
        Err(e) => report(e)?,
    }
    Ok(())
}

/// Execute the archive/unarchive commands
pub fn run_archive(session: &mut AppSession, identifier: &str, archived: bool) -> Result<()> {
    let id = resolve_note_id(session, identifier)?;
    session.set_archived(&id, archived)?;
    status(if archived { "Archived." } else { "Restored." });
    Ok(())
}
