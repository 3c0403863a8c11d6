use anyhow::Result;

use super::ui::status;
use super::{require_identity, short_id, AppSession};

/// Execute the new command
pub fn run_add(session: &mut AppSession, title: Option<String>, content: Option<String>) -> Result<()> {
    require_identity(session)?;

    let id = session.create_note()?;

    if title.is_some() || content.is_some() {
        let buffer = session.edit_buffer_mut();
        if let Some(title) = title {
            buffer.set_title(title);
        }
        if let Some(content) = content {
            buffer.set_content(content);
        }
        session.save_selected()?;
    }

    status(&format!("Created {}.", short_id(&id)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::session::Session;

    #[test]
    fn test_add_requires_login() {
        let mut session = Session::new(Database::open_memory().unwrap());
        assert!(run_add(&mut session, None, None).is_err());
    }

    #[test]
    fn test_add_with_fields() {
        let mut session = Session::new(Database::open_memory().unwrap());
        session.continue_as_guest().unwrap();

        run_add(&mut session, Some("Ideas".to_string()), Some("rust cli".to_string())).unwrap();
        run_add(&mut session, None, None).unwrap();

        let notes = session.notes().notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "Untitled Note");
        assert_eq!(notes[1].title, "Ideas");
        assert_eq!(notes[1].content, "rust cli");
    }
}
