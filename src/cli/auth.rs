//! Login, signup, guest access and logout

use anyhow::Result;

use super::ui::{error, password_input, status, warning};
use super::AppSession;
use crate::error::NotesError;

/// Print recoverable session errors; pass storage failures up
pub fn report(err: NotesError) -> Result<()> {
    match err {
        NotesError::Storage(e) => return Err(e),
        NotesError::Validation(msg) => error(&msg),
        NotesError::DeleteAborted => {}
        other => warning(&other.to_string()),
    }
    Ok(())
}

pub fn run_login(session: &mut AppSession, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => password_input("password:")?,
    };

    match session.login(email.trim(), &password) {
        Ok(()) => status(&format!("Logged in as {}.", email.trim())),
        Err(e) => report(e)?,
    }
    Ok(())
}

pub fn run_signup(
    session: &mut AppSession,
    email: &str,
    password: Option<String>,
    confirm: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => password_input("password:")?,
    };
    let confirm = match confirm {
        Some(c) => c,
        None => password_input("confirm password:")?,
    };

    match session.signup(email.trim(), &password, &confirm) {
        Ok(()) => status(&format!("Signed up as {}.", email.trim())),
        Err(e) => report(e)?,
    }
    Ok(())
}

pub fn run_guest(session: &mut AppSession) -> Result<()> {
    match session.continue_as_guest() {
        Ok(()) => status("Continuing as guest."),
        Err(e) => report(e)?,
    }
    Ok(())
}

pub fn run_logout(session: &mut AppSession) -> Result<()> {
    if !session.is_authenticated() {
        status("Not logged in.");
        return Ok(());
    }
    match session.logout() {
        Ok(()) => status("Logged out."),
        Err(e) => report(e)?,
    }
    Ok(())
}

pub fn run_whoami(session: &AppSession) -> Result<()> {
    match session.identity() {
        Some(identity) if identity.is_guest => status("guest"),
        Some(identity) => status(&identity.display_id),
        None => status("Not logged in."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::session::Session;

    #[test]
    fn test_report_recovers_domain_errors() {
        assert!(report(NotesError::validation("Please fill all fields.")).is_ok());
        assert!(report(NotesError::pin_limit()).is_ok());
        assert!(report(NotesError::DeleteAborted).is_ok());
        assert!(report(NotesError::Storage(anyhow::anyhow!("disk"))).is_err());
    }

    #[test]
    fn test_login_with_password_flag() {
        let mut session = Session::new(Database::open_memory().unwrap());
        run_login(&mut session, " ann@example.com ", Some("pw".to_string())).unwrap();
        assert_eq!(session.identity().unwrap().display_id, "ann@example.com");

        run_logout(&mut session).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_signup_mismatch_keeps_logged_out() {
        let mut session = Session::new(Database::open_memory().unwrap());
        run_signup(
            &mut session,
            "ann@example.com",
            Some("a".to_string()),
            Some("b".to_string()),
        )
        .unwrap();
        assert!(!session.is_authenticated());
    }
}
