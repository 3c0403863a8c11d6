//! Interactive menu for notecmd
//!
//! Uses inquire for clean, reliable terminal interaction. The menu keeps one
//! session alive, so selection and the edit buffer behave as they do in the
//! library: changing the selection drops unsaved edits.

use anyhow::{anyhow, Result};
use std::io::{self, IsTerminal};

use super::auth::report;
use super::delete::delete_with_confirm;
use super::display::{print_note, row_head};
use super::ui::{self, clear_screen, password_input, select, status, text_input, truncate, wait_for_continue};
use super::update::edit_interactive;
use super::{run_summarize, AppSession};

/// Entries of the main list
#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuItem {
    Note(String),
    New,
    ToggleArchived,
    Theme,
    Logout,
    Quit,
}

/// Actions on one note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoteAction {
    Edit,
    Summarize,
    Pin,
    Archive,
    Delete,
    Back,
}

impl NoteAction {
    const ALL: &'static [NoteAction] = &[
        NoteAction::Edit,
        NoteAction::Summarize,
        NoteAction::Pin,
        NoteAction::Archive,
        NoteAction::Delete,
        NoteAction::Back,
    ];

    fn label(self, pinned: bool, archived: bool) -> &'static str {
        match self {
            NoteAction::Edit => "Edit",
            NoteAction::Summarize => "Summarize",
            NoteAction::Pin if pinned => "Unpin",
            NoteAction::Pin => "Pin",
            NoteAction::Archive if archived => "Unarchive",
            NoteAction::Archive => "Archive",
            NoteAction::Delete => "Delete",
            NoteAction::Back => "Back",
        }
    }
}

/// Run the interactive menu
pub fn run_menu(session: &mut AppSession) -> Result<()> {
    // TTY check: interactive menu requires a terminal
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "Interactive menu requires a terminal. Use subcommands for non-interactive use:\n  \
            notecmd list\n  \
            notecmd new --title <title>\n  \
            notecmd show <note>\n  \
            Run 'notecmd --help' for all options."
        ));
    }

    loop {
        if !session.is_authenticated() && !auth_menu(session)? {
            return Ok(());
        }

        let _ = clear_screen();
        match notes_menu(session) {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => {
                ui::error(&e.to_string());
                wait_for_continue();
            }
        }
    }
}

/// Login screen. Returns false when the user quits.
fn auth_menu(session: &mut AppSession) -> Result<bool> {
    const OPTIONS: &[&str] = &["Login", "Sign up", "Continue as guest", "Quit"];

    while !session.is_authenticated() {
        let _ = clear_screen();
        println!("notecmd");
        println!();

        let Some(choice) = select("", OPTIONS)? else {
            return Ok(false);
        };

        let result = match choice {
            0 => {
                let email = text_input("email:", None)?.unwrap_or_default();
                let password = password_input("password:")?;
                session.login(email.trim(), &password)
            }
            1 => {
                let email = text_input("email:", None)?.unwrap_or_default();
                let password = password_input("password:")?;
                let confirm = password_input("confirm password:")?;
                session.signup(email.trim(), &password, &confirm)
            }
            2 => session.continue_as_guest(),
            _ => return Ok(false),
        };

        if let Err(e) = result {
            report(e)?;
            wait_for_continue();
        }
    }
    Ok(true)
}

/// One pass of the notes list. Returns true when the user quits.
fn notes_menu(session: &mut AppSession) -> Result<bool> {
    let show_archived = session.notes().show_archived();
    let who = match session.identity() {
        Some(identity) if identity.is_guest => "guest".to_string(),
        Some(identity) => identity.display_id.clone(),
        None => return Ok(false),
    };
    println!(
        "notecmd  {}{}",
        who,
        if show_archived { "  (archived)" } else { "" }
    );
    println!();

    let (width, _) = ui::term_size();
    let selected = session.notes().selected_id().map(str::to_string);
    let mut items = Vec::new();
    let mut labels = Vec::new();

    for note in session.notes().view() {
        let label = row_head(note, selected.as_deref() == Some(note.id.as_str()));
        labels.push(truncate(&label, width.saturating_sub(4)));
        items.push(MenuItem::Note(note.id.clone()));
    }
    if labels.is_empty() {
        println!("{}", if show_archived { "No archived notes." } else { "No notes yet." });
        println!();
    }

    let footer = [
        (MenuItem::New, "+ New note"),
        (
            MenuItem::ToggleArchived,
            if show_archived { "Show active" } else { "Show archived" },
        ),
        (MenuItem::Theme, if ui::dark_mode() { "Light theme" } else { "Dark theme" }),
        (MenuItem::Logout, "Logout"),
        (MenuItem::Quit, "Quit"),
    ];
    for (item, label) in footer {
        items.push(item);
        labels.push(label.to_string());
    }

    let Some(index) = select("notes", &labels)? else {
        return Ok(true);
    };

    match items[index].clone() {
        MenuItem::Note(id) => {
            session.select_note(Some(&id));
            note_menu(session, &id)?;
        }
        MenuItem::New => {
            session.create_note()?;
            edit_interactive(session)?;
        }
        MenuItem::ToggleArchived => session.set_show_archived(!show_archived),
        MenuItem::Theme => {
            let dark = session.toggle_dark_mode()?;
            ui::set_dark_mode(dark);
        }
        MenuItem::Logout => {
            if let Err(e) = session.logout() {
                report(e)?;
            }
        }
        MenuItem::Quit => return Ok(true),
    }
    Ok(false)
}

/// Show a note and act on it until the user goes back
fn note_menu(session: &mut AppSession, id: &str) -> Result<()> {
    loop {
        let Some(note) = session.notes().get(id).cloned() else {
            return Ok(());
        };

        let _ = clear_screen();
        print_note(&note);
        println!();

        let labels: Vec<&str> = NoteAction::ALL
            .iter()
            .map(|a| a.label(note.pinned, note.archived))
            .collect();
        let Some(index) = select("", &labels)? else {
            return Ok(());
        };

        match NoteAction::ALL[index] {
            NoteAction::Edit => edit_interactive(session)?,
            NoteAction::Summarize => {
                run_summarize(session, id)?;
                wait_for_continue();
            }
            NoteAction::Pin => {
                if let Err(e) = session.toggle_pin(id) {
                    report(e)?;
                    wait_for_continue();
                }
            }
            NoteAction::Archive => {
                session.set_archived(id, !note.archived)?;
                if !note.archived {
                    status("Archived.");
                    return Ok(());
                }
            }
            NoteAction::Delete => {
                delete_with_confirm(session, id, false)?;
                if session.notes().get(id).is_none() {
                    return Ok(());
                }
            }
            NoteAction::Back => return Ok(()),
        }
    }
}
