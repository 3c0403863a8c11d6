use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::db::Database;
use crate::models::Note;
use crate::session::Session;

pub mod add;
pub mod auth;
pub mod delete;
pub mod display;
pub mod flag;
pub mod list;
pub mod menu;
pub mod setup;
pub mod show;
pub mod summarize;
pub mod ui;
pub mod update;

pub use add::run_add;
pub use auth::{run_guest, run_login, run_logout, run_signup, run_whoami};
pub use delete::run_delete;
pub use flag::{run_archive, run_pin};
pub use list::run_list;
pub use menu::run_menu;
pub use setup::{run_ai_config, run_theme};
pub use show::run_show;
pub use summarize::run_summarize;
pub use update::run_edit;

/// Session backed by the on-disk database
pub type AppSession = Session<Database>;

#[derive(Parser)]
#[command(name = "notecmd")]
#[command(about = "Personal notes for the command line")]
#[command(version)]
pub struct Cli {
    /// Database file (defaults to $NOTECMD_DB or the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in (any non-empty email and password are accepted)
    Login(LoginArgs),
    /// Create an account and log in
    Signup(SignupArgs),
    /// Continue as guest
    Guest,
    /// Log out, keeping stored notes
    Logout,
    /// Show the current user
    Whoami,
    /// Create a new note
    New(NewArgs),
    /// List notes, pinned first then newest first
    List(ListArgs),
    /// Show a note in full
    Show(NoteArg),
    /// Edit a note's title, content and todos
    Edit(EditArgs),
    /// Delete a note
    Delete(DeleteArgs),
    /// Pin a note (at most 3)
    Pin(NoteArg),
    /// Unpin a note
    Unpin(NoteArg),
    /// Archive a note
    Archive(NoteArg),
    /// Restore an archived note
    Unarchive(NoteArg),
    /// Summarize a note with the configured AI provider
    Summarize(NoteArg),
    /// Show or change the color theme
    Theme(ThemeArgs),
    /// Configure the summary provider
    Ai(AiArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    pub email: String,
    /// Prompted for when omitted
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct SignupArgs {
    pub email: String,
    #[arg(short, long)]
    pub password: Option<String>,
    #[arg(short, long)]
    pub confirm: Option<String>,
}

#[derive(Args)]
pub struct NewArgs {
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub content: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Show archived notes instead of active ones
    #[arg(short, long)]
    pub archived: bool,
}

#[derive(Args)]
pub struct NoteArg {
    /// Note id, id prefix, or title
    pub note: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Note id, id prefix, or title
    pub note: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub content: Option<String>,
    /// Add a todo with this text (repeatable)
    #[arg(short, long, value_name = "TEXT")]
    pub add_todo: Vec<String>,
    /// Toggle the todo at this 1-based position (repeatable)
    #[arg(long, value_name = "N")]
    pub toggle_todo: Vec<usize>,
    /// Remove the todo at this 1-based position (repeatable)
    #[arg(long, value_name = "N")]
    pub remove_todo: Vec<usize>,
}

impl EditArgs {
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.content.is_some()
            || !self.add_todo.is_empty()
            || !self.toggle_todo.is_empty()
            || !self.remove_todo.is_empty()
    }
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Note id, id prefix, or title
    pub note: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// "dark", "light" or "toggle"; omit to show the current theme
    pub mode: Option<String>,
}

#[derive(Args)]
pub struct AiArgs {
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub api_url: Option<String>,
    #[arg(long)]
    pub endpoint: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    /// Remove all stored provider settings
    #[arg(long)]
    pub clear: bool,
}

/// Fail unless someone is logged in
pub fn require_identity(session: &AppSession) -> Result<()> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(anyhow!(
            "Not logged in. Run 'notecmd login <email>' or 'notecmd guest'."
        ))
    }
}

/// Find a note by exact id, unique id prefix, or unique title
pub fn resolve_note<'a>(notes: &'a [Note], identifier: &str) -> Result<&'a Note> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(anyhow!("Identifier cannot be empty."));
    }

    if let Some(note) = notes.iter().find(|n| n.id == identifier) {
        return Ok(note);
    }

    let by_prefix: Vec<&Note> = notes
        .iter()
        .filter(|n| n.id.starts_with(identifier))
        .collect();
    if by_prefix.len() == 1 {
        return Ok(by_prefix[0]);
    }

    let wanted = identifier.to_lowercase();
    let by_title: Vec<&Note> = notes
        .iter()
        .filter(|n| n.title.to_lowercase() == wanted)
        .collect();

    match (by_prefix.len(), by_title.len()) {
        (_, 1) => Ok(by_title[0]),
        (0, 0) => Err(anyhow!("No note matches '{}'.", identifier)),
        _ => Err(anyhow!(
            "'{}' matches more than one note. Use a longer id.",
            identifier
        )),
    }
}

/// Resolve a note and return its id
pub fn resolve_note_id(session: &AppSession, identifier: &str) -> Result<String> {
    require_identity(session)?;
    Ok(resolve_note(session.notes().notes(), identifier)?.id.clone())
}

/// Short form of an id for display
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
