//! The user session: active identity, its note collection, and persistence.
//!
//! Every committed mutation of the collection is followed by an explicit
//! save of the whole collection under the identity's key. The session never
//! writes one identity's notes under another identity's key.

use crate::db::KeyValueStore;
use crate::error::{NotesError, NotesResult};
use crate::models::{Identity, Note};
use crate::notes::{EditBuffer, NoteCollection, SummaryTicket};
use crate::summarize::{Summarizer, SummaryError};
use anyhow::Result;

/// Storage key of the authenticated identity
pub const KEY_AUTH: &str = "auth";

/// Storage key of the dark mode preference
pub const KEY_DARK_MODE: &str = "darkMode";

pub struct Session<S: KeyValueStore> {
    store: S,
    identity: Option<Identity>,
    notes: NoteCollection,
}

impl<S: KeyValueStore> Session<S> {
    /// Logged-out session over `store`
    pub fn new(store: S) -> Self {
        Self {
            store,
            identity: None,
            notes: NoteCollection::new(),
        }
    }

    /// Session for the identity saved in `store`, if any
    pub fn restore(store: S) -> Result<Self> {
        let mut session = Self::new(store);
        match session.store.get_json::<Identity>(KEY_AUTH) {
            Ok(Some(identity)) => session.switch_identity(Some(identity))?,
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable auth record"),
        }
        Ok(session)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    pub fn login(&mut self, email: &str, password: &str) -> NotesResult<()> {
        if email.is_empty() || password.is_empty() {
            return Err(NotesError::validation("Please enter email and password."));
        }
        self.establish(Identity::user(email))
    }

    pub fn signup(&mut self, email: &str, password: &str, confirm: &str) -> NotesResult<()> {
        if email.is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(NotesError::validation("Please fill all fields."));
        }
        if password != confirm {
            return Err(NotesError::validation("Passwords do not match."));
        }
        self.establish(Identity::user(email))
    }

    pub fn continue_as_guest(&mut self) -> NotesResult<()> {
        self.establish(Identity::guest())
    }

    /// Forget the identity and its in-memory notes. Stored notes stay.
    pub fn logout(&mut self) -> NotesResult<()> {
        self.store.remove(KEY_AUTH)?;
        if let Some(identity) = &self.identity {
            tracing::info!(user = %identity.display_id, "logged out");
        }
        self.switch_identity(None)?;
        Ok(())
    }

    /// Load the identity's notes, then record it as signed in. A failed load
    /// leaves both the stored and the in-memory identity untouched.
    fn establish(&mut self, identity: Identity) -> NotesResult<()> {
        let notes = NoteCollection::from_notes(self.load_notes(&identity)?);
        self.store.set_json(KEY_AUTH, &identity)?;
        tracing::info!(user = %identity.display_id, guest = identity.is_guest, "identity established");
        self.notes = notes;
        self.identity = Some(identity);
        Ok(())
    }

    fn switch_identity(&mut self, identity: Option<Identity>) -> Result<()> {
        self.notes = match &identity {
            Some(identity) => NoteCollection::from_notes(self.load_notes(identity)?),
            None => NoteCollection::new(),
        };
        self.identity = identity;
        Ok(())
    }

    /// Stored notes for `identity`. A collection that cannot be parsed is
    /// copied aside and treated as empty.
    fn load_notes(&self, identity: &Identity) -> Result<Vec<Note>> {
        let key = identity.notes_key();
        let Some(raw) = self.store.get(&key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => {
                tracing::debug!(key = %key, count = notes.len(), "loaded notes");
                Ok(notes)
            }
            Err(e) => {
                let backup = format!("{}_corrupt", key);
                tracing::warn!(key = %key, backup = %backup, error = %e, "unreadable notes, starting empty");
                self.store.set(&backup, &raw)?;
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self) -> NotesResult<()> {
        if let Some(identity) = &self.identity {
            self.store.set_json(&identity.notes_key(), self.notes.notes())?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    pub fn dark_mode(&self) -> Result<bool> {
        Ok(self.store.get(KEY_DARK_MODE)?.as_deref() == Some("true"))
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.store
            .set(KEY_DARK_MODE, if enabled { "true" } else { "false" })
    }

    pub fn toggle_dark_mode(&self) -> Result<bool> {
        let enabled = !self.dark_mode()?;
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    pub fn select_note(&mut self, id: Option<&str>) {
        self.notes.select(id);
    }

    pub fn set_show_archived(&mut self, show: bool) {
        self.notes.set_show_archived(show);
    }

    pub fn edit_buffer(&self) -> &EditBuffer {
        self.notes.buffer()
    }

    pub fn edit_buffer_mut(&mut self) -> &mut EditBuffer {
        self.notes.buffer_mut()
    }

    /// Create and select a new note. Returns its id.
    pub fn create_note(&mut self) -> NotesResult<String> {
        let id = self.notes.create();
        self.persist()?;
        tracing::debug!(note = %id, "note created");
        Ok(id)
    }

    pub fn update_from_buffer(&mut self, id: &str, buffer: &EditBuffer) -> NotesResult<bool> {
        let changed = self.notes.update_from_buffer(id, buffer);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    /// Commit the edit buffer to the selected note
    pub fn save_selected(&mut self) -> NotesResult<bool> {
        let saved = self.notes.save_selected();
        if saved {
            self.persist()?;
        }
        Ok(saved)
    }

    pub fn delete_note<F>(&mut self, id: &str, confirm: F) -> NotesResult<Option<Note>>
    where
        F: FnOnce(&Note) -> bool,
    {
        let removed = self.notes.delete(id, confirm)?;
        if removed.is_some() {
            self.persist()?;
            tracing::debug!(note = %id, "note deleted");
        }
        Ok(removed)
    }

    pub fn set_pinned(&mut self, id: &str, pinned: bool) -> NotesResult<bool> {
        let changed = self.notes.set_pinned(id, pinned)?;
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    pub fn toggle_pin(&mut self, id: &str) -> NotesResult<bool> {
        let changed = self.notes.toggle_pin(id)?;
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    pub fn set_archived(&mut self, id: &str, archived: bool) -> NotesResult<bool> {
        let changed = self.notes.set_archived(id, archived);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    // ------------------------------------------------------------------
    // Summaries
    // ------------------------------------------------------------------

    pub fn begin_summary(&mut self, id: &str, text: &str) -> Option<SummaryTicket> {
        self.notes.begin_summary(id, text)
    }

    /// Apply a finished summary. Stale tickets are ignored.
    pub fn finish_summary(
        &mut self,
        ticket: &SummaryTicket,
        outcome: Result<String, SummaryError>,
    ) -> NotesResult<bool> {
        let applied = self.notes.finish_summary(ticket, outcome);
        if applied {
            self.persist()?;
        } else {
            tracing::debug!(note = %ticket.note_id, "discarded stale summary");
        }
        Ok(applied)
    }

    /// Summarize `text` into the note's summary field. Returns false when
    /// there was nothing to do (blank text, unknown note) or the result was
    /// superseded.
    pub async fn request_summary(
        &mut self,
        id: &str,
        text: &str,
        summarizer: &dyn Summarizer,
    ) -> NotesResult<bool> {
        let Some(ticket) = self.begin_summary(id, text) else {
            return Ok(false);
        };
        let outcome = summarizer.summarize(&ticket.text).await;
        self.finish_summary(&ticket, outcome)
    }
}
