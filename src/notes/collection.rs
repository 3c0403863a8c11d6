//! In-memory note collection for the active identity.
//!
//! Owns the notes, the selection, the edit buffer that mirrors the selection,
//! and the bookkeeping for in-flight summaries. It never touches storage;
//! the session persists after every committed mutation.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use super::buffer::EditBuffer;
use super::view::sorted_view;
use crate::error::{NotesError, NotesResult, MAX_PINNED};
use crate::models::{generate_id, Note};
use crate::summarize::{summary_text, SummaryError};

/// Ticket numbers are process-wide so a collection rebuilt for the same
/// identity never reissues a number an older ticket still holds.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Handle for one summary request. Only the newest ticket per note may
/// write its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTicket {
    pub note_id: String,
    pub text: String,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct NoteCollection {
    notes: Vec<Note>,
    selected: Option<String>,
    buffer: EditBuffer,
    show_archived: bool,
    in_flight: HashMap<String, u64>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored notes, giving fresh ids to notes whose id is
    /// missing or repeated.
    pub fn from_notes(mut notes: Vec<Note>) -> Self {
        let mut seen = HashSet::new();
        for note in &mut notes {
            if note.id.is_empty() || !seen.insert(note.id.clone()) {
                note.id = generate_id();
                seen.insert(note.id.clone());
            }
        }
        Self {
            notes,
            ..Self::default()
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    pub fn pinned_count(&self) -> usize {
        self.notes.iter().filter(|n| n.pinned).count()
    }

    pub fn show_archived(&self) -> bool {
        self.show_archived
    }

    pub fn set_show_archived(&mut self, show: bool) {
        self.show_archived = show;
    }

    /// Sorted, filtered view shown to the user
    pub fn view(&self) -> Vec<&Note> {
        sorted_view(&self.notes, self.show_archived)
    }

    // ------------------------------------------------------------------
    // Selection and edit buffer
    // ------------------------------------------------------------------

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Note> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Change the selection. Unknown ids select nothing. The edit buffer is
    /// reset to the new selection, dropping unsaved edits.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.filter(|id| self.get(id).is_some()).map(str::to_string);
        self.buffer = match self.selected() {
            Some(note) => EditBuffer::from_note(note),
            None => EditBuffer::default(),
        };
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut EditBuffer {
        &mut self.buffer
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Prepend a new note and select it. Returns its id.
    pub fn create(&mut self) -> String {
        let note = Note::new();
        let id = note.id.clone();
        self.notes.insert(0, note);
        self.select(Some(&id));
        id
    }

    /// Copy title, content and todos from `buffer` into the note.
    /// Returns false when the note does not exist.
    pub fn update_from_buffer(&mut self, id: &str, buffer: &EditBuffer) -> bool {
        match self.get_mut(id) {
            Some(note) => {
                buffer.apply_to(note);
                true
            }
            None => false,
        }
    }

    /// Commit the edit buffer to the selected note
    pub fn save_selected(&mut self) -> bool {
        let Some(id) = self.selected.clone() else {
            return false;
        };
        let buffer = self.buffer.clone();
        self.update_from_buffer(&id, &buffer)
    }

    /// Delete a note after `confirm` approves it.
    ///
    /// Returns the removed note, or None when the id is unknown. When the
    /// selected note is removed, the first note of the current view becomes
    /// selected.
    pub fn delete<F>(&mut self, id: &str, confirm: F) -> NotesResult<Option<Note>>
    where
        F: FnOnce(&Note) -> bool,
    {
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            return Ok(None);
        };
        if !confirm(&self.notes[index]) {
            return Err(NotesError::DeleteAborted);
        }

        let removed = self.notes.remove(index);
        self.in_flight.remove(&removed.id);
        if self.selected.as_deref() == Some(id) {
            let next = self.view().first().map(|n| n.id.clone());
            self.select(next.as_deref());
        }
        Ok(Some(removed))
    }

    /// Set the pinned flag. Returns whether anything changed.
    ///
    /// Pinning fails with `PinLimitExceeded` when `MAX_PINNED` other notes
    /// are already pinned.
    pub fn set_pinned(&mut self, id: &str, pinned: bool) -> NotesResult<bool> {
        let Some(note) = self.get(id) else {
            return Ok(false);
        };
        if note.pinned == pinned {
            return Ok(false);
        }
        if pinned && self.pinned_count() >= MAX_PINNED {
            return Err(NotesError::pin_limit());
        }
        if let Some(note) = self.get_mut(id) {
            note.pinned = pinned;
        }
        Ok(true)
    }

    pub fn toggle_pin(&mut self, id: &str) -> NotesResult<bool> {
        match self.get(id).map(|n| n.pinned) {
            Some(pinned) => self.set_pinned(id, !pinned),
            None => Ok(false),
        }
    }

    /// Set the archived flag. Archiving the selected note moves the
    /// selection to the first remaining active note.
    pub fn set_archived(&mut self, id: &str, archived: bool) -> bool {
        let Some(note) = self.get_mut(id) else {
            return false;
        };
        note.archived = archived;

        if archived && self.selected.as_deref() == Some(id) {
            let next = sorted_view(&self.notes, false)
                .first()
                .map(|n| n.id.clone());
            self.select(next.as_deref());
        }
        true
    }

    // ------------------------------------------------------------------
    // Summaries
    // ------------------------------------------------------------------

    /// Start a summary request for `id`. Returns None when the note does
    /// not exist or the text is blank. Any earlier request for the same note
    /// is superseded.
    pub fn begin_summary(&mut self, id: &str, text: &str) -> Option<SummaryTicket> {
        if text.trim().is_empty() || self.get(id).is_none() {
            return None;
        }
        let seq = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        self.in_flight.insert(id.to_string(), seq);
        Some(SummaryTicket {
            note_id: id.to_string(),
            text: text.to_string(),
            seq,
        })
    }

    /// Store the outcome of a summary request. Failures become placeholder
    /// text. Returns false, changing nothing, when the ticket was superseded
    /// or its note is gone.
    pub fn finish_summary(
        &mut self,
        ticket: &SummaryTicket,
        outcome: Result<String, SummaryError>,
    ) -> bool {
        if self.in_flight.get(&ticket.note_id) != Some(&ticket.seq) {
            return false;
        }
        self.in_flight.remove(&ticket.note_id);

        match self.get_mut(&ticket.note_id) {
            Some(note) => {
                note.summary = summary_text(outcome);
                true
            }
            None => false,
        }
    }

    /// Whether a summary request for this note is outstanding
    pub fn is_summarizing(&self, id: &str) -> bool {
        self.in_flight.contains_key(id)
    }

    /// Whether any summary request is outstanding
    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::RATE_LIMITED_TEXT;
    use chrono::{Duration, Utc};

    /// Collection of notes created oldest first, so the view lists them
    /// newest first.
    fn collection_with(titles: &[&str]) -> (NoteCollection, Vec<String>) {
        let base = Utc::now() - Duration::hours(1);
        let notes: Vec<Note> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let mut note = Note::new();
                note.title = title.to_string();
                note.date = base + Duration::minutes(i as i64);
                note
            })
            .collect();
        let ids = notes.iter().map(|n| n.id.clone()).collect();
        (NoteCollection::from_notes(notes), ids)
    }

    fn view_titles(c: &NoteCollection) -> Vec<String> {
        c.view().iter().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn test_create_prepends_and_selects() {
        let mut c = NoteCollection::new();
        let first = c.create();
        let second = c.create();

        assert_eq!(c.notes()[0].id, second);
        assert_eq!(c.notes()[1].id, first);
        assert_eq!(c.selected_id(), Some(second.as_str()));
        assert_eq!(c.buffer().title, "Untitled Note");
    }

    #[test]
    fn test_from_notes_repairs_ids() {
        let mut a = Note::new();
        a.id = String::new();
        let b = Note::new();
        let mut dup = Note::new();
        dup.id = b.id.clone();

        let c = NoteCollection::from_notes(vec![a, b.clone(), dup]);
        let ids: HashSet<_> = c.notes().iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert!(!c.notes()[0].id.is_empty());
        assert_eq!(c.notes()[1].id, b.id);
    }

    #[test]
    fn test_select_resets_buffer() {
        let (mut c, ids) = collection_with(&["a", "b"]);
        c.select(Some(&ids[0]));
        c.buffer_mut().set_content("draft");

        c.select(Some(&ids[1]));
        assert_eq!(c.buffer().title, "b");
        assert!(c.buffer().content.is_empty());

        c.select(Some("missing"));
        assert_eq!(c.selected_id(), None);
        assert_eq!(c.buffer(), &EditBuffer::default());
    }

    #[test]
    fn test_save_selected_only_touches_editable_fields() {
        let (mut c, ids) = collection_with(&["a"]);
        c.set_pinned(&ids[0], true).unwrap();
        let before = c.get(&ids[0]).unwrap().clone();

        c.select(Some(&ids[0]));
        c.buffer_mut().set_title("renamed");
        c.buffer_mut().set_content("body");
        let todo = c.buffer_mut().add_todo();
        c.buffer_mut().set_todo_text(&todo, "step one");
        assert!(c.save_selected());

        let after = c.get(&ids[0]).unwrap();
        assert_eq!(after.title, "renamed");
        assert_eq!(after.content, "body");
        assert_eq!(after.todos.len(), 1);
        assert_eq!(after.id, before.id);
        assert_eq!(after.date, before.date);
        assert_eq!(after.pinned, before.pinned);
        assert_eq!(after.archived, before.archived);
        assert_eq!(after.summary, before.summary);
    }

    #[test]
    fn test_update_unknown_note_is_noop() {
        let (mut c, _) = collection_with(&["a"]);
        let before = c.notes().to_vec();
        assert!(!c.update_from_buffer("missing", &EditBuffer::default()));
        assert_eq!(c.notes(), before.as_slice());
    }

    #[test]
    fn test_unsaved_edits_are_discarded() {
        let (mut c, ids) = collection_with(&["a", "b"]);
        c.select(Some(&ids[0]));
        c.buffer_mut().set_title("never saved");
        c.select(Some(&ids[1]));
        assert_eq!(c.get(&ids[0]).unwrap().title, "a");
    }

    #[test]
    fn test_delete_declined() {
        let (mut c, ids) = collection_with(&["a"]);
        let result = c.delete(&ids[0], |_| false);
        assert!(matches!(result, Err(NotesError::DeleteAborted)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_delete_selected_selects_first_of_view() {
        let (mut c, ids) = collection_with(&["old", "mid", "new"]);
        c.select(Some(&ids[2]));

        let removed = c.delete(&ids[2], |_| true).unwrap().unwrap();
        assert_eq!(removed.title, "new");
        assert_eq!(c.selected().unwrap().title, "mid");
        assert_eq!(c.buffer().title, "mid");
    }

    #[test]
    fn test_delete_last_note_clears_selection() {
        let (mut c, ids) = collection_with(&["only"]);
        c.select(Some(&ids[0]));
        c.delete(&ids[0], |_| true).unwrap();
        assert!(c.is_empty());
        assert_eq!(c.selected_id(), None);
    }

    #[test]
    fn test_delete_unselected_keeps_selection() {
        let (mut c, ids) = collection_with(&["a", "b"]);
        c.select(Some(&ids[0]));
        c.delete(&ids[1], |_| true).unwrap();
        assert_eq!(c.selected_id(), Some(ids[0].as_str()));
    }

    #[test]
    fn test_delete_unknown_note() {
        let (mut c, _) = collection_with(&["a"]);
        assert!(c.delete("missing", |_| true).unwrap().is_none());
    }

    #[test]
    fn test_pin_limit() {
        let (mut c, ids) = collection_with(&["a", "b", "c", "d"]);
        for id in &ids[..3] {
            assert!(c.set_pinned(id, true).unwrap());
        }

        let err = c.set_pinned(&ids[3], true).unwrap_err();
        assert!(matches!(err, NotesError::PinLimitExceeded { max: 3 }));
        assert!(!c.get(&ids[3]).unwrap().pinned);
        assert_eq!(c.pinned_count(), 3);

        // Re-pinning an already pinned note is not a violation
        assert!(!c.set_pinned(&ids[0], true).unwrap());

        // Freeing a slot allows pinning again
        assert!(c.toggle_pin(&ids[0]).unwrap());
        assert!(c.toggle_pin(&ids[3]).unwrap());
        assert_eq!(c.pinned_count(), 3);
    }

    #[test]
    fn test_pinned_notes_listed_first() {
        let (mut c, ids) = collection_with(&["old", "new"]);
        c.set_pinned(&ids[0], true).unwrap();
        assert_eq!(view_titles(&c), vec!["old", "new"]);
    }

    #[test]
    fn test_archive_selected_reselects_visible() {
        let (mut c, ids) = collection_with(&["old", "mid", "new"]);
        c.select(Some(&ids[2]));

        assert!(c.set_archived(&ids[2], true));
        assert_eq!(c.selected().unwrap().title, "mid");
        assert_eq!(view_titles(&c), vec!["mid", "old"]);

        c.set_show_archived(true);
        assert_eq!(view_titles(&c), vec!["new"]);
    }

    #[test]
    fn test_archive_last_visible_clears_selection() {
        let (mut c, ids) = collection_with(&["only"]);
        c.select(Some(&ids[0]));
        c.set_archived(&ids[0], true);
        assert_eq!(c.selected_id(), None);
    }

    #[test]
    fn test_unarchive_keeps_selection() {
        let (mut c, ids) = collection_with(&["a"]);
        c.set_archived(&ids[0], true);
        c.set_show_archived(true);
        c.select(Some(&ids[0]));
        c.set_archived(&ids[0], false);
        assert_eq!(c.selected_id(), Some(ids[0].as_str()));
    }

    #[test]
    fn test_summary_blank_text_is_noop() {
        let (mut c, ids) = collection_with(&["a"]);
        assert!(c.begin_summary(&ids[0], "   \n").is_none());
        assert!(c.begin_summary("missing", "text").is_none());
        assert!(!c.is_busy());
    }

    #[test]
    fn test_summary_success_and_failure() {
        let (mut c, ids) = collection_with(&["a"]);

        let ticket = c.begin_summary(&ids[0], "long text").unwrap();
        assert!(c.is_summarizing(&ids[0]));
        assert!(c.finish_summary(&ticket, Ok("short".to_string())));
        assert_eq!(c.get(&ids[0]).unwrap().summary, "short");
        assert!(!c.is_busy());

        let ticket = c.begin_summary(&ids[0], "long text").unwrap();
        assert!(c.finish_summary(&ticket, Err(SummaryError::RateLimited)));
        assert_eq!(c.get(&ids[0]).unwrap().summary, RATE_LIMITED_TEXT);
        assert!(!c.is_summarizing(&ids[0]));
    }

    #[test]
    fn test_stale_summary_discarded() {
        let (mut c, ids) = collection_with(&["a"]);
        let stale = c.begin_summary(&ids[0], "first draft").unwrap();
        let fresh = c.begin_summary(&ids[0], "second draft").unwrap();

        assert!(c.finish_summary(&fresh, Ok("fresh".to_string())));
        assert!(!c.finish_summary(&stale, Ok("stale".to_string())));
        assert_eq!(c.get(&ids[0]).unwrap().summary, "fresh");
    }

    #[test]
    fn test_stale_summary_before_fresh_keeps_busy() {
        let (mut c, ids) = collection_with(&["a"]);
        let stale = c.begin_summary(&ids[0], "first").unwrap();
        let fresh = c.begin_summary(&ids[0], "second").unwrap();

        assert!(!c.finish_summary(&stale, Ok("stale".to_string())));
        assert!(c.is_summarizing(&ids[0]));
        assert!(c.get(&ids[0]).unwrap().summary.is_empty());

        assert!(c.finish_summary(&fresh, Ok("fresh".to_string())));
        assert!(!c.is_busy());
    }

    #[test]
    fn test_summary_for_deleted_note_discarded() {
        let (mut c, ids) = collection_with(&["a", "b"]);
        let ticket = c.begin_summary(&ids[0], "text").unwrap();
        c.delete(&ids[0], |_| true).unwrap();

        assert!(!c.finish_summary(&ticket, Ok("late".to_string())));
        assert!(!c.is_busy());
    }
}
