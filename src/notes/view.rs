use std::cmp::Ordering;

use crate::models::Note;

/// Display order: pinned first, then newest first. Equal keys keep their
/// relative order because the sort is stable.
pub fn display_order(a: &Note, b: &Note) -> Ordering {
    b.pinned.cmp(&a.pinned).then_with(|| b.date.cmp(&a.date))
}

/// Sorted notes of one partition (archived or active)
pub fn sorted_view(notes: &[Note], show_archived: bool) -> Vec<&Note> {
    let mut view: Vec<&Note> = notes
        .iter()
        .filter(|n| n.archived == show_archived)
        .collect();
    view.sort_by(|a, b| display_order(a, b));
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn note(title: &str, minutes: i64) -> Note {
        let mut n = Note::new();
        n.title = title.to_string();
        n.date = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes);
        n
    }

    fn titles(view: &[&Note]) -> Vec<String> {
        view.iter().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn test_newest_first() {
        let notes = vec![note("old", 0), note("new", 10), note("mid", 5)];
        assert_eq!(titles(&sorted_view(&notes, false)), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_pinned_before_unpinned() {
        let mut old_pinned = note("old pinned", 0);
        old_pinned.pinned = true;
        let notes = vec![note("newest", 30), old_pinned, note("middle", 15)];
        assert_eq!(
            titles(&sorted_view(&notes, false)),
            vec!["old pinned", "newest", "middle"]
        );
    }

    #[test]
    fn test_equal_dates_keep_insertion_order() {
        let notes = vec![note("first", 0), note("second", 0), note("third", 0)];
        assert_eq!(
            titles(&sorted_view(&notes, false)),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_archive_partition() {
        let mut archived = note("archived", 5);
        archived.archived = true;
        let notes = vec![note("active", 0), archived];

        assert_eq!(titles(&sorted_view(&notes, false)), vec!["active"]);
        assert_eq!(titles(&sorted_view(&notes, true)), vec!["archived"]);
    }
}
