//! Projection of selected entries onto discrete, month-partitioned events.
//!
//! Everything here is a pure function of the selection and the normalized
//! entry list; recomputing with the same inputs yields the same output.

use std::collections::BTreeSet;

use crate::dates::{MonthKey, exclusive_end, month_bounds, months_touched};
use crate::selection::Selection;
use crate::types::{CalendarEvent, Entry};

/// Events of one calendar month: every selected event overlapping the
/// month's half-open `[start, next month)` window.
#[derive(Debug, Clone)]
pub struct MonthBucket {
    /// The month this bucket renders
    pub month: MonthKey,
    /// Overlapping events, in projection order
    pub events: Vec<CalendarEvent>,
}

/// Selected entries in payload order.
pub fn selected_entries<'a>(selection: &Selection, entries: &'a [Entry]) -> Vec<&'a Entry> {
    entries
        .iter()
        .filter(|entry| selection.contains(&entry.id))
        .collect()
}

/// Expand every span of every selected entry into one event.
///
/// Event ids are `<entry.id>-<spanIndex>`; the end date is exclusive.
pub fn project_events(selection: &Selection, entries: &[Entry]) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    for entry in selected_entries(selection, entries) {
        for (span_index, span) in entry.tarih.spans.iter().enumerate() {
            events.push(CalendarEvent {
                id: format!("{}-{}", entry.id, span_index),
                title: entry.title().to_string(),
                start: span.start,
                end: exclusive_end(span.end),
                color: entry.color,
                raw_range: entry.tarih.raw.clone(),
                akademik_donem: entry.akademik_donem.clone(),
                kategori: entry.kategori.clone(),
            });
        }
    }
    events
}

/// Months touched by any span of any selected entry, deduplicated and in
/// chronological order.
pub fn selected_months(selection: &Selection, entries: &[Entry]) -> Vec<MonthKey> {
    let mut months = BTreeSet::new();
    for entry in selected_entries(selection, entries) {
        for span in &entry.tarih.spans {
            months.extend(months_touched(span));
        }
    }
    months.into_iter().collect()
}

/// Partition the selection's events into one bucket per touched month.
///
/// An event lands in every month it overlaps, not just its start month:
/// membership is the half-open interval test
/// `event.start < month_end && event.end > month_start`.
pub fn bucket_by_month(selection: &Selection, entries: &[Entry]) -> Vec<MonthBucket> {
    let events = project_events(selection, entries);

    selected_months(selection, entries)
        .into_iter()
        .map(|month| {
            let (month_start, month_end) = month_bounds(month);
            let month_events = events
                .iter()
                .filter(|event| event.start < month_end && event.end > month_start)
                .cloned()
                .collect();
            MonthBucket {
                month,
                events: month_events,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_entries;
    use crate::parse::parse_tarih;
    use crate::types::{DateInfo, EVENT_PALETTE, RawEntry};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entries_from(rows: Vec<(&str, &str, &str)>) -> Vec<Entry> {
        let raw: Vec<RawEntry> = rows
            .into_iter()
            .map(|(period, category, tarih)| RawEntry {
                akademik_donem: Some(period.to_string()),
                kategori: Some(category.to_string()),
                tarih: parse_tarih(tarih),
            })
            .collect();
        normalize_entries(&raw, &EVENT_PALETTE)
    }

    #[test]
    fn test_events_carry_exclusive_ends_and_entry_metadata() {
        let entries = entries_from(vec![(
            "Güz Yarıyılı",
            "Ders Kayıtları",
            "17-22 Kasım 2025",
        )]);
        let mut selection = Selection::new();
        selection.select_all(&entries);

        let events = project_events(&selection, &entries);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, format!("{}-0", entries[0].id));
        assert_eq!(events[0].title, "Ders Kayıtları");
        assert_eq!(events[0].start, date(2025, 11, 17));
        assert_eq!(events[0].end, date(2025, 11, 23));
        assert_eq!(events[0].raw_range, "17-22 Kasım 2025");
        assert_eq!(events[0].color, entries[0].color);
    }

    #[test]
    fn test_title_fallback_chain() {
        let raw = vec![
            RawEntry {
                akademik_donem: Some("Güz Yarıyılı".to_string()),
                kategori: Some(String::new()),
                tarih: parse_tarih("1 Ekim 2025"),
            },
            RawEntry {
                akademik_donem: None,
                kategori: None,
                tarih: parse_tarih("2 Ekim 2025"),
            },
        ];
        let entries = normalize_entries(&raw, &EVENT_PALETTE);
        let mut selection = Selection::new();
        selection.select_all(&entries);

        let events = project_events(&selection, &entries);
        assert_eq!(events[0].title, "Güz Yarıyılı");
        assert_eq!(events[1].title, "Etkinlik");
    }

    #[test]
    fn test_event_spanning_two_months_lands_in_both_buckets() {
        let entries = entries_from(vec![(
            "Güz Yarıyılı",
            "Ara Dönem",
            "28 Kasım - 2 Aralık 2025",
        )]);
        let mut selection = Selection::new();
        selection.select_all(&entries);

        let buckets = bucket_by_month(&selection, &entries);
        let months: Vec<String> = buckets.iter().map(|b| b.month.to_string()).collect();
        assert_eq!(months, vec!["2025-11", "2025-12"]);
        assert_eq!(buckets[0].events.len(), 1);
        assert_eq!(buckets[1].events.len(), 1);
        assert_eq!(buckets[0].events[0].id, buckets[1].events[0].id);
    }

    #[test]
    fn test_months_are_deduplicated_and_sorted() {
        let entries = entries_from(vec![
            ("Bahar Yarıyılı", "Final Sınavları", "13-18 Nisan 2026"),
            ("Güz Yarıyılı", "Ders Kayıtları", "17-22 Kasım 2025"),
            ("Güz Yarıyılı", "Derslerin Son Günü", "28 Kasım 2025"),
        ]);
        let mut selection = Selection::new();
        selection.select_all(&entries);

        let months: Vec<String> = selected_months(&selection, &entries)
            .into_iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(months, vec!["2025-11", "2026-04"]);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let entries = entries_from(vec![
            ("Güz Yarıyılı", "Ders Kayıtları", "17-22 Kasım 2025"),
            ("Bahar Yarıyılı", "Final Sınavları", "13-18 Nisan 2026"),
        ]);
        let mut selection = Selection::new();
        selection.select_all(&entries);

        let first = project_events(&selection, &entries);
        let second = project_events(&selection, &entries);
        assert_eq!(first, second);

        let buckets_a = bucket_by_month(&selection, &entries);
        let buckets_b = bucket_by_month(&selection, &entries);
        assert_eq!(buckets_a.len(), buckets_b.len());
        for (a, b) in buckets_a.iter().zip(&buckets_b) {
            assert_eq!(a.month, b.month);
            assert_eq!(a.events, b.events);
        }
    }

    #[test]
    fn test_empty_selection_projects_nothing() {
        let entries = entries_from(vec![("Güz Yarıyılı", "Ders Kayıtları", "17-22 Kasım 2025")]);
        let selection = Selection::new();

        assert!(project_events(&selection, &entries).is_empty());
        assert!(selected_months(&selection, &entries).is_empty());
        assert!(bucket_by_month(&selection, &entries).is_empty());
    }

    #[test]
    fn test_unparsed_entry_contributes_no_events() {
        let raw = vec![RawEntry {
            akademik_donem: Some("Güz Yarıyılı".to_string()),
            kategori: Some("Kayıt Dondurma".to_string()),
            tarih: DateInfo {
                raw: "Eylül ayı içinde".to_string(),
                spans: Vec::new(),
            },
        }];
        let entries = normalize_entries(&raw, &EVENT_PALETTE);
        let mut selection = Selection::new();
        selection.select_all(&entries);

        assert!(project_events(&selection, &entries).is_empty());
        assert!(bucket_by_month(&selection, &entries).is_empty());
    }
}
