use std::collections::HashMap;

use crate::types::{EVENT_PALETTE, Entry, EventColor, RawEntry, non_empty};

/// Id prefix for entries without an academic period.
pub const UNKNOWN_PERIOD_ID: &str = "diger";

/// Group label for entries without an academic period.
pub const UNKNOWN_PERIOD_LABEL: &str = "Belirtilmemiş";

/// Turn raw payload rows into normalized entries.
///
/// Ids are `<akademik_donem|diger>-<index>` where `index` is the 0-based
/// payload position, so they are unique even when several rows share a
/// period, and stable for a given payload order. Colors cycle through
/// `palette` in payload order. Ids are scoped to one fetch; a new payload
/// gets fresh entries.
pub fn normalize_entries(raw: &[RawEntry], palette: &[EventColor]) -> Vec<Entry> {
    let palette = if palette.is_empty() {
        &EVENT_PALETTE[..]
    } else {
        palette
    };

    raw.iter()
        .enumerate()
        .map(|(index, entry)| {
            let period = non_empty(entry.akademik_donem.as_deref()).unwrap_or(UNKNOWN_PERIOD_ID);
            Entry {
                id: format!("{}-{}", period, index),
                akademik_donem: entry.akademik_donem.clone(),
                kategori: entry.kategori.clone(),
                tarih: entry.tarih.clone(),
                color: palette[index % palette.len()],
            }
        })
        .collect()
}

/// Group entries by academic period, preserving first-seen group order and
/// payload order within each group.
pub fn group_by_period(entries: &[Entry]) -> Vec<(String, Vec<&Entry>)> {
    let mut groups: Vec<(String, Vec<&Entry>)> = Vec::new();
    let mut slot_by_label: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let label = entry.period().unwrap_or(UNKNOWN_PERIOD_LABEL).to_string();
        let slot = *slot_by_label.entry(label.clone()).or_insert_with(|| {
            groups.push((label, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(entry);
    }

    groups
}
