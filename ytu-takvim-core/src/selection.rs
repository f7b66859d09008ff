use std::collections::{BTreeSet, HashSet};

use crate::types::Entry;

/// Categories preselected by the popular preset.
pub const POPULAR_CATEGORIES: [&str; 11] = [
    "Ders Programlarının İlan Edilmesi",
    "Ders Kayıtları",
    "Bağımsız Ders Kaydı-Tüm Öğrenciler",
    "Güz Yarıyılı Başlangıcı",
    "Bahar Yarıyılı Başlangıcı",
    "Güz Yarıyılı Derslerinin Son Günü",
    "Bahar Yarıyılı Derslerinin Son Günü",
    "Güz Yarıyılı Final Sınavları",
    "Bahar Yarıyılı Final Sınavları",
    "Güz Yarıyılı",
    "Bahar Yarıyılı",
];

/// Academic periods preselected by the popular preset.
pub const POPULAR_PERIODS: [&str; 2] = ["Güz-Tatil", "Bahar-Tatil"];

/// Raw date texts preselected by the popular preset.
pub const POPULAR_RAW_DATES: [&str; 2] = ["17-22 Kasım 2025", "13-18 Nisan 2026"];

/// The set of entry ids currently chosen. Lives only as long as the payload
/// it was built against; ids are never compared across fetches.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is currently selected.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Add `id` to the selection.
    pub fn insert(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    /// Flip the state of `id`: selected ids are removed, others added.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Select every entry in the list.
    pub fn select_all(&mut self, entries: &[Entry]) {
        for entry in entries {
            self.ids.insert(entry.id.clone());
        }
    }

    /// Drop every selected id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Add every entry the preset matches, keeping existing picks.
    pub fn apply_popular(&mut self, preset: &PopularPreset, entries: &[Entry]) {
        for entry in entries {
            if preset.matches(entry) {
                self.ids.insert(entry.id.clone());
            }
        }
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// The fixed lookup sets behind the "popular selection" action. Passed in
/// as data so tests and alternative deployments can inject their own sets.
#[derive(Debug, Clone)]
pub struct PopularPreset {
    /// Matching categories
    pub categories: HashSet<String>,
    /// Matching academic periods
    pub periods: HashSet<String>,
    /// Matching raw date texts
    pub raw_dates: HashSet<String>,
}

impl PopularPreset {
    /// Whether the preset matches `entry` on any of its three axes.
    pub fn matches(&self, entry: &Entry) -> bool {
        entry
            .category()
            .is_some_and(|category| self.categories.contains(category))
            || entry
                .period()
                .is_some_and(|period| self.periods.contains(period))
            || self.raw_dates.contains(&entry.tarih.raw)
    }
}

impl Default for PopularPreset {
    fn default() -> Self {
        Self {
            categories: POPULAR_CATEGORIES.iter().map(|s| (*s).to_string()).collect(),
            periods: POPULAR_PERIODS.iter().map(|s| (*s).to_string()).collect(),
            raw_dates: POPULAR_RAW_DATES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_entries;
    use crate::types::{DateInfo, EVENT_PALETTE, RawEntry};

    fn entry(period: Option<&str>, category: Option<&str>, raw: &str) -> RawEntry {
        RawEntry {
            akademik_donem: period.map(str::to_string),
            kategori: category.map(str::to_string),
            tarih: DateInfo {
                raw: raw.to_string(),
                spans: Vec::new(),
            },
        }
    }

    #[test]
    fn test_toggle_roundtrip() {
        let mut selection = Selection::new();
        selection.toggle("Güz Yarıyılı-0");
        assert!(selection.contains("Güz Yarıyılı-0"));
        selection.toggle("Güz Yarıyılı-0");
        assert!(!selection.contains("Güz Yarıyılı-0"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_and_clear() {
        let raw = vec![entry(Some("Güz"), None, ""), entry(Some("Bahar"), None, "")];
        let entries = normalize_entries(&raw, &EVENT_PALETTE);

        let mut selection = Selection::new();
        selection.select_all(&entries);
        assert_eq!(selection.len(), 2);

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_popular_preset_matches_each_axis() {
        let raw = vec![
            entry(Some("Güz Yarıyılı"), Some("Ders Kayıtları"), ""),
            entry(Some("Güz-Tatil"), None, ""),
            entry(Some("Bahar Yarıyılı"), Some("Bütünleme"), "13-18 Nisan 2026"),
            entry(Some("Yaz Okulu"), Some("Yaz Kayıtları"), "1 Temmuz 2026"),
        ];
        let entries = normalize_entries(&raw, &EVENT_PALETTE);
        let preset = PopularPreset::default();

        let mut selection = Selection::new();
        selection.apply_popular(&preset, &entries);

        assert!(selection.contains(&entries[0].id)); // category match
        assert!(selection.contains(&entries[1].id)); // period match
        assert!(selection.contains(&entries[2].id)); // raw date match
        assert!(!selection.contains(&entries[3].id));
    }

    #[test]
    fn test_popular_preset_is_additive() {
        let raw = vec![
            entry(Some("Yaz Okulu"), Some("Yaz Kayıtları"), ""),
            entry(Some("Güz-Tatil"), None, ""),
        ];
        let entries = normalize_entries(&raw, &EVENT_PALETTE);

        let mut selection = Selection::new();
        selection.insert(entries[0].id.clone());
        selection.apply_popular(&PopularPreset::default(), &entries);

        assert!(selection.contains(&entries[0].id));
        assert!(selection.contains(&entries[1].id));
        assert_eq!(selection.len(), 2);
    }
}
