//! Parser for the human-readable date column of the academic calendar.
//!
//! Upstream cells look like `17-22 Kasım 2025`, `05 Ocak 2026` or
//! `29 Eylül, 3-5 Ekim 2025`: comma-separated day/range segments sharing a
//! single trailing year, with month names omitted where a later segment
//! supplies them. Text that does not follow this shape is kept verbatim as
//! the raw fallback with no spans.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::types::{DateInfo, DateSpan};

/// ASCII-folded Turkish month names in calendar order.
const MONTH_LOOKUP: [(&str, u32); 12] = [
    ("ocak", 1),
    ("subat", 2),
    ("mart", 3),
    ("nisan", 4),
    ("mayis", 5),
    ("haziran", 6),
    ("temmuz", 7),
    ("agustos", 8),
    ("eylul", 9),
    ("ekim", 10),
    ("kasim", 11),
    ("aralik", 12),
];

static RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<first>\d{1,2}(?:\s+\S+)?)\s*-\s*(?P<second>\d{1,2}(?:\s+\S+)?)$")
        .expect("valid regex")
});

static DAY_MONTH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<day>\d{1,2})(?:\s+(?P<month>\S+))?$").expect("valid regex")
});

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(19|20)\d{2}$").expect("valid regex"));

/// Parse a date cell into [`DateInfo`].
///
/// Returns the raw text with empty spans whenever any part of the cell
/// cannot be understood; parsing never fails hard.
pub fn parse_tarih(display: &str) -> DateInfo {
    let raw = display.to_string();
    let unparsed = DateInfo {
        raw: raw.clone(),
        spans: Vec::new(),
    };

    let normalized = display.replace(['–', '—'], "-");
    let normalized = normalized.trim();

    let Some(year_match) = YEAR_REGEX.find(normalized) else {
        return unparsed;
    };
    let year: i32 = year_match.as_str().parse().expect("digits");

    let prefix = normalized[..year_match.start()].trim();
    if prefix.is_empty() {
        return unparsed;
    }

    let segments: Vec<&str> = prefix
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();

    // Segments are parsed right to left so that a segment without a month
    // name inherits the month of the segment after it.
    let mut parsed: Vec<Vec<DateSpan>> = Vec::new();
    let mut next_month: Option<u32> = None;
    for segment in segments.iter().rev() {
        let Some((segment_spans, month)) = parse_segment(segment, year, next_month) else {
            return unparsed;
        };
        parsed.push(segment_spans);
        next_month = month.or(next_month);
    }

    let mut spans = Vec::new();
    for segment_spans in parsed.into_iter().rev() {
        spans.extend(segment_spans);
    }

    DateInfo { raw, spans }
}

/// Parse one comma-separated segment, either `d[-d] [month]` or `d [month]`.
/// Returns the spans plus the month to propagate leftwards.
fn parse_segment(
    segment: &str,
    year: i32,
    fallback_month: Option<u32>,
) -> Option<(Vec<DateSpan>, Option<u32>)> {
    let compact = segment.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.is_empty() {
        return Some((Vec::new(), fallback_month));
    }

    if let Some(caps) = RANGE_REGEX.captures(&compact) {
        let (second_day, second_month) =
            parse_day_month(caps.name("second")?.as_str(), fallback_month)?;
        let (first_day, first_month) =
            parse_day_month(caps.name("first")?.as_str(), Some(second_month))?;

        let mut start_year = year;
        let mut end_month = second_month;
        if second_month < first_month {
            if first_month == 12 && second_month == 1 {
                // December into January: the start day belongs to the year
                // before the one written in the cell.
                start_year = year - 1;
            } else {
                // Out-of-order months without a year wrap; assume the first
                // month was meant for both ends.
                end_month = first_month;
            }
        }

        let start = NaiveDate::from_ymd_opt(start_year, first_month, first_day)?;
        let end = NaiveDate::from_ymd_opt(year, end_month, second_day)?;
        return Some((vec![DateSpan::new(start, end)], Some(end_month)));
    }

    let (day, month) = parse_day_month(&compact, fallback_month)?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some((vec![DateSpan::new(date, date)], Some(month)))
}

/// Parse `<day> [<month name>]`, taking the month from `fallback_month`
/// when the name is absent.
fn parse_day_month(part: &str, fallback_month: Option<u32>) -> Option<(u32, u32)> {
    let caps = DAY_MONTH_REGEX.captures(part.trim())?;
    let day = caps.name("day")?.as_str().parse().ok()?;
    let month = match caps.name("month") {
        Some(token) => canonical_month(token.as_str())?,
        None => fallback_month?,
    };
    Some((day, month))
}

/// Resolve a month token regardless of Turkish letters or casing:
/// `KASIM`, `Kasım` and `kasim` all map to 11.
fn canonical_month(token: &str) -> Option<u32> {
    let mut cleaned = String::with_capacity(token.len());
    for ch in token.chars() {
        let folded = match ch {
            'ı' | 'İ' => 'i',
            'ğ' | 'Ğ' => 'g',
            'ş' | 'Ş' => 's',
            'ç' | 'Ç' => 'c',
            'ö' | 'Ö' => 'o',
            'ü' | 'Ü' => 'u',
            other => other,
        };
        for lower in folded.to_lowercase() {
            if lower.is_ascii_alphabetic() {
                cleaned.push(lower);
            }
        }
    }
    MONTH_LOOKUP
        .iter()
        .find(|(name, _)| *name == cleaned)
        .map(|(_, month)| *month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_day_range() {
        let info = parse_tarih("17-22 Kasım 2025");
        assert_eq!(info.raw, "17-22 Kasım 2025");
        assert_eq!(
            info.spans,
            vec![DateSpan::new(date(2025, 11, 17), date(2025, 11, 22))]
        );
    }

    #[test]
    fn test_parse_single_day() {
        let info = parse_tarih("05 Ocak 2026");
        assert_eq!(
            info.spans,
            vec![DateSpan::new(date(2026, 1, 5), date(2026, 1, 5))]
        );
    }

    #[test]
    fn test_parse_segments_inherit_month_from_the_right() {
        let info = parse_tarih("29 Eylül, 3-5 Ekim 2025");
        assert_eq!(
            info.spans,
            vec![
                DateSpan::new(date(2025, 9, 29), date(2025, 9, 29)),
                DateSpan::new(date(2025, 10, 3), date(2025, 10, 5)),
            ]
        );
    }

    #[test]
    fn test_parse_bare_days_share_the_segment_month() {
        let info = parse_tarih("13, 15, 17 Nisan 2026");
        assert_eq!(
            info.spans,
            vec![
                DateSpan::new(date(2026, 4, 13), date(2026, 4, 13)),
                DateSpan::new(date(2026, 4, 15), date(2026, 4, 15)),
                DateSpan::new(date(2026, 4, 17), date(2026, 4, 17)),
            ]
        );
    }

    #[test]
    fn test_parse_range_crossing_into_january() {
        let info = parse_tarih("29 Aralık - 2 Ocak 2026");
        assert_eq!(
            info.spans,
            vec![DateSpan::new(date(2025, 12, 29), date(2026, 1, 2))]
        );
    }

    #[test]
    fn test_parse_handles_en_dash() {
        let info = parse_tarih("17–22 Kasım 2025");
        assert_eq!(
            info.spans,
            vec![DateSpan::new(date(2025, 11, 17), date(2025, 11, 22))]
        );
    }

    #[test]
    fn test_parse_month_case_folding() {
        let info = parse_tarih("1 KASIM 2025");
        assert_eq!(
            info.spans,
            vec![DateSpan::new(date(2025, 11, 1), date(2025, 11, 1))]
        );
    }

    #[test]
    fn test_unparseable_text_keeps_raw_only() {
        let info = parse_tarih("Eylül ayı içinde");
        assert_eq!(info.raw, "Eylül ayı içinde");
        assert!(info.spans.is_empty());

        let info = parse_tarih("2025");
        assert!(info.spans.is_empty());

        let info = parse_tarih("");
        assert!(info.spans.is_empty());
    }

    #[test]
    fn test_invalid_calendar_day_is_rejected() {
        let info = parse_tarih("30 Şubat 2026");
        assert!(info.spans.is_empty());
        assert_eq!(info.raw, "30 Şubat 2026");
    }
}
