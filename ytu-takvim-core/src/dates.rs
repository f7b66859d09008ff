use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::types::{DateInfo, DateSpan};

/// Turkish month names, indexed by `month - 1`.
pub const TURKISH_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos",
    "Eylül", "Ekim", "Kasım", "Aralık",
];

/// Turkish name of a calendar month (1-based).
pub fn month_name(month: u32) -> &'static str {
    TURKISH_MONTHS[(month - 1) as usize]
}

/// Format a single date in the fixed long form, e.g. `17 Kasım 2025`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02} {} {}", date.day(), month_name(date.month()), date.year())
}

/// Format a span as a single date or `<start> - <end>`.
pub fn format_span(span: &DateSpan) -> String {
    if span.is_single_day() {
        format_date(span.start)
    } else {
        format!("{} - {}", format_date(span.start), format_date(span.end))
    }
}

/// Human-readable date text of an entry: formatted spans joined with `, `,
/// or the raw upstream text when nothing was parsed.
pub fn format_date_info(tarih: &DateInfo) -> String {
    if tarih.has_spans() {
        tarih
            .spans
            .iter()
            .map(format_span)
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        tarih.raw.clone()
    }
}

/// The day after `date`. Source spans are inclusive on both ends while
/// calendar grids and ICS treat ranges as half-open, so range ends pass
/// through here before rendering or export.
pub fn exclusive_end(date: NaiveDate) -> NaiveDate {
    date.succ_opt().expect("date overflow")
}

/// One calendar month, ordered chronologically and displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-based
    pub month: u32,
}

impl MonthKey {
    /// Month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following month, rolling over December.
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("valid month")
    }

    /// Turkish display label, e.g. `Kasım 2025`.
    pub fn label(self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Every month a span touches, from the month of `start` through the month
/// of `end`, in chronological order.
pub fn months_touched(span: &DateSpan) -> Vec<MonthKey> {
    let mut months = Vec::new();
    let mut current = MonthKey::from_date(span.start);
    let last = MonthKey::from_date(span.end);
    while current <= last {
        months.push(current);
        current = current.succ();
    }
    months
}

/// Half-open `[first day, first day of next month)` bounds of a month.
pub fn month_bounds(month: MonthKey) -> (NaiveDate, NaiveDate) {
    (month.first_day(), month.succ().first_day())
}
