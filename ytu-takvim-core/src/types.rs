use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fallback event title when an entry carries neither a category nor an
/// academic period.
pub const DEFAULT_TITLE: &str = "Etkinlik";

/// One contiguous date range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    /// First day of the range
    pub start: NaiveDate,
    /// Last day of the range (inclusive)
    pub end: NaiveDate,
}

impl DateSpan {
    /// Create a span; `start` and `end` may be the same day.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether the span covers a single calendar day.
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }
}

/// Date information of one entry: the raw cell text plus any machine-parsed
/// ranges. `spans` is authoritative for scheduling when non-empty; `raw` is
/// the display and description fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateInfo {
    /// Free-text date description as it appeared upstream
    #[serde(default)]
    pub raw: String,
    /// Parsed ranges, empty when the text could not be parsed
    #[serde(default)]
    pub spans: Vec<DateSpan>,
}

impl DateInfo {
    /// Whether any machine-parsed range is available.
    pub fn has_spans(&self) -> bool {
        !self.spans.is_empty()
    }
}

/// One calendar row as delivered by the upstream payload.
///
/// Every field is defaulted so that partial rows degrade to an entry with
/// empty date info instead of failing the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEntry {
    /// Academic period column ("Güz Yarıyılı", "Bahar-Tatil", ...)
    #[serde(default)]
    pub akademik_donem: Option<String>,
    /// Category column ("Ders Kayıtları", ...)
    #[serde(default)]
    pub kategori: Option<String>,
    /// Date column, raw text plus parsed spans
    #[serde(default)]
    pub tarih: DateInfo,
}

/// Metadata about the upstream workbook the payload was extracted from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    /// Name of the downloaded workbook
    #[serde(default)]
    pub file_name: Option<String>,
    /// When the workbook was downloaded
    #[serde(default)]
    pub downloaded_at: Option<String>,
    /// Where the workbook was downloaded from
    #[serde(default)]
    pub url: Option<String>,
}

/// Payload returned by the `/api/takvim` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarPayload {
    /// Source workbook metadata, when the service provides it
    #[serde(default)]
    pub source: Option<Source>,
    /// Calendar rows in upstream order
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

/// Display color pair for an entry and the events projected from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventColor {
    /// Background fill
    pub bg: &'static str,
    /// Border accent, a darker shade of `bg`
    pub border: &'static str,
}

/// Fixed 8-color palette cycled over entries in payload order.
pub const EVENT_PALETTE: [EventColor; 8] = [
    EventColor { bg: "#2563eb", border: "#1d4ed8" },
    EventColor { bg: "#0d9488", border: "#0f766e" },
    EventColor { bg: "#e11d48", border: "#be123c" },
    EventColor { bg: "#7c3aed", border: "#6d28d9" },
    EventColor { bg: "#ca8a04", border: "#a16207" },
    EventColor { bg: "#f97316", border: "#ea580c" },
    EventColor { bg: "#0284c7", border: "#0369a1" },
    EventColor { bg: "#22c55e", border: "#16a34a" },
];

/// A normalized calendar entry: one raw row plus its assigned identifier
/// and display color. Created once per payload, never mutated afterwards,
/// discarded on the next fetch.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Stable-within-one-payload identifier, `<period|diger>-<index>`
    pub id: String,
    /// Academic period, `None` or empty when the column was blank
    pub akademik_donem: Option<String>,
    /// Category, `None` or empty when the column was blank
    pub kategori: Option<String>,
    /// Date text and parsed spans
    pub tarih: DateInfo,
    /// Palette color assigned by payload position
    pub color: EventColor,
}

impl Entry {
    /// Academic period, treating empty strings like absent values.
    pub fn period(&self) -> Option<&str> {
        non_empty(self.akademik_donem.as_deref())
    }

    /// Category, treating empty strings like absent values.
    pub fn category(&self) -> Option<&str> {
        non_empty(self.kategori.as_deref())
    }

    /// Event title: category, falling back to the academic period, falling
    /// back to [`DEFAULT_TITLE`].
    pub fn title(&self) -> &str {
        self.category()
            .or_else(|| self.period())
            .unwrap_or(DEFAULT_TITLE)
    }
}

/// One renderable calendar event, derived from an `(entry, span)` pair.
///
/// `end` is exclusive: the day after the span's inclusive end, as calendar
/// grids and ICS expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    /// `<entry.id>-<spanIndex>`
    pub id: String,
    /// Display title of the originating entry
    pub title: String,
    /// First day of the event
    pub start: NaiveDate,
    /// Day after the last day of the event
    pub end: NaiveDate,
    /// Color inherited from the originating entry
    pub color: EventColor,
    /// Raw date text of the originating entry
    pub raw_range: String,
    /// Academic period carried for downstream consumers
    pub akademik_donem: Option<String>,
    /// Category carried for downstream consumers
    pub kategori: Option<String>,
}

/// The upstream extractor writes blank cells as empty strings, so both
/// `None` and `""` count as missing.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
