use chrono::{DateTime, Utc};

use crate::dates::exclusive_end;
use crate::types::{Entry, non_empty};

/// Download filename for the exported calendar.
pub const ICS_FILE_NAME: &str = "ytu-akademik-takvim.ics";

/// MIME type of the exported calendar.
pub const ICS_MIME: &str = "text/calendar; charset=utf-8";

/// ICS generation options.
#[derive(Debug, Clone)]
pub struct IcsOptions {
    /// PRODID property of the VCALENDAR
    pub prod_id: String,
    /// Domain suffix of every VEVENT UID
    pub uid_domain: String,
}

impl Default for IcsOptions {
    fn default() -> Self {
        Self {
            prod_id: "-//YTU Akademik Takvim//TR".to_string(),
            uid_domain: "ytu-akademik-takvim".to_string(),
        }
    }
}

/// RFC 5545 serializer for selected calendar entries.
///
/// Events are all-day: DTSTART/DTEND carry `VALUE=DATE`, with DTEND
/// exclusive as the format requires. Entries without parsed spans emit no
/// VEVENT, so the document stays valid whatever the selection contains.
pub struct IcsGenerator {
    options: IcsOptions,
}

impl IcsGenerator {
    /// Generator with the given options.
    pub fn new(options: IcsOptions) -> Self {
        Self { options }
    }

    /// Serialize `entries` into a VCALENDAR document stamped with the
    /// current UTC time.
    pub fn generate(&self, entries: &[Entry]) -> String {
        self.generate_at(entries, Utc::now())
    }

    /// Serialize `entries` with a fixed DTSTAMP. Output is deterministic
    /// for a given entry list and timestamp.
    pub fn generate_at(&self, entries: &[Entry], timestamp: DateTime<Utc>) -> String {
        let dtstamp = timestamp.format("%Y%m%dT%H%M%SZ").to_string();

        let mut ics_content = String::new();
        ics_content.push_str("BEGIN:VCALENDAR\r\n");
        ics_content.push_str("VERSION:2.0\r\n");
        ics_content.push_str(&format!("PRODID:{}\r\n", self.options.prod_id));
        ics_content.push_str("CALSCALE:GREGORIAN\r\n");
        ics_content.push_str("METHOD:PUBLISH\r\n");

        for (entry_index, entry) in entries.iter().enumerate() {
            self.add_entry_events(&mut ics_content, entry, entry_index, &dtstamp);
        }

        ics_content.push_str("END:VCALENDAR\r\n");
        ics_content
    }

    /// Append one VEVENT per span of `entry`.
    fn add_entry_events(
        &self,
        ics_content: &mut String,
        entry: &Entry,
        entry_index: usize,
        dtstamp: &str,
    ) {
        let summary = self.escape_text(entry.title());
        let description = self.build_description(entry);

        for (span_index, span) in entry.tarih.spans.iter().enumerate() {
            // Entry id, list position and span position together keep UIDs
            // unique even when category texts repeat.
            let uid = format!(
                "{}-{}-{}@{}",
                entry.id, entry_index, span_index, self.options.uid_domain
            );
            let dtstart = span.start.format("%Y%m%d").to_string();
            let dtend = exclusive_end(span.end).format("%Y%m%d").to_string();

            ics_content.push_str("BEGIN:VEVENT\r\n");
            ics_content.push_str(&format!("UID:{}\r\n", uid));
            ics_content.push_str(&format!("DTSTAMP:{}\r\n", dtstamp));
            ics_content.push_str(&format!("SUMMARY:{}\r\n", summary));
            if !description.is_empty() {
                ics_content.push_str(&format!("DESCRIPTION:{}\r\n", description));
            }
            ics_content.push_str(&format!("DTSTART;VALUE=DATE:{}\r\n", dtstart));
            ics_content.push_str(&format!("DTEND;VALUE=DATE:{}\r\n", dtend));
            ics_content.push_str("END:VEVENT\r\n");
        }
    }

    /// `<period> - <raw date text>`, dropping whichever side is empty.
    fn build_description(&self, entry: &Entry) -> String {
        let parts: Vec<&str> = [entry.period(), non_empty(Some(entry.tarih.raw.as_str()))]
            .into_iter()
            .flatten()
            .collect();
        self.escape_text(&parts.join(" - "))
    }

    /// Escape ICS text values. Backslash must go first so substitutions
    /// introduced by the later rules are not escaped twice.
    fn escape_text(&self, text: &str) -> String {
        text.replace('\\', "\\\\")
            .replace('\n', "\\n")
            .replace('\r', "\\n")
            .replace(',', "\\,")
            .replace(';', "\\;")
    }
}

impl Default for IcsGenerator {
    fn default() -> Self {
        Self::new(IcsOptions::default())
    }
}
