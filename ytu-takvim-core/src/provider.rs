use std::time::Duration;

use reqwest::Client;

use crate::error::{Error, Result};
use crate::types::CalendarPayload;

/// Public endpoint serving the extracted academic calendar.
pub const DEFAULT_API_URL: &str = "https://calendar-automation-aiua.onrender.com/api/takvim";

/// HTTP client for the upstream calendar payload.
///
/// One GET, no retries, no caching: a failed fetch surfaces its error and
/// a reload is an explicit new call. Dropping the returned future abandons
/// an in-flight request.
#[derive(Clone)]
pub struct TakvimProvider {
    client: Client,
    api_url: String,
}

impl TakvimProvider {
    /// Build a provider against `api_url`.
    pub fn new(api_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("YTU-Takvim-Rust/0.1.0")
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert("Accept", "application/json".parse().expect("valid header"));
                headers.insert(
                    "Accept-Encoding",
                    "br;q=1.0, gzip;q=0.9, deflate;q=0.8"
                        .parse()
                        .expect("valid header"),
                );
                headers
            })
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// The endpoint this provider fetches from.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch and decode the calendar payload.
    ///
    /// Non-2xx responses become [`Error::Status`] carrying the HTTP code;
    /// transport timeouts become [`Error::Timeout`].
    pub async fn fetch_payload(&self) -> Result<CalendarPayload> {
        tracing::debug!("Fetching calendar payload from {}", self.api_url);

        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(Self::handle_error_req)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let payload: CalendarPayload = response.json().await.map_err(Self::handle_error_req)?;
        tracing::info!("Fetched {} calendar entries", payload.entries.len());

        Ok(payload)
    }

    fn handle_error_req(error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(error)
        }
    }
}

impl Default for TakvimProvider {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_deserialization_defaults() {
        let payload: CalendarPayload = serde_json::from_str(
            r#"{
                "source": {"file_name": "takvim.xlsx"},
                "entries": [
                    {
                        "akademik_donem": "Güz Yarıyılı",
                        "kategori": "Ders Kayıtları",
                        "tarih": {"raw": "17-22 Kasım 2025", "spans": [
                            {"start": "2025-11-17", "end": "2025-11-22"}
                        ]}
                    },
                    {"akademik_donem": null, "kategori": "Mezuniyet"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            payload.source.and_then(|s| s.file_name).as_deref(),
            Some("takvim.xlsx")
        );
        assert_eq!(payload.entries.len(), 2);
        assert_eq!(payload.entries[0].tarih.spans.len(), 1);

        // rows missing tarih degrade to empty date info, not an error
        assert!(payload.entries[1].tarih.raw.is_empty());
        assert!(payload.entries[1].tarih.spans.is_empty());
    }

    #[test]
    fn test_corrupt_date_string_is_rejected_at_the_boundary() {
        let result: std::result::Result<CalendarPayload, _> = serde_json::from_str(
            r#"{"entries": [{"tarih": {"raw": "x", "spans": [{"start": "not-a-date", "end": "2025-11-22"}]}}]}"#,
        );
        assert!(result.is_err());
    }
}
