use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use ytu_takvim_core::prelude::*;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub provider: TakvimProvider,
    pub popular: PopularPreset,
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

/// Query parameters of the ICS export endpoint.
#[derive(Deserialize)]
struct ExportQuery {
    /// Select every entry
    #[serde(default)]
    all: bool,
    /// Apply the popular preset
    #[serde(default)]
    popular: bool,
    /// Comma-separated entry ids
    ids: Option<String>,
    /// "ics" (default) or "json"
    format: Option<String>,
}

/// Build the service router.
pub fn create_app(api_url: String) -> Router {
    let state = AppState {
        provider: TakvimProvider::new(api_url),
        popular: PopularPreset::default(),
    };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/takvim", get(payload_handler))
        .route("/takvim.ics", get(export_ics_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "YTU Takvim Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "YTÜ akademik takvim ICS servisi",
        "endpoints": {
            "health": "/health",
            "takvim": "/api/takvim",
            "ics": "/takvim.ics"
        }
    }))
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Proxy the upstream calendar payload.
async fn payload_handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let payload = state.provider.fetch_payload().await?;
    Ok(Json(payload))
}

/// Serve the ICS export of the requested selection.
///
/// An empty selection yields a valid calendar with zero events.
async fn export_ics_handler(
    Query(params): Query<ExportQuery>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let payload = state.provider.fetch_payload().await?;
    let entries = normalize_entries(&payload.entries, &EVENT_PALETTE);

    let mut selection = Selection::new();
    if params.all {
        selection.select_all(&entries);
    }
    if params.popular {
        selection.apply_popular(&state.popular, &entries);
    }
    if let Some(ids) = &params.ids {
        for id in ids.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            if entries.iter().any(|entry| entry.id == id) {
                selection.insert(id);
            } else {
                return Err(AppError(ytu_takvim_core::Error::Config(format!(
                    "Unknown entry id: {}",
                    id
                ))));
            }
        }
    }

    let selected: Vec<Entry> = selected_entries(&selection, &entries)
        .into_iter()
        .cloned()
        .collect();

    match params.format.as_deref() {
        Some("json") => Ok(Json(selected).into_response()),
        _ => {
            let ics_content = IcsGenerator::default().generate(&selected);
            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, ICS_MIME.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", ICS_FILE_NAME),
                    ),
                ],
                ics_content,
            )
                .into_response())
        }
    }
}

/// Application error type.
#[derive(Debug)]
struct AppError(ytu_takvim_core::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use ytu_takvim_core::Error;

        let (status, error_message) = match &self.0 {
            Error::Config(_) => (StatusCode::BAD_REQUEST, "Geçersiz istek"),
            Error::Status(_) | Error::Http(_) => {
                (StatusCode::BAD_GATEWAY, "Takvim kaynağına ulaşılamadı")
            }
            Error::Timeout => (StatusCode::GATEWAY_TIMEOUT, "İstek zaman aşımına uğradı"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Sunucu hatası"),
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
            message: self.0.to_string(),
        });

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<ytu_takvim_core::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
