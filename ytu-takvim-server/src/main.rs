//! HTTP service exposing the YTU academic calendar payload and its ICS
//! export.

mod handlers;
mod server;

use std::env;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ytu_takvim_core::provider::DEFAULT_API_URL;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ytu_takvim_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = env::var("TAKVIM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    server::start_server(api_url).await
}
