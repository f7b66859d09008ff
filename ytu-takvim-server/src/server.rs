use std::{env, net::SocketAddr};

use anyhow::Result;
use tokio::net::TcpListener;

use crate::handlers::create_app;

/// Bind and serve the calendar service.
pub async fn start_server(api_url: String) -> Result<()> {
    let app = create_app(api_url);

    // Port from the environment, defaulting to 3000
    let port = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("YTU Takvim Server starting on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
