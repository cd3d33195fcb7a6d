//! HTTP front end
//! Serves the dashboard at `/`, running a fresh render pass per request.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use super::pipeline::Dashboard;
use crate::config::Settings;
use crate::error::Result;

pub fn router(settings: Settings) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(Arc::new(settings))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(settings: Settings, addr: SocketAddr, open_browser: bool) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let url = format!("http://{}/", listener.local_addr()?);
    info!(%url, "dashboard listening");

    if open_browser {
        if let Err(e) = open::that(&url) {
            warn!(error = %e, "could not open a browser");
        }
    }

    axum::serve(listener, router(settings))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn index(State(settings): State<Arc<Settings>>) -> Response {
    // The blocking HTTP client must not run on the async workers
    let pass = tokio::task::spawn_blocking(move || render(&settings)).await;

    match pass {
        Ok(Ok(html)) => Html(html).into_response(),
        Ok(Err(e)) => {
            error!(error = %e, "render pass failed");
            (
                StatusCode::BAD_GATEWAY,
                "The dashboard data could not be loaded. Please try again later.",
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "render task aborted");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

fn render(settings: &Settings) -> Result<String> {
    Dashboard::new(settings.clone())?.render_html()
}
