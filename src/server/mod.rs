//! HTTP server: router, shared state, and error → response mapping.
//!
//! A thin axum layer over the library. Handlers stay free of business logic —
//! they deserialize the wire shapes, call into the pure pipeline or the
//! orchestrator, and let the [`BlogsmithError`] `IntoResponse` impl turn
//! failures into JSON error payloads with fixed statuses.
//!
//! Uploaded files are written under `upload_dir` and served back at
//! `/uploads/<filename>` via tower-http's `ServeDir`, so the generated posts
//! can reference them with plain relative URLs.

mod handlers;
mod upload;

use crate::client::CompletionClient;
use crate::config::GenerationConfig;
use crate::error::BlogsmithError;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, warn};

/// Uploads are images for blog posts; 10 MiB is generous for those.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Shared per-process state. Everything request-scoped lives on the stack;
/// this only carries the completion client, the config, and the upload root.
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
    pub config: GenerationConfig,
    pub upload_dir: PathBuf,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate", post(handlers::generate_post))
        .route("/convert", post(handlers::convert_post))
        .route("/upload", post(upload::upload_file))
        .nest_service("/uploads", ServeDir::new(&state.upload_dir))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON error payload: a fixed short message, plus `details` only for
/// unknown generation failures.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for BlogsmithError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Full detail goes to the server log only; the client gets the
        // fixed message (and `details` for unknown generation failures).
        if status.is_client_error() {
            warn!(error = %self, "Request rejected");
        } else {
            error!(error = %self, detail = self.log_detail().unwrap_or(""), "Request failed");
        }

        let body = ErrorBody {
            error: self.client_message(),
            details: self.client_details().map(str::to_string),
        };
        (status, Json(body)).into_response()
    }
}
