//! JSON handlers for `/generate` and `/convert`.

use super::AppState;
use crate::error::BlogsmithError;
use crate::generate::generate;
use crate::pipeline::export::{export_post, ExportFormat};
use crate::prompts::{Audience, Style, Tone};
use crate::request::{GenerationRequest, ImageRef};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ── /generate ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    images: Vec<ImageBody>,
    #[serde(default)]
    revision_prompt: Option<String>,
    /// The post being revised, as previously returned by this endpoint.
    #[serde(default)]
    current_post: Option<String>,
    #[serde(default)]
    tone: Option<String>,
    #[serde(default)]
    audience: Option<String>,
    #[serde(default)]
    style: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageBody {
    #[serde(default)]
    filename: String,
    url: String,
}

impl GenerateBody {
    /// Lower the wire shape into a typed request. Unknown option strings fall
    /// back to their defaults here; missing content stays empty and is caught
    /// by the orchestrator's validation.
    fn into_request(self) -> GenerationRequest {
        GenerationRequest {
            source_text: self.content.unwrap_or_default(),
            images: self
                .images
                .into_iter()
                .map(|image| ImageRef {
                    filename: image.filename,
                    url: image.url,
                })
                .collect(),
            tone: Tone::parse(self.tone.as_deref()),
            audience: Audience::parse(self.audience.as_deref()),
            style: Style::parse(self.style.as_deref()),
            revision_prompt: self.revision_prompt,
            prior_post: self.current_post,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    blog_post: String,
}

pub async fn generate_post(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, BlogsmithError> {
    let request = body.into_request();
    let blog_post = generate(&request, state.client.as_ref(), &state.config).await?;
    Ok(Json(GenerateResponse { blog_post }))
}

// ── /convert ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ConvertBody {
    #[serde(default)]
    content: String,
    #[serde(default)]
    format: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    content: String,
    filename: String,
}

pub async fn convert_post(
    Json(body): Json<ConvertBody>,
) -> Result<Json<ConvertResponse>, BlogsmithError> {
    if body.content.is_empty() {
        return Err(BlogsmithError::Validation("Content is required".into()));
    }
    let format = ExportFormat::parse(&body.format)?;
    let file = export_post(&body.content, format);
    Ok(Json(ConvertResponse {
        content: file.content,
        filename: file.filename,
    }))
}
