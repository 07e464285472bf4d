//! # blogsmith
//!
//! Turn developer notes or README text into a formatted blog post using an
//! LLM completion service, revise the result on request, and export it to
//! Markdown, HTML, or a React component stub.
//!
//! ## Pipeline Overview
//!
//! ```text
//! notes + images + options
//!  │
//!  ├─ 1. Prompt    tone/audience/style sentences + source text → PromptBundle
//!  ├─ 2. Complete  single Messages API call (bounded max_tokens, no retries)
//!  ├─ 3. Revise    optional: prior post + change request, same pipeline
//!  └─ 4. Export    HTML passthrough / Markdown tag walk / React stub
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blogsmith::{generate, AnthropicClient, GenerationConfig, GenerationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential read from ANTHROPIC_API_KEY
//!     let config = GenerationConfig::default();
//!     let client = AnthropicClient::from_env(&config)?;
//!     let request = GenerationRequest {
//!         source_text: std::fs::read_to_string("README.md")?,
//!         ..Default::default()
//!     };
//!     let post = generate(&request, &client, &config).await?;
//!     println!("{post}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `server` | on      | HTTP service (`blogsmith` binary): axum + tower-http + clap |
//!
//! Disable `server` when using only the library:
//! ```toml
//! blogsmith = { version = "0.1", default-features = false }
//! ```
//!
//! Generated posts are opaque HTML strings: the library never parses or
//! validates the model's output structurally, and nothing is persisted
//! between requests.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod prompts;
pub mod request;

#[cfg(feature = "server")]
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{AnthropicClient, CompletionClient, CompletionError};
pub use config::{GenerationConfig, GenerationConfigBuilder};
pub use error::BlogsmithError;
pub use generate::generate;
pub use pipeline::export::{export_post, ExportFile, ExportFormat};
pub use pipeline::markdown::to_markdown;
pub use pipeline::prompt::build_prompt;
pub use pipeline::react::to_react_stub;
pub use prompts::{Audience, Style, Tone};
pub use request::{GenerationRequest, ImageRef, PromptBundle};
