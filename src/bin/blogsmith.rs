//! HTTP server binary for blogsmith.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `GenerationConfig`, builds the Anthropic client from the environment, and
//! serves the router.

use anyhow::{Context, Result};
use blogsmith::server::{router, AppState};
use blogsmith::{AnthropicClient, GenerationConfig};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Serve on the default port (credential from ANTHROPIC_API_KEY)
  blogsmith

  # Bind a public interface and a custom uploads directory
  blogsmith --host 0.0.0.0 --port 8080 --upload-dir /var/lib/blogsmith/uploads

  # Use a different model with a larger output cap
  blogsmith --model claude-3-5-sonnet-latest --max-tokens 3000

ENDPOINTS:
  POST /generate   notes + options            → { "blogPost": "<html…>" }
  POST /convert    { content, format }        → { content, filename }
  POST /upload     multipart field "file"     → { success, filename, url }
  GET  /uploads/*  serves stored uploads
"#;

#[derive(Parser, Debug)]
#[command(
    name = "blogsmith",
    version,
    about = "Blog post generator service: notes in, formatted posts out",
    after_help = AFTER_HELP
)]
struct Args {
    /// Interface to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Directory for uploaded images, served at /uploads.
    #[arg(long, default_value = "public/uploads")]
    upload_dir: PathBuf,

    /// Completion model identifier.
    #[arg(long, env = "BLOGSMITH_MODEL", default_value = "claude-3-opus-20240229")]
    model: String,

    /// Base URL of the completion service.
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = "https://api.anthropic.com")]
    api_base_url: String,

    /// Output-token cap for initial generation.
    #[arg(long, default_value_t = 1500)]
    max_tokens: u32,

    /// Output-token cap for revision requests.
    #[arg(long, default_value_t = 2000)]
    revision_max_tokens: u32,

    /// Per-call API timeout in seconds.
    #[arg(long, default_value_t = 60)]
    api_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = GenerationConfig::builder()
        .model(&args.model)
        .api_base_url(&args.api_base_url)
        .max_tokens(args.max_tokens)
        .revision_max_tokens(args.revision_max_tokens)
        .api_timeout_secs(args.api_timeout_secs)
        .build()
        .context("Invalid configuration")?;

    let client = AnthropicClient::from_env(&config)
        .context("Completion service credential missing")?;

    let state = Arc::new(AppState {
        client: Arc::new(client),
        config,
        upload_dir: args.upload_dir.clone(),
    });

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, model = %args.model, uploads = %args.upload_dir.display(), "blogsmith listening");

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}
