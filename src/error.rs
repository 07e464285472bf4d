//! Error types for the blogsmith library.
//!
//! Every failure the pipeline can produce maps to exactly one
//! [`BlogsmithError`] variant, and every variant maps to a fixed HTTP status
//! and a short client-facing message. The distinction that matters most in
//! practice:
//!
//! * **Validation errors** (missing content, unknown export format) are the
//!   caller's fault and surface as HTTP 400 before any external call is made.
//!
//! * **Configuration errors** (missing API key) are the operator's fault and
//!   are reported distinctly from runtime API failures so a misconfigured
//!   deployment is obvious from the first request.
//!
//! * **Completion-service errors** are classified from the upstream response
//!   (401 → [`Auth`], 429 → [`RateLimit`], key-format complaints →
//!   [`CredentialFormat`], everything else → [`Generation`]).
//!
//! None of these are retried; each generation call is single-shot and the
//! upstream service owns its own resilience.
//!
//! [`Auth`]: BlogsmithError::Auth
//! [`RateLimit`]: BlogsmithError::RateLimit
//! [`CredentialFormat`]: BlogsmithError::CredentialFormat
//! [`Generation`]: BlogsmithError::Generation

use thiserror::Error;

/// All errors returned by the blogsmith library.
#[derive(Debug, Error)]
pub enum BlogsmithError {
    // ── Validation errors (HTTP 400) ─────────────────────────────────────
    /// Required input was missing from the request.
    #[error("{0}")]
    Validation(String),

    /// The export format string is not one of `markdown`, `html`, `react`.
    #[error("Invalid format specified: '{format}'")]
    InvalidFormat { format: String },

    // ── Configuration errors (HTTP 500) ──────────────────────────────────
    /// The completion-service credential is absent from the environment.
    #[error("Anthropic API key is not configured.\nSet ANTHROPIC_API_KEY before starting the server.")]
    ApiKeyMissing,

    // ── Completion-service errors (HTTP 500) ─────────────────────────────
    /// The completion service rejected the credential (401/403).
    #[error("Invalid API key. Please check your configuration.")]
    Auth { detail: String },

    /// The completion service returned HTTP 429.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit { retry_after_secs: Option<u64> },

    /// The upstream error message complained about the key format itself.
    #[error("Invalid API key format. The key should start with \"sk-ant-\".")]
    CredentialFormat { detail: String },

    /// Any other generation failure; the underlying message is kept for
    /// diagnostics and surfaced to the client as an optional `details` field.
    #[error("Failed to generate blog post. Please try again.")]
    Generation { message: String },

    // ── I/O errors (HTTP 500) ─────────────────────────────────────────────
    /// An uploaded file could not be stored.
    #[error("Failed to upload file")]
    Upload { detail: String },

    /// A conversion failed unexpectedly.
    #[error("Failed to convert content")]
    Conversion { detail: String },
}

impl BlogsmithError {
    /// Fixed HTTP status for this error.
    ///
    /// Validation problems are the caller's fault (400); everything else is a
    /// server-side failure (500).
    pub fn http_status(&self) -> u16 {
        match self {
            BlogsmithError::Validation(_) | BlogsmithError::InvalidFormat { .. } => 400,
            _ => 500,
        }
    }

    /// Short human-readable message safe to return to the client.
    pub fn client_message(&self) -> String {
        self.to_string()
    }

    /// Diagnostic detail surfaced to the client, if any.
    ///
    /// Only unknown generation failures expose their underlying message;
    /// every other variant keeps its detail in the server log.
    pub fn client_details(&self) -> Option<&str> {
        match self {
            BlogsmithError::Generation { message } => Some(message),
            _ => None,
        }
    }

    /// Internal detail for server-side logging, where present.
    pub fn log_detail(&self) -> Option<&str> {
        match self {
            BlogsmithError::Auth { detail }
            | BlogsmithError::CredentialFormat { detail }
            | BlogsmithError::Upload { detail }
            | BlogsmithError::Conversion { detail } => Some(detail),
            BlogsmithError::Generation { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_client_error() {
        let e = BlogsmithError::Validation("Content or revision prompt is required".into());
        assert_eq!(e.http_status(), 400);
        assert!(e.to_string().contains("required"));
    }

    #[test]
    fn invalid_format_is_client_error() {
        let e = BlogsmithError::InvalidFormat {
            format: "bogus".into(),
        };
        assert_eq!(e.http_status(), 400);
        assert!(e.to_string().contains("bogus"));
    }

    #[test]
    fn auth_hides_detail_from_client() {
        let e = BlogsmithError::Auth {
            detail: "invalid x-api-key".into(),
        };
        assert_eq!(e.http_status(), 500);
        assert!(e.client_details().is_none());
        assert_eq!(e.log_detail(), Some("invalid x-api-key"));
    }

    #[test]
    fn generation_surfaces_details() {
        let e = BlogsmithError::Generation {
            message: "overloaded_error".into(),
        };
        assert_eq!(e.client_details(), Some("overloaded_error"));
    }

    #[test]
    fn rate_limit_display() {
        let e = BlogsmithError::RateLimit {
            retry_after_secs: Some(30),
        };
        assert!(e.to_string().contains("try again later"));
    }
}
