//! Generation orchestrator: validate, prompt, call, classify.
//!
//! The orchestrator is deliberately thin. All prompt engineering lives in
//! [`crate::pipeline::prompt`] and all transport concerns in
//! [`crate::client`]; what remains here is the contract:
//!
//! 1. Reject requests with neither content nor a revision prompt *before*
//!    any external call is attempted.
//! 2. Issue exactly one completion call with a fixed output cap (a distinct
//!    cap for revision mode, but fixed — never computed from the input).
//! 3. Classify failures into the user-facing taxonomy.
//!
//! No retries are performed; each call is single-shot. The upstream service
//! owns its own resilience, and a blog-post generator gains nothing from
//! hammering a rate-limited endpoint.

use crate::client::{CompletionClient, CompletionError};
use crate::config::GenerationConfig;
use crate::error::BlogsmithError;
use crate::pipeline::prompt;
use crate::request::GenerationRequest;
use tracing::{debug, info, warn};

/// Generate or revise a blog post.
///
/// Returns the raw HTML produced by the completion service; the output is
/// treated as opaque text and never parsed or validated structurally.
pub async fn generate(
    request: &GenerationRequest,
    client: &dyn CompletionClient,
    config: &GenerationConfig,
) -> Result<String, BlogsmithError> {
    if !request.has_input() {
        return Err(BlogsmithError::Validation(
            "Content or revision prompt is required".into(),
        ));
    }

    let revision = request.is_revision();
    let bundle = prompt::build_prompt(request);
    let max_tokens = config.cap_for(revision);

    debug!(
        revision,
        max_tokens,
        images = request.images.len(),
        "Issuing completion request"
    );

    match client.complete(&bundle.system_prompt, &bundle.user_prompt, max_tokens).await {
        Ok(post) => {
            info!(revision, post_len = post.len(), "Generation complete");
            Ok(post)
        }
        Err(e) => {
            warn!(status = ?e.status, message = %e.message, "Generation failed");
            Err(classify(e))
        }
    }
}

/// Map a raw completion failure onto the user-facing error taxonomy.
///
/// Checked in order: authentication status, rate-limit status, key-format
/// complaints in the message text, then the catch-all that keeps the
/// upstream message for diagnostics.
fn classify(error: CompletionError) -> BlogsmithError {
    match error.status {
        Some(401) | Some(403) => BlogsmithError::Auth {
            detail: error.message,
        },
        Some(429) => BlogsmithError::RateLimit {
            retry_after_secs: error.retry_after_secs,
        },
        _ if error.message.contains("API key") => BlogsmithError::CredentialFormat {
            detail: error.message,
        },
        _ => BlogsmithError::Generation {
            message: error.message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake completion client that counts calls and returns a canned result.
    struct FakeClient {
        calls: AtomicUsize,
        result: Result<String, CompletionError>,
    }

    impl FakeClient {
        fn ok(text: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Ok(text.to_string()),
            }
        }

        fn failing(error: CompletionError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Err(error),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionClient for FakeClient {
        async fn complete(
            &self,
            _system_prompt: &str,
            _user_prompt: &str,
            _max_tokens: u32,
        ) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn request(text: &str) -> GenerationRequest {
        GenerationRequest {
            source_text: text.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_request_fails_before_any_call() {
        let client = FakeClient::ok("<p>never</p>");
        let config = GenerationConfig::default();

        let result = generate(&GenerationRequest::default(), &client, &config).await;

        assert!(matches!(result, Err(BlogsmithError::Validation(_))));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn successful_generation_returns_post() {
        let client = FakeClient::ok("<h1>Post</h1>");
        let config = GenerationConfig::default();

        let post = generate(&request("notes"), &client, &config).await.unwrap();

        assert_eq!(post, "<h1>Post</h1>");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn revision_request_is_accepted_without_source_text() {
        let client = FakeClient::ok("<h1>Revised</h1>");
        let config = GenerationConfig::default();
        let req = GenerationRequest {
            revision_prompt: Some("tighten it up".into()),
            prior_post: Some("<h1>Post</h1>".into()),
            ..Default::default()
        };

        let post = generate(&req, &client, &config).await.unwrap();
        assert_eq!(post, "<h1>Revised</h1>");
    }

    #[tokio::test]
    async fn auth_status_classifies_as_auth() {
        let client = FakeClient::failing(CompletionError {
            status: Some(401),
            message: "invalid x-api-key".into(),
            retry_after_secs: None,
        });
        let config = GenerationConfig::default();

        let err = generate(&request("notes"), &client, &config)
            .await
            .unwrap_err();
        assert!(matches!(err, BlogsmithError::Auth { .. }));
    }

    #[tokio::test]
    async fn rate_limit_preserves_retry_after() {
        let client = FakeClient::failing(CompletionError {
            status: Some(429),
            message: "rate_limit_error".into(),
            retry_after_secs: Some(42),
        });
        let config = GenerationConfig::default();

        let err = generate(&request("notes"), &client, &config)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BlogsmithError::RateLimit {
                retry_after_secs: Some(42)
            }
        ));
    }

    #[tokio::test]
    async fn key_format_complaint_classifies_as_credential_format() {
        let client = FakeClient::failing(CompletionError {
            status: Some(400),
            message: "API key must start with sk-ant-".into(),
            retry_after_secs: None,
        });
        let config = GenerationConfig::default();

        let err = generate(&request("notes"), &client, &config)
            .await
            .unwrap_err();
        assert!(matches!(err, BlogsmithError::CredentialFormat { .. }));
    }

    #[tokio::test]
    async fn unknown_failure_keeps_upstream_message() {
        let client = FakeClient::failing(CompletionError {
            status: Some(529),
            message: "overloaded_error".into(),
            retry_after_secs: None,
        });
        let config = GenerationConfig::default();

        let err = generate(&request("notes"), &client, &config)
            .await
            .unwrap_err();
        match err {
            BlogsmithError::Generation { message } => assert_eq!(message, "overloaded_error"),
            other => panic!("expected Generation, got {other:?}"),
        }
    }
}
