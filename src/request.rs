//! Request and prompt types.
//!
//! All of these are transient: a [`GenerationRequest`] lives for exactly one
//! generation call, and the [`PromptBundle`] derived from it is discarded as
//! soon as the completion request has been issued. Nothing here is shared
//! between requests.

use crate::prompts::{Audience, Style, Tone};

/// A reference to an uploaded image, created on upload and never mutated.
///
/// `filename` is the server-assigned, collision-avoided name; `url` is the
/// relative path under which the file is served (e.g. `/uploads/logo-….png`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub filename: String,
    pub url: String,
}

/// Everything needed to generate or revise a blog post.
///
/// Invariant: either `source_text` or `revision_prompt` must be non-empty;
/// [`crate::generate`] rejects requests violating this before any external
/// call is attempted.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Raw developer notes or README text. May be empty in revision mode.
    pub source_text: String,

    /// Uploaded images to weave into the post, in client-supplied order.
    ///
    /// Uploads may complete in arbitrary order on the client side; whatever
    /// order the client ultimately sends is preserved verbatim in the prompt.
    pub images: Vec<ImageRef>,

    pub tone: Tone,
    pub audience: Audience,
    pub style: Style,

    /// Change instructions for revision mode. Presence of a non-empty value
    /// switches the prompt builder into revision mode.
    pub revision_prompt: Option<String>,

    /// The previously generated post being revised. Embedded verbatim in the
    /// revision user prompt.
    pub prior_post: Option<String>,
}

impl GenerationRequest {
    /// Whether this request revises a prior post rather than generating a new one.
    pub fn is_revision(&self) -> bool {
        self.revision_prompt
            .as_deref()
            .is_some_and(|p| !p.is_empty())
    }

    /// Whether the request carries any usable input at all.
    pub fn has_input(&self) -> bool {
        !self.source_text.is_empty() || self.is_revision()
    }
}

/// The paired system/user prompt strings sent to the completion service.
///
/// Derived deterministically from a [`GenerationRequest`] by
/// [`crate::pipeline::prompt::build_prompt`]; holds no shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBundle {
    pub system_prompt: String,
    pub user_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_has_no_input() {
        assert!(!GenerationRequest::default().has_input());
    }

    #[test]
    fn source_text_counts_as_input() {
        let req = GenerationRequest {
            source_text: "# My project".into(),
            ..Default::default()
        };
        assert!(req.has_input());
        assert!(!req.is_revision());
    }

    #[test]
    fn empty_revision_prompt_is_not_revision() {
        let req = GenerationRequest {
            revision_prompt: Some(String::new()),
            ..Default::default()
        };
        assert!(!req.is_revision());
        assert!(!req.has_input());
    }

    #[test]
    fn revision_prompt_counts_as_input() {
        let req = GenerationRequest {
            revision_prompt: Some("make it shorter".into()),
            prior_post: Some("<p>hi</p>".into()),
            ..Default::default()
        };
        assert!(req.is_revision());
        assert!(req.has_input());
    }
}
