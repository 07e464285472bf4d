//! Configuration for blog post generation.
//!
//! All generation behaviour is controlled through [`GenerationConfig`], built
//! via its [`GenerationConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share the config across handlers, log it, and diff two
//! deployments to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest, and keeps validation in one place.

use crate::error::BlogsmithError;

/// Configuration for a generation/revision call.
///
/// Built via [`GenerationConfig::builder()`] or [`GenerationConfig::default()`].
///
/// # Example
/// ```rust
/// use blogsmith::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .model("claude-3-opus-20240229")
///     .max_tokens(1500)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Completion model identifier. Default: `claude-3-opus-20240229`.
    pub model: String,

    /// Base URL of the completion service. Default: `https://api.anthropic.com`.
    ///
    /// Overridable so tests and proxies can point the client elsewhere without
    /// touching any other code.
    pub api_base_url: String,

    /// Output-length cap for initial generation, in tokens. Default: 1500.
    ///
    /// Fixed, never computed from the input. 1500 tokens comfortably covers a
    /// medium-length post; raising it raises per-request cost linearly.
    pub max_tokens: u32,

    /// Output-length cap for revision calls, in tokens. Default: 2000.
    ///
    /// Revisions must re-emit the entire post plus the requested changes, so
    /// they get a slightly larger (but still fixed) cap than initial
    /// generation.
    pub revision_max_tokens: u32,

    /// Per-call HTTP timeout in seconds. Default: 60.
    pub api_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-opus-20240229".to_string(),
            api_base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 1500,
            revision_max_tokens: 2000,
            api_timeout_secs: 60,
        }
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }

    /// The output cap to use for the given mode.
    pub fn cap_for(&self, revision: bool) -> u32 {
        if revision {
            self.revision_max_tokens
        } else {
            self.max_tokens
        }
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn revision_max_tokens(mut self, n: u32) -> Self {
        self.config.revision_max_tokens = n;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, BlogsmithError> {
        let c = &self.config;
        if c.model.is_empty() {
            return Err(BlogsmithError::Validation(
                "Model identifier must not be empty".into(),
            ));
        }
        if c.max_tokens == 0 || c.revision_max_tokens == 0 {
            return Err(BlogsmithError::Validation(
                "Token caps must be ≥ 1".into(),
            ));
        }
        if c.api_base_url.is_empty() {
            return Err(BlogsmithError::Validation(
                "API base URL must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
