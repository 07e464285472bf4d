//! Prompt vocabulary: option enums and the fixed instruction sentences.
//!
//! Centralising every prompt fragment here serves two purposes:
//!
//! 1. **Single source of truth** — changing how a tone or audience is phrased
//!    requires editing exactly one table.
//!
//! 2. **Testability** — unit tests can inspect the assembled prompts directly
//!    without calling a real completion service, making prompt regressions
//!    easy to catch.
//!
//! The enums parse *lossily*: an unknown or missing value silently falls back
//! to the documented default rather than erroring, so a client sending a
//! misspelled option still gets a sensible post.

/// Writing tone for the generated post. Default: [`Tone::Professional`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    Casual,
    #[default]
    Professional,
    Educational,
    Technical,
}

impl Tone {
    /// Parse an optional client-supplied string, falling back to the default.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("casual") => Tone::Casual,
            Some("professional") => Tone::Professional,
            Some("educational") => Tone::Educational,
            Some("technical") => Tone::Technical,
            _ => Tone::default(),
        }
    }

    /// The instruction sentence appended to the system prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            Tone::Casual => {
                "Use a casual, conversational tone that's friendly and approachable."
            }
            Tone::Professional => {
                "Maintain a professional and formal tone suitable for business contexts."
            }
            Tone::Educational => {
                "Use an instructive tone that focuses on clear explanations and learning."
            }
            Tone::Technical => {
                "Employ a detailed technical tone with precise terminology and in-depth explanations."
            }
        }
    }
}

/// Intended readership. Default: [`Audience::Developers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Audience {
    #[default]
    Developers,
    Managers,
    Enthusiasts,
    Beginners,
}

impl Audience {
    /// Parse an optional client-supplied string, falling back to the default.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("developers") => Audience::Developers,
            Some("managers") => Audience::Managers,
            Some("enthusiasts") => Audience::Enthusiasts,
            Some("beginners") => Audience::Beginners,
            _ => Audience::default(),
        }
    }

    /// The instruction sentence appended to the system prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            Audience::Developers => {
                "Target software developers with appropriate technical depth and code examples."
            }
            Audience::Managers => {
                "Target technical managers and decision-makers, focusing on high-level concepts and business value."
            }
            Audience::Enthusiasts => {
                "Target tech enthusiasts with a balance of technical details and accessible explanations."
            }
            Audience::Beginners => {
                "Target beginners with clear explanations and minimal technical jargon."
            }
        }
    }
}

/// Structural style of the post. Default: [`Style::Overview`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    Tutorial,
    #[default]
    Overview,
    Technical,
    Storytelling,
}

impl Style {
    /// Parse an optional client-supplied string, falling back to the default.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("tutorial") => Style::Tutorial,
            Some("overview") => Style::Overview,
            Some("technical") => Style::Technical,
            Some("storytelling") => Style::Storytelling,
            _ => Style::default(),
        }
    }

    /// The instruction sentence appended to the system prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            Style::Tutorial => {
                "Structure the post as a step-by-step tutorial with clear instructions and examples."
            }
            Style::Overview => {
                "Present a high-level overview with key concepts and insights."
            }
            Style::Technical => {
                "Create a detailed technical analysis with in-depth explanations."
            }
            Style::Storytelling => {
                "Use a narrative approach to explain the technical content through a story."
            }
        }
    }
}

// ── System prompt fragments ──────────────────────────────────────────────

/// Opening of the system prompt for initial generation.
///
/// The model is asked to *write* a post, not to reformat the notes: an
/// introduction, organised sections with examples, and a closing call to
/// action, all in HTML.
pub const GENERATE_SYSTEM_PREAMBLE: &str = "You are a professional technical writer who creates engaging and informative blog posts from README files and developer notes.\n\
Write a complete blog post, not a reformatting of the input: open with an introduction, organize the material into clear sections with examples, and close with a conclusion that includes a call to action.\n\
Format your response in HTML with proper tags and structure.";

/// Closing of the system prompt for initial generation, covering images.
pub const GENERATE_SYSTEM_IMAGES: &str = "When image URLs are provided, include them in the blog post using appropriate HTML img tags with responsive classes.\n\
Place images in relevant sections to enhance the content.";

/// Opening of the system prompt for revision mode.
pub const REVISE_SYSTEM_PREAMBLE: &str = "You are a professional technical writer who helps revise blog posts.\n\
Review the current blog post and make the requested changes while maintaining the overall structure and quality.";

/// Closing of the system prompt for revision mode.
pub const REVISE_SYSTEM_SUFFIX: &str = "Return the complete revised post in HTML format with proper tags and structure.\n\
If images were previously included, maintain them in appropriate positions.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_parses_known_values() {
        assert_eq!(Tone::parse(Some("casual")), Tone::Casual);
        assert_eq!(Tone::parse(Some("technical")), Tone::Technical);
    }

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        assert_eq!(Tone::parse(Some("sarcastic")), Tone::Professional);
        assert_eq!(Audience::parse(Some("cats")), Audience::Developers);
        assert_eq!(Style::parse(Some("haiku")), Style::Overview);
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        assert_eq!(Tone::parse(None), Tone::Professional);
        assert_eq!(Audience::parse(None), Audience::Developers);
        assert_eq!(Style::parse(None), Style::Overview);
    }

    #[test]
    fn every_option_has_a_distinct_instruction() {
        let tones = [
            Tone::Casual,
            Tone::Professional,
            Tone::Educational,
            Tone::Technical,
        ];
        for pair in tones.windows(2) {
            assert_ne!(pair[0].instruction(), pair[1].instruction());
        }
        assert!(Audience::Beginners.instruction().contains("jargon"));
        assert!(Style::Storytelling.instruction().contains("story"));
    }
}
