//! Export dispatch: pick a converter and a download filename per format.

use crate::error::BlogsmithError;
use crate::pipeline::{markdown, react};

/// The three supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Html,
    React,
}

impl ExportFormat {
    /// Parse a client-supplied format string.
    ///
    /// Unlike the tone/audience/style options, an unknown format is an error:
    /// silently exporting the wrong format would hand the user a mislabelled
    /// file.
    pub fn parse(value: &str) -> Result<Self, BlogsmithError> {
        match value {
            "markdown" => Ok(ExportFormat::Markdown),
            "html" => Ok(ExportFormat::Html),
            "react" => Ok(ExportFormat::React),
            other => Err(BlogsmithError::InvalidFormat {
                format: other.to_string(),
            }),
        }
    }

    /// Fixed download filename for this format.
    pub fn filename(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "blog-post.md",
            ExportFormat::Html => "blog-post.html",
            ExportFormat::React => "BlogPost.jsx",
        }
    }
}

/// A converted post ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub content: String,
    pub filename: String,
}

/// Convert a generated post into the requested export format.
///
/// HTML is identity (the post is already HTML); Markdown and React delegate
/// to their converters.
pub fn export_post(content: &str, format: ExportFormat) -> ExportFile {
    let converted = match format {
        ExportFormat::Markdown => markdown::to_markdown(content),
        ExportFormat::Html => content.to_string(),
        ExportFormat::React => react::to_react_stub(content),
    };
    ExportFile {
        content: converted,
        filename: format.filename().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_is_a_validation_error() {
        let err = ExportFormat::parse("bogus").unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn html_is_identity() {
        let file = export_post("<h1>x</h1>", ExportFormat::Html);
        assert_eq!(file.content, "<h1>x</h1>");
        assert_eq!(file.filename, "blog-post.html");
    }

    #[test]
    fn markdown_delegates_to_converter() {
        let file = export_post("<h1>x</h1>", ExportFormat::Markdown);
        assert_eq!(file.content, "# x");
        assert_eq!(file.filename, "blog-post.md");
    }

    #[test]
    fn react_wraps_and_names_component_file() {
        let file = export_post("<p>x</p>", ExportFormat::React);
        assert!(file.content.contains("<p>x</p>"));
        assert_eq!(file.filename, "BlogPost.jsx");
    }
}
