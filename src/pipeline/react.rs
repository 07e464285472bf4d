//! React component stub export.
//!
//! Best-effort scaffold, not a safe templating system: the generated HTML is
//! inlined into the component body unmodified, with no escaping or
//! validation. The output is a starting point for someone pasting the post
//! into a React codebase, nothing more.

/// Wrap generated HTML in a minimal React component.
pub fn to_react_stub(html: &str) -> String {
    format!(
        r#"import React from 'react';

export default function BlogPost() {{
  return (
    <article className="prose lg:prose-xl mx-auto">
      {html}
    </article>
  );
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_content_in_component() {
        let stub = to_react_stub("<h1>Hello</h1>");
        assert!(stub.starts_with("import React from 'react';"));
        assert!(stub.contains("export default function BlogPost()"));
        assert!(stub.contains("<h1>Hello</h1>"));
        assert!(stub.contains(r#"<article className="prose lg:prose-xl mx-auto">"#));
    }

    #[test]
    fn content_is_not_escaped() {
        let stub = to_react_stub(r#"<p class="x">a & b</p>"#);
        assert!(stub.contains(r#"<p class="x">a & b</p>"#));
    }
}
