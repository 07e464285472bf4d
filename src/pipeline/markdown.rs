//! HTML to Markdown conversion for post export.
//!
//! ## Why a tokenizer instead of regex substitution?
//!
//! The obvious implementation is an ordered list of regex rewrites, one per
//! tag. That approach is fragile: non-greedy matches break on nested tags of
//! the same kind, and every new rule has to be slotted into exactly the right
//! position so it does not re-match text introduced by an earlier rule. This
//! module walks the input once with a small hand-written tag scanner instead,
//! while producing the same output as the rewrite rules for the supported tag
//! subset.
//!
//! ## Supported mappings
//!
//! | HTML | Markdown |
//! |------|----------|
//! | `<h1…>x</h1>` … `<h3…>x</h3>` | `# x` … `### x` (blank line after) |
//! | `<p…>x</p>` | `x` (blank line after) |
//! | `<ul…>` / `</ul>` | removed |
//! | `<li…>x</li>` | `- x` |
//! | `<strong>x</strong>` | `**x**` |
//! | `<em>x</em>` | `*x*` |
//! | `<code>x</code>` | `` `x` `` |
//! | `<pre…><code…>x</code></pre>` | fenced code block (content may span lines) |
//! | `&lt;` `&gt;` `&amp;` | `<` `>` `&` (final pass, in that order) |
//!
//! A `<pre><code>…</code></pre>` element always fences, even when it sits on
//! a single line — the bare-`<code>` inline rule never fires inside a `<pre>`
//! block. Code content is emitted as-is; only the entity pass applies to it.
//!
//! Everything else passes through verbatim — there is no generic tag
//! stripping, and no attempt to handle arbitrary HTML dialects. Tag names are
//! case-sensitive; attributes are skipped up to the first `>` on the same
//! line. Paired tags convert only when the whole element sits on one line
//! (fenced code blocks excepted); converted containers have their inner
//! content converted recursively, so `<li><strong>x</strong></li>` becomes
//! `- **x**`.

/// Convert generated HTML to Markdown.
///
/// Pure and total: unmatched or unsupported markup passes through unchanged,
/// so the function never fails. The result is trimmed of leading and trailing
/// whitespace.
pub fn to_markdown(html: &str) -> String {
    let converted = convert_fragment(html);
    unescape_entities(&converted).trim().to_string()
}

/// One pass over a fragment, converting supported tags as they appear.
fn convert_fragment(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input.as_bytes()[i] == b'<' {
            if let Some((emitted, consumed)) = convert_tag(&input[i..]) {
                out.push_str(&emitted);
                i += consumed;
            } else {
                out.push('<');
                i += 1;
            }
        } else {
            let next = input[i..]
                .find('<')
                .map(|offset| i + offset)
                .unwrap_or(input.len());
            out.push_str(&input[i..next]);
            i = next;
        }
    }
    out
}

/// A scanned tag: `<name attrs>` or `</name>`.
struct Tag<'a> {
    name: &'a str,
    closing: bool,
    has_attrs: bool,
    /// Byte length of the tag text itself, `<` through `>` inclusive.
    len: usize,
}

/// Parse a tag at the start of `s` (which begins with `<`).
///
/// Attributes run to the first `>` and may not span lines. Returns `None`
/// when the text is not a tag at all, in which case the caller emits the `<`
/// literally.
fn parse_tag(s: &str) -> Option<Tag<'_>> {
    let rest = s.strip_prefix('<')?;
    let (closing, body) = match rest.strip_prefix('/') {
        Some(after) => (true, after),
        None => (false, rest),
    };
    let name_len = body
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if name_len == 0 {
        return None;
    }
    let after_name = &body[name_len..];
    let gt = after_name.find('>')?;
    let attrs = &after_name[..gt];
    if attrs.contains('\n') {
        return None;
    }
    let prefix = if closing { 2 } else { 1 };
    Some(Tag {
        name: &body[..name_len],
        closing,
        has_attrs: !attrs.is_empty(),
        len: prefix + name_len + gt + 1,
    })
}

/// Convert the tag at the start of `s`, returning the emitted text and the
/// number of input bytes consumed. Unsupported tags are emitted verbatim.
fn convert_tag(s: &str) -> Option<(String, usize)> {
    let tag = parse_tag(s)?;
    let verbatim = || Some((s[..tag.len].to_string(), tag.len));

    if tag.closing {
        // Only </ul> has a rule of its own; stray close tags pass through.
        return if tag.name == "ul" {
            Some((String::new(), tag.len))
        } else {
            verbatim()
        };
    }

    match tag.name {
        "ul" => Some((String::new(), tag.len)),
        "h1" => convert_paired(s, &tag, |inner| format!("# {inner}\n\n")).or_else(verbatim),
        "h2" => convert_paired(s, &tag, |inner| format!("## {inner}\n\n")).or_else(verbatim),
        "h3" => convert_paired(s, &tag, |inner| format!("### {inner}\n\n")).or_else(verbatim),
        "p" => convert_paired(s, &tag, |inner| format!("{inner}\n\n")).or_else(verbatim),
        "li" => convert_paired(s, &tag, |inner| format!("- {inner}\n")).or_else(verbatim),
        "strong" if !tag.has_attrs => {
            convert_paired(s, &tag, |inner| format!("**{inner}**")).or_else(verbatim)
        }
        "em" if !tag.has_attrs => {
            convert_paired(s, &tag, |inner| format!("*{inner}*")).or_else(verbatim)
        }
        "code" if !tag.has_attrs => {
            convert_paired(s, &tag, |inner| format!("`{inner}`")).or_else(verbatim)
        }
        "pre" => convert_code_block(s, &tag).or_else(verbatim),
        _ => verbatim(),
    }
}

/// Convert a paired element whose close tag sits on the same line.
///
/// The content runs to the *first* matching close tag, mirroring non-greedy
/// matching; the inner content is converted recursively before rendering.
fn convert_paired(
    s: &str,
    tag: &Tag<'_>,
    render: impl Fn(&str) -> String,
) -> Option<(String, usize)> {
    let close = format!("</{}>", tag.name);
    let rest = &s[tag.len..];
    let close_pos = rest.find(&close)?;
    let inner = &rest[..close_pos];
    if inner.contains('\n') {
        return None;
    }
    let rendered = render(&convert_fragment(inner));
    Some((rendered, tag.len + close_pos + close.len()))
}

/// Convert `<pre…><code…>…</code></pre>` to a fenced code block.
///
/// The `<code…>` tag must directly follow `<pre…>`, and the content — which
/// may span lines — runs to the first `</code></pre>` sequence. Code content
/// is emitted as-is (no inner conversion); entity unescaping still applies in
/// the final pass.
fn convert_code_block(s: &str, pre: &Tag<'_>) -> Option<(String, usize)> {
    const CLOSE: &str = "</code></pre>";
    let rest = &s[pre.len..];
    let code = parse_tag(rest).filter(|t| t.name == "code" && !t.closing)?;
    let body = &rest[code.len..];
    let end = body.find(CLOSE)?;
    let content = &body[..end];
    Some((
        format!("```\n{content}\n```\n"),
        pre.len + code.len + end + CLOSE.len(),
    ))
}

/// Final pass: unescape the three entities the generator produces, in a fixed
/// order so `&amp;lt;` decodes to `&lt;` and not `<`.
fn unescape_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_map_to_hash_prefixes() {
        assert_eq!(to_markdown("<h1>Hi</h1>"), "# Hi");
        assert_eq!(to_markdown("<h2>Sub</h2>"), "## Sub");
        assert_eq!(to_markdown("<h3>Deep</h3>"), "### Deep");
    }

    #[test]
    fn headings_keep_blank_line_between_blocks() {
        assert_eq!(
            to_markdown("<h1>Title</h1><p>Body</p>"),
            "# Title\n\nBody"
        );
    }

    #[test]
    fn paragraph_attributes_are_dropped() {
        assert_eq!(to_markdown(r#"<p class="lead">intro</p>"#), "intro");
    }

    #[test]
    fn lists_become_dashes() {
        assert_eq!(
            to_markdown("<ul><li>one</li><li>two</li></ul>"),
            "- one\n- two"
        );
    }

    #[test]
    fn inline_emphasis() {
        assert_eq!(to_markdown("<strong>bold</strong>"), "**bold**");
        assert_eq!(to_markdown("<em>it</em>"), "*it*");
        assert_eq!(to_markdown("<code>x + 1</code>"), "`x + 1`");
    }

    #[test]
    fn disjoint_inline_tags_are_order_independent() {
        assert_eq!(to_markdown("<strong>a</strong><em>b</em>"), "**a***b*");
    }

    #[test]
    fn nested_inline_inside_list_item() {
        assert_eq!(
            to_markdown("<li><strong>key</strong>: value</li>"),
            "- **key**: value"
        );
    }

    #[test]
    fn multiline_code_block_becomes_fence() {
        let html = "<pre><code>let x = 1;\nlet y = x + 1;</code></pre>";
        assert_eq!(to_markdown(html), "```\nlet x = 1;\nlet y = x + 1;\n```");
    }

    #[test]
    fn single_line_code_block_still_fences() {
        // The inline <code> rule never applies inside a <pre> block.
        assert_eq!(
            to_markdown("<pre><code>let x = 1;</code></pre>"),
            "```\nlet x = 1;\n```"
        );
    }

    #[test]
    fn code_block_with_attributes() {
        let html = r#"<pre class="hl"><code class="language-rust">fn main() {}
</code></pre>"#;
        let result = to_markdown(html);
        assert!(result.starts_with("```\nfn main() {}"));
        assert!(result.ends_with("```"));
    }

    #[test]
    fn entities_unescape_in_order() {
        assert_eq!(to_markdown("&lt;div&gt;"), "<div>");
        // Double-escaped entities decode exactly one level.
        assert_eq!(to_markdown("&amp;lt;"), "&lt;");
        assert_eq!(to_markdown("a &amp;&amp; b"), "a && b");
    }

    #[test]
    fn unknown_tags_pass_through_verbatim() {
        assert_eq!(
            to_markdown(r#"<div class="x">kept</div>"#),
            r#"<div class="x">kept</div>"#
        );
        assert_eq!(
            to_markdown(r#"<img src="/uploads/a.png" alt="a">"#),
            r#"<img src="/uploads/a.png" alt="a">"#
        );
    }

    #[test]
    fn unclosed_supported_tag_passes_through() {
        assert_eq!(to_markdown("<h1>never closed"), "<h1>never closed");
        assert_eq!(to_markdown("stray close</h1>"), "stray close</h1>");
    }

    #[test]
    fn multiline_paragraph_passes_through() {
        // The element must sit on one line to convert; otherwise the tags stay.
        let html = "<p>first\nsecond</p>";
        assert_eq!(to_markdown(html), html);
    }

    #[test]
    fn attributed_strong_passes_through() {
        let html = r#"<strong class="x">a</strong>"#;
        assert_eq!(to_markdown(html), html);
    }

    #[test]
    fn idempotent_on_plain_markdown() {
        let markdown = "# Title\n\nSome text with **bold** and `code`.\n\n- a\n- b";
        assert_eq!(to_markdown(markdown), markdown);
    }

    #[test]
    fn result_is_trimmed() {
        assert_eq!(to_markdown("  <p>x</p>  "), "x");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(to_markdown(""), "");
    }

    #[test]
    fn full_post_conversion() {
        let html = "<h1>My Project</h1>\
<p>An <em>example</em> project.</p>\
<h2>Usage</h2>\
<ul><li>Install with <code>cargo install</code></li><li>Run it</li></ul>\
<pre><code>cargo run\n--release</code></pre>";
        let expected = "# My Project\n\nAn *example* project.\n\n\
## Usage\n\n- Install with `cargo install`\n- Run it\n\
```\ncargo run\n--release\n```";
        assert_eq!(to_markdown(html), expected);
    }
}
