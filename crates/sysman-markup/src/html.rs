//! HTML output for blocks and inline spans.

use std::fmt::Write;

use crate::block::Block;
use crate::inline::{InlineError, InlineSpan, ParseMode, parse_inline};

/// Escape text content: `&`, `<` and `>`.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a double-quoted attribute value.
pub(crate) fn escape_attr(s: &str) -> String {
    escape_html(s).replace('"', "&quot;")
}

/// Append rendered spans to `out`.
pub fn push_spans(spans: &[InlineSpan], out: &mut String) {
    for span in spans {
        match span {
            InlineSpan::Literal(text) => out.push_str(text),
            InlineSpan::CodeSpan(text) => {
                write!(out, r#"<span class="code">{text}</span>"#).unwrap();
            }
            InlineSpan::RefSpan(text) => {
                write!(out, r#"<span class="ref">{text}</span>"#).unwrap();
            }
            InlineSpan::CrossRef { title, chapter } => {
                write!(
                    out,
                    r#"<a href="{}.{}.html">{}({})</a>"#,
                    escape_attr(title),
                    escape_attr(chapter),
                    escape_html(title),
                    escape_html(chapter)
                )
                .unwrap();
            }
        }
    }
}

/// Append one block as an HTML element.
pub(crate) fn push_block(block: &Block, out: &mut String) -> Result<(), InlineError> {
    match block {
        Block::Heading1(text) => {
            writeln!(out, "<h1>{}</h1>", escape_html(text)).unwrap();
        }
        Block::Heading2(text) => {
            writeln!(out, "<h2>{}</h2>", escape_html(text)).unwrap();
        }
        Block::ListItem(source) => {
            out.push_str("<ul><li>");
            push_spans(&parse_inline(source, ParseMode::Paragraph)?, out);
            out.push_str("</li></ul>\n");
        }
        Block::CodeBlock(code) => {
            out.push_str(r#"<pre class="code">"#);
            push_spans(&parse_inline(code, ParseMode::Code)?, out);
            out.push_str("</pre>\n");
        }
        Block::Paragraph(source) => {
            out.push_str("<p>");
            push_spans(&parse_inline(source, ParseMode::Paragraph)?, out);
            out.push_str("</p>\n");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(block: &Block) -> String {
        let mut out = String::new();
        push_block(block, &mut out).unwrap();
        out
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("\"quoted\""), "\"quoted\"");
    }

    #[test]
    fn test_escape_attr_quotes() {
        assert_eq!(escape_attr("a\"b"), "a&quot;b");
    }

    #[test]
    fn test_paragraph_example() {
        let html = render(&Block::Paragraph(
            "*stat*('path') returns info; see [ls.1]".to_owned(),
        ));
        assert_eq!(
            html,
            "<p><span class=\"code\">stat</span>(<span class=\"ref\">path</span>) \
             returns info; see <a href=\"ls.1.html\">ls(1)</a></p>\n"
        );
    }

    #[test]
    fn test_headings_are_escaped() {
        assert_eq!(render(&Block::Heading1("A<B".to_owned())), "<h1>A&lt;B</h1>\n");
        assert_eq!(render(&Block::Heading2("Notes".to_owned())), "<h2>Notes</h2>\n");
    }

    #[test]
    fn test_list_item() {
        assert_eq!(
            render(&Block::ListItem("see [cat.1]".to_owned())),
            "<ul><li>see <a href=\"cat.1.html\">cat(1)</a></li></ul>\n"
        );
    }

    #[test]
    fn test_code_block_uses_code_mode() {
        assert_eq!(
            render(&Block::CodeBlock("int *p;\nopen('path');".to_owned())),
            "<pre class=\"code\">int *p;\nopen(<span class=\"ref\">path</span>);</pre>\n"
        );
    }

    #[test]
    fn test_unterminated_span_propagates() {
        let mut out = String::new();
        let result = push_block(&Block::Paragraph("*open".to_owned()), &mut out);
        assert!(result.is_err());
    }

    #[test]
    fn test_cross_ref_target_is_escaped() {
        let mut out = String::new();
        push_spans(
            &[InlineSpan::CrossRef {
                title: "a<b".to_owned(),
                chapter: "1".to_owned(),
            }],
            &mut out,
        );
        assert_eq!(out, "<a href=\"a&lt;b.1.html\">a&lt;b(1)</a>");
    }
}
