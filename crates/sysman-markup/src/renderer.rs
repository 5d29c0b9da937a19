//! Page rendering: block structure plus inline spans inside the document shell.

use crate::block::{Diagnostic, structure_with_diagnostics};
use crate::document::{MANUAL_NAME, document_end, document_start};
use crate::html::push_block;
use crate::inline::InlineError;

/// Error returned when a page cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct RenderError {
    /// 1-based line where the failing block starts.
    pub line: usize,
    #[source]
    pub source: InlineError,
}

/// Document title of a manual page, e.g. `ls(1) - GLIDIX MANUAL`.
pub fn page_title(title: &str, chapter: u8) -> String {
    format!("{title}({chapter}) - {MANUAL_NAME}")
}

/// Render the source lines of one manual page into a complete HTML document.
///
/// Diagnostics raised while structuring the page are logged as warnings and
/// never fail the render.
///
/// # Examples
///
/// ```
/// use sysman_markup::render_page;
///
/// let html = render_page("ls", 1, &[">NAME", "ls - list files"]).unwrap();
/// assert!(html.contains("<title>ls(1) - GLIDIX MANUAL</title>"));
/// assert!(html.contains("<h1>NAME</h1>"));
/// assert!(html.contains("<p>ls - list files</p>"));
/// ```
pub fn render_page<S: AsRef<str>>(
    title: &str,
    chapter: u8,
    lines: &[S],
) -> Result<String, RenderError> {
    let structure = structure_with_diagnostics(lines);

    for diagnostic in &structure.diagnostics {
        match diagnostic {
            Diagnostic::CodeBlockNotSeparated { line } => {
                tracing::warn!(
                    page = %title,
                    chapter,
                    line,
                    "Code blocks should end with an empty line"
                );
            }
        }
    }

    let mut html = String::with_capacity(4096);
    document_start(&page_title(title, chapter), &mut html);
    for node in &structure.nodes {
        push_block(&node.block, &mut html).map_err(|source| RenderError {
            line: node.line,
            source,
        })?;
    }
    document_end(&mut html);

    Ok(html)
}
