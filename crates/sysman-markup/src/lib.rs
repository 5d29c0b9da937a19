//! Manual page markup parsing and HTML rendering.
//!
//! A manual page is plain text with a handful of line and inline markers.
//! Rendering happens in two stages:
//!
//! 1. [`structure`] groups lines into [`Block`]s (headings, list items, code
//!    blocks, paragraphs).
//! 2. [`parse_inline`] turns the text of each block into [`InlineSpan`]s, which
//!    are written out as HTML inside a fixed document shell.
//!
//! [`render_page`] runs both stages for one page.
//!
//! # Example
//!
//! ```
//! use sysman_markup::render_page;
//!
//! let html = render_page("cat", 1, &["Concatenates files; see [ls.1]."]).unwrap();
//! assert!(html.contains(r#"<a href="ls.1.html">ls(1)</a>"#));
//! ```

mod block;
mod cursor;
mod document;
mod html;
mod inline;
mod renderer;

pub use block::{Block, BlockNode, Diagnostic, Structure, structure, structure_with_diagnostics};
pub use document::{MANUAL_NAME, STYLESHEET, document_end, document_start};
pub use html::{escape_html, push_spans};
pub use inline::{Delimiter, InlineError, InlineSpan, ParseMode, parse_inline};
pub use renderer::{RenderError, page_title, render_page};
