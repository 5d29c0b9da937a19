//! Inline span parsing.
//!
//! Scans one line of markup (or the joined text of a code block) left to
//! right and produces typed [`InlineSpan`]s:
//!
//! - `\X` emits `X` verbatim, consuming exactly two characters
//! - `&`, `<`, `>` become `&amp;`, `&lt;`, `&gt;`
//! - `*text*` is a code span (paragraph mode only)
//! - `'text'` is a reference span
//! - `[page.chapter]` is a cross-reference link (paragraph mode only)
//!
//! Text-bearing spans carry HTML-ready text: entities are already applied.
//! Cross-references carry the raw target components and are escaped when
//! rendered.

use std::fmt;

use crate::cursor::Cursor;

/// Delimiter set in effect while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Body text: code spans, reference spans and cross-references.
    Paragraph,
    /// Code block text: only escapes, entities and reference spans.
    Code,
}

/// A typed fragment of rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    /// Plain text, already entity-escaped.
    Literal(String),
    /// `*text*`, rendered in the code style.
    CodeSpan(String),
    /// `'text'`, rendered in the reference style.
    RefSpan(String),
    /// `[title.chapter]`, a link to another manual page.
    CrossRef { title: String, chapter: String },
}

/// The construct whose delimiter was left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Escape,
    CodeSpan,
    RefSpan,
    CrossRef,
}

impl Delimiter {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Escape => "\\",
            Self::CodeSpan => "*",
            Self::RefSpan => "'",
            Self::CrossRef => "[",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when inline markup cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InlineError {
    /// A span was opened but the input ended before its closing delimiter.
    #[error("unterminated `{delimiter}` opened at offset {offset}")]
    UnterminatedSpan { delimiter: Delimiter, offset: usize },
    /// A cross-reference has no `.` separating title and chapter.
    #[error("malformed cross-reference `[{reference}]` at offset {offset}")]
    MalformedCrossRef { reference: String, offset: usize },
}

/// Parse inline markup into spans.
///
/// Adjacent plain characters and entities are merged into a single
/// [`InlineSpan::Literal`]. Each escape produces its own one-character
/// literal.
///
/// # Examples
///
/// ```
/// use sysman_markup::{InlineSpan, ParseMode, parse_inline};
///
/// let spans = parse_inline("see [ls.1]", ParseMode::Paragraph).unwrap();
/// assert_eq!(
///     spans,
///     vec![
///         InlineSpan::Literal("see ".to_owned()),
///         InlineSpan::CrossRef { title: "ls".to_owned(), chapter: "1".to_owned() },
///     ]
/// );
/// ```
pub fn parse_inline(text: &str, mode: ParseMode) -> Result<Vec<InlineSpan>, InlineError> {
    let mut cur = Cursor::new(text);
    let mut out = Vec::new();
    let mut pending = String::new();

    while let Some(c) = cur.peek() {
        match c {
            '\\' => {
                let start = cur.pos();
                cur.bump();
                let Some(escaped) = cur.bump() else {
                    return Err(InlineError::UnterminatedSpan {
                        delimiter: Delimiter::Escape,
                        offset: start,
                    });
                };
                flush(&mut out, &mut pending);
                out.push(InlineSpan::Literal(escaped.to_string()));
            }
            '*' if mode == ParseMode::Paragraph => {
                flush(&mut out, &mut pending);
                let inner = scan_enclosed(&mut cur, '*', Delimiter::CodeSpan)?;
                out.push(InlineSpan::CodeSpan(inner));
            }
            '\'' => {
                flush(&mut out, &mut pending);
                let inner = scan_enclosed(&mut cur, '\'', Delimiter::RefSpan)?;
                out.push(InlineSpan::RefSpan(inner));
            }
            '[' if mode == ParseMode::Paragraph => {
                flush(&mut out, &mut pending);
                out.push(scan_cross_ref(&mut cur)?);
            }
            _ => {
                cur.bump();
                push_escaped(&mut pending, c);
            }
        }
    }

    flush(&mut out, &mut pending);
    Ok(out)
}

/// Emit accumulated plain text as one literal.
fn flush(out: &mut Vec<InlineSpan>, pending: &mut String) {
    if !pending.is_empty() {
        out.push(InlineSpan::Literal(std::mem::take(pending)));
    }
}

/// Scan a span opened at the cursor and closed by `close`.
///
/// The inner text goes through escapes and entities only; no other markup
/// is recognised inside it.
fn scan_enclosed(
    cur: &mut Cursor<'_>,
    close: char,
    delimiter: Delimiter,
) -> Result<String, InlineError> {
    let start = cur.pos();
    let unterminated = InlineError::UnterminatedSpan {
        delimiter,
        offset: start,
    };
    cur.bump();

    let mut inner = String::new();
    loop {
        match cur.bump() {
            None => return Err(unterminated),
            Some(c) if c == close => return Ok(inner),
            Some('\\') => match cur.bump() {
                Some(escaped) => inner.push(escaped),
                None => return Err(unterminated),
            },
            Some(c) => push_escaped(&mut inner, c),
        }
    }
}

/// Scan a `[title.chapter]` cross-reference opened at the cursor.
fn scan_cross_ref(cur: &mut Cursor<'_>) -> Result<InlineSpan, InlineError> {
    let start = cur.pos();
    cur.bump();

    let Some(end) = cur.find(']') else {
        return Err(InlineError::UnterminatedSpan {
            delimiter: Delimiter::CrossRef,
            offset: start,
        });
    };
    let reference = cur.slice(cur.pos(), end);
    cur.seek(end + 1);

    match reference.rsplit_once('.') {
        Some((title, chapter)) => Ok(InlineSpan::CrossRef {
            title: title.to_owned(),
            chapter: chapter.to_owned(),
        }),
        None => Err(InlineError::MalformedCrossRef {
            reference: reference.to_owned(),
            offset: start,
        }),
    }
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(c),
    }
}
