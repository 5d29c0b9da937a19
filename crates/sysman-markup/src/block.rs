//! Block structure of a manual page.
//!
//! Groups raw source lines into headings, list items, code blocks and
//! paragraphs. Line markers:
//!
//! | Prefix | Block |
//! |--------|-------|
//! | `>>`   | [`Block::Heading2`] |
//! | `>`    | [`Block::Heading1`] |
//! | `\*`   | [`Block::ListItem`] |
//! | tab    | [`Block::CodeBlock`], continued by following tab lines |
//! | other  | [`Block::Paragraph`] |
//!
//! Empty lines separate blocks and produce nothing.

/// A structural unit of a manual page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Raw heading text. Rendered entity-escaped, with no inline markup.
    Heading1(String),
    /// Raw subheading text. Rendered entity-escaped, with no inline markup.
    Heading2(String),
    /// Inline source of a bullet item, marker removed.
    ListItem(String),
    /// Code lines with one leading tab stripped each, joined by newlines.
    CodeBlock(String),
    /// Inline source of a single-line paragraph.
    Paragraph(String),
}

/// A block together with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub line: usize,
    pub block: Block,
}

/// Non-fatal observation made while structuring a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A code block was ended by a content line instead of an empty line.
    CodeBlockNotSeparated { line: usize },
}

/// Blocks of a page plus any diagnostics raised while building them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Structure {
    pub nodes: Vec<BlockNode>,
    pub diagnostics: Vec<Diagnostic>,
}

const HEADING2_MARKER: &str = ">>";
const HEADING1_MARKER: &str = ">";
const LIST_MARKER: &str = "\\*";
const CODE_MARKER: char = '\t';

/// Line cursor with one line of lookahead.
///
/// Exhaustion is reported as `None` from [`LineCursor::peek`]; the code
/// block scanner inspects a line with `peek` and only consumes it with
/// [`LineCursor::advance`] when it belongs to the block, so the first
/// non-code line is left for the next block.
struct LineCursor<'a, S> {
    lines: &'a [S],
    index: usize,
}

impl<'a, S: AsRef<str>> LineCursor<'a, S> {
    fn new(lines: &'a [S]) -> Self {
        Self { lines, index: 0 }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.index).map(|line| line.as_ref())
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    /// 1-based number of the line under the cursor.
    fn line_number(&self) -> usize {
        self.index + 1
    }
}

/// Structure page lines into blocks.
///
/// # Examples
///
/// ```
/// use sysman_markup::{Block, structure};
///
/// let blocks = structure(&[">NAME", "", "\tls -l", "\tls -a", "Lists files."]);
/// assert_eq!(
///     blocks,
///     vec![
///         Block::Heading1("NAME".to_owned()),
///         Block::CodeBlock("ls -l\nls -a".to_owned()),
///         Block::Paragraph("Lists files.".to_owned()),
///     ]
/// );
/// ```
pub fn structure<S: AsRef<str>>(lines: &[S]) -> Vec<Block> {
    structure_with_diagnostics(lines)
        .nodes
        .into_iter()
        .map(|node| node.block)
        .collect()
}

/// Structure page lines into located blocks and collect diagnostics.
pub fn structure_with_diagnostics<S: AsRef<str>>(lines: &[S]) -> Structure {
    let mut cursor = LineCursor::new(lines);
    let mut structure = Structure::default();

    while let Some(line) = cursor.peek() {
        let line_number = cursor.line_number();
        cursor.advance();

        let block = if let Some(rest) = line.strip_prefix(HEADING2_MARKER) {
            Block::Heading2(rest.to_owned())
        } else if let Some(rest) = line.strip_prefix(HEADING1_MARKER) {
            Block::Heading1(rest.to_owned())
        } else if let Some(rest) = line.strip_prefix(LIST_MARKER) {
            Block::ListItem(rest.to_owned())
        } else if let Some(rest) = line.strip_prefix(CODE_MARKER) {
            Block::CodeBlock(collect_code(rest, &mut cursor, &mut structure.diagnostics))
        } else if line.is_empty() {
            continue;
        } else {
            Block::Paragraph(line.to_owned())
        };

        structure.nodes.push(BlockNode {
            line: line_number,
            block,
        });
    }

    structure
}

/// Consume the continuation lines of a code block whose first line is `first`.
fn collect_code<S: AsRef<str>>(
    first: &str,
    cursor: &mut LineCursor<'_, S>,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    let mut code = first.to_owned();

    while let Some(line) = cursor.peek() {
        let Some(rest) = line.strip_prefix(CODE_MARKER) else {
            if !line.is_empty() {
                diagnostics.push(Diagnostic::CodeBlockNotSeparated {
                    line: cursor.line_number(),
                });
            }
            break;
        };
        code.push('\n');
        code.push_str(rest);
        cursor.advance();
    }

    code
}
