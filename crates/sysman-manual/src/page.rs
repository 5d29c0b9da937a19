//! Manual page sources.
//!
//! A page source file is named `<title>.<chapter>`, where the chapter is a
//! single digit from 1 to 6. The title is everything before the last `.`,
//! matching how `[title.chapter]` cross-references are split.

use std::fs;
use std::path::Path;

use sysman_markup::render_page;

use crate::chapter::Chapter;
use crate::error::PageError;

/// One manual entry loaded from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    title: String,
    chapter: Chapter,
    lines: Vec<String>,
}

/// Split a page file name into title and chapter.
///
/// # Examples
///
/// ```
/// use sysman_manual::parse_page_file_name;
///
/// let (title, chapter) = parse_page_file_name("open.2").unwrap();
/// assert_eq!(title, "open");
/// assert_eq!(chapter.caption(), "System calls and library functions");
///
/// assert!(parse_page_file_name("bad.9").is_err());
/// ```
pub fn parse_page_file_name(file_name: &str) -> Result<(String, Chapter), PageError> {
    let invalid = || PageError::InvalidPageFilename(file_name.to_owned());

    let (title, suffix) = file_name.rsplit_once('.').ok_or_else(invalid)?;
    if title.is_empty() {
        return Err(invalid());
    }

    let mut chars = suffix.chars();
    let digit = match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_digit(10).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };
    // to_digit(10) is at most 9
    let number = u8::try_from(digit).map_err(|_| invalid())?;

    let chapter = Chapter::new(number).ok_or_else(|| PageError::InvalidChapterNumber {
        file_name: file_name.to_owned(),
        chapter: number,
    })?;

    Ok((title.to_owned(), chapter))
}

impl Page {
    /// Build a page from its file name and source text.
    pub fn from_source(file_name: &str, source: &str) -> Result<Self, PageError> {
        let (title, chapter) = parse_page_file_name(file_name)?;
        Ok(Self {
            title,
            chapter,
            lines: source.lines().map(str::to_owned).collect(),
        })
    }

    /// Load a page from a source file.
    ///
    /// The file name is validated before the file is read.
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| PageError::InvalidPageFilename(path.display().to_string()))?;
        parse_page_file_name(&file_name)?;

        let source = fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(&file_name, &source)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn chapter(&self) -> Chapter {
        self.chapter
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Name of the rendered file, `<title>.<chapter>.html`.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!("{}.{}.html", self.title, self.chapter)
    }

    /// Render the page into a complete HTML document.
    pub fn render(&self) -> Result<String, PageError> {
        render_page(&self.title, self.chapter.number(), &self.lines).map_err(|source| {
            PageError::Render {
                page: format!("{}({})", self.title, self.chapter),
                source,
            }
        })
    }
}
