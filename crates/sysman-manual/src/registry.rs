//! Chapter registry and table of contents rendering.

use std::fmt::Write;

use sysman_markup::{MANUAL_NAME, document_end, document_start, escape_html};

use crate::chapter::Chapter;

/// Titles registered under each chapter, in registration order.
///
/// One registry belongs to one build. Duplicate titles are kept.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChapterRegistry {
    chapters: [Vec<String>; 6],
}

impl ChapterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a page under its chapter.
    pub fn register(&mut self, title: impl Into<String>, chapter: Chapter) {
        self.chapters[chapter.index()].push(title.into());
    }

    /// Titles registered under `chapter`.
    #[must_use]
    pub fn titles(&self, chapter: Chapter) -> &[String] {
        &self.chapters[chapter.index()]
    }

    /// Total number of registered pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chapters.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chapters.iter().all(Vec::is_empty)
    }

    /// Render the table of contents document.
    ///
    /// Every chapter caption is listed, including chapters with no pages.
    ///
    /// # Examples
    ///
    /// ```
    /// use sysman_manual::{Chapter, ChapterRegistry};
    ///
    /// let mut registry = ChapterRegistry::new();
    /// registry.register("ls", Chapter::ALL[0]);
    /// let html = registry.render_index();
    /// assert!(html.contains(r#"<li><a href="ls.1.html">ls</a></li>"#));
    /// ```
    #[must_use]
    pub fn render_index(&self) -> String {
        let mut html = String::with_capacity(4096);
        document_start(&format!("INDEX - {MANUAL_NAME}"), &mut html);
        html.push_str("<h1>TABLE OF CONTENTS</h1>\n<ol>\n");

        for chapter in Chapter::ALL {
            writeln!(html, "<li>{}<ul>", chapter.caption()).unwrap();
            for title in self.titles(chapter) {
                writeln!(
                    html,
                    r#"<li><a href="{}.{chapter}.html">{}</a></li>"#,
                    escape_html(title).replace('"', "&quot;"),
                    escape_html(title)
                )
                .unwrap();
            }
            html.push_str("</ul></li>\n");
        }

        html.push_str("</ol>\n");
        document_end(&mut html);
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chapter(n: u8) -> Chapter {
        Chapter::new(n).unwrap()
    }

    fn toc(html: &str) -> &str {
        let start = html.find("<ol>\n").unwrap();
        let end = html.find("</ol>\n").unwrap() + "</ol>\n".len();
        &html[start..end]
    }

    #[test]
    fn test_register_preserves_order() {
        let mut registry = ChapterRegistry::new();
        registry.register("ls", chapter(1));
        registry.register("cat", chapter(1));
        assert_eq!(registry.titles(chapter(1)), ["ls", "cat"]);

        let html = registry.render_index();
        let commands = html.find("Commands").unwrap();
        let ls = html.find(">ls<").unwrap();
        let cat = html.find(">cat<").unwrap();
        assert!(commands < ls);
        assert!(ls < cat);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut registry = ChapterRegistry::new();
        registry.register("ls", chapter(1));
        registry.register("ls", chapter(1));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.render_index().matches("ls.1.html").count(), 2);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ChapterRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_render_index_layout() {
        let mut registry = ChapterRegistry::new();
        registry.register("ls", chapter(1));
        registry.register("open", chapter(2));
        registry.register("null", chapter(3));

        let html = registry.render_index();
        assert!(html.contains("<title>INDEX - GLIDIX MANUAL</title>"));
        assert!(html.contains("<h1>TABLE OF CONTENTS</h1>"));
        assert_eq!(
            toc(&html),
            "<ol>\n\
             <li>Commands<ul>\n\
             <li><a href=\"ls.1.html\">ls</a></li>\n\
             </ul></li>\n\
             <li>System calls and library functions<ul>\n\
             <li><a href=\"open.2.html\">open</a></li>\n\
             </ul></li>\n\
             <li>Special files<ul>\n\
             <li><a href=\"null.3.html\">null</a></li>\n\
             </ul></li>\n\
             <li>Kernel modules and drivers<ul>\n\
             </ul></li>\n\
             <li>Kernel-mode API<ul>\n\
             </ul></li>\n\
             <li>General concepts<ul>\n\
             </ul></li>\n\
             </ol>\n"
        );
    }

    #[test]
    fn test_separate_registries_do_not_share_state() {
        let mut first = ChapterRegistry::new();
        first.register("ls", chapter(1));
        let second = ChapterRegistry::new();
        assert!(second.is_empty());
    }
}
