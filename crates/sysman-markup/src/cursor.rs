/// A cursor for character-by-character inline scanning with offset tracking.
///
/// Offsets are byte positions into the scanned string, so they can be used
/// directly to slice the source or to report where a span was opened.
pub(crate) struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Current byte offset.
    pub(crate) fn pos(&self) -> usize {
        self.i
    }

    /// Peeks at the current character without advancing.
    pub(crate) fn peek(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    /// Advances past one character, returning it.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Byte offset of the next occurrence of `c` at or after the cursor.
    pub(crate) fn find(&self, c: char) -> Option<usize> {
        self.s[self.i..].find(c).map(|rel| self.i + rel)
    }

    /// Slice of the source between two byte offsets.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.s[start..end]
    }

    /// Moves the cursor to an absolute byte offset.
    pub(crate) fn seek(&mut self, pos: usize) {
        self.i = pos;
    }
}
