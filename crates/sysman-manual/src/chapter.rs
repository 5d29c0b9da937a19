//! The six fixed manual chapters.

use std::fmt;

/// One of the six manual chapters, numbered 1 to 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chapter(u8);

impl Chapter {
    /// All chapters in index order.
    pub const ALL: [Self; 6] = [Self(1), Self(2), Self(3), Self(4), Self(5), Self(6)];

    /// Chapter with the given number, or `None` outside 1-6.
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        match number {
            1..=6 => Some(Self(number)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Caption shown in the table of contents.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self.0 {
            1 => "Commands",
            2 => "System calls and library functions",
            3 => "Special files",
            4 => "Kernel modules and drivers",
            5 => "Kernel-mode API",
            _ => "General concepts",
        }
    }

    /// Zero-based position in [`Chapter::ALL`].
    pub(crate) fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
