use std::fmt;
use std::fmt::{Display, Formatter};

/// Source position of a token: byte offset plus 1-based line and column.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Ord, PartialOrd)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn of(offset: usize, line: u32, column: u32) -> Self {
        Pos {
            offset, line, column,
        }
    }

    pub fn zero() -> Self {
        Pos::of(0, 0, 0)
    }

    /// Position right after `len` bytes starting from here, on the same line.
    pub fn just_after(&self, len: usize) -> Self {
        Pos::of(self.offset + len, self.line, self.column + len as u32)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
