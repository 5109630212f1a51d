use crate::Position;
use std::fmt::{Display, Formatter};

impl Position {
    /// Create a new Position object based on the zero based line and column number.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // One based in everything a user reads.
        write!(f, "({}, {})", self.line + 1, self.column + 1)
    }
}
