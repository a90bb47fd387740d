//! Caret and position types for the host document.
//!
//! ## Learning: Newtype Pattern
//!
//! `Position` wraps line/column coordinates instead of a bare
//! `(usize, usize)` so line and column can never be swapped silently.

use serde::{Deserialize, Serialize};

/// A position in the text buffer (line and column).
///
/// Both line and column are 0-indexed. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display as 1-indexed for user-facing output
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// The caret of a document plus an optional selection anchor.
///
/// The highlight pipeline only ever looks at `position`, the *active*
/// end of the selection, which is where the user's caret is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Current caret position (the active end of any selection)
    pub position: Position,

    /// Selection anchor (if selecting text)
    pub anchor: Option<Position>,
}

impl Cursor {
    /// Creates a new cursor at a position.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            anchor: None,
        }
    }

    /// Moves the cursor to a new position, clearing selection.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
        self.anchor = None;
    }

    /// Moves the cursor, extending selection from current position.
    pub fn select_to(&mut self, position: Position) {
        if self.anchor.is_none() {
            self.anchor = Some(self.position);
        }
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        let p1 = Position::new(1, 5);
        let p2 = Position::new(2, 3);
        let p3 = Position::new(1, 10);

        assert!(p1 < p2);
        assert!(p1 < p3);
        assert!(p3 < p2);
        assert_eq!(p1.to_string(), "2:6");
    }

    #[test]
    fn test_selection_keeps_active_end() {
        let mut cursor = Cursor::new(Position::new(2, 3));
        cursor.select_to(Position::new(1, 5));

        assert_eq!(cursor.position, Position::new(1, 5));
        assert_eq!(cursor.anchor, Some(Position::new(2, 3)));

        // The anchor stays put while the selection keeps growing
        cursor.select_to(Position::new(0, 0));
        assert_eq!(cursor.anchor, Some(Position::new(2, 3)));
    }

    #[test]
    fn test_move_clears_selection() {
        let mut cursor = Cursor::default();
        cursor.select_to(Position::new(0, 4));
        cursor.move_to(Position::new(3, 0));
        assert_eq!(cursor.anchor, None);
        assert_eq!(cursor.position, Position::new(3, 0));
    }
}
