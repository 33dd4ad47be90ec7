//! Text positions, ranges and selections.
//!
//! All coordinates are 0-indexed. `character` counts chars (Unicode scalar
//! values) from the start of the line, not bytes.
//!
//! # Example
//!
//! ```
//! use keyquill::editor::position::{Position, Range};
//!
//! let range = Range::new(Position::new(3, 4), Position::new(1, 0));
//! assert_eq!(range.start, Position::new(1, 0));
//! assert_eq!(range.end, Position::new(3, 4));
//! assert!(!range.is_empty());
//! ```

use std::fmt;

/// A `(line, character)` location in the host buffer.
///
/// Positions order line first, then character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for the status line
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A normalized `[start, end)` span; `start <= end` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Creates a range from two endpoints in either order.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// An empty range at `pos`.
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// A directed selection: `anchor` stays fixed, `active` is the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// A collapsed selection (plain cursor) at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            active: pos,
        }
    }

    /// The selection as a normalized range.
    pub fn range(&self) -> Range {
        Range::new(self.anchor, self.active)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 5) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
        assert_eq!(Position::new(4, 4), Position::new(4, 4));
    }

    #[test]
    fn test_position_display_is_one_indexed() {
        assert_eq!(format!("{}", Position::new(0, 0)), "1:1");
        assert_eq!(format!("{}", Position::new(9, 3)), "10:4");
    }

    #[test]
    fn test_range_normalizes() {
        let r = Range::new(Position::new(2, 0), Position::new(0, 7));
        assert_eq!(r.start, Position::new(0, 7));
        assert_eq!(r.end, Position::new(2, 0));
    }

    #[test]
    fn test_range_contains_is_half_open() {
        let r = Range::new(Position::new(0, 1), Position::new(0, 3));
        assert!(r.contains(Position::new(0, 1)));
        assert!(r.contains(Position::new(0, 2)));
        assert!(!r.contains(Position::new(0, 3)));
    }

    #[test]
    fn test_selection_range_follows_anchor_direction() {
        let sel = Selection::new(Position::new(5, 2), Position::new(3, 0));
        assert_eq!(sel.range().start, Position::new(3, 0));
        assert_eq!(sel.range().end, Position::new(5, 2));
        assert!(!sel.is_collapsed());
        assert!(Selection::caret(Position::new(1, 1)).is_collapsed());
    }
}
