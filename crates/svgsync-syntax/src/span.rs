//! Byte ranges into the scanned text.
//!
//! Every token the scanners emit carries a `TextSpan` so results can be
//! mapped back onto the document without re-scanning.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextSpan {
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset one past the last byte
    pub end: usize,
}

impl TextSpan {
    /// Creates a new span.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if this span is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns true if a caret at `offset` sits on this span.
    ///
    /// A caret sits *between* characters, so one placed right after the
    /// last byte still touches the span.
    #[inline]
    pub const fn touches(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Distance from `offset` to the nearest edge; zero when touching.
    #[inline]
    pub const fn distance_to(&self, offset: usize) -> usize {
        if offset < self.start {
            self.start - offset
        } else {
            offset.saturating_sub(self.end)
        }
    }

    /// Extract the covered text, or `""` when the span is out of range
    #[inline]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}
