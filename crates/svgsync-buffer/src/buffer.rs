//! Rope-backed text buffer for the markup being previewed.
//!
//! ## Why Rope?
//!
//! The preview re-reads the whole document on every keystroke, but edits
//! arrive as small splices. A rope keeps both cheap:
//! - **Splices**: O(log n) insertions/deletions
//! - **Offset conversion**: char, byte and line indices are all O(log n)
//!
//! ## Learning: Three Kinds of Offset
//!
//! Hosts report carets as *character* offsets or line/column pairs, while
//! Rust string slicing needs *byte* offsets. The buffer is the one place
//! that converts between them.

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;
use std::path::Path;

use crate::{BufferError, BufferResult, Position};

/// A text buffer backed by a rope data structure.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    /// The rope holding our text content
    rope: Rope,

    /// Whether the buffer changed since it was loaded
    modified: bool,

    /// Associated file path (if any)
    file_path: Option<std::path::PathBuf>,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use svgsync_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a buffer from a file.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        Ok(Self {
            rope: Rope::from_str(&content),
            modified: false,
            file_path: Some(path.to_path_buf()),
        })
    }

    // ==================== Text Access ====================

    /// Returns the entire text content as a `Cow<str>`.
    ///
    /// # Learning: Cow (Clone-on-Write)
    ///
    /// Small buffers live in one rope chunk and borrow; larger ones allocate.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    // ==================== Measurements ====================

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the number of characters (Unicode scalar values).
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of bytes in the buffer.
    #[inline]
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Returns the number of lines in the buffer.
    ///
    /// An empty buffer has 1 line.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    // ==================== Mutations ====================

    /// Inserts text at a character index.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> BufferResult<()> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }
        self.rope.insert(char_idx, text);
        self.modified = true;
        Ok(())
    }

    /// Deletes text in a character range, returning what was removed.
    pub fn delete(&mut self, range: Range<usize>) -> BufferResult<String> {
        if range.start > range.end || range.end > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(range.end));
        }
        let deleted: String = self.rope.slice(range.clone()).into();
        self.rope.remove(range);
        self.modified = true;
        Ok(deleted)
    }

    /// Replaces the whole content, as a host does after an external reload.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.modified = true;
    }

    // ==================== Offset Conversion ====================

    /// Converts a Position (line, column) to a character index.
    ///
    /// # Learning: Bounds Checking
    ///
    /// Inputs are validated before touching the rope, which would
    /// otherwise panic on an out-of-range index.
    pub fn position_to_char_idx(&self, pos: Position) -> BufferResult<usize> {
        if pos.line >= self.len_lines() {
            return Err(BufferError::PositionOutOfBounds {
                line: pos.line,
                column: pos.column,
            });
        }

        let line_start = self.rope.line_to_char(pos.line);
        let line_len = self.rope.line(pos.line).len_chars();

        // Allow column to be at end of line
        if pos.column > line_len {
            return Err(BufferError::PositionOutOfBounds {
                line: pos.line,
                column: pos.column,
            });
        }

        Ok(line_start + pos.column)
    }

    /// Converts a character index to a Position (line, column).
    pub fn char_idx_to_position(&self, char_idx: usize) -> BufferResult<Position> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }

        let line = self.rope.char_to_line(char_idx);
        let column = char_idx - self.rope.line_to_char(line);

        Ok(Position { line, column })
    }

    /// Converts a character index to a UTF-8 byte offset into [`Self::text`].
    pub fn char_to_byte(&self, char_idx: usize) -> BufferResult<usize> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }
        Ok(self.rope.char_to_byte(char_idx))
    }

    /// Converts a UTF-8 byte offset to a character index.
    ///
    /// Offsets inside a multi-byte character snap to that character.
    pub fn byte_to_char(&self, byte_idx: usize) -> BufferResult<usize> {
        if byte_idx > self.len_bytes() {
            return Err(BufferError::InvalidByteIndex(byte_idx));
        }
        Ok(self.rope.byte_to_char(byte_idx))
    }

    /// Converts a Position straight to a byte offset.
    pub fn position_to_byte(&self, pos: Position) -> BufferResult<usize> {
        let char_idx = self.position_to_char_idx(pos)?;
        self.char_to_byte(char_idx)
    }

    // ==================== State Queries ====================

    /// Returns true if the buffer changed since it was loaded.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns the associated file path, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            modified: false,
            file_path: None,
        }
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
