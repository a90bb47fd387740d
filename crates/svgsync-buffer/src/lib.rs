//! # SvgSync Buffer
//!
//! Text model for the markup document a preview follows.
//!
//! ## Key Concepts for Learning Rust
//!
//! ### Ownership & Borrowing
//! - `TextBuffer` owns the rope data structure
//! - `text()` hands out a borrowed `Cow<str>` for read-only scans
//! - Mutations require `&mut self` (exclusive access)
//!
//! ### Offsets
//! - Hosts speak in characters or line/column pairs
//! - The syntax layer slices `&str` by byte offsets
//! - Conversions between the two are validated, never panicking

mod buffer;
mod cursor;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Position};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: usize, column: usize },

    #[error("Invalid byte index: {0}")]
    InvalidByteIndex(usize),

    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
