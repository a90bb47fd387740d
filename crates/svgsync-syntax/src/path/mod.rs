//! Path data parsing.
//!
//! The lexer splits `d` values into command letters and numbers, the
//! parser groups numbers into commands and resolves them to absolute
//! segments, and the locator maps a caret offset back to a segment.

mod command;
mod lexer;
mod locator;
mod parser;
mod segment;

pub use command::{CommandLetter, PathCommand};
pub use lexer::{PathLexer, PathToken};
pub use locator::locate_segment;
pub use parser::{parse_path, PathCursor, PathParser, PathSegment};
pub use segment::{ResolvedSegment, SegmentKind};
