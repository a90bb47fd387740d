//! # SvgSync Syntax
//!
//! Tolerant, offset-preserving scanners for SVG source text.
//!
//! The editor buffer is almost never valid XML while the user types, so
//! nothing in this crate rejects input. Every scanner is total: it finds
//! what structure it can and reports it with byte spans into the original
//! text, so a caret offset can be mapped onto an element, an attribute
//! value, a path segment or a polygon vertex.
//!
//! ## Modules
//!
//! - [`markup`]: tag scanning, the structural element index, attributes
//! - [`path`]: path data lexing, parsing, segment location
//! - [`points`]: `points` lists of polygons and polylines
//!
//! ## Learning: Byte Offsets vs Char Offsets
//!
//! Rust strings are UTF-8, so slicing is by byte. All spans here are byte
//! offsets; converting from an editor's character offsets happens once,
//! at the buffer boundary, instead of in every scanner.

pub mod geometry;
pub mod locate;
pub mod markup;
pub mod path;
pub mod points;
pub mod span;

pub use geometry::Point;
pub use locate::DEFAULT_PROXIMITY;
pub use markup::{element_at, ElementAddress, ElementRange, StructuralIndex, TagSpan};
pub use path::{locate_segment, parse_path, PathSegment, ResolvedSegment, SegmentKind};
pub use points::{locate_vertex, parse_points, Vertex};
pub use span::TextSpan;

/// Errors raised when validating data handed in from outside.
///
/// Scanning itself never fails; these only guard deserialized values.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("{kind:?} segment expects {expected} control points, found {found}")]
    ControlPointCount {
        kind: SegmentKind,
        expected: usize,
        found: usize,
    },
}

/// Result type for syntax operations.
pub type SyntaxResult<T> = Result<T, SyntaxError>;
