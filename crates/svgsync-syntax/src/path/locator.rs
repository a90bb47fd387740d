//! Caret offset to path segment.

use super::parser::PathSegment;
use crate::locate::locate_by_span;

/// Finds the segment a caret at `offset` (relative to the start of the
/// path data) refers to.
///
/// Prefers the last segment whose span touches the caret, then the nearest
/// segment closer than `proximity` bytes.
pub fn locate_segment(segments: &[PathSegment], offset: usize, proximity: usize) -> Option<&PathSegment> {
    locate_by_span(segments, offset, proximity, PathSegment::span).map(|idx| &segments[idx])
}
