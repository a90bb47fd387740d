//! Point lists of `polygon` and `polyline` elements.

use crate::geometry::Point;
use crate::locate::locate_by_span;
use crate::path::{PathLexer, PathToken};
use crate::span::TextSpan;

/// One vertex of a point list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub point: Point,
    /// From the x coordinate to the end of the y coordinate
    pub span: TextSpan,
}

/// Parses a `points` attribute value into vertices.
///
/// Numbers pair up in order; a trailing odd number is dropped. Anything
/// that is not a number separates.
pub fn parse_points(value: &str) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let mut x: Option<(f64, usize)> = None;

    for token in PathLexer::new(value) {
        let PathToken::Number { value, span } = token else {
            continue;
        };
        match x.take() {
            None => x = Some((value, span.start)),
            Some((x, start)) => vertices.push(Vertex {
                point: Point::new(x, value),
                span: TextSpan::new(start, span.end),
            }),
        }
    }

    vertices
}

/// Index of the vertex a caret at `offset` (relative to the value start)
/// refers to, by the same rule as segment location.
pub fn locate_vertex(vertices: &[Vertex], offset: usize, proximity: usize) -> Option<usize> {
    locate_by_span(vertices, offset, proximity, |v| v.span)
}
