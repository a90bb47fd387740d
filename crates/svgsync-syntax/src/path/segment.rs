//! Absolute, renderable path segments.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::{SyntaxError, SyntaxResult};

/// Rendering shape of a resolved segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Moveto marker
    #[serde(rename = "M")]
    Move,
    /// Straight line
    #[serde(rename = "L")]
    Line,
    /// Cubic bezier, both controls
    #[serde(rename = "C")]
    Cubic,
    /// Smooth cubic, only the explicit second control
    #[serde(rename = "S")]
    SmoothCubic,
    /// Quadratic bezier
    #[serde(rename = "Q")]
    Quadratic,
}

impl SegmentKind {
    /// Number of control points a segment of this kind carries.
    pub const fn control_count(self) -> usize {
        match self {
            Self::Cubic => 2,
            Self::SmoothCubic | Self::Quadratic => 1,
            Self::Move | Self::Line => 0,
        }
    }
}

/// A segment in absolute coordinates, ready to draw.
///
/// Invariant: `controls.len() == kind.control_count()`. The constructors
/// and deserialization both enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSegment", into = "RawSegment")]
pub struct ResolvedSegment {
    kind: SegmentKind,
    start: Point,
    end: Point,
    controls: Vec<Point>,
}

impl ResolvedSegment {
    pub fn move_to(start: Point, end: Point) -> Self {
        Self {
            kind: SegmentKind::Move,
            start,
            end,
            controls: Vec::new(),
        }
    }

    pub fn line(start: Point, end: Point) -> Self {
        Self {
            kind: SegmentKind::Line,
            start,
            end,
            controls: Vec::new(),
        }
    }

    pub fn cubic(start: Point, c1: Point, c2: Point, end: Point) -> Self {
        Self {
            kind: SegmentKind::Cubic,
            start,
            end,
            controls: vec![c1, c2],
        }
    }

    pub fn smooth_cubic(start: Point, c2: Point, end: Point) -> Self {
        Self {
            kind: SegmentKind::SmoothCubic,
            start,
            end,
            controls: vec![c2],
        }
    }

    pub fn quadratic(start: Point, control: Point, end: Point) -> Self {
        Self {
            kind: SegmentKind::Quadratic,
            start,
            end,
            controls: vec![control],
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn controls(&self) -> &[Point] {
        &self.controls
    }
}

/// Wire shape of a segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSegment {
    command: SegmentKind,
    start_point: Point,
    end_point: Point,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    control_points: Vec<Point>,
}

impl TryFrom<RawSegment> for ResolvedSegment {
    type Error = SyntaxError;

    fn try_from(raw: RawSegment) -> SyntaxResult<Self> {
        let expected = raw.command.control_count();
        if raw.control_points.len() != expected {
            return Err(SyntaxError::ControlPointCount {
                kind: raw.command,
                expected,
                found: raw.control_points.len(),
            });
        }
        Ok(Self {
            kind: raw.command,
            start: raw.start_point,
            end: raw.end_point,
            controls: raw.control_points,
        })
    }
}

impl From<ResolvedSegment> for RawSegment {
    fn from(seg: ResolvedSegment) -> Self {
        Self {
            command: seg.kind,
            start_point: seg.start,
            end_point: seg.end,
            control_points: seg.controls,
        }
    }
}
