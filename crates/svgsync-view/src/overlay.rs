//! Highlight overlays drawn on top of the preview.
//!
//! Overlays are plain shape lists. A host draws them with whatever it has;
//! [`OverlayLayer::to_svg`] gives a ready-made `<g>` fragment for hosts
//! that render SVG. Segment and polygon layers live in the graphic's own
//! coordinates, so they are appended inside the root `<svg>`; the
//! bounding-box layer is in container pixels and sits above the content.
//!
//! ## Learning: Sizing Relative to the Canvas
//!
//! A stroke width of `1` is a hairline on a 2000-unit drawing and a blob
//! on a 24-unit icon. Every size here is a ratio of the canvas extent.

use std::fmt::Write;

use svgsync_core::config::OverlayConfig;
use svgsync_core::message::PolygonPoints;
use svgsync_syntax::{Point, ResolvedSegment, SegmentKind};

use crate::surface::Rect;

/// How a shape is painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// `None` paints no fill
    pub fill: Option<String>,
    pub stroke: String,
    pub stroke_width: f64,
    /// Dash and gap length
    pub dash: Option<f64>,
    pub round_cap: bool,
    pub opacity: f64,
}

/// One overlay primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { center: Point, radius: f64, paint: Paint },
    Line { from: Point, to: Point, paint: Paint },
    Path { d: String, paint: Paint },
    Rect { rect: Rect, paint: Paint },
}

impl Shape {
    pub fn paint(&self) -> &Paint {
        match self {
            Shape::Circle { paint, .. }
            | Shape::Line { paint, .. }
            | Shape::Path { paint, .. }
            | Shape::Rect { paint, .. } => paint,
        }
    }

    fn write_svg(&self, out: &mut String) -> std::fmt::Result {
        match self {
            Shape::Circle { center, radius, .. } => {
                write!(out, r#"<circle cx="{}" cy="{}" r="{}""#, center.x, center.y, radius)?
            }
            Shape::Line { from, to, .. } => write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                from.x, from.y, to.x, to.y
            )?,
            Shape::Path { d, .. } => write!(out, r#"<path d="{d}""#)?,
            Shape::Rect { rect, .. } => write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                rect.x, rect.y, rect.width, rect.height
            )?,
        }

        let paint = self.paint();
        match &paint.fill {
            Some(fill) => write!(out, r#" fill="{fill}""#)?,
            None => out.push_str(r#" fill="none""#),
        }
        write!(out, r#" stroke="{}" stroke-width="{}""#, paint.stroke, paint.stroke_width)?;
        if let Some(dash) = paint.dash {
            write!(out, r#" stroke-dasharray="{dash} {dash}""#)?;
        }
        if paint.round_cap {
            out.push_str(r#" stroke-linecap="round""#);
        }
        write!(out, r#" opacity="{}"/>"#, paint.opacity)
    }
}

/// A group of shapes replaced as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    /// Class of the `<g>` element, which is how a host finds and removes it
    pub class: &'static str,
    pub shapes: Vec<Shape>,
}

impl OverlayLayer {
    pub const SEGMENT_CLASS: &'static str = "segment-highlight";
    pub const POLYGON_CLASS: &'static str = "polygon-point-highlight";
    pub const BOUNDING_BOX_CLASS: &'static str = "bounding-box-highlight";

    fn new(class: &'static str) -> Self {
        Self {
            class,
            shapes: Vec::new(),
        }
    }

    /// Serializes as a non-interactive `<g>` fragment.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) -> std::fmt::Result {
        write!(out, r#"<g class="{}" pointer-events="none">"#, self.class)?;
        for shape in &self.shapes {
            shape.write_svg(out)?;
        }
        out.push_str("</g>");
        Ok(())
    }
}

/// Every overlay currently shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaySet {
    pub segment: Option<OverlayLayer>,
    pub polygon: Option<OverlayLayer>,
    pub bounding_box: Option<OverlayLayer>,
}

impl OverlaySet {
    pub fn is_empty(&self) -> bool {
        self.segment.is_none() && self.polygon.is_none() && self.bounding_box.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Layers in drawing order.
    pub fn layers(&self) -> impl Iterator<Item = &OverlayLayer> {
        [&self.segment, &self.polygon, &self.bounding_box]
            .into_iter()
            .flatten()
    }
}

/// Colors and size ratios of the overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub segment_color: String,
    pub point_outline_color: String,
    pub handle_color: String,
    pub vertex_color: String,
    pub active_vertex_color: String,
    pub bounding_box_color: String,
    pub stroke_ratio: f64,
    pub point_ratio: f64,
    pub vertex_ratio: f64,
    pub active_vertex_ratio: f64,
    pub vertex_stroke_ratio: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from(&OverlayConfig::default())
    }
}

impl From<&OverlayConfig> for OverlayStyle {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            segment_color: config.segment_color.clone(),
            point_outline_color: config.point_outline_color.clone(),
            handle_color: config.handle_color.clone(),
            vertex_color: config.vertex_color.clone(),
            active_vertex_color: config.active_vertex_color.clone(),
            bounding_box_color: config.bounding_box_color.clone(),
            stroke_ratio: config.stroke_ratio,
            point_ratio: config.point_ratio,
            vertex_ratio: config.vertex_ratio,
            active_vertex_ratio: config.active_vertex_ratio,
            vertex_stroke_ratio: config.vertex_stroke_ratio,
        }
    }
}

impl OverlayStyle {
    // ==================== Segment ====================

    /// Draws one resolved path segment.
    pub fn segment_layer(&self, segment: &ResolvedSegment, extent: f64) -> OverlayLayer {
        let sw = extent * self.stroke_ratio;
        let point_r = extent * self.point_ratio;
        let (start, end) = (segment.start(), segment.end());
        let controls = segment.controls();
        let mut layer = OverlayLayer::new(OverlayLayer::SEGMENT_CLASS);

        match segment.kind() {
            SegmentKind::Move => {
                layer.shapes.push(Shape::Circle {
                    center: end,
                    radius: point_r,
                    paint: Paint {
                        fill: Some(self.segment_color.clone()),
                        stroke: self.point_outline_color.clone(),
                        stroke_width: sw * 0.5,
                        dash: None,
                        round_cap: false,
                        opacity: 0.85,
                    },
                });
            }
            SegmentKind::Line => {
                layer.shapes.push(Shape::Line {
                    from: start,
                    to: end,
                    paint: self.curve_paint(sw),
                });
                layer.shapes.push(self.dot(end, point_r * 0.6, sw, None));
            }
            SegmentKind::Cubic => {
                let (c1, c2) = (controls[0], controls[1]);
                layer.shapes.push(Shape::Path {
                    d: format!(
                        "M {} {} C {} {} {} {} {} {}",
                        start.x, start.y, c1.x, c1.y, c2.x, c2.y, end.x, end.y
                    ),
                    paint: self.curve_paint(sw),
                });
                layer.shapes.push(self.handle(start, c1, sw));
                layer.shapes.push(self.handle(end, c2, sw));
                layer.shapes.push(self.control_dot(c1, point_r, sw));
                layer.shapes.push(self.control_dot(c2, point_r, sw));
                layer.shapes.push(self.dot(end, point_r * 0.6, sw, None));
            }
            SegmentKind::SmoothCubic => {
                let c2 = controls[0];
                layer.shapes.push(Shape::Path {
                    d: format!("M {} {} S {} {} {} {}", start.x, start.y, c2.x, c2.y, end.x, end.y),
                    paint: self.curve_paint(sw),
                });
                layer.shapes.push(self.handle(end, c2, sw));
                layer.shapes.push(self.control_dot(c2, point_r, sw));
                layer.shapes.push(self.dot(end, point_r * 0.6, sw, None));
            }
            SegmentKind::Quadratic => {
                let c = controls[0];
                layer.shapes.push(Shape::Path {
                    d: format!("M {} {} Q {} {} {} {}", start.x, start.y, c.x, c.y, end.x, end.y),
                    paint: self.curve_paint(sw),
                });
                layer.shapes.push(self.handle(start, c, sw));
                layer.shapes.push(self.handle(end, c, sw));
                layer.shapes.push(self.control_dot(c, point_r, sw));
                layer.shapes.push(self.dot(end, point_r * 0.6, sw, None));
            }
        }

        layer
    }

    fn curve_paint(&self, sw: f64) -> Paint {
        Paint {
            fill: None,
            stroke: self.segment_color.clone(),
            stroke_width: sw,
            dash: None,
            round_cap: true,
            opacity: 0.85,
        }
    }

    fn dot(&self, center: Point, radius: f64, sw: f64, fill: Option<&str>) -> Shape {
        Shape::Circle {
            center,
            radius,
            paint: Paint {
                fill: Some(fill.unwrap_or(self.segment_color.as_str()).to_string()),
                stroke: self.point_outline_color.clone(),
                stroke_width: sw * 0.4,
                dash: None,
                round_cap: false,
                opacity: 0.9,
            },
        }
    }

    fn control_dot(&self, center: Point, point_r: f64, sw: f64) -> Shape {
        self.dot(center, point_r * 0.5, sw, Some(self.handle_color.as_str()))
    }

    fn handle(&self, from: Point, to: Point, sw: f64) -> Shape {
        Shape::Line {
            from,
            to,
            paint: Paint {
                fill: None,
                stroke: self.handle_color.clone(),
                stroke_width: sw * 0.5,
                dash: Some(sw),
                round_cap: false,
                opacity: 0.7,
            },
        }
    }

    // ==================== Polygon ====================

    /// One dot per vertex, radius `extent * vertex_ratio`.
    ///
    /// The active vertex is drawn in its own color *and* enlarged to
    /// `extent * active_vertex_ratio`, twice the base size by default.
    ///
    /// `None` for an empty point list.
    pub fn polygon_layer(&self, points: &PolygonPoints, extent: f64) -> Option<OverlayLayer> {
        if points.points.is_empty() {
            return None;
        }
        let base_r = extent * self.vertex_ratio;
        let active_r = extent * self.active_vertex_ratio;
        let sw = extent * self.vertex_stroke_ratio;

        let mut layer = OverlayLayer::new(OverlayLayer::POLYGON_CLASS);
        for (i, &point) in points.points.iter().enumerate() {
            let shape = if points.active_index == Some(i) {
                self.dot(point, active_r, sw, Some(self.active_vertex_color.as_str()))
            } else {
                self.dot(point, base_r, sw, Some(self.vertex_color.as_str()))
            };
            layer.shapes.push(shape);
        }
        Some(layer)
    }

    // ==================== Bounding Box ====================

    /// Outline of the highlighted element, in container pixels.
    pub fn bounding_box_layer(&self, rect: Rect) -> OverlayLayer {
        let mut layer = OverlayLayer::new(OverlayLayer::BOUNDING_BOX_CLASS);
        layer.shapes.push(Shape::Rect {
            rect,
            paint: Paint {
                fill: None,
                stroke: self.bounding_box_color.clone(),
                stroke_width: 1.0,
                dash: Some(4.0),
                round_cap: false,
                opacity: 0.9,
            },
        });
        layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn circles(layer: &OverlayLayer) -> Vec<(Point, f64)> {
        layer
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Circle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    fn handles(layer: &OverlayLayer) -> usize {
        layer
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Line { paint, .. } if paint.dash.is_some()))
            .count()
    }

    #[test]
    fn test_move_marker() {
        let layer = OverlayStyle::default().segment_layer(&ResolvedSegment::move_to(p(0.0, 0.0), p(5.0, 5.0)), 100.0);
        assert_eq!(layer.class, "segment-highlight");
        assert_eq!(circles(&layer), vec![(p(5.0, 5.0), 1.0)]);
        assert_eq!(layer.shapes[0].paint().fill.as_deref(), Some("lime"));
        assert_eq!(layer.shapes[0].paint().stroke, "#00cc00");
    }

    #[test]
    fn test_line_with_endpoint_dot() {
        let layer = OverlayStyle::default().segment_layer(&ResolvedSegment::line(p(0.0, 0.0), p(10.0, 0.0)), 100.0);
        assert_eq!(layer.shapes.len(), 2);
        let Shape::Line { paint, .. } = &layer.shapes[0] else {
            panic!("expected line");
        };
        assert!((paint.stroke_width - 0.6).abs() < 1e-12);
        assert!(paint.round_cap);
        assert_eq!(circles(&layer), vec![(p(10.0, 0.0), 0.6)]);
    }

    #[test]
    fn test_cubic_handles_and_dots() {
        let seg = ResolvedSegment::cubic(p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0));
        let layer = OverlayStyle::default().segment_layer(&seg, 100.0);
        assert_eq!(handles(&layer), 2);
        assert_eq!(
            circles(&layer),
            vec![(p(10.0, 0.0), 0.5), (p(10.0, 10.0), 0.5), (p(0.0, 10.0), 0.6)]
        );
        let Shape::Path { d, .. } = &layer.shapes[0] else {
            panic!("expected path");
        };
        assert_eq!(d, "M 0 0 C 10 0 10 10 0 10");
    }

    #[test]
    fn test_smooth_and_quadratic_handles() {
        let style = OverlayStyle::default();
        let smooth = style.segment_layer(&ResolvedSegment::smooth_cubic(p(0.0, 0.0), p(5.0, 5.0), p(10.0, 0.0)), 100.0);
        assert_eq!(handles(&smooth), 1);
        assert_eq!(circles(&smooth).len(), 2);

        let quad = style.segment_layer(&ResolvedSegment::quadratic(p(0.0, 0.0), p(5.0, 5.0), p(10.0, 0.0)), 100.0);
        assert_eq!(handles(&quad), 2);
        assert_eq!(circles(&quad).len(), 2);
    }

    #[test]
    fn test_polygon_active_vertex() {
        let points = PolygonPoints {
            points: vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)],
            active_index: Some(1),
        };
        let layer = OverlayStyle::default().polygon_layer(&points, 1000.0).unwrap();
        assert_eq!(layer.class, "polygon-point-highlight");
        let fills: Vec<_> = layer.shapes.iter().map(|s| s.paint().fill.clone().unwrap()).collect();
        assert_eq!(fills, vec!["blue", "red", "blue"]);
        assert_eq!(circles(&layer)[0].1, 8.0);
        assert_eq!(circles(&layer)[1].1, 16.0);
        let style = OverlayStyle::default();
        assert_eq!(style.active_vertex_ratio, 2.0 * style.vertex_ratio);
        assert!((layer.shapes[0].paint().stroke_width - 1.2).abs() < 1e-12);

        let empty = PolygonPoints {
            points: Vec::new(),
            active_index: None,
        };
        assert!(OverlayStyle::default().polygon_layer(&empty, 100.0).is_none());
    }

    #[test]
    fn test_svg_fragment() {
        let layer = OverlayStyle::default().segment_layer(&ResolvedSegment::line(p(0.0, 0.0), p(1.0, 2.0)), 100.0);
        let svg = layer.to_svg();
        assert!(svg.starts_with(r#"<g class="segment-highlight" pointer-events="none"><line x1="0" y1="0" x2="1" y2="2" fill="none" stroke="lime""#));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.ends_with("</g>"));
    }

    #[test]
    fn test_bounding_box_fragment() {
        let layer = OverlayStyle::default().bounding_box_layer(Rect::new(1.0, 2.0, 3.0, 4.0));
        let svg = layer.to_svg();
        assert!(svg.contains(r##"<rect x="1" y="2" width="3" height="4" fill="none" stroke="#ff00ff""##));
        assert!(svg.contains(r#"stroke-dasharray="4 4""#));
    }

    #[test]
    fn test_overlay_set_layers() {
        let mut set = OverlaySet::default();
        assert!(set.is_empty());
        set.bounding_box = Some(OverlayStyle::default().bounding_box_layer(Rect::default()));
        assert_eq!(set.layers().count(), 1);
        set.clear();
        assert!(set.is_empty());
    }
}
