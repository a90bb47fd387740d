//! The rendering engine as seen by the preview.

use serde::{Deserialize, Serialize};
use svgsync_syntax::{ElementAddress, Point};

use crate::view_state::ViewState;
use crate::ViewResult;

/// Handle to an element of a loaded surface.
///
/// Only valid until the next [`RenderSurface::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle holding every point, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Self::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True for a 0×0 box; a line still has extent along one axis.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }
}

/// A rendering engine holding the previewed graphic.
///
/// Node `root()` is the content container; its children are the
/// top-level elements of the loaded markup, so an [`ElementAddress`]
/// indexes from there.
pub trait RenderSurface {
    /// Replaces the rendered markup.
    ///
    /// On error the surface must be left empty, not half-loaded.
    fn load(&mut self, markup: &str) -> ViewResult<()>;

    /// The content container.
    fn root(&self) -> NodeId;

    /// The `index`-th element child of `parent`.
    fn child(&self, parent: NodeId, index: usize) -> Option<NodeId>;

    fn child_count(&self, node: NodeId) -> usize;

    /// On-screen box of `node`, with the current transform applied.
    fn client_rect(&self, node: NodeId) -> Option<Rect>;

    /// On-screen box of the container the graphic is drawn in.
    fn container_rect(&self) -> Rect;

    /// Characteristic size of the graphic in its own units.
    fn canvas_extent(&self) -> f64;

    /// Applies a pan/zoom to the content.
    fn set_transform(&mut self, view: ViewState);

    /// Walks `address` down from the root.
    ///
    /// Any out-of-range index means there is no such element.
    fn resolve(&self, address: &ElementAddress) -> Option<NodeId> {
        let mut node = self.root();
        for &index in address.indices() {
            node = self.child(node, index)?;
        }
        (node != self.root()).then_some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let rect = Rect::from_points([Point::new(3.0, 1.0), Point::new(-1.0, 5.0), Point::new(2.0, 2.0)]);
        assert_eq!(rect, Some(Rect::new(-1.0, 1.0, 4.0, 4.0)));
        assert_eq!(Rect::from_points(std::iter::empty()), None);
    }

    #[test]
    fn test_union_and_center() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -5.0, 15.0, 15.0));
        assert_eq!(a.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_empty_means_zero_area_point() {
        assert!(Rect::new(4.0, 4.0, 0.0, 0.0).is_empty());
        assert!(!Rect::new(4.0, 4.0, 10.0, 0.0).is_empty());
    }
}
