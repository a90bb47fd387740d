//! A geometry-only rendering surface.
//!
//! `StaticScene` parses markup with `roxmltree` and computes the box each
//! element would occupy, without painting anything. It backs the CLI and
//! the renderer tests. Boxes come from element geometry in user units:
//! element `transform`s, strokes and text metrics are not modeled, and a
//! container element covers the union of its children.

use svgsync_syntax::{parse_path, parse_points, Point};

use crate::surface::{NodeId, Rect, RenderSurface};
use crate::view_state::ViewState;
use crate::ViewResult;

/// Canvas extent used when the root declares no size.
const DEFAULT_EXTENT: f64 = 100.0;

#[derive(Debug, Clone)]
struct SceneNode {
    tag: String,
    children: Vec<NodeId>,
    /// Content-local box, if the element has geometry
    bbox: Option<Rect>,
}

/// Element tree with boxes, drawn into a fixed container.
#[derive(Debug, Clone)]
pub struct StaticScene {
    /// Node 0 is the content container
    nodes: Vec<SceneNode>,
    container: Rect,
    view: ViewState,
    extent: f64,
}

impl StaticScene {
    /// An empty scene inside `container`.
    pub fn new(container: Rect) -> Self {
        Self {
            nodes: vec![Self::container_node()],
            container,
            view: ViewState::default(),
            extent: DEFAULT_EXTENT,
        }
    }

    fn container_node() -> SceneNode {
        SceneNode {
            tag: String::new(),
            children: Vec::new(),
            bbox: None,
        }
    }

    /// Tag name of `node`; empty for the container.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|n| n.tag.as_str())
    }

    /// Content-local box of `node`.
    pub fn local_rect(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(node.0)?.bbox
    }

    /// Box of all top-level content, for fit-to-content.
    pub fn content_rect(&self) -> Option<Rect> {
        self.local_rect(self.root())
            .map(|local| self.view.to_screen(local, self.container))
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    fn clear(&mut self) {
        self.nodes = vec![Self::container_node()];
        self.extent = DEFAULT_EXTENT;
    }

    /// Adds `node` and its element descendants under `parent`.
    fn add_element(&mut self, parent: NodeId, node: roxmltree::Node<'_, '_>) -> Option<Rect> {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            tag: node.tag_name().name().to_string(),
            children: Vec::new(),
            bbox: None,
        });
        self.nodes[parent.0].children.push(id);

        let mut children_box: Option<Rect> = None;
        for child in node.children().filter(|n| n.is_element()) {
            if let Some(child_box) = self.add_element(id, child) {
                children_box = Some(match children_box {
                    Some(acc) => acc.union(&child_box),
                    None => child_box,
                });
            }
        }

        let bbox = shape_box(node).or(children_box);
        self.nodes[id.0].bbox = bbox;
        bbox
    }
}

impl RenderSurface for StaticScene {
    fn load(&mut self, markup: &str) -> ViewResult<()> {
        self.clear();
        let doc = roxmltree::Document::parse(markup)?;

        let root = self.root();
        let mut content_box: Option<Rect> = None;
        for node in doc.root().children().filter(|n| n.is_element()) {
            if let Some(b) = self.add_element(root, node) {
                content_box = Some(content_box.map_or(b, |acc| acc.union(&b)));
            }
        }
        self.nodes[root.0].bbox = content_box;

        if let Some(svg) = doc.root().children().find(|n| n.is_element()) {
            self.extent = canvas_extent(svg);
        }

        tracing::debug!(elements = self.nodes.len() - 1, extent = self.extent, "scene loaded");
        Ok(())
    }

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.nodes.get(parent.0)?.children.get(index).copied()
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.nodes.get(node.0).map_or(0, |n| n.children.len())
    }

    fn client_rect(&self, node: NodeId) -> Option<Rect> {
        let local = self.local_rect(node)?;
        Some(self.view.to_screen(local, self.container))
    }

    fn container_rect(&self) -> Rect {
        self.container
    }

    fn canvas_extent(&self) -> f64 {
        self.extent
    }

    fn set_transform(&mut self, view: ViewState) {
        self.view = view;
    }
}

// ==================== Geometry ====================

fn number(node: roxmltree::Node<'_, '_>, name: &str) -> Option<f64> {
    let raw = node.attribute(name)?.trim();
    let raw = raw.strip_suffix("px").unwrap_or(raw);
    raw.trim().parse::<f64>().ok()
}

fn number_or_zero(node: roxmltree::Node<'_, '_>, name: &str) -> f64 {
    number(node, name).unwrap_or(0.0)
}

/// Box of a basic shape's own geometry.
fn shape_box(node: roxmltree::Node<'_, '_>) -> Option<Rect> {
    match node.tag_name().name() {
        "svg" => {
            let (min_x, min_y, w, h) = view_box(node)?;
            Some(Rect::new(min_x, min_y, w, h))
        }
        "rect" | "image" | "use" => Some(Rect::new(
            number_or_zero(node, "x"),
            number_or_zero(node, "y"),
            number(node, "width")?,
            number(node, "height")?,
        )),
        "circle" => {
            let r = number(node, "r")?;
            let (cx, cy) = (number_or_zero(node, "cx"), number_or_zero(node, "cy"));
            Some(Rect::new(cx - r, cy - r, r * 2.0, r * 2.0))
        }
        "ellipse" => {
            let (rx, ry) = (number(node, "rx")?, number(node, "ry")?);
            let (cx, cy) = (number_or_zero(node, "cx"), number_or_zero(node, "cy"));
            Some(Rect::new(cx - rx, cy - ry, rx * 2.0, ry * 2.0))
        }
        "line" => Rect::from_points([
            Point::new(number_or_zero(node, "x1"), number_or_zero(node, "y1")),
            Point::new(number_or_zero(node, "x2"), number_or_zero(node, "y2")),
        ]),
        "polygon" | "polyline" => {
            let points = parse_points(node.attribute("points")?);
            Rect::from_points(points.into_iter().map(|v| v.point))
        }
        "path" => {
            // Control-point hull: a curve never leaves it. Every start point
            // is the previous end, so ends and controls cover it all.
            let segments = parse_path(node.attribute("d")?);
            Rect::from_points(segments.iter().flat_map(|s| {
                std::iter::once(s.segment.end()).chain(s.segment.controls().iter().copied())
            }))
        }
        _ => None,
    }
}

fn view_box(node: roxmltree::Node<'_, '_>) -> Option<(f64, f64, f64, f64)> {
    let vb = node.attribute("viewBox")?;
    let mut it = vb
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let min_x = it.next()?.parse::<f64>().ok()?;
    let min_y = it.next()?.parse::<f64>().ok()?;
    let w = it.next()?.parse::<f64>().ok()?;
    let h = it.next()?.parse::<f64>().ok()?;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some((min_x, min_y, w, h))
}

/// `max(w, h)` from the viewBox, else the size attributes, else 100.
fn canvas_extent(svg: roxmltree::Node<'_, '_>) -> f64 {
    let vb = view_box(svg);
    let w = vb
        .map(|(_, _, w, _)| w)
        .or_else(|| number(svg, "width").filter(|w| *w > 0.0))
        .unwrap_or(DEFAULT_EXTENT);
    let h = vb
        .map(|(_, _, _, h)| h)
        .or_else(|| number(svg, "height").filter(|h| *h > 0.0))
        .unwrap_or(DEFAULT_EXTENT);
    w.max(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgsync_syntax::ElementAddress;

    const CONTAINER: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    fn scene(markup: &str) -> StaticScene {
        let mut scene = StaticScene::new(CONTAINER);
        scene.load(markup).unwrap();
        scene
    }

    #[test]
    fn test_children_are_elements_only() {
        let s = scene("<svg>\n  <!-- c -->\n  <rect width='1' height='1'/>\n  text\n  <g/>\n</svg>");
        let svg = s.child(s.root(), 0).unwrap();
        assert_eq!(s.child_count(svg), 2);
        assert_eq!(s.tag_name(s.child(svg, 1).unwrap()), Some("g"));
    }

    #[test]
    fn test_resolve_address() {
        let s = scene("<svg><g><circle r='1'/><rect width='2' height='3'/></g></svg>");
        let rect = s.resolve(&ElementAddress::from(vec![0, 0, 1])).unwrap();
        assert_eq!(s.tag_name(rect), Some("rect"));
        assert!(s.resolve(&ElementAddress::from(vec![0, 0, 2])).is_none());
        assert!(s.resolve(&ElementAddress::from(vec![1])).is_none());
        assert!(s.resolve(&ElementAddress::root()).is_none());
    }

    #[test]
    fn test_shape_boxes() {
        let s = scene(concat!(
            "<svg>",
            "<circle cx='10' cy='10' r='5'/>",
            "<ellipse cx='0' cy='0' rx='4' ry='2'/>",
            "<line x1='5' y1='1' x2='1' y2='9'/>",
            "<polygon points='0,0 10,0 10,20'/>",
            "<path d='M0 0 C 10 -5 20 5 30 0'/>",
            "</svg>"
        ));
        let svg = s.child(s.root(), 0).unwrap();
        let rect_of = |i| s.local_rect(s.child(svg, i).unwrap()).unwrap();
        assert_eq!(rect_of(0), Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(rect_of(1), Rect::new(-4.0, -2.0, 8.0, 4.0));
        assert_eq!(rect_of(2), Rect::new(1.0, 1.0, 4.0, 8.0));
        assert_eq!(rect_of(3), Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(rect_of(4), Rect::new(0.0, -5.0, 30.0, 10.0));
    }

    #[test]
    fn test_group_is_union_of_children() {
        let s = scene("<svg><g><rect x='0' y='0' width='2' height='2'/><rect x='8' y='8' width='2' height='2'/></g></svg>");
        let g = s.resolve(&ElementAddress::from(vec![0, 0])).unwrap();
        assert_eq!(s.local_rect(g), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_client_rect_follows_transform() {
        let mut s = scene("<svg><rect x='10' y='20' width='5' height='5'/></svg>");
        s.set_container(Rect::new(100.0, 50.0, 800.0, 600.0));
        s.set_transform(ViewState {
            scale: 2.0,
            translate_x: 3.0,
            translate_y: 4.0,
        });
        let rect = s.resolve(&ElementAddress::from(vec![0, 0])).unwrap();
        assert_eq!(s.client_rect(rect), Some(Rect::new(123.0, 94.0, 10.0, 10.0)));
    }

    #[test]
    fn test_canvas_extent() {
        assert_eq!(scene("<svg viewBox='0 0 24 48'/>").canvas_extent(), 48.0);
        assert_eq!(scene("<svg width='300px' height='200'/>").canvas_extent(), 300.0);
        assert_eq!(scene("<svg width='30'/>").canvas_extent(), 100.0);
        assert_eq!(scene("<svg/>").canvas_extent(), 100.0);
    }

    #[test]
    fn test_svg_box_from_viewbox() {
        let s = scene("<svg viewBox='0 0 24 24'><rect width='1' height='1'/></svg>");
        let svg = s.child(s.root(), 0).unwrap();
        assert_eq!(s.local_rect(svg), Some(Rect::new(0.0, 0.0, 24.0, 24.0)));
    }

    #[test]
    fn test_svg_box_keeps_viewbox_origin() {
        let s = scene("<svg viewBox='-50 -50 100 100'><circle r='50'/></svg>");
        let svg = s.child(s.root(), 0).unwrap();
        let circle = s.child(svg, 0).unwrap();
        assert_eq!(s.local_rect(svg), Some(Rect::new(-50.0, -50.0, 100.0, 100.0)));
        assert_eq!(s.local_rect(svg), s.local_rect(circle));
    }

    #[test]
    fn test_malformed_markup_leaves_empty_scene() {
        let mut s = scene("<svg><rect width='1' height='1'/></svg>");
        assert!(s.load("<svg><rect></svg>").is_err());
        assert_eq!(s.child_count(s.root()), 0);
        assert_eq!(s.canvas_extent(), 100.0);
    }

    #[test]
    fn test_namespaced_markup() {
        let s = scene("<svg xmlns='http://www.w3.org/2000/svg'><rect width='1' height='1'/></svg>");
        let rect = s.resolve(&ElementAddress::from(vec![0, 0])).unwrap();
        assert_eq!(s.tag_name(rect), Some("rect"));
    }
}
