//! Applies preview messages to a rendering surface.

use svgsync_core::config::Config;
use svgsync_core::event::{MessageReceiver, PendingView};
use svgsync_core::message::{HighlightMessage, ViewMessage};
use svgsync_syntax::ElementAddress;

use crate::overlay::{OverlaySet, OverlayStyle};
use crate::surface::{NodeId, Rect, RenderSurface};
use crate::view_state::{FitOptions, ViewState};

/// Owner of everything the preview shows.
///
/// The transform and overlays live here, not in the surface, so every
/// change goes through one place and can be inspected in tests.
pub struct PreviewRenderer<S: RenderSurface> {
    surface: S,
    view: ViewState,
    fit: FitOptions,
    zoom_step: f64,
    style: OverlayStyle,
    /// Address of the last non-null highlight
    highlighted_path: Option<ElementAddress>,
    /// Node that address resolved to in the current content
    highlighted_node: Option<NodeId>,
    last_highlight: HighlightMessage,
    overlays: OverlaySet,
}

impl<S: RenderSurface> PreviewRenderer<S> {
    pub fn new(surface: S, config: &Config) -> Self {
        Self {
            surface,
            view: ViewState::default(),
            fit: FitOptions::from(&config.view),
            zoom_step: config.view.zoom_step,
            style: OverlayStyle::from(&config.overlay),
            highlighted_path: None,
            highlighted_node: None,
            last_highlight: HighlightMessage::empty(),
            overlays: OverlaySet::default(),
        }
    }

    // ==================== Messages ====================

    /// Applies everything queued, skipping superseded messages.
    ///
    /// Returns false if nothing was pending.
    pub fn drain(&mut self, receiver: &mut MessageReceiver) -> bool {
        let pending = receiver.drain_latest();
        if pending.is_empty() {
            return false;
        }
        self.apply_pending(pending);
        true
    }

    /// Applies coalesced state: content first, so the highlight resolves
    /// against the new tree.
    pub fn apply_pending(&mut self, pending: PendingView) {
        if let Some(content) = pending.content {
            self.load_content(&content);
        }
        if let Some(highlight) = pending.highlight {
            self.apply_highlight(highlight);
        }
    }

    /// Applies one message.
    pub fn apply(&mut self, message: ViewMessage) {
        match message {
            ViewMessage::Update { content } => self.load_content(&content),
            ViewMessage::Highlight(highlight) => self.apply_highlight(highlight),
        }
    }

    /// Replaces the rendered markup, keeping the transform.
    pub fn load_content(&mut self, content: &str) {
        if let Err(err) = self.surface.load(content) {
            tracing::warn!("Preview content not rendered: {}", err);
        }
        self.surface.set_transform(self.view);

        // Node handles died with the old content
        self.highlighted_node = self
            .highlighted_path
            .as_ref()
            .and_then(|path| self.surface.resolve(path));
        self.redraw_overlays();
    }

    /// Replaces the highlight state.
    pub fn apply_highlight(&mut self, highlight: HighlightMessage) {
        match &highlight.path {
            None => {
                self.highlighted_path = None;
                self.highlighted_node = None;
            }
            Some(path) => {
                let node = self.surface.resolve(path);
                if node.is_none() {
                    tracing::warn!(address = %path, "No rendered element at address");
                }

                let changed = self.highlighted_path.as_ref() != Some(path);
                self.highlighted_path = Some(path.clone());
                self.highlighted_node = node;

                if changed {
                    if let Some(node) = node {
                        self.fit_node(node);
                    }
                }
            }
        }

        self.last_highlight = highlight;
        self.redraw_overlays();
    }

    // ==================== View ====================

    fn fit_node(&mut self, node: NodeId) {
        if let Some(rect) = self.surface.client_rect(node) {
            let view = self.view.fit(rect, self.surface.container_rect(), self.fit);
            self.set_view(view);
        }
    }

    fn set_view(&mut self, view: ViewState) {
        if view != self.view {
            tracing::trace!(scale = view.scale, x = view.translate_x, y = view.translate_y, "view changed");
        }
        self.view = view;
        self.surface.set_transform(view);
        self.redraw_overlays();
    }

    pub fn zoom_in(&mut self) {
        let view = self.view.zoom_in(self.zoom_step, self.surface.container_rect());
        self.set_view(view);
    }

    pub fn zoom_out(&mut self) {
        let view = self.view.zoom_out(self.zoom_step, self.surface.container_rect());
        self.set_view(view);
    }

    /// Back to 1:1 at the origin.
    pub fn reset_zoom(&mut self) {
        self.set_view(ViewState::identity());
    }

    /// Fits the whole graphic into the container.
    pub fn fit_content(&mut self) {
        let root = self.surface.root();
        self.fit_node(root);
    }

    pub fn zoom_percent(&self) -> u32 {
        self.view.zoom_percent()
    }

    // ==================== Overlays ====================

    /// Rebuilds every overlay layer from the last highlight.
    fn redraw_overlays(&mut self) {
        self.overlays.clear();
        if self.highlighted_path.is_none() {
            return;
        }

        let extent = self.surface.canvas_extent();
        self.overlays.segment = self
            .last_highlight
            .segment
            .as_ref()
            .map(|segment| self.style.segment_layer(segment, extent));
        self.overlays.polygon = self
            .last_highlight
            .polygon_points
            .as_ref()
            .and_then(|points| self.style.polygon_layer(points, extent));

        let container = self.surface.container_rect();
        self.overlays.bounding_box = self
            .highlighted_node
            .and_then(|node| self.surface.client_rect(node))
            .map(|rect| {
                let local = Rect::new(rect.x - container.x, rect.y - container.y, rect.width, rect.height);
                self.style.bounding_box_layer(local)
            });
    }

    // ==================== Accessors ====================

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    pub fn highlighted_node(&self) -> Option<NodeId> {
        self.highlighted_node
    }

    pub fn highlighted_path(&self) -> Option<&ElementAddress> {
        self.highlighted_path.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::StaticScene;
    use svgsync_core::event::message_channel;
    use svgsync_core::message::PolygonPoints;
    use svgsync_syntax::{Point, ResolvedSegment};

    const SVG: &str = concat!(
        "<svg viewBox='0 0 200 100'>",
        "<rect x='0' y='0' width='100' height='50'/>",
        "<polygon points='10,10 20,10 20,20'/>",
        "</svg>"
    );

    fn renderer() -> PreviewRenderer<StaticScene> {
        let scene = StaticScene::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let mut renderer = PreviewRenderer::new(scene, &Config::default());
        renderer.load_content(SVG);
        renderer
    }

    fn highlight(path: Vec<usize>) -> HighlightMessage {
        HighlightMessage {
            path: Some(ElementAddress::from(path)),
            ..HighlightMessage::default()
        }
    }

    #[test]
    fn test_new_address_fits_view() {
        let mut r = renderer();
        r.apply_highlight(highlight(vec![0, 0]));
        // 100x50 rect: min(720/100, 520/50, 10) = 7.2
        assert!((r.view().scale - 7.2).abs() < 1e-9);
        assert_eq!(r.surface().view(), r.view());
        assert!(r.overlays().bounding_box.is_some());
    }

    #[test]
    fn test_same_address_keeps_view() {
        let mut r = renderer();
        r.apply_highlight(highlight(vec![0, 0]));
        r.reset_zoom();
        r.apply_highlight(highlight(vec![0, 0]));
        assert_eq!(r.view(), ViewState::identity());
    }

    #[test]
    fn test_null_address_clears_everything() {
        let mut r = renderer();
        let mut h = highlight(vec![0, 1]);
        h.polygon_points = Some(PolygonPoints {
            points: vec![Point::new(10.0, 10.0)],
            active_index: Some(0),
        });
        r.apply_highlight(h);
        assert!(r.overlays().polygon.is_some());

        r.apply_highlight(HighlightMessage::empty());
        assert!(r.overlays().is_empty());
        assert!(r.highlighted_node().is_none());
    }

    #[test]
    fn test_out_of_range_address_does_not_fit() {
        let mut r = renderer();
        let mut h = highlight(vec![0, 9]);
        h.segment = Some(ResolvedSegment::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
        r.apply_highlight(h);
        assert_eq!(r.view(), ViewState::identity());
        assert!(r.highlighted_node().is_none());
        assert!(r.overlays().bounding_box.is_none());
        // Segment overlay does not need the element
        assert!(r.overlays().segment.is_some());
    }

    #[test]
    fn test_overlays_use_canvas_extent() {
        let mut r = renderer();
        let mut h = highlight(vec![0, 1]);
        h.segment = Some(ResolvedSegment::move_to(Point::ORIGIN, Point::new(5.0, 5.0)));
        r.apply_highlight(h);
        let segment = r.overlays().segment.as_ref().unwrap();
        // extent 200 from the viewBox
        assert!(segment.to_svg().contains(r#"r="2""#));
    }

    #[test]
    fn test_update_reresolves_without_refit() {
        let mut r = renderer();
        r.apply_highlight(highlight(vec![0, 1]));
        let fitted = r.view();

        // The polygon moves to index 0; the old address now names it no more
        r.load_content("<svg viewBox='0 0 200 100'><polygon points='0,0 5,5 0,5'/></svg>");
        assert_eq!(r.view(), fitted);
        assert!(r.highlighted_node().is_none());

        r.load_content(SVG);
        assert!(r.highlighted_node().is_some());
        assert!(r.overlays().bounding_box.is_some());
    }

    #[test]
    fn test_bounding_box_in_container_coordinates() {
        let scene = StaticScene::new(Rect::new(100.0, 50.0, 800.0, 600.0));
        let mut r = PreviewRenderer::new(scene, &Config::default());
        r.load_content(SVG);
        r.apply_highlight(highlight(vec![0, 0]));

        let svg = r.overlays().bounding_box.as_ref().unwrap().to_svg();
        // Fitted rect is centered: 720x360 at (40, 120)
        assert!(svg.contains(r#"<rect x="40" y="120" width="720" height="360""#));
    }

    #[test]
    fn test_zoom_controls() {
        let mut r = renderer();
        r.zoom_in();
        assert_eq!(r.zoom_percent(), 120);
        r.zoom_out();
        assert_eq!(r.zoom_percent(), 100);
        r.fit_content();
        // svg box is the 200x100 viewBox: min(720/200, 520/100) = 3.6
        assert!((r.view().scale - 3.6).abs() < 1e-9);
        r.reset_zoom();
        assert_eq!(r.view(), ViewState::identity());
    }

    #[test]
    fn test_drain_applies_latest() {
        let (tx, mut rx) = message_channel();
        let mut r = renderer();
        assert!(!r.drain(&mut rx));

        tx.send(ViewMessage::Highlight(highlight(vec![0, 0]))).unwrap();
        tx.send(ViewMessage::Update { content: SVG.to_string() }).unwrap();
        tx.send(ViewMessage::Highlight(highlight(vec![0, 1]))).unwrap();
        assert!(r.drain(&mut rx));
        assert_eq!(r.highlighted_path(), Some(&ElementAddress::from(vec![0, 1])));
    }

    #[test]
    fn test_malformed_update_empties_scene() {
        let mut r = renderer();
        r.apply_highlight(highlight(vec![0, 0]));
        r.apply(ViewMessage::Update {
            content: "<svg><rect></svg>".to_string(),
        });
        assert!(r.highlighted_node().is_none());
        assert_eq!(r.surface().child_count(r.surface().root()), 0);
    }
}
