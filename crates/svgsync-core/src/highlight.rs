//! Caret offset to highlight message.
//!
//! One call per host event: locate the element, then, depending on its
//! tag, the path segment or polygon vertex under the caret. Each call
//! rescans the whole text; documents edited by hand are small enough that
//! a fresh scan is cheaper than keeping an index coherent across edits.

use svgsync_syntax::markup::find_attribute;
use svgsync_syntax::{
    element_at, locate_segment, locate_vertex, parse_path, parse_points, ElementRange, TextSpan,
};

use crate::config::HighlightConfig;
use crate::message::{HighlightMessage, PolygonPoints};

/// Builds highlight messages from text and a caret.
#[derive(Debug, Clone)]
pub struct Highlighter {
    drawing_tags: Vec<String>,
    point_list_tags: Vec<String>,
    proximity: usize,
}

impl Highlighter {
    pub fn new(config: &HighlightConfig) -> Self {
        Self {
            drawing_tags: config.drawing_tags.clone(),
            point_list_tags: config.point_list_tags.clone(),
            proximity: config.proximity_threshold,
        }
    }

    /// Computes the highlight for a caret at byte `offset` in `text`.
    pub fn highlight(&self, text: &str, offset: usize) -> HighlightMessage {
        let Some(element) = element_at(text, offset) else {
            tracing::trace!(offset, "no element at caret");
            return HighlightMessage::empty();
        };

        let tag = element.span.tag_name.as_str();
        let mut message = HighlightMessage {
            path: Some(element.address.clone()),
            ..HighlightMessage::default()
        };

        if self.drawing_tags.iter().any(|t| t == tag) {
            message.segment = self.segment_at(text, &element, offset);
        } else if self.point_list_tags.iter().any(|t| t == tag) {
            message.polygon_points = self.points_at(text, &element, offset);
        }

        tracing::trace!(
            offset,
            address = %element.address,
            tag,
            segment = message.segment.is_some(),
            "highlight computed"
        );
        message
    }

    fn segment_at(
        &self,
        text: &str,
        element: &ElementRange,
        offset: usize,
    ) -> Option<svgsync_syntax::ResolvedSegment> {
        let d = find_attribute(text, open_tag(element), "d")?;
        if !d.value.touches(offset) {
            return None;
        }
        let segments = parse_path(d.value_str(text));
        locate_segment(&segments, offset - d.value.start, self.proximity).map(|s| s.segment.clone())
    }

    fn points_at(&self, text: &str, element: &ElementRange, offset: usize) -> Option<PolygonPoints> {
        let attr = find_attribute(text, open_tag(element), "points")?;
        let vertices = parse_points(attr.value_str(text));
        let active_index = if attr.value.touches(offset) {
            locate_vertex(&vertices, offset - attr.value.start, self.proximity)
        } else {
            None
        };
        Some(PolygonPoints {
            points: vertices.iter().map(|v| v.point).collect(),
            active_index,
        })
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(&HighlightConfig::default())
    }
}

fn open_tag(element: &ElementRange) -> TextSpan {
    TextSpan::new(element.span.open_tag_start, element.span.open_tag_end)
}
