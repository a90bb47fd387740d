//! Messages from the session to the preview.
//!
//! The wire format is JSON with camelCase names, tagged by `type`:
//!
//! ```json
//! {"type":"update","content":"<svg>…</svg>"}
//! {"type":"highlight","path":[0,2],"segment":null,"polygonPoints":null}
//! ```

use serde::{Deserialize, Serialize};

use svgsync_syntax::{ElementAddress, Point, ResolvedSegment};

use crate::CoreResult;

/// Everything the preview needs to know about the cursor.
///
/// Always a full replacement: fields left `None` clear whatever the
/// preview was showing for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightMessage {
    /// Address of the element under the cursor
    pub path: Option<ElementAddress>,
    /// Path segment under the cursor
    pub segment: Option<ResolvedSegment>,
    /// Vertices of a polygon or polyline under the cursor
    pub polygon_points: Option<PolygonPoints>,
}

impl HighlightMessage {
    /// The message that clears every highlight.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.segment.is_none() && self.polygon_points.is_none()
    }
}

/// Vertex list of a point-list element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonPoints {
    pub points: Vec<Point>,
    /// Vertex under the cursor, if the cursor is inside the value
    pub active_index: Option<usize>,
}

/// One message on the session-to-preview channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewMessage {
    /// Replace the rendered markup
    Update { content: String },
    /// Replace the highlight state
    Highlight(HighlightMessage),
}

impl ViewMessage {
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_wire_shape() {
        let msg = ViewMessage::Update {
            content: "<svg/>".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"type": "update", "content": "<svg/>"})
        );
    }

    #[test]
    fn test_empty_highlight_has_null_fields() {
        let msg = ViewMessage::Highlight(HighlightMessage::empty());
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"type": "highlight", "path": null, "segment": null, "polygonPoints": null})
        );
    }

    #[test]
    fn test_highlight_round_trip() {
        let msg = ViewMessage::Highlight(HighlightMessage {
            path: Some(ElementAddress::from(vec![0, 1])),
            segment: Some(ResolvedSegment::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0))),
            polygon_points: None,
        });
        let json = msg.to_json().unwrap();
        assert!(json.contains(r#""path":[0,1]"#));
        assert_eq!(ViewMessage::from_json(&json).unwrap(), msg);
    }

    #[test]
    fn test_polygon_points_wire_shape() {
        let points = PolygonPoints {
            points: vec![Point::new(1.0, 2.0)],
            active_index: None,
        };
        assert_eq!(
            serde_json::to_value(&points).unwrap(),
            json!({"points": [[1.0, 2.0]], "activeIndex": null})
        );
    }

    #[test]
    fn test_rejects_bad_segment() {
        let json = r#"{"type":"highlight","path":[0],"segment":{"command":"C","startPoint":[0,0],"endPoint":[1,1]},"polygonPoints":null}"#;
        assert!(ViewMessage::from_json(json).is_err());
    }
}
