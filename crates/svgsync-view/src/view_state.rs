//! Pan and zoom of the preview content.
//!
//! ## Learning: State as Values
//!
//! `ViewState` is `Copy` and every operation returns a new one instead of
//! mutating in place. The renderer decides when to commit a state to the
//! surface, and tests can check the math without any surface at all.

use serde::{Deserialize, Serialize};
use svgsync_core::config::ViewConfig;

use crate::surface::Rect;

/// Content transform: `screen = container_origin + translate + local · scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

/// Parameters of fit-to-element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Free space kept on every side, in container pixels
    pub padding: f64,
    /// Upper bound on the resulting scale
    pub max_scale: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: 40.0,
            max_scale: 10.0,
        }
    }
}

impl From<&ViewConfig> for FitOptions {
    fn from(config: &ViewConfig) -> Self {
        Self {
            padding: config.padding,
            max_scale: config.max_scale,
        }
    }
}

impl ViewState {
    /// The 1:1 view.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Maps an on-screen box back into content-local coordinates.
    pub fn to_local(&self, screen: Rect, container: Rect) -> Rect {
        Rect::new(
            (screen.x - container.x - self.translate_x) / self.scale,
            (screen.y - container.y - self.translate_y) / self.scale,
            screen.width / self.scale,
            screen.height / self.scale,
        )
    }

    /// Maps a content-local box onto the screen.
    pub fn to_screen(&self, local: Rect, container: Rect) -> Rect {
        Rect::new(
            container.x + self.translate_x + local.x * self.scale,
            container.y + self.translate_y + local.y * self.scale,
            local.width * self.scale,
            local.height * self.scale,
        )
    }

    /// Scales and centers so `element` (an on-screen box under the current
    /// transform) fills the container minus padding.
    ///
    /// Returns `self` unchanged when the container has a zero dimension,
    /// the element has no area at all, or padding leaves no room.
    pub fn fit(&self, element: Rect, container: Rect, options: FitOptions) -> ViewState {
        if container.width == 0.0 || container.height == 0.0 || element.is_empty() {
            return *self;
        }

        let local = self.to_local(element, container);
        let avail_w = container.width - options.padding * 2.0;
        let avail_h = container.height - options.padding * 2.0;
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return *self;
        }

        // A zero-width box divides to infinity and defers to the other axis
        let scale = (avail_w / local.width).min(avail_h / local.height).min(options.max_scale);
        let center = local.center();

        ViewState {
            scale,
            translate_x: container.width / 2.0 - center.x * scale,
            translate_y: container.height / 2.0 - center.y * scale,
        }
    }

    /// Multiplies the scale, keeping the container center fixed.
    pub fn zoom_by(&self, factor: f64, container: Rect) -> ViewState {
        if factor <= 0.0 || !factor.is_finite() {
            return *self;
        }
        let cx = container.width / 2.0;
        let cy = container.height / 2.0;
        ViewState {
            scale: self.scale * factor,
            translate_x: cx - (cx - self.translate_x) * factor,
            translate_y: cy - (cy - self.translate_y) * factor,
        }
    }

    pub fn zoom_in(&self, step: f64, container: Rect) -> ViewState {
        self.zoom_by(step, container)
    }

    pub fn zoom_out(&self, step: f64, container: Rect) -> ViewState {
        self.zoom_by(1.0 / step, container)
    }

    /// Scale as a whole percentage, as shown next to zoom controls.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round().max(0.0) as u32
    }

    /// CSS `transform` value for an HTML host.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}
