//! # SvgSync View
//!
//! The preview side of the channel.
//!
//! ```text
//! MessageReceiver ──▶ PreviewRenderer ──▶ RenderSurface
//!                        │   ViewState        (StaticScene, or a real
//!                        │   OverlaySet        rendering engine)
//!                        ▼
//!                   fit / zoom math
//! ```
//!
//! The renderer never sees markup text beyond passing it to the surface.
//! It resolves element addresses by walking the surface's children, asks
//! the surface for on-screen boxes, and keeps the transform and overlays
//! as plain values.
//!
//! ## Learning: Traits as Seams
//!
//! [`RenderSurface`] is the boundary to whatever actually draws pixels.
//! The renderer is generic over it, so tests and the CLI use the
//! geometry-only [`StaticScene`] while a GUI host plugs in its engine.

pub mod overlay;
pub mod renderer;
pub mod scene;
pub mod surface;
pub mod view_state;

pub use overlay::{OverlayLayer, OverlaySet, OverlayStyle, Shape};
pub use renderer::PreviewRenderer;
pub use scene::StaticScene;
pub use surface::{NodeId, Rect, RenderSurface};
pub use view_state::{FitOptions, ViewState};

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised by rendering surfaces.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Malformed markup: {0}")]
    Markup(#[from] roxmltree::Error),
}
