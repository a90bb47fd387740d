//! # SvgSync Core
//!
//! Turns editor activity into preview messages.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       SyncSession                         │
//! │  ┌──────────────┐  ┌────────────┐  ┌──────────────────┐  │
//! │  │   Document   │  │   Config   │  │   Highlighter    │  │
//! │  │   Manager    │  │            │  │ index → d → seg  │  │
//! │  └──────┬───────┘  └────────────┘  └────────┬─────────┘  │
//! │         │           HostEvent               │            │
//! │         └──────────────┬────────────────────┘            │
//! │                        ▼                                 │
//! │                 MessageSender ──── FIFO ────▶ renderer    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every host event is handled synchronously: the session recomputes the
//! highlight from scratch and pushes a full-replacement message. Nothing is
//! cached between events.

pub mod config;
pub mod document;
pub mod event;
pub mod highlight;
pub mod message;
pub mod session;

pub use config::Config;
pub use document::{Document, DocumentId, DocumentManager};
pub use event::{message_channel, HostEvent, MessageReceiver, MessageSender, PendingView};
pub use highlight::Highlighter;
pub use message::{HighlightMessage, PolygonPoints, ViewMessage};
pub use session::SyncSession;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("No active document")]
    NoActiveDocument,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer error: {0}")]
    Buffer(#[from] svgsync_buffer::BufferError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Message encoding error: {0}")]
    Message(#[from] serde_json::Error),

    #[error("Preview channel closed")]
    ChannelClosed,
}
