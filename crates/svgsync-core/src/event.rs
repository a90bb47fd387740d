//! Host events and the session-to-preview channel.
//!
//! ## Learning: Channels Without a Runtime
//!
//! `tokio::sync::mpsc` works outside an async context: `send` on an
//! unbounded sender never blocks, and `try_recv` polls without awaiting.
//! The session pushes from the editor's thread; the preview drains
//! whenever it gets a chance to render. An async consumer can `recv().await`
//! the same channel.

use tokio::sync::mpsc;

use crate::document::DocumentId;
use crate::message::{HighlightMessage, ViewMessage};
use crate::{CoreError, CoreResult};

/// Notifications from the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A document's text changed
    TextChanged(DocumentId),
    /// The cursor or selection moved in a document
    CursorMoved(DocumentId),
    /// Focus moved to another document, or to none
    ActiveDocumentChanged(Option<DocumentId>),
}

/// Creates a connected sender/receiver pair.
pub fn message_channel() -> (MessageSender, MessageReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MessageSender { tx }, MessageReceiver { rx })
}

/// Sending half, owned by the session.
#[derive(Debug, Clone)]
pub struct MessageSender {
    tx: mpsc::UnboundedSender<ViewMessage>,
}

impl MessageSender {
    /// Queues a message for the preview.
    pub fn send(&self, message: ViewMessage) -> CoreResult<()> {
        self.tx.send(message).map_err(|_| CoreError::ChannelClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// What a preview must apply after draining the queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingView {
    /// Newest markup, if any update was queued
    pub content: Option<String>,
    /// Newest highlight, if any was queued
    pub highlight: Option<HighlightMessage>,
}

impl PendingView {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.highlight.is_none()
    }
}

/// Receiving half, owned by the preview.
#[derive(Debug)]
pub struct MessageReceiver {
    rx: mpsc::UnboundedReceiver<ViewMessage>,
}

impl MessageReceiver {
    /// Takes the next message without waiting.
    pub fn try_next(&mut self) -> Option<ViewMessage> {
        self.rx.try_recv().ok()
    }

    /// Waits for the next message; `None` once the session is gone.
    pub async fn next(&mut self) -> Option<ViewMessage> {
        self.rx.recv().await
    }

    /// Drains everything queued, keeping only the latest of each kind.
    ///
    /// Every message is a full replacement, so intermediate states can be
    /// skipped. Content must be applied before the highlight.
    pub fn drain_latest(&mut self) -> PendingView {
        let mut pending = PendingView::default();
        let mut skipped = 0usize;
        while let Some(message) = self.try_next() {
            let replaced = match message {
                ViewMessage::Update { content } => pending.content.replace(content).is_some(),
                ViewMessage::Highlight(highlight) => pending.highlight.replace(highlight).is_some(),
            };
            if replaced {
                skipped += 1;
            }
        }
        if skipped > 0 {
            tracing::trace!(skipped, "coalesced superseded preview messages");
        }
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgsync_syntax::ElementAddress;

    fn highlight(path: Vec<usize>) -> ViewMessage {
        ViewMessage::Highlight(HighlightMessage {
            path: Some(ElementAddress::from(path)),
            ..Default::default()
        })
    }

    #[test]
    fn test_fifo_order() {
        let (tx, mut rx) = message_channel();
        tx.send(highlight(vec![0])).unwrap();
        tx.send(highlight(vec![1])).unwrap();
        assert_eq!(rx.try_next(), Some(highlight(vec![0])));
        assert_eq!(rx.try_next(), Some(highlight(vec![1])));
        assert_eq!(rx.try_next(), None);
    }

    #[test]
    fn test_drain_keeps_latest() {
        let (tx, mut rx) = message_channel();
        tx.send(ViewMessage::Update { content: "a".into() }).unwrap();
        tx.send(highlight(vec![0])).unwrap();
        tx.send(ViewMessage::Update { content: "b".into() }).unwrap();
        tx.send(highlight(vec![0, 3])).unwrap();

        let pending = rx.drain_latest();
        assert_eq!(pending.content.as_deref(), Some("b"));
        assert_eq!(
            pending.highlight.and_then(|h| h.path),
            Some(ElementAddress::from(vec![0, 3]))
        );
        assert!(rx.drain_latest().is_empty());
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (tx, rx) = message_channel();
        drop(rx);
        assert!(tx.is_closed());
        assert!(matches!(
            tx.send(highlight(vec![0])),
            Err(CoreError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn test_async_receive() {
        let (tx, mut rx) = message_channel();
        tokio::spawn(async move {
            tx.send(ViewMessage::Update { content: "<svg/>".into() }).unwrap();
        });
        assert_eq!(
            rx.next().await,
            Some(ViewMessage::Update { content: "<svg/>".into() })
        );
        assert_eq!(rx.next().await, None);
    }
}
