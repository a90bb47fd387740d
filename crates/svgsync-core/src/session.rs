//! The sync session: documents in, preview messages out.
//!
//! ## Learning: The Facade Pattern
//!
//! `SyncSession` is the only thing a host talks to. It owns the documents,
//! the highlighter and the sending half of the preview channel, and turns
//! each [`HostEvent`] into zero or more [`ViewMessage`]s.

use std::path::Path;

use svgsync_buffer::Position;

use crate::config::Config;
use crate::document::{Document, DocumentId, DocumentManager};
use crate::event::{message_channel, HostEvent, MessageReceiver, MessageSender};
use crate::highlight::Highlighter;
use crate::message::{HighlightMessage, ViewMessage};
use crate::CoreResult;

/// Owns the editor-side state of one preview.
///
/// Single-threaded: every handler runs to completion before the next
/// event is looked at. The preview sees results only through the channel.
pub struct SyncSession {
    documents: DocumentManager,
    config: Config,
    highlighter: Highlighter,
    sender: MessageSender,
}

impl SyncSession {
    /// Creates a session and the receiver its preview should drain.
    pub fn new(config: Config) -> (Self, MessageReceiver) {
        let (sender, receiver) = message_channel();
        let session = Self::with_sender(config, sender);
        (session, receiver)
    }

    /// Creates a session pushing into an existing channel.
    pub fn with_sender(config: Config, sender: MessageSender) -> Self {
        Self {
            documents: DocumentManager::new(),
            highlighter: Highlighter::new(&config.highlight),
            config,
            sender,
        }
    }

    // ==================== Event Handling ====================

    /// Reacts to one host event.
    pub fn handle(&mut self, event: HostEvent) -> CoreResult<()> {
        tracing::debug!(?event, "host event");
        match event {
            HostEvent::TextChanged(id) => {
                if self.follows(id) {
                    self.push_content(id)?;
                    self.push_highlight(id)?;
                }
            }
            HostEvent::CursorMoved(id) => {
                if self.follows(id) {
                    self.push_highlight(id)?;
                }
            }
            HostEvent::ActiveDocumentChanged(id) => {
                self.documents.set_active(id)?;
                match id {
                    Some(id) if self.follows(id) => {
                        self.push_content(id)?;
                        self.push_highlight(id)?;
                    }
                    _ => self.send(ViewMessage::Highlight(HighlightMessage::empty()))?,
                }
            }
        }
        Ok(())
    }

    /// True if `id` is the focused markup document.
    fn follows(&self, id: DocumentId) -> bool {
        self.documents.active_id() == Some(id)
            && self.documents.get(id).is_ok_and(Document::is_markup)
    }

    fn push_content(&self, id: DocumentId) -> CoreResult<()> {
        let content = self.documents.get(id)?.text().into_owned();
        self.send(ViewMessage::Update { content })
    }

    fn push_highlight(&self, id: DocumentId) -> CoreResult<()> {
        let highlight = self.compute_highlight(id)?;
        self.send(ViewMessage::Highlight(highlight))
    }

    fn send(&self, message: ViewMessage) -> CoreResult<()> {
        self.sender.send(message)
    }

    /// Highlight for the cursor of document `id`.
    pub fn compute_highlight(&self, id: DocumentId) -> CoreResult<HighlightMessage> {
        let doc = self.documents.get(id)?;
        let offset = doc.cursor_byte_offset()?;
        Ok(self.highlighter.highlight(&doc.text(), offset))
    }

    // ==================== Document Operations ====================

    /// Opens a file and focuses it.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> CoreResult<DocumentId> {
        let path = path.as_ref();
        if let Some(id) = self.documents.find_by_path(path) {
            self.handle(HostEvent::ActiveDocumentChanged(Some(id)))?;
            return Ok(id);
        }

        let doc = Document::from_file(path)?;
        tracing::info!("Opened {}", path.display());
        self.open(doc)
    }

    /// Opens an untitled document holding `text` and focuses it.
    pub fn open_text(&mut self, name: &str, text: &str) -> CoreResult<DocumentId> {
        self.open(Document::from_text(name, text))
    }

    fn open(&mut self, doc: Document) -> CoreResult<DocumentId> {
        let id = self.documents.add(doc);
        self.handle(HostEvent::ActiveDocumentChanged(Some(id)))?;
        Ok(id)
    }

    /// Closes a document, moving focus to the previous one.
    pub fn close(&mut self, id: DocumentId) -> CoreResult<()> {
        self.documents.close(id)?;
        self.handle(HostEvent::ActiveDocumentChanged(self.documents.active_id()))
    }

    pub fn document(&self, id: DocumentId) -> CoreResult<&Document> {
        self.documents.get(id)
    }

    pub fn active_document(&self) -> CoreResult<&Document> {
        self.documents.active()
    }

    // ==================== Editing ====================

    /// Inserts text at a character offset.
    pub fn insert_text(&mut self, id: DocumentId, char_idx: usize, text: &str) -> CoreResult<()> {
        self.documents.get_mut(id)?.insert(char_idx, text)?;
        self.handle(HostEvent::TextChanged(id))
    }

    /// Replaces the whole text of a document.
    pub fn set_text(&mut self, id: DocumentId, text: &str) -> CoreResult<()> {
        self.documents.get_mut(id)?.set_text(text);
        self.handle(HostEvent::TextChanged(id))
    }

    /// Moves the cursor to a line/column position.
    pub fn move_cursor(&mut self, id: DocumentId, pos: Position) -> CoreResult<()> {
        self.documents.get_mut(id)?.move_cursor_to(pos)?;
        self.handle(HostEvent::CursorMoved(id))
    }

    /// Moves the cursor to a character offset.
    pub fn move_cursor_to_offset(&mut self, id: DocumentId, char_idx: usize) -> CoreResult<()> {
        self.documents.get_mut(id)?.move_cursor_to_offset(char_idx)?;
        self.handle(HostEvent::CursorMoved(id))
    }

    /// Extends the selection to `pos`; the highlight follows the active end.
    pub fn select_to(&mut self, id: DocumentId, pos: Position) -> CoreResult<()> {
        self.documents.get_mut(id)?.select_to(pos)?;
        self.handle(HostEvent::CursorMoved(id))
    }

    // ==================== Configuration ====================

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the config; the next event uses the new highlight rules.
    pub fn set_config(&mut self, config: Config) {
        self.highlighter = Highlighter::new(&config.highlight);
        self.config = config;
    }
}
