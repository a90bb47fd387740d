//! Documents tracked by a session.
//!
//! ## Learning: Type Aliases and Newtypes
//!
//! `DocumentId` is a newtype wrapper around `Uuid`. Host events carry only
//! the id, so the session can look the document up without borrowing it
//! across the event boundary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use svgsync_buffer::{Cursor, Position, TextBuffer};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Unique identifier for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a new unique document ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A text document with one cursor.
pub struct Document {
    id: DocumentId,
    buffer: TextBuffer,
    cursor: Cursor,
    path: Option<PathBuf>,
    name: String,
    /// Language id derived from the file extension
    language: Option<String>,
}

impl Document {
    /// Creates an untitled document holding `text`.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self {
            id: DocumentId::new(),
            buffer: TextBuffer::from(text),
            cursor: Cursor::default(),
            path: None,
            name: name.into(),
            language: None,
        }
    }

    /// Opens a document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let buffer = TextBuffer::from_file(path)?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown")
            .to_string();

        let language = path
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::language_from_extension);

        Ok(Self {
            id: DocumentId::new(),
            buffer,
            cursor: Cursor::default(),
            path: Some(path.to_path_buf()),
            name,
            language,
        })
    }

    fn language_from_extension(ext: &str) -> String {
        match ext.to_lowercase().as_str() {
            "svg" | "svgz" => "svg",
            "xml" => "xml",
            "html" | "htm" => "html",
            _ => ext,
        }
        .to_string()
    }

    /// Whether the preview should follow this document.
    ///
    /// Untitled documents are assumed to be markup.
    pub fn is_markup(&self) -> bool {
        matches!(self.language.as_deref(), None | Some("svg" | "xml" | "html"))
    }

    // ==================== Getters ====================

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Returns all text.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        self.buffer.text()
    }

    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    // ==================== Offsets ====================

    /// Cursor as a character offset.
    pub fn cursor_char_offset(&self) -> CoreResult<usize> {
        Ok(self.buffer.position_to_char_idx(self.cursor.position)?)
    }

    /// Cursor as a UTF-8 byte offset, the unit the scanners work in.
    pub fn cursor_byte_offset(&self) -> CoreResult<usize> {
        Ok(self.buffer.position_to_byte(self.cursor.position)?)
    }

    // ==================== Cursor ====================

    /// Moves the cursor, dropping any selection.
    pub fn move_cursor_to(&mut self, pos: Position) -> CoreResult<()> {
        // Validate before committing
        self.buffer.position_to_char_idx(pos)?;
        self.cursor.move_to(pos);
        Ok(())
    }

    /// Moves the cursor to a character offset.
    pub fn move_cursor_to_offset(&mut self, char_idx: usize) -> CoreResult<()> {
        let pos = self.buffer.char_idx_to_position(char_idx)?;
        self.cursor.move_to(pos);
        Ok(())
    }

    /// Extends the selection; the active end is what gets highlighted.
    pub fn select_to(&mut self, pos: Position) -> CoreResult<()> {
        self.buffer.position_to_char_idx(pos)?;
        self.cursor.select_to(pos);
        Ok(())
    }

    // ==================== Text Editing ====================

    /// Inserts text at a character offset.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> CoreResult<()> {
        self.buffer.insert(char_idx, text)?;
        self.clamp_cursor();
        Ok(())
    }

    /// Deletes a character range.
    pub fn delete(&mut self, range: Range<usize>) -> CoreResult<()> {
        self.buffer.delete(range)?;
        self.clamp_cursor();
        Ok(())
    }

    /// Replaces the whole text.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.clamp_cursor();
    }

    /// Keeps the cursor inside the text after an edit shrank it.
    fn clamp_cursor(&mut self) {
        if self.buffer.position_to_char_idx(self.cursor.position).is_err() {
            let end = self.buffer.len_chars();
            if let Ok(pos) = self.buffer.char_idx_to_position(end) {
                self.cursor.move_to(pos);
            }
        }
    }
}

/// Manages open documents and which one has focus.
#[derive(Default)]
pub struct DocumentManager {
    documents: HashMap<DocumentId, Document>,
    order: Vec<DocumentId>,
    active: Option<DocumentId>,
}

impl DocumentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document and makes it active.
    pub fn add(&mut self, doc: Document) -> DocumentId {
        let id = doc.id();
        self.documents.insert(id, doc);
        self.order.push(id);
        self.active = Some(id);
        id
    }

    /// Removes a document.
    pub fn close(&mut self, id: DocumentId) -> CoreResult<()> {
        if self.documents.remove(&id).is_none() {
            return Err(CoreError::DocumentNotFound(id));
        }
        self.order.retain(|&i| i != id);

        if self.active == Some(id) {
            self.active = self.order.last().copied();
        }
        Ok(())
    }

    pub fn get(&self, id: DocumentId) -> CoreResult<&Document> {
        self.documents.get(&id).ok_or(CoreError::DocumentNotFound(id))
    }

    pub fn get_mut(&mut self, id: DocumentId) -> CoreResult<&mut Document> {
        self.documents.get_mut(&id).ok_or(CoreError::DocumentNotFound(id))
    }

    pub fn active_id(&self) -> Option<DocumentId> {
        self.active
    }

    /// Returns the active document.
    pub fn active(&self) -> CoreResult<&Document> {
        let id = self.active.ok_or(CoreError::NoActiveDocument)?;
        self.get(id)
    }

    /// Sets the active document; `None` means focus left all documents.
    pub fn set_active(&mut self, id: Option<DocumentId>) -> CoreResult<()> {
        if let Some(id) = id {
            if !self.documents.contains_key(&id) {
                return Err(CoreError::DocumentNotFound(id));
            }
        }
        self.active = id;
        Ok(())
    }

    /// Finds a document by path.
    pub fn find_by_path(&self, path: &Path) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|(_, doc)| doc.path() == Some(path))
            .map(|(&id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset_after_multibyte_text() {
        let mut doc = Document::from_text("t", "<text>é</text><rect/>");
        doc.move_cursor_to_offset(15).unwrap();
        assert_eq!(doc.cursor_char_offset().unwrap(), 15);
        assert_eq!(doc.cursor_byte_offset().unwrap(), 16);
    }

    #[test]
    fn test_cursor_validation() {
        let mut doc = Document::from_text("t", "ab\ncd");
        assert!(doc.move_cursor_to(Position::new(1, 2)).is_ok());
        assert!(doc.move_cursor_to(Position::new(5, 0)).is_err());
        assert_eq!(doc.cursor().position, Position::new(1, 2));
    }

    #[test]
    fn test_cursor_clamped_after_delete() {
        let mut doc = Document::from_text("t", "abcdef");
        doc.move_cursor_to_offset(6).unwrap();
        doc.delete(2..6).unwrap();
        assert_eq!(doc.cursor_char_offset().unwrap(), 2);
    }

    #[test]
    fn test_markup_detection() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("icon.SVG");
        let txt = dir.path().join("notes.txt");
        std::fs::write(&svg, "<svg/>").unwrap();
        std::fs::write(&txt, "hello").unwrap();

        let svg_doc = Document::from_file(&svg).unwrap();
        assert_eq!(svg_doc.language(), Some("svg"));
        assert_eq!(svg_doc.name(), "icon.SVG");
        assert!(svg_doc.is_markup());
        assert!(!Document::from_file(&txt).unwrap().is_markup());
        assert!(Document::from_text("untitled", "").is_markup());
    }

    #[test]
    fn test_manager_active_tracking() {
        let mut docs = DocumentManager::new();
        let a = docs.add(Document::from_text("a", "<a/>"));
        let b = docs.add(Document::from_text("b", "<b/>"));
        assert_eq!(docs.active_id(), Some(b));

        docs.close(b).unwrap();
        assert_eq!(docs.active_id(), Some(a));
        assert!(matches!(docs.close(b), Err(CoreError::DocumentNotFound(_))));

        docs.set_active(None).unwrap();
        assert!(matches!(docs.active(), Err(CoreError::NoActiveDocument)));
        assert!(docs.set_active(Some(b)).is_err());
    }
}
