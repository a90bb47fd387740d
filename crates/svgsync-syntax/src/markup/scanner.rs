//! Finite-state tag scanner.
//!
//! ## Learning: Explicit States over One Big Pattern
//!
//! A single "match any tag" pattern hides its recovery rules inside the
//! pattern engine. Spelling the scanner out as a state machine keeps
//! every tolerance decision visible:
//!
//! ```text
//!            '<' + letter              '>'
//!  Outside ─────────────────▶ InOpenTag ────────▶ emit Open / SelfClosing
//!     │      '</' + letter              '>'
//!     └─────────────────────▶ InCloseTag ───────▶ emit Close
//! ```
//!
//! Rules:
//! - a tag opens at `<` (or `</`) immediately followed by an ASCII letter;
//!   any other `<` is plain text
//! - the name is `[A-Za-z][A-Za-z0-9:-]*`
//! - the tag ends at the first `>`; quotes are not tracked, so a missing
//!   quote can never swallow the rest of the document
//! - an open tag whose `>` is preceded by `/` is self-closing
//! - a tag with no `>` before end of input is dropped, and since no later
//!   tag could close either, scanning stops there

use crate::span::TextSpan;

/// What kind of tag a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Open,
    /// `<name .../>`
    SelfClosing,
    /// `</name ...>`
    Close,
}

/// One tag found by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagToken<'a> {
    pub kind: TagKind,
    /// Tag name as written (no case folding)
    pub name: &'a str,
    /// Span from `<` through `>` inclusive
    pub span: TextSpan,
}

/// Scanner states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InOpenTag {
        start: usize,
        name_start: usize,
        name_end: Option<usize>,
    },
    InCloseTag {
        start: usize,
        name_start: usize,
        name_end: Option<usize>,
    },
}

/// Iterator over the tags of a markup string.
///
/// # Example
/// ```
/// use svgsync_syntax::markup::{TagKind, TagScanner};
///
/// let kinds: Vec<_> = TagScanner::new("<g><rect/></g>").map(|t| t.kind).collect();
/// assert_eq!(kinds, [TagKind::Open, TagKind::SelfClosing, TagKind::Close]);
/// ```
pub struct TagScanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    state: ScanState,
}

impl<'a> TagScanner<'a> {
    /// Create a new scanner for the given text
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            state: ScanState::Outside,
        }
    }

    #[inline]
    fn byte_at(&self, idx: usize) -> Option<u8> {
        self.bytes.get(idx).copied()
    }

    #[inline]
    fn is_name_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b':' || b == b'-'
    }

    /// Handles one byte while outside any tag.
    fn step_outside(&mut self) {
        let next = self.byte_at(self.pos + 1);
        match (self.bytes[self.pos], next) {
            (b'<', Some(b)) if b.is_ascii_alphabetic() => {
                self.state = ScanState::InOpenTag {
                    start: self.pos,
                    name_start: self.pos + 1,
                    name_end: None,
                };
                self.pos += 1;
            }
            (b'<', Some(b'/')) if self.byte_at(self.pos + 2).is_some_and(|b| b.is_ascii_alphabetic()) => {
                self.state = ScanState::InCloseTag {
                    start: self.pos,
                    name_start: self.pos + 2,
                    name_end: None,
                };
                self.pos += 2;
            }
            _ => self.pos += 1,
        }
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = TagToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.bytes.len() {
            match self.state {
                ScanState::Outside => self.step_outside(),
                ScanState::InOpenTag {
                    start,
                    name_start,
                    name_end,
                }
                | ScanState::InCloseTag {
                    start,
                    name_start,
                    name_end,
                } => {
                    let b = self.bytes[self.pos];
                    let closing = matches!(self.state, ScanState::InCloseTag { .. });

                    // The name runs until the first non-name byte
                    let name_end = match name_end {
                        Some(end) => Some(end),
                        None if !Self::is_name_byte(b) => Some(self.pos),
                        None => None,
                    };

                    if b != b'>' {
                        self.state = if closing {
                            ScanState::InCloseTag { start, name_start, name_end }
                        } else {
                            ScanState::InOpenTag { start, name_start, name_end }
                        };
                        self.pos += 1;
                        continue;
                    }

                    let name_end = name_end.unwrap_or(self.pos);
                    let kind = if closing {
                        TagKind::Close
                    } else if self.bytes[self.pos - 1] == b'/' {
                        TagKind::SelfClosing
                    } else {
                        TagKind::Open
                    };

                    self.pos += 1;
                    self.state = ScanState::Outside;
                    return Some(TagToken {
                        kind,
                        name: &self.text[name_start..name_end],
                        span: TextSpan::new(start, self.pos),
                    });
                }
            }
        }

        if let ScanState::InOpenTag { start, .. } | ScanState::InCloseTag { start, .. } = self.state {
            tracing::debug!(start, "dropping unterminated tag at end of input");
            self.state = ScanState::Outside;
        }
        None
    }
}
