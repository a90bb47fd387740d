//! Attribute spans inside an opening tag.
//!
//! Values are never decoded: the caller needs the exact byte range of the
//! raw value so a caret offset can be mapped into it. Both quote styles
//! are honored; an unterminated quote ends the walk, leaving earlier
//! attributes usable.

use crate::span::TextSpan;

/// One attribute of an opening tag, located in the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpan<'a> {
    pub name: &'a str,
    /// Span of the raw value, excluding quotes
    pub value: TextSpan,
    /// The quote character, or `None` for an unquoted value
    pub quote: Option<u8>,
}

impl<'a> AttributeSpan<'a> {
    /// Raw value text from the full document.
    pub fn value_str<'t>(&self, text: &'t str) -> &'t str {
        self.value.slice(text)
    }
}

/// Walks the attributes of the opening tag at `tag` within `text`.
pub struct Attributes<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Attributes<'a> {
    /// Starts after the tag name of the opening tag covering `tag`.
    pub fn new(text: &'a str, tag: TextSpan) -> Self {
        let bytes = text.as_bytes();
        let end = tag.end.min(bytes.len());
        let mut pos = tag.start.saturating_add(1).min(end);
        while pos < end && is_name_byte(bytes[pos]) {
            pos += 1;
        }
        Self { text, bytes, pos, end }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.end && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }
}

#[inline]
fn is_name_byte(b: u8) -> bool {
    !(b.is_ascii_whitespace() || matches!(b, b'=' | b'/' | b'>' | b'"' | b'\''))
}

impl<'a> Iterator for Attributes<'a> {
    type Item = AttributeSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.skip_whitespace();
            if self.pos >= self.end {
                return None;
            }

            let b = self.bytes[self.pos];
            if !is_name_byte(b) {
                // Stray '/', '=' or quote: step over it
                self.pos += 1;
                continue;
            }

            let name_start = self.pos;
            while self.pos < self.end && is_name_byte(self.bytes[self.pos]) {
                self.pos += 1;
            }
            let name = &self.text[name_start..self.pos];

            self.skip_whitespace();
            if self.pos >= self.end || self.bytes[self.pos] != b'=' {
                // Bare attribute without a value
                return Some(AttributeSpan {
                    name,
                    value: TextSpan::new(self.pos, self.pos),
                    quote: None,
                });
            }
            self.pos += 1;
            self.skip_whitespace();
            if self.pos >= self.end {
                return None;
            }

            let quote = self.bytes[self.pos];
            if quote == b'"' || quote == b'\'' {
                let value_start = self.pos + 1;
                let close = self.bytes[value_start..self.end].iter().position(|&c| c == quote);
                let Some(len) = close else {
                    tracing::debug!(attribute = name, at = name_start, "unterminated attribute value");
                    self.pos = self.end;
                    return None;
                };
                self.pos = value_start + len + 1;
                return Some(AttributeSpan {
                    name,
                    value: TextSpan::new(value_start, value_start + len),
                    quote: Some(quote),
                });
            }

            let value_start = self.pos;
            while self.pos < self.end
                && !self.bytes[self.pos].is_ascii_whitespace()
                && !matches!(self.bytes[self.pos], b'>' | b'/')
            {
                self.pos += 1;
            }
            return Some(AttributeSpan {
                name,
                value: TextSpan::new(value_start, self.pos),
                quote: None,
            });
        }
    }
}

/// Finds attribute `name` in the opening tag covering `tag`.
///
/// # Example
/// ```
/// use svgsync_syntax::markup::find_attribute;
/// use svgsync_syntax::TextSpan;
///
/// let text = "<path id='p' d=\"M0 0\"/>";
/// let d = find_attribute(text, TextSpan::new(0, text.len()), "d").unwrap();
/// assert_eq!(d.value_str(text), "M0 0");
/// ```
pub fn find_attribute<'a>(text: &'a str, tag: TextSpan, name: &str) -> Option<AttributeSpan<'a>> {
    Attributes::new(text, tag).find(|attr| attr.name == name)
}
