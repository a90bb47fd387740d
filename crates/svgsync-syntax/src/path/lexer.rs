//! Tokenizer for path data and number lists.
//!
//! Only two token kinds exist: a command letter and a number. Every other
//! byte (whitespace, commas, stray letters, half-typed garbage) separates
//! tokens and is otherwise ignored, which keeps the lexer total over
//! whatever the user has typed so far.

use super::command::CommandLetter;
use crate::span::TextSpan;

/// A lexical token of path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathToken {
    Command {
        letter: CommandLetter,
        relative: bool,
        span: TextSpan,
    },
    Number {
        value: f64,
        span: TextSpan,
    },
}

impl PathToken {
    pub fn span(&self) -> TextSpan {
        match self {
            PathToken::Command { span, .. } | PathToken::Number { span, .. } => *span,
        }
    }
}

/// Iterator over the tokens of a path data string.
pub struct PathLexer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PathLexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    #[inline]
    fn digit_at(&self, idx: usize) -> bool {
        self.bytes.get(idx).is_some_and(u8::is_ascii_digit)
    }

    fn skip_digits(&self, mut idx: usize) -> usize {
        while self.digit_at(idx) {
            idx += 1;
        }
        idx
    }

    /// Scans `[+-]? digits* ('.' digits+)? ([eE] [+-]? digits+)?` at `start`.
    ///
    /// Returns the end offset, or `None` when no digit was found.
    fn scan_number(&self, start: usize) -> Option<usize> {
        let mut idx = start;
        if matches!(self.bytes.get(idx), Some(b'+' | b'-')) {
            idx += 1;
        }

        let int_end = self.skip_digits(idx);
        let has_int = int_end > idx;
        idx = int_end;

        let mut has_frac = false;
        if self.bytes.get(idx) == Some(&b'.') && self.digit_at(idx + 1) {
            idx = self.skip_digits(idx + 1);
            has_frac = true;
        }

        if !has_int && !has_frac {
            return None;
        }

        if matches!(self.bytes.get(idx), Some(b'e' | b'E')) {
            let mut exp = idx + 1;
            if matches!(self.bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            if self.digit_at(exp) {
                idx = self.skip_digits(exp);
            }
        }

        Some(idx)
    }
}

impl Iterator for PathLexer<'_> {
    type Item = PathToken;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            let b = self.bytes[start];

            if let Some((letter, relative)) = CommandLetter::from_byte(b) {
                self.pos += 1;
                return Some(PathToken::Command {
                    letter,
                    relative,
                    span: TextSpan::new(start, self.pos),
                });
            }

            if matches!(b, b'+' | b'-' | b'.' | b'0'..=b'9') {
                if let Some(end) = self.scan_number(start) {
                    self.pos = end;
                    // The scanned slice is always a valid float literal
                    let value = self.text[start..end].parse::<f64>().unwrap_or(0.0);
                    return Some(PathToken::Number {
                        value,
                        span: TextSpan::new(start, end),
                    });
                }
            }

            self.pos += 1;
        }
        None
    }
}
