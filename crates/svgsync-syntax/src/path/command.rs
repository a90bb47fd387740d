//! Path commands as written in the source text.

use crate::span::TextSpan;

/// The ten path command letters, case folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandLetter {
    M,
    L,
    H,
    V,
    C,
    S,
    Q,
    T,
    A,
    Z,
}

impl CommandLetter {
    /// Maps a byte to its letter and whether it was lowercase (relative).
    pub fn from_byte(b: u8) -> Option<(Self, bool)> {
        let letter = match b.to_ascii_uppercase() {
            b'M' => Self::M,
            b'L' => Self::L,
            b'H' => Self::H,
            b'V' => Self::V,
            b'C' => Self::C,
            b'S' => Self::S,
            b'Q' => Self::Q,
            b'T' => Self::T,
            b'A' => Self::A,
            b'Z' => Self::Z,
            _ => return None,
        };
        Some((letter, b.is_ascii_lowercase()))
    }

    /// Number of arguments one repetition of the command consumes.
    pub const fn arity(self) -> usize {
        match self {
            Self::M | Self::L | Self::T => 2,
            Self::H | Self::V => 1,
            Self::C => 6,
            Self::S | Self::Q => 4,
            Self::A => 7,
            Self::Z => 0,
        }
    }

    /// The letter in the given case.
    pub const fn as_char(self, relative: bool) -> char {
        let upper = match self {
            Self::M => 'M',
            Self::L => 'L',
            Self::H => 'H',
            Self::V => 'V',
            Self::C => 'C',
            Self::S => 'S',
            Self::Q => 'Q',
            Self::T => 'T',
            Self::A => 'A',
            Self::Z => 'Z',
        };
        if relative { upper.to_ascii_lowercase() } else { upper }
    }
}

/// One complete command occurrence with its arguments.
///
/// Implicit repetitions (`L 1 2 3 4`) become separate commands; a repeated
/// moveto turns into a lineto of the same case.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub letter: CommandLetter,
    pub relative: bool,
    pub args: Vec<f64>,
    /// From the command letter to the end of the last argument. A
    /// repetition starts where the previous repetition ended, so the
    /// separator in front of it belongs to it.
    pub span: TextSpan,
}

impl std::fmt::Display for PathCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter.as_char(self.relative))?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
