//! Path data to resolved segments.
//!
//! ## Learning: Explicit State Machines
//!
//! Path data is small but stateful: the meaning of `10 20` depends on the
//! last command letter, how many numbers followed it, whether it was
//! lowercase, and where the pen currently is. Keeping that state in named
//! structs ([`PathCursor`] for the pen, [`Pending`] for the half-read
//! command) instead of loop-local variables makes every transition a
//! method we can test on its own.

use super::command::{CommandLetter, PathCommand};
use super::lexer::{PathLexer, PathToken};
use super::segment::ResolvedSegment;
use crate::geometry::Point;
use crate::span::TextSpan;

/// Pen state threaded across commands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathCursor {
    /// Where the last command ended
    pub current: Point,
    /// Where the last moveto went; the target of `Z`
    pub subpath_start: Point,
}

impl PathCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves one command against the pen and advances it.
    ///
    /// `command.args` must hold exactly `letter.arity()` values, which
    /// [`PathParser`] guarantees.
    pub fn apply(&mut self, command: &PathCommand) -> ResolvedSegment {
        let start = self.current;
        let base = if command.relative { start } else { Point::ORIGIN };
        let args = &command.args;
        let point = |i: usize| Point::new(args[i], args[i + 1]) + base;

        let segment = match command.letter {
            CommandLetter::M => {
                let end = point(0);
                self.subpath_start = end;
                ResolvedSegment::move_to(start, end)
            }
            CommandLetter::L | CommandLetter::T => ResolvedSegment::line(start, point(0)),
            CommandLetter::H => {
                let x = if command.relative { start.x + args[0] } else { args[0] };
                ResolvedSegment::line(start, Point::new(x, start.y))
            }
            CommandLetter::V => {
                let y = if command.relative { start.y + args[0] } else { args[0] };
                ResolvedSegment::line(start, Point::new(start.x, y))
            }
            CommandLetter::C => ResolvedSegment::cubic(start, point(0), point(2), point(4)),
            CommandLetter::S => ResolvedSegment::smooth_cubic(start, point(0), point(2)),
            CommandLetter::Q => ResolvedSegment::quadratic(start, point(0), point(2)),
            CommandLetter::A => ResolvedSegment::line(start, point(5)),
            CommandLetter::Z => ResolvedSegment::line(start, self.subpath_start),
        };

        self.current = segment.end();
        segment
    }
}

/// One drawing instance: the command as written and its resolved shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub command: PathCommand,
    pub segment: ResolvedSegment,
}

impl PathSegment {
    /// Text span of the command within the path data.
    pub fn span(&self) -> TextSpan {
        self.command.span
    }
}

/// The command letter currently collecting arguments.
#[derive(Debug, Clone)]
struct Pending {
    letter: CommandLetter,
    relative: bool,
    /// The letter for the first chunk, then the end of the previous one
    chunk_start: usize,
    args: Vec<f64>,
}

impl Pending {
    fn new(letter: CommandLetter, relative: bool, letter_start: usize) -> Self {
        Self {
            letter,
            relative,
            chunk_start: letter_start,
            args: Vec::with_capacity(letter.arity()),
        }
    }

    /// Adds one argument; returns the completed command when the chunk fills.
    fn push(&mut self, value: f64, span: TextSpan) -> Option<PathCommand> {
        self.args.push(value);
        if self.args.len() < self.letter.arity() {
            return None;
        }

        let command = PathCommand {
            letter: self.letter,
            relative: self.relative,
            args: std::mem::take(&mut self.args),
            span: TextSpan::new(self.chunk_start, span.end),
        };

        // A repetition owns the separator in front of it
        self.chunk_start = span.end;
        // Extra pairs after a moveto are linetos
        if self.letter == CommandLetter::M {
            self.letter = CommandLetter::L;
        }
        Some(command)
    }

    fn discard_partial(&self) {
        if !self.args.is_empty() {
            tracing::trace!(
                command = %self.letter.as_char(self.relative),
                have = self.args.len(),
                need = self.letter.arity(),
                "dropping incomplete argument group"
            );
        }
    }
}

/// Streaming parser from path data to [`PathSegment`]s.
#[derive(Debug, Default)]
pub struct PathParser {
    cursor: PathCursor,
    pending: Option<Pending>,
    segments: Vec<PathSegment>,
}

impl PathParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one token.
    pub fn feed(&mut self, token: PathToken) {
        match token {
            PathToken::Command { letter, relative, span } => {
                if let Some(pending) = self.pending.take() {
                    pending.discard_partial();
                }
                if letter == CommandLetter::Z {
                    self.emit(PathCommand {
                        letter,
                        relative,
                        args: Vec::new(),
                        span,
                    });
                } else {
                    self.pending = Some(Pending::new(letter, relative, span.start));
                }
            }
            PathToken::Number { value, span } => {
                // Numbers before any command, or after a closepath, are noise
                let Some(pending) = self.pending.as_mut() else {
                    return;
                };
                if let Some(command) = pending.push(value, span) {
                    self.emit(command);
                }
            }
        }
    }

    fn emit(&mut self, command: PathCommand) {
        let segment = self.cursor.apply(&command);
        self.segments.push(PathSegment { command, segment });
    }

    /// Current pen state.
    pub fn cursor(&self) -> PathCursor {
        self.cursor
    }

    /// Ends the stream, dropping any incomplete trailing group.
    pub fn finish(self) -> Vec<PathSegment> {
        if let Some(pending) = &self.pending {
            pending.discard_partial();
        }
        self.segments
    }
}

/// Parses path data into segments in document order.
///
/// Total over any input: garbage bytes separate tokens, and incomplete
/// argument groups are dropped.
///
/// # Example
/// ```
/// use svgsync_syntax::path::parse_path;
///
/// let segments = parse_path("M10 10 L20 20");
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[1].segment.end().x, 20.0);
/// ```
pub fn parse_path(d: &str) -> Vec<PathSegment> {
    let mut parser = PathParser::new();
    for token in PathLexer::new(d) {
        parser.feed(token);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::SegmentKind;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn summary(d: &str) -> Vec<(SegmentKind, Point, Point)> {
        parse_path(d)
            .iter()
            .map(|s| (s.segment.kind(), s.segment.start(), s.segment.end()))
            .collect()
    }

    #[test]
    fn test_closed_triangle() {
        assert_eq!(
            summary("M10 10 L20 20 L30 10 Z"),
            vec![
                (SegmentKind::Move, p(0.0, 0.0), p(10.0, 10.0)),
                (SegmentKind::Line, p(10.0, 10.0), p(20.0, 20.0)),
                (SegmentKind::Line, p(20.0, 20.0), p(30.0, 10.0)),
                (SegmentKind::Line, p(30.0, 10.0), p(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn test_comma_separated_forms() {
        assert_eq!(
            summary("M0,0 L10,0 L10,10 Z"),
            vec![
                (SegmentKind::Move, p(0.0, 0.0), p(0.0, 0.0)),
                (SegmentKind::Line, p(0.0, 0.0), p(10.0, 0.0)),
                (SegmentKind::Line, p(10.0, 0.0), p(10.0, 10.0)),
                (SegmentKind::Line, p(10.0, 10.0), p(0.0, 0.0)),
            ]
        );

        let curve = parse_path("M0,0 C10,0 10,10 0,10");
        assert_eq!(curve[1].segment.controls(), &[p(10.0, 0.0), p(10.0, 10.0)]);
        assert_eq!(curve[1].segment.end(), p(0.0, 10.0));

        let rel = summary("M0,0 l5,5 l5,5");
        assert_eq!(rel[2], (SegmentKind::Line, p(5.0, 5.0), p(10.0, 10.0)));
    }

    #[test]
    fn test_cubic_controls() {
        let segments = parse_path("M0 0 C 10 0 20 10 20 20");
        assert_eq!(segments.len(), 2);
        let cubic = &segments[1].segment;
        assert_eq!(cubic.kind(), SegmentKind::Cubic);
        assert_eq!(cubic.start(), p(0.0, 0.0));
        assert_eq!(cubic.controls(), &[p(10.0, 0.0), p(20.0, 10.0)]);
        assert_eq!(cubic.end(), p(20.0, 20.0));
    }

    #[test]
    fn test_relative_accumulates() {
        let ends: Vec<Point> = parse_path("m5 5 l10 0 0 10 -10 0 z")
            .iter()
            .map(|s| s.segment.end())
            .collect();
        assert_eq!(ends, vec![p(5.0, 5.0), p(15.0, 5.0), p(15.0, 15.0), p(5.0, 15.0), p(5.0, 5.0)]);
    }

    #[test]
    fn test_relative_controls_offset_from_segment_start() {
        let segments = parse_path("M10 10 c1 2 3 4 5 6 q1 1 2 2");
        let cubic = &segments[1].segment;
        assert_eq!(cubic.controls(), &[p(11.0, 12.0), p(13.0, 14.0)]);
        assert_eq!(cubic.end(), p(15.0, 16.0));
        let quad = &segments[2].segment;
        assert_eq!(quad.controls(), &[p(16.0, 17.0)]);
        assert_eq!(quad.end(), p(17.0, 18.0));
    }

    #[test]
    fn test_moveto_repeats_as_lineto() {
        let segments = parse_path("M0 0 10 0 10 10");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].command.letter, CommandLetter::M);
        assert_eq!(segments[1].command.letter, CommandLetter::L);
        assert_eq!(segments[2].command.letter, CommandLetter::L);
        assert_eq!(segments[2].segment.end(), p(10.0, 10.0));

        let relative = parse_path("m1 1 2 2");
        assert_eq!(relative[1].command.letter, CommandLetter::L);
        assert!(relative[1].command.relative);
        assert_eq!(relative[1].segment.end(), p(3.0, 3.0));
    }

    #[test]
    fn test_second_moveto_resets_subpath() {
        let segments = parse_path("M0 0 L5 0 M10 10 L20 10 Z");
        assert_eq!(segments.last().unwrap().segment.end(), p(10.0, 10.0));
    }

    #[test]
    fn test_horizontal_vertical() {
        assert_eq!(
            summary("M1 2 H5 V7 h-1 v-1"),
            vec![
                (SegmentKind::Move, p(0.0, 0.0), p(1.0, 2.0)),
                (SegmentKind::Line, p(1.0, 2.0), p(5.0, 2.0)),
                (SegmentKind::Line, p(5.0, 2.0), p(5.0, 7.0)),
                (SegmentKind::Line, p(5.0, 7.0), p(4.0, 7.0)),
                (SegmentKind::Line, p(4.0, 7.0), p(4.0, 6.0)),
            ]
        );
    }

    #[test]
    fn test_smooth_and_arc_normalization() {
        let segments = parse_path("M0 0 S 5 5 10 0 T 20 0 A 5 5 0 0 1 30 0");
        let smooth = &segments[1].segment;
        assert_eq!(smooth.kind(), SegmentKind::SmoothCubic);
        assert_eq!(smooth.controls(), &[p(5.0, 5.0)]);

        let t = &segments[2].segment;
        assert_eq!((t.kind(), t.end()), (SegmentKind::Line, p(20.0, 0.0)));
        assert!(t.controls().is_empty());

        let arc = &segments[3].segment;
        assert_eq!((arc.kind(), arc.start(), arc.end()), (SegmentKind::Line, p(20.0, 0.0), p(30.0, 0.0)));
    }

    #[test]
    fn test_spans_cover_letter_and_arguments() {
        let d = "M10 10 L20 20 30 30";
        let spans: Vec<&str> = parse_path(d).iter().map(|s| s.span().slice(d)).collect();
        assert_eq!(spans, vec!["M10 10", "L20 20", " 30 30"]);
    }

    #[test]
    fn test_moveto_repetition_span_starts_after_previous_pair() {
        let d = "M0 0,  10 0 10 10";
        let spans: Vec<TextSpan> = parse_path(d).iter().map(PathSegment::span).collect();
        assert_eq!(
            spans,
            vec![TextSpan::new(0, 4), TextSpan::new(4, 11), TextSpan::new(11, 17)]
        );
    }

    #[test]
    fn test_incomplete_groups_are_dropped() {
        assert_eq!(parse_path("M10 10 L20").len(), 1);
        assert_eq!(parse_path("M10 10 L20 C1 2 3 4 5 6").len(), 2);
        assert!(parse_path("10 20 30").is_empty());
        assert!(parse_path("").is_empty());
    }

    #[test]
    fn test_numbers_after_close_are_ignored() {
        let segments = parse_path("M0 0 L5 5 Z 7 7");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].span(), TextSpan::new(10, 11));
    }

    #[test]
    fn test_streaming_cursor() {
        let mut parser = PathParser::new();
        for token in PathLexer::new("M1 1 l2 2") {
            parser.feed(token);
        }
        assert_eq!(parser.cursor().current, p(3.0, 3.0));
        assert_eq!(parser.cursor().subpath_start, p(1.0, 1.0));
    }
}
