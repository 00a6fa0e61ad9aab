//! Per-line slices of source tokens.
//!
//! A [`Segment`] pairs a shared source token with a "part": a fresh token
//! holding only the slice of the source's origin that falls on one line.
//! Segments cut from the same source share its `Arc`, and pointer identity
//! of that `Arc` is what de-duplicates them.

use std::collections::HashSet;
use std::sync::Arc;

use crate::line::{self, Line};
use crate::position::{Position, Range, Ranges, Span};
use crate::token::Token;

/// One line's slice of a source token.
#[derive(Debug, Clone)]
pub struct Segment {
    source: Arc<Token>,
    part: Token,
    width: usize,
}

impl Segment {
    pub(crate) fn new(source: Arc<Token>, part: Token) -> Self {
        let width = strip_newline(&part.origin).chars().count();
        Self {
            source,
            part,
            width,
        }
    }

    /// The token this segment was cut from.
    #[must_use]
    pub const fn source(&self) -> &Arc<Token> {
        &self.source
    }

    /// This line's slice of the source.
    #[must_use]
    pub const fn part(&self) -> &Token {
        &self.part
    }

    /// Rune count of the part's origin without its trailing `\n`.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// True if `tk` is either the source or the part of this segment.
    #[must_use]
    pub fn contains(&self, tk: &Token) -> bool {
        self.source_equals(tk) || std::ptr::eq(&self.part, tk)
    }

    /// True if `tk` is this segment's source, by identity.
    #[must_use]
    pub fn source_equals(&self, tk: &Token) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.source), tk)
    }

    /// The part's origin with the line terminator removed.
    #[must_use]
    pub fn content(&self) -> &str {
        let text = strip_newline(&self.part.origin);
        text.strip_suffix('\r').unwrap_or(text)
    }

    pub(crate) fn has_source(&self, source: *const Token) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.source), source)
    }
}

fn strip_newline(s: &str) -> &str {
    s.strip_suffix('\n').unwrap_or(s)
}

/// The segments of a single line, in column order.
#[derive(Debug, Clone, Default)]
pub struct Segments {
    items: Vec<Segment>,
}

impl Segments {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        self.items.push(segment);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.items.iter()
    }

    /// Largest part column on this line, or 0.
    #[must_use]
    pub fn next_column(&self) -> usize {
        self.items
            .iter()
            .filter_map(|s| s.part.position.map(|p| p.column))
            .max()
            .unwrap_or(0)
    }

    /// Each segment with the column span it occupies, counted from column 1.
    pub fn spans(&self) -> impl Iterator<Item = (Span, &Segment)> {
        let mut col = 1;
        self.items.iter().map(move |segment| {
            let span = Span::new(col, col + segment.width);
            col = span.end;
            (span, segment)
        })
    }

    /// The source token covering `col`, if any.
    #[must_use]
    pub fn source_token_at(&self, col: usize) -> Option<&Arc<Token>> {
        self.spans()
            .find(|(span, _)| span.contains(col))
            .map(|(_, segment)| &segment.source)
    }

    /// Clones of each distinct source, in first-occurrence order.
    #[must_use]
    pub fn source_tokens(&self) -> Vec<Token> {
        unique_sources(self.items.iter())
    }

    /// Clones of every part, in order.
    #[must_use]
    pub fn part_tokens(&self) -> Vec<Token> {
        self.items.iter().map(|s| s.part.clone()).collect()
    }

    /// Concatenated part origins with line terminators removed.
    #[must_use]
    pub fn content(&self) -> String {
        self.items.iter().map(Segment::content).collect()
    }
}

impl<'a> IntoIterator for &'a Segments {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn unique_sources<'a>(segments: impl Iterator<Item = &'a Segment>) -> Vec<Token> {
    let mut seen = HashSet::new();
    segments
        .filter(|s| seen.insert(Arc::as_ptr(&s.source)))
        .map(|s| Token::clone(&s.source))
        .collect()
}

/// Document-wide view over the segments of every line.
#[derive(Debug, Clone, Copy)]
pub struct SegmentRows<'a> {
    lines: &'a [Line],
}

impl<'a> SegmentRows<'a> {
    pub(crate) const fn new(lines: &'a [Line]) -> Self {
        Self { lines }
    }

    fn segments(&self) -> impl Iterator<Item = &'a Segment> {
        self.lines.iter().flat_map(|line| line.segments().iter())
    }

    /// The line with the given number.
    #[must_use]
    pub fn line(&self, number: usize) -> Option<&'a Line> {
        line::index_of(self.lines, number).and_then(|index| self.lines.get(index))
    }

    /// Clones of each distinct source across the document.
    #[must_use]
    pub fn source_tokens(&self) -> Vec<Token> {
        unique_sources(self.segments())
    }

    /// Clones of every part across the document.
    #[must_use]
    pub fn part_tokens(&self) -> Vec<Token> {
        self.segments().map(|s| s.part.clone()).collect()
    }

    /// The source under the cursor at `(line, col)`.
    #[must_use]
    pub fn source_at(&self, line: usize, col: usize) -> Option<&'a Arc<Token>> {
        self.line(line)?.segments().source_token_at(col)
    }

    /// One range per segment cut from `source`.
    #[must_use]
    pub fn token_ranges(&self, source: &Token) -> Ranges {
        let source: *const Token = source;
        self.lines
            .iter()
            .flat_map(|line| {
                line.segments()
                    .spans()
                    .filter(move |(_, segment)| segment.has_source(source))
                    .map(move |(span, _)| Range::on_line(line.number(), span))
            })
            .collect()
    }

    /// Ranges of every segment of the source under `(line, col)`.
    #[must_use]
    pub fn token_ranges_at(&self, line: usize, col: usize) -> Ranges {
        self.source_at(line, col)
            .map_or_else(Ranges::new, |source| self.token_ranges(source))
    }

    /// Start position of every segment cut from `source`.
    #[must_use]
    pub fn token_positions(&self, source: &Token) -> Vec<Position> {
        self.token_ranges(source)
            .into_iter()
            .map(|range| range.start)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{TokenKind, TokenPosition};

    fn segment(source: &Arc<Token>, origin: &str, column: usize) -> Segment {
        let mut part = Token::new(source.kind, "", origin);
        part.position = Some(TokenPosition::new(1, column, column));
        Segment::new(Arc::clone(source), part)
    }

    #[test]
    fn width_ignores_trailing_newline() {
        let source = Arc::new(Token::new(TokenKind::String, "v", " v\n"));
        let s = segment(&source, " v\n", 2);
        assert_eq!(s.width(), 2);
        assert_eq!(s.content(), " v");
    }

    #[test]
    fn content_strips_crlf() {
        let source = Arc::new(Token::new(TokenKind::String, "v", " v\r\n"));
        let s = segment(&source, " v\r\n", 2);
        assert_eq!(s.content(), " v");
        assert_eq!(s.width(), 3);
    }

    #[test]
    fn identity_not_equality() {
        let a = Arc::new(Token::new(TokenKind::String, "x", "x"));
        let b = Arc::new(Token::new(TokenKind::String, "x", "x"));
        let s = segment(&a, "x", 1);
        assert!(s.source_equals(&a));
        assert!(!s.source_equals(&b));
        assert!(s.contains(s.part()));
        assert!(!s.contains(&b));
    }

    #[test]
    fn source_token_at_walks_widths() {
        let key = Arc::new(Token::new(TokenKind::String, "key", "key"));
        let colon = Arc::new(Token::new(TokenKind::MappingValue, ":", ":"));
        let value = Arc::new(Token::new(TokenKind::String, "v", " v\n"));
        let mut segments = Segments::new();
        segments.push(segment(&key, "key", 1));
        segments.push(segment(&colon, ":", 4));
        segments.push(segment(&value, " v\n", 6));

        assert!(Arc::ptr_eq(segments.source_token_at(1).unwrap(), &key));
        assert!(Arc::ptr_eq(segments.source_token_at(3).unwrap(), &key));
        assert!(Arc::ptr_eq(segments.source_token_at(4).unwrap(), &colon));
        assert!(Arc::ptr_eq(segments.source_token_at(6).unwrap(), &value));
        assert!(segments.source_token_at(7).is_none());
        assert!(segments.source_token_at(0).is_none());
        assert_eq!(segments.next_column(), 6);
    }

    #[test]
    fn clone_shares_sources() {
        let source = Arc::new(Token::new(TokenKind::String, "x", "x"));
        let mut segments = Segments::new();
        segments.push(segment(&source, "x", 1));
        let copy = segments.clone();
        let original = segments.get(0).unwrap();
        let cloned = copy.get(0).unwrap();
        assert!(Arc::ptr_eq(original.source(), cloned.source()));
        assert!(!std::ptr::eq(original.part(), cloned.part()));
    }

    #[test]
    fn source_tokens_dedup_by_identity() {
        let shared = Arc::new(Token::new(TokenKind::String, "ab", "a\nb"));
        let twin = Arc::new(Token::new(TokenKind::String, "ab", "a\nb"));
        let mut segments = Segments::new();
        segments.push(segment(&shared, "a\n", 1));
        segments.push(segment(&shared, "b", 1));
        segments.push(segment(&twin, "a\n", 1));
        assert_eq!(segments.source_tokens().len(), 2);
        assert_eq!(segments.part_tokens().len(), 3);
    }
}
