use std::fmt;

use crate::position::Span;
use crate::segment::Segments;
use crate::token::Token;

/// Where an annotation is drawn relative to its host line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationPosition {
    Above,
    Below,
}

/// A text row attached to a line for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub content: String,
    pub position: AnnotationPosition,
    /// Indentation in spaces, applied before the content.
    pub col: usize,
}

/// Styling class of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Error,
    Warning,
    Info,
    Highlight,
}

/// A marked column span within one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub cols: Span,
    pub kind: OverlayKind,
}

/// Diff state of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFlag {
    #[default]
    Default,
    Inserted,
    Deleted,
    /// Only the line's annotations are displayed.
    AnnotationOnly,
}

/// One source line: its segments plus display metadata.
#[derive(Debug, Clone)]
pub struct Line {
    segments: Segments,
    number: usize,
    pub annotations: Vec<Annotation>,
    pub overlays: Vec<Overlay>,
    pub flag: LineFlag,
}

impl Line {
    pub(crate) const fn new(segments: Segments, number: usize) -> Self {
        Self {
            segments,
            number,
            annotations: Vec::new(),
            overlays: Vec::new(),
            flag: LineFlag::Default,
        }
    }

    /// 1-indexed line number.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    #[must_use]
    pub const fn segments(&self) -> &Segments {
        &self.segments
    }

    pub(crate) const fn segments_mut(&mut self) -> &mut Segments {
        &mut self.segments
    }

    /// Line text without its terminator.
    #[must_use]
    pub fn content(&self) -> String {
        self.segments.content()
    }

    /// Rune count of [`Line::content`].
    #[must_use]
    pub fn width(&self) -> usize {
        self.content().chars().count()
    }

    /// True when the line has no visible text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.content().is_empty())
    }

    /// Clones of each part on this line.
    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        self.segments.part_tokens()
    }

    pub fn add_annotation(&mut self, content: &str, position: AnnotationPosition, col: usize) {
        self.annotations.push(Annotation {
            content: content.to_string(),
            position,
            col,
        });
    }

    /// Mark `cols` on this line, clamped to the line's width.
    pub fn add_overlay(&mut self, kind: OverlayKind, cols: Span) {
        let end = cols.end.min(self.width() + 1);
        let start = cols.start.max(1);
        if start < end {
            self.overlays.push(Overlay {
                cols: Span::new(start, end),
                kind,
            });
        }
    }

    fn annotation_rows(&self, position: AnnotationPosition) -> impl Iterator<Item = String> {
        self.annotations
            .iter()
            .filter(move |a| a.position == position)
            .map(|a| format!("{GUTTER}{:indent$}{}", "", a.content, indent = a.col))
    }
}

/// Index of the line numbered `number`. Numbers are strictly increasing.
pub(crate) fn index_of(lines: &[Line], number: usize) -> Option<usize> {
    lines.binary_search_by_key(&number, Line::number).ok()
}

const GUTTER: &str = "     | ";

impl fmt::Display for Line {
    /// Renders as `"%4d | content"`, with annotation rows above and below.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<String> = self.annotation_rows(AnnotationPosition::Above).collect();
        if self.flag != LineFlag::AnnotationOnly {
            rows.push(format!("{:4} | {}", self.number, self.content()));
        }
        rows.extend(self.annotation_rows(AnnotationPosition::Below));
        f.write_str(&rows.join("\n"))
    }
}
