use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::line::{self, Line, OverlayKind};
use crate::position::{Position, Range, Ranges, Span};
use crate::segment::SegmentRows;
use crate::token::Token;

/// Classifies an integrity defect found by [`Lines::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A line number is not greater than the one before it.
    LineNumberNotIncreasing { previous: usize, current: usize },
    /// A part's position names a different line than the one holding it.
    LineNumberMismatch { line: usize, part: usize },
    /// Two non-empty parts on one line have non-increasing columns.
    ColumnNotIncreasing { previous: usize, current: usize },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineNumberNotIncreasing { previous, current } => {
                write!(f, "line number {current} does not follow {previous}")
            }
            Self::LineNumberMismatch { line, part } => {
                write!(f, "part on line {line} claims line {part}")
            }
            Self::ColumnNotIncreasing { previous, current } => {
                write!(f, "column {current} does not follow {previous}")
            }
        }
    }
}

/// Integrity defect with its location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line index {line_index}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Index into [`Lines`], not a line number.
    pub line_index: usize,
    /// Offending segment within the line, when the defect is per-segment.
    pub segment_index: Option<usize>,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, line_index: usize, segment_index: Option<usize>) -> Self {
        debug!(
            target: "yaml_lines::lines",
            %kind,
            line_index,
            ?segment_index,
            "validation failed"
        );
        Self {
            kind,
            line_index,
            segment_index,
        }
    }
}

/// A document as a sequence of [`Line`]s.
///
/// Segments are fixed after building; only per-line metadata
/// (annotations, overlays, flag) is meant to change.
#[derive(Debug, Clone, Default)]
pub struct Lines {
    lines: Vec<Line>,
}

impl Lines {
    pub(crate) const fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Line> {
        self.lines.iter_mut()
    }

    /// Line by 1-indexed number. Numbers may have gaps.
    #[must_use]
    pub fn line(&self, number: usize) -> Option<&Line> {
        self.rows().line(number)
    }

    pub fn line_mut(&mut self, number: usize) -> Option<&mut Line> {
        let index = line::index_of(&self.lines, number)?;
        self.lines.get_mut(index)
    }

    /// Segment view across all lines.
    #[must_use]
    pub fn rows(&self) -> SegmentRows<'_> {
        SegmentRows::new(&self.lines)
    }

    /// Clones of the distinct source tokens, in document order.
    ///
    /// This is the inverse of building; `prev`/`next` style links are the
    /// caller's to rebuild.
    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        self.rows().source_tokens()
    }

    /// Clones of every per-line part.
    #[must_use]
    pub fn part_tokens(&self) -> Vec<Token> {
        self.rows().part_tokens()
    }

    /// The reconstructed document text.
    #[must_use]
    pub fn source_text(&self) -> String {
        self.lines
            .iter()
            .flat_map(|line| line.segments().iter())
            .map(|segment| segment.part().origin.as_str())
            .collect()
    }

    /// The shared source token under the cursor.
    #[must_use]
    pub fn source_at(&self, pos: Position) -> Option<&Arc<Token>> {
        self.rows().source_at(pos.line, pos.col)
    }

    /// A clone of the source token under the cursor.
    #[must_use]
    pub fn token_at(&self, pos: Position) -> Option<Token> {
        self.source_at(pos).map(|tk| tk.as_ref().clone())
    }

    /// Every position at which `source` starts a segment.
    #[must_use]
    pub fn token_positions(&self, source: &Token) -> Vec<Position> {
        self.rows().token_positions(source)
    }

    /// One range per line `source` occupies.
    #[must_use]
    pub fn token_position_ranges(&self, source: &Token) -> Ranges {
        self.rows().token_ranges(source)
    }

    /// Ranges of the token under the cursor.
    #[must_use]
    pub fn token_position_ranges_at(&self, pos: Position) -> Ranges {
        self.rows().token_ranges_at(pos.line, pos.col)
    }

    /// Like [`Lines::token_position_ranges_at`], with surrounding spaces
    /// trimmed from each range. Blank segments yield no range.
    #[must_use]
    pub fn content_position_ranges_at(&self, pos: Position) -> Ranges {
        let Some(source) = self.source_at(pos) else {
            return Ranges::new();
        };
        let source: *const Token = Arc::as_ptr(source);

        let mut ranges = Ranges::new();
        for line in &self.lines {
            for (span, segment) in line.segments().spans() {
                if !segment.has_source(source) {
                    continue;
                }
                let text = segment.content();
                let lead = text.chars().take_while(|c| *c == ' ').count();
                let len = text.trim_matches(' ').chars().count();
                if len > 0 {
                    let start = span.start + lead;
                    ranges.add(Range::on_line(line.number(), Span::new(start, start + len)));
                }
            }
        }
        ranges
    }

    /// Add an overlay for each range, split into one span per line.
    pub fn add_overlay(&mut self, kind: OverlayKind, ranges: impl IntoIterator<Item = Range>) {
        for range in ranges {
            let covered = range.start.line..=range.end.line;
            for line in self
                .lines
                .iter_mut()
                .filter(|line| covered.contains(&line.number()))
            {
                let start = if line.number() == range.start.line {
                    range.start.col
                } else {
                    1
                };
                let end = if line.number() == range.end.line {
                    range.end.col
                } else {
                    usize::MAX
                };
                line.add_overlay(kind, Span::new(start, end));
            }
        }
    }

    pub fn clear_overlays(&mut self) {
        for line in &mut self.lines {
            line.overlays.clear();
        }
    }

    /// Check line numbering and per-line column order.
    ///
    /// Parts without a position are skipped. Zero-width parts are exempt
    /// from the column check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut previous_number: Option<usize> = None;

        for (line_index, line) in self.lines.iter().enumerate() {
            let number = line.number();
            if number != 0 {
                if let Some(previous) = previous_number.filter(|p| number <= *p) {
                    return Err(ValidationError::new(
                        ValidationErrorKind::LineNumberNotIncreasing {
                            previous,
                            current: number,
                        },
                        line_index,
                        None,
                    ));
                }
                previous_number = Some(number);
            }

            let mut previous_column: Option<usize> = None;
            for (segment_index, segment) in line.segments().iter().enumerate() {
                let Some(pos) = segment.part().position else {
                    continue;
                };
                if pos.line != number {
                    return Err(ValidationError::new(
                        ValidationErrorKind::LineNumberMismatch {
                            line: number,
                            part: pos.line,
                        },
                        line_index,
                        Some(segment_index),
                    ));
                }
                if segment.part().origin.is_empty() {
                    continue;
                }
                if let Some(previous) = previous_column.filter(|p| pos.column <= *p) {
                    return Err(ValidationError::new(
                        ValidationErrorKind::ColumnNotIncreasing {
                            previous,
                            current: pos.column,
                        },
                        line_index,
                        Some(segment_index),
                    ));
                }
                previous_column = Some(pos.column);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Lines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Lines {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a mut Lines {
    type Item = &'a mut Line;
    type IntoIter = std::slice::IterMut<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter_mut()
    }
}
