//! Re-segments a lexed token stream at line boundaries.
//!
//! The builder walks tokens in document order and cuts each token's
//! `origin` at every `\n`, producing one [`Segment`] per slice. Every slice
//! keeps a pointer to the token it came from, so concatenating the slices
//! reproduces the document and de-duplicating by source reproduces the
//! token list.
//!
//! The lexer reports positions at a token's content, not at the start of
//! its origin, and reports block scalars in one of three shapes. Most of
//! the state below exists to translate those positions onto the slices.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::line::Line;
use crate::lines::Lines;
use crate::segment::{Segment, Segments};
use crate::token::{
    CharacterType, Indicator, Token, TokenKind, TokenPosition, leading_newlines,
    origin_start_offset,
};

/// Build [`Lines`] from a token sequence in one step.
#[must_use]
pub fn build_lines<I>(tokens: I) -> Lines
where
    I: IntoIterator,
    I::Item: Into<Arc<Token>>,
{
    let mut builder = LineBuilder::new();
    builder.extend(tokens);
    builder.finish()
}

/// Incremental line builder.
///
/// Tokens are pushed in document order; [`LineBuilder::finish`] consumes
/// the builder and returns the lines. The builder never rejects input:
/// malformed positions surface later through [`Lines::validate`].
#[derive(Debug, Default)]
pub struct LineBuilder {
    lines: Vec<Line>,
    current: Segments,
    started: bool,
    current_line: usize,
    current_offset: usize,
    current_indent_num: usize,
    current_indent_level: usize,
    prev_line_indent_num: usize,
    prev_ended_with_newline: bool,
    /// Kind of the last non-comment token.
    last_significant: Option<TokenKind>,
}

/// Where the interesting parts of one token's origin fall.
struct PartLayout {
    count: usize,
    first_content: Option<usize>,
    last_content: Option<usize>,
    value_index: Option<usize>,
    block_content: bool,
    leading_blank: bool,
}

impl PartLayout {
    fn new(parts: &[&str], block_content: bool) -> Self {
        let first_content = parts.iter().position(|p| !is_pure_newline(p));
        let last_content = parts.iter().rposition(|p| !is_pure_newline(p));
        Self {
            count: parts.len(),
            first_content,
            last_content,
            value_index: if block_content {
                last_content
            } else {
                first_content
            },
            block_content,
            leading_blank: parts.len() > 1 && parts.first().is_some_and(|p| is_pure_newline(p)),
        }
    }

    const fn is_single(&self) -> bool {
        self.count == 1
    }
}

impl LineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one token.
    pub fn push(&mut self, token: impl Into<Arc<Token>>) {
        let token = token.into();
        if !self.started {
            self.start(&token);
        }

        let block_content = token.kind == TokenKind::String
            && self
                .last_significant
                .is_some_and(TokenKind::is_block_scalar_header);

        trace!(
            target: "yaml_lines::builder",
            kind = ?token.kind,
            line = self.current_line,
            offset = self.current_offset,
            block_content,
            "consuming token"
        );

        self.skip_gap(&token);

        let parts = split_parts(&token.origin);
        let layout = PartLayout::new(&parts, block_content);
        for (index, part) in parts.iter().enumerate() {
            self.push_part(&token, &layout, index, part);
        }

        self.prev_ended_with_newline = token.origin.ends_with('\n');
        if token.kind != TokenKind::Comment {
            self.last_significant = Some(token.kind);
        }
    }

    /// Flush the last line and return the result.
    #[must_use]
    pub fn finish(mut self) -> Lines {
        if !self.current.is_empty() {
            let segments = std::mem::take(&mut self.current);
            self.lines.push(Line::new(segments, self.current_line));
        }
        Lines::new(self.lines)
    }

    fn start(&mut self, token: &Token) {
        self.started = true;
        let mut line = token.position.map_or(1, |p| p.line);
        let newlines = leading_newlines(&token.origin);
        if newlines > 0 && newlines < line {
            line -= newlines;
        }
        self.current_line = line;
        self.current_offset = 1;
        self.resync(token);
    }

    fn resync(&mut self, token: &Token) {
        if let Some(pos) = token.position {
            self.current_offset = origin_start_offset(pos.offset, &token.origin);
            self.current_indent_num = pos.indent_num;
            self.current_indent_level = pos.indent_level;
        }
    }

    /// Fast-forward over lines the lexer skipped between single-line tokens.
    fn skip_gap(&mut self, token: &Token) {
        let Some(pos) = token.position else {
            return;
        };
        let newlines = token.origin.matches('\n').count();
        let simple = newlines == 0 || (newlines == 1 && token.origin.ends_with('\n'));
        if !simple || pos.line <= self.current_line + 1 {
            return;
        }

        debug!(
            target: "yaml_lines::builder",
            from = self.current_line,
            to = pos.line,
            "line gap, fast-forwarding"
        );
        if !self.current.is_empty() {
            self.finish_line();
        }
        self.current_line = pos.line;
        self.resync(token);
    }

    fn push_part(&mut self, token: &Arc<Token>, layout: &PartLayout, index: usize, part: &str) {
        let pure_newline = is_pure_newline(part);

        if index == 0
            && pure_newline
            && self.prev_ended_with_newline
            && token.position.is_some_and(|p| p.line == self.current_line)
            && self.attach_duplicate_newline(token, part)
        {
            return;
        }

        if self.current.is_empty() && !pure_newline {
            self.track_indent(token, layout, index, part);
        }

        let carries_value = layout.value_index == Some(index);
        let value = if carries_value {
            token.value.as_str()
        } else {
            ""
        };

        let position = token.position.map(|orig| {
            let column = if pure_newline {
                self.current.next_column() + 1
            } else if carries_value || layout.first_content == Some(index) {
                orig.column
            } else {
                1
            };
            // block content takes the lexer offset only on its anchor part below
            let offset = if layout.is_single()
                || (!layout.block_content && carries_value && !value.is_empty())
            {
                orig.offset
            } else {
                self.current_offset
            };
            let computed = TokenPosition {
                line: self.current_line,
                column,
                offset,
                indent_num: self.current_indent_num,
                indent_level: self.current_indent_level,
            };

            if layout.block_content && !layout.is_single() {
                // column 0 marks "first content line", anything else the last
                let anchor = if orig.column == 0 {
                    layout.first_content
                } else {
                    layout.last_content
                };
                if anchor == Some(index) {
                    return orig;
                }
            } else if layout.leading_blank && layout.first_content == Some(index) {
                return orig;
            }
            computed
        });

        if !layout.block_content && layout.leading_blank && layout.first_content == Some(index) {
            if let Some(orig) = token.position {
                self.current_indent_level = orig.indent_level;
            }
        }

        let retype = is_horizontal_space(part) && value.is_empty() && !layout.block_content;
        let part_token = make_part(token, part, value, position, retype);
        self.current.push(Segment::new(Arc::clone(token), part_token));
        self.current_offset += part.chars().count();

        if part.ends_with('\n') {
            self.finish_line();
        }
    }

    /// The lexer sometimes counts a line boundary twice: the previous token
    /// already ended the line, yet this token opens with another `\n` while
    /// claiming the current line. That `\n` is hung on the previous line.
    fn attach_duplicate_newline(&mut self, token: &Arc<Token>, part: &str) -> bool {
        let Some(prev) = self.lines.last_mut() else {
            return false;
        };
        let position = token.position.map(|_| TokenPosition {
            line: prev.number(),
            column: prev.segments().next_column() + 1,
            offset: self.current_offset,
            indent_num: self.prev_line_indent_num,
            indent_level: self.current_indent_level,
        });

        debug!(
            target: "yaml_lines::builder",
            line = prev.number(),
            "attaching duplicate newline to previous line"
        );
        let part_token = make_part(token, part, "", position, false);
        prev.segments_mut()
            .push(Segment::new(Arc::clone(token), part_token));
        self.current_offset += part.chars().count();
        true
    }

    fn track_indent(&mut self, token: &Token, layout: &PartLayout, index: usize, part: &str) {
        if index == 0 && (!layout.block_content || layout.is_single()) {
            if let Some(pos) = token.position {
                self.current_indent_num = pos.indent_num;
                self.current_indent_level = pos.indent_level;
                return;
            }
        }

        let indent = part.chars().take_while(|c| *c == ' ').count();
        match indent.cmp(&self.prev_line_indent_num) {
            Ordering::Greater => self.current_indent_level += 1,
            Ordering::Less => {
                self.current_indent_level = self.current_indent_level.saturating_sub(1);
            }
            Ordering::Equal => {}
        }
        self.current_indent_num = indent;
    }

    fn finish_line(&mut self) {
        let segments = std::mem::take(&mut self.current);
        self.lines.push(Line::new(segments, self.current_line));
        self.prev_line_indent_num = self.current_indent_num;
        self.current_line += 1;
    }
}

impl<T: Into<Arc<Token>>> Extend<T> for LineBuilder {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for token in iter {
            self.push(token);
        }
    }
}

impl<T: Into<Arc<Token>>> FromIterator<T> for Lines {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        build_lines(iter)
    }
}

fn make_part(
    source: &Token,
    origin: &str,
    value: &str,
    position: Option<TokenPosition>,
    retype: bool,
) -> Token {
    let (kind, character_type, indicator) = if retype {
        (TokenKind::Space, CharacterType::WhiteSpace, Indicator::NotIndicator)
    } else {
        (source.kind, source.character_type, source.indicator)
    };
    Token {
        kind,
        character_type,
        indicator,
        value: value.to_string(),
        origin: origin.to_string(),
        position,
    }
}

/// Split at `\n`, keeping each terminator on the slice it ends.
fn split_parts(origin: &str) -> Vec<&str> {
    if origin.is_empty() {
        return vec![""];
    }
    origin.split_inclusive('\n').collect()
}

fn is_pure_newline(part: &str) -> bool {
    part == "\n" || part == "\r\n"
}

fn is_horizontal_space(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c == ' ' || c == '\t')
}
