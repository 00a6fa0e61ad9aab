//! Splitting a multi-document token stream.

use tracing::trace;

use crate::token::{Token, TokenKind, leading_newlines, origin_start_offset};

/// How [`split_documents`] treats token positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// Keep positions relative to the whole stream.
    #[default]
    Preserve,
    /// Rebase positions so each document starts at line 1, column 1,
    /// offset 1.
    ResetPositions,
}

/// Split `tokens` at every document header.
///
/// A header belongs to the document it opens. Tokens before the first
/// header form their own document.
#[must_use]
pub fn split_documents(tokens: impl IntoIterator<Item = Token>, mode: SplitMode) -> Vec<Vec<Token>> {
    let mut documents = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        if token.kind == TokenKind::DocumentHeader && !current.is_empty() {
            documents.push(std::mem::take(&mut current));
        }
        current.push(token);
    }
    if !current.is_empty() {
        documents.push(current);
    }

    for (index, document) in documents.iter_mut().enumerate() {
        trace!(
            target: "yaml_lines::document",
            index,
            tokens = document.len(),
            ?mode,
            "split document"
        );
        if mode == SplitMode::ResetPositions {
            reset_positions(document);
        }
    }
    documents
}

/// Where a document's first rune sits in the enclosing stream.
struct Origin {
    line: usize,
    column: usize,
    offset: usize,
}

impl Origin {
    fn locate(document: &[Token]) -> Option<Self> {
        let mut runes_before = 0;
        let mut newlines_before = 0;
        for token in document {
            if let Some(pos) = token.position {
                let newlines = leading_newlines(&token.origin);
                let column = if newlines_before == 0 && newlines == 0 {
                    let indent = token
                        .origin
                        .chars()
                        .take_while(|c| *c == ' ' || *c == '\t')
                        .count();
                    pos.column.saturating_sub(indent + runes_before).max(1)
                } else {
                    1
                };
                return Some(Self {
                    line: pos
                        .line
                        .saturating_sub(newlines + newlines_before)
                        .max(1),
                    column,
                    offset: origin_start_offset(pos.offset, &token.origin)
                        .saturating_sub(runes_before)
                        .max(1),
                });
            }
            runes_before += token.origin.chars().count();
            newlines_before += token.origin.matches('\n').count();
        }
        None
    }
}

fn reset_positions(document: &mut [Token]) {
    let Some(origin) = Origin::locate(document) else {
        return;
    };
    for token in document {
        if let Some(pos) = token.position.as_mut() {
            if pos.line == origin.line {
                pos.column = pos.column.saturating_sub(origin.column - 1);
            }
            pos.line = pos.line.saturating_sub(origin.line) + 1;
            pos.offset = pos.offset.saturating_sub(origin.offset) + 1;
        }
    }
}
