//! Syntax-highlighting classes for tokens.

use crate::token::{Token, TokenKind};

/// Display class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Key,
    Anchor,
    Alias,
    Tag,
    String,
    Number,
    Bool,
    Null,
    Comment,
    /// Structural punctuation: `:`, `-`, `?`, `,`, flow brackets.
    Indicator,
    /// Block scalar headers `|` and `>`.
    BlockScalar,
    /// Document markers `---` and `...`.
    Document,
    Directive,
    Invalid,
    /// Fallback for everything else.
    Text,
}

/// The kind a token is drawn as, given its neighbors.
///
/// The name following an anchor or alias indicator is drawn as that
/// indicator; anything followed by `:` is drawn as a key.
#[must_use]
pub fn visual_kind(prev: Option<&Token>, token: &Token, next: Option<&Token>) -> TokenKind {
    match (prev.map(|t| t.kind), next.map(|t| t.kind)) {
        (Some(kind @ (TokenKind::Anchor | TokenKind::Alias)), _) => kind,
        (_, Some(TokenKind::MappingValue)) => TokenKind::MappingKey,
        _ => token.kind,
    }
}

/// Style of `token` in the context of its neighbors.
#[must_use]
pub fn classify(prev: Option<&Token>, token: &Token, next: Option<&Token>) -> Style {
    style_for(visual_kind(prev, token, next))
}

/// Styles for a token sequence, taking neighbors from slice order.
#[must_use]
pub fn classify_all(tokens: &[Token]) -> Vec<Style> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let prev = i.checked_sub(1).and_then(|j| tokens.get(j));
            classify(prev, token, tokens.get(i + 1))
        })
        .collect()
}

/// Style table for a visual kind.
#[must_use]
pub const fn style_for(kind: TokenKind) -> Style {
    match kind {
        TokenKind::MappingKey | TokenKind::MergeKey => Style::Key,
        TokenKind::Anchor => Style::Anchor,
        TokenKind::Alias => Style::Alias,
        TokenKind::Tag => Style::Tag,
        TokenKind::String | TokenKind::SingleQuote | TokenKind::DoubleQuote => Style::String,
        TokenKind::Integer
        | TokenKind::BinaryInteger
        | TokenKind::OctetInteger
        | TokenKind::HexInteger
        | TokenKind::Float
        | TokenKind::Infinity
        | TokenKind::NaN => Style::Number,
        TokenKind::Bool => Style::Bool,
        TokenKind::Null => Style::Null,
        TokenKind::Comment => Style::Comment,
        TokenKind::MappingValue
        | TokenKind::MappingStart
        | TokenKind::MappingEnd
        | TokenKind::SequenceStart
        | TokenKind::SequenceEntry
        | TokenKind::SequenceEnd
        | TokenKind::CollectEntry => Style::Indicator,
        TokenKind::Literal | TokenKind::Folded => Style::BlockScalar,
        TokenKind::DocumentHeader | TokenKind::DocumentEnd => Style::Document,
        TokenKind::Directive => Style::Directive,
        TokenKind::Invalid => Style::Invalid,
        TokenKind::Space | TokenKind::Unknown => Style::Text,
    }
}
