/// Token kinds produced by a YAML lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Plain scalar, and the content of a block scalar.
    String,
    /// Single-quoted scalar (`'...'`).
    SingleQuote,
    /// Double-quoted scalar (`"..."`).
    DoubleQuote,
    /// Literal block scalar header (`|`).
    Literal,
    /// Folded block scalar header (`>`).
    Folded,
    /// Explicit mapping key indicator (`?`), also the visual kind of an implicit key.
    MappingKey,
    /// Mapping value indicator (`:`).
    MappingValue,
    /// Flow mapping start (`{`).
    MappingStart,
    /// Flow mapping end (`}`).
    MappingEnd,
    /// Flow sequence start (`[`).
    SequenceStart,
    /// Block sequence entry (`-`).
    SequenceEntry,
    /// Flow sequence end (`]`).
    SequenceEnd,
    /// Flow collection separator (`,`).
    CollectEntry,
    /// Comment (`# ...`).
    Comment,
    /// Anchor (`&name`).
    Anchor,
    /// Alias (`*name`).
    Alias,
    /// Tag (`!tag`).
    Tag,
    /// Directive (`%YAML`, `%TAG`).
    Directive,
    /// Document header (`---`).
    DocumentHeader,
    /// Document end (`...`).
    DocumentEnd,
    /// Whitespace-only token.
    Space,
    /// Boolean scalar (`true`, `false`).
    Bool,
    /// Decimal integer scalar.
    Integer,
    /// Binary integer scalar (`0b1010`).
    BinaryInteger,
    /// Octal integer scalar (`0o17`).
    OctetInteger,
    /// Hexadecimal integer scalar (`0x1F`).
    HexInteger,
    /// Floating-point scalar.
    Float,
    /// Null scalar (`null`, `~`).
    Null,
    /// Infinity scalar (`.inf`).
    Infinity,
    /// Not-a-number scalar (`.nan`).
    NaN,
    /// Merge key (`<<`).
    MergeKey,
    /// Text the lexer rejected.
    Invalid,
    /// Anything the lexer could not classify.
    Unknown,
}

impl TokenKind {
    /// Whether the kind opens a block scalar.
    #[must_use]
    pub const fn is_block_scalar_header(self) -> bool {
        matches!(self, Self::Literal | Self::Folded)
    }
}

/// Lexer character classification of a token's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterType {
    Indicator,
    WhiteSpace,
    #[default]
    Miscellaneous,
    Escaped,
    Invalid,
}

/// Lexer indicator class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Indicator {
    #[default]
    NotIndicator,
    BlockStructure,
    FlowCollection,
    Comment,
    NodeProperty,
    BlockScalar,
    QuotedScalar,
    Directive,
    InvalidUse,
}

impl Indicator {
    /// Default indicator class the lexer assigns to `kind`.
    #[must_use]
    pub const fn for_kind(kind: TokenKind) -> Self {
        match kind {
            TokenKind::SequenceEntry | TokenKind::MappingKey | TokenKind::MappingValue => {
                Self::BlockStructure
            }
            TokenKind::MappingStart
            | TokenKind::MappingEnd
            | TokenKind::SequenceStart
            | TokenKind::SequenceEnd
            | TokenKind::CollectEntry => Self::FlowCollection,
            TokenKind::Comment => Self::Comment,
            TokenKind::Anchor | TokenKind::Alias | TokenKind::Tag => Self::NodeProperty,
            TokenKind::Literal | TokenKind::Folded => Self::BlockScalar,
            TokenKind::SingleQuote | TokenKind::DoubleQuote => Self::QuotedScalar,
            TokenKind::Directive => Self::Directive,
            _ => Self::NotIndicator,
        }
    }
}

/// Where a token's content starts in the source.
///
/// `line` and `column` are 1-indexed. `offset` counts runes (not bytes)
/// from the start of the document, also 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenPosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    /// Leading-space count of the line.
    pub indent_num: usize,
    /// Nesting depth.
    pub indent_level: usize,
}

impl TokenPosition {
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
            indent_num: 0,
            indent_level: 0,
        }
    }

    /// Set the indentation fields.
    #[must_use]
    pub const fn with_indent(mut self, indent_num: usize, indent_level: usize) -> Self {
        self.indent_num = indent_num;
        self.indent_level = indent_level;
        self
    }
}

/// A single lexer token.
///
/// `origin` is the verbatim source slice including surrounding whitespace
/// and embedded newlines; `value` is the decoded scalar content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub character_type: CharacterType,
    pub indicator: Indicator,
    pub value: String,
    pub origin: String,
    pub position: Option<TokenPosition>,
}

impl Token {
    /// Create a token without a position.
    #[must_use]
    pub fn new(kind: TokenKind, value: &str, origin: &str) -> Self {
        Self {
            kind,
            character_type: CharacterType::default(),
            indicator: Indicator::for_kind(kind),
            value: value.to_string(),
            origin: origin.to_string(),
            position: None,
        }
    }

    /// Set the source position.
    #[must_use]
    pub const fn with_position(mut self, position: TokenPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the character classification.
    #[must_use]
    pub const fn with_character_type(mut self, character_type: CharacterType) -> Self {
        self.character_type = character_type;
        self
    }

    /// Number of runes in `origin`.
    #[must_use]
    pub fn origin_len(&self) -> usize {
        self.origin.chars().count()
    }
}

fn leading_whitespace(origin: &str) -> impl Iterator<Item = char> {
    origin
        .chars()
        .take_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Number of `\n` before the first non-blank character of `origin`.
pub(crate) fn leading_newlines(origin: &str) -> usize {
    leading_whitespace(origin).filter(|c| *c == '\n').count()
}

/// Offset of the first rune of `origin`, given the offset of its content.
pub(crate) fn origin_start_offset(content_offset: usize, origin: &str) -> usize {
    content_offset
        .saturating_sub(leading_whitespace(origin).count())
        .max(1)
}
