//! Line-oriented view over a YAML token stream.
//!
//! Takes the tokens produced by a YAML lexer and re-cuts them at line
//! boundaries. The result reproduces the original text and token list
//! exactly, renders lines with annotations for diagnostics, and maps a
//! `(line, column)` cursor back to the token under it, including tokens
//! that span several lines such as block scalars and multiline plain or
//! quoted scalars.
//!
//! # Quick start
//!
//! ```
//! use yaml_lines::{Position, Token, TokenKind, TokenPosition, build_lines};
//!
//! let tokens = vec![
//!     Token::new(TokenKind::String, "key", "key")
//!         .with_position(TokenPosition::new(1, 1, 1)),
//!     Token::new(TokenKind::MappingValue, ":", ":")
//!         .with_position(TokenPosition::new(1, 4, 4)),
//!     Token::new(TokenKind::String, "value", " value\n")
//!         .with_position(TokenPosition::new(1, 6, 6)),
//! ];
//!
//! let lines = build_lines(tokens.clone());
//! assert_eq!(lines.len(), 1);
//! assert_eq!(lines.to_string(), "   1 | key: value");
//! assert_eq!(lines.tokens(), tokens);
//!
//! let under_cursor = lines.token_at(Position::new(1, 8)).unwrap();
//! assert_eq!(under_cursor.value, "value");
//! ```
//!
//! ## Marking an error range
//!
//! ```
//! use yaml_lines::{OverlayKind, Position, Token, TokenKind, TokenPosition, build_lines};
//!
//! let tokens = vec![
//!     Token::new(TokenKind::String, "port", "port")
//!         .with_position(TokenPosition::new(1, 1, 1)),
//!     Token::new(TokenKind::MappingValue, ":", ":")
//!         .with_position(TokenPosition::new(1, 5, 5)),
//!     Token::new(TokenKind::String, "abc", " abc\n")
//!         .with_position(TokenPosition::new(1, 7, 7)),
//! ];
//! let mut lines = build_lines(tokens);
//! let ranges = lines.content_position_ranges_at(Position::new(1, 7));
//! lines.add_overlay(OverlayKind::Error, ranges);
//! assert_eq!(lines.line(1).unwrap().overlays.len(), 1);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod builder;
pub mod document;
pub mod line;
pub mod lines;
pub mod position;
pub mod segment;
pub mod style;
pub mod token;

pub use builder::{LineBuilder, build_lines};
pub use document::{SplitMode, split_documents};
pub use line::{Annotation, AnnotationPosition, Line, LineFlag, Overlay, OverlayKind};
pub use lines::{Lines, ValidationError, ValidationErrorKind};
pub use position::{Position, Range, Ranges, Span};
pub use segment::{Segment, SegmentRows, Segments};
pub use style::{Style, classify, classify_all};
pub use token::{CharacterType, Indicator, Token, TokenKind, TokenPosition};
