#![allow(dead_code)]

use yaml_lines::{Line, Lines, Token, TokenKind, TokenPosition, build_lines};

#[derive(Clone, Copy)]
struct Cursor {
    line: usize,
    column: usize,
    offset: usize,
}

impl Cursor {
    fn advance(&mut self, c: char) {
        self.offset += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

/// Give hand-written tokens the positions a YAML lexer reports.
///
/// Each token is placed at the first non-blank rune of its origin, or at
/// the origin start when the origin is blank. Offsets count runes.
/// `indent_num` is the leading-space count of that line and
/// `indent_level` is half of it.
pub fn lex(rows: &[(TokenKind, &str, &str)]) -> Vec<Token> {
    let text: String = rows.iter().map(|(_, _, origin)| *origin).collect();
    let indents: Vec<usize> = text
        .split('\n')
        .map(|line| line.chars().take_while(|c| *c == ' ').count())
        .collect();

    let mut cursor = Cursor {
        line: 1,
        column: 1,
        offset: 1,
    };
    let mut tokens = Vec::new();
    for &(kind, value, origin) in rows {
        let mut at = cursor;
        let mut content = None;
        for c in origin.chars() {
            if !matches!(c, ' ' | '\t' | '\r' | '\n') {
                content = Some(at);
                break;
            }
            at.advance(c);
        }
        let start = content.unwrap_or(cursor);
        for c in origin.chars() {
            cursor.advance(c);
        }

        let indent = indents[start.line - 1];
        let position = TokenPosition::new(start.line, start.column, start.offset)
            .with_indent(indent, indent / 2);
        tokens.push(Token::new(kind, value, origin).with_position(position));
    }
    tokens
}

/// Override a token's line, column and offset, keeping its indentation.
pub fn place(tokens: &mut [Token], index: usize, line: usize, column: usize, offset: usize) {
    if let Some(pos) = tokens[index].position.as_mut() {
        pos.line = line;
        pos.column = column;
        pos.offset = offset;
    }
}

/// Override a token's indentation, keeping its location.
pub fn reindent(tokens: &mut [Token], index: usize, indent_num: usize, indent_level: usize) {
    if let Some(pos) = tokens[index].position.as_mut() {
        pos.indent_num = indent_num;
        pos.indent_level = indent_level;
    }
}

/// `(indent_num, indent_level)` of every part, in order.
pub fn part_indents(lines: &Lines) -> Vec<(usize, usize)> {
    lines
        .part_tokens()
        .iter()
        .filter_map(|p| p.position.map(|pos| (pos.indent_num, pos.indent_level)))
        .collect()
}

pub fn part_offsets(lines: &Lines) -> Vec<usize> {
    lines
        .part_tokens()
        .iter()
        .filter(|p| !p.origin.is_empty())
        .filter_map(|p| p.position.map(|pos| pos.offset))
        .collect()
}

pub fn origin_text(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.origin.as_str()).collect()
}

pub fn numbers(lines: &Lines) -> Vec<usize> {
    lines.iter().map(Line::number).collect()
}

pub fn contents(lines: &Lines) -> Vec<String> {
    lines.iter().map(Line::content).collect()
}

/// Build and check the lossless and integrity guarantees.
pub fn build_checked(tokens: &[Token]) -> Lines {
    let lines = build_lines(tokens.to_vec());
    assert_eq!(
        lines.source_text(),
        origin_text(tokens),
        "reconstructed text differs"
    );
    assert_eq!(lines.tokens(), tokens, "token round-trip differs");
    if let Err(e) = lines.validate() {
        panic!("validation failed: {e}\n--- lines ---\n{lines}");
    }
    lines
}
