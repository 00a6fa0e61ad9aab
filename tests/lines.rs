//! Cursor lookup, ranges, overlays and rendering.

mod common;

use common::{build_checked, lex};
use yaml_lines::{
    AnnotationPosition, LineFlag, Lines, OverlayKind, Position, Range, Span, TokenKind,
};

fn multiline_plain() -> Lines {
    build_checked(&lex(&[
        (TokenKind::String, "key", "key"),
        (TokenKind::MappingValue, ":", ":"),
        (TokenKind::String, "this is continued", " this is\n  continued\n"),
        (TokenKind::String, "other", "other"),
        (TokenKind::MappingValue, ":", ":"),
        (TokenKind::Integer, "1", " 1\n"),
    ]))
}

fn range(l1: usize, c1: usize, l2: usize, c2: usize) -> Range {
    Range::new(Position::new(l1, c1), Position::new(l2, c2))
}

// -----------------------------------------------------------
// Token lookup.
// -----------------------------------------------------------

#[test]
fn token_at_cursor() {
    let lines = multiline_plain();
    let value = |line, col| lines.token_at(Position::new(line, col)).map(|t| t.value);

    assert_eq!(value(1, 1).as_deref(), Some("key"));
    assert_eq!(value(1, 3).as_deref(), Some("key"));
    assert_eq!(value(1, 4).as_deref(), Some(":"));
    assert_eq!(value(1, 5).as_deref(), Some("this is continued"));
    assert_eq!(value(2, 7).as_deref(), Some("this is continued"));
    assert_eq!(value(3, 7).as_deref(), Some("1"));
    assert_eq!(value(1, 13), None);
    assert_eq!(value(9, 1), None);
}

#[test]
fn token_at_returns_clone_of_source() {
    let lines = multiline_plain();
    let token = lines.token_at(Position::new(2, 3)).unwrap();
    assert_eq!(token.origin, " this is\n  continued\n");
    assert_eq!(token, lines.tokens()[2]);
}

#[test]
fn token_positions_cover_every_line() {
    let lines = multiline_plain();
    let source = lines.source_at(Position::new(1, 6)).unwrap();
    let positions = lines.token_positions(source);
    assert_eq!(positions, vec![Position::new(1, 5), Position::new(2, 1)]);
    for pos in positions {
        let found = lines.source_at(pos).unwrap();
        assert!(std::sync::Arc::ptr_eq(found, source));
    }
}

#[test]
fn token_ranges_use_segment_width() {
    let lines = multiline_plain();
    let source = lines.source_at(Position::new(1, 6)).unwrap();
    let ranges = lines.token_position_ranges(source);
    assert_eq!(ranges.values(), &[range(1, 5, 1, 13), range(2, 1, 2, 12)]);
    assert_eq!(lines.token_position_ranges_at(Position::new(2, 11)), ranges);
}

#[test]
fn ranges_at_empty_position() {
    let lines = multiline_plain();
    assert!(lines.token_position_ranges_at(Position::new(2, 40)).is_empty());
    assert!(lines.content_position_ranges_at(Position::new(7, 1)).is_empty());
}

#[test]
fn content_ranges_trim_spaces() {
    let lines = multiline_plain();
    let ranges = lines.content_position_ranges_at(Position::new(1, 5));
    assert_eq!(ranges.values(), &[range(1, 6, 1, 13), range(2, 3, 2, 12)]);

    let ranges = lines.content_position_ranges_at(Position::new(3, 8));
    assert_eq!(ranges.values(), &[range(3, 8, 3, 9)]);
}

#[test]
fn rows_view_matches_lines() {
    let lines = multiline_plain();
    let rows = lines.rows();
    assert_eq!(rows.source_tokens(), lines.tokens());
    assert_eq!(rows.part_tokens().len(), 7);
    assert_eq!(rows.token_ranges_at(2, 3).len(), 2);
}

// -----------------------------------------------------------
// Overlays.
// -----------------------------------------------------------

#[test]
fn overlay_split_per_line() {
    let mut lines = multiline_plain();
    lines.add_overlay(OverlayKind::Error, [range(1, 6, 3, 4)]);

    let spans: Vec<Vec<Span>> = lines
        .iter()
        .map(|l| l.overlays.iter().map(|o| o.cols).collect())
        .collect();
    assert_eq!(
        spans,
        vec![
            vec![Span::new(6, 13)],
            vec![Span::new(1, 12)],
            vec![Span::new(1, 4)],
        ]
    );
    assert!(
        lines
            .iter()
            .flat_map(|l| l.overlays.iter())
            .all(|o| o.kind == OverlayKind::Error)
    );
}

#[test]
fn overlay_single_line_clamped() {
    let mut lines = multiline_plain();
    lines.add_overlay(OverlayKind::Warning, [range(3, 8, 3, 99)]);
    let third = lines.line(3).unwrap();
    assert_eq!(third.overlays.len(), 1);
    assert_eq!(third.overlays[0].cols, Span::new(8, 9));
}

#[test]
fn overlay_from_content_ranges() {
    let mut lines = multiline_plain();
    let ranges = lines.content_position_ranges_at(Position::new(2, 5));
    lines.add_overlay(OverlayKind::Highlight, ranges);
    assert_eq!(lines.line(1).unwrap().overlays[0].cols, Span::new(6, 13));
    assert_eq!(lines.line(2).unwrap().overlays[0].cols, Span::new(3, 12));
    assert!(lines.line(3).unwrap().overlays.is_empty());
}

#[test]
fn clear_overlays_on_every_line() {
    let mut lines = multiline_plain();
    lines.add_overlay(OverlayKind::Info, [range(1, 1, 3, 2)]);
    assert!(lines.iter().all(|l| !l.overlays.is_empty()));
    lines.clear_overlays();
    assert!(lines.iter().all(|l| l.overlays.is_empty()));
}

// -----------------------------------------------------------
// Rendering.
// -----------------------------------------------------------

#[test]
fn render_with_annotations() {
    let mut lines = multiline_plain();
    lines.line_mut(3).unwrap().add_annotation(
        "^ expected a string",
        AnnotationPosition::Below,
        7,
    );
    let expected = "\
   1 | key: this is
   2 |   continued
   3 | other: 1
     |        ^ expected a string";
    assert_eq!(lines.to_string(), expected);
}

#[test]
fn render_annotation_only_line() {
    let mut lines = multiline_plain();
    let second = lines.line_mut(2).unwrap();
    second.flag = LineFlag::AnnotationOnly;
    second.add_annotation("...", AnnotationPosition::Above, 2);
    let expected = "\
   1 | key: this is
     |   ...
   3 | other: 1";
    assert_eq!(lines.to_string(), expected);
}

#[test]
fn diff_flags_are_metadata() {
    let mut lines = multiline_plain();
    for line in &mut lines {
        line.flag = LineFlag::Inserted;
    }
    assert!(lines.iter().all(|l| l.flag == LineFlag::Inserted));
    assert!(lines.validate().is_ok());
}

#[test]
fn line_tokens_are_parts() {
    let lines = multiline_plain();
    let second = lines.line(2).unwrap();
    let parts = second.tokens();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].origin, "  continued\n");
    assert_eq!(parts[0].value, "");
    assert_eq!(second.content(), "  continued");
}
