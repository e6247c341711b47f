use crate::position::*;

#[test]
fn test_line_map_simple() {
    let source = "line1\nline2\nline3";
    let map = LineMap::build(source);

    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
    assert_eq!(map.offset_to_position(4, source), Position::new(0, 4));
    assert_eq!(map.offset_to_position(6, source), Position::new(1, 0));
    assert_eq!(map.offset_to_position(12, source), Position::new(2, 0));
}

#[test]
fn test_line_map_windows_line_endings() {
    let source = "line1\r\nline2\r\nline3";
    let map = LineMap::build(source);

    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(7, source), Position::new(1, 0));
    assert_eq!(map.line_text(0, source), Some("line1"));
}

#[test]
fn test_line_text_last_line() {
    let source = "const a = 1;\nconst b = [];";
    let map = LineMap::build(source);
    assert_eq!(map.line_text(1, source), Some("const b = [];"));
    assert_eq!(map.line_text(2, source), None);
}

#[test]
fn test_offset_past_end_clamps() {
    let source = "ab";
    let map = LineMap::build(source);
    assert_eq!(map.offset_to_position(10, source), Position::new(0, 2));
}
