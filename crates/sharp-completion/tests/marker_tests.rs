use super::*;

#[test]
fn test_marker_is_removed_and_offset_returned() {
    let (text, position) = split_caret_marker("class C { $$ }").unwrap();
    assert_eq!(text, "class C {  }");
    assert_eq!(position, 10);
}

#[test]
fn test_only_first_marker_is_taken() {
    let (text, position) = split_caret_marker("$$a$$").unwrap();
    assert_eq!(text, "a$$");
    assert_eq!(position, 0);
}

#[test]
fn test_offset_counts_bytes() {
    let (text, position) = split_caret_marker("é$$").unwrap();
    assert_eq!(text, "é");
    assert_eq!(position, 2);
}

#[test]
fn test_missing_marker() {
    assert!(split_caret_marker("class C { }").is_none());
    assert!(split_caret_marker("class C { $ }").is_none());
}
