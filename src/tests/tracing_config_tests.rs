use crate::tracing_config::LogFormat;

#[test]
fn test_parses_known_formats() {
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse("json"), LogFormat::Json);
}

#[test]
fn test_format_is_case_and_whitespace_insensitive() {
    assert_eq!(LogFormat::parse(" Tree "), LogFormat::Tree);
    assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
}

#[test]
fn test_unknown_format_falls_back_to_text() {
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
    assert_eq!(LogFormat::default(), LogFormat::Text);
}
