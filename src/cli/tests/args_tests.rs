use clap::Parser;
use sharp_completion::DispatchMode;

use super::args::{CliArgs, OutputFormat};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["sharp-complete", "Widget.cs"]).expect("default args should parse");

    assert_eq!(args.file, std::path::PathBuf::from("Widget.cs"));
    assert_eq!(args.position, None);
    assert!(!args.sequential);
    assert_eq!(args.format, OutputFormat::Text);
    assert!(!args.no_color);
    assert_eq!(args.completion_options().dispatch, DispatchMode::Parallel);
}

#[test]
fn parses_all_flags() {
    let args = CliArgs::try_parse_from([
        "sharp-complete",
        "--position",
        "42",
        "--sequential",
        "--format",
        "JSON",
        "--no-color",
        "src/Widget.cs",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.position, Some(42));
    assert!(args.sequential);
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.no_color);
    assert_eq!(args.completion_options().dispatch, DispatchMode::Sequential);
}

#[test]
fn short_position_flag() {
    let args = CliArgs::try_parse_from(["sharp-complete", "-p", "7", "a.cs"]).expect("short flag should parse");
    assert_eq!(args.position, Some(7));
}

#[test]
fn rejects_missing_file_and_bad_values() {
    assert!(CliArgs::try_parse_from(["sharp-complete"]).is_err());
    assert!(CliArgs::try_parse_from(["sharp-complete", "--position", "-1", "a.cs"]).is_err());
    assert!(CliArgs::try_parse_from(["sharp-complete", "--format", "yaml", "a.cs"]).is_err());
}
