//! Positional keyword completion for a C#-like language.
//!
//! The engine lives in the workspace crates; this package re-exports them
//! and hosts the `sharp-complete` command-line frontend.

pub use sharp_common as common;
pub use sharp_completion as completion;
pub use sharp_parser as parser;
pub use sharp_scanner as scanner;
pub use sharp_semantic as semantic;

pub use sharp_completion::{
    CompletionOptions, CompletionOutcome, DispatchMode, KeywordKind, RecommenderRegistry, complete,
};

// Command-line frontend
pub mod cli;

// Opt-in tracing subscriber (SHARP_LOG / SHARP_LOG_FORMAT)
pub mod tracing_config;
#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
