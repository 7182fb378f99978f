//! Tracing setup for `sharp-complete`.
//!
//! Output format is chosen by `SHARP_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans via `tracing-tree`, handy for following one
//!   request through context building and dispatch
//! - `json`: one JSON object per event
//!
//! ```bash
//! SHARP_LOG=debug SHARP_LOG_FORMAT=tree sharp-complete Widget.cs
//! SHARP_LOG="sharp_completion=trace" sharp-complete Widget.cs --position 42
//! ```
//!
//! Nothing is installed unless `SHARP_LOG` or `RUST_LOG` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_ENV: &str = "SHARP_LOG";
const LOG_FORMAT_ENV: &str = "SHARP_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `SHARP_LOG_FORMAT` value. Unknown values fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// `SHARP_LOG` wins over `RUST_LOG`; both use `RUST_LOG` directive syntax.
fn build_filter() -> Option<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if std::env::var("RUST_LOG").is_ok() => Some(EnvFilter::from_default_env()),
        Err(_) => None,
    }
}

/// Install the global subscriber, writing to stderr.
///
/// No-op when neither `SHARP_LOG` nor `RUST_LOG` is set. A second call, or a
/// subscriber installed elsewhere, is left alone.
pub fn init_tracing() {
    let Some(filter) = build_filter() else {
        return;
    };

    let installed = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
