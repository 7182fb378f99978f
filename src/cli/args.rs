use clap::{Parser, ValueEnum};
use sharp_completion::{CompletionOptions, DispatchMode};
use std::path::PathBuf;

/// CLI arguments for the sharp-complete binary.
#[derive(Parser, Debug)]
#[command(
    name = "sharp-complete",
    version,
    about = "Suggest the contextual keywords that are legal at a caret position"
)]
pub struct CliArgs {
    /// Source file to complete in.
    pub file: PathBuf,

    /// Caret offset in bytes. When omitted, the file must contain a `$$` marker.
    #[arg(short = 'p', long)]
    pub position: Option<u32>,

    /// Run every recommender on the calling thread instead of the rayon pool.
    #[arg(long)]
    pub sequential: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl CliArgs {
    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            dispatch: if self.sequential {
                DispatchMode::Sequential
            } else {
                DispatchMode::Parallel
            },
        }
    }
}
