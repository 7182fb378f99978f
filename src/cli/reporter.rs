use anyhow::{Context, Result};
use colored::Colorize;

use super::args::OutputFormat;
use super::driver::CompletionRun;

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, run: &CompletionRun, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text(run)),
            OutputFormat::Json => serde_json::to_string_pretty(&run.outcome)
                .context("failed to serialize completion outcome"),
        }
    }

    /// One keyword per line, then any recommender faults.
    pub fn render_text(&self, run: &CompletionRun) -> String {
        let outcome = &run.outcome;
        let mut lines = Vec::new();
        if outcome.cancelled {
            lines.push(self.dim("completion cancelled"));
        } else if outcome.items.is_empty() {
            lines.push(self.dim(&format!(
                "no keywords at {}:{}",
                run.file_name, run.position
            )));
        }
        for item in &outcome.items {
            let label = format!("{:<8}", item.label);
            if item.preselect {
                let label = if self.color {
                    label.green().bold().to_string()
                } else {
                    label
                };
                lines.push(format!("{label} {} (preselected)", item.sort_text));
            } else {
                lines.push(format!("{label} {}", item.sort_text));
            }
        }
        for fault in &outcome.faults {
            let prefix = if self.color {
                "warning".yellow().to_string()
            } else {
                "warning".to_string()
            };
            lines.push(format!("{prefix}: {} dropped: {}", fault.keyword, fault.error));
        }
        lines.join("\n")
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
