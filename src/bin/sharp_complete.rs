use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use sharp::cli::args::CliArgs;
use sharp::cli::{driver, reporter::Reporter};

fn main() -> Result<()> {
    // Installs a subscriber only if SHARP_LOG or RUST_LOG is set.
    sharp::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let run = driver::run(&args)?;

    let color = !args.no_color && std::io::stdout().is_terminal();
    let output = Reporter::new(color).render(&run, args.format)?;
    println!("{output}");
    Ok(())
}
