// Licensed under the Apache-2.0 license

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ihex2mem",
    author,
    version,
    about = "Convert an Intel-HEX file into an @address memory image"
)]
struct Cli {
    /// Intel-HEX input
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Memory image output
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    let count = tv_mem_image::convert_file(&cli.input, &cli.output)
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;
    println!(
        "Converted {} bytes from {} to {}",
        count,
        cli.input.display(),
        cli.output.display()
    );

    Ok(())
}
