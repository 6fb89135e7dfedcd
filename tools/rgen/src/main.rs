// Licensed under the Apache-2.0 license

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::fs;
use std::path::PathBuf;

use tv_registers_generator::{generate_verilog_from_file, GeneratorConfig, LogReporter};

#[derive(Parser, Debug)]
#[command(
    name = "rgen",
    author,
    version,
    about = "Generate Verilog register blocks from an XML register description"
)]
struct Cli {
    /// XML register description
    #[arg(value_name = "FILE")]
    description: PathBuf,

    /// Fail on bad literals and unknown register types instead of warning
    #[arg(long)]
    strict: bool,

    /// Directory the generated modules are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

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

    let config = if cli.strict {
        GeneratorConfig::new().strict()
    } else {
        GeneratorConfig::new()
    };
    let files = generate_verilog_from_file(&cli.description, &config, &mut LogReporter)
        .with_context(|| format!("failed to generate {}", cli.description.display()))?;
    if files.is_empty() {
        warn!("no register groups in {}", cli.description.display());
        return Ok(());
    }

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;
    for file in files {
        let path = cli.out_dir.join(&file.file_name);
        let contents = format!(
            "// Generated by rgen from {}. Do not edit.\n\n{}",
            cli.description.display(),
            file.contents
        );
        fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
