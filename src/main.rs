mod config;
mod convert;
mod error;
mod ids;
mod output;
mod parser;
mod scanner;
mod verify;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use config::{ConvertConfig, DATA_DIR, OUTPUT_DIR};
use convert::Converter;
use output::OutputPaths;

#[derive(Parser)]
#[command(
    name = "poem_convert",
    about = "Build the static poet/poem JSON served by the web front end"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert {data}/{Name}_{pinyin}/**/*.pt → {output}/*.json
    Build {
        /// Input root, one directory per poet
        #[arg(default_value = DATA_DIR)]
        data: PathBuf,
        /// Output root served as static files
        #[arg(default_value = OUTPUT_DIR)]
        output: PathBuf,
    },
    /// Check a generated output tree for count, order and lookup consistency
    Verify {
        #[arg(default_value = OUTPUT_DIR)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Build { data, output }) => run_build(ConvertConfig::new(data, output)),
        Some(Command::Verify { output }) => run_verify(&OutputPaths::new(output)),
        // Default: build with the fixed paths
        None => run_build(ConvertConfig::default()),
    }
}

fn run_build(config: ConvertConfig) -> Result<()> {
    let report = Converter::new(config).run()?;
    if report.failed_files > 0 || report.skipped_dirs > 0 {
        tracing::warn!(
            failed_files = report.failed_files,
            skipped_dirs = report.skipped_dirs,
            "some inputs were skipped"
        );
    }
    Ok(())
}

fn run_verify(paths: &OutputPaths) -> Result<()> {
    let report = verify::verify_output(paths)?;
    for problem in &report.problems {
        tracing::error!("{problem}");
    }
    if !report.is_ok() {
        bail!(
            "{} problem(s) in {}",
            report.problems.len(),
            paths.root.display()
        );
    }
    tracing::info!(
        poets = report.poets_checked,
        poems = report.entries_checked,
        "output is consistent"
    );
    Ok(())
}
