use std::io::BufRead;
use std::path::PathBuf;

use clap::Parser;
use sheetconf_tools::config::{self, DEFAULT_SETTINGS_FILE};
use sheetconf_tools::{Result, ToolError, pipeline};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let outcome = init_logging(cli.verbose).and_then(|()| run(&cli));
    if let Err(error) = outcome {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    if !cli.no_pause {
        wait_for_enter();
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = config::load_settings(&cli.settings);
    let report = pipeline::run(&settings)?;
    println!(
        "Converted {} sheet(s) from {} workbook(s), generated {} entities into {}",
        report.json_files.len(),
        report.workbooks,
        report.entities.len(),
        report.generated_file.display()
    );
    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn wait_for_enter() {
    println!("Press Enter to exit...");
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert spreadsheet config tables into JSON files and Go accessors."
)]
struct Cli {
    /// Settings file overriding the input and output directories.
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Exit right away instead of waiting for Enter.
    #[arg(long)]
    no_pause: bool,

    /// Log debug diagnostics.
    #[arg(short, long)]
    verbose: bool,
}
