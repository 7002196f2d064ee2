//! `toolkit-report`: print or save an export of the toolkit's saved worksheets.
//!
//! Without `DATA_DIR` the default data directory is used. Set `RUST_LOG=info`
//! to see what is being loaded.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use divorce_toolkit::initialize_backend;
use log::{error, info};
use shared::ExportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "toolkit-report")]
#[command(about = "Print or save a report of the Ohio divorce toolkit worksheets")]
struct Cli {
    /// Data directory holding the saved worksheets
    data_directory: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Write the report into this directory instead of printing it
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Csv,
    Json,
}

impl From<ReportFormat> for ExportFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Text => ExportFormat::Text,
            ReportFormat::Csv => ExportFormat::Csv,
            ReportFormat::Json => ExportFormat::Json,
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let state = initialize_backend(cli.data_directory)?;
    let format = ExportFormat::from(cli.format);

    match cli.out {
        Some(dir) => {
            let path = state.export_service.export_to_path(&state.toolkit, format, &dir)?;
            info!("Report written to {}", path.display());
            println!("{}", path.display());
        }
        None => {
            let document = state.export_service.export(&state.toolkit, format)?;
            print!("{}", document.content);
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("toolkit-report failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
