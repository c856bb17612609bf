//! Command-line front end: build a slide deck from a YAML report file.
//!
//! ```sh
//! chartdeck report.yaml -o report.pptx
//! ```

use chartdeck::config::ReportConfig;
use chartdeck::document::PptxWriter;
use chartdeck::report::{ReportAssembler, ReportSummary};
use chartdeck::template::MarkupParser;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Assemble a slide deck from positioned markup templates and chart data
#[derive(Parser, Debug)]
#[command(
    name = "chartdeck",
    about = "Assemble a slide deck from positioned markup templates and chart data",
    version
)]
struct Args {
    /// Report configuration (YAML)
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Output file, overriding the configured one
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error[{}]: {}", err.kind(), err);
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> chartdeck::Result<ReportSummary> {
    let config = ReportConfig::from_path(&args.config)?;
    let output = config.output_path(args.output.as_deref())?;
    let templates = config.templates();
    let directory = config.directory()?;
    let metadata = config.metadata();

    let assembler = ReportAssembler::new(
        MarkupParser::with_layout(metadata.layout),
        PptxWriter::new(),
        metadata,
    );
    assembler.assemble(&templates, &directory, &output)
}
