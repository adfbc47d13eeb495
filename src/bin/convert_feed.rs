//! Convert a partner product feed (CSV or XML) into the flat JSON catalog
//! the backend serves from.
//!
//! ```text
//! convert-feed feed.csv --output data/products.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vitrina_backend::feed::{self, FeedError, FeedReport};

#[derive(Parser, Debug)]
#[command(name = "convert-feed", about = "Convert a partner CSV/XML feed to products.json")]
struct Args {
    /// Feed file to convert (.xml is scraped as XML, anything else as CSV)
    #[arg(default_value = "feed.csv")]
    input: PathBuf,

    /// Output catalog file
    #[arg(short, long, default_value = "data/products.json")]
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(input = %args.input.display(), %err, "feed conversion failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), FeedError> {
    let content = std::fs::read_to_string(&args.input)?;

    let report: FeedReport = if is_xml(&args.input) {
        feed::xml::parse_xml(&content)?
    } else {
        feed::csv::parse_csv(&content)?
    };

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(&report.products)?;
    std::fs::write(&args.output, json)?;

    info!(
        total = report.products.len(),
        missing_images = report.missing_images,
        invalid_prices = report.invalid_prices,
        output = %args.output.display(),
        "feed converted"
    );
    Ok(())
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}
