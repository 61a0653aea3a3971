use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

mod model;
mod services;

use services::omdb::OmdbClient;
use services::pipeline::{self, PipelineConfig};
use services::table_io;

const PROGRESS_EVERY: usize = 25;

/// Enrich a movie CSV with metadata from the OMDb API.
#[derive(Parser, Debug)]
#[command(name = "omdb-enrich", version)]
struct Cli {
    /// Input CSV with at least a Title column
    input_csv: PathBuf,

    /// Enriched CSV to write
    output_csv: PathBuf,

    /// Also write the result as an XLSX workbook
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Response cache path; pass an empty string to disable caching
    #[arg(long, default_value = "omdb_cache.json")]
    cache: PathBuf,

    /// Delay in seconds after each fresh API call
    #[arg(long, default_value_t = 0.25)]
    sleep: f64,

    /// Attempts per lookup before giving up on a row
    #[arg(long, default_value_t = 3)]
    retries: usize,

    /// Request the full plot instead of the short one
    #[arg(long)]
    full_plot: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let api_key = env::var("OMDB_API_KEY").unwrap_or_default().trim().to_string();
    if api_key.is_empty() {
        eprintln!("ERROR: OMDB_API_KEY is not set.");
        return ExitCode::from(2);
    }

    match run(&cli, &api_key) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, api_key: &str) -> Result<(), String> {
    let mut table = table_io::read_csv(&cli.input_csv)?;

    let client = OmdbClient::new(api_key, cli.retries)?;

    let cfg = PipelineConfig {
        cache_path: cli.cache.clone(),
        sleep: Duration::from_secs_f64(cli.sleep.max(0.0)),
        full_plot: cli.full_plot,
        progress_every: PROGRESS_EVERY,
    };

    let report = pipeline::run(&mut table, &client, &cfg);

    table_io::write_csv(&cli.output_csv, &table)?;
    if let Some(xlsx) = &cli.xlsx {
        table_io::write_xlsx(xlsx, &table)?;
    }

    println!("Done: {}", cli.output_csv.display());
    if let Some(xlsx) = &cli.xlsx {
        println!("Also wrote: {}", xlsx.display());
    }
    println!(
        "Cache hits: {}, API calls: {}, cache: {}",
        report.cache_hits,
        report.api_calls,
        cli.cache.display()
    );
    // Full counters (processed/skipped/failed included) as one
    // machine-readable diagnostic line.
    if let Ok(json) = serde_json::to_string(&report) {
        eprintln!("[run] {json}");
    }

    Ok(())
}
