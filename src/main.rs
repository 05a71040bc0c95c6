// src/main.rs
mod almanac;
mod extractors;
mod pipeline;
mod storage;
mod utils;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use almanac::models::{DEFAULT_INDEX_URL, DEFAULT_USER_AGENT};
use almanac::{BrowserlessFetcher, CachedFetcher, HttpFetcher, PageFetcher, YearPagePattern};
use extractors::{ChampionExtractor, PageExtractor};
use pipeline::RunConfig;
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the season almanac extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Year index page listing one link per season
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    index_url: String,

    /// First season to process (inclusive, optional)
    #[arg(long)]
    start_year: Option<u32>,

    /// Last season to process (inclusive, optional)
    #[arg(long)]
    end_year: Option<u32>,

    /// Output directory for the summary and section tables
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Delay after each page load before extraction (plain HTTP backend)
    #[arg(long, default_value_t = 2000)]
    settle_ms: u64,

    /// Bounded wait per page before giving up on it
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// User-Agent header for direct page requests
    #[arg(long, env = "ALMANAC_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Fetch rendered pages through a Browserless instance instead of plain HTTP
    #[arg(long, env = "BROWSERLESS_URL")]
    browserless_url: Option<String>,

    /// Token appended to Browserless requests
    #[arg(long, env = "BROWSERLESS_TOKEN", hide_env_values = true)]
    browserless_token: Option<String>,

    /// Directory for caching raw pages between runs
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Only read pages from --cache-dir, never the network
    #[arg(long, requires = "cache_dir")]
    offline: bool,

    /// Extra team nickname recognised when extracting champions (repeatable)
    #[arg(long = "team-suffix")]
    team_suffixes: Vec<String>,

    /// Debug mode - save raw and annotated year pages
    #[arg(short, long)]
    debug: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

/// Picks the page backend from the CLI flags.
fn build_fetcher(args: &Args) -> Result<Box<dyn PageFetcher>, AppError> {
    let timeout = Duration::from_secs(args.timeout_secs);

    let network: Option<Box<dyn PageFetcher>> = if args.offline {
        None
    } else if let Some(url) = &args.browserless_url {
        tracing::info!("Fetching rendered pages via Browserless at {}", url);
        Some(Box::new(BrowserlessFetcher::new(url, args.browserless_token.as_deref(), timeout)?))
    } else {
        Some(Box::new(HttpFetcher::new(
            &args.user_agent,
            timeout,
            Duration::from_millis(args.settle_ms),
        )?))
    };

    match (&args.cache_dir, network) {
        (Some(dir), network) => {
            tracing::info!("Using page cache at {} (offline: {})", dir.display(), args.offline);
            Ok(Box::new(CachedFetcher::new(dir, network)))
        }
        (None, Some(network)) => Ok(network),
        (None, None) => Err(AppError::Config("--offline requires --cache-dir".to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose, args.log_json);
    tracing::info!(
        "Starting processing for index {} (years {:?}..={:?}) into {}",
        args.index_url,
        args.start_year,
        args.end_year,
        args.output_dir
    );

    // 3. Initialize storage and extractors
    let storage = StorageManager::new(&args.output_dir)?;
    let champion = ChampionExtractor::with_suffixes(&args.team_suffixes)
        .map_err(|e| AppError::Config(format!("Invalid team suffix pattern: {}", e)))?;
    let extractor = PageExtractor::new(champion);

    let config = RunConfig {
        index_url: args.index_url.clone(),
        start_year: args.start_year,
        end_year: args.end_year,
        pattern: YearPagePattern::default(),
        page_timeout: Duration::from_secs(args.timeout_secs),
        debug_dir: args.debug.then(|| storage.base_dir().join("debug")),
    };

    // 4. Run the extraction with a single fetch session
    let fetcher = build_fetcher(&args)?;
    let output = pipeline::run_scoped(fetcher, &extractor, &config).await?;

    // 5. Persist the two tables and the run summary
    storage.save_stats(&output.stats)?;
    storage.save_sections(&output.sections)?;
    storage.save_run_summary(&output.summary)?;

    tracing::info!(
        "Processing finished. Records: {}, Sections: {}, Failed pages: {}",
        output.summary.records_written,
        output.summary.sections_written,
        output.summary.pages_failed
    );

    if output.stats.is_empty() && output.summary.pages_failed > 0 {
        return Err(AppError::Processing(format!(
            "No season records extracted; {} pages failed",
            output.summary.pages_failed
        )));
    }

    Ok(())
}
