// src/pipeline.rs
use std::path::PathBuf;
use std::time::Duration;

use crate::almanac::index::{filter_years, resolve_year_links};
use crate::almanac::{FetchSession, PageFetcher, YearLink, YearPagePattern};
use crate::extractors::{ContentSection, PageExtractor, PageOutcome, YearlyStats};
use crate::storage::RunSummary;
use crate::utils::html_debug;
use crate::utils::AppError;

/// Resolved settings for one extraction run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub index_url: String,
    pub start_year: Option<u32>,
    pub end_year: Option<u32>,
    pub pattern: YearPagePattern,
    pub page_timeout: Duration,
    /// When set, raw and annotated pages are written here per year.
    pub debug_dir: Option<PathBuf>,
}

/// Accumulated output of a run, appended to in year order.
#[derive(Debug, Default)]
pub struct RunOutput {
    pub stats: Vec<YearlyStats>,
    pub sections: Vec<ContentSection>,
    pub summary: RunSummary,
}

/// Opens one fetch session, runs the extraction and closes the session on
/// every exit path.
pub async fn run_scoped(
    fetcher: Box<dyn PageFetcher>,
    extractor: &PageExtractor,
    config: &RunConfig,
) -> Result<RunOutput, AppError> {
    let mut session = FetchSession::open(fetcher, config.page_timeout);
    let result = run(&mut session, extractor, config).await;
    tracing::debug!("Loaded {} pages this run", session.pages_loaded());
    session.close().await;
    result
}

/// Resolves the year index then processes each year page in order.
pub async fn run(
    session: &mut FetchSession,
    extractor: &PageExtractor,
    config: &RunConfig,
) -> Result<RunOutput, AppError> {
    tracing::info!("Loading year index {}", config.index_url);
    let index_html = session.load(&config.index_url).await?;
    let links = resolve_year_links(&index_html, &config.index_url, &config.pattern)?;
    let links = filter_years(links, config.start_year, config.end_year, &config.index_url)?;

    let mut output = RunOutput {
        summary: RunSummary {
            index_url: config.index_url.clone(),
            years_discovered: links.len(),
            ..Default::default()
        },
        ..Default::default()
    };

    for link in &links {
        match process_year(session, extractor, config, link).await {
            Ok(outcome) => {
                if let Some(stats) = outcome.stats {
                    tracing::info!(
                        "{}: most wins {}, most losses {}, champion {}",
                        stats.year,
                        stats.most_wins_team,
                        stats.most_losses_team,
                        stats.champion
                    );
                    output.stats.push(stats);
                } else if let Some(reason) = outcome.standings_error {
                    tracing::info!("No season record for {}: {}", link.year, reason);
                }
                output.sections.extend(outcome.sections);
            }
            Err(e) if !e.is_fatal() => {
                tracing::error!("{}", e);
                output.summary.pages_failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    output.summary.records_written = output.stats.len();
    output.summary.sections_written = output.sections.len();
    tracing::info!(
        "Processed {} years: {} records, {} sections, {} failed pages",
        links.len(),
        output.summary.records_written,
        output.summary.sections_written,
        output.summary.pages_failed
    );
    Ok(output)
}

/// Fetches and extracts one year. Any error here is scoped to the year.
async fn process_year(
    session: &mut FetchSession,
    extractor: &PageExtractor,
    config: &RunConfig,
    link: &YearLink,
) -> Result<PageOutcome, AppError> {
    tracing::info!("Processing {} from {}", link.year, link.reference);

    let html = session
        .load(&link.reference)
        .await
        .map_err(|e| AppError::for_year(link.year, e))?;

    if let Some(debug_dir) = &config.debug_dir {
        html_debug::dump_year_page(debug_dir, link.year, &html)
            .map_err(|e| AppError::for_year(link.year, e))?;
    }

    Ok(extractor.extract(link.year, &html))
}
