// src/almanac/index.rs
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use crate::almanac::models::{YearLink, YearPagePattern};
use crate::utils::error::AlmanacError;

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href]").expect("Failed to compile ANCHOR_SELECTOR")
});

/// Turns the year index page into year links sorted ascending by year.
/// Hrefs are resolved against `index_url`; anything that is not a year page is dropped.
pub fn resolve_year_links(
    index_html: &str,
    index_url: &str,
    pattern: &YearPagePattern,
) -> Result<Vec<YearLink>, AlmanacError> {
    let base = Url::parse(index_url).map_err(|e| AlmanacError::InvalidUrl {
        url: index_url.to_string(),
        reason: e.to_string(),
    })?;

    let document = Html::parse_document(index_html);
    let mut anchors = 0usize;
    let mut links = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        anchors += 1;
        let Some(href) = anchor.value().attr("href") else { continue };
        let Ok(absolute) = base.join(href.trim()) else {
            tracing::trace!("Skipping unparseable href '{}'", href);
            continue;
        };
        let reference = absolute.to_string();
        if let Some(year) = pattern.year_of(&reference) {
            links.push(YearLink { year, reference });
        }
    }

    // Stable: duplicate years keep their index order.
    links.sort_by_key(|link| link.year);

    tracing::info!("Found {} year links among {} anchors on {}", links.len(), anchors, index_url);

    if links.is_empty() {
        return Err(AlmanacError::EmptyIndex(index_url.to_string()));
    }
    Ok(links)
}

/// Applies an inclusive year window; an empty result is treated like an empty index.
pub fn filter_years(
    links: Vec<YearLink>,
    start_year: Option<u32>,
    end_year: Option<u32>,
    index_url: &str,
) -> Result<Vec<YearLink>, AlmanacError> {
    let filtered: Vec<YearLink> = links
        .into_iter()
        .filter(|link| start_year.map_or(true, |start| link.year >= start))
        .filter(|link| end_year.map_or(true, |end| link.year <= end))
        .collect();

    if filtered.is_empty() {
        tracing::error!(
            "No year links left after applying range {:?}..={:?}",
            start_year,
            end_year
        );
        return Err(AlmanacError::EmptyIndex(index_url.to_string()));
    }
    Ok(filtered)
}
