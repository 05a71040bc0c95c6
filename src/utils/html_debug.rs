// src/utils/html_debug.rs
use std::fs;
use std::path::{Path, PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;
use crate::utils::error::AppError;

/// Patterns highlighted in annotated year pages, paired with their CSS class suffix.
static DEBUG_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)<caption[^>]*>", "caption"),
        (r"(?i)team\s+standings|standings", "standings"),
        (r"(?i)world\s+series\s+champion|world\s+champion|league\s+champion|pennant\s+winner", "champion"),
        (r"(?i)\bchampion(?:ship)?\b", "champion"),
        (r"(?i)copyright|preserved\s+today|hosted\s+by", "boilerplate"),
    ]
    .iter()
    .filter_map(|(pat, kind)| Regex::new(pat).ok().map(|re| (re, *kind)))
    .collect()
});

/// Wraps each highlight range of `html` in a classed span and returns the annotated document.
/// Overlapping ranges keep the earliest one.
pub fn annotate_html(html: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    out.push_str(".hl-caption { background-color: #FFFF00; }\n");
    out.push_str(".hl-standings { background-color: #90EE90; }\n");
    out.push_str(".hl-champion { background-color: #ADD8E6; }\n");
    out.push_str(".hl-boilerplate { background-color: #FFC0CB; }\n");
    out.push_str("</style>\n</head>\n<body>\n");

    let mut sorted = highlights.to_vec();
    sorted.sort_by_key(|h| (h.0, std::cmp::Reverse(h.1)));

    let mut last_pos = 0;
    for (start, end, kind) in sorted {
        if start < last_pos || end > html.len() {
            continue;
        }
        out.push_str(&html[last_pos..start]);
        out.push_str(&format!(
            "<span class=\"hl-{}\" title=\"{}: {}-{}\">",
            kind, kind, start, end
        ));
        out.push_str(&html[start..end]);
        out.push_str("</span>");
        last_pos = end;
    }
    out.push_str(&html[last_pos..]);
    out.push_str("\n</body>\n</html>");
    out
}

/// Finds every keyword match worth highlighting on a year page.
pub fn find_highlights(html: &str) -> Vec<(usize, usize, &'static str)> {
    DEBUG_PATTERNS
        .iter()
        .flat_map(|(re, kind)| re.find_iter(html).map(move |m| (m.start(), m.end(), *kind)))
        .collect()
}

/// Saves the raw page and an annotated copy under `<debug_dir>/<year>/`.
pub fn dump_year_page(debug_dir: &Path, year: u32, html: &str) -> Result<PathBuf, AppError> {
    let year_dir = debug_dir.join(year.to_string());
    fs::create_dir_all(&year_dir)?;

    fs::write(year_dir.join("page.html"), html)?;

    let annotated_path = year_dir.join("page_annotated.html");
    fs::write(&annotated_path, annotate_html(html, &find_highlights(html)))?;

    tracing::debug!("Saved debug pages for {} to {}", year, year_dir.display());
    Ok(annotated_path)
}
