// src/extractors/tables.rs

// --- Imports ---
use std::fmt;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// --- CSS Selectors (Lazy Static) ---
static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table").expect("Failed to compile TABLE_SELECTOR")
});

static CAPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("caption").expect("Failed to compile CAPTION_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tr").expect("Failed to compile ROW_SELECTOR")
});

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td").expect("Failed to compile CELL_SELECTOR")
});

// --- Constants ---
const STANDINGS_KEYWORDS: [&str; 2] = ["standings", "team standings"];

/// Structural tier only looks at tables at least this long.
const MIN_STRUCTURAL_ROWS: usize = 5;

// --- Data Structures ---

/// One `<table>` on a year page with the text the selector and parser need.
#[derive(Debug, Clone, Default)]
pub struct TableCandidate {
    /// Position of the table on the page, in document order.
    pub index: usize,
    /// Lowercased caption text, empty when the table has no caption.
    pub caption: String,
    /// Lowercased text of the whole table, text nodes joined by spaces.
    pub text: String,
    /// `td` texts for every `tr`, header rows included.
    pub rows: Vec<Vec<String>>,
}

impl TableCandidate {
    pub fn from_element(index: usize, table: ElementRef) -> Self {
        let caption = table
            .select(&CAPTION_SELECTOR)
            .next()
            .map(|c| stripped_text(c).to_lowercase())
            .unwrap_or_default();

        let text = table.text().collect::<Vec<_>>().join(" ").to_lowercase();

        let rows = table
            .select(&ROW_SELECTOR)
            .map(|row| row.select(&CELL_SELECTOR).map(stripped_text).collect())
            .collect();

        Self { index, caption, text, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Text of an element with every text node trimmed and concatenated.
pub fn stripped_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}

/// Parses a win or loss cell. Only plain non-negative integers count.
pub fn parse_count(cell: &str) -> Option<u32> {
    cell.trim().parse().ok()
}

/// Collects every table on the page in document order.
pub fn collect_tables(document: &Html) -> Vec<TableCandidate> {
    document
        .select(&TABLE_SELECTOR)
        .enumerate()
        .map(|(i, table)| TableCandidate::from_element(i, table))
        .collect()
}

// --- Selection Cascade ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTier {
    Caption,
    BodyText,
    Structural,
}

impl fmt::Display for SelectionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionTier::Caption => "caption",
            SelectionTier::BodyText => "body text",
            SelectionTier::Structural => "structural heuristic",
        };
        f.write_str(name)
    }
}

type TierStrategy = fn(&TableCandidate) -> bool;

/// Tiers in evaluation order; each is tried over every table before the next.
const TIERS: [(SelectionTier, TierStrategy); 3] = [
    (SelectionTier::Caption, caption_mentions_standings),
    (SelectionTier::BodyText, text_mentions_standings),
    (SelectionTier::Structural, looks_like_standings),
];

fn caption_mentions_standings(table: &TableCandidate) -> bool {
    STANDINGS_KEYWORDS.iter().any(|kw| table.caption.contains(kw))
}

fn text_mentions_standings(table: &TableCandidate) -> bool {
    STANDINGS_KEYWORDS.iter().any(|kw| table.text.contains(kw))
}

/// Long enough, and some non-header row has integer cells in columns 2 and 3.
fn looks_like_standings(table: &TableCandidate) -> bool {
    if table.row_count() < MIN_STRUCTURAL_ROWS {
        return false;
    }
    table.rows.iter().skip(1).any(|cells| {
        cells.len() >= 3 && parse_count(&cells[1]).is_some() && parse_count(&cells[2]).is_some()
    })
}

/// Picks the table most likely to hold win/loss standings, if any.
pub fn select_standings_table(tables: &[TableCandidate]) -> Option<(SelectionTier, &TableCandidate)> {
    for (tier, strategy) in TIERS {
        if let Some(table) = tables.iter().find(|&t| strategy(t)) {
            tracing::info!("Selected table {} of {} by {}", table.index, tables.len(), tier);
            return Some((tier, table));
        }
        tracing::trace!("No table matched the {} tier", tier);
    }
    tracing::debug!("No standings table among {} tables", tables.len());
    None
}
