// src/extractors/sections.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::extractors::tables::stripped_text;

static MAIN_CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.main-content").expect("Failed to compile MAIN_CONTENT_SELECTOR")
});

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to compile BODY_SELECTOR")
});

static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p, ul, ol").expect("Failed to compile BLOCK_SELECTOR")
});

/// Footer markers matched anywhere in a block (lowercased).
const BOILERPLATE_MARKERS: [&str; 2] = ["preserved today", "hosted by"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionKind {
    #[serde(rename = "Event Summary")]
    EventSummary,
    #[serde(rename = "Event List")]
    EventList,
}

/// A narrative block from a year page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSection {
    #[serde(rename = "Year")]
    pub year: u32,
    #[serde(rename = "Section")]
    pub kind: SectionKind,
    #[serde(rename = "Content")]
    pub text: String,
}

/// Copyright lines and site credits.
pub fn is_boilerplate(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.starts_with("copyright") || BOILERPLATE_MARKERS.iter().any(|m| lowered.contains(m))
}

fn content_container(document: &Html) -> Option<ElementRef<'_>> {
    document
        .select(&MAIN_CONTENT_SELECTOR)
        .next()
        .or_else(|| document.select(&BODY_SELECTOR).next())
}

/// Walks the page's paragraphs and lists in document order.
pub fn split_sections(document: &Html, year: u32) -> Vec<ContentSection> {
    let Some(container) = content_container(document) else {
        tracing::debug!("No content container on page for {}", year);
        return Vec::new();
    };

    let mut sections = Vec::new();
    let mut skipped = 0usize;
    for block in container.select(&BLOCK_SELECTOR) {
        let text = stripped_text(block);
        if text.is_empty() {
            continue;
        }
        if is_boilerplate(&text) {
            skipped += 1;
            continue;
        }
        let kind = if block.value().name() == "p" {
            SectionKind::EventSummary
        } else {
            SectionKind::EventList
        };
        sections.push(ContentSection { year, kind, text });
    }

    tracing::debug!("{}: {} content sections, {} boilerplate blocks skipped", year, sections.len(), skipped);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_blocks_in_order() {
        let html = Html::parse_document(
            "<body><div class=\"main-content\">\
             <p>The Giants won the pennant.</p>\
             <ul><li>Opening Day</li><li>World Series</li></ul>\
             <p>   </p>\
             <ol><li>First</li></ol>\
             </div><p>Outside the container</p></body>",
        );
        let sections = split_sections(&html, 1905);
        assert_eq!(
            sections,
            vec![
                ContentSection { year: 1905, kind: SectionKind::EventSummary, text: "The Giants won the pennant.".into() },
                ContentSection { year: 1905, kind: SectionKind::EventList, text: "Opening DayWorld Series".into() },
                ContentSection { year: 1905, kind: SectionKind::EventList, text: "First".into() },
            ]
        );
    }

    #[test]
    fn test_falls_back_to_body() {
        let html = Html::parse_document("<body><p>Only paragraph</p></body>");
        let sections = split_sections(&html, 1876);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::EventSummary);
    }

    #[test]
    fn test_boilerplate_never_emitted() {
        let html = Html::parse_document(
            "<body>\
             <p>Copyright 2020 Baseball Almanac, Inc. All Rights Reserved.</p>\
             <p>A real summary.</p>\
             <p>History preserved today for tomorrow.</p>\
             <ul><li>Site hosted by Example</li></ul>\
             <p>COPYRIGHT notice again</p>\
             </body>",
        );
        let sections = split_sections(&html, 1950);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, "A real summary.");
    }

    #[test]
    fn test_is_boilerplate() {
        assert!(is_boilerplate("Copyright 2020 ..."));
        assert!(is_boilerplate("This site is Hosted By someone"));
        assert!(!is_boilerplate("The copyright era of baseball"));
    }
}
