// src/extractors/page.rs
use scraper::Html;

use crate::extractors::champion::{page_lines, ChampionExtractor};
use crate::extractors::record::{assemble, YearlyStats};
use crate::extractors::sections::{split_sections, ContentSection};
use crate::extractors::standings::parse_standings;
use crate::extractors::tables::{collect_tables, select_standings_table};
use crate::utils::error::ExtractError;

/// Everything extracted from one year page.
#[derive(Debug, Clone, Default)]
pub struct PageOutcome {
    pub stats: Option<YearlyStats>,
    pub sections: Vec<ContentSection>,
    /// Why standings were unavailable, when they were.
    pub standings_error: Option<ExtractError>,
}

/// Runs standings, champion and section extraction over a single year page.
pub struct PageExtractor {
    champion: ChampionExtractor,
}

impl PageExtractor {
    pub fn new(champion: ChampionExtractor) -> Self {
        Self { champion }
    }

    pub fn extract(&self, year: u32, html: &str) -> PageOutcome {
        let document = Html::parse_document(html);

        let tables = collect_tables(&document);
        tracing::debug!("Found {} tables on page for {}", tables.len(), year);

        let standings = select_standings_table(&tables)
            .ok_or(ExtractError::NoCandidateTable)
            .and_then(|(_, table)| parse_standings(table));
        match &standings {
            Ok(s) => tracing::debug!("{}: {} standings rows parsed", year, s.rows.len()),
            Err(e) => tracing::warn!("{}: {}", year, e),
        }

        // Attempted even when standings failed.
        let champion = self.champion.extract(&page_lines(&document));
        tracing::info!("{} champion: {}", year, champion);

        let stats = assemble(year, standings.as_ref().ok(), champion);
        let sections = split_sections(&document, year);

        PageOutcome {
            stats,
            sections,
            standings_error: standings.err(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::champion::NOT_FOUND;
    use crate::extractors::sections::SectionKind;

    fn extractor() -> PageExtractor {
        PageExtractor::new(ChampionExtractor::with_suffixes(&[]).unwrap())
    }

    #[test]
    fn test_full_year_page() {
        let html = r#"
            <html><body><div class="main-content">
            <p>1905 World Series Champion New York Giants</p>
            <table><caption>1905 American League Team Standings</caption>
              <tr><th>Team</th><th>W</th><th>L</th></tr>
              <tr><td>Philadelphia Athletics</td><td>92</td><td>56</td></tr>
              <tr><td>Chicago White Sox</td><td>92</td><td>60</td></tr>
              <tr><td>Washington Senators</td><td>64</td><td>87</td></tr>
              <tr><td>St. Louis Browns</td><td>54</td><td>99</td></tr>
            </table>
            <ul><li>Christy Mathewson throws three shutouts</li></ul>
            <p>Copyright 2020 Baseball Almanac</p>
            </div></body></html>
        "#;

        let outcome = extractor().extract(1905, html);
        let stats = outcome.stats.unwrap();
        assert_eq!(stats.most_wins_team, "Philadelphia Athletics");
        assert_eq!(stats.most_losses_team, "St. Louis Browns");
        assert_eq!(stats.champion, "New York Giants");
        assert!(outcome.standings_error.is_none());

        let kinds: Vec<SectionKind> = outcome.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SectionKind::EventSummary, SectionKind::EventList]);
    }

    #[test]
    fn test_structural_table_without_keywords() {
        let html = r#"
            <body><table>
              <tr><td>Club</td><td>Won</td><td>Lost</td></tr>
              <tr><td>Boston Red Stockings</td><td>39</td><td>31</td></tr>
              <tr><td>Chicago White Stockings</td><td>52</td><td>14</td></tr>
              <tr><td>Hartford Dark Blues</td><td>47</td><td>21</td></tr>
              <tr><td>Cincinnati Reds</td><td>9</td><td>56</td></tr>
            </table></body>
        "#;
        let stats = extractor().extract(1876, html).stats.unwrap();
        assert_eq!(stats.most_wins_team, "Chicago White Stockings");
        assert_eq!(stats.most_losses_team, "Cincinnati Reds");
        assert_eq!(stats.champion, NOT_FOUND);
    }

    #[test]
    fn test_champion_without_standings_is_omitted() {
        let html = r#"<body><p>World Series Champion Boston Red Sox</p><table><tr><td>nothing</td></tr></table></body>"#;
        let outcome = extractor().extract(1918, html);
        assert!(outcome.stats.is_none());
        assert_eq!(outcome.standings_error, Some(ExtractError::NoCandidateTable));
        assert_eq!(outcome.sections.len(), 1);
    }

    #[test]
    fn test_selected_table_with_no_rows_is_omitted() {
        let html = r#"<body><table><caption>Standings</caption><tr><td>Team</td><td>W</td><td>L</td></tr>
            <tr><td>TBD</td><td>-</td><td>-</td></tr></table></body>"#;
        let outcome = extractor().extract(2020, html);
        assert!(outcome.stats.is_none());
        assert_eq!(outcome.standings_error, Some(ExtractError::NoStandingsRows));
    }
}
