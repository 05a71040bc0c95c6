// src/extractors/champion.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, Html};

// --- Constants ---

/// Written in place of a champion when no confident match exists.
pub const NOT_FOUND: &str = "Not found";

/// A line mentioning any of these (case-insensitively) is a champion line.
pub const CHAMPION_KEYWORDS: [&str; 5] = [
    "world series champion",
    "world champion",
    "champion",
    "pennant winner",
    "league champion",
];

/// Franchise nicknames a captured team name must end with.
pub const DEFAULT_TEAM_SUFFIXES: [&str; 21] = [
    "Athletics", "Red Stockings", "Wolves", "White Stockings",
    "Browns", "Orioles", "Wolverines", "Blues",
    "Metropolitans", "Alleghenys", "Giants", "Dodgers",
    "Yankees", "Mets", "Cardinals", "Cubs", "Tigers",
    "Phillies", "Indians", "Braves", "Red Sox",
];

/// Elements whose text never renders as page content.
const NON_RENDERED: [&str; 3] = ["script", "style", "noscript"];

// Leading run of letters and spaces, used to drop trailing punctuation from a capture.
static LETTERS_AND_SPACES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z\s]+)").expect("Failed to compile LETTERS_AND_SPACES_RE")
});

// --- Text Normalization ---

/// Trims a captured team name and restricts it to its leading letters and
/// spaces, falling back to the trimmed capture when that leaves nothing.
pub fn clean_champion_text(raw: &str) -> Option<String> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    let restricted = LETTERS_AND_SPACES_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty());

    Some(restricted.unwrap_or(text).to_string())
}

// --- Candidate Lines ---

/// Splits the rendered text of a page into trimmed lines, one per text block.
pub fn page_lines(document: &Html) -> Vec<String> {
    document
        .tree
        .nodes()
        .filter_map(|node| {
            let Node::Text(text) = node.value() else { return None };
            let hidden = node
                .parent()
                .and_then(|p| p.value().as_element().map(|el| el.name()))
                .is_some_and(|name| NON_RENDERED.contains(&name));
            (!hidden).then(|| text.text.to_string())
        })
        .flat_map(|text| text.lines().map(|l| l.trim().to_string()).collect::<Vec<_>>())
        .collect()
}

/// Longest line mentioning a championship keyword; the first one wins ties.
pub fn champion_line(lines: &[String]) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for line in lines {
        let lowered = line.to_lowercase();
        if !CHAMPION_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }
        let candidate = line.trim();
        let len = candidate.chars().count();
        if best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((candidate, len));
        }
    }
    best.map(|(line, _)| line)
}

// --- Pattern Cascade ---

/// Builds one stage of the cascade: `triggers` followed by an optional
/// separator, then a capitalised run of words ending in a known nickname.
fn team_pattern(triggers: &str, suffixes: &[String]) -> Result<Regex, regex::Error> {
    let suffix_alt = suffixes
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)(?:{triggers})(?:ship)?(?:\s*[:\-–]?\s*)([A-Z][a-zA-Z\s]*?(?:{suffix_alt}))\b"
    ))
}

/// Finds the season's champion in a page's text lines.
pub struct ChampionExtractor {
    stages: Vec<(&'static str, Regex)>,
}

impl ChampionExtractor {
    pub fn new(suffixes: &[String]) -> Result<Self, regex::Error> {
        Ok(Self {
            stages: vec![
                ("primary", team_pattern("champion", suffixes)?),
                ("alternate", team_pattern("champion|pennant winner|league champion", suffixes)?),
            ],
        })
    }

    /// Built-in nicknames followed by any `extra` ones.
    pub fn with_suffixes(extra: &[String]) -> Result<Self, regex::Error> {
        let suffixes: Vec<String> = DEFAULT_TEAM_SUFFIXES
            .iter()
            .map(|s| s.to_string())
            .chain(extra.iter().cloned())
            .collect();
        Self::new(&suffixes)
    }

    /// Runs the cascade over a single line; the first stage to match wins.
    pub fn match_team(&self, line: &str) -> Option<String> {
        for (stage, re) in &self.stages {
            let Some(capture) = re.captures(line).and_then(|caps| caps.get(1)) else {
                continue;
            };
            let team = clean_champion_text(capture.as_str());
            tracing::debug!("{} champion pattern matched {:?} in line: '{}'", stage, team, line);
            if team.is_some() {
                return team;
            }
        }
        tracing::debug!("No champion pattern matched line: '{}'", line);
        None
    }

    /// Champion named on the page, if any line names one confidently.
    pub fn find(&self, lines: &[String]) -> Option<String> {
        let line = champion_line(lines)?;
        self.match_team(line)
    }

    /// Like `find`, degrading to the `NOT_FOUND` sentinel.
    pub fn extract(&self, lines: &[String]) -> String {
        self.find(lines).unwrap_or_else(|| NOT_FOUND.to_string())
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ChampionExtractor {
        ChampionExtractor::with_suffixes(&[]).unwrap()
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_world_series_champion_line() {
        let found = extractor().extract(&lines(&["The 1905 World Series Champion New York Giants"]));
        assert_eq!(found, "New York Giants");
    }

    #[test]
    fn test_no_keyword_is_not_found() {
        let found = extractor().extract(&lines(&["Team X finished the season strong."]));
        assert_eq!(found, NOT_FOUND);
    }

    #[test]
    fn test_keyword_without_known_team_is_not_found() {
        let found = extractor().extract(&lines(&["Champion: to be determined"]));
        assert_eq!(found, NOT_FOUND);
    }

    #[test]
    fn test_separator_and_trailing_punctuation() {
        let found = extractor().extract(&lines(&["World Champion - Boston Red Sox, in five games"]));
        assert_eq!(found, "Boston Red Sox");

        let found = extractor().extract(&lines(&["League Championship: Chicago Cubs."]));
        assert_eq!(found, "Chicago Cubs");
    }

    #[test]
    fn test_alternate_stage_uses_pennant_winner() {
        let found = extractor().extract(&lines(&["1884 Pennant Winner Providence Grays and Detroit Wolverines"]));
        assert_eq!(found, "Providence Grays and Detroit Wolverines");
    }

    #[test]
    fn test_longest_candidate_line_is_used() {
        let short = "Champion: St. Louis Browns (short)";
        let long = "1968 World Series Champion Detroit Tigers defeat the St. Louis Cardinals in seven";
        assert!(long.len() > short.len());
        let input = lines(&[short, "No keyword here at all, only filler text", long]);
        assert_eq!(champion_line(&input), Some(long));
        assert_eq!(extractor().extract(&input), "Detroit Tigers");
    }

    #[test]
    fn test_equal_length_lines_keep_first() {
        let input = lines(&["champion A", "champion B"]);
        assert_eq!(champion_line(&input), Some("champion A"));
    }

    #[test]
    fn test_extra_suffixes() {
        let extractor = ChampionExtractor::with_suffixes(&["Grays".to_string()]).unwrap();
        let found = extractor.extract(&lines(&["Pennant Winner: Providence Grays"]));
        assert_eq!(found, "Providence Grays");
    }

    #[test]
    fn test_clean_champion_text() {
        assert_eq!(clean_champion_text("  New York Giants  "), Some("New York Giants".to_string()));
        assert_eq!(clean_champion_text("Boston Americans!!"), Some("Boston Americans".to_string()));
        assert_eq!(clean_champion_text("1905 Giants"), Some("1905 Giants".to_string()));
        assert_eq!(clean_champion_text("   "), None);
    }

    #[test]
    fn test_page_lines_skip_scripts() {
        let html = Html::parse_document(
            "<html><head><script>var champion = 'Cubs';</script></head>\
             <body><p>World Champion\n  Chicago Cubs  </p></body></html>",
        );
        let found = page_lines(&html);
        assert!(found.contains(&"World Champion".to_string()));
        assert!(found.contains(&"Chicago Cubs".to_string()));
        assert!(!found.iter().any(|l| l.contains("var champion")));
    }
}
