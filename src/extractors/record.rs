// src/extractors/record.rs
use serde::Serialize;

use crate::extractors::standings::Standings;

/// One season's summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyStats {
    #[serde(rename = "Year")]
    pub year: u32,
    #[serde(rename = "Most Wins")]
    pub most_wins_team: String,
    #[serde(rename = "Most Losses")]
    pub most_losses_team: String,
    #[serde(rename = "Champion")]
    pub champion: String,
}

/// Builds the season record. Without standings the year yields nothing;
/// a missing champion only ever arrives as the sentinel.
pub fn assemble(year: u32, standings: Option<&Standings>, champion: String) -> Option<YearlyStats> {
    let Some(standings) = standings else {
        tracing::warn!("Skipping {} due to missing standings (champion: {})", year, champion);
        return None;
    };
    if standings.most_wins.is_empty() || standings.most_losses.is_empty() {
        tracing::warn!("Skipping {}: standings leader has an empty team name", year);
        return None;
    }

    Some(YearlyStats {
        year,
        most_wins_team: standings.most_wins.clone(),
        most_losses_team: standings.most_losses.clone(),
        champion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::champion::NOT_FOUND;

    fn standings(wins: &str, losses: &str) -> Standings {
        Standings {
            rows: Vec::new(),
            most_wins: wins.to_string(),
            most_losses: losses.to_string(),
        }
    }

    #[test]
    fn test_champion_sentinel_does_not_block() {
        let stats = assemble(1901, Some(&standings("Pirates", "Cardinals")), NOT_FOUND.to_string()).unwrap();
        assert_eq!(stats.champion, NOT_FOUND);
        assert_eq!(stats.most_wins_team, "Pirates");
        assert_eq!(stats.most_losses_team, "Cardinals");
    }

    #[test]
    fn test_missing_standings_skip_the_year() {
        assert!(assemble(1905, None, "New York Giants".to_string()).is_none());
    }

    #[test]
    fn test_empty_team_names_never_emitted() {
        assert!(assemble(1905, Some(&standings("", "Braves")), "New York Giants".to_string()).is_none());
    }
}
