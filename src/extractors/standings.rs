// src/extractors/standings.rs
use crate::extractors::tables::{parse_count, TableCandidate};
use crate::utils::error::ExtractError;

/// One team's line in a standings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingsRow {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
}

/// Parsed rows plus the teams leading in wins and losses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    pub rows: Vec<StandingsRow>,
    pub most_wins: String,
    pub most_losses: String,
}

/// Parses one data row. `row` is the position within the table, for logging.
fn parse_row(row: usize, cells: &[String]) -> Result<Option<StandingsRow>, ExtractError> {
    if cells.len() < 3 {
        return Ok(None);
    }
    let wins = parse_count(&cells[1]).ok_or_else(|| ExtractError::RowParse {
        row,
        reason: format!("wins cell '{}' is not an integer", cells[1]),
    })?;
    let losses = parse_count(&cells[2]).ok_or_else(|| ExtractError::RowParse {
        row,
        reason: format!("losses cell '{}' is not an integer", cells[2]),
    })?;
    Ok(Some(StandingsRow {
        team: cells[0].trim().to_string(),
        wins,
        losses,
    }))
}

/// Converts the data rows of `table` (everything after the header row) into
/// standings rows. Rows whose win/loss cells don't parse are dropped.
pub fn parse_rows(table: &TableCandidate) -> Vec<StandingsRow> {
    let mut parsed = Vec::new();
    for (row, cells) in table.rows.iter().enumerate().skip(1) {
        match parse_row(row, cells) {
            Ok(Some(standing)) => {
                tracing::trace!("Parsed {} {}-{}", standing.team, standing.wins, standing.losses);
                parsed.push(standing);
            }
            Ok(None) => {}
            Err(e) => tracing::debug!("Table {}: {} ({:?})", table.index, e, cells),
        }
    }
    parsed
}

/// First row holding the maximum of `key`; earlier rows win ties.
fn first_max_by<F>(rows: &[StandingsRow], key: F) -> Option<&StandingsRow>
where
    F: Fn(&StandingsRow) -> u32,
{
    rows.iter().fold(None, |best: Option<&StandingsRow>, row| match best {
        Some(current) if key(row) <= key(current) => Some(current),
        _ => Some(row),
    })
}

/// Computes win and loss leaders. Empty input yields `NoStandingsRows`.
pub fn compute_leaders(rows: Vec<StandingsRow>) -> Result<Standings, ExtractError> {
    let most_wins = first_max_by(&rows, |r| r.wins).ok_or(ExtractError::NoStandingsRows)?;
    let most_losses = first_max_by(&rows, |r| r.losses).ok_or(ExtractError::NoStandingsRows)?;
    let (most_wins, most_losses) = (most_wins.team.clone(), most_losses.team.clone());

    Ok(Standings { rows, most_wins, most_losses })
}

/// Parses the selected table and computes its leaders.
pub fn parse_standings(table: &TableCandidate) -> Result<Standings, ExtractError> {
    let rows = parse_rows(table);
    tracing::debug!("Parsed {} of {} rows in table {}", rows.len(), table.row_count().saturating_sub(1), table.index);
    compute_leaders(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> TableCandidate {
        let mut all = vec![vec!["Team".to_string(), "W".to_string(), "L".to_string()]];
        all.extend(rows.iter().map(|r| r.iter().map(|c| c.to_string()).collect::<Vec<_>>()));
        TableCandidate { rows: all, ..Default::default() }
    }

    fn row(team: &str, wins: u32, losses: u32) -> StandingsRow {
        StandingsRow { team: team.to_string(), wins, losses }
    }

    #[test]
    fn test_ties_go_to_first_row() {
        let standings = parse_standings(&table(&[&["A", "10", "5"], &["B", "10", "2"]])).unwrap();
        assert_eq!(standings.most_wins, "A");
        assert_eq!(standings.most_losses, "A");

        let standings = compute_leaders(vec![row("X", 50, 90), row("Y", 90, 50), row("Z", 60, 90)]).unwrap();
        assert_eq!(standings.most_wins, "Y");
        assert_eq!(standings.most_losses, "X");
    }

    #[test]
    fn test_non_numeric_rows_are_excluded() {
        let standings = parse_standings(&table(&[&["A", "?", "5"], &["B", "7", "3"]])).unwrap();
        assert_eq!(standings.rows, vec![row("B", 7, 3)]);
        assert_eq!(standings.most_wins, "B");
        assert_eq!(standings.most_losses, "B");
    }

    #[test]
    fn test_header_and_short_rows_are_skipped() {
        // The header row would parse if it were numeric; it is still skipped.
        let mut t = table(&[&["Only two", "3"], &[" Cubs ", "116", "36", "extra"]]);
        t.rows[0] = vec!["Header".into(), "999".into(), "999".into()];
        let standings = parse_standings(&t).unwrap();
        assert_eq!(standings.rows, vec![row("Cubs", 116, 36)]);
    }

    #[test]
    fn test_no_parseable_rows() {
        let err = parse_standings(&table(&[&["A", "W", "L"], &["B", "", ""]])).unwrap_err();
        assert_eq!(err, ExtractError::NoStandingsRows);
    }

    #[test]
    fn test_row_parse_error_names_the_cell() {
        let cells = vec!["A".to_string(), "12".to_string(), "x".to_string()];
        let err = parse_row(3, &cells).unwrap_err();
        assert!(matches!(err, ExtractError::RowParse { row: 3, ref reason } if reason.contains("losses")));
    }
}
