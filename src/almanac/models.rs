// src/almanac/models.rs

/// Year index of the almanac site.
pub const DEFAULT_INDEX_URL: &str = "https://www.baseball-almanac.com/yearmenu.shtml";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:89.0) Gecko/20100101 Firefox/89.0";

/// A discovered (year, page reference) pair from the year index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearLink {
    pub year: u32,
    pub reference: String,
}

/// Naming convention for per-year pages, e.g. `yr1905a.shtml`.
#[derive(Debug, Clone)]
pub struct YearPagePattern {
    /// Substring the full reference must contain.
    pub marker: String,
    /// Suffix the final path segment must end with.
    pub suffix: String,
    /// Character offset of the 4-digit year inside the final segment.
    pub year_offset: usize,
}

impl Default for YearPagePattern {
    fn default() -> Self {
        Self {
            marker: "yr".to_string(),
            suffix: "a.shtml".to_string(),
            year_offset: 2,
        }
    }
}

impl YearPagePattern {
    /// Returns the year encoded in `reference`, if it names a year page.
    pub fn year_of(&self, reference: &str) -> Option<u32> {
        if !reference.contains(&self.marker) || !reference.ends_with(&self.suffix) {
            return None;
        }
        let segment = reference.rsplit('/').next()?;
        let digits = segment.get(self.year_offset..self.year_offset + 4)?;
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_of_accepts_year_pages() {
        let pattern = YearPagePattern::default();
        assert_eq!(pattern.year_of("https://www.baseball-almanac.com/yearly/yr1905a.shtml"), Some(1905));
        assert_eq!(pattern.year_of("yr2023a.shtml"), Some(2023));
    }

    #[test]
    fn test_year_of_rejects_other_links() {
        let pattern = YearPagePattern::default();
        assert_eq!(pattern.year_of("https://www.baseball-almanac.com/yearly/yr1905n.shtml"), None);
        assert_eq!(pattern.year_of("https://www.baseball-almanac.com/players/ruthba01.shtml"), None);
        assert_eq!(pattern.year_of("https://x.com/yr19a.shtml"), None);
        assert_eq!(pattern.year_of("https://x.com/yrAB05a.shtml"), None);
    }
}
