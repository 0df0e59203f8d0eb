//! Catalog item model.
//!
//! This module defines the values the orchestrator receives from the catalog:
//! [`ResultItem`] summaries for the result grid and [`DetailRecord`]s for the
//! detail overlay. Both are immutable once received.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of minutes in one hour.
const MINUTES_PER_HOUR: u32 = 60;

/// Catalog identifier of a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MovieId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Release year of a movie, or `Unknown` when the catalog has no usable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseYear {
    Known(i32),
    Unknown,
}

impl ReleaseYear {
    /// Derives the year from a catalog release date.
    ///
    /// Full `YYYY-MM-DD` dates are parsed with chrono. Partial dates fall back
    /// to their first four characters when those form a year. Empty or
    /// missing dates are `Unknown`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinefind::domain::ReleaseYear;
    ///
    /// assert_eq!(ReleaseYear::from_release_date(Some("2010-07-15")), ReleaseYear::Known(2010));
    /// assert_eq!(ReleaseYear::from_release_date(Some("1999")), ReleaseYear::Known(1999));
    /// assert_eq!(ReleaseYear::from_release_date(Some("")), ReleaseYear::Unknown);
    /// assert_eq!(ReleaseYear::from_release_date(None), ReleaseYear::Unknown);
    /// ```
    #[must_use]
    pub fn from_release_date(date: Option<&str>) -> Self {
        let Some(date) = date.map(str::trim).filter(|d| !d.is_empty()) else {
            return Self::Unknown;
        };

        if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            return Self::Known(parsed.year());
        }

        date.get(..4)
            .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|prefix| prefix.parse().ok())
            .map_or(Self::Unknown, Self::Known)
    }
}

impl fmt::Display for ReleaseYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(year) => write!(f, "{year}"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Reference to a poster image, as the catalog's relative image path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosterRef(pub String);

impl PosterRef {
    /// Builds the absolute poster URL for the given image base and size.
    ///
    /// ```
    /// use cinefind::domain::PosterRef;
    ///
    /// let poster = PosterRef("/qmDpIHrmpJINaRKAfWQfftjCdyi.jpg".to_string());
    /// assert_eq!(
    ///     poster.url("https://image.tmdb.org/t/p/", "w500"),
    ///     "https://image.tmdb.org/t/p/w500/qmDpIHrmpJINaRKAfWQfftjCdyi.jpg"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self, image_base: &str, size: &str) -> String {
        let base = image_base.trim_end_matches('/');
        let path = self.0.trim_start_matches('/');
        format!("{base}/{size}/{path}")
    }
}

/// Summary of one search result, shown as a card in the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: MovieId,
    pub title: String,
    pub year: ReleaseYear,
    pub poster: Option<PosterRef>,
}

/// Extended information for the movie shown in the detail overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: MovieId,
    pub title: String,
    pub year: ReleaseYear,
    pub poster: Option<PosterRef>,
    pub overview: String,
    /// Average vote on a 0-10 scale.
    pub rating: f64,
    /// Runtime in minutes, when the catalog knows it.
    pub runtime: Option<u32>,
}

impl DetailRecord {
    /// Formats the runtime as `2h 28m`, `45m` or `unknown runtime`.
    ///
    /// ```
    /// # use cinefind::domain::{DetailRecord, MovieId, ReleaseYear};
    /// let mut record = DetailRecord {
    ///     id: MovieId(27205),
    ///     title: "Inception".to_string(),
    ///     year: ReleaseYear::Known(2010),
    ///     poster: None,
    ///     overview: String::new(),
    ///     rating: 8.4,
    ///     runtime: Some(148),
    /// };
    /// assert_eq!(record.runtime_label(), "2h 28m");
    /// record.runtime = None;
    /// assert_eq!(record.runtime_label(), "unknown runtime");
    /// ```
    #[must_use]
    pub fn runtime_label(&self) -> String {
        match self.runtime {
            None | Some(0) => "unknown runtime".to_string(),
            Some(minutes) if minutes < MINUTES_PER_HOUR => format!("{minutes}m"),
            Some(minutes) => {
                let hours = minutes / MINUTES_PER_HOUR;
                let rest = minutes % MINUTES_PER_HOUR;
                if rest == 0 {
                    format!("{hours}h")
                } else {
                    format!("{hours}h {rest}m")
                }
            }
        }
    }

    /// Formats the rating with one decimal, e.g. `8.4/10`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_year_rejects_non_numeric_prefixes() {
        assert_eq!(ReleaseYear::from_release_date(Some("TBA")), ReleaseYear::Unknown);
        assert_eq!(ReleaseYear::from_release_date(Some("20x1-01-01")), ReleaseYear::Unknown);
        assert_eq!(ReleaseYear::from_release_date(Some("   ")), ReleaseYear::Unknown);
    }

    #[test]
    fn release_year_accepts_partial_dates() {
        assert_eq!(ReleaseYear::from_release_date(Some("2024-13")), ReleaseYear::Known(2024));
        assert_eq!(ReleaseYear::Known(1982).to_string(), "1982");
        assert_eq!(ReleaseYear::Unknown.to_string(), "unknown");
    }

    #[test]
    fn runtime_label_handles_whole_hours_and_short_films() {
        let mut record = DetailRecord {
            id: MovieId(1),
            title: "Short".to_string(),
            year: ReleaseYear::Unknown,
            poster: None,
            overview: String::new(),
            rating: 0.0,
            runtime: Some(120),
        };
        assert_eq!(record.runtime_label(), "2h");
        record.runtime = Some(12);
        assert_eq!(record.runtime_label(), "12m");
        record.runtime = Some(0);
        assert_eq!(record.runtime_label(), "unknown runtime");
    }

    #[test]
    fn rating_label_rounds_to_one_decimal() {
        let record = DetailRecord {
            id: MovieId(1),
            title: String::new(),
            year: ReleaseYear::Unknown,
            poster: None,
            overview: String::new(),
            rating: 7.456,
            runtime: None,
        };
        assert_eq!(record.rating_label(), "7.5/10");
    }

    #[test]
    fn movie_id_parses_from_context_strings() {
        assert_eq!(" 42 ".parse::<MovieId>(), Ok(MovieId(42)));
        assert!("abc".parse::<MovieId>().is_err());
    }
}
