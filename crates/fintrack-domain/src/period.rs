//! Period filter modes and the inclusive date ranges they resolve to.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lower bound used when a period applies no date filtering.
pub fn sentinel_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).expect("1900-01-01 is a valid date")
}

/// Upper bound used when a period applies no date filtering.
pub fn sentinel_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2100, 12, 31).expect("2100-12-31 is a valid date")
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
/// How the active date range is derived from the current day.
pub enum PeriodMode {
    Day,
    Week,
    #[default]
    Month,
    Year,
    All,
    Custom,
}

impl PeriodMode {
    pub const ALL_MODES: [PeriodMode; 6] = [
        PeriodMode::Day,
        PeriodMode::Week,
        PeriodMode::Month,
        PeriodMode::Year,
        PeriodMode::All,
        PeriodMode::Custom,
    ];

    /// Lenient parse: anything unrecognized selects [`PeriodMode::All`].
    pub fn from_label(label: &str) -> PeriodMode {
        label.parse().unwrap_or(PeriodMode::All)
    }

    pub fn label(self) -> &'static str {
        match self {
            PeriodMode::Day => "day",
            PeriodMode::Week => "week",
            PeriodMode::Month => "month",
            PeriodMode::Year => "year",
            PeriodMode::All => "all",
            PeriodMode::Custom => "custom",
        }
    }
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PeriodMode {
    type Err = UnknownPeriodMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "today" | "dia" => Ok(PeriodMode::Day),
            "week" | "semana" => Ok(PeriodMode::Week),
            "month" | "mes" | "mês" => Ok(PeriodMode::Month),
            "year" | "ano" => Ok(PeriodMode::Year),
            "all" | "todos" => Ok(PeriodMode::All),
            "custom" | "personalizado" => Ok(PeriodMode::Custom),
            _ => Err(UnknownPeriodMode(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPeriodMode(pub String);

impl fmt::Display for UnknownPeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown period mode `{}`", self.0)
    }
}

impl std::error::Error for UnknownPeriodMode {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
/// The user's period choice, including optional custom bounds.
pub struct PeriodSelection {
    pub mode: PeriodMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_end: Option<NaiveDate>,
}

impl PeriodSelection {
    pub fn new(mode: PeriodMode) -> Self {
        Self {
            mode,
            custom_start: None,
            custom_end: None,
        }
    }

    pub fn custom(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            mode: PeriodMode::Custom,
            custom_start: start,
            custom_end: end,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Inclusive calendar-date range. `start > end` is allowed and matches nothing.
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The sentinel range representing no date filtering.
    pub fn unbounded() -> Self {
        Self::new(sentinel_start(), sentinel_end())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_english_and_portuguese_labels() {
        assert_eq!("Week".parse(), Ok(PeriodMode::Week));
        assert_eq!("mes".parse(), Ok(PeriodMode::Month));
        assert_eq!("PERSONALIZADO".parse(), Ok(PeriodMode::Custom));
        assert_eq!(
            "fortnight".parse::<PeriodMode>(),
            Err(UnknownPeriodMode("fortnight".into()))
        );
    }

    #[test]
    fn lenient_label_falls_back_to_all() {
        assert_eq!(PeriodMode::from_label("fortnight"), PeriodMode::All);
        assert_eq!(PeriodMode::from_label("ano"), PeriodMode::Year);
    }

    #[test]
    fn range_contains_is_inclusive() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31));
        assert!(range.contains(date(2025, 1, 1)));
        assert!(range.contains(date(2025, 1, 31)));
        assert!(!range.contains(date(2025, 2, 1)));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let range = DateRange::new(date(2025, 2, 1), date(2025, 1, 1));
        assert!(range.is_inverted());
        assert!(!range.contains(date(2025, 1, 15)));
    }
}
