//! Maps a period filter mode to a concrete inclusive date range.

use chrono::{Datelike, Duration, NaiveDate};
use fintrack_domain::{sentinel_end, sentinel_start, DateRange, PeriodMode, PeriodSelection};

use crate::time::Clock;

pub struct PeriodResolver;

impl PeriodResolver {
    /// Resolves `mode` relative to `today`.
    ///
    /// Every mode except `All` and `Custom` ends on `today`, so `Week`, `Month`
    /// and `Year` are to-date windows. Custom bounds are only consulted for
    /// `Custom`; a missing bound falls back to the matching sentinel, and an
    /// inverted pair is returned as given.
    pub fn resolve(
        mode: PeriodMode,
        today: NaiveDate,
        custom_start: Option<NaiveDate>,
        custom_end: Option<NaiveDate>,
    ) -> DateRange {
        match mode {
            PeriodMode::Day => DateRange::new(today, today),
            PeriodMode::Week => {
                let since_sunday = today.weekday().num_days_from_sunday() as i64;
                DateRange::new(today - Duration::days(since_sunday), today)
            }
            PeriodMode::Month => DateRange::new(today - Duration::days(today.day0() as i64), today),
            PeriodMode::Year => {
                DateRange::new(today - Duration::days(today.ordinal0() as i64), today)
            }
            PeriodMode::All => DateRange::unbounded(),
            PeriodMode::Custom => {
                let range = DateRange::new(
                    custom_start.unwrap_or_else(sentinel_start),
                    custom_end.unwrap_or_else(sentinel_end),
                );
                if range.is_inverted() {
                    tracing::debug!(%range, "custom period is inverted; it will match no records");
                }
                range
            }
        }
    }

    pub fn resolve_selection(selection: &PeriodSelection, today: NaiveDate) -> DateRange {
        Self::resolve(
            selection.mode,
            today,
            selection.custom_start,
            selection.custom_end,
        )
    }

    /// Resolves a mode given as text. Unrecognized labels select the unfiltered range.
    pub fn resolve_label(
        label: &str,
        today: NaiveDate,
        custom_start: Option<NaiveDate>,
        custom_end: Option<NaiveDate>,
    ) -> DateRange {
        match label.parse::<PeriodMode>() {
            Ok(mode) => Self::resolve(mode, today, custom_start, custom_end),
            Err(err) => {
                tracing::debug!(%err, "falling back to the unfiltered period");
                DateRange::unbounded()
            }
        }
    }

    pub fn resolve_now(selection: &PeriodSelection, clock: &dyn Clock) -> DateRange {
        Self::resolve_selection(selection, clock.today())
    }
}
