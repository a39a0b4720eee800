//! Comparison periods and period selection
//!
//! A [`Period`] is either a calendar month or a calendar year. Periods of
//! the same granularity are totally ordered, and [`Period::pred`] always
//! steps to the adjacent calendar period, whether or not the ledger has
//! entries in it.

use chrono::{Datelike, NaiveDate};
use finstatements_config::Granularity;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::models::Ledger;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month or year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Period {
    Year(i32),
    Month(YearMonth),
}

/// A calendar month, only constructible with a month number in `1..=12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl Period {
    /// Period containing `date` at the given granularity
    pub fn of(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Month => Period::Month(YearMonth {
                year: date.year(),
                month: date.month(),
            }),
            Granularity::Year => Period::Year(date.year()),
        }
    }

    /// Month period, validating the month number
    pub fn month(year: i32, month: u32) -> CoreResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidPeriod {
                value: format!("{}-{:02}", year, month),
                reason: "month must be between 1 and 12".to_string(),
            });
        }
        Ok(Period::Month(YearMonth { year, month }))
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            Period::Year(_) => Granularity::Year,
            Period::Month(_) => Granularity::Month,
        }
    }

    /// The adjacent earlier calendar period
    pub fn pred(&self) -> Period {
        match *self {
            Period::Year(year) => Period::Year(year - 1),
            Period::Month(YearMonth { year, month: 1 }) => Period::Month(YearMonth { year: year - 1, month: 12 }),
            Period::Month(YearMonth { year, month }) => Period::Month(YearMonth { year, month: month - 1 }),
        }
    }

    /// Whether `date` falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        Period::of(date, self.granularity()) == *self
    }

    /// Column label, e.g. "May 2025" or "2025"
    pub fn label(&self) -> String {
        match *self {
            Period::Year(year) => year.to_string(),
            Period::Month(YearMonth { year, month }) => {
                format!("{} {}", MONTH_ABBREVIATIONS[(month - 1) as usize], year)
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Year(year) => write!(f, "{}", year),
            Period::Month(YearMonth { year, month }) => write!(f, "{}-{:02}", year, month),
        }
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = |reason: &str| CoreError::InvalidPeriod {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        match s.split_once('-') {
            Some((year, month)) => {
                let year = year.parse::<i32>().map_err(|_| invalid("year is not a number"))?;
                let month = month.parse::<u32>().map_err(|_| invalid("month is not a number"))?;
                Period::month(year, month)
            }
            None => s
                .parse::<i32>()
                .map(Period::Year)
                .map_err(|_| invalid("expected YYYY or YYYY-MM")),
        }
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A validated (current, previous) pair with `previous < current`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ComparisonPair")]
pub struct Comparison {
    current: Period,
    previous: Period,
}

#[derive(Deserialize)]
struct ComparisonPair {
    current: Period,
    previous: Period,
}

impl TryFrom<ComparisonPair> for Comparison {
    type Error = CoreError;

    fn try_from(pair: ComparisonPair) -> Result<Self, Self::Error> {
        Comparison::new(pair.current, pair.previous)
    }
}

impl Comparison {
    pub fn new(current: Period, previous: Period) -> CoreResult<Self> {
        if current.granularity() != previous.granularity() {
            return Err(CoreError::InvalidPeriod {
                value: format!("{} vs {}", current, previous),
                reason: "both periods must be months or both years".to_string(),
            });
        }
        if previous >= current {
            return Err(CoreError::InvalidPeriod {
                value: previous.to_string(),
                reason: format!("previous period must be earlier than {}", current),
            });
        }
        Ok(Self { current, previous })
    }

    pub fn current(&self) -> Period {
        self.current
    }

    pub fn previous(&self) -> Period {
        self.previous
    }

    pub fn granularity(&self) -> Granularity {
        self.current.granularity()
    }
}

/// Offers the period choices a ledger supports.
///
/// Previous-period choices are always strictly earlier than the chosen
/// current period, so an inverted pair cannot be selected.
#[derive(Debug, Clone)]
pub struct PeriodSelector {
    granularity: Granularity,
    /// Distinct periods, ascending
    periods: Vec<Period>,
}

impl PeriodSelector {
    pub fn new(ledger: &Ledger, granularity: Granularity) -> Self {
        Self::from_periods(ledger.periods(granularity), granularity)
    }

    /// Build from an arbitrary list; duplicates and other granularities are dropped
    pub fn from_periods(periods: impl IntoIterator<Item = Period>, granularity: Granularity) -> Self {
        let mut periods: Vec<Period> = periods
            .into_iter()
            .filter(|p| p.granularity() == granularity)
            .collect();
        periods.sort();
        periods.dedup();
        Self { granularity, periods }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// All periods, oldest first
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Choices for the current period, newest first
    pub fn current_choices(&self) -> Vec<Period> {
        self.periods.iter().rev().copied().collect()
    }

    /// Choices for the previous period given `current`, newest first
    pub fn previous_choices(&self, current: Period) -> Vec<Period> {
        self.periods
            .iter()
            .rev()
            .filter(|p| **p < current)
            .copied()
            .collect()
    }

    /// Validate a user's pick
    pub fn select(&self, current: Period, previous: Period) -> CoreResult<Comparison> {
        self.ensure_comparable()?;

        if current.granularity() != self.granularity {
            return Err(CoreError::InvalidPeriod {
                value: current.to_string(),
                reason: format!("expected a {} period", self.granularity),
            });
        }
        if !self.periods.contains(&current) {
            return Err(CoreError::InvalidPeriod {
                value: current.to_string(),
                reason: "the ledger has no entries in this period".to_string(),
            });
        }

        let choices = self.previous_choices(current);
        if choices.is_empty() {
            return Err(CoreError::InsufficientPeriods {
                reason: format!("no {} earlier than {} is available for comparison", self.granularity, current),
            });
        }
        if !choices.contains(&previous) {
            return Err(CoreError::InvalidPeriod {
                value: previous.to_string(),
                reason: format!("not one of the periods available before {}", current),
            });
        }

        let comparison = Comparison::new(current, previous)?;
        log::info!("Comparing {} against {}", comparison.current(), comparison.previous());
        Ok(comparison)
    }

    /// `current` with the closest earlier period as previous
    pub fn select_current(&self, current: Period) -> CoreResult<Comparison> {
        self.ensure_comparable()?;
        let previous = self
            .previous_choices(current)
            .first()
            .copied()
            .ok_or_else(|| CoreError::InsufficientPeriods {
                reason: format!("no {} earlier than {} is available for comparison", self.granularity, current),
            })?;
        self.select(current, previous)
    }

    /// Newest period against the one before it
    pub fn latest(&self) -> CoreResult<Comparison> {
        self.ensure_comparable()?;
        let current = self.periods[self.periods.len() - 1];
        self.select_current(current)
    }

    fn ensure_comparable(&self) -> CoreResult<()> {
        if self.periods.len() < 2 {
            return Err(CoreError::InsufficientPeriods {
                reason: format!(
                    "found {} distinct {} period(s); at least two are needed",
                    self.periods.len(),
                    self.granularity
                ),
            });
        }
        Ok(())
    }
}
