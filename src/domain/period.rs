//! Half-open date windows and the canonical month keys used for budgeting.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A half-open reporting window `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if end <= start {
            return Err(PeriodError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// The single calendar day containing `date`.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date + Duration::days(1),
        }
    }

    /// The calendar month containing `date`.
    pub fn month_containing(date: NaiveDate) -> Self {
        let start = first_of_month(date);
        Self {
            start,
            end: shift_month(start, 1),
        }
    }

    /// `days` calendar days ending with (and including) `today`.
    pub fn trailing_days(today: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1));
        Self {
            start: today - Duration::days(span - 1),
            end: today + Duration::days(1),
        }
    }

    /// `months` calendar months ending with (and including) the month of `today`.
    pub fn trailing_months(today: NaiveDate, months: u32) -> Self {
        let current = first_of_month(today);
        let span = months.max(1) as i32;
        Self {
            start: shift_month(current, -(span - 1)),
            end: shift_month(current, 1),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn contains_datetime(&self, at: NaiveDateTime) -> bool {
        self.contains(at.date())
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Month window preceding the month that contains `start`.
    pub fn previous_month(&self) -> Self {
        Self::month_containing(shift_month(first_of_month(self.start), -1))
    }

    /// Month window following the month that contains `start`.
    pub fn next_month(&self) -> Self {
        Self::month_containing(shift_month(first_of_month(self.start), 1))
    }

    pub fn period_key(&self) -> PeriodKey {
        PeriodKey::from_date(self.start)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

const MIN_KEY_YEAR: i32 = 0;
const MAX_KEY_YEAR: i32 = 9999;

/// Canonical identifier for a calendar month, rendered as `yyyy-MM`.
///
/// Ordering follows the calendar, and the string form sorts the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) || !(MIN_KEY_YEAR..=MAX_KEY_YEAR).contains(&year) {
            return Err(PeriodError::InvalidKey(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Key for the month containing `date`; years are clamped to `0..=9999` so every key can be
    /// rendered and parsed back.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(MIN_KEY_YEAR, MAX_KEY_YEAR),
            month: date.month(),
        }
    }

    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Self::from_date(at.date())
    }

    pub fn parse(raw: &str) -> Result<Self, PeriodError> {
        let invalid = || PeriodError::InvalidKey(raw.to_string());
        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn month_window(&self) -> DateWindow {
        DateWindow::month_containing(self.first_day())
    }

    /// Key `months` calendar months earlier.
    pub fn months_before(&self, months: u32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 - months as i32;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

/// Errors raised when constructing windows or month keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    InvalidRange,
    InvalidKey(String),
}

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodError::InvalidRange => f.write_str("date window end must be after start"),
            PeriodError::InvalidKey(raw) => write!(f, "`{raw}` is not a yyyy-MM month key"),
        }
    }
}

impl std::error::Error for PeriodError {}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Moves `date` by whole months, clamping the day to the target month's length.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_rejects_empty_range() {
        assert_eq!(
            DateWindow::new(date(2026, 1, 5), date(2026, 1, 5)),
            Err(PeriodError::InvalidRange)
        );
    }

    #[test]
    fn keys_from_extreme_dates_parse_back() {
        for raw in [date(12000, 3, 1), date(-5, 7, 1)] {
            let key = PeriodKey::from_date(raw);
            assert_eq!(PeriodKey::parse(&key.to_string()), Ok(key));
        }
        assert_eq!(PeriodKey::from_date(date(12000, 3, 1)).to_string(), "9999-03");
    }

    #[test]
    fn month_window_is_half_open() {
        let window = DateWindow::month_containing(date(2024, 2, 17));
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 3, 1));
        assert!(window.contains(date(2024, 2, 29)));
        assert!(!window.contains(date(2024, 3, 1)));
        assert_eq!(window.days(), 29);
    }

    #[test]
    fn trailing_windows_include_today() {
        let today = date(2026, 3, 2);
        let week = DateWindow::trailing_days(today, 7);
        assert_eq!(week.start, date(2026, 2, 24));
        assert!(week.contains(today));
        assert_eq!(week.days(), 7);

        let year = DateWindow::trailing_months(today, 12);
        assert_eq!(year.start, date(2025, 4, 1));
        assert_eq!(year.end, date(2026, 4, 1));
    }

    #[test]
    fn month_navigation_crosses_years() {
        let january = DateWindow::month_containing(date(2026, 1, 31));
        assert_eq!(january.previous_month().start, date(2025, 12, 1));
        assert_eq!(january.next_month().start, date(2026, 2, 1));
    }

    #[test]
    fn shift_month_clamps_day() {
        assert_eq!(shift_month(date(2026, 1, 31), 1), date(2026, 2, 28));
        assert_eq!(shift_month(date(2024, 3, 31), -1), date(2024, 2, 29));
    }

    #[test]
    fn period_key_formats_and_parses() {
        let key = PeriodKey::from_date(date(2026, 1, 13));
        assert_eq!(key.to_string(), "2026-01");
        assert_eq!(PeriodKey::parse("2026-01"), Ok(key));
        assert!(PeriodKey::parse("2026-13").is_err());
        assert!(PeriodKey::parse("26-01").is_err());
        assert!(PeriodKey::parse("sentBudgetAlerts").is_err());
    }

    #[test]
    fn period_keys_sort_chronologically() {
        let dec = PeriodKey::parse("2025-12").unwrap();
        let jan = PeriodKey::parse("2026-01").unwrap();
        assert!(dec < jan);
        assert!(dec.to_string() < jan.to_string());
        assert_eq!(jan.months_before(1), dec);
        assert_eq!(jan.months_before(13).to_string(), "2024-12");
    }

    #[test]
    fn period_key_serializes_as_plain_string() {
        let key = PeriodKey::parse("2026-02").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2026-02\"");
        let bad: Result<PeriodKey, _> = serde_json::from_str("\"2026-2\"");
        assert!(bad.is_err());
    }
}
