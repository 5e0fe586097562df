//! Month grid construction.
//!
//! A month renders as consecutive weeks of exactly seven days. Weeks start
//! on Sunday: the first week is padded on the left until the month's first
//! day lands in its weekday column, and the last week is padded on the right
//! to a full seven cells. Padding cells carry no day number and no date —
//! only the weekday name of their column.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::WeekdayLocale;

/// Number of day cells in every week row.
pub const DAYS_PER_WEEK: usize = 7;

/// Validation errors returned by [`MonthKey::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthKeyValidationError {
    MonthOutOfRange { month: u32 },
    YearOutOfRange { year: i32 },
}

impl std::fmt::Display for MonthKeyValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MonthOutOfRange { month } => {
                write!(f, "month must be between 1 and 12, got {month}")
            }
            Self::YearOutOfRange { year } => {
                write!(f, "year must be between 1 and 9999, got {year}")
            }
        }
    }
}

impl std::error::Error for MonthKeyValidationError {}

/// The (month, year) pair under which one calendar document persists.
///
/// ## Invariants
/// - `month` is in `1..=12` and `year` in `1..=9999`.
///
/// # Examples
///
/// ```
/// use backend::domain::MonthKey;
///
/// let key = MonthKey::new(2, 2024).unwrap();
/// assert_eq!(key.days_in_month(), 29);
/// assert!(MonthKey::new(13, 2024).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MonthKeyDto", into = "MonthKeyDto")]
pub struct MonthKey {
    month: u32,
    year: i32,
}

impl MonthKey {
    /// Validate and construct a [`MonthKey`].
    pub fn new(month: u32, year: i32) -> Result<Self, MonthKeyValidationError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyValidationError::MonthOutOfRange { month });
        }
        if !(1..=9999).contains(&year) {
            return Err(MonthKeyValidationError::YearOutOfRange { year });
        }
        Ok(Self { month, year })
    }

    /// Month component, `1..=12`.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Year component, `1..=9999`.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| panic!("validated month key must map to a date: {self}"))
    }

    /// Number of days in the month, accounting for leap years.
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .map(|last| last.day())
            .unwrap_or_else(|| panic!("validated month key must map to a date: {self}"))
    }

    /// Weekday column of day 1 (0 = Sunday .. 6 = Saturday).
    pub fn first_weekday_column(&self) -> usize {
        self.first_day().weekday().num_days_from_sunday() as usize
    }

    /// Number of week rows the month grid spans.
    pub fn week_count(&self) -> usize {
        (self.first_weekday_column() + self.days_in_month() as usize).div_ceil(DAYS_PER_WEEK)
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct MonthKeyDto {
    month: u32,
    year: i32,
}

impl From<MonthKey> for MonthKeyDto {
    fn from(value: MonthKey) -> Self {
        Self {
            month: value.month,
            year: value.year,
        }
    }
}

impl TryFrom<MonthKeyDto> for MonthKey {
    type Error = MonthKeyValidationError;

    fn try_from(value: MonthKeyDto) -> Result<Self, Self::Error> {
        MonthKey::new(value.month, value.year)
    }
}

/// One cell of the month grid.
///
/// `day_number == None` marks a padding cell outside the month; padding
/// cells still carry the weekday name of their column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Day of month, `None` for padding cells.
    pub day_number: Option<u8>,
    /// Localised weekday name for this column.
    pub weekday_name: String,
    /// Full date, `None` for padding cells.
    pub iso_date: Option<NaiveDate>,
}

impl Day {
    /// Whether this cell lies outside the month.
    pub fn is_padding(&self) -> bool {
        self.day_number.is_none()
    }
}

/// One week row of exactly [`DAYS_PER_WEEK`] day cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    days: [Day; DAYS_PER_WEEK],
}

impl Week {
    pub(crate) fn new(days: [Day; DAYS_PER_WEEK]) -> Self {
        Self { days }
    }

    /// The seven day cells, Sunday first.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Cell at `day_index`, if in range.
    pub fn day(&self, day_index: usize) -> Option<&Day> {
        self.days.get(day_index)
    }
}

/// Build the week/day grid for a month.
///
/// The result always satisfies:
/// - `weeks.len() == key.week_count()`
/// - every week holds exactly seven cells
/// - the non-padding day numbers, scanned in order, are exactly
///   `1..=key.days_in_month()`
///
/// # Examples
///
/// ```
/// use backend::domain::{build_month_grid, MonthKey, WeekdayLocale};
///
/// let key = MonthKey::new(2, 2024).unwrap();
/// let weeks = build_month_grid(&key, WeekdayLocale::English);
/// assert_eq!(weeks.len(), 5);
/// assert_eq!(weeks[0].days()[4].weekday_name, "Thursday");
/// assert_eq!(weeks[0].days()[4].day_number, Some(1));
/// ```
pub fn build_month_grid(key: &MonthKey, locale: WeekdayLocale) -> Vec<Week> {
    let leading = key.first_weekday_column();
    let days_in_month = key.days_in_month() as usize;

    let make_day = |cell: usize| {
        let column = cell % DAYS_PER_WEEK;
        let day_number = cell
            .checked_sub(leading)
            .filter(|offset| *offset < days_in_month)
            .map(|offset| (offset + 1) as u8);
        let iso_date = day_number
            .and_then(|day| NaiveDate::from_ymd_opt(key.year(), key.month(), u32::from(day)));
        Day {
            day_number,
            weekday_name: locale.weekday_name(column).to_owned(),
            iso_date,
        }
    };

    (0..key.week_count())
        .map(|week_index| {
            Week::new(std::array::from_fn(|column| {
                make_day(week_index * DAYS_PER_WEEK + column)
            }))
        })
        .collect()
}

/// Whether a stored week list is the grid this key would produce, ignoring
/// weekday-name locale.
///
/// Used when revalidating persisted documents: the day-number layout must
/// match the key even if the document was written under another locale.
pub(crate) fn grid_matches_key(key: &MonthKey, weeks: &[Week]) -> bool {
    if weeks.len() != key.week_count() {
        return false;
    }
    let leading = key.first_weekday_column();
    let days_in_month = key.days_in_month() as usize;

    weeks
        .iter()
        .flat_map(Week::days)
        .enumerate()
        .all(|(cell, day)| {
            let expected = cell
                .checked_sub(leading)
                .filter(|offset| *offset < days_in_month)
                .map(|offset| (offset + 1) as u8);
            day.day_number == expected
        })
}
