use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};

const FULL_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// "May" is both; it is only listed above.
const SHORT_MONTH_NAMES: [(&str, u32); 12] = [
    ("Jan", 1),
    ("Feb", 2),
    ("Mar", 3),
    ("Apr", 4),
    ("Jun", 6),
    ("Jul", 7),
    ("Aug", 8),
    ("Sep", 9),
    ("Sept", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

/// A month as handed in by the caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthInput {
    Number(i64),
    Name(String),
}

impl MonthInput {
    /// Classifies command line text: anything that parses as an integer is a
    /// month number, everything else a month name.
    pub fn from_arg(arg: &str) -> Self {
        match arg.trim().parse::<i64>() {
            Ok(num) => MonthInput::Number(num),
            Err(_) => MonthInput::Name(arg.to_owned()),
        }
    }
}

impl From<i64> for MonthInput {
    fn from(num: i64) -> Self {
        MonthInput::Number(num)
    }
}

impl From<&str> for MonthInput {
    fn from(name: &str) -> Self {
        MonthInput::Name(name.to_owned())
    }
}

impl From<String> for MonthInput {
    fn from(name: String) -> Self {
        MonthInput::Name(name)
    }
}

impl TryFrom<&toml::Value> for MonthInput {
    type Error = Error;

    fn try_from(value: &toml::Value) -> Result<Self> {
        match value {
            toml::Value::Integer(num) => Ok(MonthInput::Number(*num)),
            toml::Value::String(name) => Ok(MonthInput::Name(name.clone())),
            other => Err(Error::new(
                ErrorKind::InvalidMonthType,
                &format!(
                    "month has to be given as a string or an integer, not {}",
                    other.type_str()
                ),
            )),
        }
    }
}

/// A year as handed in by the caller, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearInput(pub i64);

impl From<i64> for YearInput {
    fn from(year: i64) -> Self {
        YearInput(year)
    }
}

impl FromStr for YearInput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim().parse::<i64>().map(YearInput).map_err(|_| {
            Error::new(
                ErrorKind::InvalidYearType,
                &format!("year has to be given as an integer, not '{}'", s),
            )
        })
    }
}

impl TryFrom<&toml::Value> for YearInput {
    type Error = Error;

    fn try_from(value: &toml::Value) -> Result<Self> {
        match value {
            toml::Value::Integer(year) => Ok(YearInput(*year)),
            other => Err(Error::new(
                ErrorKind::InvalidYearType,
                &format!("year has to be given as an integer, not {}", other.type_str()),
            )),
        }
    }
}

/// Everything the grid needs to know about a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFacts {
    pub day_count: u32,
    /// Weekday of the 1st, counted from Monday = 0.
    pub first_weekday: u32,
}

/// A validated month of a normalized, four digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpec {
    month: Month,
    year: i32,
    facts: CalendarFacts,
}

impl MonthSpec {
    pub fn new(month: Month, year: i32) -> Result<Self> {
        let out_of_range = || {
            Error::new(
                ErrorKind::InvalidYearRange,
                &format!("year {} is outside of the supported calendar", year),
            )
        };

        let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
            .ok_or_else(out_of_range)?;
        let day_count = days_of_month(&month, year).ok_or_else(out_of_range)?;

        Ok(MonthSpec {
            month,
            year,
            facts: CalendarFacts {
                day_count,
                first_weekday: first.weekday().num_days_from_monday(),
            },
        })
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn number(&self) -> u32 {
        self.month.number_from_month()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn name(&self) -> &'static str {
        self.month.name()
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }

    pub fn facts(&self) -> CalendarFacts {
        self.facts
    }
}

impl fmt::Display for MonthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

pub fn days_of_month(month: &Month, year: i32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)?;
    let next = if month.number_from_month() == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month.number_from_month() + 1, 1)?
    };

    Some(next.signed_duration_since(first).num_days() as u32)
}

pub fn resolve(month: &MonthInput, year: YearInput) -> Result<MonthSpec> {
    let month = resolve_month(month)?;
    let year = resolve_year(year)?;
    let spec = MonthSpec::new(month, year)?;

    log::debug!("resolved {} as {:?}", spec, spec.facts());

    Ok(spec)
}

pub fn resolve_month(month: &MonthInput) -> Result<Month> {
    match month {
        MonthInput::Name(name) => month_from_name(name).ok_or_else(|| {
            let short: Vec<&str> = SHORT_MONTH_NAMES.iter().map(|(name, _)| *name).collect();
            Error::new(
                ErrorKind::InvalidMonthName,
                &format!(
                    "month has to be one of {} or {}, not '{}'",
                    FULL_MONTH_NAMES.join(", "),
                    short.join(", "),
                    name
                ),
            )
        }),
        MonthInput::Number(num) => u32::try_from(*num)
            .ok()
            .filter(|num| (1..=12).contains(num))
            .and_then(Month::from_u32)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidMonthRange,
                    &format!("month number has to be in [1, 12], not {}", num),
                )
            }),
    }
}

fn month_from_name(name: &str) -> Option<Month> {
    let number = FULL_MONTH_NAMES
        .iter()
        .position(|full| *full == name)
        .map(|idx| idx as u32 + 1)
        .or_else(|| {
            SHORT_MONTH_NAMES
                .iter()
                .find(|(short, _)| *short == name)
                .map(|(_, num)| *num)
        })?;

    Month::from_u32(number)
}

/// Two digit years belong to this century, everything from 1000 on is
/// taken literally.
pub fn resolve_year(year: YearInput) -> Result<i32> {
    let YearInput(year) = year;

    let normalized = match year {
        0..=99 => Some(2000 + year),
        y if y >= 1000 => Some(y),
        _ => None,
    };

    normalized
        .and_then(|year| i32::try_from(year).ok())
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidYearRange,
                &format!(
                    "year has to be in [0, 99] or greater than or equal to 1000, not {}",
                    year
                ),
            )
        })
}
