use chrono::Weekday;
use derive_more::Display;
use serde_with::DeserializeFromStr;
use std::str::FromStr;

use crate::calendar::CalendarFacts;
use crate::error::{Error, ErrorKind, Result};

pub const DAY_LABELS: [&str; 7] = ["Mon.", "Tue.", "Wed.", "Thu.", "Fri.", "Sat.", "Sun."];

/// The weekday a grid row starts with.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub enum FirstDay {
    #[display(fmt = "Monday")]
    Monday,
    #[display(fmt = "Sunday")]
    Sunday,
    #[display(fmt = "Saturday")]
    Saturday,
    #[display(fmt = "Friday")]
    Friday,
}

impl FirstDay {
    pub fn weekday(self) -> Weekday {
        match self {
            FirstDay::Monday => Weekday::Mon,
            FirstDay::Sunday => Weekday::Sun,
            FirstDay::Saturday => Weekday::Sat,
            FirstDay::Friday => Weekday::Fri,
        }
    }

    /// Distance from Monday in days.
    pub fn index(self) -> u32 {
        self.weekday().num_days_from_monday()
    }
}

impl Default for FirstDay {
    fn default() -> Self {
        FirstDay::Monday
    }
}

impl FromStr for FirstDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Monday" | "Mon" | "Mon." => Ok(FirstDay::Monday),
            "Sunday" | "Sun" | "Sun." => Ok(FirstDay::Sunday),
            "Saturday" | "Sat" | "Sat." => Ok(FirstDay::Saturday),
            "Friday" | "Fri" | "Fri." => Ok(FirstDay::Friday),
            _ => Err(Error::new(
                ErrorKind::UnsupportedFirstDay,
                &format!(
                    "first day has to be one of Monday, Sunday, Saturday or Friday \
                     (also as Mon, Mon. etc.), not '{}'",
                    s
                ),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekAlignment {
    pub leading_offset: u32,
    pub day_labels: [&'static str; 7],
}

pub fn align(facts: &CalendarFacts, first_day: FirstDay) -> WeekAlignment {
    let shift = first_day.index();

    let mut day_labels = DAY_LABELS;
    day_labels.rotate_left(shift as usize);

    WeekAlignment {
        leading_offset: (facts.first_weekday + 7 - shift) % 7,
        day_labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{resolve, MonthInput, YearInput};

    fn facts(first_weekday: u32) -> CalendarFacts {
        CalendarFacts {
            day_count: 30,
            first_weekday,
        }
    }

    #[test]
    fn spellings() {
        for s in ["Monday", "Mon", "Mon."].iter() {
            assert_eq!(s.parse::<FirstDay>().unwrap(), FirstDay::Monday);
        }
        for s in ["Sunday", "Sun", "Sun."].iter() {
            assert_eq!(s.parse::<FirstDay>().unwrap(), FirstDay::Sunday);
        }
        assert_eq!("Sat.".parse::<FirstDay>().unwrap(), FirstDay::Saturday);
        assert_eq!("Fri".parse::<FirstDay>().unwrap(), FirstDay::Friday);
    }

    #[test]
    fn unsupported_first_day() {
        for s in ["Tuesday", "monday", "Thu.", ""].iter() {
            let err = s.parse::<FirstDay>().unwrap_err();
            assert!(matches!(err.kind, ErrorKind::UnsupportedFirstDay));
        }
    }

    #[test]
    fn monday_first() {
        let alignment = align(&facts(4), FirstDay::Monday);
        assert_eq!(alignment.leading_offset, 4);
        assert_eq!(alignment.day_labels, DAY_LABELS);
    }

    #[test]
    fn sunday_first() {
        let alignment = align(&facts(4), FirstDay::Sunday);
        assert_eq!(alignment.leading_offset, 5);
        assert_eq!(
            alignment.day_labels,
            ["Sun.", "Mon.", "Tue.", "Wed.", "Thu.", "Fri.", "Sat."]
        );

        // Sunday the 1st opens the first row
        assert_eq!(align(&facts(6), FirstDay::Sunday).leading_offset, 0);
    }

    #[test]
    fn saturday_and_friday_first() {
        assert_eq!(align(&facts(0), FirstDay::Saturday).leading_offset, 2);
        assert_eq!(align(&facts(0), FirstDay::Friday).leading_offset, 3);
        assert_eq!(align(&facts(4), FirstDay::Friday).leading_offset, 0);
        assert_eq!(align(&facts(0), FirstDay::Friday).day_labels[0], "Fri.");
    }

    #[test]
    fn offset_always_in_week() {
        for first_weekday in 0..7 {
            for first_day in [
                FirstDay::Monday,
                FirstDay::Sunday,
                FirstDay::Saturday,
                FirstDay::Friday,
            ]
            .iter()
            {
                let alignment = align(&facts(first_weekday), *first_day);
                assert!(alignment.leading_offset < 7);
                assert_eq!(
                    (alignment.leading_offset + first_day.index()) % 7,
                    first_weekday
                );
            }
        }
    }

    #[test]
    fn equivalent_requests() {
        let by_number = resolve(&MonthInput::Number(9), YearInput(23)).unwrap();
        let by_name = resolve(&MonthInput::from("September"), YearInput(2023)).unwrap();
        assert_eq!(by_number, by_name);
        assert_eq!(by_number.facts(), by_name.facts());

        let sunday = align(&by_number.facts(), "Sunday".parse().unwrap());
        let sun = align(&by_name.facts(), "Sun.".parse().unwrap());
        assert_eq!(sunday, sun);

        let monday = align(&by_number.facts(), FirstDay::Monday);
        assert_eq!((monday.leading_offset + 1) % 7, sunday.leading_offset);
    }
}
