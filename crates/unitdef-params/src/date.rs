//! Start date (`sd`).
//!
//! ```text
//! sd=[N,]{en|ud|[[yyyy/]mm/]{[+|*|@]dd|[+|*|@]b[-DD]|[+]{su|mo|tu|we|th|fr|sa}[:{n|b}]}}
//! ```

use std::fmt;

use unitdef_tree::Parameter;

use crate::values::{RuleNumber, Values};
use crate::{DecodeError, Decoder};

const SYNTAX: &str = "[N,]{en|ud|[[yyyy/]mm/]days}";

/// Decoded `sd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartDate {
    pub rule: RuleNumber,
    pub designation: DateDesignation,
}

/// What a start date rule designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateDesignation {
    /// `en`: the day the jobnet was registered for execution.
    EntryDate,
    /// `ud`: not defined yet.
    Undefined,
    /// An explicit date rule.
    Date(ScheduleDate),
}

/// `[[yyyy/]mm/]days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleDate {
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub day: DaySpec,
}

/// The day part of a start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySpec {
    /// A day counted within the month.
    MonthDay {
        counting: CountingMethod,
        day: MonthDay,
    },
    /// A day of the week.
    Weekday {
        /// Counted from the start of the schedule (`+`).
        relative: bool,
        day: DayOfWeek,
        week: WeekOfMonth,
    },
}

/// How month days are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountingMethod {
    /// No prefix: calendar days.
    Absolute,
    /// `+`: days relative to the schedule's start.
    Relative,
    /// `*`: business days only.
    BusinessDay,
    /// `@`: non-business days only.
    NonBusinessDay,
}

impl CountingMethod {
    /// The prefix character, `None` for absolute counting.
    pub fn prefix(self) -> Option<char> {
        match self {
            CountingMethod::Absolute => None,
            CountingMethod::Relative => Some('+'),
            CountingMethod::BusinessDay => Some('*'),
            CountingMethod::NonBusinessDay => Some('@'),
        }
    }
}

/// A day within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthDay {
    /// `dd`
    Nth(u8),
    /// `b`
    LastDay,
    /// `b-DD`: `DD` days before the last day.
    BeforeLastDay(u8),
}

/// `su` through `sa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Two-letter code.
    pub fn code(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "su",
            DayOfWeek::Monday => "mo",
            DayOfWeek::Tuesday => "tu",
            DayOfWeek::Wednesday => "we",
            DayOfWeek::Thursday => "th",
            DayOfWeek::Friday => "fr",
            DayOfWeek::Saturday => "sa",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.code() == code)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which occurrence of a weekday within the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekOfMonth {
    /// No `:` suffix.
    Unspecified,
    /// `:n` with `n` in 0..=9.
    Nth(u8),
    /// `:b`, the last occurrence.
    Last,
}

/// Decoder for `sd`.
pub struct Sd;

impl Decoder for Sd {
    const NAME: &'static str = "sd";
    type Output = StartDate;

    fn decode_values(parameter: &Parameter) -> Result<StartDate, DecodeError> {
        let values = Values::new(parameter);
        let (rule, text) = values.rule_numbered()?;
        let designation = match text {
            "en" => DateDesignation::EntryDate,
            "ud" => DateDesignation::Undefined,
            _ => DateDesignation::Date(schedule_date(&values, text)?),
        };
        Ok(StartDate { rule, designation })
    }
}

fn schedule_date(values: &Values<'_>, text: &str) -> Result<ScheduleDate, DecodeError> {
    let parts: Vec<&str> = text.split('/').collect();
    let (year, month, days) = match parts.as_slice() {
        [days] => (None, None, *days),
        [mm, days] => (None, Some(*mm), *days),
        [yyyy, mm, days] => (Some(*yyyy), Some(*mm), *days),
        _ => return Err(values.pattern(SYNTAX, text)),
    };
    let year = year
        .map(|yyyy| values.number(yyyy, 1..=9999).map(|y| y as u16))
        .transpose()?;
    let month = month
        .map(|mm| values.number(mm, 1..=12).map(|m| m as u8))
        .transpose()?;
    Ok(ScheduleDate {
        year,
        month,
        day: day_spec(values, days)?,
    })
}

fn day_spec(values: &Values<'_>, text: &str) -> Result<DaySpec, DecodeError> {
    let (counting, body) = match text.chars().next() {
        Some('+') => (CountingMethod::Relative, &text[1..]),
        Some('*') => (CountingMethod::BusinessDay, &text[1..]),
        Some('@') => (CountingMethod::NonBusinessDay, &text[1..]),
        _ => (CountingMethod::Absolute, text),
    };

    let weekday = body.get(..2).and_then(DayOfWeek::from_code);
    if let Some(day) = weekday
        && matches!(counting, CountingMethod::Absolute | CountingMethod::Relative)
    {
        let week = match &body[2..] {
            "" => WeekOfMonth::Unspecified,
            ":b" => WeekOfMonth::Last,
            suffix => match suffix.strip_prefix(':') {
                Some(n) if n.len() == 1 => WeekOfMonth::Nth(values.number(n, 0..=9)? as u8),
                _ => return Err(values.pattern(SYNTAX, text)),
            },
        };
        return Ok(DaySpec::Weekday {
            relative: counting == CountingMethod::Relative,
            day,
            week,
        });
    }

    let day = match body {
        "b" => MonthDay::LastDay,
        _ => match body.strip_prefix("b-") {
            Some(dd) => MonthDay::BeforeLastDay(values.number(dd, 1..=31)? as u8),
            None => MonthDay::Nth(values.number(body, 1..=31)? as u8),
        },
    };
    Ok(DaySpec::MonthDay { counting, day })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeErrorKind;

    fn sd(source: &str) -> Result<StartDate, DecodeError> {
        let unit = unitdef_tree::parse_one(&format!("unit=A;{{sd={source};}}")).unwrap();
        Sd::decode(unit.parameter("sd").unwrap())
    }

    fn date(source: &str) -> ScheduleDate {
        match sd(source).unwrap().designation {
            DateDesignation::Date(date) => date,
            other => panic!("expected a date, got {other:?}"),
        }
    }

    #[test]
    fn test_month_and_day() {
        let start = sd("1,10/05").unwrap();
        assert_eq!(start.rule.get(), 1);
        assert_eq!(
            start.designation,
            DateDesignation::Date(ScheduleDate {
                year: None,
                month: Some(10),
                day: DaySpec::MonthDay {
                    counting: CountingMethod::Absolute,
                    day: MonthDay::Nth(5),
                },
            })
        );
    }

    #[test]
    fn test_relative_weekday() {
        let date = date("+mo:2");
        assert_eq!(date.month, None);
        assert_eq!(
            date.day,
            DaySpec::Weekday {
                relative: true,
                day: DayOfWeek::Monday,
                week: WeekOfMonth::Nth(2),
            }
        );
    }

    #[test]
    fn test_weekday_suffixes() {
        assert_eq!(
            date("fr").day,
            DaySpec::Weekday {
                relative: false,
                day: DayOfWeek::Friday,
                week: WeekOfMonth::Unspecified,
            }
        );
        assert_eq!(
            date("2024/02/sa:b").day,
            DaySpec::Weekday {
                relative: false,
                day: DayOfWeek::Saturday,
                week: WeekOfMonth::Last,
            }
        );
        assert!(matches!(
            sd("su:x").unwrap_err().kind,
            DecodeErrorKind::Numeral(_)
        ));
        assert!(matches!(
            sd("su:12").unwrap_err().kind,
            DecodeErrorKind::Pattern { .. }
        ));
        assert!(matches!(
            sd("sux").unwrap_err().kind,
            DecodeErrorKind::Pattern { .. }
        ));
    }

    #[test]
    fn test_designations() {
        assert_eq!(sd("en").unwrap().designation, DateDesignation::EntryDate);
        let start = sd("4,ud").unwrap();
        assert_eq!(start.rule.get(), 4);
        assert_eq!(start.designation, DateDesignation::Undefined);
    }

    #[test]
    fn test_month_end_and_counting() {
        let full = date("2025/12/*b-3");
        assert_eq!(full.year, Some(2025));
        assert_eq!(full.month, Some(12));
        assert_eq!(
            full.day,
            DaySpec::MonthDay {
                counting: CountingMethod::BusinessDay,
                day: MonthDay::BeforeLastDay(3),
            }
        );
        assert_eq!(
            date("@b").day,
            DaySpec::MonthDay {
                counting: CountingMethod::NonBusinessDay,
                day: MonthDay::LastDay,
            }
        );
        assert_eq!(
            date("+15").day,
            DaySpec::MonthDay {
                counting: CountingMethod::Relative,
                day: MonthDay::Nth(15),
            }
        );
    }

    #[test]
    fn test_weekday_needs_plain_or_relative_counting() {
        assert!(matches!(
            sd("*mo").unwrap_err().kind,
            DecodeErrorKind::Numeral(_)
        ));
    }

    #[test]
    fn test_invalid_dates() {
        assert!(matches!(
            sd("13/01").unwrap_err().kind,
            DecodeErrorKind::OutOfRange { value: 13, .. }
        ));
        assert!(matches!(
            sd("1/2/3/4").unwrap_err().kind,
            DecodeErrorKind::Pattern { .. }
        ));
        assert!(matches!(
            sd("xx").unwrap_err().kind,
            DecodeErrorKind::Numeral(_)
        ));
        assert!(matches!(
            sd("0").unwrap_err().kind,
            DecodeErrorKind::OutOfRange { value: 0, .. }
        ));
    }

    #[test]
    fn test_decoding_is_repeatable() {
        let unit = unitdef_tree::parse_one("unit=A;{sd=3,2024/01/+we:4;}").unwrap();
        let parameter = unit.parameter("sd").unwrap();
        assert_eq!(Sd::decode(parameter), Sd::decode(parameter));
    }
}
