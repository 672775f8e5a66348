//! Start time (`st`) and delay times (`sy`, `ey`).

use std::fmt;

use unitdef_tree::Parameter;

use crate::values::{RuleNumber, Values};
use crate::{DecodeError, Decoder};

/// A time of day or a duration, in hours and minutes.
///
/// Hours may exceed 23: schedules run past midnight up to the next day's
/// boundary, and relative delays are expressed the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time {
    hours: u32,
    minutes: u8,
}

impl Time {
    /// Create a time, if `minutes` is below 60.
    pub fn new(hours: u32, minutes: u8) -> Option<Self> {
        (minutes < 60).then_some(Self { hours, minutes })
    }

    /// Create a time from a total number of minutes.
    pub fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: (total % 60) as u8,
        }
    }

    pub fn hours(self) -> u32 {
        self.hours
    }

    pub fn minutes(self) -> u8 {
        self.minutes
    }

    /// The time as a total number of minutes.
    pub fn total_minutes(self) -> u32 {
        self.hours * 60 + u32::from(self.minutes)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Decoded `st=[N,][+]hh:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartTime {
    pub rule: RuleNumber,
    /// Whether the time is relative to the superior jobnet's start (`+`).
    pub relative: bool,
    pub time: Time,
}

/// How a delay time is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingMethod {
    /// `hh:mm`, a time of day.
    Absolute,
    /// `M<minutes>`, after the root jobnet's start.
    RelativeToRootStart,
    /// `U<minutes>`, after the superior jobnet's start.
    RelativeToSuperiorStart,
    /// `C<minutes>`, after the unit's own start.
    RelativeToOwnStart,
}

impl TimingMethod {
    /// Prefix character of a relative delay, `None` for [`TimingMethod::Absolute`].
    pub fn prefix(self) -> Option<char> {
        match self {
            TimingMethod::Absolute => None,
            TimingMethod::RelativeToRootStart => Some('M'),
            TimingMethod::RelativeToSuperiorStart => Some('U'),
            TimingMethod::RelativeToOwnStart => Some('C'),
        }
    }
}

/// Decoded `sy`/`ey` value: `[N,]hh:mm` or `[N,]{M|U|C}mmmm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelayTime {
    pub rule: RuleNumber,
    pub method: TimingMethod,
    /// Time of day for absolute delays, elapsed time otherwise.
    pub time: Time,
}

/// Start delay time of a jobnet (`sy`).
pub type StartDelayTime = DelayTime;

/// End delay time of a jobnet (`ey`).
pub type EndDelayTime = DelayTime;

/// Decoder for `st`.
pub struct St;

impl Decoder for St {
    const NAME: &'static str = "st";
    type Output = StartTime;

    fn decode_values(parameter: &Parameter) -> Result<StartTime, DecodeError> {
        let values = Values::new(parameter);
        let (rule, text) = values.rule_numbered()?;
        let (relative, clock) = match text.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let time = clock_time(&values, clock, "[N,][+]hh:mm")?;
        Ok(StartTime {
            rule,
            relative,
            time,
        })
    }
}

/// Decoder for `sy`.
pub struct Sy;

impl Decoder for Sy {
    const NAME: &'static str = "sy";
    type Output = StartDelayTime;

    fn decode_values(parameter: &Parameter) -> Result<DelayTime, DecodeError> {
        delay_time(parameter)
    }
}

/// Decoder for `ey`.
pub struct Ey;

impl Decoder for Ey {
    const NAME: &'static str = "ey";
    type Output = EndDelayTime;

    fn decode_values(parameter: &Parameter) -> Result<DelayTime, DecodeError> {
        delay_time(parameter)
    }
}

fn delay_time(parameter: &Parameter) -> Result<DelayTime, DecodeError> {
    const SYNTAX: &str = "[N,]hh:mm or [N,]{M|U|C}mmmm";

    let values = Values::new(parameter);
    let (rule, text) = values.rule_numbered()?;
    let method = match text.chars().next() {
        Some('M') => TimingMethod::RelativeToRootStart,
        Some('U') => TimingMethod::RelativeToSuperiorStart,
        Some('C') => TimingMethod::RelativeToOwnStart,
        _ => TimingMethod::Absolute,
    };
    let time = if method == TimingMethod::Absolute {
        clock_time(&values, text, SYNTAX)?
    } else {
        Time::from_minutes(values.number(&text[1..], 0..=u32::MAX)?)
    };
    Ok(DelayTime { rule, method, time })
}

/// Read `hh:mm`.
fn clock_time(values: &Values<'_>, text: &str, syntax: &'static str) -> Result<Time, DecodeError> {
    let (hh, mm) = text
        .split_once(':')
        .ok_or_else(|| values.pattern(syntax, text))?;
    let hours = values.number(hh, 0..=99)?;
    let minutes = values.number(mm, 0..=59)?;
    Ok(Time::from_minutes(hours * 60 + minutes))
}

#[cfg(test)]
mod tests {
    use unitdef_tree::ParameterBuilder;

    use super::*;
    use crate::DecodeErrorKind;

    fn param(name: &str, values: &[&str]) -> Parameter {
        values
            .iter()
            .fold(ParameterBuilder::new(name), |b, v| b.token(*v))
            .build()
            .unwrap()
    }

    #[test]
    fn test_relative_start_time_with_default_rule() {
        let st = St::decode(&param("st", &["+08:30"])).unwrap();
        assert_eq!(st.rule, RuleNumber::DEFAULT);
        assert!(st.relative);
        assert_eq!(st.time.hours(), 8);
        assert_eq!(st.time.minutes(), 30);
        assert_eq!(st.time.to_string(), "08:30");
    }

    #[test]
    fn test_start_time_with_rule_number() {
        let st = St::decode(&param("st", &["3", "25:05"])).unwrap();
        assert_eq!(st.rule.get(), 3);
        assert!(!st.relative);
        assert_eq!(st.time, Time::new(25, 5).unwrap());
    }

    #[test]
    fn test_start_time_errors() {
        let err = St::decode(&param("st", &["0830"])).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::Pattern { .. }));

        let err = St::decode(&param("st", &["08:60"])).unwrap_err();
        assert_eq!(
            err.kind,
            DecodeErrorKind::OutOfRange {
                value: 60,
                min: 0,
                max: 59
            }
        );

        let err = St::decode(&param("st", &["x", "08:00"])).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::Numeral("x".into()));

        let err = St::decode(&param("st", &["1", "2", "08:00"])).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::Arity { found: 3, .. }));
    }

    #[test]
    fn test_delay_times() {
        let sy = Sy::decode(&param("sy", &["10:15"])).unwrap();
        assert_eq!(sy.method, TimingMethod::Absolute);
        assert_eq!(sy.time, Time::new(10, 15).unwrap());

        let ey = Ey::decode(&param("ey", &["2", "U90"])).unwrap();
        assert_eq!(ey.rule.get(), 2);
        assert_eq!(ey.method, TimingMethod::RelativeToSuperiorStart);
        assert_eq!(ey.time.total_minutes(), 90);
        assert_eq!(ey.method.prefix(), Some('U'));

        let sy = Sy::decode(&param("sy", &["M5"])).unwrap();
        assert_eq!(sy.method, TimingMethod::RelativeToRootStart);
        let sy = Sy::decode(&param("sy", &["C0"])).unwrap();
        assert_eq!(sy.method, TimingMethod::RelativeToOwnStart);

        let err = Sy::decode(&param("sy", &["Mx"])).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::Numeral("x".into()));
    }

    #[test]
    fn test_decoder_checks_parameter_name() {
        let err = Sy::decode(&param("ey", &["M5"])).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::WrongParameter { expected: "sy" });
        assert_eq!(err.parameter, "ey");
    }
}
