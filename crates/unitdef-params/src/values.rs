//! Shared helpers for reading raw parameter values.

use std::ops::RangeInclusive;

use unitdef_tree::{Parameter, Tuple, ValueKind};

use crate::error::{DecodeError, DecodeErrorKind};

/// Rule number of a rule-numbered schedule parameter (`sd`, `st`, `sy`, `ey`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleNumber(u8);

impl RuleNumber {
    /// Rule number used when a parameter carries none.
    pub const DEFAULT: RuleNumber = RuleNumber(1);
    /// Largest rule number a unit may define.
    pub const MAX: u8 = 144;

    /// Create a rule number, if it is in `1..=144`.
    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&number).then_some(Self(number))
    }

    /// The numeric value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for RuleNumber {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Read access to a parameter's values that reports failures against it.
pub(crate) struct Values<'a> {
    parameter: &'a Parameter,
}

impl<'a> Values<'a> {
    pub(crate) fn new(parameter: &'a Parameter) -> Self {
        Self { parameter }
    }

    pub(crate) fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(self.parameter.name(), kind)
    }

    pub(crate) fn len(&self) -> usize {
        self.parameter.values().len()
    }

    /// Fail unless the parameter has exactly `count` values.
    pub(crate) fn exactly(&self, count: usize, expected: &'static str) -> Result<(), DecodeError> {
        if self.len() == count {
            Ok(())
        } else {
            Err(self.error(DecodeErrorKind::Arity {
                expected,
                found: self.len(),
            }))
        }
    }

    /// Text of a token or quoted value.
    pub(crate) fn text(&self, index: usize) -> Result<&'a str, DecodeError> {
        let value = self.parameter.value(index).ok_or_else(|| {
            self.error(DecodeErrorKind::Arity {
                expected: "more values",
                found: self.len(),
            })
        })?;
        value.as_text().ok_or_else(|| {
            self.error(DecodeErrorKind::WrongShape {
                index,
                expected: ValueKind::Token,
                found: value.kind(),
            })
        })
    }

    /// The single value of a one-value parameter, as text.
    pub(crate) fn single(&self) -> Result<&'a str, DecodeError> {
        self.exactly(1, "one value")?;
        self.text(0)
    }

    pub(crate) fn tuple(&self, index: usize) -> Result<&'a Tuple, DecodeError> {
        let value = self.parameter.value(index).ok_or_else(|| {
            self.error(DecodeErrorKind::Arity {
                expected: "more values",
                found: self.len(),
            })
        })?;
        value.as_tuple().ok_or_else(|| {
            self.error(DecodeErrorKind::WrongShape {
                index,
                expected: ValueKind::Tuple,
                found: value.kind(),
            })
        })
    }

    /// Split `[N,]value` into its rule number and the value text.
    ///
    /// The value is always the last one, so `N,value` and `value` decode the
    /// same way apart from the rule number.
    pub(crate) fn rule_numbered(&self) -> Result<(RuleNumber, &'a str), DecodeError> {
        match self.len() {
            1 => Ok((RuleNumber::DEFAULT, self.text(0)?)),
            2 => {
                let number = self.number(self.text(0)?, 1..=u32::from(RuleNumber::MAX))?;
                Ok((RuleNumber(number as u8), self.text(1)?))
            }
            found => Err(self.error(DecodeErrorKind::Arity {
                expected: "one value, or a rule number and a value",
                found,
            })),
        }
    }

    /// Parse an unsigned base-10 numeral and check it against `range`.
    pub(crate) fn number(&self, text: &str, range: RangeInclusive<u32>) -> Result<u32, DecodeError> {
        let value = numeral(text).ok_or_else(|| self.error(DecodeErrorKind::Numeral(text.to_string())))?;
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(self.error(DecodeErrorKind::OutOfRange {
                value: u64::from(value),
                min: u64::from(*range.start()),
                max: u64::from(*range.end()),
            }))
        }
    }

    pub(crate) fn pattern(&self, expected: &'static str, found: &str) -> DecodeError {
        self.error(DecodeErrorKind::Pattern {
            expected,
            found: found.to_string(),
        })
    }

    pub(crate) fn unknown_code(&self, code: &str) -> DecodeError {
        self.error(DecodeErrorKind::UnknownCode(code.to_string()))
    }
}

/// Parse a non-empty run of ASCII digits. Signs and whitespace are rejected.
pub(crate) fn numeral(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
