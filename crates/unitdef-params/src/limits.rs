//! Numeric limits: durations (`fd`, `etm`) and exit code thresholds (`tho`, `wth`).

use unitdef_tree::Parameter;

use crate::values::Values;
use crate::{DecodeError, Decoder};

/// A duration in whole minutes, 1 to 1440.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Minutes(u16);

impl Minutes {
    pub const MAX: u16 = 1440;

    pub fn new(minutes: u16) -> Option<Self> {
        (1..=Self::MAX).contains(&minutes).then_some(Self(minutes))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

/// Estimated run time of a job (`fd`).
pub type FixedDuration = Minutes;

/// Time after which a running job is killed (`etm`).
pub type ExecutionTimeout = Minutes;

/// Exit code above which a job ends with a warning or abnormally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExitCodeThreshold(u32);

impl ExitCodeThreshold {
    pub const MAX: u32 = i32::MAX as u32;

    pub fn new(code: u32) -> Option<Self> {
        (code <= Self::MAX).then_some(Self(code))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Whether `exit_code` exceeds this threshold.
    pub fn is_exceeded_by(self, exit_code: u32) -> bool {
        exit_code > self.0
    }
}

fn minutes(parameter: &Parameter) -> Result<Minutes, DecodeError> {
    let values = Values::new(parameter);
    let minutes = values.number(values.single()?, 1..=u32::from(Minutes::MAX))?;
    Ok(Minutes(minutes as u16))
}

fn threshold(parameter: &Parameter) -> Result<ExitCodeThreshold, DecodeError> {
    let values = Values::new(parameter);
    let code = values.number(values.single()?, 0..=ExitCodeThreshold::MAX)?;
    Ok(ExitCodeThreshold(code))
}

/// Decoder for `fd`.
pub struct Fd;

impl Decoder for Fd {
    const NAME: &'static str = "fd";
    type Output = FixedDuration;

    fn decode_values(parameter: &Parameter) -> Result<Minutes, DecodeError> {
        minutes(parameter)
    }
}

/// Decoder for `etm`.
pub struct Etm;

impl Decoder for Etm {
    const NAME: &'static str = "etm";
    type Output = ExecutionTimeout;

    fn decode_values(parameter: &Parameter) -> Result<Minutes, DecodeError> {
        minutes(parameter)
    }
}

/// Decoder for `tho`, the abnormal-end threshold.
pub struct Tho;

impl Decoder for Tho {
    const NAME: &'static str = "tho";
    type Output = ExitCodeThreshold;

    fn decode_values(parameter: &Parameter) -> Result<ExitCodeThreshold, DecodeError> {
        threshold(parameter)
    }
}

/// Decoder for `wth`, the warning threshold.
pub struct Wth;

impl Decoder for Wth {
    const NAME: &'static str = "wth";
    type Output = ExitCodeThreshold;

    fn decode_values(parameter: &Parameter) -> Result<ExitCodeThreshold, DecodeError> {
        threshold(parameter)
    }
}
