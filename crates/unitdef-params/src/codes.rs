//! Parameters whose single value is a short code or a yes/no flag.

use std::fmt;

use unitdef_tree::{Parameter, Unit};

use crate::values::Values;
use crate::{DecodeError, Decoder};

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)*
        }

        impl $name {
            /// The code as written in a unit definition.
            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)*
                }
            }

            /// Look up a value by its code.
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

code_enum! {
    /// Whose account a job runs under (`eu`).
    pub enum ExecutionUserType {
        /// The user who registered the jobnet.
        EntryUser => "ent",
        /// The JP1 user who owns the definition.
        DefinitionUser => "def",
    }
}

code_enum! {
    /// How a job's result is judged (`jd`).
    pub enum ResultJudgmentType {
        /// By exit code thresholds.
        DependsOnExitCode => "cod",
        /// Always normal.
        AlwaysNormal => "nml",
        /// Always abnormal.
        AlwaysAbnormal => "abn",
    }
}

code_enum! {
    /// Hold attribute (`ha`).
    pub enum HoldType {
        /// Hold.
        Hold => "y",
        /// Hold if the previous generation ended with a warning.
        HoldIfWarning => "w",
        /// Hold if the previous generation ended abnormally.
        HoldIfAbnormal => "a",
        /// Do not hold.
        NoHold => "n",
    }
}

code_enum! {
    /// How a job's standard output or error file is opened (`soa`, `sea`).
    pub enum WriteOption {
        /// Truncate.
        New => "new",
        /// Append.
        Add => "add",
    }
}

code_enum! {
    /// What happens to a transfer file after the job ends (`top1`..`top4`).
    pub enum DeleteOption {
        /// Keep the file.
        Save => "sav",
        /// Delete the file.
        Delete => "del",
    }
}

code_enum! {
    /// What a judgment job compares (`ej`).
    pub enum JudgmentCondition {
        /// Exit code greater than `ejc`.
        ExitCodeGreater => "gt",
        /// Exit code greater than or equal to `ejc`.
        ExitCodeGreaterOrEqual => "ge",
        /// Exit code less than `ejc`.
        ExitCodeLess => "lt",
        /// Exit code less than or equal to `ejc`.
        ExitCodeLessOrEqual => "le",
        /// Exit code equal to `ejc`.
        ExitCodeEqual => "eq",
        /// Exit code not equal to `ejc`.
        ExitCodeNotEqual => "ne",
        /// The file named by `ejf` exists.
        FileExists => "ef",
        /// The file named by `ejf` does not exist.
        FileMissing => "nf",
    }
}

code_enum! {
    /// Whether an ordered jobnet connector waits for its jobnet (`ncs`).
    pub enum ConnectorSync {
        /// Wait.
        Synchronous => "y",
        /// Do not wait.
        Asynchronous => "n",
    }
}

impl Default for ResultJudgmentType {
    fn default() -> Self {
        ResultJudgmentType::DependsOnExitCode
    }
}

impl ResultJudgmentType {
    /// Judgment type of a unit; units without `jd` judge by exit code.
    pub fn of(unit: &Unit) -> Result<Self, DecodeError> {
        Ok(crate::decode_first::<Jd>(unit)?.unwrap_or_default())
    }
}

impl JudgmentCondition {
    /// Condition of a judgment job; units without `ej` compare with `gt`.
    pub fn of(unit: &Unit) -> Result<Self, DecodeError> {
        Ok(crate::decode_first::<Ej>(unit)?.unwrap_or(JudgmentCondition::ExitCodeGreater))
    }
}

impl ConnectorSync {
    /// Sync option of a jobnet connector.
    ///
    /// `None` unless `ncl` turns ordering on. An ordered connector without
    /// `ncs` is asynchronous.
    pub fn of(unit: &Unit) -> Result<Option<Self>, DecodeError> {
        if crate::decode_first::<Ncl>(unit)? != Some(true) {
            return Ok(None);
        }
        Ok(Some(
            crate::decode_first::<Ncs>(unit)?.unwrap_or(ConnectorSync::Asynchronous),
        ))
    }
}

fn single_code<T>(
    parameter: &Parameter,
    from_code: impl FnOnce(&str) -> Option<T>,
) -> Result<T, DecodeError> {
    let values = Values::new(parameter);
    let code = values.single()?;
    from_code(code).ok_or_else(|| values.unknown_code(code))
}

macro_rules! code_decoders {
    ($($(#[$meta:meta])* $decoder:ident => $name:literal, $output:ty;)*) => {
        $(
            $(#[$meta])*
            pub struct $decoder;

            impl Decoder for $decoder {
                const NAME: &'static str = $name;
                type Output = $output;

                fn decode_values(parameter: &Parameter) -> Result<$output, DecodeError> {
                    single_code(parameter, <$output>::from_code)
                }
            }
        )*
    };
}

code_decoders! {
    /// Decoder for `eu`.
    Eu => "eu", ExecutionUserType;
    /// Decoder for `jd`.
    Jd => "jd", ResultJudgmentType;
    /// Decoder for `ha`.
    Ha => "ha", HoldType;
    /// Decoder for `soa` (standard output).
    Soa => "soa", WriteOption;
    /// Decoder for `sea` (standard error).
    Sea => "sea", WriteOption;
    /// Decoder for `top1`.
    Top1 => "top1", DeleteOption;
    /// Decoder for `top2`.
    Top2 => "top2", DeleteOption;
    /// Decoder for `top3`.
    Top3 => "top3", DeleteOption;
    /// Decoder for `top4`.
    Top4 => "top4", DeleteOption;
    /// Decoder for `ej`.
    Ej => "ej", JudgmentCondition;
}

/// Read a yes/no flag, accepting the usual spellings in any case.
fn flag(parameter: &Parameter) -> Result<bool, DecodeError> {
    let values = Values::new(parameter);
    let text = values.single()?;
    match text.to_ascii_lowercase().as_str() {
        "y" | "yes" | "on" | "t" | "true" | "1" => Ok(true),
        "n" | "no" | "off" | "f" | "false" | "0" => Ok(false),
        _ => Err(values.unknown_code(text)),
    }
}

/// Decoder for `ncl`: whether a jobnet connector enforces ordering.
pub struct Ncl;

impl Decoder for Ncl {
    const NAME: &'static str = "ncl";
    type Output = bool;

    fn decode_values(parameter: &Parameter) -> Result<bool, DecodeError> {
        flag(parameter)
    }
}

/// Decoder for `ncs`, a flag where yes means [`ConnectorSync::Synchronous`].
pub struct Ncs;

impl Decoder for Ncs {
    const NAME: &'static str = "ncs";
    type Output = ConnectorSync;

    fn decode_values(parameter: &Parameter) -> Result<ConnectorSync, DecodeError> {
        Ok(if flag(parameter)? {
            ConnectorSync::Synchronous
        } else {
            ConnectorSync::Asynchronous
        })
    }
}

/// Decoder for `ncex`: whether ordering spans execution environments.
pub struct Ncex;

impl Decoder for Ncex {
    const NAME: &'static str = "ncex";
    type Output = bool;

    fn decode_values(parameter: &Parameter) -> Result<bool, DecodeError> {
        flag(parameter)
    }
}
