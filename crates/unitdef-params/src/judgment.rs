//! Operands of a judgment job: `ejc`, `eji`, `ejv`, `ejt` and `ejf`.
//!
//! Which of them matter depends on the condition in `ej`, see
//! [`JudgmentCondition`](crate::JudgmentCondition).

use unitdef_tree::Parameter;

use crate::values::Values;
use crate::{DecodeError, Decoder};

/// Largest variable value `eji` can compare against.
pub const MAX_JUDGMENT_INTEGER: u32 = i32::MAX as u32;

/// Decoder for `ejc`: exit code compared by the exit code conditions.
pub struct Ejc;

impl Decoder for Ejc {
    const NAME: &'static str = "ejc";
    type Output = u32;

    fn decode_values(parameter: &Parameter) -> Result<u32, DecodeError> {
        let values = Values::new(parameter);
        values.number(values.single()?, 0..=u32::MAX)
    }
}

/// Decoder for `eji`: number compared with a variable's value.
pub struct Eji;

impl Decoder for Eji {
    const NAME: &'static str = "eji";
    type Output = u32;

    fn decode_values(parameter: &Parameter) -> Result<u32, DecodeError> {
        let values = Values::new(parameter);
        values.number(values.single()?, 0..=MAX_JUDGMENT_INTEGER)
    }
}

macro_rules! text_decoders {
    ($($(#[$meta:meta])* $decoder:ident => $name:literal;)*) => {
        $(
            $(#[$meta])*
            pub struct $decoder;

            impl Decoder for $decoder {
                const NAME: &'static str = $name;
                type Output = String;

                fn decode_values(parameter: &Parameter) -> Result<String, DecodeError> {
                    Values::new(parameter).single().map(str::to_string)
                }
            }
        )*
    };
}

text_decoders! {
    /// Decoder for `ejv`: name of the variable a judgment job reads.
    Ejv => "ejv";
    /// Decoder for `ejt`: text compared with a variable's value.
    Ejt => "ejt";
    /// Decoder for `ejf`: file whose existence is checked.
    Ejf => "ejf";
}
