//! Environment variables passed to a job (`env`).
//!
//! The value is one text holding a definition per line:
//!
//! ```text
//! env="LANG=C
//! PATH=/usr/bin:/bin";
//! ```
//!
//! Each definition is `NAME=VALUE`, split at the first `=`. Blank lines are
//! skipped and a value wrapped in double quotes loses the quotes.

use unitdef_tree::Parameter;

use crate::values::Values;
use crate::{DecodeError, Decoder};

/// One `NAME=VALUE` definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

/// Decoder for `env`.
pub struct Env;

impl Decoder for Env {
    const NAME: &'static str = "env";
    type Output = Vec<EnvironmentVariable>;

    fn decode_values(parameter: &Parameter) -> Result<Self::Output, DecodeError> {
        let values = Values::new(parameter);
        values
            .single()?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| definition(line).ok_or_else(|| values.pattern("NAME=VALUE", line)))
            .collect()
    }
}

fn definition(line: &str) -> Option<EnvironmentVariable> {
    let (name, value) = line.split_once('=')?;
    let name = name.trim_start();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    Some(EnvironmentVariable {
        name: name.to_string(),
        value: value.to_string(),
    })
}
