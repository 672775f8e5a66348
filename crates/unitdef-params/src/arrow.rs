//! Relations between sibling units (`ar`).

use std::fmt;

use unitdef_tree::{Parameter, Tuple, TupleEntry};

use crate::values::Values;
use crate::{DecodeError, Decoder};

const SYNTAX: &str = "(f=<from>,t=<to>[,{seq|con}])";

/// How the target of an arrow depends on its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    /// Run after the source ends normally.
    #[default]
    Sequential,
    /// Run depending on a judgment job's result.
    Conditional,
}

impl ConnectionType {
    pub fn code(self) -> &'static str {
        match self {
            ConnectionType::Sequential => "seq",
            ConnectionType::Conditional => "con",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "seq" => Some(ConnectionType::Sequential),
            "con" => Some(ConnectionType::Conditional),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Decoded `ar=(f=A,t=B[,con])`: an edge from sub-unit `A` to sub-unit `B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arrow {
    pub from: String,
    pub to: String,
    pub connection: ConnectionType,
}

/// Decoder for `ar`.
pub struct Ar;

impl Decoder for Ar {
    const NAME: &'static str = "ar";
    type Output = Arrow;

    fn decode_values(parameter: &Parameter) -> Result<Arrow, DecodeError> {
        let values = Values::new(parameter);
        values.exactly(1, "one tuple")?;
        let tuple = values.tuple(0)?;

        let (Some(from), Some(to)) = (tuple.get("f"), tuple.get("t")) else {
            return Err(values.pattern(SYNTAX, &render(tuple)));
        };
        let connection = match tuple.len() {
            2 => ConnectionType::default(),
            3 => {
                let code = tuple.at(2).map_or("", TupleEntry::value);
                ConnectionType::from_code(code).ok_or_else(|| values.unknown_code(code))?
            }
            _ => return Err(values.pattern(SYNTAX, &render(tuple))),
        };

        Ok(Arrow {
            from: from.to_string(),
            to: to.to_string(),
            connection,
        })
    }
}

fn render(tuple: &Tuple) -> String {
    let entries: Vec<String> = tuple
        .iter()
        .map(|entry| match entry.key() {
            Some(key) => format!("{key}={}", entry.value()),
            None => entry.value().to_string(),
        })
        .collect();
    format!("({})", entries.join(","))
}
