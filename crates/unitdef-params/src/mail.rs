//! Mail recipients (`mladr`).

use std::fmt;

use unitdef_parse::unescape_quoted;
use unitdef_tree::Parameter;

use crate::values::Values;
use crate::{DecodeError, Decoder};

/// Recipient header of a mail address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    To,
    Cc,
    Bcc,
}

impl AddressKind {
    pub fn code(self) -> &'static str {
        match self {
            AddressKind::To => "TO",
            AddressKind::Cc => "CC",
            AddressKind::Bcc => "BCC",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TO" => Some(AddressKind::To),
            "CC" => Some(AddressKind::Cc),
            "BCC" => Some(AddressKind::Bcc),
            _ => None,
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Decoded `mladr={TO|CC|BCC}:"address"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MailAddress {
    pub kind: AddressKind,
    /// The address with quoting removed.
    pub address: String,
}

/// Decoder for `mladr`.
pub struct Mladr;

impl Decoder for Mladr {
    const NAME: &'static str = "mladr";
    type Output = MailAddress;

    fn decode_values(parameter: &Parameter) -> Result<MailAddress, DecodeError> {
        const SYNTAX: &str = "{TO|CC|BCC}:\"address\"";

        let values = Values::new(parameter);
        let text = values.single()?;
        let (code, quoted) = text
            .split_once(':')
            .ok_or_else(|| values.pattern(SYNTAX, text))?;
        let kind = AddressKind::from_code(code).ok_or_else(|| values.unknown_code(code))?;
        let address = quoted
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .filter(|inner| !inner.is_empty())
            .ok_or_else(|| values.pattern(SYNTAX, text))?;

        Ok(MailAddress {
            kind,
            address: unescape_quoted(address).into_owned(),
        })
    }
}
