//! Document tree for JP1/AJS unit definitions.
//!
//! This crate turns parser events into an owned tree of [`Unit`]s and offers
//! read-only navigation over it.
//!
//! ```
//! let units = unitdef_tree::parse("unit=NET,,,;{ty=n;unit=JOB,,,;{ty=j;}}").unwrap();
//! let job = units[0].sub_unit("JOB").unwrap();
//! assert_eq!(job.fqn().to_string(), "/NET/JOB");
//! assert_eq!(job.unit_type_code(), Some("j"));
//! ```

mod builder;
mod diagnostic;
mod fqn;
mod index;
mod unit;
mod value;

pub use builder::{BuildError, ParameterBuilder, TreeBuilder, UnitBuilder};
pub use diagnostic::ParseError;
pub use fqn::{FqnParseError, FullQualifiedName};
pub use index::AncestorIndex;
pub use unit::{Attributes, Parameter, PermissionMode, Unit, Units, find};
pub use unitdef_parse::{ErrorClass, ParseErrorKind, Span};
pub use value::{ParameterValue, Tuple, TupleEntry, ValueKind};

/// Parse unit definition text into its top-level units.
///
/// Fails on the first syntax error, or if the text holds no unit at all.
pub fn parse(source: &str) -> Result<Vec<Unit>, BuildError> {
    let parser = unitdef_parse::Parser::new(source);
    let mut builder = TreeBuilder::new(source);
    parser.parse(&mut builder);
    builder.finish()
}

/// Parse unit definition text and return its first top-level unit.
pub fn parse_one(source: &str) -> Result<Unit, BuildError> {
    parse(source)?
        .into_iter()
        .next()
        .ok_or(BuildError::NoUnitDefinition)
}
