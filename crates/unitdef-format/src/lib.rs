//! Formatter for JP1/AJS unit definitions.
//!
//! Writes [`Unit`] trees back to text that `unitdef_tree::parse` reads into an
//! equal tree.
//!
//! ```
//! use unitdef_format::{FormatOptions, format_unit};
//!
//! let unit = unitdef_tree::parse_one("unit=A;{ty=g;}").unwrap();
//! assert_eq!(format_unit(&unit, &FormatOptions::default()), "unit=A,,,;\n{\n\tty=g;\n}\n");
//! assert_eq!(format_unit(&unit, &FormatOptions::compact()), "unit=A;{ty=g;}\n");
//! ```

use std::io;

use unitdef_tree::Unit;

mod options;
mod scalar;
mod writer;

pub use options::{FormatOptions, Indent, Layout, TrailingAttributes};
pub use scalar::{header_fields, write_value};
pub use writer::UnitWriter;

/// Format a single unit tree.
pub fn format_unit(unit: &Unit, options: &FormatOptions) -> String {
    format_units(std::slice::from_ref(unit), options)
}

/// Format a sequence of top-level units.
pub fn format_units(units: &[Unit], options: &FormatOptions) -> String {
    let mut writer = UnitWriter::with_options(options.clone());
    for unit in units {
        writer.write_unit(unit);
    }
    writer.finish()
}

/// Format units into a byte sink as UTF-8.
pub fn write_units<W: io::Write>(
    mut sink: W,
    units: &[Unit],
    options: &FormatOptions,
) -> io::Result<()> {
    sink.write_all(format_units(units, options).as_bytes())?;
    sink.flush()
}
