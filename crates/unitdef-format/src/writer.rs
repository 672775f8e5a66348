//! Low-level unit definition output writer.

use tracing::trace;
use unitdef_tree::{Parameter, Unit};

use crate::options::{FormatOptions, Layout};
use crate::scalar::{header_fields, write_value};

/// Low-level unit definition writer.
///
/// Units are appended one after another; every top-level unit ends with a
/// line terminator.
pub struct UnitWriter {
    out: String,
    options: FormatOptions,
    depth: usize,
}

impl UnitWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    /// Create a new writer with the given options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            out: String::new(),
            options,
            depth: 0,
        }
    }

    /// Consume the writer and return the output.
    pub fn finish(self) -> String {
        self.out
    }

    /// Write a unit and all of its sub-units.
    pub fn write_unit(&mut self, unit: &Unit) {
        trace!(fqn = %unit.fqn(), "write unit");
        self.write_indent();
        self.out.push_str("unit=");
        self.out
            .push_str(&header_fields(unit.attributes(), self.options.trailing_attributes));
        self.out.push(';');
        self.write_line_break();

        self.write_indent();
        self.out.push('{');
        self.write_line_break();

        self.depth += 1;
        for parameter in unit.parameters() {
            self.write_parameter(parameter);
        }
        for sub in unit.sub_units() {
            self.write_unit(sub);
        }
        self.depth -= 1;

        self.write_indent();
        self.out.push('}');
        if self.depth == 0 || self.options.layout == Layout::Expanded {
            self.out.push_str(self.options.newline);
        }
    }

    /// Write `name=value[,value...];`.
    pub fn write_parameter(&mut self, parameter: &Parameter) {
        self.write_indent();
        self.out.push_str(parameter.name());
        self.out.push('=');
        for (i, value) in parameter.values().iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            write_value(&mut self.out, value);
        }
        self.out.push(';');
        self.write_line_break();
    }

    /// Write indentation for the current depth (expanded layout only).
    fn write_indent(&mut self) {
        if self.options.layout == Layout::Expanded {
            for _ in 0..self.depth {
                self.options.indent.write_to(&mut self.out);
            }
        }
    }

    /// End a line (expanded layout only).
    fn write_line_break(&mut self) {
        if self.options.layout == Layout::Expanded {
            self.out.push_str(self.options.newline);
        }
    }
}

impl Default for UnitWriter {
    fn default() -> Self {
        Self::new()
    }
}
