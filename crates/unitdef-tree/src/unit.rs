//! Units, their attributes and parameters.

use std::fmt;

use crate::{FullQualifiedName, ParameterValue};

/// The permission mode attribute of a unit header.
///
/// Kept as the text found in the header so formatting is lossless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PermissionMode {
    /// The field was empty.
    #[default]
    Unspecified,
    /// The field text, e.g. `0755`.
    Mode(String),
}

impl PermissionMode {
    /// Normalize a raw header field.
    pub fn from_field(text: &str) -> Self {
        if text.is_empty() {
            PermissionMode::Unspecified
        } else {
            PermissionMode::Mode(text.to_string())
        }
    }

    /// The header text; empty when unspecified.
    pub fn as_str(&self) -> &str {
        match self {
            PermissionMode::Unspecified => "",
            PermissionMode::Mode(mode) => mode,
        }
    }

    /// Check if the field was empty.
    pub fn is_unspecified(&self) -> bool {
        matches!(self, PermissionMode::Unspecified)
    }
}

/// The four positional fields of a unit header.
///
/// Missing trailing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Attributes {
    /// Unit name. Never empty in a built tree.
    pub name: String,
    /// Permission mode.
    pub permission_mode: PermissionMode,
    /// JP1 user name.
    pub jp1_user: String,
    /// JP1 resource group name.
    pub resource_group: String,
}

impl Attributes {
    /// Attributes with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fields in header order.
    pub fn fields(&self) -> [&str; 4] {
        [
            &self.name,
            self.permission_mode.as_str(),
            &self.jp1_user,
            &self.resource_group,
        ]
    }
}

/// A named parameter with one or more values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub(crate) name: String,
    pub(crate) values: Vec<ParameterValue>,
}

impl Parameter {
    /// Parameter name, e.g. `ty`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values in source order. Never empty.
    pub fn values(&self) -> &[ParameterValue] {
        &self.values
    }

    /// Value at position `index`.
    pub fn value(&self, index: usize) -> Option<&ParameterValue> {
        self.values.get(index)
    }

    /// The first value.
    pub fn first(&self) -> Option<&ParameterValue> {
        self.values.first()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A unit definition: header attributes, parameters and sub-units.
///
/// Units own their children; there is no link back to the parent. Use
/// [`AncestorIndex`](crate::AncestorIndex) to walk upwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unit {
    pub(crate) attributes: Attributes,
    pub(crate) fqn: FullQualifiedName,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) sub_units: Vec<Unit>,
}

impl Unit {
    /// Unit name.
    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    /// Header attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Full qualified name assigned when the tree was built.
    pub fn fqn(&self) -> &FullQualifiedName {
        &self.fqn
    }

    /// Parameters in source order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Direct sub-units in source order.
    pub fn sub_units(&self) -> &[Unit] {
        &self.sub_units
    }

    /// All parameters with the given name, in order.
    pub fn parameters_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Parameter> {
        self.parameters.iter().filter(move |p| p.name == name)
    }

    /// The first parameter with the given name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// The first direct sub-unit with the given name.
    pub fn sub_unit(&self, name: &str) -> Option<&Unit> {
        self.sub_units.iter().find(|u| u.name() == name)
    }

    /// All units below this one with the given name, depth-first.
    pub fn descendants_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Unit> {
        self.iter().skip(1).filter(move |u| u.name() == name)
    }

    /// This unit and every unit below it, depth-first pre-order.
    pub fn iter(&self) -> Units<'_> {
        Units { stack: vec![self] }
    }

    /// Find this unit or a descendant by full qualified name.
    pub fn find(&self, fqn: &FullQualifiedName) -> Option<&Unit> {
        if !self.fqn.is_prefix_of(fqn) {
            return None;
        }
        let mut unit = self;
        for fragment in &fqn.fragments()[self.fqn.depth()..] {
            unit = unit.sub_unit(fragment)?;
        }
        Some(unit)
    }

    /// The raw unit type code from the `ty` parameter, e.g. `n` or `j`.
    pub fn unit_type_code(&self) -> Option<&str> {
        self.parameter("ty")?.first()?.as_token()
    }
}

impl<'a> IntoIterator for &'a Unit {
    type Item = &'a Unit;
    type IntoIter = Units<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first pre-order iterator over a unit tree.
#[derive(Debug, Clone)]
pub struct Units<'a> {
    stack: Vec<&'a Unit>,
}

impl<'a> Iterator for Units<'a> {
    type Item = &'a Unit;

    fn next(&mut self) -> Option<Self::Item> {
        let unit = self.stack.pop()?;
        self.stack.extend(unit.sub_units.iter().rev());
        Some(unit)
    }
}

/// Find a unit by full qualified name among top-level units.
pub fn find<'a>(units: &'a [Unit], fqn: &FullQualifiedName) -> Option<&'a Unit> {
    units.iter().find_map(|unit| unit.find(fqn))
}
