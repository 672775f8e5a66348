//! Tree builder from parse events, and builders for programmatic construction.

use unitdef_parse::{Event, ParseCallback, UNIT_KEYWORD, canonical_token, is_parameter_name_char};

use crate::diagnostic::ParseError;
use crate::{
    Attributes, FullQualifiedName, Parameter, ParameterValue, PermissionMode, Tuple, TupleEntry,
    Unit,
};

/// Error during tree building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The source text does not parse.
    Parse(ParseError),
    /// The source contains no unit definition at all.
    NoUnitDefinition,
    /// Events ended with a unit, parameter or tuple still open.
    UnclosedStructure,
    /// An event arrived where it cannot apply.
    UnexpectedEvent(String),
    /// A unit has an empty name.
    EmptyUnitName,
    /// A unit has neither parameters nor sub-units.
    EmptyUnitBody(String),
    /// A header field contains a character that would end the field.
    InvalidAttribute {
        /// Which field.
        field: &'static str,
        /// The offending text.
        value: String,
    },
    /// A parameter name is empty, contains a delimiter, or is the `unit` keyword.
    InvalidParameterName(String),
    /// A parameter has no values.
    EmptyParameter(String),
    /// A value holds delimiters that would not read back as the same value.
    InvalidValue {
        /// The parameter name.
        parameter: String,
        /// The offending token or tuple entry.
        value: String,
    },
}

impl BuildError {
    /// The syntax error, if this is one.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            BuildError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Parse(err) => write!(f, "{}", err),
            BuildError::NoUnitDefinition => write!(f, "no unit definition found"),
            BuildError::UnclosedStructure => write!(f, "unclosed structure"),
            BuildError::UnexpectedEvent(msg) => write!(f, "unexpected event: {}", msg),
            BuildError::EmptyUnitName => write!(f, "empty unit name"),
            BuildError::EmptyUnitBody(name) => {
                write!(f, "unit `{}` has no parameters and no sub-units", name)
            }
            BuildError::InvalidAttribute { field, value } => {
                write!(f, "invalid {} `{}`", field, value)
            }
            BuildError::InvalidParameterName(name) => {
                write!(f, "invalid parameter name `{}`", name)
            }
            BuildError::EmptyParameter(name) => write!(f, "parameter `{}` has no values", name),
            BuildError::InvalidValue { parameter, value } => {
                write!(f, "invalid value `{}` for parameter `{}`", value, parameter)
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for BuildError {
    fn from(err: ParseError) -> Self {
        BuildError::Parse(err)
    }
}

/// Accumulates a parameter's name and values.
#[derive(Debug, Clone)]
pub struct ParameterBuilder {
    name: String,
    values: Vec<ParameterValue>,
}

impl ParameterBuilder {
    /// Start a parameter with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Append a value.
    pub fn value(mut self, value: ParameterValue) -> Self {
        self.values.push(value);
        self
    }

    /// Append an unquoted token.
    pub fn token(self, text: impl Into<String>) -> Self {
        self.value(ParameterValue::token(text))
    }

    /// Append a quoted string (unescaped content).
    pub fn quoted(self, text: impl Into<String>) -> Self {
        self.value(ParameterValue::quoted(text))
    }

    /// Append a tuple.
    pub fn tuple(self, tuple: Tuple) -> Self {
        self.value(ParameterValue::Tuple(tuple))
    }

    fn push(&mut self, value: ParameterValue) {
        self.values.push(value);
    }

    /// Validate and produce the parameter.
    pub fn build(self) -> Result<Parameter, BuildError> {
        if self.name.is_empty()
            || self.name == UNIT_KEYWORD
            || !self.name.chars().all(is_parameter_name_char)
        {
            return Err(BuildError::InvalidParameterName(self.name));
        }
        if self.values.is_empty() {
            return Err(BuildError::EmptyParameter(self.name));
        }
        let values = self
            .values
            .into_iter()
            .map(writable)
            .collect::<Result<Vec<_>, _>>();
        match values {
            Ok(values) => Ok(Parameter {
                name: self.name,
                values,
            }),
            Err(value) => Err(BuildError::InvalidValue {
                parameter: self.name,
                value,
            }),
        }
    }
}

/// Check that a value reads back unchanged once written, returning the
/// offending text if it does not.
///
/// Quoted runs embedded in tokens are rewritten in canonical escaped form.
fn writable(value: ParameterValue) -> Result<ParameterValue, String> {
    match value {
        ParameterValue::Token(text) => {
            let canonical = canonical_token(&text).map(|t| t.into_owned());
            canonical.map(ParameterValue::Token).ok_or(text)
        }
        ParameterValue::Quoted(text) => Ok(ParameterValue::Quoted(text)),
        ParameterValue::Tuple(tuple) => {
            let broken = tuple.iter().find(|entry| {
                entry.value().contains([',', ')'])
                    || entry.key().is_some_and(|key| key.contains(['=', ',', ')']))
            });
            match broken {
                Some(entry) => Err(match entry.key() {
                    Some(key) => format!("{}={}", key, entry.value()),
                    None => entry.value().to_string(),
                }),
                None => Ok(ParameterValue::Tuple(tuple)),
            }
        }
    }
}

/// Accumulates a unit and its sub-units.
///
/// Full qualified names are assigned on [`build`](UnitBuilder::build), from
/// the names along the path from the built root.
#[derive(Debug, Clone)]
pub struct UnitBuilder {
    attributes: Attributes,
    parameters: Vec<Parameter>,
    sub_units: Vec<UnitBuilder>,
}

impl UnitBuilder {
    /// Start a unit with the given name and empty remaining attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_attributes(Attributes::named(name))
    }

    /// Start a unit from complete header attributes.
    pub fn from_attributes(attributes: Attributes) -> Self {
        Self {
            attributes,
            parameters: Vec::new(),
            sub_units: Vec::new(),
        }
    }

    /// Set the permission mode field.
    pub fn permission_mode(mut self, mode: &str) -> Self {
        self.attributes.permission_mode = PermissionMode::from_field(mode);
        self
    }

    /// Set the JP1 user name field.
    pub fn jp1_user(mut self, user: impl Into<String>) -> Self {
        self.attributes.jp1_user = user.into();
        self
    }

    /// Set the JP1 resource group field.
    pub fn resource_group(mut self, group: impl Into<String>) -> Self {
        self.attributes.resource_group = group.into();
        self
    }

    /// Append a parameter.
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append a sub-unit.
    pub fn sub_unit(mut self, unit: UnitBuilder) -> Self {
        self.sub_units.push(unit);
        self
    }

    /// Validate and produce a top-level unit.
    pub fn build(self) -> Result<Unit, BuildError> {
        self.build_under(None)
    }

    fn build_under(self, parent: Option<&FullQualifiedName>) -> Result<Unit, BuildError> {
        let attributes = self.attributes;
        if attributes.name.is_empty() {
            return Err(BuildError::EmptyUnitName);
        }
        for (field, value) in ["name", "permission mode", "JP1 user", "resource group"]
            .into_iter()
            .zip(attributes.fields())
        {
            if value.contains([',', ';']) {
                return Err(BuildError::InvalidAttribute {
                    field,
                    value: value.to_string(),
                });
            }
        }
        if self.parameters.is_empty() && self.sub_units.is_empty() {
            return Err(BuildError::EmptyUnitBody(attributes.name));
        }

        let fqn = match parent {
            Some(parent) => parent.child(attributes.name.as_str()),
            None => FullQualifiedName::root(attributes.name.as_str()),
        };
        let sub_units = self
            .sub_units
            .into_iter()
            .map(|sub| sub.build_under(Some(&fqn)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Unit {
            attributes,
            fqn,
            parameters: self.parameters,
            sub_units,
        })
    }
}

/// Builder that constructs units from parse events.
pub struct TreeBuilder<'src> {
    source: &'src str,
    stack: Vec<BuilderFrame>,
    units: Vec<Unit>,
    error: Option<BuildError>,
}

enum BuilderFrame {
    Unit(UnitBuilder),
    Parameter(ParameterBuilder),
    Tuple(Tuple),
}

impl<'src> TreeBuilder<'src> {
    /// Create a new tree builder for events parsed from `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            stack: Vec::new(),
            units: Vec::new(),
            error: None,
        }
    }

    /// Finish building and return the top-level units.
    pub fn finish(self) -> Result<Vec<Unit>, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if !self.stack.is_empty() {
            return Err(BuildError::UnclosedStructure);
        }
        if self.units.is_empty() {
            return Err(BuildError::NoUnitDefinition);
        }
        Ok(self.units)
    }

    /// Record an error and stop the parse.
    fn fail(&mut self, err: BuildError) -> bool {
        self.error = Some(err);
        false
    }

    fn unexpected(&mut self, what: &str) -> bool {
        self.fail(BuildError::UnexpectedEvent(what.to_string()))
    }

    /// Add a value to the innermost open parameter.
    fn push_value(&mut self, value: ParameterValue) -> bool {
        match self.stack.last_mut() {
            Some(BuilderFrame::Parameter(parameter)) => {
                parameter.push(value);
                true
            }
            _ => self.unexpected("value outside a parameter"),
        }
    }

    fn close_unit(&mut self) -> bool {
        let Some(BuilderFrame::Unit(unit)) = self.stack.pop() else {
            return self.unexpected("unit end without an open unit");
        };
        match self.stack.last_mut() {
            Some(BuilderFrame::Unit(parent)) => {
                parent.sub_units.push(unit);
                true
            }
            None => match unit.build() {
                Ok(unit) => {
                    self.units.push(unit);
                    true
                }
                Err(err) => self.fail(err),
            },
            Some(_) => self.unexpected("unit nested in a parameter"),
        }
    }

    fn close_parameter(&mut self) -> bool {
        let Some(BuilderFrame::Parameter(parameter)) = self.stack.pop() else {
            return self.unexpected("parameter end without an open parameter");
        };
        let parameter = match parameter.build() {
            Ok(parameter) => parameter,
            Err(err) => return self.fail(err),
        };
        match self.stack.last_mut() {
            Some(BuilderFrame::Unit(unit)) => {
                unit.parameters.push(parameter);
                true
            }
            _ => self.unexpected("parameter outside a unit"),
        }
    }
}

impl<'src> ParseCallback<'src> for TreeBuilder<'src> {
    fn event(&mut self, event: Event<'src>) -> bool {
        match event {
            Event::DocumentStart | Event::DocumentEnd => true,

            Event::UnitStart {
                name,
                permission_mode,
                jp1_user,
                resource_group,
                ..
            } => {
                if !matches!(self.stack.last(), None | Some(BuilderFrame::Unit(_))) {
                    return self.unexpected("unit start inside a parameter");
                }
                self.stack
                    .push(BuilderFrame::Unit(UnitBuilder::from_attributes(Attributes {
                        name: name.to_string(),
                        permission_mode: PermissionMode::from_field(permission_mode),
                        jp1_user: jp1_user.to_string(),
                        resource_group: resource_group.to_string(),
                    })));
                true
            }

            Event::UnitEnd { .. } => self.close_unit(),

            Event::ParameterStart { name, .. } => {
                if !matches!(self.stack.last(), Some(BuilderFrame::Unit(_))) {
                    return self.unexpected("parameter start outside a unit");
                }
                self.stack
                    .push(BuilderFrame::Parameter(ParameterBuilder::new(name)));
                true
            }

            Event::ParameterEnd { .. } => self.close_parameter(),

            Event::Token { text, .. } => self.push_value(ParameterValue::Token(text.into_owned())),

            Event::Quoted { text, .. } => {
                self.push_value(ParameterValue::Quoted(text.into_owned()))
            }

            Event::TupleStart { .. } => {
                if !matches!(self.stack.last(), Some(BuilderFrame::Parameter(_))) {
                    return self.unexpected("tuple outside a parameter");
                }
                self.stack.push(BuilderFrame::Tuple(Tuple::new()));
                true
            }

            Event::TupleEntry { key, value, .. } => match self.stack.last_mut() {
                Some(BuilderFrame::Tuple(tuple)) => {
                    tuple.entries.push(match key {
                        Some(key) => TupleEntry::keyed(key, value),
                        None => TupleEntry::unkeyed(value),
                    });
                    true
                }
                _ => self.unexpected("tuple entry outside a tuple"),
            },

            Event::TupleEnd { .. } => match self.stack.pop() {
                Some(BuilderFrame::Tuple(tuple)) => self.push_value(ParameterValue::Tuple(tuple)),
                _ => self.unexpected("tuple end without an open tuple"),
            },

            Event::Error { span, kind } => {
                self.fail(BuildError::Parse(ParseError::new(kind, span, self.source)))
            }
        }
    }
}
