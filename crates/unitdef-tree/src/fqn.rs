//! Full qualified unit names.

use std::fmt;
use std::str::FromStr;

/// The root-to-node path of unit names, written `/NET/SUB/JOB`.
///
/// Assigned once when a tree is built and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FullQualifiedName {
    fragments: Vec<String>,
}

impl FullQualifiedName {
    /// Name of a top-level unit.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            fragments: vec![name.into()],
        }
    }

    /// Name of a direct child of this unit.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut fragments = self.fragments.clone();
        fragments.push(name.into());
        Self { fragments }
    }

    /// Name fragments, root first. Never empty.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// The last fragment: the unit's own name.
    pub fn name(&self) -> &str {
        self.fragments.last().map_or("", String::as_str)
    }

    /// Name of the enclosing unit, or `None` for a top-level unit.
    pub fn parent(&self) -> Option<Self> {
        match self.fragments.len() {
            0 | 1 => None,
            n => Some(Self {
                fragments: self.fragments[..n - 1].to_vec(),
            }),
        }
    }

    /// Number of fragments; 1 for a top-level unit.
    pub fn depth(&self) -> usize {
        self.fragments.len()
    }

    /// Check whether `self` is `other` or one of its ancestors.
    pub fn is_prefix_of(&self, other: &FullQualifiedName) -> bool {
        other.fragments.starts_with(&self.fragments)
    }
}

impl fmt::Display for FullQualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            write!(f, "/{fragment}")?;
        }
        Ok(())
    }
}

/// Error parsing a [`FullQualifiedName`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FqnParseError {
    input: String,
}

impl fmt::Display for FqnParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid unit path `{}`: expected `/NAME[/NAME...]`",
            self.input
        )
    }
}

impl std::error::Error for FqnParseError {}

impl FromStr for FullQualifiedName {
    type Err = FqnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || FqnParseError {
            input: s.to_string(),
        };
        let rest = s.strip_prefix('/').ok_or_else(err)?;
        let fragments: Vec<String> = rest.split('/').map(str::to_string).collect();
        if fragments.iter().any(String::is_empty) {
            return Err(err());
        }
        Ok(Self { fragments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_appends_one_fragment() {
        let net = FullQualifiedName::root("NET");
        let job = net.child("JOB");
        assert_eq!(job.fragments(), ["NET", "JOB"]);
        assert_eq!(job.name(), "JOB");
        assert_eq!(job.depth(), 2);
        assert_eq!(job.parent(), Some(net.clone()));
        assert_eq!(net.parent(), None);
        assert!(net.is_prefix_of(&job));
        assert!(!job.is_prefix_of(&net));
    }

    #[test]
    fn test_display_and_parse() {
        let fqn = FullQualifiedName::root("A").child("B").child("C");
        assert_eq!(fqn.to_string(), "/A/B/C");
        assert_eq!("/A/B/C".parse::<FullQualifiedName>(), Ok(fqn));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "/", "A/B", "/A//B", "/A/"] {
            assert!(input.parse::<FullQualifiedName>().is_err(), "{input}");
        }
    }
}
