//! Parent lookup for unit trees.

use std::collections::HashMap;

use crate::{FullQualifiedName, Unit};

/// Maps each unit to its enclosing unit.
///
/// Built by one walk over the tree; units themselves hold no parent links.
#[derive(Debug, Clone, Default)]
pub struct AncestorIndex<'a> {
    parents: HashMap<&'a FullQualifiedName, &'a Unit>,
}

impl<'a> AncestorIndex<'a> {
    /// Index a list of top-level units.
    pub fn new(units: &'a [Unit]) -> Self {
        let mut index = Self::default();
        for unit in units {
            index.insert(unit);
        }
        index
    }

    /// Index a single tree.
    pub fn of(root: &'a Unit) -> Self {
        let mut index = Self::default();
        index.insert(root);
        index
    }

    fn insert(&mut self, root: &'a Unit) {
        for unit in root.iter() {
            for sub in unit.sub_units() {
                self.parents.insert(sub.fqn(), unit);
            }
        }
    }

    /// The unit directly enclosing `fqn`, or `None` for a top-level or
    /// unknown unit.
    pub fn parent_of(&self, fqn: &FullQualifiedName) -> Option<&'a Unit> {
        self.parents.get(fqn).copied()
    }

    /// Enclosing units from the nearest outwards.
    pub fn ancestors_of(&self, fqn: &FullQualifiedName) -> Vec<&'a Unit> {
        let mut ancestors = Vec::new();
        let mut current = fqn;
        while let Some(parent) = self.parent_of(current) {
            ancestors.push(parent);
            current = parent.fqn();
        }
        ancestors
    }

    /// Number of indexed non-root units.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Check if no unit has a parent.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
