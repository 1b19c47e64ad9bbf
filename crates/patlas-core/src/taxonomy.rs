//! Two-axis classification taxonomy: technology field × implementation type.
//!
//! Built once from the flat category list in the dataset payload and
//! immutable thereafter. Management-side edits happen in an external
//! collaborator that revalidates and reloads the whole taxonomy; nothing
//! in-core mutates it.
//!
//! Per-category patent counts are deliberately NOT stored here; they are
//! derived aggregates, recomputed from the record set on demand.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code;
use crate::error::{PatlasError, Result};

/// One of the two independent classification dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    /// Axis 1: what technology the patent covers.
    TechnologyField,
    /// Axis 2: how the technology is realised.
    ImplementationType,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::TechnologyField, Axis::ImplementationType];

    /// The axis digit used in category codes.
    pub fn number(&self) -> u8 {
        match self {
            Self::TechnologyField => 1,
            Self::ImplementationType => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TechnologyField => "technology-field",
            Self::ImplementationType => "implementation-type",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat category definition as supplied in the dataset payload.
///
/// The axis and major/minor level are implied by the code shape; no
/// separate parent field is carried on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A resolved category node: a major with its minors, or a leaf minor.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub code: String,
    pub name: String,
    pub description: String,
    /// Minor subcategories, ordered by code. Empty for minors.
    pub minors: Vec<Category>,
}

/// Immutable two-axis taxonomy.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    technology: Vec<Category>,
    implementation: Vec<Category>,
}

impl Taxonomy {
    /// Build a taxonomy from flat definitions.
    ///
    /// Fails with `UnknownCategory` on a malformed code, `DuplicateCategory`
    /// on a repeated code, and `UnknownParent` on a minor whose major is not
    /// defined. Majors and minors end up ordered by code, which is taxonomy
    /// order for this code scheme.
    pub fn build(defs: &[CategoryDef]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut taxonomy = Self::default();
        let mut minors = Vec::new();

        for def in defs {
            let parts = code::parse(&def.code)?;
            if !seen.insert(def.code.clone()) {
                return Err(PatlasError::DuplicateCategory(def.code.clone()));
            }
            let node = Category {
                code: def.code.clone(),
                name: def.name.clone(),
                description: def.description.clone(),
                minors: Vec::new(),
            };
            match code::parent_code(&def.code) {
                None => taxonomy.axis_mut(parts.axis).push(node),
                Some(parent) => minors.push((parts.axis, parent, node)),
            }
        }

        for (axis, parent, node) in minors {
            let majors = taxonomy.axis_mut(axis);
            let Some(major) = majors.iter_mut().find(|m| m.code == parent) else {
                return Err(PatlasError::UnknownParent {
                    code: node.code,
                    parent,
                });
            };
            major.minors.push(node);
        }

        for axis in Axis::BOTH {
            let majors = taxonomy.axis_mut(axis);
            majors.sort_by(|a, b| a.code.cmp(&b.code));
            for major in majors.iter_mut() {
                major.minors.sort_by(|a, b| a.code.cmp(&b.code));
            }
        }

        Ok(taxonomy)
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut Vec<Category> {
        match axis {
            Axis::TechnologyField => &mut self.technology,
            Axis::ImplementationType => &mut self.implementation,
        }
    }

    /// Ordered major categories of one axis.
    pub fn majors(&self, axis: Axis) -> &[Category] {
        match axis {
            Axis::TechnologyField => &self.technology,
            Axis::ImplementationType => &self.implementation,
        }
    }

    /// Look up any defined code, major or minor, on either axis.
    pub fn lookup(&self, code: &str) -> Result<&Category> {
        let axis = code::axis_of(code)?;
        self.lookup_on(axis, code)
    }

    /// Look up a code, requiring it to be defined on the given axis.
    pub fn lookup_on(&self, axis: Axis, code: &str) -> Result<&Category> {
        if code::axis_of(code)? == axis {
            for major in self.majors(axis) {
                if major.code == code {
                    return Ok(major);
                }
                if let Some(minor) = major.minors.iter().find(|m| m.code == code) {
                    return Ok(minor);
                }
            }
        }
        Err(PatlasError::UnknownCategory(code.to_string()))
    }

    /// True when the code is defined somewhere in the taxonomy.
    pub fn contains(&self, code: &str) -> bool {
        self.lookup(code).is_ok()
    }

    /// Number of defined categories across both axes, minors included.
    pub fn len(&self) -> usize {
        Axis::BOTH
            .iter()
            .flat_map(|axis| self.majors(*axis))
            .map(|major| 1 + major.minors.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.technology.is_empty() && self.implementation.is_empty()
    }
}
