//! Program data types.
//!
//! An [`Atom`] is the smallest unit of program data: a literal, a name, or a
//! nested program. A [`Program`] is an ordered sequence of atoms; since a
//! program is itself an atom, programs nest arbitrarily and form trees.
//! Atoms are immutable once created — execution only ever reads them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The smallest unit of Push program data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Atom {
    /// Integer literal; lands on the integer stack when executed.
    Int(i64),
    /// Float literal; lands on the float stack when executed.
    Float(f64),
    /// Instruction name, or a quoted identifier if no instruction is bound.
    Name(String),
    /// Nested program, expanded onto the exec stack when executed.
    Program(Program),
}

impl Atom {
    /// Shorthand for building a name atom.
    pub fn name(name: impl Into<String>) -> Self {
        Atom::Name(name.into())
    }

    /// Name view, if this atom is a name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Atom::Name(n) => Some(n),
            _ => None,
        }
    }

    /// Total number of atoms in this subtree, counting nested program nodes
    /// themselves. A bare literal or name is one point.
    pub fn points(&self) -> usize {
        match self {
            Atom::Program(p) => p.points(),
            _ => 1,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Int(i) => write!(f, "{i}"),
            Atom::Float(x) => write!(f, "{x}"),
            Atom::Name(n) => write!(f, "{n}"),
            Atom::Program(p) => write!(f, "{p}"),
        }
    }
}

/// An ordered, finite sequence of atoms.
///
/// Insertion order is semantically meaningful: it is both the textual form
/// and the expansion order on the exec stack. A program exclusively owns its
/// children; there is no sharing between trees and no cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    atoms: Vec<Atom>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { atoms: Vec::new() }
    }

    /// Append an atom as the last child.
    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// Number of immediate children.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Immediate child at `index`.
    pub fn get(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Iterate over immediate children in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// Total number of atoms in the tree, counting this program node and
    /// every nested program node. Used by GP drivers for size limits.
    pub fn points(&self) -> usize {
        1 + self.atoms.iter().map(Atom::points).sum::<usize>()
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Atom>> for Program {
    fn from(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }
}

impl FromIterator<Atom> for Program {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Atom;
    type IntoIter = std::vec::IntoIter<Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, atom) in self.atoms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{atom}")?;
        }
        write!(f, ")")
    }
}
