//! Shared data model for the Push interpreter.
//!
//! This crate defines [`Atom`] and [`Program`] — the unit of program data and
//! the ordered tree of atoms that is both data and executable code. The
//! interpreter kernel and the evolutionary driver both build on these types.

mod atom;

pub use atom::{Atom, Program};
