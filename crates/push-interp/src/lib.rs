//! Push interpreter kernel for genetic-programming search.
//!
//! Candidate programs are first-class data — nested sequences of atoms —
//! mutated and recombined by an external evolutionary algorithm, then executed
//! here to score fitness. The kernel executes a program deterministically
//! against a set of typed stacks under a step budget, and symmetrically
//! synthesizes random program trees for seeding and mutation.
//!
//! The evolutionary loop itself (selection, crossover, fitness evaluation)
//! lives outside this crate and drives the kernel through
//! [`Interpreter::execute`] and [`Interpreter::random_code`].

mod error;
mod frame;
mod instructions;
mod interpreter;
mod random;
mod registry;
mod stack;

pub use error::{InterpError, InterpResult};
pub use frame::{Frame, FrameStack};
pub use instructions::StackKind;
pub use interpreter::{ErcRange, Interpreter};
pub use registry::{AtomGenerator, Instruction, InstructionRegistry};
pub use stack::Stack;

// Re-exported so drivers can depend on this crate alone.
pub use push_types::{Atom, Program};
