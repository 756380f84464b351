//! Instruction and atom-generator registry.
//!
//! Owns the canonical name→behavior and name→generator tables, plus the
//! currently active generator pool used for random code synthesis. The pool
//! is a multiset: duplicate entries deliberately weight sampling.

use crate::error::{InterpError, InterpResult};
use crate::interpreter::Interpreter;
use push_types::Program;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::warn;

/// A single executable operation over interpreter state.
///
/// Side effects are confined to popping and pushing on the typed stacks.
/// Bodies are trusted: any error they return propagates unmodified through
/// `step`/`execute`.
pub trait Instruction {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()>;
}

/// Produces one random atom during code synthesis.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomGenerator {
    /// Always yields the given instruction name.
    Instruction(String),
    /// Ephemeral random integer constant, quantized by the configured
    /// resolution.
    IntErc,
    /// Ephemeral random float constant, quantized by the configured
    /// resolution.
    FloatErc,
}

/// Wildcard token prefix accepted by [`InstructionRegistry::configure_active_set`].
const REGISTERED_PREFIX: &str = "REGISTERED.";

/// Stack types a `REGISTERED.<TYPE>` wildcard may name.
const STACK_TYPES: [&str; 7] = [
    "INTEGER", "FLOAT", "BOOLEAN", "EXEC", "CODE", "NAME", "FRAME",
];

/// Name→behavior and name→generator tables plus the active generator pool.
///
/// `BTreeMap` keeps wildcard expansion order deterministic, which matters for
/// reproducible sampling under a fixed seed.
pub struct InstructionRegistry {
    instructions: BTreeMap<String, Rc<dyn Instruction>>,
    generators: BTreeMap<String, AtomGenerator>,
    active: Vec<AtomGenerator>,
}

impl InstructionRegistry {
    /// Empty registry, seeded with the two ephemeral-constant generators.
    /// They live only in the generator table, so wildcard expansion (which
    /// walks the instruction table) never picks them up.
    pub(crate) fn new() -> Self {
        let mut generators = BTreeMap::new();
        generators.insert("INTEGER.ERC".to_string(), AtomGenerator::IntErc);
        generators.insert("FLOAT.ERC".to_string(), AtomGenerator::FloatErc);
        Self {
            instructions: BTreeMap::new(),
            generators,
            active: Vec::new(),
        }
    }

    /// Register an instruction and its fixed-name generator. Redefining an
    /// existing name overwrites silently.
    pub fn define(&mut self, name: &str, instruction: Rc<dyn Instruction>) {
        self.instructions.insert(name.to_string(), instruction);
        self.generators
            .insert(name.to_string(), AtomGenerator::Instruction(name.to_string()));
    }

    /// [`Self::define`] plus immediate activation for random generation.
    pub fn add_custom(&mut self, name: &str, instruction: Rc<dyn Instruction>) {
        self.define(name, instruction);
        self.active.push(AtomGenerator::Instruction(name.to_string()));
    }

    /// Look up an instruction by name.
    pub fn get(&self, name: &str) -> Option<Rc<dyn Instruction>> {
        self.instructions.get(name).cloned()
    }

    /// The currently active generator pool.
    pub fn active_pool(&self) -> &[AtomGenerator] {
        &self.active
    }

    /// Space-joined dump of all registered instruction names.
    pub fn names(&self) -> String {
        self.instructions
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Rebuild the active pool from a list of instruction names and
    /// `REGISTERED.<TYPE>` wildcard tokens.
    ///
    /// Any element that is not a name atom fails the whole call without
    /// touching the pool. Unknown plain names and unknown wildcard types are
    /// warned about and skipped.
    pub fn configure_active_set(&mut self, list: &Program) -> InterpResult<()> {
        let mut pool = Vec::new();
        for atom in list.iter() {
            let name = atom
                .as_name()
                .ok_or_else(|| InterpError::InvalidInstructionList(atom.to_string()))?;

            if let Some(stack_type) = name.strip_prefix(REGISTERED_PREFIX) {
                if !STACK_TYPES.contains(&stack_type) {
                    warn!(instruction = name, "unknown stack type in instruction set");
                    continue;
                }
                // Plain string-prefix match over instruction names, not a
                // type-safe filter: INTEGERFOO matches INTEGER too.
                for key in self.instructions.keys() {
                    if key.starts_with(stack_type) {
                        if let Some(generator) = self.generators.get(key) {
                            pool.push(generator.clone());
                        }
                    }
                }
                if stack_type == "BOOLEAN" {
                    // The boolean literals do not share the BOOLEAN prefix
                    // but always belong to the boolean set.
                    for literal in ["TRUE", "FALSE"] {
                        if let Some(generator) = self.generators.get(literal) {
                            pool.push(generator.clone());
                        }
                    }
                }
            } else if let Some(generator) = self.generators.get(name) {
                pool.push(generator.clone());
            } else {
                warn!(instruction = name, "unknown instruction in instruction set");
            }
        }
        self.active = pool;
        Ok(())
    }
}
