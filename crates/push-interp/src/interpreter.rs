//! The execution engine: a step-driven loop over the exec stack.
//!
//! Each step pops one atom, classifies it, and dispatches: literals land on
//! their value stacks, names resolve through the instruction registry (or
//! fall back to the name stack), and nested programs expand their children
//! onto the exec stack in reverse order for depth-first, left-to-right
//! execution. A step budget bounds total work; only the budget does — peak
//! memory is bounded by nothing but the caller's patience.

use crate::error::InterpResult;
use crate::frame::FrameStack;
use crate::instructions;
use crate::registry::{Instruction, InstructionRegistry};
use crate::stack::Stack;
use push_types::{Atom, Program};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Range and quantization for ephemeral random constants.
///
/// `max` must be greater than `min` and `resolution` positive. Sampled values
/// are drawn uniformly from `[min, max)` and truncated to a multiple of
/// `resolution`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErcRange<T> {
    pub min: T,
    pub max: T,
    pub resolution: T,
}

/// A Push interpreter instance.
///
/// Owns the six typed stacks (five of them behind the frame manager), the
/// instruction registry, the effort counter, and a seedable random source for
/// program synthesis. One instance executes one program at a time; it is not
/// safe for concurrent use.
pub struct Interpreter {
    pub(crate) registry: InstructionRegistry,
    frames: FrameStack,
    exec: Stack<Atom>,
    effort: u64,
    pub(crate) rng: StdRng,
    pub(crate) int_erc: ErcRange<i64>,
    pub(crate) float_erc: ErcRange<f64>,
}

impl Interpreter {
    /// Fresh interpreter with all builtins registered, one frame, empty
    /// stacks, and an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic interpreter for reproducible experiments.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut registry = InstructionRegistry::new();
        instructions::register_builtins(&mut registry);
        Self {
            registry,
            frames: FrameStack::new(),
            exec: Stack::new(),
            effort: 0,
            rng,
            int_erc: ErcRange {
                min: 0,
                max: 10,
                resolution: 1,
            },
            float_erc: ErcRange {
                min: 0.0,
                max: 10.0,
                resolution: 0.5,
            },
        }
    }

    // ── Configuration ─────────────────────────────────────────────────────

    /// Toggle frame isolation. Default disabled.
    ///
    /// When enabled, each subtree executes against a fresh set of stacks,
    /// with the top of each stack handed across the boundary in both
    /// directions as argument and return values.
    pub fn set_use_frames(&mut self, use_frames: bool) {
        self.frames.set_enabled(use_frames);
    }

    /// Range for `INTEGER.ERC` random literals.
    pub fn set_random_int_range(&mut self, range: ErcRange<i64>) {
        self.int_erc = range;
    }

    /// Range for `FLOAT.ERC` random literals.
    pub fn set_random_float_range(&mut self, range: ErcRange<f64>) {
        self.float_erc = range;
    }

    /// Register an instruction and immediately activate it for random
    /// generation.
    pub fn add_instruction<I: Instruction + 'static>(&mut self, name: &str, instruction: I) {
        self.registry.add_custom(name, Rc::new(instruction));
    }

    /// Rebuild the active generator pool from a list of instruction names and
    /// `REGISTERED.<TYPE>` wildcard tokens. See
    /// [`InstructionRegistry::configure_active_set`].
    pub fn set_instructions(&mut self, list: &Program) -> InterpResult<()> {
        self.registry.configure_active_set(list)
    }

    /// Space-joined dump of all registered instruction names. Order is
    /// unspecified.
    pub fn instruction_names(&self) -> String {
        self.registry.names()
    }

    /// The registry, for inspection by drivers.
    pub fn registry(&self) -> &InstructionRegistry {
        &self.registry
    }

    // ── Execution ─────────────────────────────────────────────────────────

    /// Execute a program, seeding both the code and exec stacks, until the
    /// exec stack empties or `max_steps` is exhausted. `-1` means unbounded.
    /// Returns the number of atoms processed.
    pub fn execute(&mut self, program: &Program, max_steps: i64) -> InterpResult<u64> {
        debug!(points = program.points(), max_steps, "executing program");
        self.code_stack().push(Atom::Program(program.clone()));
        self.load_program(program);
        self.step(max_steps)
    }

    /// Execute a program with no step limit.
    pub fn run(&mut self, program: &Program) -> InterpResult<u64> {
        self.execute(program, -1)
    }

    /// Expand a program onto the exec stack without touching the code stack.
    /// Lower-level primitive under [`Self::execute`]. The root expands
    /// immediately, so the step count reports only the atoms it contains.
    pub fn load_program(&mut self, program: &Program) {
        self.expand(program.clone());
    }

    /// Advance an already-loaded interpreter by at most `max_steps` atoms
    /// (`-1` for unbounded). Returns the number of atoms processed; the
    /// cumulative effort counter advances by the same amount.
    pub fn step(&mut self, mut max_steps: i64) -> InterpResult<u64> {
        let mut executed = 0u64;
        while max_steps != 0 {
            let Some(atom) = self.exec.pop() else {
                break;
            };
            let result = self.execute_atom(atom);
            max_steps -= 1;
            executed += 1;
            if let Err(e) = result {
                self.effort += executed;
                return Err(e);
            }
        }
        self.effort += executed;
        Ok(executed)
    }

    /// Dispatch a single atom.
    fn execute_atom(&mut self, atom: Atom) -> InterpResult<()> {
        match atom {
            Atom::Program(program) => {
                self.expand(program);
                Ok(())
            }
            Atom::Int(value) => {
                self.int_stack().push(value);
                Ok(())
            }
            Atom::Float(value) => {
                self.float_stack().push(value);
                Ok(())
            }
            Atom::Name(name) => match self.registry.get(&name) {
                Some(instruction) => instruction.execute(self),
                None => {
                    self.name_stack().push(name);
                    Ok(())
                }
            },
        }
    }

    /// Push a program's children onto the exec stack in reverse order, so the
    /// first child executes next. With frames on, `FRAME.PUSH` lands on top
    /// (runs before the subtree) and `FRAME.POP` at the bottom (runs after).
    fn expand(&mut self, program: Program) {
        if self.frames.enabled() {
            self.exec.push(Atom::name("FRAME.POP"));
        }
        for child in program.into_iter().rev() {
            self.exec.push(child);
        }
        if self.frames.enabled() {
            self.exec.push(Atom::name("FRAME.PUSH"));
        }
    }

    // ── Stack access ──────────────────────────────────────────────────────

    /// The exec stack. Unlike the five others it is never swapped by frames.
    pub fn exec_stack(&mut self) -> &mut Stack<Atom> {
        &mut self.exec
    }

    pub fn int_stack(&mut self) -> &mut Stack<i64> {
        &mut self.frames.current_mut().int
    }

    pub fn float_stack(&mut self) -> &mut Stack<f64> {
        &mut self.frames.current_mut().float
    }

    pub fn bool_stack(&mut self) -> &mut Stack<bool> {
        &mut self.frames.current_mut().boolean
    }

    pub fn code_stack(&mut self) -> &mut Stack<Atom> {
        &mut self.frames.current_mut().code
    }

    pub fn name_stack(&mut self) -> &mut Stack<String> {
        &mut self.frames.current_mut().name
    }

    /// Empty all six stacks, for resetting between independent evaluations.
    pub fn clear_stacks(&mut self) {
        self.exec.flush();
        let frame = self.frames.current_mut();
        frame.int.flush();
        frame.float.flush();
        frame.boolean.flush();
        frame.code.flush();
        frame.name.flush();
    }

    // ── Frames ────────────────────────────────────────────────────────────

    pub fn push_frame(&mut self) {
        self.frames.push_frame();
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop_frame();
    }

    /// Current frame nesting depth. Always at least one.
    pub fn frame_depth(&self) -> usize {
        self.frames.depth()
    }

    /// Cumulative count of atoms dispatched over this interpreter's lifetime.
    pub fn effort(&self) -> u64 {
        self.effort
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frames.current();
        writeln!(f, "exec stack: {}", self.exec)?;
        writeln!(f, "code stack: {}", frame.code)?;
        writeln!(f, "int stack: {}", frame.int)?;
        writeln!(f, "float stack: {}", frame.float)?;
        writeln!(f, "boolean stack: {}", frame.boolean)?;
        writeln!(f, "name stack: {}", frame.name)
    }
}
