//! Builtin instruction set.
//!
//! One small value type per operation, registered by [`Interpreter::new`]
//! under the `<TYPE>.<OP>` naming convention. Builtin bodies never fail:
//! an instruction with missing operands is inert, and a zero divisor leaves
//! its operands untouched.

use crate::error::InterpResult;
use crate::interpreter::Interpreter;
use crate::registry::{Instruction, InstructionRegistry};
use crate::stack::Stack;
use push_types::{Atom, Program};
use std::rc::Rc;

/// The six stacks an instruction can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    Integer,
    Float,
    Boolean,
    Name,
    Code,
    Exec,
}

impl StackKind {
    /// Instruction-name prefix for this stack (`INTEGER.POP` etc.).
    pub fn prefix(self) -> &'static str {
        match self {
            StackKind::Integer => "INTEGER",
            StackKind::Float => "FLOAT",
            StackKind::Boolean => "BOOLEAN",
            StackKind::Name => "NAME",
            StackKind::Code => "CODE",
            StackKind::Exec => "EXEC",
        }
    }
}

/// Where a control-flow instruction takes its code argument from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CodeSource {
    Code,
    Exec,
}

// ══════════════════════════════════════════════════════════════════════════════
// Arithmetic & comparison
// ══════════════════════════════════════════════════════════════════════════════

/// Binary integer operation: pops the top then the second operand and pushes
/// `op(second, top)`. Inert with fewer than two operands; `None` from the
/// operator restores both operands (zero-divisor rule).
pub(crate) struct IntOp(pub fn(i64, i64) -> Option<i64>);

impl Instruction for IntOp {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        let stack = interp.int_stack();
        if stack.depth() < 2 {
            return Ok(());
        }
        let top = stack.pop_or_default();
        let second = stack.pop_or_default();
        match (self.0)(second, top) {
            Some(result) => stack.push(result),
            None => {
                stack.push(second);
                stack.push(top);
            }
        }
        Ok(())
    }
}

/// Integer comparison: pushes `op(second, top)` onto the boolean stack.
pub(crate) struct IntCompare(pub fn(i64, i64) -> bool);

impl Instruction for IntCompare {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        if interp.int_stack().depth() < 2 {
            return Ok(());
        }
        let top = interp.int_stack().pop_or_default();
        let second = interp.int_stack().pop_or_default();
        interp.bool_stack().push((self.0)(second, top));
        Ok(())
    }
}

/// Binary float operation; same operand and zero-divisor rules as [`IntOp`].
pub(crate) struct FloatOp(pub fn(f64, f64) -> Option<f64>);

impl Instruction for FloatOp {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        let stack = interp.float_stack();
        if stack.depth() < 2 {
            return Ok(());
        }
        let top = stack.pop_or_default();
        let second = stack.pop_or_default();
        match (self.0)(second, top) {
            Some(result) => stack.push(result),
            None => {
                stack.push(second);
                stack.push(top);
            }
        }
        Ok(())
    }
}

/// Float comparison: pushes `op(second, top)` onto the boolean stack.
pub(crate) struct FloatCompare(pub fn(f64, f64) -> bool);

impl Instruction for FloatCompare {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        if interp.float_stack().depth() < 2 {
            return Ok(());
        }
        let top = interp.float_stack().pop_or_default();
        let second = interp.float_stack().pop_or_default();
        interp.bool_stack().push((self.0)(second, top));
        Ok(())
    }
}

/// `TRUE` / `FALSE`: pushes a constant onto the boolean stack.
pub(crate) struct BoolConstant(pub bool);

impl Instruction for BoolConstant {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        interp.bool_stack().push(self.0);
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Control flow
// ══════════════════════════════════════════════════════════════════════════════

/// `CODE.QUOTE`: moves the next atom awaiting execution onto the code stack.
pub(crate) struct Quote;

impl Instruction for Quote {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        if let Some(atom) = interp.exec_stack().pop() {
            interp.code_stack().push(atom);
        }
        Ok(())
    }
}

/// `CODE.=` / `EXEC.=`: pops two atoms from the source stack and pushes their
/// structural equality onto the boolean stack.
pub(crate) struct AtomEquals(pub(crate) CodeSource);

impl Instruction for AtomEquals {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        let (a, b) = {
            let stack = source_stack(interp, self.0);
            if stack.depth() < 2 {
                return Ok(());
            }
            (stack.pop(), stack.pop())
        };
        interp.bool_stack().push(a == b);
        Ok(())
    }
}

/// `CODE.IF` / `EXEC.IF`: chooses one of two code arguments by the top of the
/// boolean stack and pushes it onto the exec stack.
///
/// On the exec stack the then-branch sits on top (it was next to execute); on
/// the code stack it sits second (it was quoted first).
pub(crate) struct If(pub(crate) CodeSource);

impl Instruction for If {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        if interp.bool_stack().is_empty() || source_stack(interp, self.0).depth() < 2 {
            return Ok(());
        }
        let (first, second) = {
            let stack = source_stack(interp, self.0);
            (stack.pop(), stack.pop())
        };
        let condition = interp.bool_stack().pop_or_default();
        let chosen = match (self.0, condition) {
            (CodeSource::Exec, true) | (CodeSource::Code, false) => first,
            (CodeSource::Exec, false) | (CodeSource::Code, true) => second,
        };
        if let Some(atom) = chosen {
            interp.exec_stack().push(atom);
        }
        Ok(())
    }
}

/// `CODE.DO*RANGE` / `EXEC.DO*RANGE`: iterates a body over an integer range.
///
/// Pops the destination index (top) and current index from the integer stack
/// and the body from the source stack. The current index is pushed back for
/// the body to see; while the indices differ, a recursive continuation is
/// pushed beneath the body on the exec stack.
pub(crate) struct DoRange(pub(crate) CodeSource);

impl Instruction for DoRange {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        if interp.int_stack().depth() < 2 || source_stack(interp, self.0).is_empty() {
            return Ok(());
        }
        let Some(body) = source_stack(interp, self.0).pop() else {
            return Ok(());
        };
        let destination = interp.int_stack().pop_or_default();
        let current = interp.int_stack().pop_or_default();
        interp.int_stack().push(current);

        if current != destination {
            let next = if current < destination {
                current + 1
            } else {
                current - 1
            };
            let continuation = match self.0 {
                CodeSource::Code => Program::from(vec![
                    Atom::Int(next),
                    Atom::Int(destination),
                    Atom::name("CODE.QUOTE"),
                    body.clone(),
                    Atom::name("CODE.DO*RANGE"),
                ]),
                CodeSource::Exec => Program::from(vec![
                    Atom::Int(next),
                    Atom::Int(destination),
                    Atom::name("EXEC.DO*RANGE"),
                    body.clone(),
                ]),
            };
            interp.exec_stack().push(Atom::Program(continuation));
        }
        interp.exec_stack().push(body);
        Ok(())
    }
}

/// `CODE.DO*COUNT` / `EXEC.DO*COUNT`: runs a body once per counter value from
/// `0` to `n - 1`, counter visible on the integer stack. Inert when `n < 1`.
/// Expands to the standard `DO*RANGE` program on the exec stack.
pub(crate) struct DoCount(pub(crate) CodeSource);

impl Instruction for DoCount {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        expand_counted_loop(interp, self.0, false)
    }
}

/// `CODE.DO*TIMES` / `EXEC.DO*TIMES`: like `DO*COUNT` but the body is wrapped
/// in `(INTEGER.POP body)` so the loop counter is not visible to it.
pub(crate) struct DoTimes(pub(crate) CodeSource);

impl Instruction for DoTimes {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        expand_counted_loop(interp, self.0, true)
    }
}

fn expand_counted_loop(
    interp: &mut Interpreter,
    source: CodeSource,
    hide_counter: bool,
) -> InterpResult<()> {
    if interp.int_stack().is_empty() || source_stack(interp, source).is_empty() {
        return Ok(());
    }
    let count = interp.int_stack().top_or_default();
    if count < 1 {
        return Ok(());
    }
    interp.int_stack().pop();
    let Some(body) = source_stack(interp, source).pop() else {
        return Ok(());
    };
    let body = if hide_counter {
        Atom::Program(Program::from(vec![Atom::name("INTEGER.POP"), body]))
    } else {
        body
    };
    let expansion = match source {
        CodeSource::Code => Program::from(vec![
            Atom::Int(0),
            Atom::Int(count - 1),
            Atom::name("CODE.QUOTE"),
            body,
            Atom::name("CODE.DO*RANGE"),
        ]),
        CodeSource::Exec => Program::from(vec![
            Atom::Int(0),
            Atom::Int(count - 1),
            Atom::name("EXEC.DO*RANGE"),
            body,
        ]),
    };
    interp.exec_stack().push(Atom::Program(expansion));
    Ok(())
}

fn source_stack(interp: &mut Interpreter, source: CodeSource) -> &mut Stack<Atom> {
    match source {
        CodeSource::Code => interp.code_stack(),
        CodeSource::Exec => interp.exec_stack(),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Stack manipulators
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ManipOp {
    Pop,
    Swap,
    Rot,
    Flush,
    Dup,
    StackDepth,
}

/// A `<TYPE>.<OP>` stack manipulator. Resolved against the current frame at
/// execute time, so these follow frame switches instead of pinning to the
/// stacks that existed at registration.
pub(crate) struct StackManip {
    pub kind: StackKind,
    pub op: ManipOp,
}

fn manipulate<T: Clone>(stack: &mut Stack<T>, op: ManipOp) {
    match op {
        ManipOp::Pop => {
            stack.pop();
        }
        ManipOp::Swap => stack.swap(),
        ManipOp::Rot => stack.rot(),
        ManipOp::Flush => stack.flush(),
        ManipOp::Dup => stack.dup(),
        ManipOp::StackDepth => unreachable!("handled before dispatch"),
    }
}

impl Instruction for StackManip {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        if self.op == ManipOp::StackDepth {
            let depth = match self.kind {
                StackKind::Integer => interp.int_stack().depth(),
                StackKind::Float => interp.float_stack().depth(),
                StackKind::Boolean => interp.bool_stack().depth(),
                StackKind::Name => interp.name_stack().depth(),
                StackKind::Code => interp.code_stack().depth(),
                StackKind::Exec => interp.exec_stack().depth(),
            };
            interp.int_stack().push(depth as i64);
            return Ok(());
        }
        match self.kind {
            StackKind::Integer => manipulate(interp.int_stack(), self.op),
            StackKind::Float => manipulate(interp.float_stack(), self.op),
            StackKind::Boolean => manipulate(interp.bool_stack(), self.op),
            StackKind::Name => manipulate(interp.name_stack(), self.op),
            StackKind::Code => manipulate(interp.code_stack(), self.op),
            StackKind::Exec => manipulate(interp.exec_stack(), self.op),
        }
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Frames
// ══════════════════════════════════════════════════════════════════════════════

/// `FRAME.PUSH`: enter a fresh frame (no-op with frames disabled).
pub(crate) struct PushFrame;

impl Instruction for PushFrame {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        interp.push_frame();
        Ok(())
    }
}

/// `FRAME.POP`: discard the current frame (no-op with frames disabled).
pub(crate) struct PopFrame;

impl Instruction for PopFrame {
    fn execute(&self, interp: &mut Interpreter) -> InterpResult<()> {
        interp.pop_frame();
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Registration
// ══════════════════════════════════════════════════════════════════════════════

/// Register the full builtin set into a fresh registry.
pub(crate) fn register_builtins(registry: &mut InstructionRegistry) {
    registry.define("INTEGER.+", Rc::new(IntOp(|a, b| Some(a.wrapping_add(b)))));
    registry.define("INTEGER.-", Rc::new(IntOp(|a, b| Some(a.wrapping_sub(b)))));
    registry.define("INTEGER.*", Rc::new(IntOp(|a, b| Some(a.wrapping_mul(b)))));
    registry.define(
        "INTEGER./",
        Rc::new(IntOp(|a, b| if b == 0 { None } else { Some(a.wrapping_div(b)) })),
    );
    registry.define(
        "INTEGER.%",
        Rc::new(IntOp(|a, b| if b == 0 { None } else { Some(a.wrapping_rem(b)) })),
    );
    registry.define("INTEGER.=", Rc::new(IntCompare(|a, b| a == b)));
    registry.define("INTEGER.>", Rc::new(IntCompare(|a, b| a > b)));
    registry.define("INTEGER.<", Rc::new(IntCompare(|a, b| a < b)));

    registry.define("FLOAT.+", Rc::new(FloatOp(|a, b| Some(a + b))));
    registry.define("FLOAT.-", Rc::new(FloatOp(|a, b| Some(a - b))));
    registry.define("FLOAT.*", Rc::new(FloatOp(|a, b| Some(a * b))));
    registry.define(
        "FLOAT./",
        Rc::new(FloatOp(|a, b| if b == 0.0 { None } else { Some(a / b) })),
    );
    registry.define(
        "FLOAT.%",
        Rc::new(FloatOp(|a, b| if b == 0.0 { None } else { Some(a % b) })),
    );
    registry.define("FLOAT.=", Rc::new(FloatCompare(|a, b| a == b)));
    registry.define("FLOAT.>", Rc::new(FloatCompare(|a, b| a > b)));
    registry.define("FLOAT.<", Rc::new(FloatCompare(|a, b| a < b)));

    registry.define("TRUE", Rc::new(BoolConstant(true)));
    registry.define("FALSE", Rc::new(BoolConstant(false)));

    registry.define("CODE.QUOTE", Rc::new(Quote));
    registry.define("CODE.=", Rc::new(AtomEquals(CodeSource::Code)));
    registry.define("EXEC.=", Rc::new(AtomEquals(CodeSource::Exec)));
    registry.define("CODE.IF", Rc::new(If(CodeSource::Code)));
    registry.define("EXEC.IF", Rc::new(If(CodeSource::Exec)));
    registry.define("CODE.DO*RANGE", Rc::new(DoRange(CodeSource::Code)));
    registry.define("EXEC.DO*RANGE", Rc::new(DoRange(CodeSource::Exec)));
    registry.define("CODE.DO*COUNT", Rc::new(DoCount(CodeSource::Code)));
    registry.define("EXEC.DO*COUNT", Rc::new(DoCount(CodeSource::Exec)));
    registry.define("CODE.DO*TIMES", Rc::new(DoTimes(CodeSource::Code)));
    registry.define("EXEC.DO*TIMES", Rc::new(DoTimes(CodeSource::Exec)));

    for kind in [
        StackKind::Integer,
        StackKind::Float,
        StackKind::Boolean,
        StackKind::Name,
        StackKind::Code,
        StackKind::Exec,
    ] {
        let prefix = kind.prefix();
        for (suffix, op) in [
            ("POP", ManipOp::Pop),
            ("SWAP", ManipOp::Swap),
            ("ROT", ManipOp::Rot),
            ("FLUSH", ManipOp::Flush),
            ("DUP", ManipOp::Dup),
            ("STACKDEPTH", ManipOp::StackDepth),
        ] {
            registry.define(&format!("{prefix}.{suffix}"), Rc::new(StackManip { kind, op }));
        }
    }

    registry.define("FRAME.PUSH", Rc::new(PushFrame));
    registry.define("FRAME.POP", Rc::new(PopFrame));
}
