//! Tests for active-set configuration: wildcards, warnings, atomicity.

use push_interp::{
    Atom, AtomGenerator, InterpError, InterpResult, Instruction, Interpreter, Program,
};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

struct Noop;

impl Instruction for Noop {
    fn execute(&self, _interp: &mut Interpreter) -> InterpResult<()> {
        Ok(())
    }
}

fn names(names: &[&str]) -> Program {
    names.iter().map(|n| Atom::name(*n)).collect()
}

fn pool(interp: &Interpreter) -> &[AtomGenerator] {
    interp.registry().active_pool()
}

fn pool_has_name(interp: &Interpreter, name: &str) -> bool {
    pool(interp)
        .iter()
        .any(|g| matches!(g, AtomGenerator::Instruction(n) if n == name))
}

// ══════════════════════════════════════════════════════════════════════════════
// Plain names
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn plain_names_activate_their_generators() {
    let mut interp = Interpreter::new();
    interp
        .set_instructions(&names(&["INTEGER.+", "CODE.QUOTE"]))
        .expect("configure");
    assert_eq!(pool(&interp).len(), 2);
    assert!(pool_has_name(&interp, "INTEGER.+"));
    assert!(pool_has_name(&interp, "CODE.QUOTE"));
}

#[test]
fn duplicate_names_weight_the_pool() {
    let mut interp = Interpreter::new();
    interp
        .set_instructions(&names(&["TRUE", "TRUE", "FALSE"]))
        .expect("configure");
    assert_eq!(pool(&interp).len(), 3);
}

#[test]
fn unknown_names_are_skipped_not_fatal() {
    let mut interp = Interpreter::new();
    interp
        .set_instructions(&names(&["NO.SUCH.THING", "TRUE"]))
        .expect("configure");
    assert_eq!(pool(&interp).len(), 1);
    assert!(pool_has_name(&interp, "TRUE"));
}

#[test]
fn erc_generators_activate_by_plain_name() {
    let mut interp = Interpreter::new();
    interp
        .set_instructions(&names(&["INTEGER.ERC", "FLOAT.ERC"]))
        .expect("configure");
    assert!(pool(&interp).contains(&AtomGenerator::IntErc));
    assert!(pool(&interp).contains(&AtomGenerator::FloatErc));
}

// ══════════════════════════════════════════════════════════════════════════════
// Wildcards
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn registered_integer_expands_to_all_integer_prefixed_instructions() {
    let mut interp = Interpreter::new();
    interp
        .set_instructions(&names(&["REGISTERED.INTEGER"]))
        .expect("configure");
    // 8 arithmetic/comparison ops + 6 stack manipulators.
    assert_eq!(pool(&interp).len(), 14);
    assert!(pool_has_name(&interp, "INTEGER.+"));
    assert!(pool_has_name(&interp, "INTEGER.STACKDEPTH"));
    // The ephemeral-constant generator has no instruction entry, so the
    // wildcard never picks it up.
    assert!(!pool(&interp).contains(&AtomGenerator::IntErc));
}

#[test]
fn registered_boolean_always_includes_the_literals() {
    let mut interp = Interpreter::new();
    interp
        .set_instructions(&names(&["REGISTERED.BOOLEAN"]))
        .expect("configure");
    assert!(pool_has_name(&interp, "TRUE"));
    assert!(pool_has_name(&interp, "FALSE"));
    // 6 stack manipulators + the two literals.
    assert_eq!(pool(&interp).len(), 8);
}

#[test]
fn wildcard_matches_by_plain_prefix_not_by_type() {
    let mut interp = Interpreter::new();
    interp.add_instruction("INTEGERFOO", Noop);
    interp
        .set_instructions(&names(&["REGISTERED.INTEGER"]))
        .expect("configure");
    assert!(pool_has_name(&interp, "INTEGERFOO"));
    assert_eq!(pool(&interp).len(), 15);
}

#[test]
fn unknown_wildcard_type_is_skipped_not_fatal() {
    let mut interp = Interpreter::new();
    interp
        .set_instructions(&names(&["REGISTERED.WIDGET"]))
        .expect("configure");
    assert!(pool(&interp).is_empty());
}

#[test]
fn registered_frame_expands_to_frame_instructions() {
    let mut interp = Interpreter::new();
    interp
        .set_instructions(&names(&["REGISTERED.FRAME"]))
        .expect("configure");
    assert_eq!(pool(&interp).len(), 2);
    assert!(pool_has_name(&interp, "FRAME.PUSH"));
    assert!(pool_has_name(&interp, "FRAME.POP"));
}

// ══════════════════════════════════════════════════════════════════════════════
// Failure atomicity
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn non_name_element_fails_the_whole_call() {
    let mut interp = Interpreter::new();
    let result = interp.set_instructions(&Program::from(vec![
        Atom::name("TRUE"),
        Atom::Int(3),
    ]));
    assert!(matches!(result, Err(InterpError::InvalidInstructionList(_))));
}

#[test]
fn failed_configuration_leaves_previous_pool_active() {
    let mut interp = Interpreter::new();
    interp.set_instructions(&names(&["TRUE"])).expect("configure");
    let result = interp.set_instructions(&Program::from(vec![Atom::Float(1.0)]));
    assert!(result.is_err());
    assert_eq!(pool(&interp).len(), 1);
    assert!(pool_has_name(&interp, "TRUE"));
}

// ══════════════════════════════════════════════════════════════════════════════
// Custom instructions and the pool
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn add_instruction_activates_immediately() {
    let mut interp = Interpreter::new();
    interp.set_instructions(&names(&["TRUE"])).expect("configure");
    interp.add_instruction("MY.OP", Noop);
    assert_eq!(pool(&interp).len(), 2);
    assert!(pool_has_name(&interp, "MY.OP"));
}

#[test]
fn reconfiguration_rebuilds_the_pool_from_scratch() {
    let mut interp = Interpreter::new();
    interp.add_instruction("MY.OP", Noop);
    interp.set_instructions(&names(&["TRUE"])).expect("configure");
    assert_eq!(pool(&interp).len(), 1);
    assert!(!pool_has_name(&interp, "MY.OP"));
    // The instruction stays defined and can be re-activated by name.
    interp.set_instructions(&names(&["MY.OP"])).expect("configure");
    assert!(pool_has_name(&interp, "MY.OP"));
}
