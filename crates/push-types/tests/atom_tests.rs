//! Tests for the shared program data model.

use push_types::{Atom, Program};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// `(1 2.5 INTEGER.+ (3 4))`
fn sample_program() -> Program {
    Program::from(vec![
        Atom::Int(1),
        Atom::Float(2.5),
        Atom::name("INTEGER.+"),
        Atom::Program(Program::from(vec![Atom::Int(3), Atom::Int(4)])),
    ])
}

// ══════════════════════════════════════════════════════════════════════════════
// Construction & access
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn empty_program() {
    let p = Program::new();
    assert!(p.is_empty());
    assert_eq!(p.len(), 0);
    assert_eq!(p.get(0), None);
}

#[test]
fn push_preserves_insertion_order() {
    let mut p = Program::new();
    p.push(Atom::Int(10));
    p.push(Atom::name("TRUE"));
    assert_eq!(p.len(), 2);
    assert_eq!(p.get(0), Some(&Atom::Int(10)));
    assert_eq!(p.get(1), Some(&Atom::name("TRUE")));
}

#[test]
fn programs_nest_arbitrarily() {
    let inner = Program::from(vec![Atom::Int(1)]);
    let middle = Program::from(vec![Atom::Program(inner)]);
    let outer = Program::from(vec![Atom::Program(middle)]);
    assert_eq!(outer.len(), 1);
    assert_eq!(outer.points(), 4);
}

#[test]
fn as_name_only_for_names() {
    assert_eq!(Atom::name("CODE.QUOTE").as_name(), Some("CODE.QUOTE"));
    assert_eq!(Atom::Int(1).as_name(), None);
    assert_eq!(Atom::Program(Program::new()).as_name(), None);
}

// ══════════════════════════════════════════════════════════════════════════════
// Points
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn points_counts_every_atom_and_program_node() {
    // Root + 3 leaves + nested node + its 2 leaves.
    assert_eq!(sample_program().points(), 7);
}

#[test]
fn points_of_empty_program_is_one() {
    assert_eq!(Program::new().points(), 1);
    assert_eq!(Atom::Int(5).points(), 1);
}

// ══════════════════════════════════════════════════════════════════════════════
// Display
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn display_parenthesized_space_separated() {
    assert_eq!(sample_program().to_string(), "(1 2.5 INTEGER.+ (3 4))");
}

#[test]
fn display_empty_program() {
    assert_eq!(Program::new().to_string(), "()");
}

// ══════════════════════════════════════════════════════════════════════════════
// Serialization
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn serde_round_trip() {
    let p = sample_program();
    let json = serde_json::to_string(&p).expect("serialize");
    let back: Program = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, p);
}
