//! Assertion helpers for verifying lattice algebraic laws.
//!
//! Every law is checked over all pairs and triples of the given sample
//! elements, and all violations are reported together.
//!
//! ```
//! use sumac_ir::AccessKind;
//! use sumac_test_utils::lattice::assert_lattice_laws;
//!
//! assert_lattice_laws(&[None, Some(AccessKind::Read), Some(AccessKind::Modify)]);
//! ```

use std::fmt::{Debug, Write};

use sumac_ir::Lattice;

fn report(violations: Vec<String>) {
    if violations.is_empty() {
        return;
    }
    let mut msg = format!("{} lattice law violation(s):\n", violations.len());
    for (i, v) in violations.iter().enumerate() {
        let _ = writeln!(msg, "  {}. {}", i + 1, v);
    }
    panic!("{msg}");
}

/// Check join and meet laws, absorption, and that `is_subseteq` agrees with
/// both operations.
pub fn assert_lattice_laws<L: Lattice + PartialEq + Debug>(elements: &[L]) {
    let mut violations = Vec::new();
    check_operation_laws("join", elements, L::join, &mut violations);
    check_operation_laws("meet", elements, L::meet, &mut violations);
    check_absorption(elements, &mut violations);
    check_ordering_consistent(elements, &mut violations);
    report(violations);
}

fn check_operation_laws<L: PartialEq + Debug>(
    name: &str,
    elements: &[L],
    op: impl Fn(&L, &L) -> L,
    v: &mut Vec<String>,
) {
    for a in elements {
        if op(a, a) != *a {
            v.push(format!("{name} not idempotent on {a:?}"));
        }
        for b in elements {
            if op(a, b) != op(b, a) {
                v.push(format!("{name} not commutative on ({a:?}, {b:?})"));
            }
            for c in elements {
                if op(&op(a, b), c) != op(a, &op(b, c)) {
                    v.push(format!("{name} not associative on ({a:?}, {b:?}, {c:?})"));
                }
            }
        }
    }
}

fn check_absorption<L: Lattice + PartialEq + Debug>(elements: &[L], v: &mut Vec<String>) {
    for a in elements {
        for b in elements {
            if a.join(&a.meet(b)) != *a {
                v.push(format!("absorption violated: {a:?}.join({a:?}.meet({b:?})) != {a:?}"));
            }
            if a.meet(&a.join(b)) != *a {
                v.push(format!("absorption violated: {a:?}.meet({a:?}.join({b:?})) != {a:?}"));
            }
        }
    }
}

fn check_ordering_consistent<L: Lattice + PartialEq + Debug>(elements: &[L], v: &mut Vec<String>) {
    for a in elements {
        for b in elements {
            let sub = a.is_subseteq(b);
            if sub != (a.join(b) == *b) {
                v.push(format!("ordering inconsistent with join on ({a:?}, {b:?})"));
            }
            if sub != (a.meet(b) == *a) {
                v.push(format!("ordering inconsistent with meet on ({a:?}, {b:?})"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumac_ir::AccessKind;

    #[test]
    fn access_kind_lattice_laws() {
        assert_lattice_laws(&[AccessKind::Read, AccessKind::Modify]);
        assert_lattice_laws(&[None, Some(AccessKind::Read), Some(AccessKind::Modify)]);
    }
}
