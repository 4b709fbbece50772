//! Canonical Dump
//!
//! The derived `Debug` output of the statement list. Field order follows
//! the declaration order in [`crate::ast`], so the text is stable for a
//! given tree.

use crate::ast::Program;

/// Single-line dump, e.g.
/// `[Loc { start: 0, end: 1, item: Expression { expression: ... } }]`
pub fn dump(program: &Program) -> String {
    format!("{:?}", program.body)
}

/// Indented dump
pub fn dump_pretty(program: &Program) -> String {
    format!("{:#?}", program.body)
}
