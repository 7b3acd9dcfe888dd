//! A [semantic tableau][tableau] prover for propositional logic. Given a formula built from
//! negation, conjunction, disjunction, implication and biconditional, it either finds an
//! assignment of the formula's atoms that makes it true or shows that none exists.
//!
//! Formulas need not be in any normal form. The prover expands them along tableau branches,
//! closing a branch as soon as it contains a formula and its negation, and returns the literals of
//! the first branch that stays open.
//!
//! [tableau]: https://en.wikipedia.org/wiki/Method_of_analytic_tableaux

pub mod branch;
pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod rules;
pub mod search;
pub mod solver;

pub use error::TableauError;
pub use model::Model;
pub use solver::{solve, Solver};
pub use tableau_formula::{Atom, Expr, Op};

pub mod formula {
    //! Expression trees.
    pub use tableau_formula::*;
}
