//! Solver errors.
use thiserror::Error;

use tableau_formula::{Expr, FormulaError};

use crate::classify::Tag;

/// Failures of the prover.
///
/// None of these signal unsatisfiability, which is an ordinary result. They indicate malformed
/// input or an inconsistent type or rule registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableauError {
    #[error("Invalid formula: {0}")]
    InvalidFormula(#[from] FormulaError),
    #[error("Type tag {0} was never registered")]
    UnknownTag(Tag),
    #[error("No expansion rule applies to {0}")]
    NoApplicableRule(Expr),
    #[error("Pending formula {0} has no branchiness rank")]
    UnrankedFormula(Expr),
    #[error("Model {model} does not satisfy {formula}")]
    SelfCheckFailed { formula: Expr, model: String },
}
