//! Operand arity checks.
use thiserror::Error;

use crate::expr::{Expr, Op};

/// A compound expression with the wrong number of operands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{}' takes {} operand(s) but was given {}: {}", op.symbol(), expected, found, expr)]
pub struct FormulaError {
    pub op: Op,
    pub expected: Arity,
    pub found: usize,
    pub expr: Expr,
}

/// Number of operands accepted by a connective.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn admits(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

impl Op {
    /// Number of operands this connective accepts.
    pub fn arity(self) -> Arity {
        match self {
            Op::Not => Arity::Exactly(1),
            Op::And | Op::Or => Arity::AtLeast(2),
            Op::Implies | Op::Iff => Arity::Exactly(2),
        }
    }
}

impl Expr {
    /// Checks the operand count of every compound in this expression.
    ///
    /// Reports the outermost malformed compound, scanning operands left to right.
    pub fn validate(&self) -> Result<(), FormulaError> {
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            if let Expr::Compound(op, operands) = expr {
                let expected = op.arity();
                if !expected.admits(operands.len()) {
                    return Err(FormulaError {
                        op: *op,
                        expected,
                        found: operands.len(),
                        expr: expr.clone(),
                    });
                }
                stack.extend(operands.iter().rev());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed() {
        let [p, q, r] = atoms![p, q, r];
        let expr = Expr::iff(
            Expr::or(vec![p.clone(), q.clone(), r]),
            !Expr::implies(p, q),
        );
        assert_eq!(expr.validate(), Ok(()));
    }

    #[test]
    fn unary_and() {
        let [p, q] = atoms![p, q];
        let bad = Expr::and(vec![p]);
        let err = Expr::implies(q, bad.clone()).validate().unwrap_err();
        assert_eq!(err.op, Op::And);
        assert_eq!(err.expected, Arity::AtLeast(2));
        assert_eq!(err.found, 1);
        assert_eq!(err.expr, bad);
    }

    #[test]
    fn binary_not() {
        let [p, q] = atoms![p, q];
        let err = Expr::Compound(Op::Not, vec![p, q]).validate().unwrap_err();
        assert_eq!(err.expected, Arity::Exactly(1));
        assert_eq!(err.to_string(), "'¬' takes 1 operand(s) but was given 2: ¬(p, q)");
    }

    #[test]
    fn outermost_reported_first() {
        let [p] = atoms![p];
        let inner = Expr::Compound(Op::Iff, vec![p]);
        let outer = Expr::Compound(Op::Or, vec![inner]);
        assert_eq!(outer.validate().unwrap_err().op, Op::Or);
    }
}
