//! Atoms, connectives and expressions.
use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// An indivisible propositional variable.
///
/// Atoms are identified by their name. Two atoms with the same name are the same proposition.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Atom {
    name: String,
}

impl Atom {
    /// Creates an atom with the given name.
    pub fn new(name: impl Into<String>) -> Atom {
        Atom { name: name.into() }
    }

    /// The printed name of this atom.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A propositional connective.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Not,
    And,
    Or,
    Implies,
    Iff,
}

impl Op {
    /// Logical symbol used when displaying expressions.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Not => "¬",
            Op::And => "∧",
            Op::Or => "∨",
            Op::Implies => "→",
            Op::Iff => "↔",
        }
    }
}

/// A propositional formula as a tree of connectives over atoms.
///
/// `Not` takes exactly one operand, `Implies` and `Iff` exactly two and `And` and `Or` two or
/// more. The representation does not enforce this, see [`Expr::validate`].
///
/// Expressions are plain values compared by structure.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    Atom(Atom),
    Compound(Op, Vec<Expr>),
}

impl Expr {
    /// An atom with the given name.
    pub fn atom(name: impl Into<String>) -> Expr {
        Expr::Atom(Atom::new(name))
    }

    /// Negation of an expression.
    pub fn not(operand: Expr) -> Expr {
        Expr::Compound(Op::Not, vec![operand])
    }

    /// Conjunction of the given operands.
    pub fn and(operands: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Compound(Op::And, operands.into_iter().collect())
    }

    /// Disjunction of the given operands.
    pub fn or(operands: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Compound(Op::Or, operands.into_iter().collect())
    }

    /// Implication `premise → conclusion`.
    pub fn implies(premise: Expr, conclusion: Expr) -> Expr {
        Expr::Compound(Op::Implies, vec![premise, conclusion])
    }

    /// Biconditional `left ↔ right`.
    pub fn iff(left: Expr, right: Expr) -> Expr {
        Expr::Compound(Op::Iff, vec![left, right])
    }

    /// The connective of a compound expression.
    pub fn op(&self) -> Option<Op> {
        match self {
            Expr::Atom(_) => None,
            Expr::Compound(op, _) => Some(*op),
        }
    }

    /// Operands of a compound expression, empty for atoms.
    pub fn operands(&self) -> &[Expr] {
        match self {
            Expr::Atom(_) => &[],
            Expr::Compound(_, operands) => operands.as_slice(),
        }
    }

    /// The operand of a negation.
    pub fn negated(&self) -> Option<&Expr> {
        match self {
            Expr::Compound(Op::Not, operands) if operands.len() == 1 => Some(&operands[0]),
            _ => None,
        }
    }

    /// Whether this is a bare atom.
    pub fn is_atom(&self) -> bool {
        matches!(self, Expr::Atom(_))
    }

    /// The atom of a literal, i.e. of an atom or a negated atom.
    ///
    /// Returns `None` for all other expressions.
    pub fn literal_atom(&self) -> Option<&Atom> {
        match self {
            Expr::Atom(atom) => Some(atom),
            _ => match self.negated() {
                Some(Expr::Atom(atom)) => Some(atom),
                _ => None,
            },
        }
    }

    /// Distinct atoms occurring in this expression, in order of first occurrence.
    pub fn atoms(&self) -> Vec<&Atom> {
        let mut seen = FxHashSet::default();
        let mut atoms = vec![];
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                Expr::Atom(atom) => {
                    if seen.insert(atom) {
                        atoms.push(atom);
                    }
                }
                Expr::Compound(_, operands) => stack.extend(operands.iter().rev()),
            }
        }
        atoms
    }

    /// Number of connectives in this expression.
    pub fn connective_count(&self) -> usize {
        match self {
            Expr::Atom(_) => 0,
            Expr::Compound(_, operands) => {
                1 + operands.iter().map(Expr::connective_count).sum::<usize>()
            }
        }
    }

    /// Evaluates this expression under an assignment of truth values to atoms.
    ///
    /// Malformed `Not`, `Implies` and `Iff` nodes evaluate to false.
    pub fn eval(&self, assignment: &impl Fn(&Atom) -> bool) -> bool {
        match self {
            Expr::Atom(atom) => assignment(atom),
            Expr::Compound(op, operands) => match (op, &operands[..]) {
                (Op::Not, [operand]) => !operand.eval(assignment),
                (Op::And, _) => operands.iter().all(|operand| operand.eval(assignment)),
                (Op::Or, _) => operands.iter().any(|operand| operand.eval(assignment)),
                (Op::Implies, [premise, conclusion]) => {
                    !premise.eval(assignment) || conclusion.eval(assignment)
                }
                (Op::Iff, [left, right]) => left.eval(assignment) == right.eval(assignment),
                _ => false,
            },
        }
    }
}

impl From<Atom> for Expr {
    fn from(atom: Atom) -> Expr {
        Expr::Atom(atom)
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::not(self)
    }
}

/// Uses logical symbols and fully parenthesizes binary connectives.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Atom(atom) => fmt::Display::fmt(atom, f),
            Expr::Compound(Op::Not, operands) if operands.len() == 1 => {
                write!(f, "¬{}", operands[0])
            }
            Expr::Compound(Op::Not, operands) => {
                write!(f, "¬(")?;
                for (index, operand) in operands.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", operand)?;
                }
                write!(f, ")")
            }
            Expr::Compound(op, operands) => {
                write!(f, "(")?;
                for (index, operand) in operands.iter().enumerate() {
                    if index > 0 {
                        write!(f, " {} ", op.symbol())?;
                    }
                    write!(f, "{}", operand)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let [p, q, r] = atoms![p, q, r];
        let expr = Expr::implies(
            Expr::and(vec![p.clone(), !q.clone()]),
            Expr::iff(!!r.clone(), Expr::or(vec![p, q, r])),
        );
        assert_eq!(expr.to_string(), "((p ∧ ¬q) → (¬¬r ↔ (p ∨ q ∨ r)))");
    }

    #[test]
    fn literal_atom() {
        let [p, q] = atoms![p, q];
        assert_eq!(p.literal_atom(), Some(&Atom::new("p")));
        assert_eq!((!p.clone()).literal_atom(), Some(&Atom::new("p")));
        assert_eq!((!!p.clone()).literal_atom(), None);
        assert_eq!(Expr::and(vec![p, q]).literal_atom(), None);
    }

    #[test]
    fn atoms_in_first_occurrence_order() {
        let [p, q, r] = atoms![p, q, r];
        let expr = Expr::or(vec![
            Expr::and(vec![r.clone(), p.clone()]),
            !r,
            Expr::implies(q, p),
        ]);
        let names: Vec<_> = expr.atoms().into_iter().map(Atom::name).collect();
        assert_eq!(names, ["r", "p", "q"]);
    }

    #[test]
    fn eval_connectives() {
        let [p, q] = atoms![p, q];
        let p_only = |atom: &Atom| atom.name() == "p";

        assert!(p.eval(&p_only));
        assert!(!q.eval(&p_only));
        assert!(Expr::or(vec![p.clone(), q.clone()]).eval(&p_only));
        assert!(!Expr::and(vec![p.clone(), q.clone()]).eval(&p_only));
        assert!(!Expr::implies(p.clone(), q.clone()).eval(&p_only));
        assert!(Expr::implies(q.clone(), p.clone()).eval(&p_only));
        assert!(!Expr::iff(p.clone(), q.clone()).eval(&p_only));
        assert!(Expr::iff(!p, q).eval(&p_only));
    }

    #[test]
    fn connective_count() {
        let [p, q] = atoms![p, q];
        assert_eq!(p.connective_count(), 0);
        assert_eq!(Expr::not(Expr::and(vec![p, !q])).connective_count(), 3);
    }

    #[test]
    fn json_encoding() {
        let [p, q] = atoms![p, q];
        let expr = Expr::implies(p, !q);
        let json = serde_json::to_string(&expr).unwrap();
        assert_eq!(json, r#"["implies",["p",["not",["q"]]]]"#);
        let decoded: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, expr);
    }
}
