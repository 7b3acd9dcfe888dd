//! Satisfying assignments.
use std::fmt;

use tableau_formula::{Atom, Expr};

/// Atoms and negated atoms of an open tableau branch.
///
/// A bare atom is assigned true, a negated atom false. Atoms not mentioned are unconstrained. The
/// literals are sorted by atom name and contain every atom at most once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    literals: Vec<Expr>,
}

fn atom_name(literal: &Expr) -> &str {
    literal.literal_atom().map_or("", Atom::name)
}

impl Model {
    /// Builds a model from the literals of a branch, sorting them by atom name.
    pub fn from_literals(mut literals: Vec<Expr>) -> Model {
        literals.sort_by(|a, b| atom_name(a).cmp(atom_name(b)));
        Model { literals }
    }

    pub fn literals(&self) -> &[Expr] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expr> {
        self.literals.iter()
    }

    /// Truth value assigned to `atom`, `None` if unconstrained.
    pub fn value(&self, atom: &Atom) -> Option<bool> {
        self.literals
            .iter()
            .find(|literal| literal.literal_atom() == Some(atom))
            .map(|literal| literal.is_atom())
    }

    /// Whether `formula` holds when unconstrained atoms are false.
    pub fn satisfies(&self, formula: &Expr) -> bool {
        formula.eval(&|atom| self.value(atom).unwrap_or(false))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, literal) in self.literals.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tableau_formula::atoms;

    #[test]
    fn sorted_by_atom_name() {
        let [a, b, c] = atoms![a, b, c];
        let model = Model::from_literals(vec![!c.clone(), a.clone(), !b.clone()]);
        assert_eq!(model.literals(), [a, !b, !c]);
        assert_eq!(model.to_string(), "a ¬b ¬c");
    }

    #[test]
    fn values() {
        let [p, q, r] = atoms![p, q, r];
        let model = Model::from_literals(vec![p.clone(), !q.clone()]);

        assert_eq!(model.value(&Atom::new("p")), Some(true));
        assert_eq!(model.value(&Atom::new("q")), Some(false));
        assert_eq!(model.value(&Atom::new("r")), None);

        assert!(model.satisfies(&Expr::and(vec![p.clone(), !q.clone()])));
        assert!(model.satisfies(&Expr::implies(r.clone(), q.clone())));
        assert!(!model.satisfies(&Expr::or(vec![q, r])));
    }
}
