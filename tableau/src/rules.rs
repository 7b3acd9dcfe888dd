//! Tableau expansion rules.
//!
//! A rule turns a formula into the alternatives that can make it true. Each alternative is a set
//! of formulas added to the branch together. Rules with a single alternative are non-branching
//! (alpha) rules, the others branching (beta) rules whose alternatives are tried in order.
use smallvec::{smallvec, SmallVec};

use tableau_formula::{Expr, Op};

use crate::classify::Tag;

/// Formulas added to a branch together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alternative {
    pub formulas: SmallVec<[Expr; 2]>,
    /// Whether the formulas are checked for conflicts before being added.
    pub checked: bool,
}

impl Alternative {
    fn checked(formulas: SmallVec<[Expr; 2]>) -> Alternative {
        Alternative {
            formulas,
            checked: true,
        }
    }
}

/// Result of applying a rule to a formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    pub alternatives: SmallVec<[Alternative; 2]>,
}

impl Expansion {
    /// Whether the search has to try more than one alternative.
    pub fn is_branching(&self) -> bool {
        self.alternatives.len() > 1
    }
}

/// An expansion rule.
///
/// Returns `None` if the formula does not have the shape the rule expects.
pub type Rule = fn(&Expr) -> Option<Expansion>;

/// Ordered registry of expansion rules.
///
/// The first rule whose tag matches a formula is the one applied.
#[derive(Default)]
pub struct RuleRegistry {
    entries: Vec<(Tag, Rule)>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> RuleRegistry {
        RuleRegistry::default()
    }

    /// Registry of the built-in rules.
    pub fn builtin() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        registry.register(Tag::DoubleNot, double_not);
        registry.register(Tag::SententialAnd, and);
        registry.register(Tag::NotAnd, not_and);
        registry.register(Tag::SententialOr, or);
        registry.register(Tag::NotOr, not_or);
        registry.register(Tag::SententialImplication, implication);
        registry.register(Tag::NotImplication, not_implication);
        registry.register(Tag::SententialBiconditional, biconditional);
        registry.register(Tag::NotBiconditional, not_biconditional);
        registry
    }

    /// Register a rule for a tag.
    ///
    /// Registering a tag again replaces its rule but keeps its original position.
    pub fn register(&mut self, tag: Tag, rule: Rule) {
        match self.entries.iter_mut().find(|(known, _)| *known == tag) {
            Some(entry) => entry.1 = rule,
            None => self.entries.push((tag, rule)),
        }
    }

    /// Registered rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, Rule)> + '_ {
        self.entries.iter().cloned()
    }
}

fn operands_of(expr: &Expr, op: Op) -> Option<&[Expr]> {
    match expr {
        Expr::Compound(found, operands) if *found == op => Some(operands.as_slice()),
        _ => None,
    }
}

fn negated_operands_of(expr: &Expr, op: Op) -> Option<&[Expr]> {
    operands_of(expr.negated()?, op)
}

fn pair(operands: &[Expr]) -> Option<(&Expr, &Expr)> {
    match operands {
        [left, right] => Some((left, right)),
        _ => None,
    }
}

fn negate(expr: &Expr) -> Expr {
    Expr::not(expr.clone())
}

/// `¬¬p` gives `p`.
///
/// A compound `p` is added without a conflict check, the literals of its expansion are checked.
/// A literal `p` is checked like the result of any other rule, as `¬¬¬q` next to `q` only
/// contradicts the branch once `¬q` is added.
pub fn double_not(expr: &Expr) -> Option<Expansion> {
    let inner = expr.negated()?.negated()?;
    Some(Expansion {
        alternatives: smallvec![Alternative {
            formulas: smallvec![inner.clone()],
            checked: inner.literal_atom().is_some(),
        }],
    })
}

/// `p₁ ∧ … ∧ pₙ` gives all of `p₁ … pₙ`.
pub fn and(expr: &Expr) -> Option<Expansion> {
    let operands = operands_of(expr, Op::And)?;
    Some(Expansion {
        alternatives: smallvec![Alternative::checked(operands.iter().cloned().collect())],
    })
}

/// `¬(p₁ ∧ … ∧ pₙ)` gives one of `¬p₁ … ¬pₙ`.
pub fn not_and(expr: &Expr) -> Option<Expansion> {
    let operands = negated_operands_of(expr, Op::And)?;
    Some(Expansion {
        alternatives: operands
            .iter()
            .map(|operand| Alternative::checked(smallvec![negate(operand)]))
            .collect(),
    })
}

/// `p₁ ∨ … ∨ pₙ` gives one of `p₁ … pₙ`.
pub fn or(expr: &Expr) -> Option<Expansion> {
    let operands = operands_of(expr, Op::Or)?;
    Some(Expansion {
        alternatives: operands
            .iter()
            .map(|operand| Alternative::checked(smallvec![operand.clone()]))
            .collect(),
    })
}

/// `¬(p₁ ∨ … ∨ pₙ)` gives all of `¬p₁ … ¬pₙ`.
pub fn not_or(expr: &Expr) -> Option<Expansion> {
    let operands = negated_operands_of(expr, Op::Or)?;
    Some(Expansion {
        alternatives: smallvec![Alternative::checked(operands.iter().map(negate).collect())],
    })
}

/// `p → q` gives `¬p` or `q`.
pub fn implication(expr: &Expr) -> Option<Expansion> {
    let (premise, conclusion) = pair(operands_of(expr, Op::Implies)?)?;
    Some(Expansion {
        alternatives: smallvec![
            Alternative::checked(smallvec![negate(premise)]),
            Alternative::checked(smallvec![conclusion.clone()]),
        ],
    })
}

/// `¬(p → q)` gives `p` and `¬q`.
pub fn not_implication(expr: &Expr) -> Option<Expansion> {
    let (premise, conclusion) = pair(negated_operands_of(expr, Op::Implies)?)?;
    Some(Expansion {
        alternatives: smallvec![Alternative::checked(smallvec![
            premise.clone(),
            negate(conclusion)
        ])],
    })
}

/// `p ↔ q` gives `p` and `q`, or `¬p` and `¬q`.
pub fn biconditional(expr: &Expr) -> Option<Expansion> {
    let (left, right) = pair(operands_of(expr, Op::Iff)?)?;
    Some(Expansion {
        alternatives: smallvec![
            Alternative::checked(smallvec![left.clone(), right.clone()]),
            Alternative::checked(smallvec![negate(left), negate(right)]),
        ],
    })
}

/// `¬(p ↔ q)` gives `p` and `¬q`, or `¬p` and `q`.
pub fn not_biconditional(expr: &Expr) -> Option<Expansion> {
    let (left, right) = pair(negated_operands_of(expr, Op::Iff)?)?;
    Some(Expansion {
        alternatives: smallvec![
            Alternative::checked(smallvec![left.clone(), negate(right)]),
            Alternative::checked(smallvec![negate(left), right.clone()]),
        ],
    })
}
