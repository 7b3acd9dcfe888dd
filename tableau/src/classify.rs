//! Formula types and their expansion priority.
//!
//! Each type is identified by a [`Tag`] and recognized by a predicate. Predicates are independent
//! of each other and may overlap, e.g. `¬¬p` is both a [`Tag::SententialNot`] and a
//! [`Tag::DoubleNot`]. Overlaps are resolved by registration order: whoever asks for "the" type of
//! an expression gets the first registered tag that matches.
use std::fmt;

use tableau_formula::{Expr, Op};

use crate::error::TableauError;

/// Expansion priority of a formula type.
///
/// Non-branching types get 0 or 1, branching types 2. Atoms get -1 and are never expanded.
pub type Branchiness = i8;

/// Recognition predicate of a formula type.
pub type Predicate = fn(&Expr) -> bool;

/// Formula type identifier.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Tag {
    /// Wildcard, matches every expression.
    Any,
    SententialNot,
    DoubleNot,
    SententialAnd,
    NotAnd,
    SententialOr,
    NotOr,
    SententialImplication,
    NotImplication,
    SententialBiconditional,
    NotBiconditional,
    Atom,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Any => "*",
            Tag::SententialNot => "sentential-not",
            Tag::DoubleNot => "double-not",
            Tag::SententialAnd => "sentential-and",
            Tag::NotAnd => "not-and",
            Tag::SententialOr => "sentential-or",
            Tag::NotOr => "not-or",
            Tag::SententialImplication => "sentential-implication",
            Tag::NotImplication => "not-implication",
            Tag::SententialBiconditional => "sentential-biconditional",
            Tag::NotBiconditional => "not-biconditional",
            Tag::Atom => "atom",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recognition predicates of the built-in formula types.
pub mod predicate {
    use super::*;

    fn compound(expr: &Expr, op: Op, min: usize, max: usize) -> bool {
        match expr {
            Expr::Compound(found, operands) => {
                *found == op && operands.len() >= min && operands.len() <= max
            }
            Expr::Atom(_) => false,
        }
    }

    /// A negation whose operand satisfies `inner`.
    fn negation_of(expr: &Expr, inner: Predicate) -> bool {
        sentential_not(expr) && expr.operands().first().map_or(false, inner)
    }

    pub fn sentential_not(expr: &Expr) -> bool {
        compound(expr, Op::Not, 1, 1)
    }

    pub fn double_not(expr: &Expr) -> bool {
        negation_of(expr, sentential_not)
    }

    pub fn sentential_and(expr: &Expr) -> bool {
        compound(expr, Op::And, 2, usize::max_value())
    }

    pub fn not_and(expr: &Expr) -> bool {
        negation_of(expr, sentential_and)
    }

    pub fn sentential_or(expr: &Expr) -> bool {
        compound(expr, Op::Or, 2, usize::max_value())
    }

    pub fn not_or(expr: &Expr) -> bool {
        negation_of(expr, sentential_or)
    }

    pub fn sentential_implication(expr: &Expr) -> bool {
        compound(expr, Op::Implies, 2, 2)
    }

    pub fn not_implication(expr: &Expr) -> bool {
        negation_of(expr, sentential_implication)
    }

    pub fn sentential_biconditional(expr: &Expr) -> bool {
        compound(expr, Op::Iff, 2, 2)
    }

    pub fn not_biconditional(expr: &Expr) -> bool {
        negation_of(expr, sentential_biconditional)
    }

    /// A bare atom or a negated bare atom.
    pub fn atom(expr: &Expr) -> bool {
        expr.is_atom() || negation_of(expr, Expr::is_atom)
    }
}

struct TypeEntry {
    tag: Tag,
    predicate: Predicate,
    rank: Branchiness,
}

/// Ordered registry of formula types.
///
/// The registry is filled once and afterwards only borrowed immutably by the search.
#[derive(Default)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> TypeRegistry {
        TypeRegistry::default()
    }

    /// Registry of the built-in types.
    ///
    /// Atoms come first so negated atoms never count as negations still owing an expansion, and
    /// the bare [`Tag::SententialNot`] comes last so it only ranks negations nothing else
    /// recognizes.
    pub fn builtin() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(Tag::Atom, predicate::atom, -1);
        registry.register(Tag::DoubleNot, predicate::double_not, 0);
        registry.register(Tag::SententialAnd, predicate::sentential_and, 1);
        registry.register(Tag::NotOr, predicate::not_or, 1);
        registry.register(Tag::NotImplication, predicate::not_implication, 1);
        registry.register(Tag::SententialOr, predicate::sentential_or, 2);
        registry.register(Tag::NotAnd, predicate::not_and, 2);
        registry.register(Tag::SententialImplication, predicate::sentential_implication, 2);
        registry.register(Tag::SententialBiconditional, predicate::sentential_biconditional, 2);
        registry.register(Tag::NotBiconditional, predicate::not_biconditional, 2);
        registry.register(Tag::SententialNot, predicate::sentential_not, 5);
        registry
    }

    /// Register a formula type.
    ///
    /// Registering a tag again replaces its predicate and rank but keeps its original position.
    pub fn register(&mut self, tag: Tag, predicate: Predicate, rank: Branchiness) {
        match self.entries.iter_mut().find(|entry| entry.tag == tag) {
            Some(entry) => {
                entry.predicate = predicate;
                entry.rank = rank;
            }
            None => self.entries.push(TypeEntry {
                tag,
                predicate,
                rank,
            }),
        }
    }

    /// Whether `expr` is of the type `tag`.
    ///
    /// [`Tag::Any`] matches everything, whether registered or not.
    pub fn classify(&self, tag: Tag, expr: &Expr) -> Result<bool, TableauError> {
        if tag == Tag::Any {
            return Ok(true);
        }
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| (entry.predicate)(expr))
            .ok_or(TableauError::UnknownTag(tag))
    }

    /// Branchiness of the first registered type matching `expr`.
    pub fn rank_of(&self, expr: &Expr) -> Option<Branchiness> {
        self.first_match(expr).map(|entry| entry.rank)
    }

    /// First registered type matching `expr`.
    pub fn tag_of(&self, expr: &Expr) -> Option<Tag> {
        self.first_match(expr).map(|entry| entry.tag)
    }

    /// Registered tags in registration order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.entries.iter().map(|entry| entry.tag)
    }

    fn first_match(&self, expr: &Expr) -> Option<&TypeEntry> {
        self.entries.iter().find(|entry| (entry.predicate)(expr))
    }
}
