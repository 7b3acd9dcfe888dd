//! Branch state: the formulas assumed on a tableau branch and the formulas still owed expansion.
//!
//! Both are persistent lists. Extending a branch or queue produces a new value sharing its tail
//! with the original, so alternatives explored after a failed one start from the unmodified state.
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use tableau_formula::Expr;

use crate::classify::{Branchiness, Tag, TypeRegistry};
use crate::error::TableauError;

struct Node {
    expr: Expr,
    next: Option<Rc<Node>>,
}

/// Immutable singly linked list of expressions with shared tails.
#[derive(Clone, Default)]
pub struct List {
    head: Option<Rc<Node>>,
    len: usize,
}

impl List {
    /// Create an empty list.
    pub fn new() -> List {
        List::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// A new list with `expr` in front of this one.
    pub fn prepend(&self, expr: Expr) -> List {
        List {
            head: Some(Rc::new(Node {
                expr,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Iterate from the front of the list.
    pub fn iter(&self) -> Iter {
        Iter {
            node: self.head.as_deref(),
        }
    }

    /// Whether the list contains a structurally equal expression.
    pub fn contains(&self, expr: &Expr) -> bool {
        self.iter().any(|item| item == expr)
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Builds a list with the same front to back order as the iterator.
impl std::iter::FromIterator<Expr> for List {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> List {
        let items: Vec<Expr> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(List::new(), |list, expr| list.prepend(expr))
    }
}

/// Iterator over a [`List`].
pub struct Iter<'a> {
    node: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<&'a Expr> {
        let node = self.node?;
        self.node = node.next.as_deref();
        Some(&node.expr)
    }
}

impl Drop for List {
    fn drop(&mut self) {
        // Unlink uniquely owned nodes iteratively, long lists would overflow the stack otherwise.
        let mut next = self.head.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

/// Formulas assumed true on the current branch, most recent first.
#[derive(Clone, Default, Debug)]
pub struct Branch {
    formulas: List,
}

impl Branch {
    /// A branch containing only `root`.
    pub fn new(root: Expr) -> Branch {
        Branch {
            formulas: List::new().prepend(root),
        }
    }

    /// A new branch extended by `exprs`, leaving `self` untouched.
    pub fn extend<'a>(&self, exprs: impl IntoIterator<Item = &'a Expr>) -> Branch {
        let formulas = exprs
            .into_iter()
            .fold(self.formulas.clone(), |list, expr| list.prepend(expr.clone()));
        Branch { formulas }
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub fn contains(&self, expr: &Expr) -> bool {
        self.formulas.contains(expr)
    }

    /// Formulas in the order they were added.
    pub fn formulas(&self) -> Vec<&Expr> {
        let mut formulas: Vec<_> = self.formulas.iter().collect();
        formulas.reverse();
        formulas
    }
}

/// Multiset of compound formulas not yet expanded on the current branch.
pub type Queue = List;

/// Whether `branch` already contains the negation of `candidate`.
///
/// That is, `¬candidate` is on the branch, or `candidate` is `¬x` and `x` is on the branch.
pub fn has_conflict(candidate: &Expr, branch: &Branch) -> bool {
    branch.formulas.iter().any(|expr| contradicts(candidate, expr))
}

fn contradicts(a: &Expr, b: &Expr) -> bool {
    a.negated() == Some(b) || b.negated() == Some(a)
}

/// Whether adding all of `candidates` to `branch` introduces a contradiction.
///
/// Each candidate is checked against the branch and against the candidates before it, in order,
/// stopping at the first conflict.
pub fn any_conflict(candidates: &[Expr], branch: &Branch) -> bool {
    candidates.iter().enumerate().any(|(index, candidate)| {
        has_conflict(candidate, branch)
            || candidates[..index]
                .iter()
                .any(|earlier| contradicts(candidate, earlier))
    })
}

/// The atoms and negated atoms among `exprs`, without duplicates, in order of first occurrence.
pub fn collect_atoms<'a>(
    types: &TypeRegistry,
    exprs: impl IntoIterator<Item = &'a Expr>,
) -> Result<Vec<Expr>, TableauError> {
    let mut seen = FxHashSet::default();
    let mut atoms = vec![];
    for expr in exprs {
        if types.classify(Tag::Atom, expr)? && seen.insert(expr) {
            atoms.push(expr.clone());
        }
    }
    Ok(atoms)
}

/// The expressions among `exprs` that are not atoms or negated atoms, in order.
pub fn collect_non_atoms<'a>(
    types: &TypeRegistry,
    exprs: impl IntoIterator<Item = &'a Expr>,
) -> Result<Vec<Expr>, TableauError> {
    let mut non_atoms = vec![];
    for expr in exprs {
        if !types.classify(Tag::Atom, expr)? {
            non_atoms.push(expr.clone());
        }
    }
    Ok(non_atoms)
}

/// `queue` with `expr` in front, unless `expr` is an atom or a negated atom.
pub fn enqueue_if_compound(
    types: &TypeRegistry,
    expr: &Expr,
    queue: &Queue,
) -> Result<Queue, TableauError> {
    if types.classify(Tag::Atom, expr)? {
        Ok(queue.clone())
    } else {
        Ok(queue.prepend(expr.clone()))
    }
}

/// Ranks tried by [`pick_next`], most preferred first.
const PICK_ORDER: [Branchiness; 3] = [0, 1, 2];

/// Choose the next formula to expand.
///
/// Picks the first formula of the lowest rank in [`PICK_ORDER`], so non-branching expansions
/// happen before branching ones. Returns it together with the queue minus every copy of it, or
/// `None` if the queue is empty.
pub fn pick_next(
    types: &TypeRegistry,
    queue: &Queue,
) -> Result<Option<(Expr, Queue)>, TableauError> {
    let ranks: Vec<(Option<Branchiness>, &Expr)> = queue
        .iter()
        .map(|expr| (types.rank_of(expr), expr))
        .collect();

    let chosen = PICK_ORDER.iter().find_map(|&wanted| {
        ranks
            .iter()
            .find(|&&(rank, _)| rank == Some(wanted))
            .map(|&(_, expr)| expr.clone())
    });

    let chosen = match (chosen, ranks.first()) {
        (Some(chosen), _) => chosen,
        (None, Some(&(_, unranked))) => {
            return Err(TableauError::UnrankedFormula(unranked.clone()));
        }
        (None, None) => return Ok(None),
    };

    let remainder = queue.iter().filter(|&expr| *expr != chosen).cloned().collect();

    Ok(Some((chosen, remainder)))
}
