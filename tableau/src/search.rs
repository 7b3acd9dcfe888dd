//! Depth-first tableau search.
//!
//! The search repeatedly picks a pending formula, expands it with the first matching rule and
//! tries the resulting alternatives left to right. The first branch that runs out of pending
//! formulas yields the model.
use log::trace;

use tableau_formula::Expr;

use crate::branch::{any_conflict, collect_atoms, enqueue_if_compound, pick_next, Branch, Queue};
use crate::classify::TypeRegistry;
use crate::error::TableauError;
use crate::rules::{Alternative, Expansion, RuleRegistry};

/// Counters describing a search.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of rule applications.
    pub expansions: u64,
    /// Number of alternatives added to a branch.
    pub alternatives: u64,
    /// Number of alternatives discarded because they contradict the branch.
    pub pruned: u64,
    /// Number of expanded formulas none of whose alternatives led to a model.
    pub dead_ends: u64,
    /// Largest number of nested expansions.
    pub max_depth: usize,
}

/// Routes pending formulas to their expansion rules.
pub struct Dispatcher<'a> {
    types: &'a TypeRegistry,
    rules: &'a RuleRegistry,
    stats: SearchStats,
}

/// A partially explored node of the explicit search stack.
struct Frame {
    rest: Queue,
    branch: Branch,
    alternatives: smallvec::IntoIter<[Alternative; 2]>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(types: &'a TypeRegistry, rules: &'a RuleRegistry) -> Dispatcher<'a> {
        Dispatcher {
            types,
            rules,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search for a model of everything on `branch`, expanding the formulas in `queue`.
    ///
    /// Returns the atoms of the first open branch, or `None` if every branch closes.
    pub fn expand(
        &mut self,
        queue: Queue,
        branch: Branch,
    ) -> Result<Option<Vec<Expr>>, TableauError> {
        self.expand_at(queue, branch, 0)
    }

    fn expand_at(
        &mut self,
        queue: Queue,
        branch: Branch,
        depth: usize,
    ) -> Result<Option<Vec<Expr>>, TableauError> {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let (expr, rest) = match pick_next(self.types, &queue)? {
            Some(next) => next,
            None => return Ok(Some(collect_atoms(self.types, branch.formulas())?)),
        };

        let expansion = self.dispatch(&expr)?;

        for alternative in expansion.alternatives.iter() {
            if let Some((queue, branch)) = self.extend(alternative, &rest, &branch)? {
                if let Some(model) = self.expand_at(queue, branch, depth + 1)? {
                    return Ok(Some(model));
                }
            }
        }

        self.stats.dead_ends += 1;
        Ok(None)
    }

    /// Same search as [`expand`](Dispatcher::expand), using a heap allocated stack.
    pub fn expand_iterative(
        &mut self,
        queue: Queue,
        branch: Branch,
    ) -> Result<Option<Vec<Expr>>, TableauError> {
        let mut stack: Vec<Frame> = vec![];
        let mut next = Some((queue, branch));

        loop {
            if let Some((queue, branch)) = next.take() {
                self.stats.max_depth = self.stats.max_depth.max(stack.len());

                match pick_next(self.types, &queue)? {
                    Some((expr, rest)) => {
                        let expansion = self.dispatch(&expr)?;
                        stack.push(Frame {
                            rest,
                            branch,
                            alternatives: expansion.alternatives.into_iter(),
                        });
                    }
                    None => return Ok(Some(collect_atoms(self.types, branch.formulas())?)),
                }
            }

            let frame = match stack.last_mut() {
                Some(frame) => frame,
                None => return Ok(None),
            };

            match frame.alternatives.next() {
                Some(alternative) => {
                    next = self.extend(&alternative, &frame.rest, &frame.branch)?;
                }
                None => {
                    self.stats.dead_ends += 1;
                    stack.pop();
                }
            }
        }
    }

    /// Apply the first registered rule whose type matches `expr`.
    fn dispatch(&mut self, expr: &Expr) -> Result<Expansion, TableauError> {
        for (tag, rule) in self.rules.iter() {
            if self.types.classify(tag, expr)? {
                let expansion =
                    rule(expr).ok_or_else(|| TableauError::NoApplicableRule(expr.clone()))?;
                self.stats.expansions += 1;
                if expansion.is_branching() {
                    trace!(
                        "{} {}: branching into {} alternatives",
                        tag,
                        expr,
                        expansion.alternatives.len()
                    );
                } else {
                    trace!("{} {}", tag, expr);
                }
                return Ok(expansion);
            }
        }
        Err(TableauError::NoApplicableRule(expr.clone()))
    }

    /// The queue and branch after adding an alternative, or `None` if it contradicts the branch.
    fn extend(
        &mut self,
        alternative: &Alternative,
        rest: &Queue,
        branch: &Branch,
    ) -> Result<Option<(Queue, Branch)>, TableauError> {
        if alternative.checked && any_conflict(&alternative.formulas, branch) {
            trace!("pruned {:?}", alternative.formulas);
            self.stats.pruned += 1;
            return Ok(None);
        }
        self.stats.alternatives += 1;

        let mut queue = rest.clone();
        for expr in alternative.formulas.iter() {
            queue = enqueue_if_compound(self.types, expr, &queue)?;
        }
        Ok(Some((queue, branch.extend(alternative.formulas.iter()))))
    }
}
