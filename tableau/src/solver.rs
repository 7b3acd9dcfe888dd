//! Tableau satisfiability solver.
use log::debug;

use tableau_formula::Expr;

use crate::branch::{enqueue_if_compound, Branch, Queue};
use crate::classify::TypeRegistry;
use crate::config::{SolverConfig, SolverConfigUpdate};
use crate::error::TableauError;
use crate::model::Model;
use crate::rules::RuleRegistry;
use crate::search::{Dispatcher, SearchStats};

/// A propositional satisfiability solver using the tableau method.
pub struct Solver {
    config: SolverConfig,
    types: TypeRegistry,
    rules: RuleRegistry,
    stats: SearchStats,
}

impl Default for Solver {
    fn default() -> Solver {
        Solver::with_registries(TypeRegistry::builtin(), RuleRegistry::builtin())
    }
}

impl Solver {
    /// Create a new solver with the built-in formula types and rules.
    pub fn new() -> Solver {
        Solver::default()
    }

    /// Create a solver using custom formula types and rules.
    pub fn with_registries(types: TypeRegistry, rules: RuleRegistry) -> Solver {
        Solver {
            config: SolverConfig::default(),
            types,
            rules,
            stats: SearchStats::default(),
        }
    }

    /// Change the solver configuration.
    pub fn config(&mut self, update: &SolverConfigUpdate) {
        update.apply(&mut self.config);
    }

    /// Check every model found against the input formula.
    pub fn enable_self_checking(&mut self) {
        self.config.self_check = true;
    }

    /// Statistics of the last call to [`solve`](Solver::solve).
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Decide the satisfiability of `formula`.
    ///
    /// Returns a model if the formula is satisfiable and `None` if it is not.
    pub fn solve(&mut self, formula: &Expr) -> Result<Option<Model>, TableauError> {
        if self.config.validate_formulas {
            formula.validate()?;
        }

        let queue = enqueue_if_compound(&self.types, formula, &Queue::new())?;
        let branch = Branch::new(formula.clone());

        let (result, stats) = {
            let mut dispatcher = Dispatcher::new(&self.types, &self.rules);
            let result = if self.config.explicit_stack {
                dispatcher.expand_iterative(queue, branch)
            } else {
                dispatcher.expand(queue, branch)
            };
            (result, dispatcher.stats())
        };
        self.stats = stats;

        debug!(
            "{} expansions, {} alternatives, {} pruned, {} dead ends, depth {}",
            stats.expansions, stats.alternatives, stats.pruned, stats.dead_ends, stats.max_depth
        );

        let model = match result? {
            Some(literals) => Model::from_literals(literals),
            None => return Ok(None),
        };

        if self.config.self_check && !model.satisfies(formula) {
            return Err(TableauError::SelfCheckFailed {
                formula: formula.clone(),
                model: model.to_string(),
            });
        }

        Ok(Some(model))
    }
}

/// Decide the satisfiability of `formula` using a default solver.
pub fn solve(formula: &Expr) -> Result<Option<Model>, TableauError> {
    Solver::new().solve(formula)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use tableau_formula::{
        atoms,
        test::{brute_force_satisfiable, expr, negation_chain_expr, sat_expr},
        Op,
    };

    use crate::classify::Tag;
    use crate::rules::Expansion;

    fn is_sat(formula: &Expr) -> bool {
        solve(formula).unwrap().is_some()
    }

    #[test]
    fn literals() {
        let [p] = atoms![p];
        assert_eq!(solve(&p).unwrap().unwrap().literals(), [p.clone()]);
        assert_eq!(solve(&!p.clone()).unwrap().unwrap().literals(), [!p]);
    }

    #[test]
    fn conjunction() {
        let [p, q] = atoms![p, q];
        let model = solve(&Expr::and(vec![q.clone(), p.clone()])).unwrap().unwrap();
        assert_eq!(model.literals(), [p, q]);
    }

    #[test]
    fn contradiction() {
        let [p] = atoms![p];
        assert_eq!(solve(&Expr::and(vec![p.clone(), !p.clone()])).unwrap(), None);
        assert_eq!(solve(&!Expr::iff(p.clone(), p)).unwrap(), None);
    }

    #[test]
    fn excluded_middle() {
        let [p] = atoms![p];
        let model = solve(&Expr::or(vec![p.clone(), !p.clone()])).unwrap().unwrap();
        assert_eq!(model.len(), 1);
        assert!(model.literals() == [p.clone()] || model.literals() == [!p]);
    }

    #[test]
    fn double_negation() {
        let [p] = atoms![p];
        assert_eq!(solve(&!!p.clone()).unwrap(), solve(&p).unwrap());
        assert_eq!(solve(&!!!p.clone()).unwrap(), solve(&!p).unwrap());
    }

    #[test]
    fn double_negation_against_branch() {
        let [p, q] = atoms![p, q];
        // ¬¬p contradicts ¬p before it is expanded.
        assert_eq!(solve(&Expr::and(vec![!p.clone(), !!p.clone()])).unwrap(), None);
        assert_eq!(solve(&Expr::and(vec![!!p.clone(), !p.clone()])).unwrap(), None);
        assert_eq!(
            solve(&Expr::and(vec![
                Expr::or(vec![!p.clone(), q.clone()]),
                !!p.clone(),
                !q.clone()
            ]))
            .unwrap(),
            None
        );
        let model = solve(&Expr::and(vec![
            Expr::or(vec![!p.clone(), q.clone()]),
            !!p.clone(),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(model.literals(), [p, q]);
    }

    #[test]
    fn triple_negation_against_atom() {
        let [p, q] = atoms![p, q];
        let formulas = [
            Expr::and(vec![p.clone(), !!!p.clone()]),
            Expr::and(vec![!!!p.clone(), p.clone()]),
            Expr::and(vec![
                Expr::or(vec![p.clone(), q.clone()]),
                !!!p.clone(),
                !q.clone(),
            ]),
        ];

        for formula in formulas.iter() {
            for &explicit_stack in [false, true].iter() {
                let mut solver = Solver::new();
                solver.config(&SolverConfigUpdate {
                    explicit_stack: Some(explicit_stack),
                    self_check: Some(true),
                    ..SolverConfigUpdate::new()
                });
                assert_eq!(solver.solve(formula), Ok(None), "{}", formula);
            }
        }

        let model = solve(&Expr::and(vec![!q.clone(), !!!p.clone()]))
            .unwrap()
            .unwrap();
        assert_eq!(model.literals(), [!p, !q]);
    }

    #[test]
    fn biconditional_polarity() {
        let [p, q] = atoms![p, q];
        let model = solve(&Expr::iff(p.clone(), q.clone())).unwrap().unwrap();
        let p_value = model.value(p.literal_atom().unwrap());
        assert!(p_value.is_some());
        assert_eq!(p_value, model.value(q.literal_atom().unwrap()));
    }

    #[test]
    fn tautology() {
        let [p, q] = atoms![p, q];
        assert!(is_sat(&Expr::implies(p.clone(), Expr::implies(q, p))));
    }

    #[test]
    fn invalid_formula() {
        let [p] = atoms![p];
        let malformed = Expr::or(vec![p.clone(), Expr::and(vec![p.clone()])]);
        assert!(matches!(
            solve(&malformed),
            Err(TableauError::InvalidFormula(_))
        ));

        let mut solver = Solver::new();
        solver.config(&SolverConfigUpdate {
            validate_formulas: Some(false),
            ..SolverConfigUpdate::new()
        });
        // The malformed disjunct is never reached.
        let model = solver.solve(&malformed).unwrap().unwrap();
        assert_eq!(model.literals(), [p]);
    }

    #[test]
    fn unranked_without_validation() {
        let [p] = atoms![p];
        let malformed = Expr::Compound(Op::Iff, vec![p]);
        let mut solver = Solver::new();
        solver.config(&SolverConfigUpdate {
            validate_formulas: Some(false),
            ..SolverConfigUpdate::new()
        });
        assert_eq!(
            solver.solve(&malformed),
            Err(TableauError::UnrankedFormula(malformed))
        );
    }

    #[test]
    fn self_check_catches_unsound_rule() {
        fn first_conjunct(expr: &Expr) -> Option<Expansion> {
            let mut expansion = crate::rules::and(expr)?;
            expansion.alternatives[0].formulas.truncate(1);
            Some(expansion)
        }

        let mut rules = RuleRegistry::builtin();
        rules.register(Tag::SententialAnd, first_conjunct);
        let [p, q] = atoms![p, q];
        let formula = Expr::and(vec![p, q]);

        let mut solver = Solver::with_registries(TypeRegistry::builtin(), rules);
        assert!(solver.solve(&formula).unwrap().is_some());

        solver.enable_self_checking();
        assert!(matches!(
            solver.solve(&formula),
            Err(TableauError::SelfCheckFailed { .. })
        ));
    }

    #[test]
    fn stats_are_per_call() {
        let [p, q] = atoms![p, q];
        let mut solver = Solver::new();
        solver
            .solve(&Expr::or(vec![Expr::and(vec![p.clone(), !p.clone()]), q.clone()]))
            .unwrap();
        assert_eq!(solver.stats().expansions, 2);
        assert_eq!(solver.stats().pruned, 1);

        solver.solve(&q).unwrap();
        assert_eq!(solver.stats(), SearchStats::default());
    }

    proptest! {
        #[test]
        fn agrees_with_truth_table(formula in expr(4, 5)) {
            prop_assert_eq!(is_sat(&formula), brute_force_satisfiable(&formula));
        }

        #[test]
        fn negation_chains_agree_with_truth_table(formula in negation_chain_expr(2, 4)) {
            for &explicit_stack in [false, true].iter() {
                let mut solver = Solver::new();
                solver.config(&SolverConfigUpdate {
                    explicit_stack: Some(explicit_stack),
                    self_check: Some(true),
                    ..SolverConfigUpdate::new()
                });
                let model = solver.solve(&formula).unwrap();
                prop_assert_eq!(model.is_some(), brute_force_satisfiable(&formula));
            }
        }

        #[test]
        fn models_satisfy(formula in expr(4, 5)) {
            let mut solver = Solver::new();
            solver.enable_self_checking();
            if let Some(model) = solver.solve(&formula).unwrap() {
                prop_assert!(model.satisfies(&formula));
                // Unconstrained atoms may take either value.
                prop_assert!(formula.eval(&|atom| model.value(atom).unwrap_or(true)));
            }
        }

        #[test]
        fn planted_models_are_found((formula, _) in sat_expr(5, 5)) {
            let mut solver = Solver::new();
            solver.config(&SolverConfigUpdate {
                explicit_stack: Some(true),
                self_check: Some(true),
                ..SolverConfigUpdate::new()
            });
            prop_assert!(solver.solve(&formula).unwrap().is_some());
        }

        #[test]
        fn de_morgan(p in expr(3, 2), q in expr(3, 2)) {
            let negated_and = !Expr::and(vec![p.clone(), q.clone()]);
            let or_of_negations = Expr::or(vec![!p, !q]);
            prop_assert_eq!(is_sat(&negated_and), is_sat(&or_of_negations));
        }

        #[test]
        fn implication_as_disjunction(p in expr(3, 2), q in expr(3, 2)) {
            let implication = Expr::implies(p.clone(), q.clone());
            let disjunction = Expr::or(vec![!p, q]);
            prop_assert_eq!(is_sat(&implication), is_sat(&disjunction));
        }

        #[test]
        fn model_is_sorted_and_consistent(formula in expr(5, 4)) {
            if let Some(model) = solve(&formula).unwrap() {
                let names: Vec<_> = model
                    .iter()
                    .map(|literal| literal.literal_atom().unwrap().name())
                    .collect();
                let mut sorted = names.clone();
                sorted.sort();
                sorted.dedup();
                prop_assert_eq!(names, sorted);
            }
        }
    }
}
