//! Steepest-descent improver over the 2-opt and relocate neighborhoods.
//!
//! # Algorithm
//!
//! 1. Check the budget (iteration cap, optional deadline)
//! 2. Price every 2-opt reversal and every relocation of the current solution
//! 3. Discard moves that push an affected route over the distance cap
//! 4. Apply the single move with the lowest objective, if it improves
//! 5. Repeat until no move improves or the budget runs out
//!
//! The objective is `total + weight * span`, so a move that shortens the
//! longest route is worth `weight` times more than the same saving elsewhere.
//! Equal objectives resolve to the lowest source route, then the lowest
//! source position, then scan order.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::relocate::{insertion_distance, removal_distance, RelocateMove};
use super::two_opt::{PathCosts, TwoOptMove};
use crate::evaluation::{Objective, RouteEvaluator};
use crate::models::{RoutingProblem, Solution};

/// Iterations allowed per node when no explicit cap is given.
pub const ITERATIONS_PER_NODE: usize = 20;

/// A local search move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    TwoOpt(TwoOptMove),
    Relocate(RelocateMove),
}

/// A move together with the objective value it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub objective: u64,
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// No improving move exists.
    LocalOptimum,
    /// The iteration cap was reached.
    IterationLimit,
    /// The deadline passed.
    Deadline,
}

/// Limits on a local search run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_fleet::local_search::SearchBudget;
///
/// let budget = SearchBudget::new(500).with_time_limit(Duration::from_secs(2));
/// assert_eq!(budget.max_iterations, 500);
/// assert!(budget.deadline.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    /// Maximum number of applied moves.
    pub max_iterations: usize,
    /// Wall-clock instant after which no new scan starts.
    pub deadline: Option<Instant>,
}

impl SearchBudget {
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            deadline: None,
        }
    }

    /// Default budget: `20 * N` iterations, no deadline.
    pub fn for_problem(problem: &RoutingProblem) -> Self {
        Self::new(ITERATIONS_PER_NODE * problem.num_nodes())
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the deadline to `limit` from now.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Instant::now().checked_add(limit);
        self
    }

    fn exhausted(&self, iterations: usize) -> Option<Termination> {
        if iterations >= self.max_iterations {
            Some(Termination::IterationLimit)
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Some(Termination::Deadline)
        } else {
            None
        }
    }
}

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best solution found.
    pub solution: Solution,
    /// Its objective.
    pub objective: Objective,
    /// Number of moves applied.
    pub iterations: usize,
    pub termination: Termination,
    /// Objective value before the first move and after every applied move.
    pub history: Vec<u64>,
}

/// Steepest-descent local search over 2-opt and relocate moves.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Fleet, RoutingProblem};
/// use u_fleet::constructive::cheapest_arc;
/// use u_fleet::local_search::{LocalSearch, SearchBudget};
///
/// let problem = RoutingProblem::from_rows(
///     &[
///         vec![0, 10, 20, 15],
///         vec![10, 0, 12, 8],
///         vec![20, 12, 0, 9],
///         vec![15, 8, 9, 0],
///     ],
///     Fleet::new(2, 60),
/// )
/// .expect("valid problem");
///
/// let initial = cheapest_arc(&problem).expect("feasible");
/// let search = LocalSearch::new(&problem, 100);
/// let result = search.improve(initial.clone(), &SearchBudget::for_problem(&problem));
/// assert!(result.objective.value() <= search.objective(&initial).value());
/// ```
pub struct LocalSearch<'a> {
    problem: &'a RoutingProblem,
    span_weight: u64,
}

impl<'a> LocalSearch<'a> {
    /// Creates an improver weighting the span by `span_weight`.
    pub fn new(problem: &'a RoutingProblem, span_weight: u64) -> Self {
        Self {
            problem,
            span_weight,
        }
    }

    pub fn objective(&self, solution: &Solution) -> Objective {
        RouteEvaluator::new(self.problem).objective(solution, self.span_weight)
    }

    /// Improves `solution` until a local optimum or the budget is reached.
    ///
    /// The solution must be feasible; every applied move keeps it feasible.
    #[instrument(skip_all, level = "debug", fields(max_iterations = budget.max_iterations))]
    pub fn improve(&self, mut solution: Solution, budget: &SearchBudget) -> SearchResult {
        let mut objective = self.objective(&solution);
        let mut history = vec![objective.value()];
        let mut iterations = 0;

        let termination = loop {
            if let Some(reason) = budget.exhausted(iterations) {
                debug!(?reason, iterations, "search budget exhausted");
                break reason;
            }
            let Some(best) = self.best_move(&solution) else {
                break Termination::LocalOptimum;
            };

            self.apply(&mut solution, best.mv);
            objective = self.objective(&solution);
            debug_assert_eq!(objective.value(), best.objective);
            iterations += 1;
            history.push(objective.value());
            debug!(
                iteration = iterations,
                mv = ?best.mv,
                objective = objective.value(),
                total = objective.total,
                span = objective.span,
                "apply move"
            );
        };

        SearchResult {
            solution,
            objective,
            iterations,
            termination,
            history,
        }
    }

    /// Finds the best strictly improving feasible move, if any.
    pub fn best_move(&self, solution: &Solution) -> Option<ScoredMove> {
        let problem = self.problem;
        let evaluator = RouteEvaluator::new(problem);
        let routes = solution.routes();
        let current = self.objective(solution);
        let spans = SpanTracker::new(solution);

        let mut best: Option<ScoredMove> = None;
        let mut consider = |mv: Move, changes: &[(usize, u64)]| {
            if !changes.iter().all(|&(_, d)| evaluator.within_cap(d)) {
                return;
            }
            let added: u64 = changes.iter().map(|&(_, d)| d).sum();
            let removed: u64 = changes
                .iter()
                .map(|&(r, _)| routes[r].total_distance())
                .sum();
            // Removed routes are part of the current total.
            let total = current.total - removed + added;
            let value = Objective::new(total, spans.span_with(changes), self.span_weight).value();
            if value < current.value() && best.is_none_or(|b| value < b.objective) {
                best = Some(ScoredMove {
                    mv,
                    objective: value,
                });
            }
        };

        for (r, route) in routes.iter().enumerate() {
            let nodes = route.nodes();
            let distance = route.total_distance();
            let path = PathCosts::new(problem, nodes);

            for pos in 0..nodes.len() {
                for j in pos + 1..nodes.len() {
                    let reversed = path.reversed(problem, pos, j);
                    if reversed < distance {
                        let mv = Move::TwoOpt(TwoOptMove { route: r, i: pos, j });
                        consider(mv, &[(r, reversed)]);
                    }
                }

                let node = nodes[pos];
                let reduced_distance = removal_distance(problem, nodes, distance, pos);
                let mut reduced = nodes.to_vec();
                reduced.remove(pos);

                for (to, target) in routes.iter().enumerate() {
                    if to == r {
                        for q in (0..=reduced.len()).filter(|&q| q != pos) {
                            let moved =
                                insertion_distance(problem, &reduced, reduced_distance, q, node);
                            let mv = Move::Relocate(RelocateMove {
                                from_route: r,
                                from_pos: pos,
                                to_route: r,
                                to_pos: q,
                            });
                            consider(mv, &[(r, moved)]);
                        }
                    } else {
                        for q in 0..=target.len() {
                            let grown = insertion_distance(
                                problem,
                                target.nodes(),
                                target.total_distance(),
                                q,
                                node,
                            );
                            let mv = Move::Relocate(RelocateMove {
                                from_route: r,
                                from_pos: pos,
                                to_route: to,
                                to_pos: q,
                            });
                            consider(mv, &[(r, reduced_distance), (to, grown)]);
                        }
                    }
                }
            }
        }

        best
    }

    fn apply(&self, solution: &mut Solution, mv: Move) {
        let touched = match mv {
            Move::TwoOpt(m) => {
                m.apply(solution.routes_mut()[m.route].nodes_mut());
                [m.route, m.route]
            }
            Move::Relocate(m) => {
                m.apply(solution);
                [m.from_route, m.to_route]
            }
        };
        for r in touched {
            let route = &mut solution.routes_mut()[r];
            let distance = self.problem.route_distance(route.nodes());
            route.set_total_distance(distance);
        }
    }
}

/// The three longest routes, enough to find the span when up to two routes change.
struct SpanTracker {
    top: Vec<(u64, usize)>,
}

impl SpanTracker {
    fn new(solution: &Solution) -> Self {
        let mut top: Vec<(u64, usize)> = solution
            .routes()
            .iter()
            .enumerate()
            .map(|(i, r)| (r.total_distance(), i))
            .collect();
        top.sort_unstable_by(|a, b| b.cmp(a));
        top.truncate(3);
        Self { top }
    }

    fn span_with(&self, changes: &[(usize, u64)]) -> u64 {
        let untouched = self
            .top
            .iter()
            .find(|(_, i)| changes.iter().all(|(r, _)| r != i))
            .map_or(0, |&(d, _)| d);
        changes.iter().map(|&(_, d)| d).fold(untouched, u64::max)
    }
}
