//! End-to-end solve: construction, local search, reporting.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::constructive::{construct, FirstSolutionStrategy};
use crate::error::{Result, RoutingError};
use crate::local_search::{LocalSearch, SearchBudget, Termination, ITERATIONS_PER_NODE};
use crate::models::{RoutingProblem, Solution};
use crate::report::{report_solution, RoutingReport};

/// Default weight of the span in the objective.
pub const DEFAULT_SPAN_WEIGHT: u64 = 100;

/// Configuration parameters for a solve.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_fleet::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_span_weight(10)
///     .with_max_iterations(500)
///     .with_time_limit(Duration::from_millis(200));
/// assert_eq!(config.span_weight, 10);
/// assert_eq!(config.max_iterations, Some(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Weight of the longest route in `total + weight * span`.
    pub span_weight: u64,
    /// Heuristic for the first feasible solution.
    pub first_solution: FirstSolutionStrategy,
    /// Try the other construction strategies before reporting a partial
    /// assignment.
    pub strategy_fallback: bool,
    /// Local search iteration cap (None for `20 * N`).
    pub max_iterations: Option<usize>,
    /// Wall-clock limit for local search (None for unlimited).
    pub time_limit: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            span_weight: DEFAULT_SPAN_WEIGHT,
            first_solution: FirstSolutionStrategy::default(),
            strategy_fallback: true,
            max_iterations: None,
            time_limit: None,
        }
    }
}

impl SolverConfig {
    pub fn with_span_weight(mut self, weight: u64) -> Self {
        self.span_weight = weight;
        self
    }

    pub fn with_first_solution(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution = strategy;
        self
    }

    pub fn with_strategy_fallback(mut self, enabled: bool) -> Self {
        self.strategy_fallback = enabled;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Resolves the local search budget for `problem`, starting the clock now.
    pub fn budget(&self, problem: &RoutingProblem) -> SearchBudget {
        let mut budget = SearchBudget::new(
            self.max_iterations
                .unwrap_or(ITERATIONS_PER_NODE * problem.num_nodes()),
        );
        if let Some(limit) = self.time_limit {
            budget = budget.with_time_limit(limit);
        }
        budget
    }
}

/// Statistics from one solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Strategy that produced the first solution.
    pub first_solution: FirstSolutionStrategy,
    pub initial_objective: u64,
    pub final_objective: u64,
    /// Local search moves applied.
    pub iterations: usize,
    pub termination: Termination,
}

/// Runs construction, local search, and validation for one problem.
///
/// Holds no state between solves; one solver can serve many problems,
/// including from several threads.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Fleet, RoutingProblem};
/// use u_fleet::solver::{RoutingSolver, SolverConfig};
///
/// let problem = RoutingProblem::from_rows(
///     &[
///         vec![0, 10, 20, 15],
///         vec![10, 0, 12, 8],
///         vec![20, 12, 0, 9],
///         vec![15, 8, 9, 0],
///     ],
///     Fleet::new(2, 40),
/// )
/// .expect("valid problem");
///
/// let report = RoutingSolver::new(SolverConfig::default())
///     .solve(&problem)
///     .expect("feasible");
/// assert!(report.routes().iter().all(|r| r.distance <= 40));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoutingSolver {
    config: SolverConfig,
}

impl RoutingSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `problem` and returns the validated routes.
    pub fn solve(&self, problem: &RoutingProblem) -> Result<RoutingReport> {
        self.solve_with_stats(problem).map(|(report, _)| report)
    }

    /// Solves `problem`, also returning search statistics.
    #[instrument(skip_all, fields(nodes = problem.num_nodes(), vehicles = problem.num_vehicles()))]
    pub fn solve_with_stats(&self, problem: &RoutingProblem) -> Result<(RoutingReport, SolveStats)> {
        let (strategy, initial) = self.initial_solution(problem)?;

        let search = LocalSearch::new(problem, self.config.span_weight);
        let initial_objective = search.objective(&initial).value();
        let result = search.improve(initial, &self.config.budget(problem));

        let stats = SolveStats {
            first_solution: strategy,
            initial_objective,
            final_objective: result.objective.value(),
            iterations: result.iterations,
            termination: result.termination,
        };
        let report = report_solution(problem, result.solution)?;

        info!(
            strategy = strategy.name(),
            total = report.total_distance(),
            span = report.max_route_distance(),
            iterations = stats.iterations,
            termination = ?stats.termination,
            "solve finished"
        );
        Ok((report, stats))
    }

    fn initial_solution(
        &self,
        problem: &RoutingProblem,
    ) -> Result<(FirstSolutionStrategy, Solution)> {
        let primary = self.config.first_solution;
        let first_error = match construct(problem, primary) {
            Ok(solution) => return Ok((primary, solution)),
            Err(err) if self.config.strategy_fallback && err.is_recoverable() => err,
            Err(err) => return Err(err),
        };
        warn!(strategy = primary.name(), error = %first_error, "construction incomplete");

        let mut fewest = first_error;
        for strategy in FirstSolutionStrategy::ALL.into_iter().filter(|&s| s != primary) {
            match construct(problem, strategy) {
                Ok(solution) => {
                    info!(strategy = strategy.name(), "fallback construction succeeded");
                    return Ok((strategy, solution));
                }
                Err(err) if unassigned_count(&err) < unassigned_count(&fewest) => fewest = err,
                Err(err) => warn!(strategy = strategy.name(), error = %err, "construction incomplete"),
            }
        }
        Err(fewest)
    }
}

fn unassigned_count(err: &RoutingError) -> usize {
    match err {
        RoutingError::PartialAssignment { unassigned } => unassigned.len(),
        _ => usize::MAX,
    }
}
