//! Route evaluator that computes distances, the objective, and feasibility.

use crate::models::{Route, RoutingProblem, Solution, Violation, ViolationType};

/// Weighted cost of a solution: `total + weight * span`.
///
/// # Examples
///
/// ```
/// use u_fleet::evaluation::Objective;
///
/// let obj = Objective::new(51, 30, 100);
/// assert_eq!(obj.value(), 3_051);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Objective {
    /// Sum of all route distances.
    pub total: u64,
    /// Longest route distance.
    pub span: u64,
    /// Weight applied to the span.
    pub weight: u64,
}

impl Objective {
    pub fn new(total: u64, span: u64, weight: u64) -> Self {
        Self {
            total,
            span,
            weight,
        }
    }

    /// Scalar objective value.
    pub fn value(&self) -> u64 {
        self.total.saturating_add(self.weight.saturating_mul(self.span))
    }
}

/// Evaluates routes and solutions against a problem.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Fleet, RoutingProblem};
/// use u_fleet::evaluation::RouteEvaluator;
///
/// let problem = RoutingProblem::from_rows(
///     &[vec![0, 5, 8], vec![5, 0, 3], vec![8, 3, 0]],
///     Fleet::new(1, 20),
/// )
/// .expect("valid problem");
///
/// let evaluator = RouteEvaluator::new(&problem);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert_eq!(route.total_distance(), 16);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    problem: &'a RoutingProblem,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem.
    pub fn new(problem: &'a RoutingProblem) -> Self {
        Self { problem }
    }

    /// Builds a route from a node sequence, computing its distance.
    ///
    /// Returns the route and a violation if it exceeds the distance cap.
    pub fn build_route(&self, vehicle_id: usize, nodes: &[usize]) -> (Route, Vec<Violation>) {
        let distance = self.problem.route_distance(nodes);
        let route = Route::with_nodes(vehicle_id, nodes.to_vec(), distance);
        let mut violations = Vec::new();
        if distance > self.problem.max_distance() {
            violations.push(Violation::new(ViolationType::MaxDistanceExceeded {
                route_index: vehicle_id,
                distance,
                max_distance: self.problem.max_distance(),
            }));
        }
        (route, violations)
    }

    /// Returns `true` if a route of this length respects the cap.
    pub fn within_cap(&self, distance: u64) -> bool {
        distance <= self.problem.max_distance()
    }

    /// Weighted objective of a solution using stored route distances.
    pub fn objective(&self, solution: &Solution, weight: u64) -> Objective {
        Objective::new(solution.total_distance(), solution.span(), weight)
    }

    /// Checks every solution invariant.
    ///
    /// Route distances are recomputed from the matrix, so a stale stored
    /// distance is reported as well. An empty list means the solution is feasible.
    pub fn evaluate_solution(&self, solution: &Solution) -> Vec<Violation> {
        let problem = self.problem;
        let depot = problem.depot();
        let mut violations = Vec::new();

        if solution.num_routes() != problem.num_vehicles() {
            violations.push(Violation::new(ViolationType::RouteCountMismatch {
                routes: solution.num_routes(),
                vehicles: problem.num_vehicles(),
            }));
        }

        let mut visits = vec![0usize; problem.num_nodes()];
        for (idx, route) in solution.routes().iter().enumerate() {
            for &node in route.nodes() {
                if node == depot || node >= problem.num_nodes() {
                    violations.push(Violation::new(ViolationType::InvalidNode {
                        route_index: idx,
                        node,
                    }));
                } else {
                    visits[node] += 1;
                }
            }
            if route.nodes().iter().any(|&n| n >= problem.num_nodes()) {
                continue;
            }

            let actual = problem.route_distance(route.nodes());
            if actual != route.total_distance() {
                violations.push(Violation::new(ViolationType::DistanceMismatch {
                    route_index: idx,
                    recorded: route.total_distance(),
                    actual,
                }));
            }
            if actual > problem.max_distance() {
                violations.push(Violation::new(ViolationType::MaxDistanceExceeded {
                    route_index: idx,
                    distance: actual,
                    max_distance: problem.max_distance(),
                }));
            }
        }

        for node in problem.customers() {
            match visits[node] {
                0 => violations.push(Violation::new(ViolationType::NodeMissing { node })),
                1 => {}
                count => violations.push(Violation::new(ViolationType::NodeDuplicated {
                    node,
                    count,
                })),
            }
        }

        violations
    }
}
