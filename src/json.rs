//! JSON problem input and report output.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Fleet, RoutingProblem};
use crate::report::RoutingReport;

/// Problem description as read from JSON.
///
/// ```json
/// {
///   "distance_matrix": [[0, 10], [10, 0]],
///   "num_vehicles": 1,
///   "max_distance": 3000,
///   "depot": 0
/// }
/// ```
///
/// `depot` may be omitted and defaults to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemInput {
    pub distance_matrix: Vec<Vec<i64>>,
    pub num_vehicles: usize,
    pub max_distance: u64,
    #[serde(default)]
    pub depot: usize,
}

impl ProblemInput {
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Validates the input into a solvable problem.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_fleet::json::ProblemInput;
    ///
    /// let input = ProblemInput::from_json_str(
    ///     r#"{"distance_matrix": [[0, 3], [3, 0]], "num_vehicles": 1, "max_distance": 10}"#,
    /// )
    /// .expect("parses");
    /// let problem = input.into_problem().expect("valid");
    /// assert_eq!(problem.num_nodes(), 2);
    /// assert_eq!(problem.depot(), 0);
    /// ```
    pub fn into_problem(self) -> Result<RoutingProblem> {
        let fleet = Fleet::new(self.num_vehicles, self.max_distance).with_depot(self.depot);
        RoutingProblem::from_rows(&self.distance_matrix, fleet)
    }
}

impl RoutingReport {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
