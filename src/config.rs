use serde::{Deserialize, Serialize};

/// Whether the search stops at the first solution or enumerates all of them.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Return the first solution found.
    #[default]
    FirstSolution,
    /// Keep backtracking after every solution and collect them all.
    AllSolutions,
}

/// What happens to same-colored nodes that do not end up as a path's endpoints.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointRule {
    /// The path must pass through every other node of its color.
    #[default]
    Mandatory,
    /// Only line nodes must be passed through; other leftover nodes may be skipped.
    Optional,
}

/// Knobs for a single search run.
///
/// The defaults find the first solution, require neither full coverage nor a step budget, and treat every leftover node as a waypoint.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// First solution or all solutions.
    pub mode: SearchMode,
    /// Require every cell of the board to lie on some path.
    pub fill_board: bool,
    /// How leftover same-colored nodes are treated.
    pub waypoints: WaypointRule,
    /// Give up with [`SolveResult::Unknown`](crate::SolveResult::Unknown) after this many extension attempts.
    pub step_budget: Option<u64>,
}

impl SolverConfig {
    /// Set [`SolverConfig::mode`].
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set [`SolverConfig::fill_board`].
    pub fn with_fill_board(mut self, fill_board: bool) -> Self {
        self.fill_board = fill_board;
        self
    }

    /// Set [`SolverConfig::waypoints`].
    pub fn with_waypoints(mut self, waypoints: WaypointRule) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Set [`SolverConfig::step_budget`].
    pub fn with_step_budget(mut self, budget: u64) -> Self {
        self.step_budget = Some(budget);
        self
    }
}
