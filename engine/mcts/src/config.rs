//! Search configuration and the per-move time budget.

use std::time::Duration;

use games_nogo::Board;

/// Default exploration constant for plain UCB1.
pub const DEFAULT_EXPLORATION: f64 = 0.5;

/// Exploration constant used once RAVE blending is enabled.
pub const RAVE_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Stand-in simulation budget for the RAVE decay schedule when the search
/// runs on a wall clock instead of a fixed iteration count.
pub const DEFAULT_RAVE_SCHEDULE: u32 = 1_000;

/// Per-move wall-clock budget in seconds, indexed by `step / 2`.
///
/// The profile is a bell curve: cheap opening moves, the bulk of the
/// thinking in the mid-game, quick endgame replies.
pub const DEFAULT_TIME_TABLE: [f64; 36] = [
    0.3, 0.3, 0.3, 0.3, 0.6, 0.6, 0.6, 0.6, 0.9, 0.9, 0.9, 0.9, //
    1.2, 1.2, 1.2, 1.2, 1.5, 1.5, 1.5, 1.5, 1.2, 1.2, 1.2, 1.2, //
    0.9, 0.9, 0.9, 0.9, 0.6, 0.6, 0.6, 0.6, 0.3, 0.3, 0.3, 0.3,
];

/// Configuration for a move search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Exploration constant `C` in the selection score.
    pub exploration: f64,

    /// Fixed iteration budget. When set, the wall clock is ignored and the
    /// driver runs exactly this many simulations.
    pub simulations: Option<u32>,

    /// Flat per-move cap overriding the time table.
    pub timeout: Option<Duration>,

    /// Wall-clock budget table in seconds, indexed by `step / 2`.
    pub time_table: [f64; 36],

    /// Base of the step heuristic `step = step_base - empty_cells`,
    /// calibrated for a game that starts from an empty 81-cell board.
    pub step_base: u32,

    /// Worker count for root-parallel search.
    pub threads: usize,

    /// Blend RAVE statistics into the selection score.
    pub use_rave: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: DEFAULT_EXPLORATION,
            simulations: None,
            timeout: None,
            time_table: DEFAULT_TIME_TABLE,
            step_base: 72,
            threads: 4,
            use_rave: false,
        }
    }
}

impl SearchConfig {
    /// Small fixed budget for fast deterministic tests.
    pub fn for_testing() -> Self {
        Self {
            simulations: Some(50),
            threads: 2,
            ..Self::default()
        }
    }

    /// Builder pattern: set the fixed iteration budget.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulations = Some(n);
        self
    }

    /// Builder pattern: set a flat per-move wall-clock cap.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the worker count for root-parallel search.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Builder pattern: replace the wall-clock budget table.
    pub fn with_time_table(mut self, table: [f64; 36]) -> Self {
        self.time_table = table;
        self
    }

    /// Builder pattern: enable RAVE blending. Also raises the exploration
    /// constant to √2, the value tuned for the blended score.
    pub fn with_rave(mut self) -> Self {
        self.use_rave = true;
        self.exploration = RAVE_EXPLORATION;
        self
    }

    /// Wall-clock budget for one move from `position`.
    ///
    /// The move index is estimated as `step_base - empty_cells` and the
    /// table is indexed by `step / 2`, clamped so off-table positions
    /// (non-standard starts, handicaps) still get a budget.
    pub fn per_move_budget(&self, position: &Board) -> Duration {
        if let Some(timeout) = self.timeout {
            return timeout;
        }
        let step = (self.step_base as i64 - position.empty_count() as i64).max(0) as usize;
        let slot = (step / 2).min(self.time_table.len() - 1);
        Duration::from_secs_f64(self.time_table[slot])
    }

    /// Simulation budget feeding the RAVE decay, whether or not the search
    /// itself is iteration-bounded.
    pub fn rave_schedule(&self) -> f64 {
        self.simulations.unwrap_or(DEFAULT_RAVE_SCHEDULE) as f64
    }
}
