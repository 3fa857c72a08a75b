//! Monte-Carlo Tree Search engine for NoGo.
//!
//! The engine builds a fresh tree per move request and runs the classic
//! four-phase loop until its wall-clock or simulation budget is spent:
//!
//! 1. **Selection**: descend from the root by cached UCB score to a
//!    childless node
//! 2. **Expansion**: add one child per legal reply
//! 3. **Simulation**: uniformly random self-play to a terminal position
//! 4. **Backpropagation**: update visit/win counters along the path
//!
//! The answer is the most-visited root child. [`ParallelSearch`] runs
//! independent searches on a worker pool and merges their root visit
//! counts, and [`RaveTable`] optionally biases early selection with
//! amortized all-moves statistics.
//!
//! # Usage
//!
//! ```rust,ignore
//! use games_nogo::{Board, Color};
//! use mcts::{MctsSearch, SearchConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let config = SearchConfig::default().with_simulations(500);
//! let mut search = MctsSearch::new(config);
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! if let Some(best) = search.choose_move(&Board::new(), Color::Black, &mut rng) {
//!     println!("play {best}");
//! }
//! ```
//!
//! # Configuration
//!
//! [`SearchConfig`] controls the budget and the selection score:
//!
//! - `simulations`: fixed iteration budget (overrides the wall clock)
//! - `timeout` / `time_table`: per-move wall-clock budget, by default a
//!   bell curve over the game indexed by move number
//! - `exploration`: the UCB constant `C`
//! - `threads`: worker count for root-parallel search
//! - `use_rave`: blend amortized placement statistics into selection

pub mod config;
pub mod node;
pub mod parallel;
pub mod playout;
pub mod rave;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{SearchConfig, DEFAULT_EXPLORATION, DEFAULT_TIME_TABLE, RAVE_EXPLORATION};
pub use node::{NodeId, SearchNode};
pub use parallel::{ParallelOutcome, ParallelSearch, SearchError};
pub use playout::PlayoutPolicy;
pub use rave::{RaveStats, RaveTable};
pub use search::{MctsSearch, SearchOutcome};
pub use tree::SearchTree;
