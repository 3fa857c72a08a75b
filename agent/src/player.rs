//! The externally-visible NoGo agent.
//!
//! One [`Player`] serves one episode side. Per move request it routes to
//! the uniformly random baseline, the single-threaded MCTS driver, or the
//! root-parallel driver, according to its `search` property.

use std::time::Duration;

use games_nogo::{Board, Color, Place};
use mcts::{MctsSearch, ParallelSearch, PlayoutPolicy, SearchConfig, SearchError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::debug;

use crate::properties::Properties;

/// Characters a display name may not contain (besides whitespace, which
/// tokenization already rules out).
const FORBIDDEN_NAME_CHARS: &str = "[]():;";

/// Construction-time configuration failures. There are no recoverable
/// runtime errors: once a player is built, every move request succeeds or
/// returns the resignation sentinel.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Move-selection strategy, from the `search` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchMode {
    Random,
    Mcts,
    ParallelMcts,
}

/// NoGo playing agent.
///
/// The RNG persists across [`Player::take_action`] calls within an
/// episode, so successive searches draw fresh seeds; the search tree
/// itself never outlives one call.
pub struct Player {
    name: String,
    color: Color,
    mode: SearchMode,
    rng: ChaCha20Rng,
    playout: PlayoutPolicy,
    search: MctsSearch,
    parallel: Option<ParallelSearch>,
}

impl Player {
    /// Build a player from a flat `key=value` argument string.
    ///
    /// Recognized keys: `name`, `role` (`black` or `white`, required),
    /// `seed`, `search` (`random` | `mcts` | `p-mcts`, default `random`),
    /// `timeout` (per-move cap in ms), `simulation` (fixed iteration
    /// budget), `thread` (worker count for `p-mcts`), `rave` (`1`/`true`
    /// blends RAVE statistics into selection).
    pub fn new(args: &str) -> Result<Self, AgentError> {
        let props = Properties::parse(&format!("name=random role=unknown {args}"));

        let name = props.get("name").unwrap_or_default().to_string();
        if name
            .chars()
            .any(|c| FORBIDDEN_NAME_CHARS.contains(c) || c.is_whitespace())
        {
            return Err(AgentError::InvalidName(name));
        }

        let color = match props.get("role") {
            Some("black") => Color::Black,
            Some("white") => Color::White,
            other => return Err(AgentError::InvalidRole(other.unwrap_or_default().to_string())),
        };

        let rng = match props.get_parsed::<u64>("seed") {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };

        let mode = match props.get("search") {
            Some("mcts") => SearchMode::Mcts,
            Some("p-mcts") => SearchMode::ParallelMcts,
            _ => SearchMode::Random,
        };

        let mut config = SearchConfig::default();
        if let Some(ms) = props.get_parsed::<u64>("timeout") {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        if let Some(simulations) = props.get_parsed::<u32>("simulation") {
            config = config.with_simulations(simulations);
        }
        if let Some(threads) = props.get_parsed::<usize>("thread") {
            config = config.with_threads(threads);
        }
        if matches!(props.get("rave"), Some("1") | Some("true")) {
            config = config.with_rave();
        }

        // The worker pool is built here so that configuration problems
        // surface at construction, not mid-episode.
        let parallel = (mode == SearchMode::ParallelMcts)
            .then(|| ParallelSearch::new(config.clone()))
            .transpose()?;

        debug!(name = %name, color = %color, ?mode, "player configured");

        Ok(Self {
            name,
            color,
            mode,
            rng,
            playout: PlayoutPolicy::new(),
            search: MctsSearch::new(config),
            parallel,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Choose a placement for the agent's color on `position`.
    ///
    /// Returns `None` iff the agent has no legal placement; the caller
    /// treats that as resignation.
    pub fn take_action(&mut self, position: &Board) -> Option<Place> {
        let action = match self.mode {
            SearchMode::Random => self.playout.random_move(position, self.color, &mut self.rng),
            SearchMode::Mcts => {
                let seed = self.rng.gen::<u64>();
                let mut rng = ChaCha20Rng::seed_from_u64(seed);
                self.search.choose_move(position, self.color, &mut rng)
            }
            SearchMode::ParallelMcts => {
                let seed = self.rng.gen::<u64>();
                self.parallel
                    .as_ref()
                    .expect("p-mcts players own a worker pool")
                    .choose_move(position, self.color, seed)
            }
        };

        match action {
            Some(mv) => debug!(agent = %self.name, chosen = %mv, "action chosen"),
            None => debug!(agent = %self.name, "no legal placement, resigning"),
        }
        action
    }
}
