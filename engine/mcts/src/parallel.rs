//! Root-parallel search: independent trees merged by visit count.
//!
//! Every worker searches its own tree from the same root position with
//! its own RNG, playout vectors and RAVE table; nothing is shared while
//! the search runs. After the join, root-child visit counts are summed by
//! index, which is sound because expansion enumerates cells 0..80 in a
//! fixed order for everyone.

use games_nogo::{Board, Color, Place};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use rayon::ThreadPool;
use thiserror::Error;
use tracing::debug;

use crate::config::SearchConfig;
use crate::search::{MctsSearch, SearchOutcome};

/// Errors raised while setting up a parallel search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("failed to build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Merged result of a root-parallel search.
#[derive(Debug, Clone)]
pub struct ParallelOutcome {
    /// Placement with the greatest summed visit count, first-found on
    /// ties; `None` when the side to move has no legal placement.
    pub best: Option<Place>,

    /// Per-root-child `(placement, summed visits)` in expansion order.
    pub merged_stats: Vec<(Place, u64)>,

    /// Simulations completed across all workers.
    pub iterations: u32,
}

/// Root-parallel driver over a fixed worker pool.
pub struct ParallelSearch {
    config: SearchConfig,
    pool: ThreadPool,
}

impl ParallelSearch {
    /// Build the worker pool for `config.threads` workers.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        if config.threads == 0 {
            return Err(SearchError::NoWorkers);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Merged best placement for `color` on `position`.
    pub fn choose_move(&self, position: &Board, color: Color, base_seed: u64) -> Option<Place> {
        self.search(position, color, base_seed).best
    }

    /// Run every worker and merge their root visit profiles.
    ///
    /// Worker `i` searches with seed `base_seed + i`, so a one-worker
    /// search reproduces the single-threaded driver exactly.
    pub fn search(&self, position: &Board, color: Color, base_seed: u64) -> ParallelOutcome {
        let workers = self.config.threads as u64;
        let outcomes: Vec<SearchOutcome> = self.pool.install(|| {
            (0..workers)
                .into_par_iter()
                .map(|worker| {
                    let mut rng = ChaCha20Rng::seed_from_u64(base_seed.wrapping_add(worker));
                    MctsSearch::new(self.config.clone()).search(position, color, &mut rng)
                })
                .collect()
        });

        merge(&outcomes)
    }
}

/// Sum per-child visits across workers and pick the first-found maximum.
///
/// Workers expanding the same position must produce the same children in
/// the same order; a mismatch is a program bug, not a recoverable
/// condition, so it aborts with a diagnostic.
fn merge(outcomes: &[SearchOutcome]) -> ParallelOutcome {
    let Some(first) = outcomes.first() else {
        return ParallelOutcome {
            best: None,
            merged_stats: Vec::new(),
            iterations: 0,
        };
    };

    let mut merged: Vec<(Place, u64)> = first
        .root_stats
        .iter()
        .map(|&(mv, visits)| (mv, visits as u64))
        .collect();
    let mut iterations = first.iterations;

    for outcome in &outcomes[1..] {
        assert_eq!(
            outcome.root_stats.len(),
            merged.len(),
            "workers disagree on the root child count"
        );
        for (total, &(mv, visits)) in merged.iter_mut().zip(&outcome.root_stats) {
            assert_eq!(total.0, mv, "workers disagree on root child order");
            total.1 += visits as u64;
        }
        iterations += outcome.iterations;
    }

    let mut best: Option<(Place, u64)> = None;
    for &(mv, visits) in &merged {
        match best {
            Some((_, best_visits)) if visits <= best_visits => {}
            _ => best = Some((mv, visits)),
        }
    }

    if let Some((mv, visits)) = best {
        debug!(chosen = %mv, merged_visits = visits, workers = outcomes.len(), "parallel merge complete");
    }

    ParallelOutcome {
        best: best.map(|(mv, _)| mv),
        merged_stats: merged,
        iterations,
    }
}
