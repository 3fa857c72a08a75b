//! The search driver.
//!
//! Repeats select → expand → rollout → backup until the wall-clock or
//! simulation budget is spent, then answers with the most-visited root
//! child. A fresh tree is built per call and dropped before returning.

use std::time::Instant;

use games_nogo::{Board, Color, Place};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::playout::PlayoutPolicy;
use crate::rave::RaveTable;
use crate::tree::SearchTree;

/// Outcome of one search: the chosen placement plus the root-child visit
/// profile consumed by the parallel merge and by tests.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Most-visited root child, or `None` when the side to move has no
    /// legal placement.
    pub best: Option<Place>,

    /// Per-root-child `(placement, visits)` in expansion order.
    pub root_stats: Vec<(Place, u32)>,

    /// Completed simulations.
    pub iterations: u32,
}

/// Single-threaded Monte-Carlo tree search.
///
/// The playout policy's candidate vectors persist across calls; the tree
/// and the RAVE table do not.
pub struct MctsSearch {
    config: SearchConfig,
    playout: PlayoutPolicy,
}

impl MctsSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            playout: PlayoutPolicy::new(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `position` for the best placement of `color`.
    ///
    /// Returns `None` iff `color` has no legal placement.
    pub fn choose_move(
        &mut self,
        position: &Board,
        color: Color,
        rng: &mut ChaCha20Rng,
    ) -> Option<Place> {
        self.search(position, color, rng).best
    }

    /// As [`Self::choose_move`], also exposing the root visit profile.
    pub fn search(
        &mut self,
        position: &Board,
        color: Color,
        rng: &mut ChaCha20Rng,
    ) -> SearchOutcome {
        let budget = self.config.per_move_budget(position);
        let start = Instant::now();

        let mut tree = SearchTree::new(*position, color);
        tree.expand(tree.root());
        if !tree.get(tree.root()).is_expanded() {
            debug!(%color, "no legal placement at the root");
            return SearchOutcome {
                best: None,
                root_stats: Vec::new(),
                iterations: 0,
            };
        }

        let mut rave = self.config.use_rave.then(RaveTable::new);
        let schedule = self.config.rave_schedule();
        let mut iterations = 0u32;

        loop {
            let leaf = tree.select_leaf();
            tree.expand(leaf);
            let (leaf_position, leaf_to_move) = {
                let node = tree.get(leaf);
                (node.position, node.to_move)
            };
            let winner = self.playout.rollout(&leaf_position, leaf_to_move, rng);
            iterations += 1;
            match rave.as_mut() {
                Some(table) => tree.backup_rave(
                    leaf,
                    winner,
                    table,
                    iterations,
                    schedule,
                    self.config.exploration,
                ),
                None => tree.backup(leaf, winner, iterations, self.config.exploration),
            }
            trace!(iterations, nodes = tree.len(), "simulation complete");

            // The budget is consulted after the iteration, so even a zero
            // budget performs one full simulation.
            match self.config.simulations {
                Some(limit) => {
                    if iterations >= limit {
                        break;
                    }
                }
                None => {
                    if start.elapsed() >= budget {
                        break;
                    }
                }
            }
        }

        let best = tree
            .best_root_child()
            .map(|id| tree.get(id).incoming.expect("root children carry a placement"));
        debug!(?best, iterations, elapsed = ?start.elapsed(), "search finished");

        SearchOutcome {
            best,
            root_stats: tree.root_stats(),
            iterations,
        }
    }
}
