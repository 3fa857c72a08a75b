//! Arena-allocated search tree: selection, expansion, backpropagation.
//!
//! Nodes live in one `Vec` and reference each other by index, so the
//! whole tree is freed by dropping the arena and parent links cannot
//! dangle. A tree lives for exactly one move decision.

use games_nogo::{Board, Color, MoveOutcome, Place};

use crate::node::{NodeId, SearchNode};
use crate::rave::RaveTable;

/// Search tree with arena node storage.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root: NodeId,
}

impl SearchTree {
    /// Root the tree at `position` with `to_move` to play.
    pub fn new(position: Board, to_move: Color) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(position, to_move)],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Total number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Descend from the root to a childless node, following the highest
    /// cached score at every level; ties go to the lowest child index.
    pub fn select_leaf(&self) -> NodeId {
        let mut current = self.root;
        loop {
            let node = self.get(current);
            if node.children.is_empty() {
                return current;
            }
            let mut best = node.children[0];
            let mut best_score = self.get(best).score;
            for &child in &node.children[1..] {
                let score = self.get(child).score;
                if score > best_score {
                    best = child;
                    best_score = score;
                }
            }
            current = best;
        }
    }

    /// Add a child per legal reply of the node's side to move.
    ///
    /// Cells are enumerated 0..80 in order, so trees built from the same
    /// position produce identical sibling order; the parallel merge
    /// depends on this. No-op on an already-expanded node; a node whose
    /// side has no legal reply stays childless (terminal).
    pub fn expand(&mut self, id: NodeId) {
        if self.get(id).is_expanded() {
            return;
        }
        let position = self.get(id).position;
        let color = self.get(id).to_move;

        for index in 0..Board::CELLS as u8 {
            let mv = Place::new(index, color);
            let mut after = position;
            if after.apply(mv) == MoveOutcome::Legal {
                let child = SearchNode::new_child(id, mv, after, color.opponent());
                let child_id = NodeId(self.nodes.len() as u32);
                self.nodes.push(child);
                self.get_mut(id).children.push(child_id);
            }
        }
    }

    /// Plain-UCB backpropagation.
    ///
    /// Walks from `leaf` to the root, excluding the root itself (it has no
    /// selection decision to influence), crediting a win to each node
    /// whose incoming placement was made by the rollout winner and
    /// refreshing the cached score against the driver's global iteration
    /// count.
    pub fn backup(&mut self, leaf: NodeId, winner: Color, total_iterations: u32, exploration: f64) {
        let mut current = leaf;
        while current != self.root {
            let node = self.get_mut(current);
            node.visits += 1;
            if winner == node.to_move.opponent() {
                node.wins += 1;
            }
            node.score = node.ucb1(exploration, total_iterations);
            current = node.parent;
        }
    }

    /// RAVE backpropagation.
    ///
    /// As [`Self::backup`], but each placement on the path is also
    /// credited in the per-search RAVE table, and the root's visit count
    /// is maintained because the blended exploration term reads the
    /// parent's visits. Counters are settled for the whole path before any
    /// score is refreshed, so every node scores against its parent's
    /// up-to-date visit count.
    pub fn backup_rave(
        &mut self,
        leaf: NodeId,
        winner: Color,
        rave: &mut RaveTable,
        completed: u32,
        schedule: f64,
        exploration: f64,
    ) {
        let root = self.root;
        let mut current = leaf;
        loop {
            let node = self.get_mut(current);
            node.visits += 1;
            let mover_won = winner == node.to_move.opponent();
            if mover_won {
                node.wins += 1;
            }
            if let Some(incoming) = node.incoming {
                rave.record(incoming, mover_won);
            }
            if current == root {
                break;
            }
            current = node.parent;
        }

        let beta = RaveTable::beta(schedule, completed);
        let mut current = leaf;
        while current != root {
            let parent = self.get(current).parent;
            let parent_visits = self.get(parent).visits;
            let stats = self
                .get(current)
                .incoming
                .map(|mv| rave.get(mv))
                .unwrap_or_default();
            let node = self.get_mut(current);
            node.score = node.ucb_rave(stats, beta, exploration, parent_visits);
            current = parent;
        }
    }

    /// Root child with the greatest visit count, first-found on ties.
    pub fn best_root_child(&self) -> Option<NodeId> {
        let root = self.get(self.root);
        let mut best: Option<(NodeId, u32)> = None;
        for &child in &root.children {
            let visits = self.get(child).visits;
            match best {
                Some((_, best_visits)) if visits <= best_visits => {}
                _ => best = Some((child, visits)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Per-root-child `(placement, visits)` in expansion order.
    pub fn root_stats(&self) -> Vec<(Place, u32)> {
        self.get(self.root)
            .children
            .iter()
            .map(|&id| {
                let node = self.get(id);
                let mv = node.incoming.expect("root children carry a placement");
                (mv, node.visits)
            })
            .collect()
    }

    /// Assert the structural invariants; test support.
    ///
    /// Checks that wins never exceed visits, that sides alternate along
    /// parent links, and that a visited internal node's visit count equals
    /// its children's total plus the one visit that triggered its own
    /// expansion (the root is bookkept separately and exempt).
    pub fn check_invariants(&self) {
        for (idx, node) in self.nodes.iter().enumerate() {
            assert!(node.wins <= node.visits, "wins exceed visits at node {idx}");

            if node.parent.is_some() {
                assert_eq!(
                    node.to_move,
                    self.get(node.parent).to_move.opponent(),
                    "sides must alternate at node {idx}"
                );
            }

            if NodeId(idx as u32) != self.root && node.is_expanded() && node.visits >= 1 {
                let child_sum: u32 = node.children.iter().map(|&c| self.get(c).visits).sum();
                assert_eq!(
                    child_sum + 1,
                    node.visits,
                    "visit bookkeeping broken at node {idx}"
                );
            }
        }
    }
}
