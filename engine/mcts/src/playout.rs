//! Uniformly random playout policy and the rollout to terminal.

use games_nogo::{Board, Color, MoveOutcome, Place};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Uniformly random legal-move policy.
///
/// Keeps one candidate vector of all 81 placements per color, built once
/// at construction. Each query shuffles the color's vector and keeps the
/// first placement the position accepts, which is uniform over the legal
/// set while amortizing the scan.
#[derive(Debug, Clone)]
pub struct PlayoutPolicy {
    black: Vec<Place>,
    white: Vec<Place>,
}

impl PlayoutPolicy {
    pub fn new() -> Self {
        let candidates = |color| {
            (0..Board::CELLS as u8)
                .map(|index| Place::new(index, color))
                .collect()
        };
        Self {
            black: candidates(Color::Black),
            white: candidates(Color::White),
        }
    }

    fn candidates_mut(&mut self, color: Color) -> &mut Vec<Place> {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }

    /// Random legal placement for `color`, or `None` when none exists.
    pub fn random_move(
        &mut self,
        position: &Board,
        color: Color,
        rng: &mut ChaCha20Rng,
    ) -> Option<Place> {
        let mut probe = *position;
        self.play_random(&mut probe, color, rng)
    }

    /// Apply a random legal placement for `color` in place.
    ///
    /// Returns the placement made, or `None` when `color` has no legal
    /// move; the board is untouched in that case, since an illegal probe
    /// restores the position.
    pub fn play_random(
        &mut self,
        board: &mut Board,
        color: Color,
        rng: &mut ChaCha20Rng,
    ) -> Option<Place> {
        let candidates = self.candidates_mut(color);
        candidates.shuffle(rng);
        for &mv in candidates.iter() {
            if board.apply(mv) == MoveOutcome::Legal {
                return Some(mv);
            }
        }
        None
    }

    /// Random self-play from `position` with `to_move` to play; returns
    /// the winner, i.e. the opponent of the first side left without a
    /// legal placement.
    pub fn rollout(&mut self, position: &Board, to_move: Color, rng: &mut ChaCha20Rng) -> Color {
        let mut board = *position;
        let mut current = to_move;
        while self.play_random(&mut board, current, rng).is_some() {
            current = current.opponent();
        }
        current.opponent()
    }
}

impl Default for PlayoutPolicy {
    fn default() -> Self {
        Self::new()
    }
}
