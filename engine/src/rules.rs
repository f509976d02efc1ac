//! Rules of the addition game
//!
//! Players I and II alternately add an integer from `1..=k` to a running
//! sum that starts at zero. The player whose move pushes the sum above the
//! threshold `N` busts and pays one unit to the opponent.
//!
//! Every move in `1..=k` is legal at every state, busting or not. Whether a
//! busting move is ever worth playing is a question for the solvers.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{GameError, Result};

/// Running sum of all moves so far.
pub type Sum = usize;

/// A single move: the integer added to the sum, in `1..=k`.
pub type Move = usize;

/// Game value in `{-1, +1}`.
///
/// Kept as a small integer so every solver path stays in integer arithmetic.
pub type Value = i8;

/// The mover (or Player I, depending on the axis) wins.
pub const WIN: Value = 1;
/// The mover (or Player I, depending on the axis) loses.
pub const LOSS: Value = -1;

/// Player in the two-person game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first, at sum 0
    I,
    /// Moves second
    II,
}

impl Player {
    /// Get the opponent of this player
    pub fn opponent(self) -> Player {
        match self {
            Player::I => Player::II,
            Player::II => Player::I,
        }
    }

    /// True for Player I, who moves at sum 0
    pub fn is_first(self) -> bool {
        self == Player::I
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::I => write!(f, "I"),
            Player::II => write!(f, "II"),
        }
    }
}

/// Immutable game parameters `(k, N)`.
///
/// Only constructible through [`GameParams::new`] or
/// [`GameParams::from_signed`], so every instance satisfies `k >= 1` and
/// `N + k + 1` fits in a `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameParams {
    k: usize,
    n: Sum,
}

impl GameParams {
    /// Validate and build parameters. `n == 0` is allowed: the first mover
    /// starts at the threshold and is forced to bust.
    pub fn new(k: usize, n: Sum) -> Result<Self> {
        if k < 1 {
            return Err(GameError::InvalidParameter(format!(
                "k must be at least 1 (got {k})"
            )));
        }
        if k.checked_add(1).and_then(|p| p.checked_add(n)).is_none() {
            return Err(GameError::InvalidParameter(format!(
                "k={k} with N={n} overflows the running sum"
            )));
        }
        Ok(GameParams { k, n })
    }

    /// Build parameters from signed input, rejecting negative values.
    pub fn from_signed(k: i64, n: i64) -> Result<Self> {
        if n < 0 {
            return Err(GameError::InvalidParameter(format!(
                "N must be non-negative (got {n})"
            )));
        }
        if k < 1 {
            return Err(GameError::InvalidParameter(format!(
                "k must be at least 1 (got {k})"
            )));
        }
        let k = usize::try_from(k)
            .map_err(|_| GameError::InvalidParameter(format!("k out of range: {k}")))?;
        let n = usize::try_from(n)
            .map_err(|_| GameError::InvalidParameter(format!("N out of range: {n}")))?;
        Self::new(k, n)
    }

    /// Largest integer a player may add
    pub fn k(self) -> usize {
        self.k
    }

    /// Threshold; exceeding it loses
    pub fn n(self) -> Sum {
        self.n
    }

    /// Period of the winning/losing pattern, `k + 1`.
    pub fn period(self) -> usize {
        self.k + 1
    }

    /// Legal moves at any state, ascending.
    pub fn legal_moves(self, _s: Sum) -> RangeInclusive<Move> {
        1..=self.k
    }

    /// Legal moves up to and including the first bust, ascending.
    ///
    /// Every later move busts too and scores the same, so solvers that keep
    /// only strict improvements reach identical values and tie-breaks over
    /// this shorter scan.
    pub fn distinct_moves(self, s: Sum) -> RangeInclusive<Move> {
        1..=self.k.min(self.n.saturating_sub(s) + 1)
    }

    /// Sum after adding `i` at `s`
    pub fn apply_move(self, s: Sum, i: Move) -> Sum {
        s + i
    }

    /// True if adding `i` at sum `s` exceeds the threshold.
    pub fn is_bust(self, s: Sum, i: Move) -> bool {
        s + i > self.n
    }

    /// At the threshold every move busts.
    pub fn is_forced_bust(self, s: Sum) -> bool {
        s >= self.n
    }

    /// Reject states outside `0..=N`.
    pub fn check_state(self, s: Sum) -> Result<()> {
        if s > self.n {
            return Err(GameError::InvalidParameter(format!(
                "state {s} is beyond the threshold N={}",
                self.n
            )));
        }
        Ok(())
    }
}

impl fmt::Display for GameParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k={}, N={}", self.k, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_k() {
        assert!(matches!(
            GameParams::new(0, 10),
            Err(GameError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_negative_inputs() {
        assert!(matches!(
            GameParams::from_signed(3, -1),
            Err(GameError::InvalidParameter(_))
        ));
        assert!(matches!(
            GameParams::from_signed(-2, 5),
            Err(GameError::InvalidParameter(_))
        ));
        assert_eq!(GameParams::from_signed(3, 0).unwrap().n(), 0);
    }

    #[test]
    fn test_rejects_overflowing_k() {
        for (k, n) in [(usize::MAX, 10), (usize::MAX, 0), (usize::MAX - 5, 5)] {
            assert!(
                matches!(GameParams::new(k, n), Err(GameError::InvalidParameter(_))),
                "k={k}, N={n}"
            );
        }
        let edge = GameParams::new(usize::MAX - 11, 10).unwrap();
        assert_eq!(edge.period(), usize::MAX - 10);
    }

    #[test]
    fn test_distinct_moves_stop_at_first_bust() {
        let p = GameParams::new(5, 10).unwrap();
        assert_eq!(p.distinct_moves(0).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(p.distinct_moves(8).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(p.distinct_moves(10).collect::<Vec<_>>(), vec![1]);
        let huge = GameParams::new(usize::MAX / 2, 3).unwrap();
        assert_eq!(huge.distinct_moves(1).count(), 3);
    }

    #[test]
    fn test_legal_moves_always_full_range() {
        let p = GameParams::new(4, 6).unwrap();
        for s in 0..=6 {
            let moves: Vec<Move> = p.legal_moves(s).collect();
            assert_eq!(moves, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_bust_detection() {
        let p = GameParams::new(3, 10).unwrap();
        assert!(!p.is_bust(7, 3));
        assert!(p.is_bust(8, 3));
        assert!(p.is_bust(10, 1));
        assert_eq!(p.apply_move(7, 3), 10);
        assert!(p.is_forced_bust(10));
        assert!(!p.is_forced_bust(9));
    }

    #[test]
    fn test_check_state() {
        let p = GameParams::new(2, 5).unwrap();
        assert!(p.check_state(5).is_ok());
        assert!(p.check_state(6).is_err());
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::I.opponent(), Player::II);
        assert_eq!(Player::II.opponent(), Player::I);
        assert_eq!(Player::II.to_string(), "II");
    }
}
