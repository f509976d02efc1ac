//! Play out one concrete game
//!
//! Each side follows a [`PolicyKind`]. The game starts at sum 0 with
//! Player I to move and ends on the first bust; since every move adds at
//! least 1, that happens within `N + 1` plies.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

use crate::bellman::Solution;
use crate::error::{GameError, Result};
use crate::rules::{GameParams, Move, Player, Sum, Value, LOSS};

/// How a side chooses its moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Follow the Bellman policy table
    Optimal,
    /// Pick the move minimising the mover's own value
    Worst,
}

impl FromStr for PolicyKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "optimal" => Ok(PolicyKind::Optimal),
            "worst" | "suboptimal" => Ok(PolicyKind::Worst),
            other => Err(GameError::InvalidParameter(format!(
                "unknown policy '{other}' (expected 'optimal' or 'worst')"
            ))),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Optimal => write!(f, "optimal"),
            PolicyKind::Worst => write!(f, "worst"),
        }
    }
}

/// One move of a simulated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ply {
    pub mover: Player,
    pub sum_before: Sum,
    pub choice: Move,
    pub sum_after: Sum,
    /// Value to the mover at `sum_before`
    pub value_before: Value,
}

impl Ply {
    /// True if this move pushed the sum past the threshold.
    pub fn is_bust(&self, params: GameParams) -> bool {
        self.sum_after > params.n()
    }
}

/// A finished game. The last ply is the bust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub params: GameParams,
    pub trajectory: Vec<Ply>,
    pub loser: Player,
}

impl Game {
    pub fn winner(&self) -> Player {
        self.loser.opponent()
    }

    /// Number of plies played, including the bust.
    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    pub fn final_sum(&self) -> Sum {
        self.trajectory.last().map_or(0, |ply| ply.sum_after)
    }
}

/// Move that minimises the mover's resulting value; the first such move
/// in ascending order wins ties.
fn worst_move(solution: &Solution, s: Sum) -> Move {
    let params = solution.params();
    let values = solution.values();
    let mut worst_val: Value = -LOSS + 1;
    let mut choice = 1;
    for i in params.distinct_moves(s) {
        let val = if params.is_bust(s, i) {
            LOSS
        } else {
            -values[params.apply_move(s, i)]
        };
        if val < worst_val {
            worst_val = val;
            choice = i;
        }
    }
    choice
}

fn choose(solution: &Solution, s: Sum, policy: PolicyKind) -> Move {
    if solution.params().is_forced_bust(s) {
        // Every move busts; play the smallest
        return 1;
    }
    match policy {
        PolicyKind::Optimal => solution.best_move(s).unwrap_or(1),
        PolicyKind::Worst => worst_move(solution, s),
    }
}

/// Simulate a game against an already-solved table.
pub fn play(solution: &Solution, p1: PolicyKind, p2: PolicyKind) -> Game {
    let params = solution.params();
    let values = solution.values();
    let mut trajectory = Vec::with_capacity(params.n() + 1);
    let mut s: Sum = 0;
    let mut mover = Player::I;

    loop {
        let policy = if mover.is_first() { p1 } else { p2 };
        let choice = choose(solution, s, policy);
        let next = params.apply_move(s, choice);
        let ply = Ply {
            mover,
            sum_before: s,
            choice,
            sum_after: next,
            value_before: values[s],
        };
        trajectory.push(ply);
        trace!("player {mover} at s={s} picks {choice} -> {next}");

        if params.is_bust(s, choice) {
            debug!(
                "game {params} ({p1} vs {p2}): player {mover} busts after {} moves",
                trajectory.len()
            );
            return Game {
                params,
                trajectory,
                loser: mover,
            };
        }
        s = next;
        mover = mover.opponent();
    }
}

/// Validate `(k, N)`, solve, and play one game.
pub fn simulate(k: usize, n: Sum, p1: PolicyKind, p2: PolicyKind) -> Result<Game> {
    let params = GameParams::new(k, n)?;
    let solution = Solution::compute(params);
    Ok(play(&solution, p1, p2))
}
