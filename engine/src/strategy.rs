//! The complement-to-(k+1) strategy
//!
//! The winner steers the sum onto the positions `s ≡ N (mod k+1)`: after
//! the opponent adds `i`, the winner adds `k + 1 - i`, so every pair of
//! moves advances the sum by exactly `k + 1` and the opponent eventually
//! faces `N` with only busting moves left.

use crate::error::Result;
use crate::oracle::winning_move;
use crate::rules::{GameParams, Move, Player, Sum};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyPlan {
    pub params: GameParams,
    pub winner: Player,
    /// Player I's first move when Player I wins, `N mod (k+1)`
    pub opening: Option<Move>,
    /// Sums the winner lands on, ending at `N`
    pub targets: Vec<Sum>,
}

impl StrategyPlan {
    pub fn new(params: GameParams) -> Self {
        let period = params.period();
        let opening = winning_move(params, 0);
        let (winner, first_target) = match opening {
            Some(r) => (Player::I, r),
            None => (Player::II, period),
        };
        let targets = (first_target..=params.n()).step_by(period).collect();
        StrategyPlan {
            params,
            winner,
            opening,
            targets,
        }
    }

    /// The winner's answer to an opponent move `i`.
    pub fn reply(&self, i: Move) -> Move {
        self.params.period() - i
    }
}

pub fn plan(k: usize, n: Sum) -> Result<StrategyPlan> {
    Ok(StrategyPlan::new(GameParams::new(k, n)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::{simulate, PolicyKind};

    #[test]
    fn test_first_player_plan() {
        let plan = plan(3, 10).unwrap();
        assert_eq!(plan.winner, Player::I);
        assert_eq!(plan.opening, Some(2));
        assert_eq!(plan.targets, vec![2, 6, 10]);
        assert_eq!(plan.reply(1), 3);
    }

    #[test]
    fn test_second_player_plan() {
        let plan = plan(3, 12).unwrap();
        assert_eq!(plan.winner, Player::II);
        assert_eq!(plan.opening, None);
        assert_eq!(plan.targets, vec![4, 8, 12]);
    }

    #[test]
    fn test_winner_lands_on_every_target() {
        for (k, n) in [(3, 10), (3, 12), (4, 20), (5, 23)] {
            let plan = plan(k, n).unwrap();
            let game = simulate(k, n, PolicyKind::Optimal, PolicyKind::Optimal).unwrap();
            let landed: Vec<Sum> = game
                .trajectory
                .iter()
                .filter(|ply| ply.mover == plan.winner)
                .map(|ply| ply.sum_after)
                .collect();
            assert_eq!(landed, plan.targets, "k={k}, N={n}");
        }
    }
}
