//! Side-by-side results of every solver path for one `(k, N)`

use std::ops::RangeInclusive;

use rayon::prelude::*;

use crate::bellman::Solution;
use crate::error::Result;
use crate::minimax::{search, SearchOutcome};
use crate::oracle::value_at;
use crate::rules::{GameParams, Player, Sum, Value, LOSS};

/// Root value of the opening position from every method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub params: GameParams,
    pub dp_value: Value,
    /// States in the Bellman tables, `N + 1`
    pub dp_states: usize,
    pub minimax: SearchOutcome,
    pub alpha_beta: SearchOutcome,
    pub closed_form: Value,
}

impl Comparison {
    pub fn run(params: GameParams) -> Self {
        let solution = Solution::compute(params);
        Comparison {
            params,
            dp_value: solution.root_value(),
            dp_states: solution.state_count(),
            minimax: search(params, false),
            alpha_beta: search(params, true),
            closed_form: value_at(params, 0),
        }
    }

    pub fn all_agree(&self) -> bool {
        self.dp_value == self.minimax.value
            && self.dp_value == self.alpha_beta.value
            && self.dp_value == self.closed_form
    }

    /// Winner from the start according to the closed form.
    pub fn winner(&self) -> Player {
        winner_of(self.closed_form)
    }

    /// Fraction of minimax nodes that alpha-beta skipped, if any.
    pub fn pruning_savings(&self) -> Option<f64> {
        let plain = self.minimax.nodes_visited;
        let pruned = self.alpha_beta.nodes_visited;
        if plain > pruned {
            Some(1.0 - pruned as f64 / plain as f64)
        } else {
            None
        }
    }
}

/// Validate `(k, N)` and compare all methods.
pub fn compare(k: usize, n: Sum) -> Result<Comparison> {
    Ok(Comparison::run(GameParams::new(k, n)?))
}

fn winner_of(root_value: Value) -> Player {
    if root_value == LOSS {
        Player::II
    } else {
        Player::I
    }
}

/// Winner from the start for every `(k, N)`, one row per `k`.
///
/// Player II wins exactly when `k + 1` divides `N`.
pub fn winner_grid(
    ks: RangeInclusive<usize>,
    ns: RangeInclusive<Sum>,
) -> Result<Vec<Vec<Player>>> {
    let ks: Vec<usize> = ks.collect();
    ks.par_iter()
        .map(|&k| {
            ns.clone()
                .map(|n| {
                    let params = GameParams::new(k, n)?;
                    Ok(winner_of(Solution::compute(params).root_value()))
                })
                .collect::<Result<Vec<Player>>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::WIN;

    #[test]
    fn test_comparison_k3_n15() {
        let cmp = compare(3, 15).unwrap();
        assert!(cmp.all_agree());
        assert_eq!(cmp.dp_value, WIN);
        assert_eq!(cmp.dp_states, 16);
        assert_eq!(cmp.winner(), Player::I);
        assert_eq!(cmp.minimax.nodes_visited, 12640);
        assert_eq!(cmp.alpha_beta.nodes_visited, 3993);
        let saved = cmp.pruning_savings().unwrap();
        assert!(saved > 0.6 && saved < 0.7, "saved {saved}");
    }

    #[test]
    fn test_comparison_without_cutoffs() {
        // A single-move game has nothing to prune
        let cmp = compare(1, 4).unwrap();
        assert!(cmp.all_agree());
        assert_eq!(cmp.pruning_savings(), None);
    }

    #[test]
    fn test_winner_grid_follows_divisibility() {
        let grid = winner_grid(2..=6, 1..=25).unwrap();
        assert_eq!(grid.len(), 5);
        for (row, k) in grid.iter().zip(2..=6usize) {
            assert_eq!(row.len(), 25);
            for (winner, n) in row.iter().zip(1..=25usize) {
                let expected = if n % (k + 1) == 0 { Player::II } else { Player::I };
                assert_eq!(*winner, expected, "k={k}, N={n}");
            }
        }
    }
}
