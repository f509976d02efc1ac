//! Explicit game-tree search from Player I's perspective
//!
//! Unlike the Bellman tables, every value here is on a fixed axis: `+1`
//! means Player I wins. Player I nodes maximise, Player II nodes minimise.
//! Both searches walk the full tree rooted at sum 0; the alpha-beta variant
//! skips subtrees that cannot change the result.
//!
//! Node counts are collected through an explicit `&mut SearchStats`
//! accumulator and never influence the returned value.

use log::debug;

use crate::error::Result;
use crate::rules::{GameParams, Sum, Value, LOSS, WIN};

/// Lower alpha-beta bound, below every reachable value.
pub const ALPHA_FLOOR: Value = -2;
/// Upper alpha-beta bound, above every reachable value.
pub const BETA_CEIL: Value = 2;

/// Nodes visited by one search invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn visit(&mut self) {
        self.nodes += 1;
    }
}

/// Result of a search from the opening position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Value to Player I
    pub value: Value,
    pub nodes_visited: u64,
}

/// Payoff to Player I when `is_player1`'s side busts.
fn bust_value(is_player1: bool) -> Value {
    if is_player1 {
        LOSS
    } else {
        WIN
    }
}

/// Plain minimax over the full subtree at `s`.
pub fn minimax_value(
    params: GameParams,
    s: Sum,
    is_player1: bool,
    stats: &mut SearchStats,
) -> Value {
    stats.visit();

    if params.is_forced_bust(s) {
        return bust_value(is_player1);
    }

    let values = params.distinct_moves(s).map(|i| {
        if params.is_bust(s, i) {
            bust_value(is_player1)
        } else {
            minimax_value(params, params.apply_move(s, i), !is_player1, stats)
        }
    });

    if is_player1 {
        values.fold(ALPHA_FLOOR, Value::max)
    } else {
        values.fold(BETA_CEIL, Value::min)
    }
}

/// Minimax with alpha-beta cutoffs.
///
/// `alpha` is the best value Player I can already guarantee on the current
/// path, `beta` the best Player II can. Callers start with
/// `ALPHA_FLOOR` / `BETA_CEIL`.
pub fn minimax_alpha_beta(
    params: GameParams,
    s: Sum,
    is_player1: bool,
    mut alpha: Value,
    mut beta: Value,
    stats: &mut SearchStats,
) -> Value {
    stats.visit();

    if params.is_forced_bust(s) {
        return bust_value(is_player1);
    }

    if is_player1 {
        let mut best = ALPHA_FLOOR;
        for i in params.distinct_moves(s) {
            let val = if params.is_bust(s, i) {
                LOSS
            } else {
                minimax_alpha_beta(params, params.apply_move(s, i), false, alpha, beta, stats)
            };
            best = best.max(val);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = BETA_CEIL;
        for i in params.distinct_moves(s) {
            let val = if params.is_bust(s, i) {
                WIN
            } else {
                minimax_alpha_beta(params, params.apply_move(s, i), true, alpha, beta, stats)
            };
            best = best.min(val);
            beta = beta.min(best);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Search the opening position, Player I to move.
pub fn search(params: GameParams, use_pruning: bool) -> SearchOutcome {
    let mut stats = SearchStats::new();
    let value = if use_pruning {
        minimax_alpha_beta(params, 0, true, ALPHA_FLOOR, BETA_CEIL, &mut stats)
    } else {
        minimax_value(params, 0, true, &mut stats)
    };
    debug!(
        "{} search {params}: value={value:+}, nodes={}",
        if use_pruning { "alpha-beta" } else { "minimax" },
        stats.nodes
    );
    SearchOutcome {
        value,
        nodes_visited: stats.nodes,
    }
}

/// Validate `(k, N)` and search the opening position.
pub fn minimax(k: usize, n: Sum, use_pruning: bool) -> Result<SearchOutcome> {
    let params = GameParams::new(k, n)?;
    Ok(search(params, use_pruning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bellman::solve;

    #[test]
    fn test_known_root_values() {
        assert_eq!(minimax(3, 10, false).unwrap().value, WIN);
        assert_eq!(minimax(3, 10, true).unwrap().value, WIN);
        assert_eq!(minimax(3, 12, false).unwrap().value, LOSS);
        assert_eq!(minimax(3, 12, true).unwrap().value, LOSS);
    }

    #[test]
    fn test_node_counts_k3_n10() {
        let plain = minimax(3, 10, false).unwrap();
        let pruned = minimax(3, 10, true).unwrap();
        assert_eq!(plain.nodes_visited, 600);
        assert_eq!(pruned.nodes_visited, 329);
    }

    #[test]
    fn test_searches_agree_with_dp() {
        for k in 1..=5 {
            for n in 0..=15 {
                let dp = solve(k, n).unwrap().root_value();
                let plain = minimax(k, n, false).unwrap();
                let pruned = minimax(k, n, true).unwrap();
                assert_eq!(plain.value, dp, "minimax k={k}, N={n}");
                assert_eq!(pruned.value, dp, "alpha-beta k={k}, N={n}");
            }
        }
    }

    #[test]
    fn test_pruning_never_visits_more_nodes() {
        for k in 1..=5 {
            for n in 0..=15 {
                let plain = minimax(k, n, false).unwrap().nodes_visited;
                let pruned = minimax(k, n, true).unwrap().nodes_visited;
                assert!(pruned <= plain, "k={k}, N={n}: {pruned} > {plain}");
                if k >= 2 && n >= k + 2 {
                    assert!(pruned < plain, "k={k}, N={n}: no cutoff fired");
                }
            }
        }
    }

    #[test]
    fn test_forced_bust_root() {
        let p = GameParams::new(3, 0).unwrap();
        let mut stats = SearchStats::new();
        assert_eq!(minimax_value(p, 0, true, &mut stats), LOSS);
        assert_eq!(stats.nodes, 1);
        let mut stats = SearchStats::new();
        assert_eq!(minimax_value(p, 0, false, &mut stats), WIN);
    }

    #[test]
    fn test_inner_node_from_player_two_side() {
        // Player II at s=2 with k=3, N=10 faces a losing position
        let p = GameParams::new(3, 10).unwrap();
        let mut stats = SearchStats::new();
        assert_eq!(minimax_value(p, 2, false, &mut stats), WIN);
        let mut stats = SearchStats::new();
        assert_eq!(
            minimax_alpha_beta(p, 2, false, ALPHA_FLOOR, BETA_CEIL, &mut stats),
            WIN
        );
    }
}
