//! Cross-checks between the independent solver paths
//!
//! Every check returns `GameError::VerificationMismatch` on the first
//! disagreement instead of carrying on with inconsistent data. Sweeps fan
//! independent `(k, N)` cells out over rayon; each cell solves and searches
//! with its own tables and counters.

use std::ops::RangeInclusive;

use log::{error, info};
use rayon::prelude::*;

use crate::bellman::Solution;
use crate::error::{GameError, Result};
use crate::minimax::search;
use crate::oracle::value_at;
use crate::rules::{GameParams, Sum};

/// Which cross-check a sweep runs per cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// DP table against the closed form, every state
    ClosedForm,
    /// Plain minimax, alpha-beta and the DP root value
    Searches,
}

/// Summary of a successful sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// `(k, N)` cells verified
    pub cells: usize,
    /// States (closed form) or searches (tree checks) compared
    pub comparisons: usize,
}

fn mismatch(params: GameParams, state: Sum, detail: String) -> GameError {
    error!("verification failed for {params} at s={state}: {detail}");
    GameError::VerificationMismatch {
        k: params.k(),
        n: params.n(),
        state,
        detail,
    }
}

/// Compare a DP table with the closed form at every state.
///
/// Returns the number of states checked.
pub fn check_closed_form(solution: &Solution) -> Result<usize> {
    let params = solution.params();
    for (s, &dp) in solution.values().iter().enumerate() {
        let formula = value_at(params, s);
        if dp != formula {
            return Err(mismatch(
                params,
                s,
                format!("DP gives {dp:+}, closed form gives {formula:+}"),
            ));
        }
    }
    Ok(solution.state_count())
}

/// Solve `params` and compare every state against the closed form.
pub fn verify_closed_form(params: GameParams) -> Result<usize> {
    check_closed_form(&Solution::compute(params))
}

/// Run both tree searches and compare them with each other and with `V[0]`.
///
/// Also enforces that pruning never visits more nodes than plain minimax.
pub fn verify_searches(params: GameParams) -> Result<usize> {
    let dp = Solution::compute(params).root_value();
    let plain = search(params, false);
    let pruned = search(params, true);

    if plain.value != pruned.value {
        return Err(mismatch(
            params,
            0,
            format!(
                "minimax gives {:+}, alpha-beta gives {:+}",
                plain.value, pruned.value
            ),
        ));
    }
    if plain.value != dp {
        return Err(mismatch(
            params,
            0,
            format!("tree search gives {:+}, DP gives {dp:+}", plain.value),
        ));
    }
    if pruned.nodes_visited > plain.nodes_visited {
        return Err(mismatch(
            params,
            0,
            format!(
                "alpha-beta visited {} nodes, more than minimax's {}",
                pruned.nodes_visited, plain.nodes_visited
            ),
        ));
    }
    Ok(2)
}

/// Verify every `(k, N)` cell of a grid in parallel.
pub fn sweep(
    ks: RangeInclusive<usize>,
    ns: RangeInclusive<Sum>,
    check: Check,
) -> Result<SweepReport> {
    let cells: Vec<GameParams> = ks
        .flat_map(|k| ns.clone().map(move |n| GameParams::new(k, n)))
        .collect::<Result<_>>()?;

    let comparisons = cells
        .par_iter()
        .map(|&params| match check {
            Check::ClosedForm => verify_closed_form(params),
            Check::Searches => verify_searches(params),
        })
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    let report = SweepReport {
        cells: cells.len(),
        comparisons,
    };
    info!(
        "{check:?} sweep passed: {} cells, {} comparisons",
        report.cells, report.comparisons
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_form_sweep_matches_everywhere() {
        let report = sweep(2..=7, 1..=50, Check::ClosedForm).unwrap();
        assert_eq!(report.cells, 6 * 50);
        // sum over N=1..=50 of (N+1) states, for 6 values of k
        assert_eq!(report.comparisons, 6 * (2..=51).sum::<usize>());
    }

    #[test]
    fn test_search_sweep_agrees() {
        let report = sweep(1..=4, 0..=12, Check::Searches).unwrap();
        assert_eq!(report.cells, 4 * 13);
        assert_eq!(report.comparisons, 2 * 4 * 13);
    }

    #[test]
    fn test_corrupted_table_is_reported() {
        let params = GameParams::new(3, 10).unwrap();
        let good = Solution::compute(params);
        let mut values = good.values().to_vec();
        values[6] = -values[6];
        let bad = Solution::from_tables(params, values, good.policy().to_vec());
        match check_closed_form(&bad) {
            Err(GameError::VerificationMismatch { k, n, state, .. }) => {
                assert_eq!((k, n, state), (3, 10, 6));
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_sweep_rejects_invalid_k() {
        assert!(matches!(
            sweep(0..=2, 1..=5, Check::ClosedForm),
            Err(GameError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_sweep_includes_degenerate_threshold() {
        let report = sweep(1..=3, 0..=0, Check::ClosedForm).unwrap();
        assert_eq!(report.cells, 3);
        assert_eq!(report.comparisons, 3);
    }
}
