//! Backward induction over the state space `s = N, N-1, ..., 0`
//!
//! Values are always from the perspective of the player about to move:
//!
//! ```text
//! V(N) = -1
//! V(s) = max over i in 1..=k of { -1 if s+i > N, else -V(s+i) }
//! ```
//!
//! The sum strictly increases, so the state graph is acyclic and a single
//! backward pass yields the exact game value of every state.

use log::debug;

use crate::error::Result;
use crate::rules::{GameParams, Move, Sum, Value, LOSS};

/// Value and policy tables for one `(k, N)`.
///
/// Both tables have length `N + 1` and are read-only once computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    params: GameParams,
    values: Vec<Value>,
    policy: Vec<Option<Move>>,
}

impl Solution {
    /// Solve the game by backward induction. O(N·k) time, O(N) space.
    pub fn compute(params: GameParams) -> Self {
        let n = params.n();
        let mut values: Vec<Value> = vec![LOSS; n + 1];
        let mut policy: Vec<Option<Move>> = vec![None; n + 1];

        // Base case: at the threshold every move busts
        values[n] = LOSS;
        policy[n] = None;

        for s in (0..n).rev() {
            // Sentinel below the value range so the first move always registers
            let mut best_val: Value = LOSS - 1;
            let mut best_move = None;
            for i in params.distinct_moves(s) {
                let val = if params.is_bust(s, i) {
                    LOSS
                } else {
                    -values[params.apply_move(s, i)]
                };
                if val > best_val {
                    best_val = val;
                    best_move = Some(i);
                }
            }
            values[s] = best_val;
            policy[s] = best_move;
        }

        debug!("solved {params}: V(0)={:+}", values[0]);
        Solution {
            params,
            values,
            policy,
        }
    }

    pub fn params(&self) -> GameParams {
        self.params
    }

    /// `V[s]` for `s = 0..=N`
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `policy[s]` for `s = 0..=N`; `None` only at `s = N`.
    pub fn policy(&self) -> &[Option<Move>] {
        &self.policy
    }

    /// Value to the mover at sum `s`.
    pub fn value(&self, s: Sum) -> Option<Value> {
        self.values.get(s).copied()
    }

    /// Optimal move at sum `s`, `None` at the threshold.
    pub fn best_move(&self, s: Sum) -> Option<Move> {
        self.policy.get(s).copied().flatten()
    }

    /// Value of the opening position to Player I.
    pub fn root_value(&self) -> Value {
        self.values[0]
    }

    /// States where the mover loses under optimal play.
    ///
    /// These are exactly `N, N-(k+1), N-2(k+1), ...`.
    pub fn losing_positions(&self) -> Vec<Sum> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == LOSS)
            .map(|(s, _)| s)
            .collect()
    }

    /// Number of states in the tables, `N + 1`.
    pub fn state_count(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub(crate) fn from_tables(
        params: GameParams,
        values: Vec<Value>,
        policy: Vec<Option<Move>>,
    ) -> Self {
        Solution {
            params,
            values,
            policy,
        }
    }
}

/// Solve `(k, N)`, rejecting invalid parameters before any table exists.
pub fn solve(k: usize, n: Sum) -> Result<Solution> {
    let params = GameParams::new(k, n)?;
    Ok(Solution::compute(params))
}
