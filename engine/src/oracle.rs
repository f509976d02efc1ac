//! Closed-form game value
//!
//! A position is lost for the mover iff `(N - s) mod (k+1) == 0`. Proof by
//! strong induction on `N - s`: from such a position every move leaves the
//! opponent a nonzero remainder, and from any other position the move
//! `r = (N - s) mod (k+1)` restores a zero remainder for the opponent.

use crate::error::Result;
use crate::rules::{GameParams, Move, Sum, Value, LOSS, WIN};

/// Value to the mover at `s`.
///
/// # Panics
///
/// Requires `s <= N`; use [`closed_form_value`] for unchecked input.
pub fn value_at(params: GameParams, s: Sum) -> Value {
    debug_assert!(s <= params.n(), "state {s} beyond threshold {}", params.n());
    if (params.n() - s) % params.period() == 0 {
        LOSS
    } else {
        WIN
    }
}

/// The move that hands the opponent a losing position, if one exists.
///
/// # Panics
///
/// Requires `s <= N`, like [`value_at`].
pub fn winning_move(params: GameParams, s: Sum) -> Option<Move> {
    debug_assert!(s <= params.n(), "state {s} beyond threshold {}", params.n());
    match (params.n() - s) % params.period() {
        0 => None,
        r => Some(r),
    }
}

/// Closed-form `V(s)` with full parameter validation.
pub fn closed_form_value(s: Sum, k: usize, n: Sum) -> Result<Value> {
    let params = GameParams::new(k, n)?;
    params.check_state(s)?;
    Ok(value_at(params, s))
}
