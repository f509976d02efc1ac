//! blackwell Engine - Solver core for Blackwell's addition game
//!
//! Players alternately add an integer from `1..=k` to a running sum; whoever
//! pushes the sum above `N` loses. The game value is computed three
//! independent ways (Bellman backward induction, plain minimax, alpha-beta)
//! and checked against the closed form `V(s) = -1 iff (N - s) mod (k+1) == 0`.
//!
//! The engine is pure and synchronous, and has zero UI dependencies.

pub mod bellman;
pub mod compare;
pub mod error;
pub mod minimax;
pub mod oracle;
pub mod rules;
pub mod simulate;
pub mod strategy;
pub mod verify;

pub use bellman::{solve, Solution};
pub use compare::{compare, winner_grid, Comparison};
pub use error::{GameError, Result};
pub use minimax::{minimax, SearchOutcome, SearchStats};
pub use oracle::closed_form_value;
pub use rules::{GameParams, Move, Player, Sum, Value, LOSS, WIN};
pub use simulate::{simulate, Game, PolicyKind, Ply};
pub use strategy::{plan, StrategyPlan};
pub use verify::{sweep, Check, SweepReport};
