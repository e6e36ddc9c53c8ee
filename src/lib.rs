//! Snake Cube Solver Library
//!
//! Folds a chain of rigid segments into a 4x4x4 cube by depth-first
//! backtracking over partial foldings.

pub mod chain;
pub mod geometry;
pub mod grid;
pub mod persistence;
pub mod progress;
pub mod solution;
pub mod solver;
pub mod state;

pub use chain::ChainError;
pub use geometry::{Axis, Cell, Move, Sign};
pub use progress::Progress;
pub use solution::{FoldingError, Solution};
pub use solver::{search, solve};
pub use state::State;
