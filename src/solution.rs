//! A complete folding and the checks that prove it fills the cube.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::chain::cells_covered;
use crate::geometry::{Axis, Cell, Move, CUBE_CELLS, SIDE};

/// A folded chain: the original segment lengths plus one move per segment.
///
/// `moves[i]` places segment `chain[chain.len() - 1 - i]`, because the search
/// consumes the chain from its tail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    chain: Vec<u32>,
    moves: Vec<Move>,
}

/// Ways a move list can fail to fold its chain into the cube.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FoldingError {
    #[error("{moves} moves for a chain of {segments} segments")]
    MoveCount { moves: usize, segments: usize },
    #[error("move {index} folds along the same axis as the move before it")]
    RepeatedAxis { index: usize },
    #[error("move {index} revisits cell {cell:?}")]
    Collision { index: usize, cell: Cell },
    #[error("folding occupies {count} cells instead of {expected}")]
    CellCount { count: usize, expected: usize },
    #[error("folding spans {span} cells along {axis:?} instead of {expected}")]
    Span {
        axis: Axis,
        span: i32,
        expected: i32,
    },
}

impl Solution {
    pub fn new(chain: Vec<u32>, moves: Vec<Move>) -> Self {
        Self { chain, moves }
    }

    pub fn chain(&self) -> &[u32] {
        &self.chain
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Each move paired with the length of the segment it placed.
    pub fn placements(&self) -> impl Iterator<Item = (Move, u32)> + '_ {
        self.moves
            .iter()
            .copied()
            .zip(self.chain.iter().rev().copied())
    }

    /// Every cell along the chain, tagged with the index (in placement order)
    /// of the segment that owns it, relative to the start cell.
    ///
    /// Joint cells belong to the earlier segment; the start cell belongs to
    /// segment 0. No collision or bounds checks are made.
    fn trace(&self) -> Vec<(usize, Cell)> {
        let mut head: Cell = [0, 0, 0];
        let mut cells = vec![(0, head)];
        for (segment, (mv, length)) in self.placements().enumerate() {
            for _ in 1..length {
                head = mv.offset(head, 1);
                cells.push((segment, head));
            }
        }
        cells
    }

    /// Cells in chain order, each tagged with its segment index, shifted so
    /// every coordinate lies in `0..SIDE`.
    pub fn segment_cells(&self) -> Vec<(usize, Cell)> {
        let mut cells = self.trace();
        let mut min = [i32::MAX; 3];
        for (_, cell) in &cells {
            for axis in 0..3 {
                min[axis] = min[axis].min(cell[axis]);
            }
        }
        for (_, cell) in &mut cells {
            for axis in 0..3 {
                cell[axis] -= min[axis];
            }
        }
        cells
    }

    /// Cells in chain order, shifted so every coordinate lies in `0..SIDE`.
    pub fn cells(&self) -> Vec<Cell> {
        self.segment_cells()
            .into_iter()
            .map(|(_, cell)| cell)
            .collect()
    }

    /// Replays the moves and checks they fill the cube exactly: one move per
    /// segment, no two consecutive moves on one axis, no revisited cell, and
    /// a 4x4x4 extent.
    pub fn verify(&self) -> Result<(), FoldingError> {
        if self.moves.len() != self.chain.len() {
            return Err(FoldingError::MoveCount {
                moves: self.moves.len(),
                segments: self.chain.len(),
            });
        }

        if let Some(index) = self
            .moves
            .windows(2)
            .position(|pair| pair[0].axis == pair[1].axis)
        {
            return Err(FoldingError::RepeatedAxis { index: index + 1 });
        }

        // tracing lists every cell, so reject overlong chains before it
        let covered = cells_covered(&self.chain);
        if covered > CUBE_CELLS {
            return Err(FoldingError::CellCount {
                count: covered,
                expected: CUBE_CELLS,
            });
        }

        let mut seen: FxHashSet<Cell> = FxHashSet::default();
        let mut min = [0; 3];
        let mut max = [0; 3];
        for (index, cell) in self.trace() {
            if !seen.insert(cell) {
                return Err(FoldingError::Collision { index, cell });
            }
            for axis in 0..3 {
                min[axis] = min[axis].min(cell[axis]);
                max[axis] = max[axis].max(cell[axis]);
            }
        }

        if seen.len() != CUBE_CELLS {
            return Err(FoldingError::CellCount {
                count: seen.len(),
                expected: CUBE_CELLS,
            });
        }

        for axis in Axis::ALL {
            let span = max[axis.index()] - min[axis.index()] + 1;
            if span != SIDE {
                return Err(FoldingError::Span {
                    axis,
                    span,
                    expected: SIDE,
                });
            }
        }

        Ok(())
    }
}
