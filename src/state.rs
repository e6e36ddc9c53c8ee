//! Partial foldings and the move applier.
//!
//! A `State` is a snapshot of one node in the search tree. States are never
//! mutated once built: `State::apply` works on a private copy and hands back a
//! new child, so sibling branches never observe each other's cells.

use crate::geometry::{BoundingRange, Cell, Move, OccupiedCells};

/// One partial (or complete) folding of a chain.
#[derive(Clone, Debug)]
pub struct State<'c> {
    /// Cells filled along the path from the root.
    occupied: OccupiedCells,
    /// Segments still to place; the last entry goes next.
    remaining: &'c [u32],
    /// Last cell placed.
    head: Cell,
    /// Moves accepted so far, starting with `Move::SENTINEL`.
    moves: Vec<Move>,
    /// Coordinate extent of `occupied` on each axis.
    range: BoundingRange,
}

impl<'c> State<'c> {
    /// The root state: only the start cell is occupied and the whole chain is
    /// still to be placed.
    pub fn initial(chain: &'c [u32]) -> Self {
        let origin = [0, 0, 0];
        let mut occupied = OccupiedCells::EMPTY;
        occupied.insert(origin);

        let mut moves = Vec::with_capacity(chain.len() + 1);
        moves.push(Move::SENTINEL);

        Self {
            occupied,
            remaining: chain,
            head: origin,
            moves,
            range: BoundingRange::ORIGIN,
        }
    }

    /// True once every segment has been placed.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Places the next segment in direction `mv`.
    ///
    /// Returns `None` if the move repeats the previous axis, leaves the 4x4x4
    /// envelope, or runs into an occupied cell. The joint cell (index 0 of the
    /// segment) is the current head and is not placed again, so a segment of
    /// length 1 is accepted without adding any cell.
    pub fn apply(&self, mv: Move) -> Option<State<'c>> {
        if mv.axis == self.last_move().axis {
            return None;
        }
        let (&length, rest) = self.remaining.split_last()?;

        let mut occupied = self.occupied;
        let mut range = self.range;
        let mut head = self.head;

        for step in 1..length as i32 {
            let cell = mv.offset(self.head, step);
            let coordinate = cell[mv.axis.index()];
            if !range.admits(mv.axis, coordinate) {
                return None;
            }
            if !occupied.insert(cell) {
                return None;
            }
            range.include(mv.axis, coordinate);
            head = cell;
        }

        let mut moves = Vec::with_capacity(self.moves.capacity());
        moves.extend_from_slice(&self.moves);
        moves.push(mv);

        Some(State {
            occupied,
            remaining: rest,
            head,
            moves,
            range,
        })
    }

    pub fn occupied(&self) -> &OccupiedCells {
        &self.occupied
    }

    pub fn remaining(&self) -> &'c [u32] {
        self.remaining
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    pub fn range(&self) -> &BoundingRange {
        &self.range
    }

    /// The most recent move, or the sentinel at the root.
    pub fn last_move(&self) -> Move {
        // the history always starts with the sentinel
        self.moves[self.moves.len() - 1]
    }

    /// Accepted moves, excluding the sentinel.
    pub fn moves(&self) -> &[Move] {
        &self.moves[1..]
    }

    /// Number of segments placed so far.
    pub fn depth(&self) -> usize {
        self.moves.len() - 1
    }
}
