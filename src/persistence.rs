//! File I/O for saving and loading a folded chain.
//!
//! The text format is the same as the program's printed outcome: an optional
//! `solution:` header followed by one `<sign><axis> (<length>)` line per
//! segment in placement order. Blank lines are ignored.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::geometry::{Axis, Move, Sign};
use crate::grid::format_outcome;
use crate::solution::Solution;

/// Default file the binary writes the solution to.
pub const SOLUTION_TXT: &str = "solution.txt";

#[derive(Debug, Error)]
pub enum SolutionFileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line {line}: expected `<+|-><x|y|z> (<length>)`, found {text:?}")]
    Malformed { line: usize, text: String },
    #[error("solution file lists no moves")]
    Empty,
}

/// Writes `solution` to `path` in the printed text format.
pub fn save(path: &Path, solution: &Solution) -> io::Result<()> {
    fs::write(path, format_outcome(Some(solution)))
}

/// Reads a solution previously written by [`save`].
///
/// The result is only parsed, not verified; call [`Solution::verify`] before
/// trusting it.
pub fn load(path: &Path) -> Result<Solution, SolutionFileError> {
    parse(&fs::read_to_string(path)?)
}

/// Parses the printed text format.
pub fn parse(text: &str) -> Result<Solution, SolutionFileError> {
    let mut moves = Vec::new();
    let mut placed = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || (index == 0 && line == "solution:") {
            continue;
        }
        let (mv, length) = parse_line(line).ok_or_else(|| SolutionFileError::Malformed {
            line: index + 1,
            text: raw.to_string(),
        })?;
        moves.push(mv);
        placed.push(length);
    }

    if moves.is_empty() {
        return Err(SolutionFileError::Empty);
    }

    // lines are in placement order; chains are stored tail-first
    placed.reverse();
    Ok(Solution::new(placed, moves))
}

/// Parses one `+x (3)` line.
fn parse_line(line: &str) -> Option<(Move, u32)> {
    let (direction, length) = line.split_once(' ')?;

    let mut chars = direction.chars();
    let sign = Sign::from_symbol(chars.next()?)?;
    let axis = Axis::from_letter(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }

    let length = length
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?
        .parse::<u32>()
        .ok()
        .filter(|&length| length > 0)?;

    Some((Move::new(axis, sign), length))
}
