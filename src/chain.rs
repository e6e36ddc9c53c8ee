//! Chain definitions, parsing and validation.
//!
//! A chain lists the length of each rigid segment, counting the joint cell it
//! shares with the previous segment. The search consumes a chain from its
//! tail, so the last entry is the first segment placed.

use thiserror::Error;

use crate::geometry::CUBE_CELLS;

/// The 46-segment snake cube that folds into a 4x4x4 cube.
///
/// Stored in consumption order: the last entry is placed first.
pub const CANONICAL: &[u32] = &[
    2, 4, 2, 2, 2, 2, 2, 2, 2, 2, //
    2, 3, 2, 4, 2, 2, 2, 4, 3, 2, //
    2, 2, 2, 2, 3, 3, 2, 2, 2, 2, //
    2, 2, 2, 2, 3, 2, 3, 2, 3, 2, //
    4, 2, 2, 3, 2, 3,
];

/// Reasons a chain cannot describe a snake cube.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("chain is empty")]
    Empty,
    #[error("segment {index} has length 0; every segment needs at least one cell")]
    ZeroLength { index: usize },
    #[error("chain covers {covered} cells but the cube has {expected}")]
    WrongCellCount { covered: usize, expected: usize },
    #[error("invalid segment length {text:?} at position {index}")]
    Unparsable { index: usize, text: String },
}

/// Number of distinct cells a fully placed chain occupies.
///
/// The start cell counts once; each segment then adds every cell except the
/// joint it shares with the previous one.
pub fn cells_covered(chain: &[u32]) -> usize {
    1 + chain
        .iter()
        .map(|&length| length.saturating_sub(1) as usize)
        .sum::<usize>()
}

/// Checks that `chain` could fill the 4x4x4 cube exactly.
///
/// This does not prove a folding exists; it rejects chains that cannot
/// possibly have one, so the search never runs doomed from the start.
pub fn validate(chain: &[u32]) -> Result<(), ChainError> {
    if chain.is_empty() {
        return Err(ChainError::Empty);
    }
    if let Some(index) = chain.iter().position(|&length| length == 0) {
        return Err(ChainError::ZeroLength { index });
    }
    let covered = cells_covered(chain);
    if covered != CUBE_CELLS {
        return Err(ChainError::WrongCellCount {
            covered,
            expected: CUBE_CELLS,
        });
    }
    Ok(())
}

/// Parses a comma- or whitespace-separated list of segment lengths and
/// validates the result.
pub fn parse(text: &str) -> Result<Vec<u32>, ChainError> {
    let chain = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            token.parse::<u32>().map_err(|_| ChainError::Unparsable {
                index,
                text: token.to_string(),
            })
        })
        .collect::<Result<Vec<u32>, ChainError>>()?;

    validate(&chain)?;
    Ok(chain)
}
