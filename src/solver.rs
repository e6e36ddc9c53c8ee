//! Depth-first backtracking search over partial foldings.
//!
//! Each node tries the six candidate moves in a fixed order (`+x -x +y -y +z
//! -z`) and descends into every accepted child, stopping at the first state
//! whose chain is exhausted. Children are owned values, so backtracking is
//! just dropping a branch.

use std::io::Write;
use std::time::Instant;

use crate::chain::{self, ChainError};
use crate::geometry::Move;
use crate::progress::Progress;
use crate::solution::Solution;
use crate::state::State;

/// Searches the subtree rooted at `state` and returns the first solved state.
///
/// Returns `None` once every candidate below `state` has been exhausted.
pub fn search<'c, W: Write>(state: State<'c>, progress: &mut Progress<W>) -> Option<State<'c>> {
    if state.is_solved() {
        return Some(state);
    }

    for mv in Move::CANDIDATES {
        let Some(child) = state.apply(mv) else {
            continue;
        };
        progress.record();

        progress.descend();
        let solved = search(child, progress);
        progress.ascend();

        if solved.is_some() {
            return solved;
        }
    }

    None
}

/// Validates `chain` and folds it into the 4x4x4 cube.
///
/// `Ok(None)` means the chain is well formed but no folding exists.
pub fn solve<W: Write>(
    chain: &[u32],
    progress: &mut Progress<W>,
) -> Result<Option<Solution>, ChainError> {
    chain::validate(chain)?;
    log::info!("searching foldings for a chain of {} segments", chain.len());

    let start = Instant::now();
    let solved = search(State::initial(chain), progress);
    let elapsed = start.elapsed();

    let positions = progress.positions();
    log::info!(
        "took {:.1} s, {} positions seen ({:.0} ns/position)",
        elapsed.as_secs_f64(),
        positions,
        elapsed.as_nanos() as f64 / positions.max(1) as f64
    );

    Ok(solved.map(|state| Solution::new(chain.to_vec(), state.moves().to_vec())))
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::chain::CANONICAL;
    use crate::geometry::{Axis, Sign, CUBE_CELLS};
    use crate::progress::DEFAULT_INTERVAL;

    /// Walks the solved path again, checking the per-node invariants.
    fn assert_path_invariants(chain: &[u32], moves: &[Move]) {
        let mut state = State::initial(chain);
        let mut previous = Move::SENTINEL;
        for &mv in moves {
            assert_ne!(mv.axis, previous.axis, "Consecutive moves share an axis");
            state = state.apply(mv).expect("Solved path should replay");
            assert!(state.occupied().contains(state.head()));
            for axis in Axis::ALL {
                assert!(state.range().span(axis) <= 3);
            }
            let consumed = &chain[chain.len() - state.depth()..];
            assert_eq!(state.occupied().len(), chain::cells_covered(consumed));
            previous = mv;
        }
        assert!(state.is_solved());
    }

    #[test]
    fn test_search_returns_solved_root_immediately() {
        let mut progress = Progress::new(1, Vec::new());
        let solved = search(State::initial(&[]), &mut progress).unwrap();
        assert!(solved.moves().is_empty());
        assert_eq!(progress.positions(), 0);
    }

    #[test]
    fn test_search_takes_first_candidate() {
        let chain = [2];
        let mut progress = Progress::new(1, Vec::new());
        let solved = search(State::initial(&chain), &mut progress).unwrap();
        assert_eq!(solved.moves(), &[Move::new(Axis::X, Sign::Plus)]);
        assert_eq!(progress.positions(), 1);
        let output = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(output, "positions seen: 1 (depth 0)\n");
    }

    #[test]
    fn test_search_backtracks_out_of_dead_ends() {
        // the four-cell segment fits along x or y either way, but a straight
        // run of five cells never fits in the cube
        let chain = [5, 4];
        let mut progress = Progress::new(1_000, io::sink());
        assert!(search(State::initial(&chain), &mut progress).is_none());
        assert_eq!(progress.positions(), 4);
    }

    #[test]
    fn test_progress_reports_depth_of_expanded_node() {
        let chain = [2, 2, 2];
        let mut progress = Progress::new(1, Vec::new());
        assert!(search(State::initial(&chain), &mut progress).is_some());
        assert_eq!(progress.depth(), 0);
        let output = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(
            output,
            concat!(
                "positions seen: 1 (depth 0)\n",
                "positions seen: 2 (depth 1)\n",
                "positions seen: 3 (depth 2)\n",
            )
        );
    }

    #[test]
    fn test_progress_depth_unwinds_after_backtracking() {
        // every 4-then-2 prefix fits, but the final five-cell run never does
        let chain = [5, 2, 4];
        let mut progress = Progress::new(1, Vec::new());
        assert!(search(State::initial(&chain), &mut progress).is_none());
        assert_eq!(progress.depth(), 0);

        // four first moves (+x -x +y -y), each followed by four second moves
        let mut expected = String::new();
        let mut positions = 0;
        for _ in 0..4 {
            for depth in [0, 1, 1, 1, 1] {
                positions += 1;
                expected.push_str(&format!("positions seen: {} (depth {})\n", positions, depth));
            }
        }
        let output = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(output, expected);
    }

    #[test]
    fn test_search_prefers_positive_sign() {
        let chain = [2, 2, 2];
        let mut progress = Progress::new(1_000, io::sink());
        let solved = search(State::initial(&chain), &mut progress).unwrap();
        let rendered: Vec<String> = solved.moves().iter().map(|m| m.to_string()).collect();
        assert_eq!(rendered, ["+x", "+y", "+x"]);
        assert_path_invariants(&chain, solved.moves());
    }

    #[test]
    fn test_solve_rejects_malformed_chain() {
        let mut progress = Progress::new(1, io::sink());
        assert_eq!(
            solve(&[2, 2], &mut progress).unwrap_err(),
            ChainError::WrongCellCount {
                covered: 3,
                expected: CUBE_CELLS
            }
        );
        assert_eq!(progress.positions(), 0);
    }

    #[test]
    fn test_solve_reports_exhaustion_as_none() {
        // 64 cells worth of segments, but a straight run longer than the cube
        let mut chain = vec![2; 59];
        chain.push(5);
        assert_eq!(chain::cells_covered(&chain), CUBE_CELLS);

        let mut progress = Progress::new(1_000, io::sink());
        assert_eq!(solve(&chain, &mut progress), Ok(None));
    }

    #[test]
    fn test_canonical_chain_folds_into_cube() {
        let mut progress = Progress::new(DEFAULT_INTERVAL, io::sink());
        let solution = solve(CANONICAL, &mut progress)
            .unwrap()
            .expect("The canonical chain has a folding");

        assert_eq!(solution.moves().len(), CANONICAL.len());
        assert_path_invariants(CANONICAL, solution.moves());
        assert_eq!(solution.verify(), Ok(()));
        assert_eq!(solution.cells().len(), CUBE_CELLS);
    }

    #[test]
    fn test_canonical_search_is_deterministic() {
        let mut first = Progress::new(DEFAULT_INTERVAL, Vec::new());
        let mut second = Progress::new(DEFAULT_INTERVAL, Vec::new());
        let a = solve(CANONICAL, &mut first).unwrap();
        let b = solve(CANONICAL, &mut second).unwrap();
        assert_eq!(a, b);
        assert_eq!(first.positions(), second.positions());
        assert_eq!(first.into_inner(), second.into_inner());
    }
}
