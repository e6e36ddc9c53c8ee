//! Text output for folded chains.
//!
//! The grid is a flat array indexed x-major where each cell holds the 1-based
//! number of the segment occupying it, or 0 for empty.

use std::fmt::Write;

use crate::geometry::{CUBE_CELLS, SIDE};
use crate::solution::Solution;

const DIM: usize = SIDE as usize;

/// Converts (x, y, z) coordinates to a linear cell index.
///
/// Index order is x-major: `idx = x * DIM * DIM + y * DIM + z`.
#[inline(always)]
pub const fn coord_to_idx(x: i32, y: i32, z: i32) -> usize {
    (x as usize) * DIM * DIM + (y as usize) * DIM + (z as usize)
}

/// Converts a folded chain to a flat grid of 1-based segment numbers.
///
/// Cells outside the cube are dropped, so only verified solutions give a
/// complete grid.
pub fn solution_to_grid(solution: &Solution) -> [u8; CUBE_CELLS] {
    let mut grid = [0u8; CUBE_CELLS];

    for (segment, [x, y, z]) in solution.segment_cells() {
        if [x, y, z].iter().all(|c| (0..SIDE).contains(c)) {
            grid[coord_to_idx(x, y, z)] = (segment + 1).min(u8::MAX as usize) as u8;
        }
    }

    grid
}

/// Display character for a 1-based segment number.
fn segment_label(segment_number: u8) -> char {
    match segment_number {
        0 => '.',
        1..=9 => char::from(b'0' + segment_number),
        10..=35 => char::from(b'a' + segment_number - 10),
        36..=61 => char::from(b'A' + segment_number - 36),
        _ => '#',
    }
}

/// Formats the move list, one `<sign><axis> (<length>)` line per segment.
pub fn format_moves(solution: &Solution) -> String {
    let mut output = String::new();
    for (mv, length) in solution.placements() {
        // writing to a String cannot fail
        let _ = writeln!(output, "{} ({})", mv, length);
    }
    output
}

/// Formats the outcome of a search: the move list under a `solution:`
/// header, or `none` when the search space was exhausted.
pub fn format_outcome(solution: Option<&Solution>) -> String {
    match solution {
        Some(solution) => format!("solution:\n{}", format_moves(solution)),
        None => "solution:\nnone\n".to_string(),
    }
}

/// Formats a folded chain as DIM z-slices side by side.
///
/// Each cell shows the segment occupying it (`1`-`9`, then `a`-`z`, then
/// `A`-`Z`). Empty cells show as '.'.
pub fn format_cube(solution: &Solution) -> String {
    let grid = solution_to_grid(solution);

    // header: z=0, z=1, ..., z=DIM-1
    let mut output = String::new();
    for z in 0..DIM {
        if z > 0 {
            output.push_str("  ");
        }
        // pad each label to its slice width so it sits over its columns
        output.push_str(&format!("{:<width$}", format!("z={}", z), width = DIM));
    }
    output.truncate(output.trim_end().len());
    output.push('\n');

    // rows from top (y=DIM-1) to bottom (y=0)
    for y in (0..DIM).rev() {
        for z in 0..DIM {
            if z > 0 {
                output.push_str("  ");
            }
            for x in 0..DIM {
                output.push(segment_label(grid[x * DIM * DIM + y * DIM + z]));
            }
        }
        output.push('\n');
    }

    output
}
