//! Progress reporting for long searches.

use std::io::{self, Write};

/// Default number of accepted moves between progress lines.
pub const DEFAULT_INTERVAL: u64 = 100_000;

/// Counts the positions the search descends into and periodically writes a
/// `positions seen: <N> (depth <D>)` line.
///
/// Purely observational: write failures are logged and otherwise ignored.
pub struct Progress<W: Write> {
    positions: u64,
    depth: usize,
    interval: u64,
    out: W,
}

impl Progress<io::Stdout> {
    /// Reports to standard output every `interval` positions.
    pub fn stdout(interval: u64) -> Self {
        Self::new(interval, io::stdout())
    }
}

impl<W: Write> Progress<W> {
    /// An `interval` of 0 is treated as 1.
    pub fn new(interval: u64, out: W) -> Self {
        Self {
            positions: 0,
            depth: 0,
            interval: interval.max(1),
            out,
        }
    }

    /// Counts one accepted move from the node at the current depth.
    pub fn record(&mut self) {
        self.positions += 1;
        if self.positions % self.interval == 0 {
            if let Err(e) = writeln!(
                self.out,
                "positions seen: {} (depth {})",
                self.positions, self.depth
            ) {
                log::warn!("failed to write progress: {}", e);
            }
        }
    }

    pub fn descend(&mut self) {
        self.depth += 1;
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Total accepted moves so far.
    pub fn positions(&self) -> u64 {
        self.positions
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
