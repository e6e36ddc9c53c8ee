//! Axes, fold directions and cell bookkeeping for the 4x4x4 cube.
//!
//! All coordinates are relative to the starting cell `(0, 0, 0)`. Because the
//! start cell is always part of the folding and no axis may span more than
//! `SIDE` cells, every reachable coordinate lies in `-REACH..=REACH`.

use std::fmt;

/// Side length of the target cube.
pub const SIDE: i32 = 4;

/// Number of cells in the target cube.
pub const CUBE_CELLS: usize = (SIDE * SIDE * SIDE) as usize;

/// Largest distance from the start cell along one axis.
const REACH: i32 = SIDE - 1;

/// Coordinates reachable per axis (`-REACH..=REACH`).
const WIDTH: i32 = 2 * REACH + 1;

/// A unit cube position `[x, y, z]`.
pub type Cell = [i32; 3];

/// One of the three cube axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in search order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of this axis into a `Cell`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }
}

/// Direction of travel along an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    #[inline(always)]
    pub const fn step(self) -> i32 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Sign::Plus),
            '-' => Some(Sign::Minus),
            _ => None,
        }
    }
}

/// The direction in which the next segment extends from the head cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub axis: Axis,
    pub sign: Sign,
}

impl Move {
    /// Seeds the move history so the first real move may not use the Z axis.
    pub const SENTINEL: Move = Move::new(Axis::Z, Sign::Plus);

    /// The six candidate moves in the order the search tries them:
    /// X, Y, Z, each positive before negative.
    pub const CANDIDATES: [Move; 6] = [
        Move::new(Axis::X, Sign::Plus),
        Move::new(Axis::X, Sign::Minus),
        Move::new(Axis::Y, Sign::Plus),
        Move::new(Axis::Y, Sign::Minus),
        Move::new(Axis::Z, Sign::Plus),
        Move::new(Axis::Z, Sign::Minus),
    ];

    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }

    /// Returns the cell `distance` steps from `from` in this direction.
    #[inline(always)]
    pub fn offset(self, from: Cell, distance: i32) -> Cell {
        let mut cell = from;
        cell[self.axis.index()] += distance * self.sign.step();
        cell
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign.symbol(), self.axis.letter())
    }
}

/// Per-axis `(min, max)` of the coordinates visited so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingRange {
    ranges: [(i32, i32); 3],
}

impl BoundingRange {
    /// The range of a folding that only occupies the start cell.
    pub const ORIGIN: BoundingRange = BoundingRange {
        ranges: [(0, 0); 3],
    };

    #[inline(always)]
    pub fn min(&self, axis: Axis) -> i32 {
        self.ranges[axis.index()].0
    }

    #[inline(always)]
    pub fn max(&self, axis: Axis) -> i32 {
        self.ranges[axis.index()].1
    }

    /// Number of cells spanned along `axis`, minus one.
    pub fn span(&self, axis: Axis) -> i32 {
        self.max(axis) - self.min(axis)
    }

    /// Whether `coordinate` on `axis` still fits inside a cube of side `SIDE`
    /// together with everything visited so far.
    ///
    /// Each end is checked against the opposite end of the range, so the
    /// running span never exceeds `SIDE - 1`.
    #[inline(always)]
    pub fn admits(&self, axis: Axis, coordinate: i32) -> bool {
        coordinate >= self.max(axis) - REACH && coordinate <= self.min(axis) + REACH
    }

    /// Widens the range on `axis` to include `coordinate`.
    #[inline(always)]
    pub fn include(&mut self, axis: Axis, coordinate: i32) {
        let (min, max) = &mut self.ranges[axis.index()];
        *min = (*min).min(coordinate);
        *max = (*max).max(coordinate);
    }
}

/// Number of `u64` words needed for one bit per reachable cell.
const OCCUPIED_WORDS: usize = ((WIDTH * WIDTH * WIDTH) as usize).div_ceil(64);

/// Bitmask of occupied cells.
///
/// One bit per reachable cell keeps the set `Copy`, so every search node owns
/// an independent copy without touching the heap.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OccupiedCells {
    words: [u64; OCCUPIED_WORDS],
}

impl OccupiedCells {
    pub const EMPTY: OccupiedCells = OccupiedCells {
        words: [0; OCCUPIED_WORDS],
    };

    /// Bit position of `cell`, or `None` if it lies outside the reachable box.
    #[inline(always)]
    fn bit(cell: Cell) -> Option<usize> {
        if cell.iter().any(|c| !(-REACH..=REACH).contains(c)) {
            return None;
        }
        let [x, y, z] = cell.map(|c| (c + REACH) as usize);
        Some(x * (WIDTH * WIDTH) as usize + y * WIDTH as usize + z)
    }

    #[inline(always)]
    fn cell_at(bit: usize) -> Cell {
        let width = WIDTH as usize;
        [bit / (width * width), (bit / width) % width, bit % width].map(|c| c as i32 - REACH)
    }

    #[inline(always)]
    pub fn contains(&self, cell: Cell) -> bool {
        match Self::bit(cell) {
            Some(bit) => self.words[bit / 64] & (1 << (bit % 64)) != 0,
            None => false,
        }
    }

    /// Marks `cell` as occupied.
    ///
    /// Returns `false` if the cell was already occupied or lies outside the
    /// reachable box, in which case the set is unchanged.
    #[inline(always)]
    pub fn insert(&mut self, cell: Cell) -> bool {
        let Some(bit) = Self::bit(cell) else {
            return false;
        };
        let mask = 1 << (bit % 64);
        let word = &mut self.words[bit / 64];
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Occupied cells in ascending `(x, y, z)` order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.words.iter().enumerate().flat_map(|(word_index, &word)| {
            (0..64usize)
                .filter(move |bit| word & (1 << bit) != 0)
                .map(move |bit| Self::cell_at(word_index * 64 + bit))
        })
    }
}

impl fmt::Debug for OccupiedCells {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
