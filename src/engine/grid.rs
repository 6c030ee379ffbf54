use rand::distributions::Distribution;
use rand::distributions::WeightedIndex;
use rand::seq::IteratorRandom;
use rand::Rng;

use super::direction::Direction;
use crate::error::{Error, Result};

pub type Tile = u32;

pub type Score = u64;

pub const DEFAULT_SIZE: usize = 4;

/// Reaching this tile wins the game; play may continue afterwards.
pub const WINNING_TILE: Tile = 2048;

/// Largest tile a [`Tile`] can hold. Two of them never merge.
pub const MAX_TILE: Tile = 1 << (Tile::BITS - 1);

const NEW_TILE_CHOICES: [Tile; 2] = [2, 4];
const NEW_TILE_WEIGHTS: [u8; 2] = [9, 1];

/// Idx addresses a cell by column (x) and row (y).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Idx(pub usize, pub usize);

impl std::fmt::Display for Idx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ridx({0},{1})", self.0, self.1)
    }
}

impl Idx {
    pub fn x(&self) -> usize {
        self.0
    }

    pub fn y(&self) -> usize {
        self.1
    }
}

/// Terminal-state classification of a grid.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Status {
    pub won: bool,
    pub over: bool,
}

/// Grid is an immutable-by-convention snapshot of a game: the square matrix of tiles, the score
/// accumulated so far and the won/over flags.
///
/// Every operation that advances the game returns a new Grid rather than mutating the receiver,
/// so probing a move never needs a save/restore of the current state.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Tile>,
    score: Score,
    won: bool,
    over: bool,
}

// constructors
impl Grid {
    /// An all-empty grid of the given size.
    pub fn empty(size: usize) -> Result<Self> {
        if size < 2 {
            return Err(Error::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![0; size * size],
            score: Score::default(),
            won: false,
            over: false,
        })
    }

    /// Builds a snapshot from explicit rows, top row first. The score starts at zero and the
    /// won/over flags are left unset until the grid is classified.
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self> {
        let mut grid = Self::empty(rows.len())?;
        let size = grid.size;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(Error::RaggedRow {
                    row: y,
                    len: row.len(),
                    size,
                });
            }
            for (x, value) in row.iter().enumerate() {
                if *value != 0 && (*value < 2 || !value.is_power_of_two()) {
                    return Err(Error::InvalidTile {
                        value: *value,
                        x,
                        y,
                    });
                }
                grid.set(&Idx(x, y), *value);
            }
        }
        Ok(grid)
    }

    /// Starts a game: an empty grid with two spawned tiles.
    pub fn new_game<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        let grid = Self::empty(size)?.spawn_tile(rng)?.spawn_tile(rng)?;
        Ok(grid.classified())
    }
}

// public methods
impl Grid {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn over(&self) -> bool {
        self.over
    }

    /// The flags as last recorded by [`Grid::classified`].
    pub fn status(&self) -> Status {
        Status {
            won: self.won,
            over: self.over,
        }
    }

    pub fn get(&self, idx: &Idx) -> Tile {
        self.cells[self.offset(idx)]
    }

    /// Row-major view of the cells.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or_default()
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Idx> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == 0)
            .map(move |(offset, _)| Idx(offset % size, offset / size))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|value| **value == 0).count()
    }

    /// Slides every line toward `direction`, merging equal neighbours at most once per tile.
    ///
    /// Returns the resulting grid along with whether any cell changed. The won/over flags are
    /// carried over untouched; classify the result to update them.
    pub fn apply_move(&self, direction: Direction) -> (Grid, bool) {
        let mut next = self.clone();
        for line in lines(self.size, direction) {
            let tiles = line
                .iter()
                .map(|idx| self.get(idx))
                .filter(|value| *value != 0)
                .collect::<Vec<Tile>>();
            let (merged, gained) = merge_line(&tiles, self.size);
            next.score += gained;
            for (idx, value) in line.iter().zip(merged) {
                next.set(idx, value);
            }
        }
        let changed = next.cells != self.cells;
        (next, changed)
    }

    /// Whether `direction` would change the grid.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.apply_move(direction).1
    }

    /// Places a 2 (90%) or a 4 (10%) on a uniformly chosen empty cell.
    pub fn spawn_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid> {
        let mut next = self.clone();
        let (idx, value) = next.place_random_tile(rng)?;
        log::trace!("spawned {} at {}", value, idx);
        Ok(next)
    }

    /// Computes the won/over flags without touching the grid.
    ///
    /// `won` is sticky: a grid that was already classified as won stays won even when no winning
    /// tile remains on it.
    pub fn classify(&self) -> Status {
        Status {
            won: self.won || self.cells.iter().any(|value| *value >= WINNING_TILE),
            over: self.is_stuck(),
        }
    }

    /// Consumes the grid and returns it with the flags from [`Grid::classify`] recorded.
    pub fn classified(mut self) -> Grid {
        let status = self.classify();
        self.won = status.won;
        self.over = status.over;
        self
    }
}

// private methods
impl Grid {
    fn offset(&self, idx: &Idx) -> usize {
        assert!(
            idx.x() < self.size && idx.y() < self.size,
            "{} out of bounds for a {}x{} grid",
            idx,
            self.size,
            self.size
        );
        idx.y() * self.size + idx.x()
    }

    fn set(&mut self, idx: &Idx, value: Tile) {
        let offset = self.offset(idx);
        self.cells[offset] = value;
    }

    fn place_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(Idx, Tile)> {
        let idx = self.empty_cells().choose(rng).ok_or(Error::GridFull)?;
        let weights =
            WeightedIndex::new(NEW_TILE_WEIGHTS).expect("NEW_TILE_WEIGHTS should never be empty");
        let value = NEW_TILE_CHOICES[weights.sample(rng)];
        self.set(&idx, value);
        Ok((idx, value))
    }

    fn is_stuck(&self) -> bool {
        if self.cells.contains(&0) {
            return false;
        }
        for y in 0..self.size {
            for x in 0..self.size {
                let value = self.get(&Idx(x, y));
                if x + 1 < self.size && mergeable(value, self.get(&Idx(x + 1, y))) {
                    return false;
                }
                if y + 1 < self.size && mergeable(value, self.get(&Idx(x, y + 1))) {
                    return false;
                }
            }
        }
        true
    }
}

fn mergeable(a: Tile, b: Tile) -> bool {
    a == b && a < MAX_TILE
}

/// Merges a compacted line from its leading edge and pads it with zeros back to `len`.
///
/// Returns the new line and the sum of the tiles produced by merges.
fn merge_line(tiles: &[Tile], len: usize) -> (Vec<Tile>, Score) {
    let mut merged = Vec::with_capacity(len);
    let mut gained: Score = 0;
    let mut i = 0;
    while i < tiles.len() {
        match tiles.get(i + 1) {
            Some(next) if mergeable(tiles[i], *next) => {
                let value = tiles[i] * 2;
                merged.push(value);
                gained += Score::from(value);
                // both tiles are consumed so the new tile can't merge again this move
                i += 2;
            }
            _ => {
                merged.push(tiles[i]);
                i += 1;
            }
        }
    }
    merged.resize(len, 0);
    (merged, gained)
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.max_tile().max(2).to_string().len() + 1;
        writeln!(f, "score: {}", self.score)?;
        for row in self.rows() {
            for value in row {
                match value {
                    0 => write!(f, "{:>width$}", ".", width = width)?,
                    v => write!(f, "{:>width$}", v, width = width)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Cell indices of every line of a `width` x `width` grid, each line ordered from the edge the
/// tiles slide toward.
fn lines(width: usize, direction: Direction) -> impl Iterator<Item = Vec<Idx>> {
    let far = width - 1;
    (0..width).map(move |line| {
        (0..width)
            .map(|pos| match direction {
                Direction::Left => Idx(pos, line),
                Direction::Right => Idx(far - pos, line),
                Direction::Up => Idx(line, pos),
                Direction::Down => Idx(line, far - pos),
            })
            .collect()
    })
}
