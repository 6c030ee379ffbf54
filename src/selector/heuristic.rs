//! Static positional evaluation of a grid, biased toward stacking large tiles in the
//! bottom-right corner.
//!
//! Every term is a pure function of the cells, so the same grid always scores the same.

use crate::engine::{Grid, Idx, Tile};

const INCREASING_ROW_BONUS: f64 = 150.0;
const DECREASING_ROW_BONUS: f64 = 100.0;
const EMPTY_CELL_WEIGHT: f64 = 100.0;
const CORNER_WEIGHT: f64 = 2.0;
const QUADRANT_WEIGHT: f64 = 1.0;
const MERGE_WEIGHT: f64 = 10.0;
const SNAKE_WEIGHT: f64 = 0.5;

/// Sum of all heuristic terms for `grid`; higher is better.
pub fn evaluate(grid: &Grid) -> f64 {
    positional(grid)
        + monotonic_rows(grid)
        + empty_cells(grid)
        + corner(grid)
        + merge_potential(grid)
        + snake(grid)
}

// weight is 1 in the top-left corner and grows by one per step toward the bottom-right corner
fn positional(grid: &Grid) -> f64 {
    grid.rows()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, value)| f64::from(*value) * (y + x + 1) as f64)
        })
        .sum()
}

fn monotonic_rows(grid: &Grid) -> f64 {
    grid.rows().map(row_bonus).sum()
}

// only neighbouring cells that are both occupied are compared
fn row_bonus(row: &[Tile]) -> f64 {
    let occupied = row.iter().filter(|value| **value > 0).count();
    if occupied < 2 {
        return 0.0;
    }
    let mut increasing = true;
    let mut decreasing = true;
    for pair in row.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a == 0 || b == 0 {
            continue;
        }
        if a > b {
            increasing = false;
        }
        if a < b {
            decreasing = false;
        }
    }
    if increasing {
        INCREASING_ROW_BONUS
    } else if decreasing {
        DECREASING_ROW_BONUS
    } else {
        0.0
    }
}

fn empty_cells(grid: &Grid) -> f64 {
    grid.empty_count() as f64 * EMPTY_CELL_WEIGHT
}

fn corner(grid: &Grid) -> f64 {
    let size = grid.size();
    let mut max: Option<(Idx, Tile)> = None;
    for (offset, value) in grid.cells().iter().enumerate() {
        // first occurrence wins on ties
        if *value > max.as_ref().map_or(0, |(_, v)| *v) {
            max = Some((Idx(offset % size, offset / size), *value));
        }
    }
    let (idx, value) = match max {
        Some(m) => m,
        None => return 0.0,
    };
    let far = size - 1;
    let half = size / 2;
    if idx.x() == far && idx.y() == far {
        f64::from(value) * CORNER_WEIGHT
    } else if idx.x() >= half && idx.y() >= half {
        f64::from(value) * QUADRANT_WEIGHT
    } else {
        0.0
    }
}

fn merge_potential(grid: &Grid) -> f64 {
    let size = grid.size();
    let mut total = 0.0;
    for y in 0..size {
        for x in 0..size {
            let value = grid.get(&Idx(x, y));
            if value == 0 {
                continue;
            }
            if x + 1 < size && grid.get(&Idx(x + 1, y)) == value {
                total += f64::from(value) * MERGE_WEIGHT;
            }
            if y + 1 < size && grid.get(&Idx(x, y + 1)) == value {
                total += f64::from(value) * MERGE_WEIGHT;
            }
        }
    }
    total
}

// rows sharing the bottom row's parity reward tiles toward the right edge, the others toward the
// left edge, tracing a snake that ends in the bottom-right corner
fn snake(grid: &Grid) -> f64 {
    let size = grid.size();
    let last_parity = (size - 1) % 2;
    let mut total = 0.0;
    for (y, row) in grid.rows().enumerate() {
        for (x, value) in row.iter().enumerate() {
            let weight = if y % 2 == last_parity { x + 1 } else { size - x };
            total += f64::from(*value) * weight as f64;
        }
    }
    total * SNAKE_WEIGHT
}
