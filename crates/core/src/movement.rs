//! Collision and movement rules for the active piece.
//!
//! Queries (`can_*`) never mutate. Mutations (`move_*`) never check; callers
//! validate first. `rotate` is the one exception: it validates and returns
//! either the rotated piece or the input unchanged.

use crate::grid::Grid;
use crate::pieces::{rotate_units, Tetromino};

/// Whether shifting every unit by `dx` columns stays in bounds and on empty cells.
///
/// A bottomed piece may only slide when `allow_while_bottomed` is set.
pub fn can_move_horizontally(
    piece: &Tetromino,
    grid: &Grid,
    dx: i8,
    allow_while_bottomed: bool,
) -> bool {
    if piece.is_bottomed() && !allow_while_bottomed {
        return false;
    }

    piece
        .units
        .iter()
        .all(|&(x, y)| grid.is_valid(x + dx, y))
}

/// Shift every unit by `dx` columns.
pub fn move_horizontally(piece: &mut Tetromino, dx: i8) {
    for unit in piece.units.iter_mut() {
        unit.0 += dx;
    }
}

/// Whether every unit can drop one row without leaving the grid or overlapping.
pub fn can_move_down(piece: &Tetromino, grid: &Grid) -> bool {
    piece.units.iter().all(|&(x, y)| grid.is_valid(x, y + 1))
}

/// Drop every unit by one row.
pub fn move_down(piece: &mut Tetromino) {
    for unit in piece.units.iter_mut() {
        unit.1 += 1;
    }
}

/// Rotate around unit 0, or return the piece unchanged if the result would
/// leave the grid or overlap an occupied cell.
pub fn rotate(piece: &Tetromino, grid: &Grid) -> Tetromino {
    match rotate_units(&piece.units, |x, y| grid.is_valid(x, y)) {
        Some(units) => Tetromino { units, ..*piece },
        None => *piece,
    }
}

/// Rows the piece could still fall before resting.
pub fn drop_distance(piece: &Tetromino, grid: &Grid) -> u8 {
    let mut probe = *piece;
    let mut distance = 0;
    while can_move_down(&probe, grid) {
        move_down(&mut probe);
        distance += 1;
    }
    distance
}
