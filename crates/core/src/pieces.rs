//! Pieces module - spawn table, the `Tetromino` type and pivot rotation
//!
//! Every shape is four units. Unit 0 is the pivot and always spawns at
//! column `GRID_WIDTH / 2`, row 0. Rotation turns units 1..3 a quarter turn
//! around the pivot; there are no wall kicks.

use crate::grid::Grid;
use crate::types::{PieceKind, PieceState, GRID_WIDTH, PIECE_SIZE};

/// Offset or absolute grid position of a single unit, as (x, y)
pub type Unit = (i8, i8);

/// Four units making up a piece
pub type PieceUnits = [Unit; PIECE_SIZE];

/// Column of the pivot unit on spawn
pub const SPAWN_COLUMN: i8 = (GRID_WIDTH / 2) as i8;

/// Spawn offsets relative to the pivot, unit 0 first.
pub fn spawn_offsets(kind: PieceKind) -> PieceUnits {
    match kind {
        PieceKind::I => [(0, 0), (-1, 0), (1, 0), (2, 0)],
        PieceKind::J => [(0, 0), (0, 1), (0, 2), (-1, 2)],
        PieceKind::L => [(0, 0), (0, 1), (0, 2), (1, 2)],
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::S => [(0, 0), (1, 0), (0, 1), (-1, 1)],
        PieceKind::T => [(0, 0), (-1, 1), (0, 1), (1, 1)],
        PieceKind::Z => [(0, 0), (-1, 0), (0, 1), (1, 1)],
    }
}

/// Absolute unit positions for a freshly spawned piece.
pub fn spawn_units(kind: PieceKind) -> PieceUnits {
    spawn_offsets(kind).map(|(dx, dy)| (SPAWN_COLUMN + dx, dy))
}

/// Turn units 1..3 a quarter turn around unit 0: `(dx, dy) -> (dy, -dx)`.
///
/// Returns `None` if any rotated unit fails `is_valid`; there is no partial
/// result and no kick.
pub fn rotate_units(units: &PieceUnits, is_valid: impl Fn(i8, i8) -> bool) -> Option<PieceUnits> {
    let (px, py) = units[0];
    let mut rotated = *units;

    for unit in rotated.iter_mut().skip(1) {
        let (dx, dy) = (unit.0 - px, unit.1 - py);
        *unit = (px + dy, py - dx);
    }

    if rotated.iter().all(|&(x, y)| is_valid(x, y)) {
        Some(rotated)
    } else {
        None
    }
}

/// The active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub units: PieceUnits,
    pub state: PieceState,
}

impl Tetromino {
    /// Create a new piece at the spawn anchor in state `New`.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            units: spawn_units(kind),
            state: PieceState::New,
        }
    }

    pub fn size(&self) -> usize {
        PIECE_SIZE
    }

    /// All units in bounds and on empty cells
    pub fn is_valid(&self, grid: &Grid) -> bool {
        self.units.iter().all(|&(x, y)| grid.is_valid(x, y))
    }

    pub fn is_bottomed(&self) -> bool {
        self.state == PieceState::Bottomed
    }

    /// Topmost row touched by any unit.
    pub fn top_row(&self) -> i8 {
        self.units.iter().map(|&(_, y)| y).min().unwrap_or(0)
    }
}
