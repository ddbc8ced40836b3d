use crate::pieces::{PieceUnits, Tetromino};
use crate::types::{PieceKind, PieceState, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub units: PieceUnits,
    pub state: PieceState,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            units: value.units,
            state: value.state,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub fall_ms: u32,
    pub lock_ms: u32,
}

/// Read-only view of the engine for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Where the active piece would come to rest.
    pub landing: Option<PieceUnits>,
    pub score: u32,
    pub level: u32,
    pub lines_total: u32,
    pub lines_this_level: u32,
    pub lines_needed: u32,
    pub fall_interval_ms: u32,
    pub pieces_spawned: u32,
    pub timers: TimersSnapshot,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }

    /// Occupied cells in the locked grid (active piece excluded).
    pub fn occupied_count(&self) -> usize {
        self.grid.iter().flatten().filter(|&&c| c != 0).count()
    }

    /// Fraction of the current level's line target, clamped to 1.0.
    pub fn level_progress(&self) -> f32 {
        if self.lines_needed == 0 {
            return 1.0;
        }
        (self.lines_this_level as f32 / self.lines_needed as f32).min(1.0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            landing: None,
            score: 0,
            level: 0,
            lines_total: 0,
            lines_this_level: 0,
            lines_needed: 0,
            fall_interval_ms: 0,
            pieces_spawned: 0,
            timers: TimersSnapshot::default(),
            started: false,
            paused: false,
            game_over: false,
        }
    }
}
