//! Game state module - the lock and line-clear engine
//!
//! Owns the grid, the active piece, the score/level counters and the timers.
//! The caller drives it with [`GameState::tick`] once per frame and feeds
//! player intents through [`GameState::apply_action`].

use log::{debug, info, warn};

use crate::grid::{ClearedRows, Grid};
use crate::movement::{
    can_move_down, can_move_horizontally, drop_distance, move_down, move_horizontally, rotate,
};
use crate::pieces::{PieceUnits, Tetromino};
use crate::rng::{RandomSelector, ShapeSelector};
use crate::scoring::{fall_interval_ms, lock_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::*;

/// Gravity mode for the current piece. Reset to `Normal` on every spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallMode {
    #[default]
    Normal,
    Soft,
    Free,
}

/// What happened when the last piece locked.
///
/// Taken once by the presentation layer via [`GameState::take_last_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// Where the piece was committed.
    pub units: PieceUnits,
    pub lines_cleared: u32,
    /// Pre-clear indices of the removed rows, bottom-most first.
    pub cleared_rows: ClearedRows,
    /// Score added by this lock, bonus included (before any level reset).
    pub score_gained: u32,
    /// The clear left the grid completely empty.
    pub grid_cleared: bool,
    pub level_up: bool,
    pub game_over: bool,
}

/// Complete engine state
#[derive(Debug, Clone)]
pub struct GameState<S = RandomSelector> {
    config: EngineConfig,
    grid: Grid,
    active: Option<Tetromino>,
    selector: S,
    score: u32,
    level: u32,
    lines_total: u32,
    lines_this_level: u32,
    /// Monotonic count of successful spawns.
    pieces_spawned: u32,
    fall_mode: FallMode,
    fall_timer_ms: u32,
    lock_timer_ms: u32,
    last_event: Option<LockEvent>,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState<RandomSelector> {
    /// Default rules, entropy-seeded shapes.
    pub fn new() -> Self {
        Self::with_selector(EngineConfig::default(), RandomSelector::new())
    }

    /// Default rules, reproducible shape sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_selector(EngineConfig::default(), RandomSelector::seeded(seed))
    }
}

impl Default for GameState<RandomSelector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ShapeSelector> GameState<S> {
    pub fn with_selector(config: EngineConfig, selector: S) -> Self {
        Self {
            config,
            grid: Grid::new(),
            active: None,
            selector,
            score: 0,
            level: START_LEVEL,
            lines_total: 0,
            lines_this_level: 0,
            pieces_spawned: 0,
            fall_mode: FallMode::Normal,
            fall_timer_ms: 0,
            lock_timer_ms: 0,
            last_event: None,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_total(&self) -> u32 {
        self.lines_total
    }

    pub fn lines_this_level(&self) -> u32 {
        self.lines_this_level
    }

    /// Lines the current level asks for.
    pub fn lines_needed(&self) -> u32 {
        self.config.level_threshold.lines_needed(self.level)
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn fall_mode(&self) -> FallMode {
        self.fall_mode
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replace the locked grid, e.g. to set up a puzzle before `start`.
    ///
    /// Returns false and keeps the current grid when the new one overlaps
    /// the active piece.
    pub fn set_grid(&mut self, grid: Grid) -> bool {
        if let Some(piece) = &self.active {
            if !piece.is_valid(&grid) {
                warn!("set_grid rejected, overlaps active piece: {:?}", piece.units);
                return false;
            }
        }
        self.grid = grid;
        true
    }

    /// Interval between gravity steps for the current level and fall mode.
    pub fn fall_interval_ms(&self) -> u32 {
        let normal = fall_interval_ms(
            self.level,
            self.config.base_fall_ms,
            self.config.free_fall_ms,
        );
        match self.fall_mode {
            FallMode::Normal => normal,
            FallMode::Soft => normal.min(self.config.soft_drop_fall_ms),
            FallMode::Free => self.config.free_fall_ms,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.grid);

        out.active = self.active.map(ActiveSnapshot::from);
        out.landing = self.landing_units();
        out.score = self.score;
        out.level = self.level;
        out.lines_total = self.lines_total;
        out.lines_this_level = self.lines_this_level;
        out.lines_needed = self.lines_needed();
        out.fall_interval_ms = self.fall_interval_ms();
        out.pieces_spawned = self.pieces_spawned;
        out.timers = TimersSnapshot {
            fall_ms: self.fall_timer_ms,
            lock_ms: self.lock_timer_ms,
        };
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Resting position of the active piece if it dropped straight down.
    pub fn landing_units(&self) -> Option<PieceUnits> {
        let piece = self.active?;
        let distance = drop_distance(&piece, &self.grid) as i8;
        Some(piece.units.map(|(x, y)| (x, y + distance)))
    }

    /// Draw the next shape and place it at the spawn anchor.
    ///
    /// Sets game over and returns false if the spawn cells are occupied.
    pub fn spawn_piece(&mut self) -> bool {
        debug_assert!(
            self.active.is_none(),
            "spawn while a piece is still active"
        );

        let kind = self.selector.next_shape();
        let mut piece = Tetromino::spawn(kind);

        self.fall_mode = FallMode::Normal;
        self.fall_timer_ms = 0;
        self.lock_timer_ms = 0;

        if !piece.is_valid(&self.grid) {
            info!(
                "game over: {} blocked at spawn (lines={}, level={})",
                kind.as_str(),
                self.lines_total,
                self.level
            );
            self.active = None;
            self.game_over = true;
            return false;
        }

        piece.state = PieceState::Falling;
        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        true
    }

    fn accepts_input(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    /// Slide the active piece `dx` columns if the rules allow it.
    pub fn try_move(&mut self, dx: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        // A free-falling piece is committed to its column until it lands.
        if self.fall_mode == FallMode::Free && !piece.is_bottomed() {
            return false;
        }

        if !can_move_horizontally(
            &piece,
            &self.grid,
            dx,
            self.config.allow_lateral_move_while_bottomed,
        ) {
            return false;
        }

        move_horizontally(&mut piece, dx);
        self.active = Some(piece);
        true
    }

    /// Rotate the active piece around its pivot. False if rejected.
    pub fn try_rotate(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let rotated = rotate(&piece, &self.grid);
        if rotated == piece {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Advance gravity and the lock delay by `elapsed_ms`.
    ///
    /// Returns true when the active piece moved, bottomed or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused || self.game_over || !self.started {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);

        // A bottomed piece is re-checked every tick, not on the gravity clock.
        let bottomed = piece.is_bottomed();
        if !bottomed && self.fall_timer_ms < self.fall_interval_ms() {
            return false;
        }
        self.fall_timer_ms = 0;

        if can_move_down(&piece, &self.grid) {
            move_down(&mut piece);
            piece.state = PieceState::Falling;
            self.lock_timer_ms = 0;
            self.active = Some(piece);
            return true;
        }

        if bottomed {
            self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
        } else {
            piece.state = PieceState::Bottomed;
            self.active = Some(piece);
        }

        if self.lock_timer_ms < self.config.lock_delay_ms {
            return !bottomed;
        }

        self.lock_piece();
        true
    }

    /// Commit the active piece, clear lines, score, level up, then spawn.
    pub fn lock_piece(&mut self) {
        let Some(mut piece) = self.active.take() else {
            return;
        };
        piece.state = PieceState::Locked;
        self.lock_timer_ms = 0;

        let locked = self.grid.lock_cells(&piece.units);
        debug_assert!(locked, "active piece overlaps the stack: {:?}", piece.units);
        if !locked {
            warn!("lock rejected, piece overlaps the stack: {:?}", piece.units);
        }

        let cleared_rows = self.grid.clear_full_rows();
        let lines_cleared = cleared_rows.len() as u32;
        let grid_cleared = lines_cleared > 0 && self.grid.is_empty();
        let score_gained = lock_score(
            lines_cleared,
            self.level,
            grid_cleared,
            self.config.grid_clear_bonus,
        );

        self.score = self.score.saturating_add(score_gained);
        self.lines_total += lines_cleared;
        self.lines_this_level += lines_cleared;

        debug!(
            "locked {} at {:?}: lines={} rows={:?} +{} grid_cleared={}",
            piece.kind.as_str(),
            piece.units,
            lines_cleared,
            cleared_rows.as_slice(),
            score_gained,
            grid_cleared
        );

        let level_up = self.lines_this_level >= self.lines_needed();
        if level_up {
            self.advance_level();
        }

        // The level-up wipe leaves nothing for the top-out check to see.
        if !level_up && piece.top_row() <= 0 {
            info!(
                "game over: stack reached row 0 (lines={}, level={})",
                self.lines_total, self.level
            );
            self.game_over = true;
        } else {
            self.spawn_piece();
        }

        self.last_event = Some(LockEvent {
            units: piece.units,
            lines_cleared,
            cleared_rows,
            score_gained,
            grid_cleared,
            level_up,
            game_over: self.game_over,
        });
    }

    /// Next level: counters and score reset, grid wiped, gravity speeds up.
    fn advance_level(&mut self) {
        self.level += 1;
        self.lines_this_level = 0;
        self.score = 0;
        self.grid.clear();
        self.fall_timer_ms = 0;
        info!(
            "level up: level={} fall_interval={}ms lines_total={}",
            self.level,
            self.fall_interval_ms(),
            self.lines_total
        );
    }

    /// Jump to the next level without clearing lines; the current piece is replaced.
    pub fn skip_level(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.active = None;
        self.advance_level();
        self.spawn_piece();
        true
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn last_event(&self) -> Option<&LockEvent> {
        self.last_event.as_ref()
    }

    /// Back to a fresh, unstarted game. Rules and selector are kept.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.active = None;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines_total = 0;
        self.lines_this_level = 0;
        self.pieces_spawned = 0;
        self.fall_mode = FallMode::Normal;
        self.fall_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.last_event = None;
        self.paused = false;
        self.game_over = false;
        self.started = false;
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if !self.started || self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.reset();
                self.start();
                true
            }
            _ if !self.accepts_input() || self.active.is_none() => false,
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::Rotate => self.try_rotate(),
            GameAction::SoftDrop => {
                if self.fall_mode == FallMode::Normal {
                    self.fall_mode = FallMode::Soft;
                }
                true
            }
            GameAction::FreeFall => {
                self.fall_mode = FallMode::Free;
                true
            }
            GameAction::SkipLevel => self.skip_level(),
        }
    }
}
