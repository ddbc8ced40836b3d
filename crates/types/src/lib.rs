//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so the same
//! definitions are usable by the engine, the terminal front end and the tests.
//!
//! # Grid Dimensions
//!
//! - **Width**: 16 columns (indexed 0-15)
//! - **Height**: 22 rows (indexed 0-21, row 0 is the top)
//! - **Spawn anchor**: column 8 (`GRID_WIDTH / 2`), row 0
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_FALL_MS` | 300 | Fall interval at level 1 |
//! | `SOFT_DROP_FALL_MS` | 50 | Fall interval while soft dropping |
//! | `FREE_FALL_MS` | 10 | Fall interval while free falling |
//! | `LOCK_DELAY_MS` | 150 | Grace period before a bottomed piece locks |
//! | `LATERAL_DELAY_MS` | 150 | Hold time before a held direction starts repeating |
//! | `LATERAL_REPEAT_MS` | 70 | Auto-repeat rate for a held direction |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, LevelThreshold, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("freeFall"), Some(GameAction::FreeFall));
//! assert_eq!(LevelThreshold::Quadratic.lines_needed(3), 9);
//!
//! assert_eq!(GRID_WIDTH, 16);
//! assert_eq!(GRID_HEIGHT, 22);
//! ```

/// Grid width in cells (16 columns)
pub const GRID_WIDTH: u8 = 16;

/// Grid height in cells (22 rows)
pub const GRID_HEIGHT: u8 = 22;

/// Number of units in every tetromino
pub const PIECE_SIZE: usize = 4;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall interval at level 1 (one row every 300ms)
pub const BASE_FALL_MS: u32 = 300;

/// Fall interval shrink per level, in percent of the base interval.
pub const FALL_SPEEDUP_PERCENT: u32 = 10;

/// Fall interval while soft dropping.
pub const SOFT_DROP_FALL_MS: u32 = 50;

/// Fall interval while free falling (hard drop).
pub const FREE_FALL_MS: u32 = 10;

/// Grace period before a bottomed piece locks.
pub const LOCK_DELAY_MS: u32 = 150;

/// How long a left/right key must be held before it starts repeating.
pub const LATERAL_DELAY_MS: u32 = 150;

/// Auto-repeat interval for a held left/right key.
pub const LATERAL_REPEAT_MS: u32 = 70;

/// Points per cleared line, multiplied by the current level.
pub const LINE_SCORE: u32 = 10;

/// Flat bonus for a lock that leaves the grid completely empty.
pub const GRID_CLEAR_BONUS: u32 = 50;

/// Level a new game starts at.
pub const START_LEVEL: u32 = 1;


/// The seven tetromino shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every shape, in selector index order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Map a selector index (0..7) to a shape.
    ///
    /// Returns `None` for anything outside the closed range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Lifecycle of the active piece
///
/// `New -> Falling -> (Bottomed <-> Falling) -> Locked`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceState {
    /// Built from the spawn table, not yet handed to the engine.
    #[default]
    New,
    /// Descending under gravity.
    Falling,
    /// Resting on the floor or the stack; the lock delay is running.
    Bottomed,
    /// Committed to the grid.
    Locked,
}

impl PieceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceState::New => "new",
            PieceState::Falling => "falling",
            PieceState::Bottomed => "bottomed",
            PieceState::Locked => "locked",
        }
    }
}

/// Gameplay intents accepted by the engine
///
/// The engine never sees raw key codes; front ends map their input to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° around its pivot unit
    Rotate,
    /// Shrink the fall interval until the next piece
    SoftDrop,
    /// Minimum fall interval until the next piece (hard drop)
    FreeFall,
    /// Toggle pause state
    Pause,
    /// Reset grid, counters and level
    Restart,
    /// Jump straight to the next level
    SkipLevel,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::FreeFall));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "softdrop" => Some(GameAction::SoftDrop),
            "freefall" | "harddrop" => Some(GameAction::FreeFall),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "skiplevel" => Some(GameAction::SkipLevel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::FreeFall => "freeFall",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::SkipLevel => "skipLevel",
        }
    }
}

/// Lines a level asks for before the next one starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelThreshold {
    /// `level * level`
    #[default]
    Quadratic,
    /// `base + (level - 1) * increment`
    Linear { base: u32, increment: u32 },
}

impl LevelThreshold {
    /// Lines needed to leave `level`. Never less than 1.
    pub fn lines_needed(&self, level: u32) -> u32 {
        let needed = match *self {
            LevelThreshold::Quadratic => level.saturating_mul(level),
            LevelThreshold::Linear { base, increment } => {
                base.saturating_add(level.saturating_sub(1).saturating_mul(increment))
            }
        };
        needed.max(1)
    }

    /// Parse `quadratic` or `linear:<base>:<increment>` (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let mut parts = lower.split(':');
        match parts.next()? {
            "quadratic" if parts.next().is_none() => Some(LevelThreshold::Quadratic),
            "linear" => {
                let base = parts.next()?.parse().ok()?;
                let increment = parts.next()?.parse().ok()?;
                if parts.next().is_some() {
                    return None;
                }
                Some(LevelThreshold::Linear { base, increment })
            }
            _ => None,
        }
    }
}

/// Tunables that differ between rule variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub level_threshold: LevelThreshold,
    /// Grace period (ms) a bottomed piece waits before locking. 0 locks on contact.
    pub lock_delay_ms: u32,
    /// Whether a bottomed piece may still slide sideways.
    pub allow_lateral_move_while_bottomed: bool,
    pub base_fall_ms: u32,
    pub soft_drop_fall_ms: u32,
    pub free_fall_ms: u32,
    pub grid_clear_bonus: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level_threshold: LevelThreshold::Quadratic,
            lock_delay_ms: LOCK_DELAY_MS,
            allow_lateral_move_while_bottomed: true,
            base_fall_ms: BASE_FALL_MS,
            soft_drop_fall_ms: SOFT_DROP_FALL_MS,
            free_fall_ms: FREE_FALL_MS,
            grid_clear_bonus: GRID_CLEAR_BONUS,
        }
    }
}

/// A grid cell: `true` when occupied.
pub type Cell = bool;
