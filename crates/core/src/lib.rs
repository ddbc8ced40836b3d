//! Core game logic - pure, deterministic and testable
//!
//! Everything needed to run a game of blockfall without a terminal: the grid,
//! the seven shapes, movement and rotation rules, scoring, level pacing and
//! the lock/line-clear engine. No I/O happens here; the only side channel is
//! the `log` facade.
//!
//! # Module Structure
//!
//! - [`grid`]: 16x22 occupancy grid, row clearing
//! - [`pieces`]: spawn table, [`Tetromino`], pivot rotation
//! - [`movement`]: collision queries and moves for the active piece
//! - [`rng`]: shape selection ([`ShapeSelector`])
//! - [`scoring`]: line-clear points and fall intervals
//! - [`game_state`]: the engine ([`GameState`])
//! - [`snapshot`]: read-only view for rendering
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, SequenceSelector};
//! use blockfall_core::types::{EngineConfig, GameAction, PieceKind};
//!
//! let mut game = GameState::with_selector(
//!     EngineConfig::default(),
//!     SequenceSelector::repeat(PieceKind::O),
//! );
//! game.start();
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::FreeFall);
//! while game.take_last_event().is_none() {
//!     game.tick(16);
//! }
//! assert_eq!(game.grid().occupied_count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`] once per frame with the elapsed milliseconds.
//! Gravity starts at 300ms per row and speeds up 10% of the base per level;
//! a bottomed piece locks after 150ms unless it can fall again.

pub mod game_state;
pub mod grid;
pub mod movement;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use game_state::{FallMode, GameState, LockEvent};
pub use grid::{ClearedRows, Grid};
pub use movement::{can_move_down, can_move_horizontally, drop_distance, rotate};
pub use pieces::{spawn_units, PieceUnits, Tetromino, Unit};
pub use rng::{RandomSelector, SequenceSelector, ShapeSelector};
pub use scoring::{fall_interval_ms, line_clear_score, lock_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
