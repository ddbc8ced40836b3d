//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`] and repeats
//! a held lateral direction at a fixed rate. Terminals that never report key
//! releases are handled with a release timeout.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{handle_key_event, is_lateral, should_quit};
