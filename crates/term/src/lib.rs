//! Terminal "game renderer" module.
//!
//! A small game-oriented rendering layer: views draw into a [`FrameBuffer`]
//! and [`TerminalRenderer`] flushes the changed cells through `crossterm`.
//! Views are pure and unit-tested against framebuffer contents.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod screens;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, HudFlash, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screens::{
    render_game_over, render_leaderboard, render_level_up, render_manual, render_menu,
    LeaderboardRow, MENU_ITEMS,
};
