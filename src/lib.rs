//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `blockfall::{core,input,scores,term,types}`
//! and hosts the driver pieces shared by the binary and the integration tests:
//! environment config, logging setup and the screen state machine.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_scores as scores;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod app;
pub mod config;
pub mod logging;
