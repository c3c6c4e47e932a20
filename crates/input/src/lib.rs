//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the engine's discrete
//! [`crate::types::Command`]s, plus the two session keys (quit, restart) that
//! the runner handles itself. No repeat logic: every key press is one command.

pub mod map;

pub use tui_blockfall_types as types;

pub use map::{handle_key_event, should_quit, should_restart};
