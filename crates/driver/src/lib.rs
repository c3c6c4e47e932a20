//! Timer driver for the game engine.
//!
//! The engine has no clock. This crate owns the cadence: [`TickScheduler`]
//! keeps exactly one pending deadline that can be replaced or cancelled, and
//! [`GameDriver`] pairs it with an engine so interval changes (level-ups) and
//! game over are picked up right after the tick or command that caused them.

pub mod game_driver;
pub mod scheduler;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use game_driver::GameDriver;
pub use scheduler::TickScheduler;
