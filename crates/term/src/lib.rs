//! Terminal rendering for the falling-block game.
//!
//! [`GameView`] turns a snapshot into a [`FrameBuffer`] without any I/O;
//! [`TerminalRenderer`] owns the terminal and flushes frames with diffing.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
