//! Terminal front end for the replay viewer.
//!
//! A small, game-oriented rendering layer: the director writes into a retained
//! [`Scene`], [`ReplayView`] rasterizes it into a [`FrameBuffer`], and
//! [`TerminalRenderer`] flushes only the changed cells through crossterm.
//! [`Captions`] stands in for the audio device by showing yap cues as text.
//!
//! Goals:
//! - Keep `core` deterministic and free of terminal types
//! - Keep rasterization pure so it can be unit-tested
//! - Square-ish world units (2 columns per row) so the arena stays round

pub mod captions;
pub mod fb;
pub mod render_throttle;
pub mod renderer;
pub mod replay_view;
pub mod scene;

pub use arena_replay_core as core;
pub use arena_replay_types as types;

pub use captions::Captions;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use replay_view::{PlaybackStatus, ReplayView, Viewport, PANEL_WIDTH};
pub use scene::{Scene, ScoreRow, Sprite};
