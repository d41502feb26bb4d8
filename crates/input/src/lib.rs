//! Terminal input module.
//!
//! Maps `crossterm` key and mouse events into
//! [`ViewerCommand`](crate::types::ViewerCommand)s. The viewer core never sees
//! terminal events; this crate is the only place that knows about them.

pub mod map;
pub mod mouse;

pub use arena_replay_types as types;

pub use map::{handle_key_event, should_quit, PAN_STEP};
pub use mouse::DragTracker;
