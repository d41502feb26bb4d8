//! Arena replay viewer (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so integration tests and
//! benches can use `arena_replay::{core, input, loader, term, types}`.

pub use arena_replay_core as core;
pub use arena_replay_input as input;
pub use arena_replay_loader as loader;
pub use arena_replay_term as term;
pub use arena_replay_types as types;
