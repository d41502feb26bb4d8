//! Frame source loading.
//!
//! Replays come from a local file or a remote `http(s)://` identifier. Loading
//! is asynchronous (tokio + reqwest); the decoded [`Replay`] holds the static
//! map and the ordered frames.
//!
//! # Example
//!
//! ```
//! use arena_replay_loader::{parse_replay, FrameSource};
//!
//! let text = "{\"radius\": 300}\n{\"radius\": 300, \"players\": []}\n";
//! let replay = parse_replay(text).unwrap();
//! assert_eq!(replay.frames.len(), 1);
//!
//! assert!(matches!(FrameSource::parse("https://x/y.log"), FrameSource::Url(_)));
//! ```

pub mod error;
pub mod load;
pub mod parse;
pub mod source;

pub use arena_replay_types as types;

pub use error::LoadError;
pub use load::{load, load_blocking, spawn_load, LoadEvent};
pub use parse::{parse_replay, Replay};
pub use source::FrameSource;
