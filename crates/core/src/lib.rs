//! Core replay logic - pure, deterministic, and testable
//!
//! This crate contains the playback model of the viewer. It has **no
//! dependencies** on a terminal, network or audio device:
//!
//! - **Deterministic**: every timed operation takes an explicit `now_ms`
//! - **Testable**: surfaces are traits, tests plug in recorders
//! - **Single-threaded**: one owner mutates the clock, no locks
//!
//! # Module Structure
//!
//! - [`clock`]: frame store, current index, play/stop state and tick schedule
//! - [`camera`]: camera fit around living players and the view transform
//! - [`tween`]: easing, tweens and the per-entity animation map
//! - [`palette`]: golden-ratio player colors
//! - [`director`]: dispatches frames to the render/audio surfaces
//! - [`viewer`]: command surface (start/stop/seek/step/speed/pan/zoom)
//!
//! # Example
//!
//! ```
//! use arena_replay_core::{Canvas, MuteAudio, RecordingSurface, Viewer, ViewerConfig};
//! use arena_replay_core::types::{ArenaMap, Frame};
//!
//! let mut surface = RecordingSurface::default();
//! let mut audio = MuteAudio;
//! let mut viewer = Viewer::new(ViewerConfig::default(), Canvas::new(1000.0, 800.0));
//! viewer.load(ArenaMap::default(), vec![Frame::default(); 3], 0, &mut surface, &mut audio);
//!
//! assert!(viewer.start(0));
//! viewer.poll(250, &mut surface, &mut audio);
//! assert_eq!(viewer.clock().current_index(), 1);
//! ```

pub mod camera;
pub mod clock;
pub mod director;
pub mod palette;
pub mod recording;
pub mod surface;
pub mod tween;
pub mod viewer;

pub use arena_replay_types as types;

pub use camera::{fit_target, fit_view, Canvas, FitParams, FitTarget, ViewTransform};
pub use clock::{ClockState, PlaybackClock, TickSchedule};
pub use director::Director;
pub use palette::{hsv_to_rgb, Palette};
pub use recording::RecordingSurface;
pub use surface::{AudioSurface, MuteAudio, RenderSurface};
pub use tween::{Animated, Easing, Lerp, Track, Tween};
pub use viewer::{faster_preset, slower_preset, Viewer, ViewerConfig};
