//! Seams to the drawing and audio backends.
//!
//! The core never talks to a terminal or sound device; it pushes updates into
//! these traits. The terminal crate provides the real implementations.

use crate::camera::ViewTransform;
use crate::types::{ArenaMap, MapItem, Player, Position, Rgb, Shooting};

/// Retained-mode drawing target.
pub trait RenderSurface {
    /// Static geometry, once per replay.
    fn load_map(&mut self, map: &ArenaMap);
    /// Current arena radius.
    fn set_radius(&mut self, radius: f64);
    /// Per-frame player attributes (name, health, weapon, ...).
    fn update_player(&mut self, player: &Player, color: Rgb);
    /// Animated on-screen position of a player, in world coordinates.
    fn move_player(&mut self, id: u32, at: Position);
    /// Forget every player whose id is not in `ids`.
    fn retain_players(&mut self, ids: &[u32]);
    fn set_items(&mut self, items: &[MapItem]);
    fn set_shootings(&mut self, shootings: &[Shooting]);
    fn set_scoreboard(&mut self, players: &[Player]);
    fn set_view(&mut self, view: ViewTransform);
}

/// Fire-and-forget audio cues keyed by identifier.
pub trait AudioSurface {
    fn ensure_loaded(&mut self, cue: &str);
    /// Play `cue` unless it is already playing.
    fn play_if_idle(&mut self, cue: &str, now_ms: u64);
}

/// Audio backend that drops every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct MuteAudio;

impl AudioSurface for MuteAudio {
    fn ensure_loaded(&mut self, _cue: &str) {}
    fn play_if_idle(&mut self, _cue: &str, _now_ms: u64) {}
}
