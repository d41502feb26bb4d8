//! Core types module - shared data structures and constants
//!
//! This module defines the replay data model used throughout the viewer.
//! Types are plain data with `serde` derives so the loader can decode frame logs
//! directly into them; nothing here depends on the terminal or on timing.
//!
//! # Replay Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FRAME_SPEED_MS` | 250 | Interval between recorded frames during playback |
//! | `MIN_FRAME_SPEED_MS` | 16 | Fastest allowed playback interval |
//! | `MAX_FRAME_SPEED_MS` | 5000 | Slowest allowed playback interval |
//! | `UI_TICK_MS` | 16 | Animation/redraw cadence of the terminal loop |
//!
//! # Camera Constants
//!
//! - `CAMERA_MARGIN`: 150 world units added around the living players
//! - `CAMERA_MIN_SIZE`: 500 world units, smallest target width/height
//!
//! # Examples
//!
//! ```
//! use arena_replay_types::{Frame, ViewerCommand, Weapon};
//!
//! let frame: Frame = serde_json::from_str(
//!     r#"{"radius": 300, "players": [], "items": []}"#,
//! ).unwrap();
//! assert!(frame.shootings.is_empty());
//!
//! assert_eq!(Weapon::from(2), Weapon::Pistol);
//! assert_eq!(ViewerCommand::TogglePlay.as_str(), "togglePlay");
//! ```

use serde::{Deserialize, Serialize};

/// Default playback interval between frames (milliseconds).
pub const DEFAULT_FRAME_SPEED_MS: u32 = 250;

/// Fastest playback interval accepted by the clock.
pub const MIN_FRAME_SPEED_MS: u32 = 16;

/// Slowest playback interval accepted by the clock.
pub const MAX_FRAME_SPEED_MS: u32 = 5000;

/// Speed presets cycled by the faster/slower commands, slowest first.
pub const SPEED_PRESETS_MS: [u32; 6] = [1000, 500, 250, 100, 50, 25];

/// Terminal loop cadence (16ms ≈ 60 FPS).
pub const UI_TICK_MS: u32 = 16;

/// World units added to the living-player bounding box.
pub const CAMERA_MARGIN: f64 = 150.0;

/// Minimum target width/height of the camera viewport in world units.
pub const CAMERA_MIN_SIZE: f64 = 500.0;

/// Number of entries in the player color palette.
pub const PALETTE_SIZE: usize = 16;

/// Zoom factor applied by a single zoom-in step.
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Zoom factor applied by a single zoom-out step.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Full health of a player; health bars are scaled against it.
pub const PLAYER_MAX_HEALTH: i32 = 100;

/// How long a yap caption stays visible (milliseconds).
pub const YAP_CAPTION_MS: u64 = 1500;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale each channel by `factor` (clamped to `[0, 1]`).
    pub fn dimmed(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: (self.r as f64 * f).round() as u8,
            g: (self.g as f64 * f).round() as u8,
            b: (self.b as f64 * f).round() as u8,
        }
    }
}

/// A point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A straight wall segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub a: Position,
    pub b: Position,
}

/// Static arena geometry, loaded once per replay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArenaMap {
    pub radius: f64,
    #[serde(default)]
    pub walls: Vec<Wall>,
}

/// Weapon carried by a player or lying on the ground.
///
/// Encoded as an integer in frame logs:
/// - **0**: no weapon
/// - **1**: knife
/// - **2**: pistol
/// - **3**: tommy gun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Weapon {
    #[default]
    None,
    Knife,
    Pistol,
    Tommy,
    Unknown(i64),
}

/// Static weapon properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub range: f64,
    pub damage: i32,
    pub reload_time: i32,
    pub ammo_capacity: i32,
}

impl WeaponStats {
    pub const NONE: WeaponStats = WeaponStats {
        range: 0.0,
        damage: 0,
        reload_time: 0,
        ammo_capacity: 0,
    };
}

impl Weapon {
    pub fn stats(&self) -> WeaponStats {
        match self {
            Weapon::None | Weapon::Unknown(_) => WeaponStats::NONE,
            Weapon::Knife => WeaponStats {
                range: 10.0,
                damage: 34,
                reload_time: 0,
                ammo_capacity: 1,
            },
            Weapon::Pistol => WeaponStats {
                range: 25.0,
                damage: 5,
                reload_time: 2,
                ammo_capacity: 10,
            },
            Weapon::Tommy => WeaponStats {
                range: 50.0,
                damage: 8,
                reload_time: 4,
                ammo_capacity: 25,
            },
        }
    }
}

impl From<i64> for Weapon {
    fn from(value: i64) -> Self {
        match value {
            0 => Weapon::None,
            1 => Weapon::Knife,
            2 => Weapon::Pistol,
            3 => Weapon::Tommy,
            other => Weapon::Unknown(other),
        }
    }
}

impl From<Weapon> for i64 {
    fn from(value: Weapon) -> Self {
        match value {
            Weapon::None => 0,
            Weapon::Knife => 1,
            Weapon::Pistol => 2,
            Weapon::Tommy => 3,
            Weapon::Unknown(other) => other,
        }
    }
}

/// Kind of pickup lying on the map (integer `type` in frame logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ItemKind {
    Weapon,
    Health,
    Unknown(i64),
}

impl From<i64> for ItemKind {
    fn from(value: i64) -> Self {
        match value {
            0 => ItemKind::Weapon,
            1 => ItemKind::Health,
            other => ItemKind::Unknown(other),
        }
    }
}

impl From<ItemKind> for i64 {
    fn from(value: ItemKind) -> Self {
        match value {
            ItemKind::Weapon => 0,
            ItemKind::Health => 1,
            ItemKind::Unknown(other) => other,
        }
    }
}

/// One player as recorded in a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub health: i32,
    #[serde(default)]
    pub weapon: Weapon,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub loaded_ammo: i32,
    #[serde(default)]
    pub reload_cooldown: i32,
}

impl Player {
    /// Players with `health <= 0` are drawn as defeated and ignored by the camera.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// A pickup lying on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapItem {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub weapon: Weapon,
}

/// A shot fired during the frame, from one player at another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shooting {
    pub player_id: u32,
    pub target_id: u32,
}

/// One recorded snapshot of the game.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub radius: f64,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub items: Vec<MapItem>,
    #[serde(default)]
    pub shootings: Vec<Shooting>,
    #[serde(default)]
    pub yaps: Vec<String>,
}

impl Frame {
    pub fn living_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }
}

/// Commands issued by the input layer against the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    /// Start playback
    Play,
    /// Stop playback
    Pause,
    /// Play when stopped, stop when playing
    TogglePlay,
    /// Step one frame back (stopped only)
    StepBack,
    /// Step one frame forward (stopped only)
    StepForward,
    /// Jump to the first frame
    SeekFirst,
    /// Jump to the last frame
    SeekLast,
    /// Jump to a percentage (0-100) of the replay
    SeekPercent(u8),
    /// Next slower speed preset
    Slower,
    /// Next faster speed preset
    Faster,
    /// Move the view by a screen delta, in world-screen units (stopped only)
    Pan { dx: i32, dy: i32 },
    /// Zoom in one step (stopped only)
    ZoomIn,
    /// Zoom out one step (stopped only)
    ZoomOut,
    /// Re-fit the camera to the current frame
    Refit,
}

impl ViewerCommand {
    /// camelCase name, used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerCommand::Play => "play",
            ViewerCommand::Pause => "pause",
            ViewerCommand::TogglePlay => "togglePlay",
            ViewerCommand::StepBack => "stepBack",
            ViewerCommand::StepForward => "stepForward",
            ViewerCommand::SeekFirst => "seekFirst",
            ViewerCommand::SeekLast => "seekLast",
            ViewerCommand::SeekPercent(_) => "seekPercent",
            ViewerCommand::Slower => "slower",
            ViewerCommand::Faster => "faster",
            ViewerCommand::Pan { .. } => "pan",
            ViewerCommand::ZoomIn => "zoomIn",
            ViewerCommand::ZoomOut => "zoomOut",
            ViewerCommand::Refit => "refit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_presets_are_within_clock_bounds() {
        for ms in SPEED_PRESETS_MS {
            assert!((MIN_FRAME_SPEED_MS..=MAX_FRAME_SPEED_MS).contains(&ms));
        }
        assert!(SPEED_PRESETS_MS.contains(&DEFAULT_FRAME_SPEED_MS));
    }

    #[test]
    fn frame_defaults_optional_lists() {
        let frame: Frame = serde_json::from_str(
            r#"{"radius": 120.5, "players": [
                {"id": 3, "name": "ada", "x": 1, "y": -2, "health": 40, "weapon": 3}
            ], "items": [{"x": 5, "y": 6, "type": 1, "weapon": 0}]}"#,
        )
        .unwrap();
        assert_eq!(frame.players[0].weapon, Weapon::Tommy);
        assert_eq!(frame.players[0].score, 0);
        assert_eq!(frame.items[0].kind, ItemKind::Health);
        assert!(frame.yaps.is_empty());
        assert!(frame.living_players().next().is_some());
    }

    #[test]
    fn unknown_weapon_round_trips_its_code() {
        let w = Weapon::from(9);
        assert_eq!(w, Weapon::Unknown(9));
        assert_eq!(i64::from(w), 9);
        assert_eq!(w.stats(), WeaponStats::NONE);
    }
}
