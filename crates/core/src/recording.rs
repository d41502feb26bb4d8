//! Headless surface that records what it was asked to draw or play.

use std::collections::BTreeMap;

use crate::camera::ViewTransform;
use crate::surface::{AudioSurface, RenderSurface};
use crate::types::{ArenaMap, MapItem, Player, Position, Rgb, Shooting};

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub map: Option<ArenaMap>,
    pub radius: Option<f64>,
    /// Number of frames dispatched (one `set_radius` per frame).
    pub frames_drawn: usize,
    pub players: BTreeMap<u32, (Player, Rgb)>,
    pub positions: BTreeMap<u32, Position>,
    pub items: Vec<MapItem>,
    pub shootings: Vec<Shooting>,
    pub scoreboard: Vec<Player>,
    pub view: Option<ViewTransform>,
    pub loaded_cues: Vec<String>,
    pub played_cues: Vec<String>,
}

impl RenderSurface for RecordingSurface {
    fn load_map(&mut self, map: &ArenaMap) {
        self.map = Some(map.clone());
    }

    fn set_radius(&mut self, radius: f64) {
        self.radius = Some(radius);
        self.frames_drawn += 1;
    }

    fn update_player(&mut self, player: &Player, color: Rgb) {
        self.players.insert(player.id, (player.clone(), color));
    }

    fn move_player(&mut self, id: u32, at: Position) {
        self.positions.insert(id, at);
    }

    fn retain_players(&mut self, ids: &[u32]) {
        self.players.retain(|id, _| ids.contains(id));
        self.positions.retain(|id, _| ids.contains(id));
    }

    fn set_items(&mut self, items: &[MapItem]) {
        self.items = items.to_vec();
    }

    fn set_shootings(&mut self, shootings: &[Shooting]) {
        self.shootings = shootings.to_vec();
    }

    fn set_scoreboard(&mut self, players: &[Player]) {
        self.scoreboard = players.to_vec();
    }

    fn set_view(&mut self, view: ViewTransform) {
        self.view = Some(view);
    }
}

impl AudioSurface for RecordingSurface {
    fn ensure_loaded(&mut self, cue: &str) {
        if !self.loaded_cues.iter().any(|c| c == cue) {
            self.loaded_cues.push(cue.to_string());
        }
    }

    fn play_if_idle(&mut self, cue: &str, _now_ms: u64) {
        self.played_cues.push(cue.to_string());
    }
}
