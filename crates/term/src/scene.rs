//! Retained scene: the terminal-side [`RenderSurface`].
//!
//! The director pushes updates in; [`crate::ReplayView`] reads the scene back
//! out when rasterizing. Every mutation bumps [`Scene::revision`], which the
//! render throttle uses as a change fingerprint.

use std::collections::BTreeMap;

use crate::core::{RenderSurface, ViewTransform};
use crate::types::{ArenaMap, MapItem, Player, Position, Rgb, Shooting, Weapon};

/// A player as currently shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: u32,
    pub name: String,
    pub health: i32,
    pub weapon: Weapon,
    pub loaded_ammo: i32,
    pub color: Rgb,
    pub at: Position,
}

impl Sprite {
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

/// One scoreboard line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub id: u32,
    pub name: String,
    pub score: i64,
    pub health: i32,
    pub weapon: Weapon,
    pub loaded_ammo: i32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    map: ArenaMap,
    radius: f64,
    sprites: BTreeMap<u32, Sprite>,
    items: Vec<MapItem>,
    shootings: Vec<Shooting>,
    scoreboard: Vec<ScoreRow>,
    view: ViewTransform,
    revision: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&self) -> &ArenaMap {
        &self.map
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sprites in id order.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.values()
    }

    pub fn sprite(&self, id: u32) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    pub fn items(&self) -> &[MapItem] {
        &self.items
    }

    pub fn shootings(&self) -> &[Shooting] {
        &self.shootings
    }

    /// Sorted by score (highest first), then id.
    pub fn scoreboard(&self) -> &[ScoreRow] {
        &self.scoreboard
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl RenderSurface for Scene {
    fn load_map(&mut self, map: &ArenaMap) {
        self.map = map.clone();
        self.radius = map.radius;
        self.sprites.clear();
        self.items.clear();
        self.shootings.clear();
        self.scoreboard.clear();
        self.touch();
    }

    fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
        self.touch();
    }

    fn update_player(&mut self, player: &Player, color: Rgb) {
        let sprite = self.sprites.entry(player.id).or_insert_with(|| Sprite {
            id: player.id,
            name: String::new(),
            health: 0,
            weapon: Weapon::None,
            loaded_ammo: 0,
            color,
            at: player.position(),
        });
        if sprite.name != player.name {
            sprite.name.clone_from(&player.name);
        }
        sprite.health = player.health;
        sprite.weapon = player.weapon;
        sprite.loaded_ammo = player.loaded_ammo;
        sprite.color = color;
        self.touch();
    }

    fn move_player(&mut self, id: u32, at: Position) {
        if let Some(sprite) = self.sprites.get_mut(&id) {
            if sprite.at != at {
                sprite.at = at;
                self.touch();
            }
        }
    }

    fn retain_players(&mut self, ids: &[u32]) {
        let before = self.sprites.len();
        self.sprites.retain(|id, _| ids.contains(id));
        if self.sprites.len() != before {
            self.touch();
        }
    }

    fn set_items(&mut self, items: &[MapItem]) {
        self.items.clear();
        self.items.extend_from_slice(items);
        self.touch();
    }

    fn set_shootings(&mut self, shootings: &[Shooting]) {
        self.shootings.clear();
        self.shootings.extend_from_slice(shootings);
        self.touch();
    }

    fn set_scoreboard(&mut self, players: &[Player]) {
        self.scoreboard.clear();
        for p in players {
            let color = self
                .sprites
                .get(&p.id)
                .map(|s| s.color)
                .unwrap_or_default();
            self.scoreboard.push(ScoreRow {
                id: p.id,
                name: p.name.clone(),
                score: p.score,
                health: p.health,
                weapon: p.weapon,
                loaded_ammo: p.loaded_ammo,
                color,
            });
        }
        self.scoreboard
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
        self.touch();
    }

    fn set_view(&mut self, view: ViewTransform) {
        if self.view != view {
            self.view = view;
            self.touch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32, score: i64) -> Player {
        Player {
            id,
            name: format!("bot{id}"),
            x: id as f64,
            y: 0.0,
            health: 50,
            weapon: Weapon::Pistol,
            score,
            loaded_ammo: 3,
            reload_cooldown: 0,
        }
    }

    #[test]
    fn scoreboard_orders_by_score_then_id() {
        let mut scene = Scene::new();
        let players = [player(3, 5), player(1, 9), player(2, 5)];
        for p in &players {
            scene.update_player(p, Rgb::new(1, 2, 3));
        }
        scene.set_scoreboard(&players);
        let ids: Vec<u32> = scene.scoreboard().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(scene.scoreboard()[0].color, Rgb::new(1, 2, 3));
    }

    #[test]
    fn unchanged_moves_do_not_bump_revision() {
        let mut scene = Scene::new();
        scene.update_player(&player(1, 0), Rgb::default());
        let rev = scene.revision();
        scene.move_player(1, Position::new(1.0, 0.0));
        assert_eq!(scene.revision(), rev);
        scene.move_player(1, Position::new(2.0, 0.0));
        assert_eq!(scene.revision(), rev + 1);
        scene.move_player(99, Position::new(2.0, 0.0));
        assert_eq!(scene.revision(), rev + 1);
    }

    #[test]
    fn retain_players_removes_missing_sprites() {
        let mut scene = Scene::new();
        scene.update_player(&player(1, 0), Rgb::default());
        scene.update_player(&player(7, 0), Rgb::default());
        let rev = scene.revision();

        scene.retain_players(&[1, 7]);
        assert_eq!(scene.revision(), rev);

        scene.retain_players(&[1]);
        assert!(scene.sprite(7).is_none());
        assert!(scene.sprite(1).is_some());
        assert_eq!(scene.revision(), rev + 1);
    }
}
