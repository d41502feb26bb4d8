//! ReplayView: rasterizes a [`Scene`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The map area uses "screen units" where one
//! unit is one terminal row and two columns, so circles stay round on typical
//! terminal fonts. The side panel shows playback state, the scoreboard and
//! active yap captions.

use crate::core::{Canvas, ViewTransform};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::scene::{Scene, Sprite};
use crate::types::{ItemKind, Position, Weapon, PLAYER_MAX_HEALTH};

/// Width of the side panel in columns.
pub const PANEL_WIDTH: u16 = 32;

/// The panel is hidden when the map area would get narrower than this.
const MIN_MAP_WIDTH: u16 = 24;

const HEALTH_BAR_CELLS: i32 = 5;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Playback details shown in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackStatus<'a> {
    pub frame_index: usize,
    pub frame_count: usize,
    pub playing: bool,
    pub speed_ms: u32,
    /// Centered message over the map (loading, errors).
    pub notice: Option<&'a str>,
}

/// Terminal renderer for replay scenes.
pub struct ReplayView {
    /// Columns per screen unit.
    cell_w: u16,
    show_panel: bool,
}

impl Default for ReplayView {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ReplayView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            show_panel: true,
        }
    }

    pub fn without_panel(mut self) -> Self {
        self.show_panel = false;
        self
    }

    /// Columns/rows used by the map area.
    pub fn map_area(&self, viewport: Viewport) -> (u16, u16) {
        let width = if self.show_panel && viewport.width >= PANEL_WIDTH + MIN_MAP_WIDTH {
            viewport.width - PANEL_WIDTH
        } else {
            viewport.width
        };
        (width, viewport.height)
    }

    /// Camera canvas (screen units) for `viewport`.
    pub fn canvas_for(&self, viewport: Viewport) -> Canvas {
        let (w, h) = self.map_area(viewport);
        Canvas::new(w as f64 / self.cell_w as f64, h as f64)
    }

    /// Terminal cell holding screen point `p`.
    pub fn screen_to_cell(&self, p: Position) -> (i32, i32) {
        (
            clamp_i32((p.x * self.cell_w as f64).floor()),
            clamp_i32(p.y.floor()),
        )
    }

    pub fn world_to_cell(&self, view: ViewTransform, p: Position) -> (i32, i32) {
        self.screen_to_cell(view.world_to_screen(p))
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(
        &self,
        scene: &Scene,
        status: &PlaybackStatus<'_>,
        captions: &[&str],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (map_w, map_h) = self.map_area(viewport);
        let mut area = MapArea {
            fb: &mut *fb,
            width: map_w,
            height: map_h,
        };
        let view = scene.view();

        self.draw_arena(&mut area, view, scene.radius());
        self.draw_walls(&mut area, view, scene);
        self.draw_items(&mut area, view, scene);
        self.draw_shootings(&mut area, view, scene);

        // Defeated players underneath the living ones.
        for sprite in scene.sprites().filter(|s| s.is_defeated()) {
            self.draw_sprite(&mut area, view, sprite);
        }
        for sprite in scene.sprites().filter(|s| !s.is_defeated()) {
            self.draw_sprite(&mut area, view, sprite);
        }

        if let Some(text) = status.notice {
            let w = text.chars().count() as i32;
            let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
            area.put_str((map_w as i32 - w) / 2, map_h as i32 / 2, text, style);
        }

        if map_w < viewport.width {
            self.draw_panel(fb, scene, status, captions, viewport, map_w);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        scene: &Scene,
        status: &PlaybackStatus<'_>,
        captions: &[&str],
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, status, captions, viewport, &mut fb);
        fb
    }

    fn draw_arena(&self, area: &mut MapArea<'_>, view: ViewTransform, radius: f64) {
        if !(radius.is_finite() && radius > 0.0) {
            return;
        }
        let style = CellStyle::fg(Rgb::new(200, 60, 60));
        let screen_r = radius * view.scale * self.cell_w as f64;
        let samples = (screen_r * std::f64::consts::TAU * 2.0).clamp(32.0, 4096.0) as usize;
        for i in 0..samples {
            let a = i as f64 / samples as f64 * std::f64::consts::TAU;
            let p = Position::new(radius * a.cos(), radius * a.sin());
            let (x, y) = self.world_to_cell(view, p);
            area.plot(x, y, '·', style);
        }
    }

    fn draw_walls(&self, area: &mut MapArea<'_>, view: ViewTransform, scene: &Scene) {
        let style = CellStyle::fg(Rgb::new(235, 235, 235));
        for wall in &scene.map().walls {
            let a = self.world_to_cell(view, wall.a);
            let b = self.world_to_cell(view, wall.b);
            area.line(a, b, '#', style);
        }
    }

    fn draw_items(&self, area: &mut MapArea<'_>, view: ViewTransform, scene: &Scene) {
        let style = CellStyle::fg(Rgb::new(240, 220, 80));
        for item in scene.items() {
            let ch = match item.kind {
                ItemKind::Health => '+',
                ItemKind::Weapon => weapon_letter(item.weapon).unwrap_or('*'),
                ItemKind::Unknown(_) => '?',
            };
            let (x, y) = self.world_to_cell(view, Position::new(item.x, item.y));
            area.plot(x, y, ch, style);
        }
    }

    fn draw_shootings(&self, area: &mut MapArea<'_>, view: ViewTransform, scene: &Scene) {
        let style = CellStyle::fg(Rgb::new(255, 150, 40));
        for shot in scene.shootings() {
            let (Some(from), Some(to)) = (scene.sprite(shot.player_id), scene.sprite(shot.target_id))
            else {
                continue;
            };
            let a = self.world_to_cell(view, from.at);
            let b = self.world_to_cell(view, to.at);
            area.line(a, b, '·', style);
        }
    }

    fn draw_sprite(&self, area: &mut MapArea<'_>, view: ViewTransform, sprite: &Sprite) {
        let (x, y) = self.world_to_cell(view, sprite.at);
        let defeated = sprite.is_defeated();
        let color = if defeated {
            sprite.color.dimmed(0.35)
        } else {
            sprite.color
        };
        let body = CellStyle::fg(color).bold();
        let label = if defeated {
            CellStyle::fg(Rgb::new(110, 110, 110)).dim()
        } else {
            CellStyle::fg(Rgb::new(255, 255, 255)).bold()
        };

        area.plot(x, y, if defeated { '×' } else { '●' }, body);

        let name_w = sprite.name.chars().count() as i32;
        area.put_str(x - name_w / 2, y - 1, &sprite.name, label);

        if !defeated {
            let filled = health_cells(sprite.health);
            let full = CellStyle::fg(Rgb::new(220, 50, 50));
            let empty = CellStyle::fg(Rgb::new(90, 90, 90));
            for i in 0..HEALTH_BAR_CELLS {
                let (ch, style) = if i < filled { ('█', full) } else { ('░', empty) };
                area.plot(x - HEALTH_BAR_CELLS / 2 + i, y + 1, ch, style);
            }
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        scene: &Scene,
        status: &PlaybackStatus<'_>,
        captions: &[&str],
        viewport: Viewport,
        map_w: u16,
    ) {
        let sep = CellStyle::fg(Rgb::new(90, 90, 100));
        for y in 0..viewport.height {
            fb.put_char(map_w, y, '│', sep);
        }

        let x0 = map_w + 2;
        let panel_w = viewport.width.saturating_sub(x0);
        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let dim = value.dim();

        let mut y = 0u16;
        fb.put_str(x0, y, "ARENA REPLAY", label);
        y += 2;

        fb.put_str(x0, y, "FRAME", label);
        if status.frame_count == 0 {
            fb.put_str(x0 + 7, y, "-/-", value);
        } else {
            let w = fb.put_i64(x0 + 7, y, status.frame_index as i64 + 1, value);
            fb.put_char(x0 + 7 + w, y, '/', value);
            fb.put_i64(x0 + 8 + w, y, status.frame_count as i64, value);
        }
        y += 1;

        fb.put_str(x0, y, "STATE", label);
        let (state, state_style) = if status.playing {
            ("PLAY", CellStyle::fg(Rgb::new(100, 220, 120)).bold())
        } else {
            ("PAUSE", CellStyle::fg(Rgb::new(240, 200, 80)).bold())
        };
        fb.put_str(x0 + 7, y, state, state_style);
        y += 1;

        fb.put_str(x0, y, "SPEED", label);
        let w = fb.put_i64(x0 + 7, y, status.speed_ms as i64, value);
        fb.put_str(x0 + 7 + w, y, "ms", value);
        y += 1;

        self.draw_progress(fb, x0, y, panel_w.saturating_sub(1), status);
        y += 2;

        fb.put_str(x0, y, "SCOREBOARD", label);
        y += 1;
        for row in scene.scoreboard() {
            if y + 4 >= viewport.height {
                break;
            }
            let style = if row.health > 0 { value } else { dim };
            fb.put_char(x0, y, '■', CellStyle::fg(row.color));
            let name: String = row.name.chars().take(10).collect();
            fb.put_str(x0 + 2, y, &name, style);
            fb.put_i64(x0 + 13, y, row.score, style);
            fb.put_i64(x0 + 19, y, row.health.max(0) as i64, style);
            if let Some(letter) = weapon_letter(row.weapon) {
                fb.put_char(x0 + 23, y, letter, style);
                let w = fb.put_i64(x0 + 24, y, row.loaded_ammo as i64, style);
                fb.put_char(x0 + 24 + w, y, '/', style);
                fb.put_i64(x0 + 25 + w, y, row.weapon.stats().ammo_capacity as i64, style);
            }
            y += 1;
        }
        y += 1;

        if !captions.is_empty() && y + 2 < viewport.height {
            fb.put_str(x0, y, "YAPS", label);
            y += 1;
            for cue in captions {
                if y + 2 >= viewport.height {
                    break;
                }
                fb.put_char(x0, y, '♪', CellStyle::fg(Rgb::new(120, 200, 255)));
                fb.put_str(x0 + 2, y, cue, value);
                y += 1;
            }
        }

        if viewport.height > 0 {
            fb.put_str(
                x0,
                viewport.height - 1,
                "spc play ←→ step [] speed q quit",
                dim,
            );
        }
    }

    fn draw_progress(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        width: u16,
        status: &PlaybackStatus<'_>,
    ) {
        if width == 0 {
            return;
        }
        let filled = if status.frame_count <= 1 {
            if status.frame_count == 1 {
                width
            } else {
                0
            }
        } else {
            ((status.frame_index as u64 * width as u64) / (status.frame_count as u64 - 1)) as u16
        };
        let on = CellStyle::fg(Rgb::new(120, 200, 255));
        let off = CellStyle::fg(Rgb::new(70, 70, 80));
        for i in 0..width {
            let (ch, style) = if i < filled { ('━', on) } else { ('─', off) };
            fb.put_char(x + i, y, ch, style);
        }
    }
}

/// Framebuffer window limited to the map area.
struct MapArea<'a> {
    fb: &'a mut FrameBuffer,
    width: u16,
    height: u16,
}

impl MapArea<'_> {
    fn plot(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.fb.set(x as u16, y as u16, Cell { ch, style });
    }

    fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            self.plot(x + i as i32, y, ch, style);
        }
    }

    /// Bresenham line, clipped to the area first so far off-screen
    /// endpoints stay cheap.
    fn line(&mut self, a: (i32, i32), b: (i32, i32), ch: char, style: CellStyle) {
        let Some(((x0, y0), (x1, y1))) = clip_segment(a, b, self.width as i32, self.height as i32)
        else {
            return;
        };
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.plot(x, y, ch, style);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Liang-Barsky clip of a cell segment against `[0, w) x [0, h)`.
fn clip_segment(
    a: (i32, i32),
    b: (i32, i32),
    w: i32,
    h: i32,
) -> Option<((i32, i32), (i32, i32))> {
    if w <= 0 || h <= 0 {
        return None;
    }
    let (x0, y0) = (a.0 as f64, a.1 as f64);
    let (dx, dy) = (b.0 as f64 - x0, b.1 as f64 - y0);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    let edges = [
        (-dx, x0),
        (dx, (w - 1) as f64 - x0),
        (-dy, y0),
        (dy, (h - 1) as f64 - y0),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| ((x0 + dx * t).round() as i32, (y0 + dy * t).round() as i32);
    Some((at(t0), at(t1)))
}

/// Off-screen coordinates are pinned to a range where label/health-bar
/// offsets cannot overflow.
const CELL_LIMIT: f64 = 1_000_000.0;

fn clamp_i32(v: f64) -> i32 {
    if v.is_nan() {
        return -(CELL_LIMIT as i32);
    }
    v.clamp(-CELL_LIMIT, CELL_LIMIT) as i32
}

fn health_cells(health: i32) -> i32 {
    let h = health.clamp(0, PLAYER_MAX_HEALTH);
    (h * HEALTH_BAR_CELLS + PLAYER_MAX_HEALTH - 1) / PLAYER_MAX_HEALTH
}

fn weapon_letter(weapon: Weapon) -> Option<char> {
    match weapon {
        Weapon::None => None,
        Weapon::Knife => Some('K'),
        Weapon::Pistol => Some('P'),
        Weapon::Tommy => Some('T'),
        Weapon::Unknown(_) => Some('?'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_bar_rounds_up() {
        assert_eq!(health_cells(100), 5);
        assert_eq!(health_cells(1), 1);
        assert_eq!(health_cells(20), 1);
        assert_eq!(health_cells(21), 2);
        assert_eq!(health_cells(0), 0);
        assert_eq!(health_cells(-5), 0);
    }

    #[test]
    fn clip_rejects_segments_outside() {
        assert_eq!(clip_segment((-10, -10), (-5, -1), 10, 10), None);
        assert_eq!(
            clip_segment((-100, 2), (100, 2), 10, 10),
            Some(((0, 2), (9, 2)))
        );
    }

    #[test]
    fn panel_hidden_on_narrow_viewports() {
        let view = ReplayView::default();
        assert_eq!(view.map_area(Viewport::new(40, 10)), (40, 10));
        assert_eq!(view.map_area(Viewport::new(80, 10)), (48, 10));
        assert_eq!(view.canvas_for(Viewport::new(80, 10)), Canvas::new(24.0, 10.0));
    }
}
