//! Render dispatcher: turns frames into surface updates and owns the
//! animations (camera and per-player positions) that run between frames.

use crate::camera::{fit_view, Canvas, FitParams, ViewTransform};
use crate::palette::Palette;
use crate::surface::{AudioSurface, RenderSurface};
use crate::tween::{Animated, Easing, Track};
use crate::types::{ArenaMap, Frame, Position};

#[derive(Debug, Clone)]
pub struct Director {
    fit: FitParams,
    canvas: Canvas,
    palette: Palette,
    camera: Track<ViewTransform>,
    players: Animated<u32, Position>,
    presented: u64,
}

impl Director {
    pub fn new(fit: FitParams, canvas: Canvas) -> Self {
        Self {
            fit,
            canvas,
            palette: Palette::new(),
            camera: Track::new(ViewTransform::default()).with_easing(Easing::QuadOut),
            players: Animated::new(),
            presented: 0,
        }
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// Number of frames dispatched so far.
    pub fn present_count(&self) -> u64 {
        self.presented
    }

    pub fn view_at(&self, now_ms: u64) -> ViewTransform {
        self.camera.value_at(now_ms)
    }

    /// Where the camera will settle once its tween completes.
    pub fn target_view(&self) -> ViewTransform {
        self.camera.target()
    }

    pub fn player_position(&self, id: u32, now_ms: u64) -> Option<Position> {
        self.players.value_at(id, now_ms)
    }

    pub fn is_animating(&self) -> bool {
        self.camera.is_animating() || self.players.is_animating()
    }

    /// Forget all per-replay state and hand the static map to the surface.
    pub fn reset(&mut self, map: &ArenaMap, surface: &mut impl RenderSurface) {
        self.players.clear();
        self.camera.set(ViewTransform::default());
        surface.load_map(map);
        surface.set_view(ViewTransform::default());
    }

    /// Dispatch one frame: attributes, items, shootings, scoreboard and yaps go
    /// straight to the surfaces; positions and the camera start tweens that
    /// settle after `duration_ms`.
    pub fn present(
        &mut self,
        frame: &Frame,
        now_ms: u64,
        duration_ms: u32,
        surface: &mut impl RenderSurface,
        audio: &mut impl AudioSurface,
    ) {
        self.presented += 1;

        surface.set_radius(frame.radius);

        // Players absent from this frame (e.g. after seeking back) disappear.
        let ids: Vec<u32> = frame.players.iter().map(|p| p.id).collect();
        self.players.retain(|id| ids.contains(&id));
        surface.retain_players(&ids);

        for player in &frame.players {
            surface.update_player(player, self.palette.color_for(player.id));
            self.players
                .animate_to(player.id, player.position(), now_ms, duration_ms);
        }
        surface.set_items(&frame.items);
        surface.set_shootings(&frame.shootings);
        surface.set_scoreboard(&frame.players);

        for cue in &frame.yaps {
            audio.ensure_loaded(cue);
            audio.play_if_idle(cue, now_ms);
        }

        self.refit(frame, now_ms, duration_ms);
        self.animate(now_ms, surface);
    }

    /// Start a camera tween towards the fit of `frame`.
    ///
    /// With nobody alive the camera keeps its current target.
    pub fn refit(&mut self, frame: &Frame, now_ms: u64, duration_ms: u32) -> bool {
        match fit_view(&frame.players, self.fit, self.canvas) {
            Some(view) => {
                self.camera.animate_to(view, now_ms, duration_ms);
                true
            }
            None => {
                log::debug!("director: no living players, keeping viewport");
                false
            }
        }
    }

    /// Push the current animated values to the surface. Returns `true` while
    /// any tween is still running.
    pub fn animate(&mut self, now_ms: u64, surface: &mut impl RenderSurface) -> bool {
        for (id, at) in self.players.values_at(now_ms) {
            surface.move_player(id, at);
        }
        surface.set_view(self.camera.value_at(now_ms));

        let players = self.players.settle(now_ms);
        let camera = self.camera.settle(now_ms);
        players || camera
    }

    /// Shift the view by a screen delta. Cancels any camera tween.
    pub fn pan(&mut self, dx: f64, dy: f64, now_ms: u64) {
        let view = self.camera.value_at(now_ms).panned(dx, dy);
        self.camera.set(view);
    }

    /// Zoom around the canvas center. Cancels any camera tween.
    pub fn zoom(&mut self, factor: f64, now_ms: u64) {
        let view = self
            .camera
            .value_at(now_ms)
            .zoomed(factor, self.canvas.center());
        self.camera.set(view);
    }
}
