//! Viewer: the command surface used by the input layer.
//!
//! Combines the [`PlaybackClock`] with the [`Director`]. Every command that
//! changes the current frame dispatches that frame exactly once.

use crate::camera::{Canvas, FitParams, ViewTransform};
use crate::clock::{ClockState, PlaybackClock};
use crate::director::Director;
use crate::surface::{AudioSurface, RenderSurface};
use crate::types::{
    ArenaMap, Frame, ViewerCommand, DEFAULT_FRAME_SPEED_MS, SPEED_PRESETS_MS, ZOOM_IN_FACTOR,
    ZOOM_OUT_FACTOR,
};

/// Startup settings for a [`Viewer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub frame_speed_ms: u32,
    pub fit: FitParams,
    /// Start playing as soon as a replay is loaded.
    pub autoplay: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            frame_speed_ms: DEFAULT_FRAME_SPEED_MS,
            fit: FitParams::default(),
            autoplay: false,
        }
    }
}

pub struct Viewer {
    clock: PlaybackClock,
    director: Director,
    map: ArenaMap,
    autoplay: bool,
}

impl Viewer {
    pub fn new(config: ViewerConfig, canvas: Canvas) -> Self {
        Self {
            clock: PlaybackClock::new(config.frame_speed_ms),
            director: Director::new(config.fit, canvas),
            map: ArenaMap::default(),
            autoplay: config.autoplay,
        }
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    pub fn state(&self) -> ClockState {
        self.clock.state()
    }

    pub fn view_at(&self, now_ms: u64) -> ViewTransform {
        self.director.view_at(now_ms)
    }

    /// Install a replay and show its first frame.
    pub fn load(
        &mut self,
        map: ArenaMap,
        frames: Vec<Frame>,
        now_ms: u64,
        surface: &mut impl RenderSurface,
        audio: &mut impl AudioSurface,
    ) {
        self.clock.load(frames);
        self.map = map;
        self.director.reset(&self.map, surface);
        self.present_current(now_ms, surface, audio);
        if self.autoplay {
            self.start(now_ms);
        }
    }

    pub fn start(&mut self, now_ms: u64) -> bool {
        self.clock.start(now_ms)
    }

    pub fn stop(&mut self) -> bool {
        self.clock.stop()
    }

    pub fn set_speed(&mut self, ms: u32) {
        self.clock.set_speed(ms);
    }

    /// Jump to `index` (clamped) and dispatch it. Rejected while playing.
    pub fn seek(
        &mut self,
        index: i64,
        now_ms: u64,
        surface: &mut impl RenderSurface,
        audio: &mut impl AudioSurface,
    ) -> Option<usize> {
        let index = self.clock.seek(index);
        self.after_move(index, "seek", now_ms, surface, audio)
    }

    /// Move by `delta` frames (clamped) and dispatch. Rejected while playing.
    pub fn step(
        &mut self,
        delta: i64,
        now_ms: u64,
        surface: &mut impl RenderSurface,
        audio: &mut impl AudioSurface,
    ) -> Option<usize> {
        let index = self.clock.step(delta);
        self.after_move(index, "step", now_ms, surface, audio)
    }

    fn after_move(
        &mut self,
        index: Option<usize>,
        what: &str,
        now_ms: u64,
        surface: &mut impl RenderSurface,
        audio: &mut impl AudioSurface,
    ) -> Option<usize> {
        match index {
            Some(i) => {
                self.present_current(now_ms, surface, audio);
                Some(i)
            }
            None => {
                log::debug!("viewer: {} rejected ({:?})", what, self.clock.state());
                None
            }
        }
    }

    /// Move the view by a screen delta. Only while stopped.
    pub fn pan(&mut self, dx: f64, dy: f64, now_ms: u64) -> bool {
        if self.clock.is_playing() {
            return false;
        }
        self.director.pan(dx, dy, now_ms);
        true
    }

    /// Scale the view by `factor` around the canvas center. Only while stopped.
    pub fn zoom(&mut self, factor: f64, now_ms: u64) -> bool {
        if self.clock.is_playing() {
            return false;
        }
        self.director.zoom(factor, now_ms);
        true
    }

    /// Animate the camera back to the fit of the current frame.
    pub fn refit(&mut self, now_ms: u64) -> bool {
        let duration = self.clock.frame_speed_ms();
        match self.clock.current_frame() {
            Some(frame) => self.director.refit(frame, now_ms, duration),
            None => false,
        }
    }

    /// The drawable area changed size; snap the camera to the new fit.
    pub fn resize(&mut self, canvas: Canvas, now_ms: u64) {
        self.director.set_canvas(canvas);
        if let Some(frame) = self.clock.current_frame() {
            self.director.refit(frame, now_ms, 0);
        }
    }

    /// Advance the clock if due and push animation state to the surface.
    ///
    /// Returns `true` when the surface changed in a way that needs a redraw.
    pub fn poll(
        &mut self,
        now_ms: u64,
        surface: &mut impl RenderSurface,
        audio: &mut impl AudioSurface,
    ) -> bool {
        let advanced = self.clock.poll(now_ms).is_some();
        if advanced {
            self.present_current(now_ms, surface, audio);
        }
        let animating = self.director.is_animating();
        let still = self.director.animate(now_ms, surface);
        advanced || animating || still
    }

    /// How long the caller may sleep before the next `poll` has work to do.
    pub fn next_wakeup_ms(&self, now_ms: u64) -> Option<u64> {
        if self.director.is_animating() {
            return Some(0);
        }
        self.clock
            .next_due_ms()
            .map(|due| due.saturating_sub(now_ms))
    }

    /// Apply an input command. Returns `true` when it took effect.
    pub fn apply(
        &mut self,
        command: ViewerCommand,
        now_ms: u64,
        surface: &mut impl RenderSurface,
        audio: &mut impl AudioSurface,
    ) -> bool {
        let last = self.clock.len().saturating_sub(1) as i64;
        match command {
            ViewerCommand::Play => self.start(now_ms),
            ViewerCommand::Pause => self.stop(),
            ViewerCommand::TogglePlay => {
                if self.clock.is_playing() {
                    self.stop()
                } else {
                    self.start(now_ms)
                }
            }
            ViewerCommand::StepBack => self.step(-1, now_ms, surface, audio).is_some(),
            ViewerCommand::StepForward => self.step(1, now_ms, surface, audio).is_some(),
            ViewerCommand::SeekFirst => self.seek(0, now_ms, surface, audio).is_some(),
            ViewerCommand::SeekLast => self.seek(last, now_ms, surface, audio).is_some(),
            ViewerCommand::SeekPercent(p) => {
                let index = last * p.min(100) as i64 / 100;
                self.seek(index, now_ms, surface, audio).is_some()
            }
            ViewerCommand::Slower => {
                let current = self.clock.frame_speed_ms();
                match slower_preset(current) {
                    Some(ms) => {
                        self.set_speed(ms);
                        true
                    }
                    None => false,
                }
            }
            ViewerCommand::Faster => {
                let current = self.clock.frame_speed_ms();
                match faster_preset(current) {
                    Some(ms) => {
                        self.set_speed(ms);
                        true
                    }
                    None => false,
                }
            }
            ViewerCommand::Pan { dx, dy } => self.pan(dx as f64, dy as f64, now_ms),
            ViewerCommand::ZoomIn => self.zoom(ZOOM_IN_FACTOR, now_ms),
            ViewerCommand::ZoomOut => self.zoom(ZOOM_OUT_FACTOR, now_ms),
            ViewerCommand::Refit => self.refit(now_ms),
        }
    }

    fn present_current(
        &mut self,
        now_ms: u64,
        surface: &mut impl RenderSurface,
        audio: &mut impl AudioSurface,
    ) {
        let duration = self.clock.frame_speed_ms();
        if let Some(frame) = self.clock.current_frame() {
            self.director
                .present(frame, now_ms, duration, surface, audio);
        }
    }
}

/// Next preset slower (longer interval) than `current_ms`.
pub fn slower_preset(current_ms: u32) -> Option<u32> {
    SPEED_PRESETS_MS
        .iter()
        .rev()
        .copied()
        .find(|&ms| ms > current_ms)
}

/// Next preset faster (shorter interval) than `current_ms`.
pub fn faster_preset(current_ms: u32) -> Option<u32> {
    SPEED_PRESETS_MS.iter().copied().find(|&ms| ms < current_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_step_through_table() {
        assert_eq!(faster_preset(250), Some(100));
        assert_eq!(slower_preset(250), Some(500));
        assert_eq!(faster_preset(25), None);
        assert_eq!(slower_preset(1000), None);
        assert_eq!(faster_preset(300), Some(250));
        assert_eq!(slower_preset(300), Some(500));
    }
}
