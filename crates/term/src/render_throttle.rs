/// Decides when the terminal loop actually redraws.
///
/// While the scene is animating every tick is drawn. Otherwise a redraw
/// happens when the scene revision changes, and at most once per
/// `idle_interval_ms` as a keep-alive.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    idle_interval_ms: u64,
    last_render_ms: u64,
    last_revision: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(idle_interval_ms: u64) -> Self {
        Self {
            idle_interval_ms,
            last_render_ms: 0,
            last_revision: 0,
            has_rendered: false,
        }
    }

    /// Force the next call to render (resize, new replay).
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }

    pub fn should_render(&mut self, now_ms: u64, revision: u64, animating: bool) -> bool {
        let render = !self.has_rendered
            || animating
            || revision != self.last_revision
            || now_ms.saturating_sub(self.last_render_ms) >= self.idle_interval_ms;

        if render {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_revision = revision;
        }
        render
    }
}
