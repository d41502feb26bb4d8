//! Camera fit: the viewport that keeps every living player on screen.

use crate::types::{Player, Position, CAMERA_MARGIN, CAMERA_MIN_SIZE};

/// Fixed camera fitting constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    /// World units added to the bounding box on each axis.
    pub margin: f64,
    /// Smallest target width/height in world units.
    pub min_size: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            margin: CAMERA_MARGIN,
            min_size: CAMERA_MIN_SIZE,
        }
    }
}

/// Drawable area in screen units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

/// World-to-screen transform: `screen = world * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn world_to_screen(&self, p: Position) -> Position {
        Position::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    pub fn screen_to_world(&self, p: Position) -> Position {
        Position::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    pub fn panned(self, dx: f64, dy: f64) -> Self {
        Self {
            offset_x: self.offset_x + dx,
            offset_y: self.offset_y + dy,
            ..self
        }
    }

    /// Scale by `factor`, keeping the screen point `anchor` fixed.
    ///
    /// Non-positive or non-finite factors leave the transform unchanged.
    pub fn zoomed(self, factor: f64, anchor: Position) -> Self {
        if !(factor.is_finite() && factor > 0.0) {
            return self;
        }
        Self {
            offset_x: anchor.x - (anchor.x - self.offset_x) * factor,
            offset_y: anchor.y - (anchor.y - self.offset_y) * factor,
            scale: self.scale * factor,
        }
    }
}

/// World-space box the camera should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTarget {
    pub center: Position,
    pub width: f64,
    pub height: f64,
}

impl FitTarget {
    /// Uniform scale that shows the whole box on `canvas`.
    pub fn scale_for(&self, canvas: Canvas) -> f64 {
        (canvas.width / self.width).min(canvas.height / self.height)
    }

    pub fn transform_for(&self, canvas: Canvas) -> ViewTransform {
        let scale = self.scale_for(canvas);
        let c = canvas.center();
        ViewTransform {
            offset_x: c.x - self.center.x * scale,
            offset_y: c.y - self.center.y * scale,
            scale,
        }
    }
}

/// Bounding box around the living players, padded and clamped to `min_size`.
///
/// Returns `None` when nobody is alive; callers keep their previous viewport.
pub fn fit_target<'a>(
    players: impl IntoIterator<Item = &'a Player>,
    params: FitParams,
) -> Option<FitTarget> {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for p in players.into_iter().filter(|p| p.is_alive()) {
        bounds = Some(match bounds {
            None => (p.x, p.x, p.y, p.y),
            Some((min_x, max_x, min_y, max_y)) => {
                (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
            }
        });
    }
    let (min_x, max_x, min_y, max_y) = bounds?;

    Some(FitTarget {
        center: Position::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0),
        width: ((max_x - min_x).abs() + params.margin).max(params.min_size),
        height: ((max_y - min_y).abs() + params.margin).max(params.min_size),
    })
}

/// Transform for `players` on `canvas`, or `None` when nobody is alive or the
/// canvas is degenerate.
pub fn fit_view<'a>(
    players: impl IntoIterator<Item = &'a Player>,
    params: FitParams,
    canvas: Canvas,
) -> Option<ViewTransform> {
    if canvas.width <= 0.0 || canvas.height <= 0.0 {
        return None;
    }
    let view = fit_target(players, params)?.transform_for(canvas);
    view.scale.is_finite().then_some(view)
}
