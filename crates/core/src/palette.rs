//! Deterministic player colors.
//!
//! The palette is built once from golden-ratio hue steps and never mutated;
//! a player's color is `palette[id mod N]`.

use crate::types::{Rgb, PALETTE_SIZE};

const GOLDEN_RATIO_CONJUGATE: f64 = 0.61803398875;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        let mut colors = [Rgb::default(); PALETTE_SIZE];
        for (i, slot) in colors.iter_mut().enumerate() {
            let step = i as f64 * GOLDEN_RATIO_CONJUGATE;
            let hue = step % 1.0;
            let value = (1.0 - step % 0.5).sqrt();
            *slot = hsv_to_rgb(hue, 1.0, value);
        }
        Self { colors }
    }

    pub fn color_for(&self, id: u32) -> Rgb {
        self.colors[id as usize % PALETTE_SIZE]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

/// Convert hue/saturation/value (all in `[0, 1]`) to RGB.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h6 = (h.rem_euclid(1.0)) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(channel(r), channel(g), channel(b))
}

fn channel(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}
