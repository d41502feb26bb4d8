//! Tweens and the per-entity animation map.
//!
//! Every animated property is a [`Track`]: a settled value plus at most one
//! in-flight [`Tween`]. Starting a new tween on a track first finishes the old
//! one (the value jumps to its target), then animates from there. [`Animated`]
//! keys tracks by entity id.

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::camera::ViewTransform;
use crate::types::Position;

/// Easing curves over normalized time `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => t * (2.0 - t),
        }
    }
}

/// Values that can be interpolated.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Position {
    fn lerp(self, to: Self, t: f64) -> Self {
        Position::new(self.x.lerp(to.x, t), self.y.lerp(to.y, t))
    }
}

impl Lerp for ViewTransform {
    fn lerp(self, to: Self, t: f64) -> Self {
        ViewTransform {
            offset_x: self.offset_x.lerp(to.offset_x, t),
            offset_y: self.offset_y.lerp(to.offset_y, t),
            scale: self.scale.lerp(to.scale, t),
        }
    }
}

/// A timed interpolation from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start_ms: u64,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start_ms: u64, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Normalized progress in `[0, 1]`. Zero-length tweens are always done.
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64;
        (elapsed / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now_ms: u64) -> T {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(t))
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// One animated property: a settled value and at most one in-flight tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track<T> {
    value: T,
    tween: Option<Tween<T>>,
    easing: Easing,
}

impl<T: Lerp> Track<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            tween: None,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Jump to `value`, cancelling any in-flight tween.
    pub fn set(&mut self, value: T) {
        self.tween = None;
        self.value = value;
    }

    /// Complete the in-flight tween synchronously.
    pub fn finish(&mut self) {
        if let Some(tween) = self.tween.take() {
            self.value = tween.to;
        }
    }

    /// Replace any in-flight tween with one towards `to`.
    ///
    /// The previous tween is finished first, so the new one starts from its
    /// target rather than from a half-way value.
    pub fn animate_to(&mut self, to: T, now_ms: u64, duration_ms: u32) {
        self.finish();
        self.tween = Some(Tween::new(self.value, to, now_ms, duration_ms).with_easing(self.easing));
    }

    pub fn value_at(&self, now_ms: u64) -> T {
        match &self.tween {
            Some(tween) => tween.value_at(now_ms),
            None => self.value,
        }
    }

    /// Final value once the current tween (if any) completes.
    pub fn target(&self) -> T {
        self.tween.map(|t| t.to).unwrap_or(self.value)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Retire the tween once it has run its course. Returns `true` while still
    /// animating.
    pub fn settle(&mut self, now_ms: u64) -> bool {
        match self.tween {
            Some(tween) if tween.is_finished(now_ms) => {
                self.value = tween.to;
                self.tween = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }
}

/// Per-entity animation handles keyed by `K`.
#[derive(Debug, Clone)]
pub struct Animated<K, T> {
    tracks: FxHashMap<K, Track<T>>,
}

impl<K, T> Default for Animated<K, T> {
    fn default() -> Self {
        Self {
            tracks: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash + Copy, T: Lerp> Animated<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animate `key` towards `to`. An unknown key is placed at `to` directly.
    ///
    /// Returns `true` when a tween was started.
    pub fn animate_to(&mut self, key: K, to: T, now_ms: u64, duration_ms: u32) -> bool {
        match self.tracks.get_mut(&key) {
            Some(track) => {
                track.animate_to(to, now_ms, duration_ms);
                true
            }
            None => {
                self.tracks.insert(key, Track::new(to));
                false
            }
        }
    }

    pub fn value_at(&self, key: K, now_ms: u64) -> Option<T> {
        self.tracks.get(&key).map(|t| t.value_at(now_ms))
    }

    pub fn values_at(&self, now_ms: u64) -> impl Iterator<Item = (K, T)> + '_ {
        self.tracks.iter().map(move |(k, t)| (*k, t.value_at(now_ms)))
    }

    /// Drop the tracks of entities for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(K) -> bool) {
        self.tracks.retain(|k, _| keep(*k));
    }

    /// Retire completed tweens. Returns `true` while any track is animating.
    pub fn settle(&mut self, now_ms: u64) -> bool {
        let mut animating = false;
        for track in self.tracks.values_mut() {
            animating |= track.settle(now_ms);
        }
        animating
    }

    pub fn is_animating(&self) -> bool {
        self.tracks.values().any(|t| t.is_animating())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
