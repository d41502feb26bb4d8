//! Yap captions: the terminal stand-in for audio playback.
//!
//! A cue "plays" by showing its caption for a fixed duration. Playing a cue
//! whose caption is still visible does nothing.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::AudioSurface;
use crate::types::YAP_CAPTION_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Playing {
    started_ms: u64,
    until_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Captions {
    duration_ms: u64,
    loaded: FxHashSet<String>,
    playing: FxHashMap<String, Playing>,
    plays: u64,
}

impl Default for Captions {
    fn default() -> Self {
        Self::new(YAP_CAPTION_MS)
    }
}

impl Captions {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            loaded: FxHashSet::default(),
            playing: FxHashMap::default(),
            plays: 0,
        }
    }

    pub fn is_loaded(&self, cue: &str) -> bool {
        self.loaded.contains(cue)
    }

    pub fn is_playing(&self, cue: &str, now_ms: u64) -> bool {
        self.playing
            .get(cue)
            .is_some_and(|p| now_ms < p.until_ms)
    }

    /// Total number of cue starts so far.
    pub fn play_count(&self) -> u64 {
        self.plays
    }

    /// Visible captions, oldest first.
    pub fn active(&self, now_ms: u64) -> Vec<&str> {
        let mut active: Vec<(&str, u64)> = self
            .playing
            .iter()
            .filter(|(_, p)| now_ms < p.until_ms)
            .map(|(cue, p)| (cue.as_str(), p.started_ms))
            .collect();
        active.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        active.into_iter().map(|(cue, _)| cue).collect()
    }

    /// Drop finished captions. Returns `true` if any were removed.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        let before = self.playing.len();
        self.playing.retain(|_, p| now_ms < p.until_ms);
        self.playing.len() != before
    }
}

impl AudioSurface for Captions {
    fn ensure_loaded(&mut self, cue: &str) {
        if !self.loaded.contains(cue) {
            log::debug!("captions: registered cue {:?}", cue);
            self.loaded.insert(cue.to_string());
        }
    }

    fn play_if_idle(&mut self, cue: &str, now_ms: u64) {
        if self.is_playing(cue, now_ms) {
            return;
        }
        self.playing.insert(
            cue.to_string(),
            Playing {
                started_ms: now_ms,
                until_ms: now_ms + self.duration_ms,
            },
        );
        self.plays += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playing_cue_is_not_restarted() {
        let mut c = Captions::new(100);
        c.ensure_loaded("gg");
        c.play_if_idle("gg", 0);
        c.play_if_idle("gg", 50);
        assert_eq!(c.play_count(), 1);
        assert!(c.is_playing("gg", 99));
        assert!(!c.is_playing("gg", 100));

        c.play_if_idle("gg", 120);
        assert_eq!(c.play_count(), 2);
    }

    #[test]
    fn active_lists_oldest_first_and_expires() {
        let mut c = Captions::new(100);
        c.play_if_idle("b", 10);
        c.play_if_idle("a", 20);
        assert_eq!(c.active(30), vec!["b", "a"]);
        assert!(c.expire(115));
        assert_eq!(c.active(115), vec!["a"]);
        assert!(!c.expire(115));
    }
}
