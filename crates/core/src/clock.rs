//! Playback clock: frame store, current index and the periodic advance schedule.
//!
//! The clock is driven by explicit timestamps (`now_ms`) instead of reading a
//! system timer, so it is deterministic under test. While playing it holds a
//! single [`TickSchedule`]; stopping drops it, which is the cancellation.

use crate::types::{Frame, DEFAULT_FRAME_SPEED_MS, MAX_FRAME_SPEED_MS, MIN_FRAME_SPEED_MS};

/// Playback state machine: `Stopped -> Playing` on start, `Playing -> Stopped`
/// on stop or when the last frame is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Playing,
}

/// The next scheduled advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    pub due_ms: u64,
    pub interval_ms: u32,
}

#[derive(Debug, Clone)]
pub struct PlaybackClock {
    frames: Vec<Frame>,
    current: usize,
    state: ClockState,
    frame_speed_ms: u32,
    schedule: Option<TickSchedule>,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_SPEED_MS)
    }
}

impl PlaybackClock {
    pub fn new(frame_speed_ms: u32) -> Self {
        Self {
            frames: Vec::new(),
            current: 0,
            state: ClockState::Stopped,
            frame_speed_ms: clamp_speed(frame_speed_ms),
            schedule: None,
        }
    }

    /// Replace the frame list. Playback stops and the index rewinds to 0.
    pub fn load(&mut self, frames: Vec<Frame>) {
        self.stop();
        self.frames = frames;
        self.current = 0;
        log::debug!("clock: loaded {} frames", self.frames.len());
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.get(self.current)
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == ClockState::Playing
    }

    pub fn frame_speed_ms(&self) -> u32 {
        self.frame_speed_ms
    }

    pub fn schedule(&self) -> Option<TickSchedule> {
        self.schedule
    }

    /// Timestamp of the next scheduled advance, if playing.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.schedule.map(|s| s.due_ms)
    }

    fn last_index(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Start playback. Returns `true` on the `Stopped -> Playing` transition.
    ///
    /// No-op when already playing or when no frames are loaded.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.is_playing() || self.frames.is_empty() {
            return false;
        }
        self.state = ClockState::Playing;
        self.schedule = Some(self.next_schedule(now_ms));
        log::debug!("clock: playing from frame {}", self.current);
        true
    }

    /// Stop playback. Returns `true` on the `Playing -> Stopped` transition.
    pub fn stop(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.state = ClockState::Stopped;
        self.schedule = None;
        log::debug!("clock: stopped at frame {}", self.current);
        true
    }

    /// Change the playback interval.
    ///
    /// An advance that is already scheduled keeps its due time; the new interval
    /// applies from the next reschedule on.
    pub fn set_speed(&mut self, ms: u32) {
        self.frame_speed_ms = clamp_speed(ms);
    }

    /// Jump to `index` (clamped). Returns the index to render.
    ///
    /// Rejected (`None`) while playing or when no frames are loaded.
    pub fn seek(&mut self, index: i64) -> Option<usize> {
        if self.is_playing() || self.frames.is_empty() {
            return None;
        }
        self.current = index.clamp(0, self.last_index() as i64) as usize;
        Some(self.current)
    }

    /// Move by `delta` frames (clamped). Same rules as [`PlaybackClock::seek`].
    pub fn step(&mut self, delta: i64) -> Option<usize> {
        self.seek((self.current as i64).saturating_add(delta))
    }

    /// Advance if the scheduled tick is due. Returns the index to render.
    ///
    /// At most one frame is advanced per call; the next tick is scheduled one
    /// interval after `now_ms`. Reaching the last frame stops playback.
    pub fn poll(&mut self, now_ms: u64) -> Option<usize> {
        let schedule = self.schedule?;
        if now_ms < schedule.due_ms {
            return None;
        }

        if self.current >= self.last_index() {
            self.stop();
            return None;
        }

        self.current += 1;
        if self.current >= self.last_index() {
            self.stop();
        } else {
            self.schedule = Some(self.next_schedule(now_ms));
        }
        Some(self.current)
    }

    fn next_schedule(&self, now_ms: u64) -> TickSchedule {
        TickSchedule {
            due_ms: now_ms + self.frame_speed_ms as u64,
            interval_ms: self.frame_speed_ms,
        }
    }
}

fn clamp_speed(ms: u32) -> u32 {
    ms.clamp(MIN_FRAME_SPEED_MS, MAX_FRAME_SPEED_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_with(n: usize) -> PlaybackClock {
        let mut clock = PlaybackClock::new(100);
        clock.load(vec![Frame::default(); n]);
        clock
    }

    #[test]
    fn start_schedules_one_interval_ahead() {
        let mut clock = clock_with(3);
        assert!(clock.start(1_000));
        assert_eq!(
            clock.schedule(),
            Some(TickSchedule {
                due_ms: 1_100,
                interval_ms: 100
            })
        );
        assert!(!clock.start(1_050));
        assert_eq!(clock.next_due_ms(), Some(1_100));
    }

    #[test]
    fn reschedule_records_interval_in_effect() {
        let mut clock = clock_with(5);
        clock.start(0);
        clock.set_speed(400);
        assert_eq!(clock.schedule().map(|s| s.interval_ms), Some(100));
        assert_eq!(clock.poll(100), Some(1));
        assert_eq!(
            clock.schedule(),
            Some(TickSchedule {
                due_ms: 500,
                interval_ms: 400
            })
        );
    }

    #[test]
    fn stop_and_final_frame_drop_the_schedule() {
        let mut clock = clock_with(3);
        clock.start(0);
        assert!(clock.stop());
        assert_eq!(clock.schedule(), None);

        clock.start(0);
        assert_eq!(clock.poll(100), Some(1));
        assert_eq!(clock.poll(200), Some(2));
        assert_eq!(clock.schedule(), None);
        // Polling without a schedule is inert.
        assert_eq!(clock.poll(10_000), None);
    }

    #[test]
    fn clamp_speed_bounds() {
        assert_eq!(clamp_speed(0), MIN_FRAME_SPEED_MS);
        assert_eq!(clamp_speed(MIN_FRAME_SPEED_MS + 1), MIN_FRAME_SPEED_MS + 1);
        assert_eq!(clamp_speed(u32::MAX), MAX_FRAME_SPEED_MS);
    }
}
