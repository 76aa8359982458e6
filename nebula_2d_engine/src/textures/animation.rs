/// Frame-sequence animation over textures
///
/// Usable two ways: as an owned cursor (`elapse` + `current_frame`), or as a
/// shared immutable sequence resolved by an external clock (`frame_at`) —
/// the latter is how materials and vertex batches consume it.

use std::sync::Arc;
use std::time::Duration;

use super::texture::Texture;

/// Playback direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackDirection {
    Normal,
    Reverse,
}

/// An animation over a sequence of texture frames
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<Arc<Texture>>,
    frame_duration: Duration,
    /// None repeats forever; Some(n) plays n+1 total cycles then holds the
    /// last frame
    repeat_count: Option<u32>,
    direction: PlaybackDirection,

    // Cursor state
    time: Duration,
    running: bool,
}

impl Animation {
    /// Create a looping animation
    pub fn new(frames: Vec<Arc<Texture>>, frame_duration: Duration) -> Self {
        Self {
            frames,
            frame_duration,
            repeat_count: None,
            direction: PlaybackDirection::Normal,
            time: Duration::ZERO,
            running: true,
        }
    }

    /// Limit the number of repeats (None = forever)
    pub fn with_repeat_count(mut self, repeat_count: Option<u32>) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    /// Set the playback direction
    pub fn with_direction(mut self, direction: PlaybackDirection) -> Self {
        self.direction = direction;
        self
    }

    // ===== OBSERVERS =====

    /// All frames
    pub fn frames(&self) -> &[Arc<Texture>] {
        &self.frames
    }

    /// First frame of the sequence, if any
    pub fn first_frame(&self) -> Option<&Arc<Texture>> {
        self.frames.first()
    }

    /// Duration of a single cycle
    pub fn cycle_duration(&self) -> Duration {
        self.frame_duration * self.frames.len() as u32
    }

    /// Total run time; None for a forever-looping animation
    pub fn total_duration(&self) -> Option<Duration> {
        self.repeat_count
            .map(|n| self.cycle_duration() * (n + 1))
    }

    /// Accumulated cursor time
    pub fn time(&self) -> Duration {
        self.time
    }

    /// True while the cursor advances on elapse
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True once a bounded animation has played out
    pub fn is_done(&self) -> bool {
        match self.total_duration() {
            Some(total) => self.time >= total,
            None => false,
        }
    }

    /// Resolve the frame shown at an arbitrary clock value.
    ///
    /// Pure: does not touch the cursor. Bounded animations hold their final
    /// frame after running out.
    pub fn frame_at(&self, time: Duration) -> Option<&Arc<Texture>> {
        if self.frames.is_empty() {
            return None;
        }
        if self.frame_duration.is_zero() {
            return self.frames.first();
        }

        let frame_count = self.frames.len() as u64;
        let raw_index = (time.as_nanos() / self.frame_duration.as_nanos().max(1)) as u64;

        let index = match self.total_duration() {
            Some(total) if time >= total => frame_count - 1,
            _ => raw_index % frame_count,
        };

        let index = match self.direction {
            PlaybackDirection::Normal => index,
            PlaybackDirection::Reverse => frame_count - 1 - index,
        };

        self.frames.get(index as usize)
    }

    // ===== CURSOR =====

    /// Frame under the cursor
    pub fn current_frame(&self) -> Option<&Arc<Texture>> {
        self.frame_at(self.time)
    }

    /// Advance the cursor by the elapsed time
    pub fn elapse(&mut self, time: Duration) {
        if self.running {
            self.time += time;
        }
    }

    /// Start/resume the cursor
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop the cursor (current frame holds)
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Rewind the cursor to the beginning
    pub fn reset(&mut self) {
        self.time = Duration::ZERO;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "animation_tests.rs"]
mod tests;
