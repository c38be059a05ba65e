//! Velocity tracking for pointer gestures.

use std::collections::VecDeque;

/// Samples older than this (relative to the newest) are discarded.
const HORIZON_MS: u64 = 100;

/// A pointer that has not moved for this long before release is at rest.
const ASSUME_STOPPED_MS: u64 = 40;

/// Maximum fling velocity in pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Releases slower than this (pixels per second) settle without a fling.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

#[derive(Debug, Clone, Copy)]
struct Sample {
    time_ms: u64,
    y: f32,
}

/// Estimates vertical pointer velocity from recent movement.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer position.
    pub fn add(&mut self, time_ms: u64, y: f32) {
        self.samples.push_back(Sample { time_ms, y });
        while let Some(front) = self.samples.front() {
            if time_ms.saturating_sub(front.time_ms) > HORIZON_MS {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in pixels per second at `release_ms`, capped at [`MAX_FLING_VELOCITY`].
    ///
    /// Positive values mean the pointer was moving down.
    #[allow(clippy::cast_precision_loss)]
    pub fn velocity(&self, release_ms: u64) -> f32 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        if release_ms.saturating_sub(last.time_ms) >= ASSUME_STOPPED_MS {
            return 0.0;
        }
        let dt = last.time_ms.saturating_sub(first.time_ms);
        if dt == 0 {
            return 0.0;
        }
        let v = (last.y - first.y) / dt as f32 * 1000.0;
        v.clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY)
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
