//! Frame-stepped scroller for flings and programmatic scrolls.
//!
//! The scroller is a clock plus a trajectory. A driver calls [`WheelScroller::tick`]
//! exactly once per animation frame and copies the returned offset into its own
//! state; the scroller never touches the wheel directly.

use tracing::trace;

/// Length of one animation frame in milliseconds.
pub const FRAME_MILLIS: u32 = 16;

/// Default programmatic scroll duration in frames (~250ms at 60 FPS).
pub const DEFAULT_DURATION_TICKS: u32 = 15;

/// Constant deceleration applied to flings, in pixels per second squared.
pub const FLING_DECELERATION: f32 = 4_000.0;

/// One step of a running motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionFrame {
    /// Offset after this step.
    pub offset: i32,
    /// Whether the motion has come to rest.
    pub finished: bool,
}

#[derive(Debug, Clone, Copy)]
struct MotionTask {
    start: i32,
    end: i32,
    duration_ticks: u32,
    elapsed_ticks: u32,
}

impl MotionTask {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn sample(&self) -> i32 {
        if self.elapsed_ticks >= self.duration_ticks {
            return self.end;
        }
        let t = self.elapsed_ticks as f32 / self.duration_ticks as f32;
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.start + ((self.end - self.start) as f32 * eased).round() as i32
    }
}

/// Decelerating scroller with snap-to-item fling targets.
#[derive(Debug, Default)]
pub struct WheelScroller {
    task: Option<MotionTask>,
    current: i32,
    item_height: i32,
}

impl WheelScroller {
    /// Create an idle scroller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the item pitch fling targets snap to (0 disables snapping).
    pub const fn set_item_height(&mut self, item_height: i32) {
        self.item_height = item_height;
    }

    /// Scroll from `from` to `to` over `duration_ticks` frames.
    ///
    /// A duration of 0 lands on `to` at the first [`tick`](Self::tick).
    pub fn start_scroll(&mut self, from: i32, to: i32, duration_ticks: u32) {
        trace!(from, to, duration_ticks, "start scroll");
        self.current = from;
        self.task = Some(MotionTask {
            start: from,
            end: to,
            duration_ticks,
            elapsed_ticks: 0,
        });
    }

    /// Fling from `from` with `velocity` pixels per second.
    ///
    /// The resting offset is the projected stop point snapped to the nearest
    /// item boundary and clamped into `[min, max]`; the trajectory is
    /// shortened so motion ends exactly there. Returns the resting offset.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fling(&mut self, from: i32, velocity: f32, min: i32, max: i32) -> i32 {
        let distance = velocity * velocity.abs() / (2.0 * FLING_DECELERATION);
        let projected = from as f32 + distance;
        let snapped = if self.item_height > 0 {
            let h = self.item_height as f32;
            (projected / h).round() as i32 * self.item_height
        } else {
            projected.round() as i32
        };
        let end = snapped.clamp(min, max);

        let travel = (end - from).abs() as f32;
        let seconds = (2.0 * travel / FLING_DECELERATION).sqrt();
        let ticks = (seconds * 1000.0 / FRAME_MILLIS as f32).ceil() as u32;

        trace!(from, velocity, end, ticks, "fling");
        self.start_scroll(from, end, ticks);
        end
    }

    /// Advance one frame.
    pub fn tick(&mut self) -> MotionFrame {
        let Some(task) = self.task.as_mut() else {
            return MotionFrame {
                offset: self.current,
                finished: true,
            };
        };
        task.elapsed_ticks = task.elapsed_ticks.saturating_add(1);
        self.current = task.sample();
        let finished = task.elapsed_ticks >= task.duration_ticks;
        if finished {
            self.task = None;
        }
        MotionFrame {
            offset: self.current,
            finished,
        }
    }

    /// Stop immediately, leaving the offset where the last frame put it.
    pub fn abort(&mut self) {
        if self.task.take().is_some() {
            trace!(offset = self.current, "motion aborted");
        }
    }

    /// Whether no motion is running.
    pub const fn is_finished(&self) -> bool {
        self.task.is_none()
    }

    /// Offset produced by the most recent frame.
    pub const fn current(&self) -> i32 {
        self.current
    }

    /// Where the running motion will come to rest, if any.
    pub fn final_offset(&self) -> Option<i32> {
        self.task.map(|t| t.end)
    }
}
