//! Motion: Time-stepped scrolling shared by every wheel.
//!
//! - [`WheelScroller`]: the motion simulator, polled once per frame
//! - [`VelocityTracker`]: turns pointer samples into a release velocity

mod scroller;
mod velocity;

pub use scroller::{
    MotionFrame, WheelScroller, DEFAULT_DURATION_TICKS, FLING_DECELERATION, FRAME_MILLIS,
};
pub use velocity::{VelocityTracker, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY};
