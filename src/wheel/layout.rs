//! Measurement contract with the layout host and the pre-layout queue.

/// How the host constrains the wheel's height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureMode {
    /// The height is fixed; rows share it evenly.
    Exactly,
    /// The wheel may be at most this tall; it sizes itself from its config.
    AtMost,
    /// No constraint; the wheel sizes itself from its config.
    #[default]
    Unspecified,
}

/// A positioning request made before the first measurement.
///
/// Queued in call order and replayed once `item_height` is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredOp {
    /// Land on the index without animating.
    JumpTo(usize),
    /// Animate to the index.
    AnimateTo(usize),
}

/// Item height for a measurement, never below one pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn item_height_for(
    mode: MeasureMode,
    available_height: i32,
    default_height: i32,
    visible_count: usize,
) -> i32 {
    let h = match mode {
        MeasureMode::Exactly => available_height / visible_count as i32,
        MeasureMode::AtMost | MeasureMode::Unspecified => default_height,
    };
    if h < 1 { 1 } else { h }
}
