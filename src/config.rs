//! Wheel configuration.

use crate::error::{Result, WheelError};
use crate::motion::DEFAULT_DURATION_TICKS;
use crate::surface::Rgb;

/// Visual and behavioural configuration for one wheel, fixed at construction.
#[derive(Debug, Clone)]
pub struct WheelConfig {
    /// Font size of unselected rows, in pixels.
    pub text_size: f32,
    /// Font size of the row exactly at the centre, in pixels.
    pub selected_text_size: f32,
    /// Color of unselected rows.
    pub text_color: Rgb,
    /// Color of the row inside the centre band.
    pub selected_text_color: Rgb,
    /// Row height used when the host lets the wheel size itself.
    pub item_height: i32,
    /// Number of rows shown at once. Must be odd.
    pub visible_count: usize,
    /// Background of the centre band.
    pub selected_bg_color: Rgb,
    /// Duration of animated programmatic scrolls, in frames.
    pub scroll_duration_ticks: u32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            text_size: 24.0,
            selected_text_size: 28.0,
            text_color: Rgb::GREY,
            selected_text_color: Rgb::INK,
            item_height: 48,
            visible_count: 5,
            selected_bg_color: Rgb::BAND,
            scroll_duration_ticks: DEFAULT_DURATION_TICKS,
        }
    }
}

impl WheelConfig {
    /// Reject configurations with no single centre slot.
    pub fn validate(&self) -> Result<()> {
        if self.visible_count == 0 {
            return Err(WheelError::ZeroVisibleCount);
        }
        if self.visible_count % 2 == 0 {
            return Err(WheelError::EvenVisibleCount(self.visible_count));
        }
        Ok(())
    }

    /// Rows above (and below) the centre row.
    pub const fn half(&self) -> usize {
        self.visible_count / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(WheelConfig::default().validate().is_ok());
        assert_eq!(WheelConfig::default().half(), 2);
    }

    #[test]
    fn test_even_count_rejected() {
        let config = WheelConfig {
            visible_count: 4,
            ..WheelConfig::default()
        };
        assert!(matches!(config.validate(), Err(WheelError::EvenVisibleCount(4))));
        let config = WheelConfig {
            visible_count: 0,
            ..WheelConfig::default()
        };
        assert!(matches!(config.validate(), Err(WheelError::ZeroVisibleCount)));
    }
}
