//! Offset/index mapping: Pure functions from scroll offset to what is on screen.
//!
//! # Coordinates
//!
//! An offset of `0` centres index 0; an offset of `-i * item_height` centres
//! index `i`. Slot positions are reported twice: `top` relative to the top of
//! the viewport, and `center_y` relative to the centre of the centre band, so
//! that `center_y == 0` means "exactly selected".
//!
//! ```text
//!   top = 0        ┌──────────────┐  k = -2
//!                  ├──────────────┤  k = -1
//!   half * h       ├══════════════┤  k =  0   (centre band)
//!                  ├──────────────┤  k = +1
//!                  └──────────────┘  k = +2
//! ```
//!
//! Every function here is deterministic and side-effect free.

use crate::surface::Rgb;

/// One rendered band at a given offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Position relative to the centre slot (negative is above).
    pub k: i32,
    /// Logical data index shown in this slot. May fall outside the data.
    pub index: i64,
    /// Top edge relative to the viewport top, in pixels.
    pub top: i32,
    /// Centre relative to the centre of the centre band, in pixels.
    pub center_y: i32,
}

/// Index whose rest position is closest to `offset`, without clamping.
#[allow(clippy::cast_possible_truncation)]
pub fn nearest_index(offset: i32, item_height: i32) -> i64 {
    if item_height <= 0 {
        return 0;
    }
    (-f64::from(offset) / f64::from(item_height)).round() as i64
}

/// Selected index for `offset`, clamped into `0..len` (0 for empty data).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn selected_index(offset: i32, item_height: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = i64::try_from(len - 1).unwrap_or(i64::MAX);
    nearest_index(offset, item_height).clamp(0, last) as usize
}

/// Rest offset that centres `index`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn offset_for_index(index: usize, item_height: i32) -> i32 {
    -(index as i32) * item_height
}

/// Valid offset range `(min, max)` for `len` items.
pub const fn offset_bounds(len: usize, item_height: i32) -> (i32, i32) {
    if len == 0 {
        return (0, 0);
    }
    (offset_for_index(len - 1, item_height), 0)
}

/// Snap `offset` to the nearest item boundary within `len` items.
#[allow(clippy::cast_possible_truncation)]
pub fn snap_offset(offset: i32, item_height: i32, len: usize) -> i32 {
    offset_for_index(selected_index(offset, item_height, len), item_height)
}

/// Slots to render at `offset`, ordered top to bottom.
///
/// The `visible_count` bands centred on the viewport are always present.
/// When the offset sits between two rest positions one more slot is added
/// on the side the motion exposes, so the viewport edge is never left blank.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn visible_slots(offset: i32, item_height: i32, visible_count: usize) -> Vec<Slot> {
    let half = (visible_count / 2) as i32;
    let centre = nearest_index(offset, item_height);
    let residual = offset + (centre as i32) * item_height;

    let first = if residual > 0 { -half - 1 } else { -half };
    let last = if residual < 0 { half + 1 } else { half };

    (first..=last)
        .map(|k| {
            let center_y = residual + k * item_height;
            Slot {
                k,
                index: centre + i64::from(k),
                top: half * item_height + center_y,
                center_y,
            }
        })
        .collect()
}

/// Font size for a slot whose centre is `slot_center_y` from the centre line.
///
/// `max_size` exactly at the centre, falling linearly to `min_size` at half an
/// item away and staying there beyond.
pub fn interpolated_size(
    slot_center_y: f32,
    item_height: f32,
    min_size: f32,
    max_size: f32,
) -> f32 {
    if item_height <= 0.0 {
        return min_size;
    }
    let progress = (slot_center_y.abs() / (item_height / 2.0)).min(1.0);
    (max_size - min_size).mul_add(-progress, max_size)
}

/// Whether a slot centre lies inside the centre band, `(-h/2, h/2]`.
///
/// The half-open interval guarantees exactly one slot qualifies at any offset.
pub const fn in_center_band(slot_center_y: i32, item_height: i32) -> bool {
    let doubled = slot_center_y * 2;
    doubled > -item_height && doubled <= item_height
}

/// Text color for a slot: a hard cutoff at the centre band, no blending.
pub const fn interpolated_color(
    slot_center_y: i32,
    item_height: i32,
    default: Rgb,
    selected: Rgb,
) -> Rgb {
    if in_center_band(slot_center_y, item_height) {
        selected
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: i32 = 48;

    #[test]
    fn test_selected_index_round_trips() {
        for i in 0..50 {
            assert_eq!(selected_index(offset_for_index(i, H), H, 50), i);
        }
    }

    #[test]
    fn test_selected_index_rounds_and_clamps() {
        assert_eq!(selected_index(-23, H, 10), 0);
        assert_eq!(selected_index(-24, H, 10), 1);
        assert_eq!(selected_index(-25, H, 10), 1);
        assert_eq!(selected_index(100, H, 10), 0);
        assert_eq!(selected_index(-10_000, H, 10), 9);
        assert_eq!(selected_index(-10_000, H, 0), 0);
    }

    #[test]
    fn test_selected_index_is_monotonic() {
        let mut prev = 0;
        for offset in (-H * 20..=0).rev() {
            let idx = selected_index(offset, H, 21);
            assert!(idx >= prev, "offset {offset} went back to {idx}");
            prev = idx;
        }
    }

    #[test]
    fn test_slots_at_rest() {
        let slots = visible_slots(0, H, 5);
        assert_eq!(slots.len(), 5);
        let indices: Vec<i64> = slots.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![-2, -1, 0, 1, 2]);
        let tops: Vec<i32> = slots.iter().map(|s| s.top).collect();
        assert_eq!(tops, vec![0, 48, 96, 144, 192]);
        assert_eq!(slots[2].center_y, 0);
    }

    #[test]
    fn test_slots_mid_drag_interpolate() {
        let slots = visible_slots(-10, H, 5);
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0].top, -10);
        assert_eq!((slots[2].index, slots[2].top, slots[2].center_y), (0, 86, -10));
        assert_eq!(slots[5].index, 3);

        let slots = visible_slots(-H * 7 + 10, H, 5);
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0].index, 4);
        assert_eq!((slots[3].index, slots[3].top, slots[3].center_y), (7, 106, 10));
    }

    #[test]
    fn test_slots_use_one_formula_at_large_offsets() {
        // Index of every slot moves by exactly one per item height scrolled.
        for step in 0..40 {
            let a = visible_slots(-H * step, H, 5);
            assert_eq!(a[2].index, i64::from(step));
            assert_eq!(a[0].index, i64::from(step) - 2);
        }
    }

    #[test]
    fn test_interpolated_size() {
        assert_eq!(interpolated_size(0.0, 48.0, 24.0, 28.0), 28.0);
        assert_eq!(interpolated_size(24.0, 48.0, 24.0, 28.0), 24.0);
        assert_eq!(interpolated_size(-24.0, 48.0, 24.0, 28.0), 24.0);
        assert_eq!(interpolated_size(100.0, 48.0, 24.0, 28.0), 24.0);
        let mut prev = 28.0;
        for y in 0..=24 {
            #[allow(clippy::cast_precision_loss)]
            let size = interpolated_size(y as f32, 48.0, 24.0, 28.0);
            assert!(size <= prev);
            prev = size;
        }
    }

    #[test]
    fn test_color_is_a_hard_cutoff() {
        assert_eq!(interpolated_color(0, H, Rgb::GREY, Rgb::INK), Rgb::INK);
        assert_eq!(interpolated_color(24, H, Rgb::GREY, Rgb::INK), Rgb::INK);
        assert_eq!(interpolated_color(-24, H, Rgb::GREY, Rgb::INK), Rgb::GREY);
        assert_eq!(interpolated_color(25, H, Rgb::GREY, Rgb::INK), Rgb::GREY);
    }

    #[test]
    fn test_exactly_one_slot_in_center_band() {
        for offset in -H * 3..=0 {
            let count = visible_slots(offset, H, 5)
                .iter()
                .filter(|s| in_center_band(s.center_y, H))
                .count();
            assert_eq!(count, 1, "offset {offset}");
        }
    }

    #[test]
    fn test_offset_bounds() {
        assert_eq!(offset_bounds(0, H), (0, 0));
        assert_eq!(offset_bounds(1, H), (0, 0));
        assert_eq!(offset_bounds(10, H), (-9 * H, 0));
        assert_eq!(snap_offset(-70, H, 10), -48);
    }
}
