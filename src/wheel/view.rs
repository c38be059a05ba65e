//! Wheel view: The single-wheel controller.
//!
//! Owns the offset, the data and the gesture. The host feeds it pointer
//! events and one [`WheelView::tick`] per animation frame, and asks it to
//! [`render`](WheelView::render) whenever a response requests a redraw.
//!
//! # States
//!
//! ```text
//!            press                 release (fast)
//!   Idle ───────────▶ Dragging ───────────────────▶ Animating
//!    ▲                   │  release (slow) = settle     │
//!    └───────────────────┘                              │
//!    └──────────────────── motion finished ─────────────┘
//! ```
//!
//! A press in any state aborts running motion before the drag starts.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace};

use super::gesture::{GestureState, PointerEvent, PointerResponse};
use super::layout::{item_height_for, DeferredOp, MeasureMode};
use super::mapper;
use crate::config::WheelConfig;
use crate::error::{Result, WheelError};
use crate::motion::{VelocityTracker, WheelScroller, MIN_FLING_VELOCITY};
use crate::surface::{Bounds, DrawSurface, Point, TextStyle};

/// Interaction state of a wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelState {
    /// At rest on an item boundary.
    #[default]
    Idle,
    /// Following a pointer.
    Dragging,
    /// Running a fling or programmatic scroll.
    Animating,
}

/// Callback invoked with the new index whenever the wheel settles on it.
pub type SelectedChanged = Box<dyn FnMut(usize)>;

/// A vertically scrolling, snap-to-item picker wheel.
pub struct WheelView {
    config: WheelConfig,
    data: Vec<String>,
    /// Cumulative scroll displacement; `-i * item_height` centres index `i`.
    offset: i32,
    /// Frozen at the first measurement.
    item_height: Option<i32>,
    width: i32,
    /// Last committed selection.
    position: usize,
    state: WheelState,
    scroller: WheelScroller,
    velocity: VelocityTracker,
    gesture: Option<GestureState>,
    deferred: VecDeque<DeferredOp>,
    listener: Option<SelectedChanged>,
}

impl WheelView {
    /// Create an empty, unmeasured wheel.
    pub fn new(config: WheelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create a wheel with the default configuration.
    pub fn with_default_config() -> Self {
        Self::build(WheelConfig::default())
    }

    fn build(config: WheelConfig) -> Self {
        Self {
            config,
            data: Vec::new(),
            offset: 0,
            item_height: None,
            width: 0,
            position: 0,
            state: WheelState::Idle,
            scroller: WheelScroller::new(),
            velocity: VelocityTracker::new(),
            gesture: None,
            deferred: VecDeque::new(),
            listener: None,
        }
    }

    /// Configuration this wheel was built with.
    pub const fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Current items.
    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// Current scroll offset in pixels.
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    /// Row height, once measured.
    pub const fn item_height(&self) -> Option<i32> {
        self.item_height
    }

    /// Whether the host has measured this wheel.
    pub const fn is_measured(&self) -> bool {
        self.item_height.is_some()
    }

    /// Current interaction state.
    pub const fn state(&self) -> WheelState {
        self.state
    }

    /// Last committed selection.
    ///
    /// Never derived from a partially moved offset: the selection only
    /// changes once motion settles.
    pub const fn selected_position(&self) -> usize {
        self.position
    }

    /// Text of the committed selection, if there is data.
    pub fn selected_item(&self) -> Option<&str> {
        self.data.get(self.position).map(String::as_str)
    }

    /// Positioning requests waiting for the first measurement.
    pub fn pending_ops(&self) -> impl Iterator<Item = &DeferredOp> {
        self.deferred.iter()
    }

    /// Register the selection-changed listener.
    pub fn set_on_selected_changed(&mut self, listener: impl FnMut(usize) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Measure against the host's constraints; returns the wheel's size.
    ///
    /// The first call fixes the row height for the lifetime of the wheel and
    /// replays every positioning request made before it.
    pub fn measure(
        &mut self,
        available_width: i32,
        available_height: i32,
        mode: MeasureMode,
    ) -> (i32, i32) {
        self.width = available_width;
        let h = if let Some(h) = self.item_height {
            h
        } else {
            let h = item_height_for(
                mode,
                available_height,
                self.config.item_height,
                self.config.visible_count,
            );
            self.item_height = Some(h);
            self.scroller.set_item_height(h);
            debug!(item_height = h, queued = self.deferred.len(), "wheel measured");
            self.flush_deferred(h);
            h
        };

        let height = match mode {
            MeasureMode::Exactly => available_height,
            MeasureMode::AtMost | MeasureMode::Unspecified => h * self.visible_rows(),
        };
        (self.width, height)
    }

    /// Replace the data.
    ///
    /// With `position`, the wheel lands there without animating. Without it,
    /// the current selection is kept, clamped to the last item when the new
    /// data is shorter. Before measurement the jump is queued.
    pub fn set_data(&mut self, data: Vec<String>, position: Option<usize>) -> Result<()> {
        if let Some(p) = position {
            WheelError::check_index("position", p, data.len())?;
        }

        let kept = self.position.min(data.len().saturating_sub(1));
        self.data = data;
        self.position = position.unwrap_or(kept);
        self.scroller.abort();
        if self.state == WheelState::Animating {
            self.state = WheelState::Idle;
        }

        trace!(len = self.data.len(), position = self.position, "data replaced");
        match self.item_height {
            Some(h) => self.jump(self.position, h),
            None => self.deferred.push_back(DeferredOp::JumpTo(self.position)),
        }
        Ok(())
    }

    /// Select `index`, animating there or landing immediately.
    ///
    /// This is a programmatic change: it commits the selection at once and
    /// does not invoke the selection-changed listener. A drag in progress is
    /// dropped; its later moves are handed to the parent.
    pub fn set_selected_position(&mut self, index: usize, animate: bool) -> Result<()> {
        WheelError::check_index("position", index, self.data.len())?;
        self.position = index;
        self.release_gesture();

        let op = if animate {
            DeferredOp::AnimateTo(index)
        } else {
            DeferredOp::JumpTo(index)
        };
        match self.item_height {
            Some(h) => self.apply(op, h),
            None => self.deferred.push_back(op),
        }
        Ok(())
    }

    /// Animate `delta` items up (negative) or down (positive) from the
    /// current selection, as a user action: the listener fires on settle.
    pub fn step(&mut self, delta: isize) -> bool {
        let Some(h) = self.item_height else {
            return false;
        };
        if self.data.is_empty() || self.gesture.is_some() {
            return false;
        }
        let resting = self.scroller.final_offset().unwrap_or(self.offset);
        let from = mapper::selected_index(resting, h, self.data.len());
        let target = from.saturating_add_signed(delta).min(self.data.len() - 1);
        self.scroller.start_scroll(
            self.offset,
            mapper::offset_for_index(target, h),
            self.config.scroll_duration_ticks,
        );
        self.state = WheelState::Animating;
        true
    }

    /// Pointer pressed: start (or take over) the drag.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> PointerResponse {
        self.scroller.abort();
        self.gesture = Some(GestureState::start(event));
        self.velocity.clear();
        self.velocity.add(event.time_ms, event.y);
        self.state = WheelState::Dragging;
        PointerResponse::captured(false)
    }

    /// Pointer moved.
    ///
    /// Dominance is re-evaluated on every move: a mostly horizontal move is
    /// left to ancestors even mid-gesture. A move that would push past either
    /// end is clamped and handed off.
    #[allow(clippy::cast_possible_truncation)]
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> PointerResponse {
        let Some(gesture) = self.gesture else {
            return PointerResponse::handed_off(false);
        };
        if gesture.id != event.id {
            return PointerResponse::ignored();
        }

        // Only applied moves advance the anchor, so travel handed off to the
        // parent is picked up by the next vertical move.
        let dx = event.x - gesture.last_x;
        let dy = event.y - gesture.last_y;
        if dx.abs() >= dy.abs() {
            return PointerResponse::handed_off(false);
        }

        self.velocity.add(event.time_ms, event.y);

        let (min, max) = self.bounds();
        let moved = self.offset.saturating_add(dy.round() as i32);
        let clamped = moved.clamp(min, max);
        if clamped != self.offset {
            self.gesture = Some(GestureState {
                last_x: event.x,
                last_y: event.y,
                ..gesture
            });
        }
        if clamped != moved {
            let changed = clamped != self.offset;
            self.offset = clamped;
            return PointerResponse::handed_off(changed);
        }

        self.offset = moved;
        PointerResponse::captured(true)
    }

    /// Pointer released: fling, or settle at once if it was barely moving.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> PointerResponse {
        self.release(event)
    }

    /// Pointer cancelled by the host; handled like a release.
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) -> PointerResponse {
        self.release(event)
    }

    /// End a drag in progress, snapping to the nearest item without
    /// animating.
    ///
    /// Returns the new selection if the snap landed on a different index;
    /// the listener fires as for a release.
    pub fn end_gesture(&mut self) -> Option<usize> {
        if self.gesture.is_none() {
            return None;
        }
        self.release_gesture();
        let h = self.item_height?;
        if self.data.is_empty() {
            return None;
        }
        self.snap_now(h)
    }

    /// Drop any gesture and its velocity samples without settling.
    pub fn release_gesture(&mut self) {
        self.gesture = None;
        self.velocity.clear();
        if self.state == WheelState::Dragging {
            self.state = WheelState::Idle;
        }
    }

    /// Advance running motion by one frame.
    ///
    /// Call at most once per frame. Returns the new selection when motion
    /// settles on an index different from the last committed one.
    pub fn tick(&mut self) -> Option<usize> {
        if self.state != WheelState::Animating {
            return None;
        }
        let h = self.item_height?;
        let (min, max) = self.bounds();

        if self.scroller.final_offset().is_some_and(|end| end < min || end > max) {
            debug!(offset = self.offset, "motion target left the data, aborting");
            return self.abort_and_settle(h);
        }

        let frame = self.scroller.tick();
        if frame.offset < min || frame.offset > max {
            return self.abort_and_settle(h);
        }
        self.offset = frame.offset;

        if frame.finished {
            self.state = WheelState::Idle;
            return self.settle(h);
        }
        None
    }

    /// Draw the centre band and every visible row.
    #[allow(clippy::cast_precision_loss)]
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let Some(h) = self.item_height else {
            return;
        };
        if self.data.is_empty() {
            return;
        }

        let half = self.visible_rows() / 2;
        surface.fill_rect(Bounds::new(0, half * h, self.width, h), self.config.selected_bg_color);

        for slot in mapper::visible_slots(self.offset, h, self.config.visible_count) {
            let Some(text) = usize::try_from(slot.index).ok().and_then(|i| self.data.get(i)) else {
                continue;
            };
            let style = TextStyle {
                size: mapper::interpolated_size(
                    slot.center_y as f32,
                    h as f32,
                    self.config.text_size,
                    self.config.selected_text_size,
                ),
                color: mapper::interpolated_color(
                    slot.center_y,
                    h,
                    self.config.text_color,
                    self.config.selected_text_color,
                ),
                centered: true,
            };
            surface.draw_text(text, Point::new(self.width / 2, slot.top + h / 2), style);
        }
    }

    fn release(&mut self, event: &PointerEvent) -> PointerResponse {
        match self.gesture {
            Some(g) if g.id == event.id => {}
            _ => return PointerResponse::ignored(),
        }
        self.gesture = None;
        let velocity = self.velocity.velocity(event.time_ms);
        self.velocity.clear();
        self.state = WheelState::Idle;

        let Some(h) = self.item_height else {
            return PointerResponse::handed_off(false);
        };
        if self.data.is_empty() {
            return PointerResponse::handed_off(false);
        }

        let mut response = PointerResponse::handed_off(true);
        if velocity.abs() < MIN_FLING_VELOCITY {
            response.selection = self.snap_now(h);
        } else {
            let (min, max) = self.bounds();
            let end = self.scroller.fling(self.offset, velocity, min, max);
            debug!(velocity, from = self.offset, to = end, "fling");
            self.state = WheelState::Animating;
        }
        response
    }

    /// Zero-duration run to the nearest boundary, then settle.
    fn snap_now(&mut self, h: i32) -> Option<usize> {
        let target = mapper::snap_offset(self.offset, h, self.data.len());
        self.scroller.start_scroll(self.offset, target, 0);
        self.offset = self.scroller.tick().offset;
        self.settle(h)
    }

    fn abort_and_settle(&mut self, h: i32) -> Option<usize> {
        self.scroller.abort();
        self.offset = mapper::snap_offset(self.offset, h, self.data.len());
        self.state = WheelState::Idle;
        self.settle(h)
    }

    fn settle(&mut self, h: i32) -> Option<usize> {
        let index = mapper::selected_index(self.offset, h, self.data.len());
        if self.data.is_empty() || index == self.position {
            return None;
        }
        self.position = index;
        debug!(index, "selection changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(index);
        }
        Some(index)
    }

    fn apply(&mut self, op: DeferredOp, h: i32) {
        match op {
            DeferredOp::JumpTo(index) => self.jump(index, h),
            DeferredOp::AnimateTo(index) => {
                self.scroller.start_scroll(
                    self.offset,
                    mapper::offset_for_index(index, h),
                    self.config.scroll_duration_ticks,
                );
                self.state = WheelState::Animating;
            }
        }
    }

    /// Zero-duration run: lands synchronously.
    fn jump(&mut self, index: usize, h: i32) {
        self.scroller.start_scroll(self.offset, mapper::offset_for_index(index, h), 0);
        self.offset = self.scroller.tick().offset;
        if self.state == WheelState::Animating {
            self.state = WheelState::Idle;
        }
    }

    fn flush_deferred(&mut self, h: i32) {
        let last = self.data.len().saturating_sub(1);
        while let Some(op) = self.deferred.pop_front() {
            let clamped = match op {
                DeferredOp::JumpTo(i) => DeferredOp::JumpTo(i.min(last)),
                DeferredOp::AnimateTo(i) => DeferredOp::AnimateTo(i.min(last)),
            };
            trace!(?clamped, "replaying deferred op");
            self.apply(clamped, h);
        }
    }

    fn bounds(&self) -> (i32, i32) {
        mapper::offset_bounds(self.data.len(), self.item_height.unwrap_or(0))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    const fn visible_rows(&self) -> i32 {
        self.config.visible_count as i32
    }
}

impl fmt::Debug for WheelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WheelView")
            .field("len", &self.data.len())
            .field("offset", &self.offset)
            .field("item_height", &self.item_height)
            .field("position", &self.position)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Drop for WheelView {
    fn drop(&mut self) {
        self.release_gesture();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, Rgb};
    use crate::wheel::gesture::ParentIntercept;
    use std::cell::RefCell;
    use std::rc::Rc;

    const H: i32 = 48;

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| i.to_string()).collect()
    }

    fn wheel(n: usize) -> WheelView {
        let mut w = WheelView::with_default_config();
        w.measure(200, 0, MeasureMode::Unspecified);
        w.set_data(items(n), None).unwrap();
        w
    }

    fn run(w: &mut WheelView) -> Vec<usize> {
        let mut changes = Vec::new();
        for _ in 0..1000 {
            if let Some(i) = w.tick() {
                changes.push(i);
            }
            if w.state() != WheelState::Animating {
                break;
            }
        }
        changes
    }

    fn ev(y: f32, t: u64) -> PointerEvent {
        PointerEvent::new(1, 100.0, y, t)
    }

    #[test]
    fn test_measure_modes() {
        let mut w = WheelView::with_default_config();
        assert_eq!(w.measure(200, 1000, MeasureMode::AtMost), (200, 240));
        assert_eq!(w.item_height(), Some(48));

        let mut w = WheelView::with_default_config();
        assert_eq!(w.measure(200, 250, MeasureMode::Exactly), (200, 250));
        assert_eq!(w.item_height(), Some(50));
        // Frozen after the first measurement.
        w.measure(300, 500, MeasureMode::Exactly);
        assert_eq!(w.item_height(), Some(50));
    }

    #[test]
    fn test_even_visible_count_is_configuration_error() {
        let config = WheelConfig {
            visible_count: 6,
            ..WheelConfig::default()
        };
        assert!(matches!(WheelView::new(config), Err(WheelError::EvenVisibleCount(6))));
    }

    #[test]
    fn test_set_selected_position_instant() {
        let mut w = wheel(20);
        for i in 0..20 {
            w.set_selected_position(i, false).unwrap();
            assert_eq!(w.selected_position(), i);
            assert_eq!(w.offset(), -(i as i32) * H);
        }
    }

    #[test]
    fn test_set_selected_position_rejects_out_of_range() {
        let mut w = wheel(3);
        w.set_selected_position(1, false).unwrap();
        let err = w.set_selected_position(3, false).unwrap_err();
        assert!(matches!(
            err,
            WheelError::IndexOutOfRange {
                argument: "position",
                index: 3,
                len: 3
            }
        ));
        assert_eq!(w.selected_position(), 1);
        assert_eq!(w.offset(), -H);
    }

    #[test]
    fn test_animated_selection_does_not_notify() {
        let mut w = wheel(10);
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = fired.clone();
        w.set_on_selected_changed(move |i| sink.borrow_mut().push(i));

        w.set_selected_position(4, true).unwrap();
        assert_eq!(w.state(), WheelState::Animating);
        assert_eq!(w.selected_position(), 4);
        assert!(run(&mut w).is_empty());
        assert_eq!(w.offset(), -4 * H);
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn test_set_data_clamps_selection() {
        let mut w = wheel(10);
        w.set_selected_position(8, false).unwrap();
        w.set_data(items(3), None).unwrap();
        assert_eq!(w.selected_position(), 2);
        assert_eq!(w.offset(), -2 * H);

        w.set_data(items(5), Some(4)).unwrap();
        assert_eq!(w.offset(), -4 * H);
        assert!(w.set_data(items(2), Some(2)).is_err());
        assert_eq!(w.data().len(), 5);
    }

    #[test]
    fn test_operations_before_measure_are_replayed() {
        let mut w = WheelView::with_default_config();
        w.set_data(items(10), Some(3)).unwrap();
        w.set_selected_position(6, false).unwrap();
        assert_eq!(w.pending_ops().count(), 2);
        assert_eq!(w.selected_position(), 6);
        assert_eq!(w.offset(), 0);

        w.measure(200, 0, MeasureMode::Unspecified);
        assert_eq!(w.pending_ops().count(), 0);
        assert_eq!(w.offset(), -6 * H);
        assert_eq!(w.selected_position(), 6);
    }

    #[test]
    fn test_drag_is_invertible() {
        let mut w = wheel(10);
        w.set_selected_position(5, false).unwrap();
        let start = w.offset();
        w.on_pointer_down(&ev(100.0, 0));
        assert!(w.on_pointer_move(&ev(130.0, 16)).consumed);
        assert_eq!(w.offset(), start + 30);
        assert!(w.on_pointer_move(&ev(100.0, 32)).consumed);
        assert_eq!(w.offset(), start);
    }

    #[test]
    fn test_horizontal_moves_are_not_consumed_per_event() {
        let mut w = wheel(10);
        w.set_selected_position(5, false).unwrap();
        w.on_pointer_down(&ev(100.0, 0));

        let r = w.on_pointer_move(&PointerEvent::new(1, 140.0, 110.0, 16));
        assert!(!r.consumed);
        assert_eq!(r.parent_intercept, ParentIntercept::Allow);
        assert_eq!(w.offset(), -5 * H);

        // Same gesture turns vertical: the next move is consumed again and
        // carries the vertical travel of the handed-off move.
        let r = w.on_pointer_move(&PointerEvent::new(1, 120.0, 160.0, 32));
        assert!(r.consumed);
        assert_eq!(r.parent_intercept, ParentIntercept::Disallow);
        assert_eq!(w.offset(), -5 * H + 60);
    }

    #[test]
    fn test_diagonal_tie_is_horizontal() {
        let mut w = wheel(10);
        w.set_selected_position(5, false).unwrap();
        w.on_pointer_down(&ev(100.0, 0));

        let r = w.on_pointer_move(&PointerEvent::new(1, 120.0, 120.0, 16));
        assert!(!r.consumed);
        assert_eq!(r.parent_intercept, ParentIntercept::Allow);
        assert_eq!(w.offset(), -5 * H);
        assert_eq!(w.state(), WheelState::Dragging);
    }

    #[test]
    fn test_cancel_settles_like_release() {
        let mut w = wheel(10);
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = fired.clone();
        w.set_on_selected_changed(move |i| sink.borrow_mut().push(i));

        w.on_pointer_down(&ev(200.0, 0));
        w.on_pointer_move(&ev(130.0, 16));
        let r = w.on_pointer_cancel(&ev(130.0, 400));
        assert_eq!(r.selection, Some(1));
        assert_eq!(w.offset(), -H);
        assert_eq!(w.state(), WheelState::Idle);
        assert_eq!(*fired.borrow(), vec![1]);

        // The gesture is over: a stray cancel changes nothing.
        assert_eq!(w.on_pointer_cancel(&ev(130.0, 410)), PointerResponse::ignored());
    }

    #[test]
    fn test_end_gesture_snaps_to_nearest_item() {
        let mut w = wheel(10);
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = fired.clone();
        w.set_on_selected_changed(move |i| sink.borrow_mut().push(i));
        assert_eq!(w.end_gesture(), None);

        w.on_pointer_down(&ev(200.0, 0));
        w.on_pointer_move(&ev(170.0, 16));
        assert_eq!(w.offset(), -30);
        assert_eq!(w.end_gesture(), Some(1));
        assert_eq!(w.offset(), -H);
        assert_eq!(w.state(), WheelState::Idle);
        assert_eq!(*fired.borrow(), vec![1]);
        assert!(!w.on_pointer_move(&ev(100.0, 32)).consumed);
        assert_eq!(w.offset(), -H);
    }

    #[test]
    fn test_set_selected_position_ends_drag() {
        let mut w = wheel(10);
        w.on_pointer_down(&ev(200.0, 0));
        w.on_pointer_move(&ev(170.0, 16));

        w.set_selected_position(4, true).unwrap();
        assert_eq!(w.state(), WheelState::Animating);
        assert!(!w.on_pointer_move(&ev(100.0, 32)).consumed);
        assert!(run(&mut w).is_empty());
        assert_eq!(w.offset(), -4 * H);

        w.on_pointer_down(&ev(200.0, 40));
        w.on_pointer_move(&ev(180.0, 56));
        w.set_selected_position(2, false).unwrap();
        assert_eq!(w.state(), WheelState::Idle);
        assert_eq!(w.offset(), -2 * H);
    }

    #[test]
    fn test_overscroll_is_handed_off() {
        let mut w = wheel(10);
        w.on_pointer_down(&ev(100.0, 0));
        let r = w.on_pointer_move(&ev(150.0, 16));
        assert!(!r.consumed);
        assert_eq!(r.parent_intercept, ParentIntercept::Allow);
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn test_slow_release_settles_synchronously() {
        let mut w = wheel(10);
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = fired.clone();
        w.set_on_selected_changed(move |i| sink.borrow_mut().push(i));

        w.on_pointer_down(&ev(200.0, 0));
        w.on_pointer_move(&ev(150.0, 16));
        w.on_pointer_move(&ev(130.0, 32));
        // Held still long enough that release velocity is zero.
        let r = w.on_pointer_up(&ev(130.0, 500));
        assert_eq!(r.selection, Some(1));
        assert_eq!(r.parent_intercept, ParentIntercept::Allow);
        assert_eq!(w.offset(), -H);
        assert_eq!(w.state(), WheelState::Idle);
        assert_eq!(*fired.borrow(), vec![1]);
    }

    #[test]
    fn test_release_without_movement_keeps_selection() {
        let mut w = wheel(10);
        w.set_selected_position(3, false).unwrap();
        w.on_pointer_down(&ev(100.0, 0));
        let r = w.on_pointer_up(&ev(100.0, 10));
        assert_eq!(r.selection, None);
        assert_eq!(w.offset(), -3 * H);
    }

    #[test]
    fn test_fling_settles_inside_bounds() {
        let mut w = wheel(30);
        w.on_pointer_down(&ev(300.0, 0));
        for (i, y) in [280.0, 250.0, 210.0, 160.0].into_iter().enumerate() {
            w.on_pointer_move(&ev(y, (i as u64 + 1) * 16));
        }
        let r = w.on_pointer_up(&ev(160.0, 70));
        assert_eq!(r.selection, None);
        assert_eq!(w.state(), WheelState::Animating);

        let changes = run(&mut w);
        assert_eq!(w.state(), WheelState::Idle);
        assert_eq!(w.offset() % H, 0);
        assert!((-29 * H..=0).contains(&w.offset()));
        assert_eq!(changes, vec![w.selected_position()]);
        assert!(w.selected_position() > 3);
    }

    #[test]
    fn test_press_aborts_fling() {
        let mut w = wheel(30);
        w.set_selected_position(10, true).unwrap();
        w.tick();
        let mid = w.offset();
        w.on_pointer_down(&ev(100.0, 0));
        assert_eq!(w.state(), WheelState::Dragging);
        assert_eq!(w.tick(), None);
        assert_eq!(w.offset(), mid);
    }

    #[test]
    fn test_shrinking_data_mid_flight_stays_in_bounds() {
        let mut w = wheel(30);
        w.step(20);
        w.tick();
        w.set_data(items(2), None).unwrap();
        run(&mut w);
        assert!((-H..=0).contains(&w.offset()));
    }

    #[test]
    fn test_secondary_pointer_takes_over() {
        let mut w = wheel(10);
        w.set_selected_position(5, false).unwrap();
        w.on_pointer_down(&PointerEvent::new(1, 0.0, 100.0, 0));
        w.on_pointer_down(&PointerEvent::new(2, 0.0, 300.0, 5));
        assert!(!w.on_pointer_move(&PointerEvent::new(1, 0.0, 150.0, 16)).consumed);
        assert!(w.on_pointer_move(&PointerEvent::new(2, 0.0, 310.0, 16)).consumed);
        assert_eq!(
            w.on_pointer_up(&PointerEvent::new(1, 0.0, 150.0, 20)),
            PointerResponse::ignored()
        );
        assert_eq!(w.state(), WheelState::Dragging);
    }

    #[test]
    fn test_step_notifies_on_settle() {
        let mut w = wheel(10);
        assert!(w.step(2));
        assert_eq!(w.selected_position(), 0);
        assert_eq!(run(&mut w), vec![2]);
        assert!(w.step(-5));
        assert_eq!(run(&mut w), vec![0]);
    }

    #[test]
    fn test_offset_stays_clamped_under_random_gestures() {
        let mut w = wheel(7);
        let mut t = 0;
        let mut y = 300.0_f32;
        for round in 0..40u32 {
            w.on_pointer_down(&ev(y, t));
            for step in 0..6u32 {
                t += 16;
                let dir = if (round + step) % 3 == 0 { -1.0 } else { 1.0 };
                y += dir * ((round * 7 + step * 13) % 60) as f32;
                w.on_pointer_move(&ev(y, t));
                assert!((-6 * H..=0).contains(&w.offset()));
            }
            w.on_pointer_up(&ev(y, t + 5));
            for _ in 0..(round % 5) {
                w.tick();
                assert!((-6 * H..=0).contains(&w.offset()));
            }
        }
    }

    #[test]
    fn test_render_draws_band_and_rows() {
        let mut w = wheel(10);
        w.set_selected_position(1, false).unwrap();
        let mut surface = RecordingSurface::new();
        w.render(&mut surface);

        assert_eq!(
            surface.commands()[0],
            crate::surface::DrawCommand::Rect {
                bounds: Bounds::new(0, 96, 200, 48),
                color: Rgb::BAND
            }
        );
        let texts: Vec<_> = surface.texts().collect();
        // Index -1 is off the data and skipped.
        assert_eq!(texts.len(), 4);
        let (text, pos, style) = texts[1];
        assert_eq!(text, "1");
        assert_eq!(pos, Point::new(100, 120));
        assert_eq!(style.size, 28.0);
        assert_eq!(style.color, Rgb::INK);
        assert_eq!(texts[0].2.size, 24.0);
        assert_eq!(texts[0].2.color, Rgb::GREY);
    }

    #[test]
    fn test_render_empty_or_unmeasured_draws_nothing() {
        let mut surface = RecordingSurface::new();
        WheelView::with_default_config().render(&mut surface);
        wheel(0).render(&mut surface);
        assert!(surface.commands().is_empty());
    }
}
