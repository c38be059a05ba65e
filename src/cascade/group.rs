//! Cascading group: Several wheels side by side, kept consistent.
//!
//! A selection change in column `i` regenerates every column to its right
//! (when the source cascades) and resets them to their first item, then the
//! group reports the whole selection vector once.

use std::fmt;

use tracing::{debug, warn};

use super::source::CascadeSource;
use crate::config::WheelConfig;
use crate::error::{Result, WheelError};
use crate::surface::{Bounds, DrawSurface, Viewport};
use crate::wheel::{MeasureMode, PointerEvent, PointerResponse, WheelState, WheelView};

/// Callback receiving the full selection vector, one entry per wheel.
pub type PositionsChanged = Box<dyn FnMut(&[usize])>;

/// An ordered set of wheels driven by one [`CascadeSource`].
pub struct CascadeGroup<S> {
    source: S,
    config: WheelConfig,
    wheels: Vec<WheelView>,
    /// Last measurement request, replayed when the wheels are rebuilt.
    constraints: Option<(i32, i32, MeasureMode)>,
    bounds: Bounds,
    /// Column owning the current pointer gesture.
    active: Option<usize>,
    listener: Option<PositionsChanged>,
}

impl<S: CascadeSource> CascadeGroup<S> {
    /// Build one wheel per column of `source` and populate them left to right.
    pub fn new(source: S, config: WheelConfig) -> Result<Self> {
        config.validate()?;
        let mut group = Self {
            source,
            config,
            wheels: Vec::new(),
            constraints: None,
            bounds: Bounds::ZERO,
            active: None,
            listener: None,
        };
        group.rebuild()?;
        Ok(group)
    }

    /// Replace the source, rebuilding every wheel.
    pub fn set_data(&mut self, source: S) -> Result<()> {
        self.source = source;
        self.rebuild()
    }

    /// The source currently driving the group.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Number of wheels.
    pub fn len(&self) -> usize {
        self.wheels.len()
    }

    /// Whether the group has no wheels.
    pub fn is_empty(&self) -> bool {
        self.wheels.is_empty()
    }

    /// Wheel at `column`.
    pub fn wheel(&self, column: usize) -> Option<&WheelView> {
        self.wheels.get(column)
    }

    /// Committed selection of every wheel, left to right.
    pub fn positions(&self) -> Vec<usize> {
        self.wheels.iter().map(WheelView::selected_position).collect()
    }

    /// Register the aggregate selection listener.
    pub fn set_on_positions_changed(&mut self, listener: impl FnMut(&[usize]) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Select one position per wheel without animating.
    ///
    /// The whole vector is checked against the data each column would have
    /// after the columns to its left are applied; nothing changes unless
    /// every entry is valid. Programmatic: the listener is not invoked.
    pub fn set_select_position(&mut self, positions: &[usize]) -> Result<()> {
        if positions.len() != self.wheels.len() {
            return Err(WheelError::LengthMismatch {
                expected: self.wheels.len(),
                actual: positions.len(),
            });
        }

        let mut plan = Vec::with_capacity(positions.len());
        for (column, &position) in positions.iter().enumerate() {
            let items = if self.source.cascades() {
                Some(self.source.items(column, &positions[..column]))
            } else {
                None
            };
            let len = items.as_ref().map_or_else(|| self.wheels[column].data().len(), Vec::len);
            if !(len == 0 && position == 0) {
                WheelError::check_index("positions", position, len)?;
            }
            plan.push(items);
        }

        for ((wheel, items), &position) in self.wheels.iter_mut().zip(plan).zip(positions) {
            match items {
                Some(items) => {
                    let start = (!items.is_empty()).then_some(position);
                    wheel.set_data(items, start)?;
                }
                None if wheel.data().is_empty() => {}
                None => wheel.set_selected_position(position, false)?,
            }
        }
        debug!(?positions, "group selection set");
        Ok(())
    }

    /// Measure every wheel in an equal share of the width.
    ///
    /// Returns the group's size: the full width and the tallest wheel.
    pub fn measure(
        &mut self,
        available_width: i32,
        available_height: i32,
        mode: MeasureMode,
    ) -> (i32, i32) {
        self.constraints = Some((available_width, available_height, mode));
        let columns =
            Bounds::new(0, 0, available_width, available_height).columns(self.wheels.len());
        let height = self
            .wheels
            .iter_mut()
            .zip(&columns)
            .map(|(wheel, column)| wheel.measure(column.width, available_height, mode).1)
            .max()
            .unwrap_or(0);
        self.bounds = Bounds::new(0, 0, available_width, height);
        (available_width, height)
    }

    /// Column under the horizontal position `x`, in group coordinates.
    pub fn column_at(&self, x: f32) -> Option<usize> {
        #[allow(clippy::cast_possible_truncation)]
        let x = x.floor() as i32;
        self.bounds
            .columns(self.wheels.len())
            .iter()
            .position(|column| x >= column.x && x < column.right())
    }

    /// Pointer pressed: the column under it owns the gesture.
    ///
    /// A drag still running in another column is ended first and snapped to
    /// its nearest item, cascading like a release.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> PointerResponse {
        let Some(column) = self.column_at(event.x) else {
            return PointerResponse::default();
        };
        let mut snapped = false;
        if let Some(previous) = self.active.filter(|&c| c != column) {
            snapped = true;
            if self.wheels[previous].end_gesture().is_some() {
                self.cascade_from(previous);
                self.emit();
            }
        }
        self.active = Some(column);
        let mut response = self.wheels[column].on_pointer_down(event);
        response.redraw |= snapped;
        response
    }

    /// Pointer moved; routed to the column that saw the press.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> PointerResponse {
        match self.active {
            Some(column) => self.wheels[column].on_pointer_move(event),
            None => PointerResponse::default(),
        }
    }

    /// Pointer released. A synchronous settle cascades immediately.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> PointerResponse {
        let Some(column) = self.active else {
            return PointerResponse::default();
        };
        let response = self.wheels[column].on_pointer_up(event);
        if self.wheels[column].state() != WheelState::Dragging {
            self.active = None;
        }
        if response.selection.is_some() {
            self.cascade_from(column);
            self.emit();
        }
        response
    }

    /// Pointer cancelled; handled like a release.
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) -> PointerResponse {
        self.on_pointer_up(event)
    }

    /// Animate wheel `column` by `delta` items.
    pub fn step(&mut self, column: usize, delta: isize) -> bool {
        self.wheels.get_mut(column).is_some_and(|wheel| wheel.step(delta))
    }

    /// Advance every wheel one frame, left to right.
    ///
    /// A wheel reset by a change to its left loses its running motion in the
    /// same frame. Returns the selection vector when any wheel settled on a
    /// new index; the listener is invoked once with the same vector.
    pub fn tick(&mut self) -> Option<Vec<usize>> {
        let mut changed = false;
        for column in 0..self.wheels.len() {
            if self.wheels[column].tick().is_some() {
                self.cascade_from(column);
                changed = true;
            }
        }
        changed.then(|| self.emit())
    }

    /// Whether any wheel is still moving.
    pub fn is_animating(&self) -> bool {
        self.wheels
            .iter()
            .any(|wheel| wheel.state() == WheelState::Animating)
    }

    /// Draw every wheel in its column of the measured bounds.
    pub fn render<D: DrawSurface + ?Sized>(&self, surface: &mut D) {
        for (wheel, column) in self.wheels.iter().zip(self.bounds.columns(self.wheels.len())) {
            let mut viewport = Viewport::new(&mut *surface, column);
            wheel.render(&mut viewport);
        }
    }

    fn rebuild(&mut self) -> Result<()> {
        let depth = self.source.depth();
        let mut wheels = Vec::with_capacity(depth);
        for column in 0..depth {
            let mut wheel = WheelView::new(self.config.clone())?;
            let path = vec![0; column];
            wheel.set_data(self.source.items(column, &path), None)?;
            wheels.push(wheel);
        }
        self.wheels = wheels;
        self.active = None;
        debug!(depth, "group rebuilt");

        if let Some((width, height, mode)) = self.constraints {
            self.measure(width, height, mode);
        }
        Ok(())
    }

    fn cascade_from(&mut self, column: usize) {
        if !self.source.cascades() {
            return;
        }
        for right in column + 1..self.wheels.len() {
            let path: Vec<usize> = self.wheels[..right]
                .iter()
                .map(WheelView::selected_position)
                .collect();
            let items = self.source.items(right, &path);
            let start = (!items.is_empty()).then_some(0);
            if let Err(err) = self.wheels[right].set_data(items, start) {
                warn!(%err, column = right, "cascade reset rejected");
            }
        }
    }

    fn emit(&mut self) -> Vec<usize> {
        let positions = self.positions();
        debug!(?positions, "group selection changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(&positions);
        }
        positions
    }
}

impl<S: fmt::Debug> fmt::Debug for CascadeGroup<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CascadeGroup")
            .field("source", &self.source)
            .field("wheels", &self.wheels.len())
            .field("bounds", &self.bounds)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::cascade::{OptionNode, OptionTree, StaticColumns};
    use crate::surface::{DrawCommand, RecordingSurface};

    const H: i32 = 48;

    fn tree() -> OptionTree {
        OptionTree::new(vec![
            OptionNode::new("A", vec![OptionNode::leaf("1"), OptionNode::leaf("2")]),
            OptionNode::new("B", vec![OptionNode::leaf("3")]),
        ])
    }

    fn measured<S: CascadeSource>(source: S) -> CascadeGroup<S> {
        let mut group = CascadeGroup::new(source, WheelConfig::default()).unwrap();
        group.measure(200, 0, MeasureMode::Unspecified);
        group
    }

    fn recorder<S: CascadeSource>(group: &mut CascadeGroup<S>) -> Rc<RefCell<Vec<Vec<usize>>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        group.set_on_positions_changed(move |p| sink.borrow_mut().push(p.to_vec()));
        events
    }

    /// Slow drag by `rows` items on the column under `x`, settling on release.
    fn drag<S: CascadeSource>(group: &mut CascadeGroup<S>, x: f32, rows: i32) -> PointerResponse {
        #[allow(clippy::cast_precision_loss)]
        let dy = -(rows * H) as f32;
        group.on_pointer_down(&PointerEvent::new(1, x, 120.0, 0));
        group.on_pointer_move(&PointerEvent::new(1, x, 120.0 + dy, 100));
        group.on_pointer_up(&PointerEvent::new(1, x, 120.0 + dy, 200))
    }

    #[test]
    fn test_tree_populates_from_first_children() {
        let group = measured(tree());
        assert_eq!(group.len(), 2);
        assert_eq!(group.wheel(0).unwrap().data(), ["A", "B"]);
        assert_eq!(group.wheel(1).unwrap().data(), ["1", "2"]);
        assert_eq!(group.positions(), vec![0, 0]);
    }

    #[test]
    fn test_empty_tree_has_no_wheels() {
        let group = CascadeGroup::new(OptionTree::default(), WheelConfig::default()).unwrap();
        assert!(group.is_empty());
        assert!(group.positions().is_empty());
    }

    #[test]
    fn test_selecting_parent_regenerates_children() {
        let mut group = measured(tree());
        let events = recorder(&mut group);

        let response = drag(&mut group, 50.0, 1);
        assert_eq!(response.selection, Some(1));
        assert_eq!(group.wheel(1).unwrap().data(), ["3"]);
        assert_eq!(group.wheel(1).unwrap().selected_position(), 0);
        assert_eq!(*events.borrow(), vec![vec![1, 0]]);
    }

    #[test]
    fn test_child_change_reports_whole_vector() {
        let mut group = measured(tree());
        let events = recorder(&mut group);

        drag(&mut group, 150.0, 1);
        assert_eq!(group.wheel(0).unwrap().selected_position(), 0);
        assert_eq!(*events.borrow(), vec![vec![0, 1]]);
    }

    #[test]
    fn test_parent_change_resets_child_selection() {
        let mut group = measured(tree());
        group.set_select_position(&[0, 1]).unwrap();
        drag(&mut group, 50.0, 1);
        drag(&mut group, 50.0, -1);
        assert_eq!(group.positions(), vec![0, 0]);
        assert_eq!(group.wheel(1).unwrap().data(), ["1", "2"]);
    }

    #[test]
    fn test_set_select_position_validates_before_mutating() {
        let mut group = measured(tree());
        let events = recorder(&mut group);

        let err = group.set_select_position(&[1]).unwrap_err();
        assert!(matches!(
            err,
            WheelError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));

        // "B" has a single child, so index 1 is out of range after the parent moves.
        let err = group.set_select_position(&[1, 1]).unwrap_err();
        assert!(matches!(
            err,
            WheelError::IndexOutOfRange {
                argument: "positions",
                index: 1,
                len: 1
            }
        ));
        assert_eq!(group.positions(), vec![0, 0]);
        assert_eq!(group.wheel(1).unwrap().data(), ["1", "2"]);

        group.set_select_position(&[1, 0]).unwrap();
        assert_eq!(group.positions(), vec![1, 0]);
        assert_eq!(group.wheel(1).unwrap().data(), ["3"]);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_static_columns_do_not_cascade() {
        let columns = StaticColumns::new(vec![
            vec!["a".into(), "b".into()],
            vec!["x".into(), "y".into(), "z".into()],
        ]);
        let mut group = measured(columns);
        let events = recorder(&mut group);
        group.set_select_position(&[0, 2]).unwrap();

        drag(&mut group, 50.0, 1);
        assert_eq!(group.positions(), vec![1, 2]);
        assert_eq!(*events.borrow(), vec![vec![1, 2]]);

        // Dragging less than half a row settles back where it was: no event.
        group.on_pointer_down(&PointerEvent::new(1, 50.0, 100.0, 0));
        group.on_pointer_move(&PointerEvent::new(1, 50.0, 110.0, 100));
        let response = group.on_pointer_up(&PointerEvent::new(1, 50.0, 110.0, 200));
        assert_eq!(response.selection, None);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_press_in_other_column_snaps_abandoned_drag() {
        let mut group = measured(OptionTree::new(vec![
            OptionNode::new("A", vec![OptionNode::leaf("1"), OptionNode::leaf("2")]),
            OptionNode::new("B", vec![OptionNode::leaf("3")]),
            OptionNode::new("C", vec![OptionNode::leaf("4")]),
        ]));
        let events = recorder(&mut group);

        group.on_pointer_down(&PointerEvent::new(1, 50.0, 120.0, 0));
        group.on_pointer_move(&PointerEvent::new(1, 50.0, 90.0, 16));
        assert_eq!(group.wheel(0).unwrap().offset(), -30);

        let response = group.on_pointer_down(&PointerEvent::new(2, 150.0, 120.0, 20));
        assert!(response.redraw);
        let first = group.wheel(0).unwrap();
        assert_eq!(first.offset(), -H);
        assert_eq!(first.state(), WheelState::Idle);
        assert_eq!(first.selected_position(), 1);
        assert_eq!(group.wheel(1).unwrap().data(), ["3"]);
        assert_eq!(group.wheel(1).unwrap().state(), WheelState::Dragging);
        assert_eq!(*events.borrow(), vec![vec![1, 0]]);

        for _ in 0..100 {
            group.tick();
        }
        assert_eq!(group.wheel(0).unwrap().offset(), -H);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_cancel_settles_like_release() {
        let mut group = measured(tree());
        let events = recorder(&mut group);

        group.on_pointer_down(&PointerEvent::new(1, 50.0, 120.0, 0));
        group.on_pointer_move(&PointerEvent::new(1, 50.0, 80.0, 16));
        let response = group.on_pointer_cancel(&PointerEvent::new(1, 50.0, 80.0, 300));
        assert_eq!(response.selection, Some(1));
        assert_eq!(group.positions(), vec![1, 0]);
        assert_eq!(*events.borrow(), vec![vec![1, 0]]);
        assert_eq!(
            group.on_pointer_move(&PointerEvent::new(1, 50.0, 20.0, 320)),
            PointerResponse::default()
        );
    }

    #[test]
    fn test_tick_cascades_after_step() {
        let mut group = measured(tree());
        let events = recorder(&mut group);

        assert!(group.step(0, 1));
        let mut settled = None;
        for _ in 0..100 {
            if let Some(positions) = group.tick() {
                settled = Some(positions);
                break;
            }
        }
        assert_eq!(settled, Some(vec![1, 0]));
        assert_eq!(group.wheel(1).unwrap().data(), ["3"]);
        assert!(!group.is_animating());
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_set_data_rebuilds_and_remeasures() {
        let mut group = measured(tree());
        let deeper = OptionTree::new(vec![OptionNode::new(
            "x",
            vec![OptionNode::new("y", vec![OptionNode::leaf("z")])],
        )]);
        group.set_data(deeper).unwrap();
        assert_eq!(group.len(), 3);
        assert!(group.wheel(2).unwrap().is_measured());
    }

    #[test]
    fn test_column_routing() {
        let group = measured(tree());
        assert_eq!(group.column_at(0.0), Some(0));
        assert_eq!(group.column_at(99.9), Some(0));
        assert_eq!(group.column_at(100.0), Some(1));
        assert_eq!(group.column_at(200.0), None);
    }

    #[test]
    fn test_render_side_by_side() {
        let group = measured(tree());
        let mut surface = RecordingSurface::new();
        group.render(&mut surface);

        let bands: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { bounds, .. } => Some(*bounds),
                DrawCommand::Text { .. } => None,
            })
            .collect();
        assert_eq!(bands, vec![Bounds::new(0, 2 * H, 100, H), Bounds::new(100, 2 * H, 100, H)]);

        let texts: Vec<_> = surface.texts().map(|(t, p, _)| (t.to_string(), p.x)).collect();
        assert!(texts.contains(&("A".to_string(), 50)));
        assert!(texts.contains(&("1".to_string(), 150)));
    }
}
