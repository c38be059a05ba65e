//! Date picker: Year to second wheels over a bounded date range.
//!
//! Every field is described once in a table of [`DateField`] records, so the
//! picker iterates fields uniformly instead of branching on the column.
//!
//! The selected date is an immutable snapshot. A wheel change writes one
//! field into the current snapshot (clamping the day to the target month),
//! clamps the result into `[min, max]`, stores it as the new snapshot and
//! refreshes every field to the right from it. Several wheels settling in the
//! same frame are applied in order, each on the snapshot left by the last.

use std::fmt;

use bitflags::bitflags;
use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, Timelike};
use tracing::{debug, warn};

use crate::config::WheelConfig;
use crate::error::{Result, WheelError};
use crate::surface::{Bounds, DrawSurface, Viewport};
use crate::wheel::{MeasureMode, PointerEvent, PointerResponse, WheelState, WheelView};

bitflags! {
    /// Which fields get a visible wheel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DateFields: u8 {
        /// Year
        const YEAR = 0b0000_0001;
        /// Month, 1 to 12
        const MONTH = 0b0000_0010;
        /// Day of the month
        const DAY = 0b0000_0100;
        /// Hour, 0 to 23
        const HOUR = 0b0000_1000;
        /// Minute
        const MINUTE = 0b0001_0000;
        /// Second
        const SECOND = 0b0010_0000;

        /// Year, month and day
        const DATE = Self::YEAR.bits() | Self::MONTH.bits() | Self::DAY.bits();
        /// Hour, minute and second
        const TIME = Self::HOUR.bits() | Self::MINUTE.bits() | Self::SECOND.bits();
    }
}

impl Default for DateFields {
    fn default() -> Self {
        Self::all()
    }
}

/// Callback receiving the new date snapshot.
pub type DateChanged = Box<dyn FnMut(NaiveDateTime)>;

/// Number of days in `month` (1 to 12) of `year`, or 0 for any other month.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        _ => 0,
    }
}

/// One column of the picker.
struct DateField {
    flag: DateFields,
    /// Zero-padded label width.
    width: usize,
    read: fn(&NaiveDateTime) -> i32,
    write: fn(&NaiveDateTime, i32) -> Option<NaiveDateTime>,
    /// Full range of the field given the coarser fields of the date.
    span: fn(&NaiveDateTime) -> (i32, i32),
}

#[allow(clippy::cast_possible_wrap)]
static FIELDS: [DateField; 6] = [
    DateField {
        flag: DateFields::YEAR,
        width: 4,
        read: |d| d.year(),
        write: |d, v| with_part(d, 0, v),
        span: |_| (i32::MIN, i32::MAX),
    },
    DateField {
        flag: DateFields::MONTH,
        width: 2,
        read: |d| d.month() as i32,
        write: |d, v| with_part(d, 1, v),
        span: |_| (1, 12),
    },
    DateField {
        flag: DateFields::DAY,
        width: 2,
        read: |d| d.day() as i32,
        write: |d, v| with_part(d, 2, v),
        span: |d| (1, days_in_month(d.year(), d.month()) as i32),
    },
    DateField {
        flag: DateFields::HOUR,
        width: 2,
        read: |d| d.hour() as i32,
        write: |d, v| with_part(d, 3, v),
        span: |_| (0, 23),
    },
    DateField {
        flag: DateFields::MINUTE,
        width: 2,
        read: |d| d.minute() as i32,
        write: |d, v| with_part(d, 4, v),
        span: |_| (0, 59),
    },
    DateField {
        flag: DateFields::SECOND,
        width: 2,
        read: |d| d.second() as i32,
        write: |d, v| with_part(d, 5, v),
        span: |_| (0, 59),
    },
];

impl DateField {
    /// Values offered for field `k` of `date`. A bound narrows the range
    /// only when every coarser field of `date` equals the bound's.
    fn values(
        &self,
        k: usize,
        min: &NaiveDateTime,
        max: &NaiveDateTime,
        date: &NaiveDateTime,
    ) -> (i32, i32) {
        let (date_parts, min_parts, max_parts) = (parts(date), parts(min), parts(max));
        let prefix = &date_parts[..k];
        let (mut lo, mut hi) = (self.span)(date);
        if &min_parts[..k] == prefix {
            lo = (self.read)(min);
        }
        if &max_parts[..k] == prefix {
            hi = (self.read)(max);
        }
        if hi < lo {
            let v = (self.read)(date);
            return (v, v);
        }
        (lo, hi)
    }

    fn label(&self, value: i32) -> String {
        format!("{value:0width$}", width = self.width)
    }
}

#[allow(clippy::cast_possible_wrap)]
fn parts(d: &NaiveDateTime) -> [i32; 6] {
    [
        d.year(),
        d.month() as i32,
        d.day() as i32,
        d.hour() as i32,
        d.minute() as i32,
        d.second() as i32,
    ]
}

/// Build a date from its parts, clamping the day to the month's length.
fn compose(p: [i32; 6]) -> Option<NaiveDateTime> {
    let month = u32::try_from(p[1]).ok()?;
    let last_day = days_in_month(p[0], month).max(1);
    let day = u32::try_from(p[2]).ok()?.clamp(1, last_day);
    NaiveDate::from_ymd_opt(p[0], month, day)?.and_hms_opt(
        u32::try_from(p[3]).ok()?,
        u32::try_from(p[4]).ok()?,
        u32::try_from(p[5]).ok()?,
    )
}

fn with_part(d: &NaiveDateTime, k: usize, value: i32) -> Option<NaiveDateTime> {
    let mut p = parts(d);
    p[k] = value;
    compose(p)
}

fn truncate(d: NaiveDateTime) -> NaiveDateTime {
    d.with_nanosecond(0).unwrap_or(d)
}

/// A cascading year/month/day/hour/minute/second picker.
pub struct DateWheel {
    config: WheelConfig,
    /// One wheel per entry of the field table, shown or not.
    wheels: Vec<WheelView>,
    fields: DateFields,
    min: NaiveDateTime,
    max: NaiveDateTime,
    date: NaiveDateTime,
    constraints: Option<(i32, i32, MeasureMode)>,
    bounds: Bounds,
    active: Option<usize>,
    listener: Option<DateChanged>,
}

impl DateWheel {
    /// Picker from the Unix epoch to a hundred years from now, set to now.
    pub fn new(config: WheelConfig) -> Result<Self> {
        let now = truncate(Local::now().naive_local());
        let max = now.checked_add_months(Months::new(1200)).unwrap_or(NaiveDateTime::MAX);
        Self::with_range(config, NaiveDateTime::default(), max, now)
    }

    /// Picker over `[min, max]`, set to `date` clamped into the range.
    pub fn with_range(
        config: WheelConfig,
        min: NaiveDateTime,
        max: NaiveDateTime,
        date: NaiveDateTime,
    ) -> Result<Self> {
        config.validate()?;
        if min > max {
            return Err(WheelError::InvalidDateRange { min, max });
        }
        let mut wheels = Vec::with_capacity(FIELDS.len());
        for _ in &FIELDS {
            wheels.push(WheelView::new(config.clone())?);
        }
        let min = truncate(min);
        let max = truncate(max);
        let mut picker = Self {
            config,
            wheels,
            fields: DateFields::default(),
            min,
            max,
            date: truncate(date).clamp(min, max),
            constraints: None,
            bounds: Bounds::ZERO,
            active: None,
            listener: None,
        };
        picker.refresh_from(0);
        Ok(picker)
    }

    /// Configuration shared by every wheel.
    pub const fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// The selected date.
    pub const fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Lower bound of the range.
    pub const fn min(&self) -> NaiveDateTime {
        self.min
    }

    /// Upper bound of the range.
    pub const fn max(&self) -> NaiveDateTime {
        self.max
    }

    /// Fields that have a visible wheel.
    pub const fn fields(&self) -> DateFields {
        self.fields
    }

    /// Number of visible wheels.
    pub fn len(&self) -> usize {
        self.shown().len()
    }

    /// Whether no field is shown.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wheel of a single field, shown or not.
    pub fn wheel(&self, field: DateFields) -> Option<&WheelView> {
        FIELDS.iter().position(|f| f.flag == field).map(|k| &self.wheels[k])
    }

    /// Choose which fields get a visible wheel.
    pub fn set_fields(&mut self, fields: DateFields) {
        self.fields = fields;
        self.release_active();
        if let Some((width, height, mode)) = self.constraints {
            self.measure(width, height, mode);
        }
    }

    /// Register the listener invoked when a user change produces a new date.
    pub fn set_on_date_changed(&mut self, listener: impl FnMut(NaiveDateTime) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Select `date`, clamped into the range. Programmatic: no notification.
    pub fn set_date(&mut self, date: NaiveDateTime) {
        self.date = truncate(date).clamp(self.min, self.max);
        self.refresh_from(0);
    }

    /// Change the lower bound.
    pub fn set_min(&mut self, min: NaiveDateTime) -> Result<()> {
        self.set_range(min, self.max)
    }

    /// Change the upper bound.
    pub fn set_max(&mut self, max: NaiveDateTime) -> Result<()> {
        self.set_range(self.min, max)
    }

    /// Change both bounds. Rejected without effect when `min > max`.
    pub fn set_range(&mut self, min: NaiveDateTime, max: NaiveDateTime) -> Result<()> {
        if min > max {
            return Err(WheelError::InvalidDateRange { min, max });
        }
        self.min = truncate(min);
        self.max = truncate(max);
        self.date = self.date.clamp(self.min, self.max);
        debug!(min = %self.min, max = %self.max, "date range set");
        self.refresh_from(0);
        Ok(())
    }

    /// Measure the visible wheels in equal columns; returns the picker's size.
    pub fn measure(
        &mut self,
        available_width: i32,
        available_height: i32,
        mode: MeasureMode,
    ) -> (i32, i32) {
        self.constraints = Some((available_width, available_height, mode));
        let shown = self.shown();
        let columns = Bounds::new(0, 0, available_width, available_height).columns(shown.len());
        let mut height = 0;
        for (k, wheel) in self.wheels.iter_mut().enumerate() {
            let width = shown.iter().position(|&s| s == k).map_or(0, |c| columns[c].width);
            height = height.max(wheel.measure(width, available_height, mode).1);
        }
        self.bounds = Bounds::new(0, 0, available_width, height);
        (available_width, height)
    }

    /// Visible column under the horizontal position `x`.
    pub fn column_at(&self, x: f32) -> Option<usize> {
        #[allow(clippy::cast_possible_truncation)]
        let x = x.floor() as i32;
        self.bounds
            .columns(self.len())
            .iter()
            .position(|column| x >= column.x && x < column.right())
    }

    /// Pointer pressed over a visible wheel.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> PointerResponse {
        let Some(k) = self.column_at(event.x).and_then(|c| self.shown().get(c).copied()) else {
            return PointerResponse::default();
        };
        let snapped = self.active.is_some_and(|a| a != k) && self.release_active();
        self.active = Some(k);
        let mut response = self.wheels[k].on_pointer_down(event);
        response.redraw |= snapped;
        response
    }

    /// Pointer moved; routed to the wheel that saw the press.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> PointerResponse {
        match self.active {
            Some(k) => self.wheels[k].on_pointer_move(event),
            None => PointerResponse::default(),
        }
    }

    /// Pointer released. A synchronous settle updates the date at once.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> PointerResponse {
        let Some(k) = self.active else {
            return PointerResponse::default();
        };
        let response = self.wheels[k].on_pointer_up(event);
        if self.wheels[k].state() != WheelState::Dragging {
            self.active = None;
        }
        if let Some(index) = response.selection {
            let before = self.date;
            self.apply(k, index);
            self.notify(before);
        }
        response
    }

    /// Pointer cancelled; handled like a release.
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) -> PointerResponse {
        self.on_pointer_up(event)
    }

    /// Animate visible column `column` by `delta` items.
    pub fn step(&mut self, column: usize, delta: isize) -> bool {
        match self.shown().get(column) {
            Some(&k) => self.wheels[k].step(delta),
            None => false,
        }
    }

    /// Advance every visible wheel one frame, left to right.
    ///
    /// Returns the new date when the frame changed it.
    pub fn tick(&mut self) -> Option<NaiveDateTime> {
        let before = self.date;
        for k in self.shown() {
            if let Some(index) = self.wheels[k].tick() {
                self.apply(k, index);
            }
        }
        self.notify(before)
    }

    /// Whether any visible wheel is still moving.
    pub fn is_animating(&self) -> bool {
        self.shown()
            .into_iter()
            .any(|k| self.wheels[k].state() == WheelState::Animating)
    }

    /// Draw the visible wheels in their columns.
    pub fn render<D: DrawSurface + ?Sized>(&self, surface: &mut D) {
        let shown = self.shown();
        for (k, column) in shown.iter().zip(self.bounds.columns(shown.len())) {
            let mut viewport = Viewport::new(&mut *surface, column);
            self.wheels[*k].render(&mut viewport);
        }
    }

    fn shown(&self) -> Vec<usize> {
        FIELDS
            .iter()
            .enumerate()
            .filter(|(_, f)| self.fields.contains(f.flag))
            .map(|(k, _)| k)
            .collect()
    }

    /// End the active drag, snapping its wheel and applying the result.
    fn release_active(&mut self) -> bool {
        let Some(k) = self.active.take() else {
            return false;
        };
        if let Some(index) = self.wheels[k].end_gesture() {
            let before = self.date;
            self.apply(k, index);
            self.notify(before);
        }
        true
    }

    /// Write the value at `index` of field `k` into a new snapshot.
    fn apply(&mut self, k: usize, index: usize) {
        let field = &FIELDS[k];
        let (lo, _) = field.values(k, &self.min, &self.max, &self.date);
        let value = i32::try_from(index).map_or(lo, |i| lo.saturating_add(i));
        let next = (field.write)(&self.date, value).unwrap_or(self.date);
        self.date = next.clamp(self.min, self.max);
        debug!(field = k, value, date = %self.date, "date field changed");
        self.refresh_from(k + 1);
    }

    /// Rebuild fields `from..` from the current snapshot.
    fn refresh_from(&mut self, from: usize) {
        for (k, field) in FIELDS.iter().enumerate().skip(from) {
            let (lo, hi) = field.values(k, &self.min, &self.max, &self.date);
            let data: Vec<String> = (lo..=hi).map(|v| field.label(v)).collect();
            let position = usize::try_from((field.read)(&self.date) - lo)
                .unwrap_or(0)
                .min(data.len().saturating_sub(1));
            if let Err(err) = self.wheels[k].set_data(data, Some(position)) {
                warn!(%err, field = k, "date field refresh rejected");
            }
        }
    }

    fn notify(&mut self, before: NaiveDateTime) -> Option<NaiveDateTime> {
        if self.date == before {
            return None;
        }
        if let Some(listener) = self.listener.as_mut() {
            listener(self.date);
        }
        Some(self.date)
    }
}

impl fmt::Debug for DateWheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateWheel")
            .field("date", &self.date)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
