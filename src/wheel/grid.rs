//! Grid wheel: A picker built on a host's virtualised list.
//!
//! Instead of tracking a continuous offset, the grid wheel hands rows to a
//! host list widget that already knows how to scroll and snap to items. It
//! only has to pad the data so the first and last items can reach the centre
//! row, style rows as the host binds them, and read the snapped row back when
//! scrolling stops.

use tracing::debug;

use super::layout::{item_height_for, MeasureMode};
use crate::config::WheelConfig;
use crate::error::{Result, WheelError};
use crate::surface::{Bounds, DrawSurface, Rgb};

/// One row of the padded sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Blank sentinel letting boundary items reach the centre.
    Pad,
    /// A real item.
    Item(String),
}

impl Entry {
    /// Display text; pads render empty.
    pub fn text(&self) -> &str {
        match self {
            Self::Pad => "",
            Self::Item(s) => s,
        }
    }
}

/// Scroll phase reported by the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    /// Not moving.
    Idle,
    /// Following a pointer.
    Dragging,
    /// Settling onto a snapped row.
    Settling,
}

/// The host list widget a [`GridWheel`] delegates scrolling to.
pub trait ListHost {
    /// Scroll so `row` is the first visible row, shifted by `offset` pixels.
    fn scroll_to_position_with_offset(&mut self, row: usize, offset: i32);

    /// Row of the view the snap helper currently centres, if any.
    fn snap_position(&self) -> Option<usize>;
}

/// How the host should draw one bound row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle<'a> {
    /// Text to show.
    pub text: &'a str,
    /// Font size in pixels.
    pub size: f32,
    /// Text color.
    pub color: Rgb,
}

/// A wheel whose scrolling is delegated to a [`ListHost`].
pub struct GridWheel {
    config: WheelConfig,
    entries: Vec<Entry>,
    pad: usize,
    /// Row (in padded space) styled as selected.
    selected_row: usize,
    item_height: Option<i32>,
    width: i32,
    listener: Option<Box<dyn FnMut(usize)>>,
}

impl GridWheel {
    /// Create an empty grid wheel.
    pub fn new(config: WheelConfig) -> Result<Self> {
        config.validate()?;
        let pad = config.half();
        Ok(Self {
            config,
            entries: vec![Entry::Pad; pad * 2],
            pad,
            selected_row: pad,
            item_height: None,
            width: 0,
            listener: None,
        })
    }

    /// Measure against the host's constraints; returns the wheel's size.
    pub fn measure(
        &mut self,
        available_width: i32,
        available_height: i32,
        mode: MeasureMode,
    ) -> (i32, i32) {
        self.width = available_width;
        let h = *self.item_height.get_or_insert_with(|| {
            item_height_for(
                mode,
                available_height,
                self.config.item_height,
                self.config.visible_count,
            )
        });
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let height = match mode {
            MeasureMode::Exactly => available_height,
            MeasureMode::AtMost | MeasureMode::Unspecified => h * self.config.visible_count as i32,
        };
        (self.width, height)
    }

    /// Row height, once measured.
    pub const fn item_height(&self) -> Option<i32> {
        self.item_height
    }

    /// Replace the data, keeping the selection when it is still valid.
    pub fn set_data(&mut self, data: Vec<String>) {
        let count = data.len();
        let mut entries = Vec::with_capacity(count + self.pad * 2);
        entries.resize(self.pad, Entry::Pad);
        entries.extend(data.into_iter().map(Entry::Item));
        entries.resize(count + self.pad * 2, Entry::Pad);
        self.entries = entries;

        let last_row = self.pad + count.saturating_sub(1);
        if self.selected_row > last_row {
            self.selected_row = last_row;
        }
    }

    /// Real items, pads excluded.
    pub fn data(&self) -> Vec<&str> {
        self.entries[self.pad..self.entries.len() - self.pad]
            .iter()
            .map(Entry::text)
            .collect()
    }

    /// Item at a public position.
    pub fn item(&self, position: usize) -> Option<&str> {
        match self.entries.get(position + self.pad)? {
            Entry::Item(s) if position < self.len() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Number of real items.
    pub fn len(&self) -> usize {
        self.entries.len() - self.pad * 2
    }

    /// Whether there are no real items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows the host list must hold, pads included.
    pub fn row_count(&self) -> usize {
        self.entries.len()
    }

    /// Public index of the row styled as selected.
    pub const fn selected_position(&self) -> usize {
        self.selected_row - self.pad
    }

    /// Register the selection-changed listener.
    pub fn set_on_selected_changed(&mut self, listener: impl FnMut(usize) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Select `position` and ask the host to bring it to the centre.
    pub fn set_select_position(&mut self, position: usize, host: &mut dyn ListHost) -> Result<()> {
        WheelError::check_index("position", position, self.len())?;
        self.selected_row = position + self.pad;
        host.scroll_to_position_with_offset(position, 0);
        Ok(())
    }

    /// React to the host's scroll phase. On `Idle` the snapped row becomes
    /// the selection and is reported.
    pub fn on_scroll_state_changed(
        &mut self,
        state: ScrollState,
        host: &dyn ListHost,
    ) -> Option<usize> {
        if state != ScrollState::Idle || self.is_empty() {
            return None;
        }
        let snapped = host.snap_position().unwrap_or(self.pad);
        let last_row = self.pad + self.len() - 1;
        self.selected_row = snapped.clamp(self.pad, last_row);

        let position = self.selected_position();
        debug!(position, "grid wheel settled");
        if let Some(listener) = self.listener.as_mut() {
            listener(position);
        }
        Some(position)
    }

    /// Style for the row the host is binding.
    pub fn bind_row(&self, row: usize) -> Option<RowStyle<'_>> {
        let entry = self.entries.get(row)?;
        let config = &self.config;
        let (size, color) = if row == self.selected_row {
            (config.selected_text_size, config.selected_text_color)
        } else {
            (config.text_size, config.text_color)
        };
        Some(RowStyle {
            text: entry.text(),
            size,
            color,
        })
    }

    /// Draw the band behind the centre row.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn render_highlight<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        if let Some(h) = self.item_height {
            let y = h * self.pad as i32;
            surface.fill_rect(Bounds::new(0, y, self.width, h), self.config.selected_bg_color);
        }
    }
}

impl std::fmt::Debug for GridWheel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridWheel")
            .field("len", &self.len())
            .field("pad", &self.pad)
            .field("selected_row", &self.selected_row)
            .finish_non_exhaustive()
    }
}
