//! # Wheelpick
//!
//! Snap-to-item picker wheels with drag, fling and cascading selection.
//!
//! A wheel is a vertically scrolling list that always comes to rest with one
//! item in its centre slot. Rows are drawn with a size and color gradient
//! peaking at the centre. Several wheels can be chained so that a change in
//! one regenerates the data of the wheels to its right, as in date pickers
//! or parent-to-child option trees.
//!
//! ## Core Concepts
//!
//! - **Continuous offset**: a wheel stores a pixel offset; `-i * item_height`
//!   centres item `i`, and the selection only changes when motion settles
//! - **Frame-stepped motion**: flings and programmatic scrolls advance one
//!   step per host frame and always land on an item boundary
//! - **Cascade**: a group refreshes every wheel right of a change, then
//!   reports the whole selection vector once
//! - **Narrow drawing seam**: wheels render through [`DrawSurface`], so any
//!   backend (a terminal cell grid included) can host them
//!
//! ## Example
//!
//! ```rust
//! use wheelpick::{MeasureMode, RecordingSurface, WheelView};
//!
//! let mut wheel = WheelView::with_default_config();
//! wheel.set_data((1..=12).map(|m| m.to_string()).collect(), Some(5)).unwrap();
//! wheel.measure(120, 0, MeasureMode::Unspecified);
//!
//! let mut surface = RecordingSurface::new();
//! wheel.render(&mut surface);
//! assert_eq!(wheel.selected_item(), Some("6"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod cascade;
pub mod config;
pub mod error;
pub mod motion;
pub mod surface;
pub mod terminal;
pub mod wheel;

// Re-exports for convenience
pub use cascade::{
    CascadeGroup, CascadeSource, DateFields, DateWheel, OptionNode, OptionTree, StaticColumns,
};
pub use config::WheelConfig;
pub use error::{Result, WheelError};
pub use surface::{Bounds, CellSurface, DrawSurface, Point, RecordingSurface, Rgb, TextStyle};
pub use wheel::{GridWheel, MeasureMode, PointerEvent, PointerResponse, WheelState, WheelView};
