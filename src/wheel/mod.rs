//! Wheel: Single picker wheels.
//!
//! - [`WheelView`]: continuous-offset wheel with drag, fling and snap
//! - [`GridWheel`]: padded-list wheel delegating scrolling to a host list
//! - [`mapper`]: pure offset-to-slot mapping and per-slot styling
//!
//! # Example
//!
//! ```rust
//! use wheelpick::wheel::{MeasureMode, WheelView};
//!
//! let mut wheel = WheelView::with_default_config();
//! wheel.set_data(vec!["a".into(), "b".into(), "c".into()], None).unwrap();
//! wheel.measure(200, 0, MeasureMode::Unspecified);
//! wheel.set_selected_position(2, false).unwrap();
//! assert_eq!(wheel.offset(), -2 * wheel.item_height().unwrap());
//! ```

mod gesture;
mod grid;
mod layout;
pub mod mapper;
mod view;

pub use gesture::{ParentIntercept, PointerEvent, PointerResponse};
pub use grid::{Entry, GridWheel, ListHost, RowStyle, ScrollState};
pub use layout::{DeferredOp, MeasureMode};
pub use view::{SelectedChanged, WheelState, WheelView};
