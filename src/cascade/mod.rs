//! Cascade: Groups of wheels whose data depends on the wheels to their left.
//!
//! - [`CascadeGroup`]: generic coordinator over any [`CascadeSource`]
//! - [`OptionTree`], [`StaticColumns`]: the two stock sources
//! - [`DateWheel`]: year to second picker over a bounded range
//!
//! # Example
//!
//! ```rust
//! use wheelpick::cascade::{CascadeGroup, OptionNode, OptionTree};
//! use wheelpick::WheelConfig;
//!
//! let tree = OptionTree::new(vec![
//!     OptionNode::new("A", vec![OptionNode::leaf("1"), OptionNode::leaf("2")]),
//!     OptionNode::new("B", vec![OptionNode::leaf("3")]),
//! ]);
//! let mut group = CascadeGroup::new(tree, WheelConfig::default()).unwrap();
//! group.set_select_position(&[1, 0]).unwrap();
//! assert_eq!(group.wheel(1).unwrap().data(), ["3"]);
//! ```

mod date;
mod group;
mod source;

pub use date::{days_in_month, DateChanged, DateFields, DateWheel};
pub use group::{CascadeGroup, PositionsChanged};
pub use source::{CascadeSource, OptionNode, OptionTree, StaticColumns};
