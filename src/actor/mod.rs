//! Actor Model: Threads feeding a picker loop over crossbeam channels.
//!
//! - **Input Actor**: polls terminal events, converts them to [`HostEvent`]s
//! - **Ticker Actor**: emits one [`Tick`] per animation frame
//! - **Picker loop**: owned by the application; `select!`s over both,
//!   drives the wheels and presents frames
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     HostEvent       ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │ Picker Loop  │ ──▶ Terminal::present
//! ┌──────────────┐       Tick          │              │
//! │Ticker Thread │ ─────────────────▶  │              │
//! └──────────────┘                     └──────────────┘
//! ```

mod input;
mod messages;
mod ticker;

pub use input::{convert_event, InputActor};
pub use messages::{CellScale, HostEvent, PointerPhase, MOUSE_POINTER_ID};
pub use ticker::{Tick, TickerActor};
