//! Pointer input types exchanged between a host and a wheel.

/// A press, move, release or cancel from one pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Identifier stable for the lifetime of one pointer contact.
    pub id: u32,
    /// Horizontal position in the wheel's pixel space.
    pub x: f32,
    /// Vertical position in the wheel's pixel space.
    pub y: f32,
    /// Timestamp in milliseconds, monotonic within a gesture.
    pub time_ms: u64,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub const fn new(id: u32, x: f32, y: f32, time_ms: u64) -> Self {
        Self { id, x, y, time_ms }
    }
}

/// What the wheel asks of an enclosing scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentIntercept {
    /// No change.
    #[default]
    Keep,
    /// The wheel owns the gesture; ancestors must not steal it.
    Disallow,
    /// Ancestors may resume intercepting.
    Allow,
}

/// Outcome of handing one pointer event to a wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerResponse {
    /// Whether the wheel consumed the event.
    pub consumed: bool,
    /// Request for the enclosing container.
    pub parent_intercept: ParentIntercept,
    /// Whether the wheel needs to be drawn again.
    pub redraw: bool,
    /// New committed selection, if the event settled the wheel on a new index.
    pub selection: Option<usize>,
}

impl PointerResponse {
    pub(crate) const fn ignored() -> Self {
        Self {
            consumed: false,
            parent_intercept: ParentIntercept::Keep,
            redraw: false,
            selection: None,
        }
    }

    pub(crate) const fn handed_off(redraw: bool) -> Self {
        Self {
            consumed: false,
            parent_intercept: ParentIntercept::Allow,
            redraw,
            selection: None,
        }
    }

    pub(crate) const fn captured(redraw: bool) -> Self {
        Self {
            consumed: true,
            parent_intercept: ParentIntercept::Disallow,
            redraw,
            selection: None,
        }
    }
}

/// The pointer currently driving a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GestureState {
    pub id: u32,
    pub last_x: f32,
    pub last_y: f32,
}

impl GestureState {
    pub const fn start(event: &PointerEvent) -> Self {
        Self {
            id: event.id,
            last_x: event.x,
            last_y: event.y,
        }
    }
}
