//! Terminal: Presenting a [`CellSurface`](crate::surface::CellSurface) on a real terminal.

mod guard;
mod output;

pub use guard::Terminal;
pub use output::OutputBuffer;
