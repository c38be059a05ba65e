//! Date Picker Demo: A year-to-second picker in the terminal.
//!
//! Drag a column with the mouse (let go while moving to fling it), roll the
//! mouse wheel over a column, or use the arrow keys. Enter, Esc or q quits
//! and prints the chosen date.
//!
//! Set `WHEELPICK_LOG=/path/to/file` to write a trace log; `RUST_LOG`
//! filters it.

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use crossbeam_channel::{bounded, select};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wheelpick::actor::{CellScale, HostEvent, InputActor, PointerPhase, TickerActor};
use wheelpick::surface::Viewport;
use wheelpick::terminal::Terminal;
use wheelpick::{
    Bounds, CellSurface, DateWheel, DrawSurface, MeasureMode, Point, PointerEvent, Rgb, TextStyle,
    WheelConfig,
};

const PX_PER_COL: i32 = 8;
const PX_PER_ROW: i32 = 16;
const VISIBLE: i32 = 7;
/// Rows above the picker, holding the date readout.
const TOP_ROWS: i32 = 2;

fn init_logging() -> wheelpick::Result<()> {
    let Ok(path) = std::env::var("WHEELPICK_LOG") else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wheelpick=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn config() -> WheelConfig {
    WheelConfig {
        text_size: 12.0,
        selected_text_size: 14.0,
        item_height: PX_PER_ROW,
        visible_count: 7,
        ..WheelConfig::default()
    }
}

fn draw(picker: &DateWheel, surface: &mut CellSurface, focus: usize) {
    surface.clear(Rgb::BLACK);
    let width = surface.pixel_bounds().width;
    let label = TextStyle {
        size: 14.0,
        color: Rgb::WHITE,
        centered: true,
    };

    let readout = picker.date().format("%Y-%m-%d %H:%M:%S").to_string();
    surface.draw_text(&readout, Point::new(width / 2, PX_PER_ROW / 2), label);

    let area = Bounds::new(0, TOP_ROWS * PX_PER_ROW, width, VISIBLE * PX_PER_ROW);
    picker.render(&mut Viewport::new(&mut *surface, area));

    if let Some(column) = area.columns(picker.len()).get(focus) {
        let marker = Point::new(column.center().x, area.bottom() + PX_PER_ROW / 2);
        surface.draw_text("^", marker, label);
    }
}

fn main() -> wheelpick::Result<()> {
    init_logging()?;

    let mut picker = DateWheel::new(config())?;
    let mut terminal = Terminal::enter()?;
    let (width, height) = terminal.size();
    let mut surface =
        CellSurface::new(width, height, PX_PER_COL, PX_PER_ROW).with_bold_threshold(14.0);
    picker.measure(i32::from(width) * PX_PER_COL, 0, MeasureMode::AtMost);

    let (input_tx, input_rx) = bounded(64);
    let scale = CellScale::new(PX_PER_COL, PX_PER_ROW);
    let input = InputActor::spawn(input_tx, scale, Duration::from_millis(10))?;
    let ticker = TickerActor::spawn_frames()?;

    #[allow(clippy::cast_precision_loss)]
    let origin_y = (TOP_ROWS * PX_PER_ROW) as f32;
    let mut focus = 0usize;
    let mut dirty = true;
    let mut running = true;

    while running {
        if dirty {
            draw(&picker, &mut surface, focus);
            terminal.present(&surface)?;
            dirty = false;
        }

        select! {
            recv(input_rx) -> event => {
                let event = event.unwrap_or(HostEvent::Shutdown);
                match event {
                    HostEvent::Pointer(phase, pointer) => {
                        let local = PointerEvent {
                            y: pointer.y - origin_y,
                            ..pointer
                        };
                        let response = match phase {
                            PointerPhase::Down => {
                                if let Some(column) = picker.column_at(local.x) {
                                    focus = column;
                                    dirty = true;
                                }
                                picker.on_pointer_down(&local)
                            }
                            PointerPhase::Move => picker.on_pointer_move(&local),
                            PointerPhase::Up => picker.on_pointer_up(&local),
                        };
                        dirty |= response.redraw || response.selection.is_some();
                    }
                    HostEvent::Scroll { x, delta } => {
                        if let Some(column) = picker.column_at(x) {
                            focus = column;
                            picker.step(column, delta);
                        }
                    }
                    HostEvent::Step(delta) => {
                        picker.step(focus, delta);
                    }
                    HostEvent::Focus(delta) => {
                        let last = picker.len().saturating_sub(1);
                        focus = focus.saturating_add_signed(delta).min(last);
                        dirty = true;
                    }
                    HostEvent::Resize { width, height } => {
                        terminal.resize(width, height);
                        surface.resize(width, height);
                        picker.measure(i32::from(width) * PX_PER_COL, 0, MeasureMode::AtMost);
                        dirty = true;
                    }
                    HostEvent::Error(message) => warn!(%message, "input error"),
                    HostEvent::Quit | HostEvent::Shutdown => running = false,
                }
            }
            recv(ticker.receiver()) -> tick => {
                running &= tick.is_ok();
                dirty |= picker.is_animating();
                if let Some(date) = picker.tick() {
                    info!(%date, "date changed");
                }
            }
        }
    }

    input.join();
    ticker.join();
    let date = picker.date();
    drop(terminal);
    println!("{}", date.format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}
