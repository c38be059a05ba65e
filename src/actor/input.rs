//! Input Actor: Dedicated thread turning terminal events into [`HostEvent`]s.
//!
//! Mouse presses, drags and releases become pixel-space pointer events
//! timestamped in milliseconds since the actor started, so wheels can
//! estimate fling velocity. The mouse wheel and arrow keys become item steps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use tracing::trace;

use super::messages::{CellScale, HostEvent, PointerPhase};
use crate::error::Result;

/// Input actor that polls terminal events.
pub struct InputActor {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input thread.
    ///
    /// `poll_timeout` bounds how long a shutdown request can go unnoticed.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the input thread.
    pub fn spawn(
        sender: Sender<HostEvent>,
        scale: CellScale,
        poll_timeout: Duration,
    ) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("wheelpick-input".to_string())
            .spawn(move || Self::run_loop(&sender, &flag, scale, poll_timeout))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to stop.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop the input thread and wait for it.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(
        sender: &Sender<HostEvent>,
        shutdown: &AtomicBool,
        scale: CellScale,
        poll_timeout: Duration,
    ) {
        let start = Instant::now();
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.send(HostEvent::Shutdown);
                break;
            }

            let polled = event::poll(poll_timeout)
                .and_then(|ready| ready.then(event::read).transpose());
            let converted = match polled {
                Ok(Some(event)) => {
                    let time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    convert_event(event, scale, time_ms)
                }
                Ok(None) => None,
                Err(e) => Some(HostEvent::Error(e.to_string())),
            };

            if let Some(host_event) = converted {
                trace!(?host_event, "input");
                if sender.send(host_event).is_err() {
                    break;
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for InputActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputActor")
            .field("running", &!self.shutdown.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Convert a crossterm event received `time_ms` after start.
pub fn convert_event(event: Event, scale: CellScale, time_ms: u64) -> Option<HostEvent> {
    match event {
        Event::Key(key) => convert_key(key),
        Event::Mouse(mouse) => {
            let at = scale.pointer(mouse.column, mouse.row, time_ms);
            let pointer = |phase| HostEvent::Pointer(phase, at);
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(pointer(PointerPhase::Down)),
                MouseEventKind::Drag(MouseButton::Left) => Some(pointer(PointerPhase::Move)),
                MouseEventKind::Up(MouseButton::Left) => Some(pointer(PointerPhase::Up)),
                // Rolling the wheel up brings earlier items into view.
                MouseEventKind::ScrollUp => Some(HostEvent::Scroll {
                    x: scale.x(mouse.column),
                    delta: -1,
                }),
                MouseEventKind::ScrollDown => Some(HostEvent::Scroll {
                    x: scale.x(mouse.column),
                    delta: 1,
                }),
                _ => None,
            }
        }
        Event::Resize(width, height) => Some(HostEvent::Resize { width, height }),
        _ => None,
    }
}

fn convert_key(key: KeyEvent) -> Option<HostEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    Some(match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => HostEvent::Quit,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => HostEvent::Quit,
        KeyCode::Up | KeyCode::Char('k') => HostEvent::Step(-1),
        KeyCode::Down | KeyCode::Char('j') => HostEvent::Step(1),
        KeyCode::PageUp => HostEvent::Step(-5),
        KeyCode::PageDown => HostEvent::Step(5),
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => HostEvent::Focus(-1),
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => HostEvent::Focus(1),
        _ => return None,
    })
}
