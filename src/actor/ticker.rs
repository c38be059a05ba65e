//! Ticker Actor: Dedicated thread pacing animation frames.
//!
//! Wheels advance their motion once per [`WheelView::tick`](crate::wheel::WheelView::tick).
//! The ticker delivers one [`Tick`] per frame interval so the picker loop can
//! `select!` over input and frames.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::error::Result;
use crate::motion::FRAME_MILLIS;

/// One animation frame.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Frame number (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
}

/// Ticker actor that generates frame events.
pub struct TickerActor {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    tick_rx: Receiver<Tick>,
}

impl TickerActor {
    /// Spawn a ticker at the wheel frame rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the ticker thread.
    pub fn spawn_frames() -> Result<Self> {
        Self::spawn(Duration::from_millis(u64::from(FRAME_MILLIS)))
    }

    /// Spawn a ticker with the given interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the ticker thread.
    pub fn spawn(interval: Duration) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        // Ticks are dropped rather than queued when the loop falls behind.
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name("wheelpick-ticker".to_string())
            .spawn(move || Self::run_loop(&tick_tx, &flag, interval))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
        })
    }

    /// Receiver for `select!`-driven loops.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Signal the ticker to stop.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop the ticker and wait for its thread.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(tick_tx: &Sender<Tick>, shutdown: &AtomicBool, interval: Duration) {
        let start = Instant::now();
        let mut deadline = start + interval;

        for frame in 0u64.. {
            while !shutdown.load(Ordering::Relaxed) {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                thread::sleep((deadline - now).min(Duration::from_millis(1)));
            }
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            // A full buffer skips the frame.
            let tick = Tick {
                frame,
                elapsed: now - start,
            };
            if let Err(TrySendError::Disconnected(_)) = tick_tx.try_send(tick) {
                break;
            }
            deadline = (deadline + interval).max(now);
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for TickerActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickerActor")
            .field("running", &!self.shutdown.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_delivers_frames_in_order() {
        let ticker = TickerActor::spawn(Duration::from_millis(5)).unwrap();

        let first = ticker.receiver().recv_timeout(Duration::from_millis(200)).unwrap();
        assert_eq!(first.frame, 0);
        let second = ticker.receiver().recv_timeout(Duration::from_millis(200)).unwrap();
        assert!(second.frame > first.frame);
        assert!(second.elapsed >= first.elapsed);

        ticker.join();
    }

    #[test]
    fn test_ticker_shutdown() {
        let ticker = TickerActor::spawn(Duration::from_millis(100)).unwrap();
        ticker.shutdown();
        thread::sleep(Duration::from_millis(20));
        ticker.join();
    }
}
