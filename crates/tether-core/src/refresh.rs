//! Fixed-rate UI refresh driver.
//!
//! [`RefreshLoop`] polls the meter consumer at a fixed cadence (60 Hz by
//! default), converts the linear level to decibels and pushes it into the
//! [`UiSurface`]. Delivery is fire-and-forget: a surface that is not ready
//! simply misses that tick — the failure is dropped, never retried and never
//! treated as an error.
//!
//! # Cancellation
//!
//! The timer must not fire against a partially destroyed UI object, so
//! [`stop`](RefreshLoop::stop) flags the timer thread and joins it before
//! returning; the surface (owned by the loop) is only dropped after the join
//! completes. Dropping the loop stops it the same way. This is the only
//! cancellable operation in the core.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::meter::MeterConsumer;

/// Default refresh cadence.
pub const DEFAULT_REFRESH_HZ: u32 = 60;

/// Receiving end of asynchronous meter pushes.
///
/// Implementations forward to the rendering layer (e.g. evaluate a script in
/// the WebView). Returning `Err` means the surface was not ready for this
/// delivery; the value is dropped.
pub trait UiSurface: Send {
    /// Deliver the current meter level in decibels.
    fn update_meter_db(&self, db: f64) -> Result<(), SurfaceNotReady>;
}

/// The surface could not accept a delivery. Not an error condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceNotReady;

/// Fixed-rate driver feeding meter updates into a UI surface.
pub struct RefreshLoop {
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RefreshLoop {
    /// Start a refresh thread at [`DEFAULT_REFRESH_HZ`].
    pub fn start(
        consumer: MeterConsumer,
        surface: Box<dyn UiSurface>,
    ) -> std::io::Result<Self> {
        Self::start_at(consumer, surface, DEFAULT_REFRESH_HZ)
    }

    /// Start a refresh thread at `rate_hz` ticks per second.
    pub fn start_at(
        consumer: MeterConsumer,
        surface: Box<dyn UiSurface>,
        rate_hz: u32,
    ) -> std::io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let interval = Duration::from_secs_f64(1.0 / rate_hz.max(1) as f64);

        let handle = thread::Builder::new()
            .name("tether-ui-refresh".into())
            .spawn(move || {
                while flag.load(Ordering::Relaxed) {
                    let _ = surface.update_meter_db(consumer.level_db());
                    thread::sleep(interval);
                }
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop the timer and wait for the in-flight tick to finish.
    ///
    /// After this returns, no further tick can run; safe to tear the UI
    /// object down. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
