//! Signal-level metering bridge between the audio callback and the UI.
//!
//! [`meter_channel`] creates a single-producer/single-consumer, wait-free,
//! one-slot channel. The audio thread overwrites the slot once per processed
//! block; the UI timer reads it at its own cadence. If the consumer misses a
//! value it is simply lost — latest-value-wins, no history, no queueing.
//! Peak-accurate metering is explicitly not a goal.
//!
//! Levels travel as linear gain magnitudes and are converted to decibels on
//! the consumer side with [`to_decibels`].

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Meter floor in decibels; magnitudes at or below the corresponding linear
/// threshold display as this value.
pub const METER_FLOOR_DB: f64 = -60.0;

struct Slot {
    /// Latest linear magnitude as f32 bits.
    level: AtomicU32,
}

/// Producer half, owned by the audio callback.
pub struct MeterProducer {
    slot: Arc<Slot>,
}

/// Consumer half, owned by the UI refresh driver.
pub struct MeterConsumer {
    slot: Arc<Slot>,
}

/// Create a connected producer/consumer pair with the level at zero.
pub fn meter_channel() -> (MeterProducer, MeterConsumer) {
    let slot = Arc::new(Slot {
        level: AtomicU32::new(0.0f32.to_bits()),
    });
    (
        MeterProducer { slot: slot.clone() },
        MeterConsumer { slot },
    )
}

impl MeterProducer {
    /// Overwrite the slot with the latest block level.
    ///
    /// Wait-free relaxed store; never blocks regardless of consumer activity.
    /// Negative inputs are published as their magnitude.
    #[inline]
    pub fn publish(&self, level: f32) {
        self.slot.level.store(level.abs().to_bits(), Ordering::Relaxed);
    }
}

impl MeterConsumer {
    /// Read the most recently published linear magnitude.
    ///
    /// The slot keeps its value between producer writes, so a read with no
    /// new data returns the last known level — not an error.
    #[inline]
    pub fn level(&self) -> f32 {
        f32::from_bits(self.slot.level.load(Ordering::Relaxed))
    }

    /// Read the current level converted to decibels.
    pub fn level_db(&self) -> f64 {
        to_decibels(self.level() as f64)
    }
}

/// Convert a linear gain magnitude to decibels, floored at
/// [`METER_FLOOR_DB`].
pub fn to_decibels(linear: f64) -> f64 {
    let floor_linear = 10.0f64.powf(METER_FLOOR_DB / 20.0);
    if linear <= floor_linear {
        METER_FLOOR_DB
    } else {
        20.0 * linear.log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_value_wins() {
        let (tx, rx) = meter_channel();
        tx.publish(0.25);
        tx.publish(0.5);
        tx.publish(0.75);
        assert_eq!(rx.level(), 0.75);
    }

    #[test]
    fn test_read_without_new_data_repeats_last() {
        let (tx, rx) = meter_channel();
        tx.publish(0.5);
        assert_eq!(rx.level(), 0.5);
        assert_eq!(rx.level(), 0.5);
    }

    #[test]
    fn test_reads_never_go_backwards() {
        // With a monotonically increasing write sequence, every read must
        // observe a value at least as fresh as the previous read.
        let (tx, rx) = meter_channel();
        let writer = std::thread::spawn(move || {
            for i in 0..10_000u32 {
                tx.publish(i as f32);
            }
        });
        let mut last = rx.level();
        for _ in 0..10_000 {
            let now = rx.level();
            assert!(now >= last);
            last = now;
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_decibel_conversion() {
        assert!((to_decibels(1.0) - 0.0).abs() < 1e-9);
        assert!((to_decibels(0.5) - -6.0206).abs() < 1e-3);
        assert_eq!(to_decibels(0.0), METER_FLOOR_DB);
        assert_eq!(to_decibels(0.0005), METER_FLOOR_DB);
        // Exactly at the floor threshold stays floored.
        assert_eq!(to_decibels(0.001), METER_FLOOR_DB);
    }

    #[test]
    fn test_negative_magnitude_published_as_abs() {
        let (tx, rx) = meter_channel();
        tx.publish(-0.5);
        assert_eq!(rx.level(), 0.5);
    }
}
