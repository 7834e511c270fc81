//! Value-range mapping for parameter normalization.
//!
//! This module provides [`ValueRange`] for mapping between plain parameter
//! values (in natural units like dB, s, %) and normalized values (0.0 to 1.0)
//! used for host-agnostic automation.
//!
//! A single skew exponent shapes the perceptual curve: skew 1.0 is linear,
//! skew below 1.0 spends more of the normalized travel near the bottom of the
//! range (the usual choice for time-based parameters), skew above 1.0 spends
//! more travel near the top.
//!
//! # Example
//!
//! ```ignore
//! use tether_core::range::ValueRange;
//!
//! // Linear dB range
//! let gain = ValueRange::new(-60.0, 0.0).with_step(0.1);
//! assert_eq!(gain.denormalize(1.0), 0.0);
//!
//! // Logarithmic-feel reverb time
//! let size = ValueRange::new(0.5, 20.0).with_step(0.1).with_skew(0.3);
//! let n = size.normalize(2.5);
//! assert!((size.denormalize(n) - 2.5).abs() < 1e-5);
//! ```

/// An inclusive plain-value range with step quantization and perceptual skew.
///
/// Immutable after construction. All mapping functions clamp their input, so
/// a `ValueRange` can never produce a value outside `[min, max]` or a
/// normalized value outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
    /// Step granularity for display/text round-trips. 0.0 means continuous.
    step: f64,
    /// Perceptual curve exponent. Must be positive; 1.0 is linear.
    skew: f64,
}

impl ValueRange {
    /// Create a linear, continuous range.
    ///
    /// Validation of `min < max` happens when the range is installed into a
    /// [`ParamSet`](crate::ParamSet); a free-standing range is just data.
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: 0.0,
            skew: 1.0,
        }
    }

    /// Set the step granularity (0.0 = continuous).
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set the skew exponent (must be positive; 1.0 = linear).
    pub const fn with_skew(mut self, skew: f64) -> Self {
        self.skew = skew;
        self
    }

    /// Range minimum.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Range maximum.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Step granularity (0.0 = continuous).
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Skew exponent.
    pub fn skew(&self) -> f64 {
        self.skew
    }

    /// Clamp a plain value into `[min, max]`.
    #[inline]
    pub fn clamp(&self, plain: f64) -> f64 {
        plain.clamp(self.min, self.max)
    }

    /// Whether `plain` lies inside the range.
    pub fn contains(&self, plain: f64) -> bool {
        plain >= self.min && plain <= self.max
    }

    /// Snap a plain value to the nearest step multiple, then clamp.
    ///
    /// Steps are counted from `min`, matching how the ranges are declared
    /// (e.g. 0.5..=20.0 in 0.1 steps).
    pub fn snap(&self, plain: f64) -> f64 {
        if self.step <= 0.0 {
            return self.clamp(plain);
        }
        let steps = ((plain - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }

    /// Convert a plain value to normalized (0.0-1.0).
    ///
    /// For skew 1.0 this is plain linear interpolation; otherwise
    /// `n = ((v - min) / (max - min))^skew`, the exact inverse of
    /// [`denormalize`](Self::denormalize).
    pub fn normalize(&self, plain: f64) -> f64 {
        if (self.max - self.min).abs() < f64::EPSILON {
            return 0.5;
        }
        let linear = ((self.clamp(plain) - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        if (self.skew - 1.0).abs() < f64::EPSILON {
            linear
        } else {
            linear.powf(self.skew)
        }
    }

    /// Convert a normalized value (0.0-1.0) to plain.
    ///
    /// For skew 1.0: `v = min + n * (max - min)`; otherwise
    /// `v = min + (max - min) * n^(1/skew)`.
    pub fn denormalize(&self, normalized: f64) -> f64 {
        let normalized = normalized.clamp(0.0, 1.0);
        let linear = if (self.skew - 1.0).abs() < f64::EPSILON {
            normalized
        } else {
            normalized.powf(1.0 / self.skew)
        };
        self.min + linear * (self.max - self.min)
    }
}
