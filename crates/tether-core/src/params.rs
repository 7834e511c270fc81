//! Parameter declaration and storage.
//!
//! This module provides [`ParamSpec`] for declaring a parameter and
//! [`ParamSet`] for owning the canonical set of named, ranged parameters and
//! their current values.
//!
//! # Thread Safety
//!
//! A [`ParamSet`] is accessed from multiple threads:
//! - Audio thread: reads values during processing, writes on host automation
//! - UI thread: displays and modifies values through bridges
//!
//! Values live in `AtomicU64` cells (`to_bits`/`from_bits`) so every read and
//! write is a single relaxed atomic operation — lock-free, allocation-free and
//! safe from the audio callback. Everything else about a parameter is
//! immutable after construction.
//!
//! # Example
//!
//! ```ignore
//! use tether_core::{ParamSet, ParamSpec, range::ValueRange};
//!
//! let set = ParamSet::new(
//!     "Parameters",
//!     vec![ParamSpec::new("GAIN", "Gain", ValueRange::new(-60.0, 0.0).with_step(0.1), 0.0)
//!         .with_unit("dB")],
//! )?;
//!
//! let gain = set.key("GAIN").unwrap();
//! set.set(gain, -6.3);
//! assert_eq!(set.get(gain), -6.3);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ParamSetError, ParseError};
use crate::format::ValueFormat;
use crate::range::ValueRange;
use crate::types::{ParamKey, ParamValue};

/// Declaration of a single parameter.
///
/// Immutable once installed into a [`ParamSet`]; only the current value of
/// the parameter mutates afterwards.
#[derive(Debug)]
pub struct ParamSpec {
    /// Unique string id within the set (e.g. "GAIN").
    pub id: &'static str,
    /// Display name (e.g. "Gain").
    pub name: &'static str,
    /// Value range with step and skew.
    pub range: ValueRange,
    /// Default plain value; must lie inside `range`.
    pub default: ParamValue,
    /// Unit suffix (e.g. "dB", "s", "%").
    pub unit: &'static str,
    /// Value↔text conversion. `None` falls back to one-decimal formatting
    /// with the unit as suffix.
    pub format: Option<ValueFormat>,
}

impl ParamSpec {
    /// Create a new spec with no unit and default formatting.
    pub fn new(
        id: &'static str,
        name: &'static str,
        range: ValueRange,
        default: ParamValue,
    ) -> Self {
        Self {
            id,
            name,
            range,
            default,
            unit: "",
            format: None,
        }
    }

    /// Set the unit suffix.
    pub fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    /// Install a custom value↔text conversion.
    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }

    fn validate(&self) -> Result<(), ParamSetError> {
        if self.range.min() >= self.range.max() {
            return Err(ParamSetError::EmptyRange {
                id: self.id.to_string(),
                min: self.range.min(),
                max: self.range.max(),
            });
        }
        if self.range.skew() <= 0.0 {
            return Err(ParamSetError::InvalidSkew {
                id: self.id.to_string(),
                skew: self.range.skew(),
            });
        }
        if !self.range.contains(self.default) {
            return Err(ParamSetError::DefaultOutOfRange {
                id: self.id.to_string(),
                default: self.default,
                min: self.range.min(),
                max: self.range.max(),
            });
        }
        Ok(())
    }
}

struct Param {
    spec: ParamSpec,
    format: ValueFormat,
    /// Current plain value as f64 bits.
    value: AtomicU64,
}

/// The canonical, ordered set of parameters for one processor.
///
/// Built once at processor initialization; the set of ids is fixed for the
/// processor's lifetime and every stored value is clamped into its range at
/// all times.
pub struct ParamSet {
    tag: &'static str,
    params: Vec<Param>,
    lookup: HashMap<&'static str, usize>,
}

impl ParamSet {
    /// Build a set from specs, in declaration order.
    ///
    /// Fails if any id is duplicated, any default lies outside its range, any
    /// range is empty, or any skew is non-positive. The `tag` names the
    /// layout and guards snapshot restores (see [`crate::state`]).
    pub fn new(tag: &'static str, specs: Vec<ParamSpec>) -> Result<Self, ParamSetError> {
        let mut params = Vec::with_capacity(specs.len());
        let mut lookup = HashMap::with_capacity(specs.len());

        for spec in specs {
            spec.validate()?;
            if lookup.contains_key(spec.id) {
                return Err(ParamSetError::DuplicateId(spec.id.to_string()));
            }
            lookup.insert(spec.id, params.len());
            let mut spec = spec;
            let format = spec.format.take().unwrap_or(ValueFormat::Decimal {
                precision: 1,
                suffix: spec.unit,
            });
            let default = spec.default;
            params.push(Param {
                spec,
                format,
                value: AtomicU64::new(default.to_bits()),
            });
        }

        log::debug!("parameter set `{}` built with {} parameters", tag, params.len());
        Ok(Self { tag, params, lookup })
    }

    /// The layout tag this set was declared with.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Resolve a string id to a key. Call once at setup/bind time, not per
    /// block.
    pub fn key(&self, id: &str) -> Option<ParamKey> {
        self.lookup.get(id).copied().map(ParamKey)
    }

    /// Spec for a parameter.
    pub fn spec(&self, key: ParamKey) -> &ParamSpec {
        &self.params[key.0].spec
    }

    /// Iterate keys and specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, &ParamSpec)> {
        self.params
            .iter()
            .enumerate()
            .map(|(i, p)| (ParamKey(i), &p.spec))
    }

    // === Value access (audio-callback safe) ===

    /// Current plain value. Relaxed atomic load; callable from the audio
    /// callback.
    #[inline]
    pub fn get(&self, key: ParamKey) -> ParamValue {
        f64::from_bits(self.params[key.0].value.load(Ordering::Relaxed))
    }

    /// Store a plain value, clamped into the parameter's range. Non-finite
    /// input is ignored and the current value retained, so the stored value
    /// is inside [min, max] at all times. Never blocks, never invokes
    /// callbacks; callable from the audio callback or the UI thread.
    #[inline]
    pub fn set(&self, key: ParamKey, value: ParamValue) {
        if !value.is_finite() {
            return;
        }
        let clamped = self.params[key.0].spec.range.clamp(value);
        self.params[key.0].value.store(clamped.to_bits(), Ordering::Relaxed);
    }

    /// Reset a parameter to its default.
    pub fn reset(&self, key: ParamKey) {
        self.set(key, self.params[key.0].spec.default);
    }

    // === Normalized mapping ===

    /// Current value in normalized (0.0-1.0) form.
    #[inline]
    pub fn get_normalized(&self, key: ParamKey) -> f64 {
        self.params[key.0].spec.range.normalize(self.get(key))
    }

    /// Store from a normalized (0.0-1.0) value.
    #[inline]
    pub fn set_normalized(&self, key: ParamKey, normalized: f64) {
        self.set(key, self.params[key.0].spec.range.denormalize(normalized));
    }

    /// Map a normalized value to plain units for this parameter.
    pub fn normalized_to_plain(&self, key: ParamKey, normalized: f64) -> ParamValue {
        self.params[key.0].spec.range.denormalize(normalized)
    }

    /// Map a plain value to normalized form for this parameter.
    pub fn plain_to_normalized(&self, key: ParamKey, plain: ParamValue) -> f64 {
        self.params[key.0].spec.range.normalize(plain)
    }

    // === Text conversion ===

    /// Format a plain value for display.
    pub fn value_to_text(&self, key: ParamKey, value: ParamValue) -> String {
        let param = &self.params[key.0];
        param.format.format(param.spec.range.clamp(value))
    }

    /// Parse display text to a plain value (clamped, not stored).
    ///
    /// On an unparseable string this returns `Err` and nothing changes; the
    /// failure is for the caller only.
    pub fn text_to_value(&self, key: ParamKey, text: &str) -> Result<ParamValue, ParseError> {
        let param = &self.params[key.0];
        match param.format.parse(text) {
            Some(value) => Ok(param.spec.range.clamp(value)),
            None => Err(ParseError {
                id: param.spec.id.to_string(),
                text: text.to_string(),
            }),
        }
    }

    /// Parse display text and store the result.
    ///
    /// The stored value is left unchanged when parsing fails.
    pub fn set_from_text(&self, key: ParamKey, text: &str) -> Result<ParamValue, ParseError> {
        let value = self.text_to_value(key, text)?;
        self.set(key, value);
        Ok(value)
    }
}
