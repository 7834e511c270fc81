//! Error types for the Tether core.
//!
//! Every failure in this crate degrades to "retain last known-good state":
//! construction errors prevent a [`ParamSet`](crate::ParamSet) from existing
//! at all, and everything after construction reports through these types
//! without ever touching stored values on the failure path.

use thiserror::Error;

/// Errors raised while building a parameter set.
///
/// These are fatal for the set under construction — a processor cannot be
/// created with a broken layout — but never for the host process.
#[derive(Debug, Error)]
pub enum ParamSetError {
    /// Two parameter specs share the same string id.
    #[error("duplicate parameter id `{0}`")]
    DuplicateId(String),

    /// A default value lies outside its declared range.
    #[error("parameter `{id}` default {default} outside of range {min}..={max}")]
    DefaultOutOfRange {
        id: String,
        default: f64,
        min: f64,
        max: f64,
    },

    /// Skew must be positive (1.0 is linear).
    #[error("parameter `{id}` has non-positive skew {skew}")]
    InvalidSkew { id: String, skew: f64 },

    /// Range must satisfy min < max.
    #[error("parameter `{id}` has empty range {min}..={max}")]
    EmptyRange { id: String, min: f64, max: f64 },

    /// A key was resolved for an id the layout does not declare.
    #[error("unknown parameter id `{0}`")]
    UnknownId(String),
}

/// Errors raised while restoring a state snapshot.
///
/// Any of these leaves the target set completely unchanged.
#[derive(Debug, Error)]
pub enum StateError {
    /// The snapshot bytes are not a well-formed snapshot document.
    #[error("malformed state snapshot: {0}")]
    Decode(#[from] serde_json::Error),

    /// The snapshot was written by a different parameter layout.
    #[error("state snapshot tag `{found}` does not match `{expected}`")]
    TagMismatch { expected: String, found: String },
}

/// Text-to-value conversion failure.
///
/// The stored parameter value is left untouched; the failure is signaled to
/// the caller only and never surfaced further.
#[derive(Debug, Error)]
#[error("cannot parse `{text}` as a value for parameter `{id}`")]
pub struct ParseError {
    pub id: String,
    pub text: String,
}
