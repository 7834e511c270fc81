//! Common types used throughout Tether.

use std::fmt;

/// Plain parameter value in natural units (dB, s, %).
pub type ParamValue = f64;

/// Stable handle to a parameter inside a [`ParamSet`](crate::ParamSet).
///
/// Keys are dense indices into the set's parameter arena, resolved from the
/// string id once (at bind or setup time). Code that runs per audio block
/// holds keys rather than strings or references, which keeps the hot path
/// free of lookups and removes any dangling-reference hazard.
///
/// A key is only meaningful for the set that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamKey(pub(crate) usize);

impl ParamKey {
    /// The arena index this key refers to.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
