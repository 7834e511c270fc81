//! State snapshot save/restore.
//!
//! A snapshot is a tagged tree: the root carries the parameter set's layout
//! tag, the children are one scalar per parameter id. The encoding (JSON) is
//! an implementation detail — the only external contract is round-trip
//! fidelity: `load_state(save_state(S), S') == S` for any sets sharing the
//! same parameter ids.
//!
//! Restores are all-or-nothing: the bytes are fully decoded and the tag is
//! checked before any value is touched, so malformed input can never leave a
//! set partially overwritten. Ids present in the target but absent from the
//! snapshot keep their current values; unknown snapshot ids are ignored for
//! forward compatibility.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::params::ParamSet;

/// Transient serialization form of a parameter set. Not runtime state.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    /// Layout tag of the set this snapshot was taken from.
    tag: String,
    /// One scalar per parameter id. Ordered map for stable output bytes.
    params: BTreeMap<String, f64>,
}

/// Serialize all current values of `set` to snapshot bytes.
pub fn save_state(set: &ParamSet) -> Vec<u8> {
    let snapshot = Snapshot {
        tag: set.tag().to_string(),
        params: set
            .iter()
            .map(|(key, spec)| (spec.id.to_string(), set.get(key)))
            .collect(),
    };
    // Stored values are always finite, so the snapshot always encodes.
    serde_json::to_vec(&snapshot).unwrap_or_else(|err| {
        log::error!("state snapshot encode failed: {err}");
        Vec::new()
    })
}

/// Restore parameter values from snapshot bytes.
///
/// On success every id present in both the snapshot and `set` is applied
/// (clamped into range) as one logical unit. On any decode error or tag
/// mismatch the set is left untouched and the failure is reported — never
/// raised further.
pub fn load_state(set: &ParamSet, bytes: &[u8]) -> Result<(), StateError> {
    let snapshot: Snapshot = serde_json::from_slice(bytes).map_err(|err| {
        log::warn!("state restore rejected: {err}");
        StateError::Decode(err)
    })?;

    if snapshot.tag != set.tag() {
        log::warn!(
            "state restore rejected: tag `{}` does not match `{}`",
            snapshot.tag,
            set.tag()
        );
        return Err(StateError::TagMismatch {
            expected: set.tag().to_string(),
            found: snapshot.tag,
        });
    }

    for (key, spec) in set.iter() {
        if let Some(&value) = snapshot.params.get(spec.id) {
            set.set(key, value);
        }
    }
    Ok(())
}
