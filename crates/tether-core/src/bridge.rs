//! Two-way binding between one parameter and one UI control.
//!
//! A [`ParamBridge`] links a [`ParamSet`] entry to a UI-side control
//! representation (the [`ControlTransport`]). Control input flows into the
//! store clamped; store-side changes (host automation, another control,
//! state restore) flow back out on [`sync`](ParamBridge::sync) — except the
//! value just received from that same transport, which is never echoed back
//! (prevents feedback oscillation between the control and the store).
//!
//! Bridges live entirely in the control domain and are deliberately `!Sync`.
//! Callers create bridges after the UI surface exists and drop them before
//! tearing the surface down; because a bridge addresses its parameter by key
//! and keeps its own handle to the set, there is no reference to dangle.
//!
//! No undo/redo history is kept here.

use std::cell::Cell;
use std::sync::Arc;

use thiserror::Error;

use crate::params::ParamSet;
use crate::types::{ParamKey, ParamValue};

/// UI-side control representation a bridge pushes values into.
///
/// Implementations forward to whatever the UI surface understands (a slider
/// relay, a test probe). Push semantics are fire-and-forget.
pub trait ControlTransport {
    /// Deliver a plain parameter value to the control.
    fn push_value(&self, value: ParamValue);
}

/// Binding failure: the id does not exist in the target set.
#[derive(Debug, Error)]
#[error("cannot bind control: unknown parameter id `{0}`")]
pub struct BindError(pub String);

/// Two-way link between one parameter and one control.
pub struct ParamBridge {
    set: Arc<ParamSet>,
    key: ParamKey,
    transport: Box<dyn ControlTransport>,
    /// Last value the transport is known to hold, from either direction.
    /// Used to suppress echoes and redundant pushes.
    last_seen: Cell<ParamValue>,
}

impl ParamBridge {
    /// Bind a control to the parameter named `id`.
    ///
    /// The control receives the parameter's current value immediately so
    /// both sides start in agreement.
    pub fn bind(
        set: Arc<ParamSet>,
        id: &str,
        transport: Box<dyn ControlTransport>,
    ) -> Result<Self, BindError> {
        let key = set.key(id).ok_or_else(|| BindError(id.to_string()))?;
        let current = set.get(key);
        transport.push_value(current);
        Ok(Self {
            set,
            key,
            transport,
            last_seen: Cell::new(current),
        })
    }

    /// The key this bridge is bound to.
    pub fn key(&self) -> ParamKey {
        self.key
    }

    /// Control → store: accept a value from the transport.
    ///
    /// The value is clamped and recorded as what the transport holds, so the
    /// next [`sync`](Self::sync) does not echo it back to the control. The
    /// clamp happens locally rather than by re-reading the store: a
    /// real-time-domain write landing concurrently must not end up in
    /// `last_seen`, or the next sync would skip pushing it.
    pub fn receive(&self, value: ParamValue) {
        let clamped = self.set.spec(self.key).range.clamp(value);
        self.set.set(self.key, clamped);
        self.last_seen.set(clamped);
    }

    /// Store → control: push the current value if the store changed behind
    /// the control's back.
    ///
    /// Call once per UI update pass. Values the transport already holds
    /// (whether it sent them or we pushed them) are not re-sent.
    pub fn sync(&self) {
        let current = self.set.get(self.key);
        if current.to_bits() != self.last_seen.get().to_bits() {
            self.transport.push_value(current);
            self.last_seen.set(current);
        }
    }

    /// Convenience for controls that edit text: parse, store and suppress
    /// the echo in one step. Unparseable text leaves everything unchanged.
    pub fn receive_text(&self, text: &str) -> bool {
        match self.set.set_from_text(self.key, text) {
            Ok(value) => {
                self.last_seen.set(value);
                true
            }
            Err(_) => false,
        }
    }
}
