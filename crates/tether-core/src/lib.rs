//! # tether-core
//!
//! Shared plumbing for WebView audio plugins: a real-time-safe parameter
//! model and the cross-thread synchronization bridge between the audio
//! callback and the UI layer.
//!
//! Two concurrency domains exist. The *real-time domain* is the sequence of
//! audio-callback invocations driven by the host at block cadence; code
//! running there ([`ParamSet::get`]/[`ParamSet::set`], the meter producer)
//! performs only relaxed atomic loads and stores — no allocation, no locks,
//! no I/O. The *control domain* is the single cooperative timeline of the
//! fixed-rate UI timer and host/UI input events, where bridges, the state
//! codec and the resource router execute. The two domains communicate only
//! through the parameter atomics and the meter slot, never through direct
//! calls or shared locks.
//!
//! ## Modules
//!
//! - [`params`] - Parameter declaration and lock-free value storage
//! - [`range`] - Plain↔normalized mapping with step and skew
//! - [`format`] - Value↔text conversion
//! - [`state`] - Tagged snapshot save/restore
//! - [`meter`] - One-slot wait-free level channel
//! - [`bridge`] - Two-way parameter↔control binding
//! - [`refresh`] - Fixed-rate UI refresh driver
//! - [`resources`] - Embedded UI bundle routing
//! - [`processor`] - Host-facing capability interface

pub mod bridge;
pub mod error;
pub mod format;
pub mod meter;
pub mod params;
pub mod processor;
pub mod range;
pub mod refresh;
pub mod resources;
pub mod state;
pub mod types;

// Re-exports for convenience
pub use bridge::{BindError, ControlTransport, ParamBridge};
pub use error::{ParamSetError, ParseError, StateError};
pub use format::{CustomFormat, ValueFormat};
pub use meter::{meter_channel, to_decibels, MeterConsumer, MeterProducer, METER_FLOOR_DB};
pub use params::{ParamSet, ParamSpec};
pub use processor::{AudioBuffer, AudioProcessor};
pub use range::ValueRange;
pub use refresh::{RefreshLoop, SurfaceNotReady, UiSurface, DEFAULT_REFRESH_HZ};
pub use resources::{MimeType, Resource, ResourceEntry, ResourceRouter};
pub use state::{load_state, save_state};
pub use types::{ParamKey, ParamValue};
