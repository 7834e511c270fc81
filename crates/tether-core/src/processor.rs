//! Processor capability interface.
//!
//! The host plugin runtime (outside this core) drives a
//! prepare/process/release lifecycle and calls getState/setState around the
//! snapshot contract. [`AudioProcessor`] is the minimal capability interface
//! the core exposes to that external adapter — no dependency on any specific
//! host ABI, and no global factory: instantiation belongs to whichever shell
//! embeds the plugin.
//!
//! Code inside [`process`](AudioProcessor::process) runs in the real-time
//! domain: it may read and write the [`ParamSet`] and publish into a meter
//! producer, but must never allocate, lock or block.

use std::sync::Arc;

use crate::error::StateError;
use crate::params::ParamSet;
use crate::state;

/// A block of audio, one sample slice per channel.
///
/// All channels hold the same number of frames. This is a borrowed view over
/// host-owned storage; nothing here allocates.
pub struct AudioBuffer<'a> {
    channels: &'a mut [&'a mut [f32]],
}

impl<'a> AudioBuffer<'a> {
    /// Wrap host-provided channel slices.
    pub fn new(channels: &'a mut [&'a mut [f32]]) -> Self {
        Self { channels }
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Frames per channel (0 for an empty buffer).
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, |ch| ch.len())
    }

    /// Immutable view of one channel.
    pub fn channel(&self, index: usize) -> &[f32] {
        self.channels[index]
    }

    /// Mutable view of one channel.
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        self.channels[index]
    }

    /// Peak absolute sample magnitude across all channels.
    ///
    /// This is what the pass-through processors publish as their block level.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|ch| ch.iter())
            .fold(0.0f32, |acc, s| acc.max(s.abs()))
    }
}

/// Minimal processor lifecycle as seen from the host adapter.
///
/// `save_state` and `load_state` default to the snapshot codec over the
/// processor's parameter set, which satisfies the round-trip and
/// fail-safe-load contracts without per-plugin code.
pub trait AudioProcessor: Send {
    /// The processor's parameter set.
    fn params(&self) -> &Arc<ParamSet>;

    /// Called before processing starts or after the configuration changed.
    fn prepare(&mut self, _sample_rate: f64, _max_block_frames: usize) {}

    /// Process one block in place. Real-time domain; see module docs.
    fn process(&mut self, buffer: &mut AudioBuffer);

    /// Called when the host tears the processing chain down.
    fn release(&mut self) {}

    /// Capture all parameter values as snapshot bytes.
    fn save_state(&self) -> Vec<u8> {
        state::save_state(self.params())
    }

    /// Restore parameter values from snapshot bytes; a failure leaves the
    /// current state untouched.
    fn load_state(&mut self, bytes: &[u8]) -> Result<(), StateError> {
        state::load_state(self.params(), bytes)
    }
}
