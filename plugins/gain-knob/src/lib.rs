//! GainKnob - a gain control plugin built on the Tether plumbing.
//!
//! One automatable parameter (`GAIN`, -60..0 dB) bound to a WebView knob.
//! The processing callback is an explicit pass-through placeholder; the gain
//! stage itself is a later milestone and nothing here guesses at it.

use std::sync::Arc;

use thiserror::Error;

use tether_core::{
    AudioBuffer, AudioProcessor, BindError, ControlTransport, MimeType, ParamBridge, ParamKey,
    ParamSet, ParamSetError, ParamSpec, ResourceEntry, ResourceRouter, ValueRange,
};

/// Layout tag written into state snapshots.
pub const STATE_TAG: &str = "Parameters";

/// Declare the GainKnob parameter layout.
///
/// GAIN: -60.0 to 0.0 dB in 0.1 steps, linear skew, default 0.0 dB.
pub fn parameter_layout() -> Result<ParamSet, ParamSetError> {
    ParamSet::new(
        STATE_TAG,
        vec![ParamSpec::new(
            "GAIN",
            "Gain",
            ValueRange::new(-60.0, 0.0).with_step(0.1),
            0.0,
        )
        .with_unit("dB")],
    )
}

// =============================================================================
// Processor
// =============================================================================

/// The GainKnob audio processor.
pub struct GainKnobProcessor {
    params: Arc<ParamSet>,
    gain: ParamKey,
}

impl GainKnobProcessor {
    pub fn new() -> Result<Self, ParamSetError> {
        let params = Arc::new(parameter_layout()?);
        let gain = params
            .key("GAIN")
            .ok_or_else(|| ParamSetError::UnknownId("GAIN".into()))?;
        Ok(Self { params, gain })
    }

    /// Current gain in dB, as the eventual gain stage will read it.
    #[inline]
    pub fn gain_db(&self) -> f64 {
        self.params.get(self.gain)
    }
}

impl AudioProcessor for GainKnobProcessor {
    fn params(&self) -> &Arc<ParamSet> {
        &self.params
    }

    fn process(&mut self, _buffer: &mut AudioBuffer) {
        // Pass-through placeholder: the gain stage lands in a later
        // milestone. The parameter read exercises the real-time path the
        // DSP will use.
        let _gain_db = self.gain_db();
    }
}

// =============================================================================
// Editor shell
// =============================================================================

static UI_BUNDLE: &[ResourceEntry] = &[
    ResourceEntry {
        path: "/index.html",
        body: include_bytes!("../assets/index.html"),
        mime: MimeType::Markup,
    },
    ResourceEntry {
        path: "/js/tether/index.js",
        body: include_bytes!("../assets/js/tether/index.js"),
        mime: MimeType::Script,
    },
];

/// Router over the embedded GainKnob UI bundle.
pub static RESOURCES: ResourceRouter = ResourceRouter::new(UI_BUNDLE);

/// Editor construction failure.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Control-domain wiring for the GainKnob surface.
///
/// Create after the UI surface exists; drop (or [`close`](Self::close))
/// before the surface is torn down.
pub struct GainKnobEditor {
    bridges: Vec<(&'static str, ParamBridge)>,
}

impl GainKnobEditor {
    /// Bind the GAIN control.
    pub fn open(
        params: Arc<ParamSet>,
        gain_control: Box<dyn ControlTransport>,
    ) -> Result<Self, EditorError> {
        let bridges = vec![(
            "GAIN",
            ParamBridge::bind(params, "GAIN", gain_control)?,
        )];
        log::debug!("GainKnob editor opened ({} controls)", bridges.len());
        Ok(Self { bridges })
    }

    /// Route a control input to its parameter.
    pub fn control_changed(&self, id: &str, value: f64) {
        if let Some((_, bridge)) = self.bridges.iter().find(|(bid, _)| *bid == id) {
            bridge.receive(value);
        }
    }

    /// Push store-side changes (automation, state restore) out to controls.
    pub fn sync_controls(&self) {
        for (_, bridge) in &self.bridges {
            bridge.sync();
        }
    }

    /// Tear the wiring down. Bridges drop here, strictly before the caller
    /// destroys the surface or the parameter set.
    pub fn close(&mut self) {
        self.bridges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tether_core::{load_state, save_state};

    #[test]
    fn test_layout_builds() {
        let set = parameter_layout().unwrap();
        assert_eq!(set.len(), 1);
        let gain = set.key("GAIN").unwrap();
        assert_eq!(set.get(gain), 0.0);
        assert_eq!(set.spec(gain).unit, "dB");
    }

    #[test]
    fn test_state_survives_a_fresh_processor() {
        // Set GAIN, serialize, restore into a freshly constructed layout.
        let mut processor = GainKnobProcessor::new().unwrap();
        let gain = processor.params().key("GAIN").unwrap();
        processor.params().set(gain, -6.3);
        let bytes = processor.save_state();

        let mut fresh = GainKnobProcessor::new().unwrap();
        fresh.load_state(&bytes).unwrap();
        assert_eq!(fresh.gain_db(), -6.3);
        assert_eq!(processor.gain_db(), -6.3);
    }

    #[test]
    fn test_corrupt_state_keeps_current_values() {
        let mut processor = GainKnobProcessor::new().unwrap();
        let gain = processor.params().key("GAIN").unwrap();
        processor.params().set(gain, -12.0);

        assert!(processor.load_state(b"{ not a snapshot").is_err());
        assert_eq!(processor.gain_db(), -12.0);
    }

    #[test]
    fn test_round_trip_through_codec_functions() {
        let set = parameter_layout().unwrap();
        let gain = set.key("GAIN").unwrap();
        set.set(gain, -12.0);
        let bytes = save_state(&set);
        set.set(gain, 0.0);
        load_state(&set, &bytes).unwrap();
        assert_eq!(set.get(gain), -12.0);
    }

    #[test]
    fn test_process_is_pass_through() {
        let mut processor = GainKnobProcessor::new().unwrap();
        processor.prepare(48_000.0, 512);

        let mut left = [0.25f32, -0.5];
        let mut right = [0.125f32, 0.5];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        let mut buffer = AudioBuffer::new(&mut channels);
        processor.process(&mut buffer);

        assert_eq!(buffer.channel(0), &[0.25, -0.5]);
        assert_eq!(buffer.channel(1), &[0.125, 0.5]);
        processor.release();
    }

    #[test]
    fn test_ui_bundle_routing() {
        let root = RESOURCES.resolve("/").unwrap();
        let index = RESOURCES.resolve("/index.html").unwrap();
        assert_eq!(root, index);
        assert_eq!(root.mime, MimeType::Markup);
        assert_eq!(
            RESOURCES.resolve("/js/tether/index.js").unwrap().mime,
            MimeType::Script
        );
        assert!(RESOURCES.resolve("/missing").is_none());
    }

    struct Probe(Rc<RefCell<Vec<f64>>>);

    impl ControlTransport for Probe {
        fn push_value(&self, value: f64) {
            self.0.borrow_mut().push(value);
        }
    }

    #[test]
    fn test_editor_round_trip_without_echo() {
        let params = Arc::new(parameter_layout().unwrap());
        let pushed = Rc::new(RefCell::new(Vec::new()));
        let mut editor =
            GainKnobEditor::open(params.clone(), Box::new(Probe(pushed.clone()))).unwrap();

        // Knob moved in the UI: reaches the store, is not echoed back.
        editor.control_changed("GAIN", -6.3);
        editor.sync_controls();
        let gain = params.key("GAIN").unwrap();
        assert_eq!(params.get(gain), -6.3);
        assert_eq!(*pushed.borrow(), vec![0.0]);

        // Automation moved the store: pushed out exactly once.
        params.set(gain, -20.0);
        editor.sync_controls();
        editor.sync_controls();
        assert_eq!(*pushed.borrow(), vec![0.0, -20.0]);

        editor.close();
    }
}
