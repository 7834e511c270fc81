//! LushVerb - a reverb plugin built on the Tether plumbing.
//!
//! Four automatable parameters bound to WebView knobs, plus a VU meter fed
//! from the processing callback at block rate and drained by the editor at
//! 60 Hz. The processing callback is an explicit pass-through placeholder;
//! the reverb algorithm is a later milestone and nothing here guesses at it.

use std::sync::Arc;

use thiserror::Error;

use tether_core::{
    AudioBuffer, AudioProcessor, BindError, ControlTransport, MeterConsumer, MeterProducer,
    MimeType, ParamBridge, ParamKey, ParamSet, ParamSetError, ParamSpec, RefreshLoop,
    ResourceEntry, ResourceRouter, UiSurface, ValueFormat, ValueRange,
};

/// Layout tag written into state snapshots.
pub const STATE_TAG: &str = "Parameters";

fn percent(id: &'static str, name: &'static str) -> ParamSpec {
    ParamSpec::new(id, name, ValueRange::new(0.0, 100.0).with_step(1.0), 30.0)
        .with_unit("%")
        .with_format(ValueFormat::Integer { suffix: "%" })
}

/// Declare the LushVerb parameter layout.
///
/// - SIZE: reverb tail length, 0.5-20.0 s, 0.1 steps, skew 0.3, default 2.5 s
/// - DAMPING: high-frequency rolloff, 0-100 %, default 30 %
/// - SHIMMER: +1 octave shifted signal amount, 0-100 %, default 30 %
/// - MIX: dry/wet blend, 0-100 %, default 30 %
pub fn parameter_layout() -> Result<ParamSet, ParamSetError> {
    ParamSet::new(
        STATE_TAG,
        vec![
            ParamSpec::new(
                "SIZE",
                "Size",
                ValueRange::new(0.5, 20.0).with_step(0.1).with_skew(0.3),
                2.5,
            )
            .with_unit("s")
            .with_format(ValueFormat::custom(
                |value| format!("{value:.1}s"),
                |text| text.strip_suffix('s').unwrap_or(text).trim().parse().ok(),
            )),
            percent("DAMPING", "Damping"),
            percent("SHIMMER", "Shimmer"),
            percent("MIX", "Mix"),
        ],
    )
}

// =============================================================================
// Processor
// =============================================================================

/// The LushVerb audio processor.
pub struct LushVerbProcessor {
    params: Arc<ParamSet>,
    size: ParamKey,
    damping: ParamKey,
    shimmer: ParamKey,
    mix: ParamKey,
    meter: MeterProducer,
}

/// Snapshot of the values the eventual reverb will consume, read once per
/// block on the real-time path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbControls {
    pub size_s: f64,
    pub damping_pct: f64,
    pub shimmer_pct: f64,
    pub mix_pct: f64,
}

impl LushVerbProcessor {
    pub fn new(meter: MeterProducer) -> Result<Self, ParamSetError> {
        let params = Arc::new(parameter_layout()?);
        let key = |id: &'static str| {
            params
                .key(id)
                .ok_or_else(|| ParamSetError::UnknownId(id.to_string()))
        };
        Ok(Self {
            size: key("SIZE")?,
            damping: key("DAMPING")?,
            shimmer: key("SHIMMER")?,
            mix: key("MIX")?,
            params,
            meter,
        })
    }

    /// Read all controls with relaxed atomic loads.
    #[inline]
    pub fn controls(&self) -> ReverbControls {
        ReverbControls {
            size_s: self.params.get(self.size),
            damping_pct: self.params.get(self.damping),
            shimmer_pct: self.params.get(self.shimmer),
            mix_pct: self.params.get(self.mix),
        }
    }
}

impl AudioProcessor for LushVerbProcessor {
    fn params(&self) -> &Arc<ParamSet> {
        &self.params
    }

    fn process(&mut self, buffer: &mut AudioBuffer) {
        // Pass-through placeholder: the reverb lands in a later milestone.
        // Controls are read here so the real-time path the DSP will use is
        // exercised end to end.
        let _controls = self.controls();

        // Output level for the VU meter, once per block, latest-value-wins.
        self.meter.publish(buffer.peak());
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
    ResourceEntry {
        path: "/js/tether/check_native_interop.js",
        body: include_bytes!("../assets/js/tether/check_native_interop.js"),
        mime: MimeType::Script,
    },
];

/// Router over the embedded LushVerb UI bundle.
pub static RESOURCES: ResourceRouter = ResourceRouter::new(UI_BUNDLE);

/// Editor construction failure.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error("cannot start UI refresh: {0}")]
    Refresh(#[from] std::io::Error),
}

/// Control-domain wiring for the LushVerb surface: one bridge per knob and
/// the 60 Hz meter refresh.
///
/// Create after the UI surface exists; [`close`](Self::close) (or drop)
/// stops the refresh timer before anything else is torn down.
pub struct LushVerbEditor {
    bridges: Vec<(&'static str, ParamBridge)>,
    refresh: Option<RefreshLoop>,
}

impl LushVerbEditor {
    /// Bind all four controls and start the meter refresh.
    ///
    /// `controls` maps parameter ids to their UI-side transports; ids not in
    /// the layout fail the whole open.
    pub fn open(
        params: Arc<ParamSet>,
        meter: MeterConsumer,
        surface: Box<dyn UiSurface>,
        controls: Vec<(&'static str, Box<dyn ControlTransport>)>,
    ) -> Result<Self, EditorError> {
        let mut bridges = Vec::with_capacity(controls.len());
        for (id, transport) in controls {
            bridges.push((id, ParamBridge::bind(params.clone(), id, transport)?));
        }
        let refresh = RefreshLoop::start(meter, surface)?;
        log::debug!("LushVerb editor opened ({} controls)", bridges.len());
        Ok(Self {
            bridges,
            refresh: Some(refresh),
        })
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

    /// Stop the refresh timer, then drop the bridges. Call before tearing
    /// down the surface or the parameter set.
    pub fn close(&mut self) {
        if let Some(mut refresh) = self.refresh.take() {
            refresh.stop();
        }
        self.bridges.clear();
    }
}

impl Drop for LushVerbEditor {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tether_core::{meter_channel, SurfaceNotReady};

    #[test]
    fn test_layout_builds() {
        let set = parameter_layout().unwrap();
        assert_eq!(set.len(), 4);
        for id in ["SIZE", "DAMPING", "SHIMMER", "MIX"] {
            assert!(set.key(id).is_some(), "missing {id}");
        }
    }

    #[test]
    fn test_size_text_round_trip() {
        let set = parameter_layout().unwrap();
        let size = set.key("SIZE").unwrap();
        assert_eq!(set.value_to_text(size, 2.5), "2.5s");
        assert_eq!(set.text_to_value(size, "2.5s").unwrap(), 2.5);
    }

    #[test]
    fn test_damping_text_round_trip() {
        let set = parameter_layout().unwrap();
        let damping = set.key("DAMPING").unwrap();
        assert_eq!(set.value_to_text(damping, 30.0), "30%");
        assert_eq!(set.text_to_value(damping, "30%").unwrap(), 30.0);
    }

    #[test]
    fn test_size_skew_round_trip() {
        let set = parameter_layout().unwrap();
        let size = set.key("SIZE").unwrap();
        for v in [0.5, 1.0, 2.5, 7.3, 20.0] {
            let n = set.plain_to_normalized(size, v);
            assert!(
                (set.normalized_to_plain(size, n) - v).abs() <= 1e-5,
                "v={v}"
            );
        }
    }

    #[test]
    fn test_unparseable_text_keeps_value() {
        let set = parameter_layout().unwrap();
        let size = set.key("SIZE").unwrap();
        set.set(size, 4.0);
        assert!(set.set_from_text(size, "forever").is_err());
        assert_eq!(set.get(size), 4.0);
    }

    #[test]
    fn test_process_publishes_block_peak() {
        let (tx, rx) = meter_channel();
        let mut processor = LushVerbProcessor::new(tx).unwrap();
        processor.prepare(48_000.0, 256);

        let mut left = [0.1f32, -0.7, 0.2];
        let mut right = [0.05f32, 0.3, -0.4];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        let mut buffer = AudioBuffer::new(&mut channels);
        processor.process(&mut buffer);

        // Audio untouched, peak published.
        assert_eq!(buffer.channel(0), &[0.1, -0.7, 0.2]);
        assert!((rx.level() - 0.7).abs() < 1e-7);
    }

    #[test]
    fn test_state_round_trip_across_processors() {
        let (tx, _rx) = meter_channel();
        let mut processor = LushVerbProcessor::new(tx).unwrap();
        let size = processor.params().key("SIZE").unwrap();
        processor.params().set(size, 12.5);
        let bytes = processor.save_state();

        let (tx2, _rx2) = meter_channel();
        let mut fresh = LushVerbProcessor::new(tx2).unwrap();
        fresh.load_state(&bytes).unwrap();
        assert_eq!(fresh.controls().size_s, 12.5);
        // Unset parameters restored to their snapshot values (defaults here).
        assert_eq!(fresh.controls().mix_pct, 30.0);
    }

    #[test]
    fn test_ui_bundle_routing() {
        let root = RESOURCES.resolve("/").unwrap();
        assert_eq!(root, RESOURCES.resolve("/index.html").unwrap());
        assert_eq!(root.mime, MimeType::Markup);
        for script in ["/js/tether/index.js", "/js/tether/check_native_interop.js"] {
            assert_eq!(RESOURCES.resolve(script).unwrap().mime, MimeType::Script);
        }
        assert!(RESOURCES.resolve("/js/tether").is_none());
    }

    struct Probe(Rc<RefCell<Vec<f64>>>);

    impl ControlTransport for Probe {
        fn push_value(&self, value: f64) {
            self.0.borrow_mut().push(value);
        }
    }

    struct NullSurface;

    impl UiSurface for NullSurface {
        fn update_meter_db(&self, _db: f64) -> Result<(), SurfaceNotReady> {
            Err(SurfaceNotReady)
        }
    }

    #[test]
    fn test_editor_open_bind_and_close() {
        let (_tx, rx) = meter_channel();
        let params = Arc::new(parameter_layout().unwrap());
        let pushed = Rc::new(RefCell::new(Vec::new()));
        let mut editor = LushVerbEditor::open(
            params.clone(),
            rx,
            Box::new(NullSurface),
            vec![("SIZE", Box::new(Probe(pushed.clone())))],
        )
        .unwrap();

        editor.control_changed("SIZE", 40.0); // clamped to 20.0
        let size = params.key("SIZE").unwrap();
        assert_eq!(params.get(size), 20.0);
        editor.sync_controls();
        // Initial bind push only; the control's own input is not echoed.
        assert_eq!(*pushed.borrow(), vec![2.5]);

        editor.close();
        editor.close(); // idempotent
    }

    #[test]
    fn test_editor_rejects_unknown_control() {
        let (_tx, rx) = meter_channel();
        let params = Arc::new(parameter_layout().unwrap());
        let result = LushVerbEditor::open(
            params,
            rx,
            Box::new(NullSurface),
            vec![("FEEDBACK", Box::new(Probe(Rc::new(RefCell::new(Vec::new())))))],
        );
        assert!(matches!(result, Err(EditorError::Bind(_))));
    }
}
