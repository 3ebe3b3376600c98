//! The five user-facing reverb controls.
//!
//! [`ReverbParams`] lives for the lifetime of a plugin instance and is shared
//! between the host's main thread (automation, state) and the audio thread
//! (the bridge). Values are stored in atomics, so reads never block and
//! writers clamp into range before publishing.

use std::sync::atomic::{AtomicBool, Ordering};

use sala_core::{AtomicF32, ParamDescriptor, ParamId};

use crate::reverb::ReverbParameters;

/// Stable id of the room size control.
pub const SIZE_ID: ParamId = ParamId(1500);
/// Stable id of the damping control.
pub const DAMP_ID: ParamId = ParamId(1501);
/// Stable id of the stereo width control.
pub const WIDTH_ID: ParamId = ParamId(1502);
/// Stable id of the wet/dry mix control.
pub const MIX_ID: ParamId = ParamId(1503);
/// Stable id of the freeze toggle.
pub const FREEZE_ID: ParamId = ParamId(1504);

const PARAM_COUNT: usize = 5;

static DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::unit_float("Size", "Size", 0.5).with_id(SIZE_ID, "size"),
    ParamDescriptor::unit_float("Damp", "Damp", 0.5).with_id(DAMP_ID, "damp"),
    ParamDescriptor::unit_float("Width", "Width", 0.5).with_id(WIDTH_ID, "width"),
    ParamDescriptor::unit_float("Mix", "Mix", 0.5).with_id(MIX_ID, "mix"),
    ParamDescriptor::toggle("Freeze", "Freeze", false).with_id(FREEZE_ID, "freeze"),
];

/// A bounded float control.
#[derive(Debug)]
pub struct FloatParam {
    descriptor: &'static ParamDescriptor,
    value: AtomicF32,
}

impl FloatParam {
    fn new(descriptor: &'static ParamDescriptor) -> Self {
        Self {
            descriptor,
            value: AtomicF32::new(descriptor.default),
        }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.value.load(Ordering::Acquire)
    }

    /// Store a new value, clamped to the descriptor range.
    #[inline]
    pub fn set(&self, value: f32) {
        self.value
            .store(self.descriptor.clamp(value), Ordering::Release);
    }

    /// Metadata for this control.
    pub fn descriptor(&self) -> &'static ParamDescriptor {
        self.descriptor
    }
}

/// An on/off control.
#[derive(Debug)]
pub struct BoolParam {
    descriptor: &'static ParamDescriptor,
    value: AtomicBool,
}

impl BoolParam {
    fn new(descriptor: &'static ParamDescriptor) -> Self {
        Self {
            descriptor,
            value: AtomicBool::new(descriptor.default >= 0.5),
        }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> bool {
        self.value.load(Ordering::Acquire)
    }

    /// Store a new value.
    #[inline]
    pub fn set(&self, value: bool) {
        self.value.store(value, Ordering::Release);
    }

    /// Metadata for this control.
    pub fn descriptor(&self) -> &'static ParamDescriptor {
        self.descriptor
    }
}

/// Plain copy of all five controls at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbSettings {
    /// Room size, 0–1.
    pub size: f32,
    /// Damping, 0–1.
    pub damp: f32,
    /// Stereo width, 0–1.
    pub width: f32,
    /// Wet/dry mix, 0 (dry) to 1 (wet).
    pub mix: f32,
    /// Freeze toggle.
    pub freeze: bool,
}

impl Default for ReverbSettings {
    fn default() -> Self {
        Self {
            size: 0.5,
            damp: 0.5,
            width: 0.5,
            mix: 0.5,
            freeze: false,
        }
    }
}

impl ReverbSettings {
    /// Map the controls onto the engine's parameter struct.
    ///
    /// `mix` splits into `wet_level = mix` and `dry_level = 1 - mix`.
    pub fn to_parameters(&self) -> ReverbParameters {
        ReverbParameters {
            room_size: self.size,
            damping: self.damp,
            wet_level: self.mix,
            dry_level: 1.0 - self.mix,
            width: self.width,
            freeze_mode: if self.freeze { 1.0 } else { 0.0 },
        }
    }
}

/// Lock-free store for the reverb's controls.
///
/// # Example
///
/// ```rust
/// use sala_reverb::ReverbParams;
///
/// let params = ReverbParams::default();
/// params.mix.set(1.5);
/// assert_eq!(params.mix.get(), 1.0);
///
/// let index = params.index_by_id(1504).unwrap();
/// params.set_value(index, 1.0);
/// assert!(params.freeze.get());
/// ```
#[derive(Debug)]
pub struct ReverbParams {
    /// Room size.
    pub size: FloatParam,
    /// Damping.
    pub damp: FloatParam,
    /// Stereo width.
    pub width: FloatParam,
    /// Wet/dry mix.
    pub mix: FloatParam,
    /// Freeze.
    pub freeze: BoolParam,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ReverbParams {
    /// Create a store with every control at its default.
    pub fn new() -> Self {
        Self {
            size: FloatParam::new(&DESCRIPTORS[0]),
            damp: FloatParam::new(&DESCRIPTORS[1]),
            width: FloatParam::new(&DESCRIPTORS[2]),
            mix: FloatParam::new(&DESCRIPTORS[3]),
            freeze: BoolParam::new(&DESCRIPTORS[4]),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    /// All parameter descriptors, in index order.
    pub fn descriptors(&self) -> &'static [ParamDescriptor] {
        &DESCRIPTORS
    }

    /// Get parameter descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        DESCRIPTORS.get(index)
    }

    /// Find parameter index by stable id.
    pub fn index_by_id(&self, id: u32) -> Option<usize> {
        DESCRIPTORS.iter().position(|d| d.id.0 == id)
    }

    /// Find parameter index by string id (`"size"`, `"freeze"`, ...).
    pub fn index_by_name(&self, string_id: &str) -> Option<usize> {
        DESCRIPTORS.iter().position(|d| d.string_id == string_id)
    }

    /// Read a parameter as a plain float. Freeze reads as 0.0 or 1.0.
    pub fn get_value(&self, index: usize) -> Option<f32> {
        match index {
            0 => Some(self.size.get()),
            1 => Some(self.damp.get()),
            2 => Some(self.width.get()),
            3 => Some(self.mix.get()),
            4 => Some(if self.freeze.get() { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Write a parameter from a plain float, clamping to its range.
    ///
    /// Freeze turns on from 0.5 upward. Out-of-range indices are ignored.
    pub fn set_value(&self, index: usize, value: f32) {
        match index {
            0 => self.size.set(value),
            1 => self.damp.set(value),
            2 => self.width.set(value),
            3 => self.mix.set(value),
            4 => self.freeze.set(DESCRIPTORS[4].clamp(value) >= 0.5),
            _ => {}
        }
    }

    /// Read all controls at once.
    pub fn snapshot(&self) -> ReverbSettings {
        ReverbSettings {
            size: self.size.get(),
            damp: self.damp.get(),
            width: self.width.get(),
            mix: self.mix.get(),
            freeze: self.freeze.get(),
        }
    }

    /// Write all controls at once, clamping each.
    pub fn apply(&self, settings: &ReverbSettings) {
        self.size.set(settings.size);
        self.damp.set(settings.damp);
        self.width.set(settings.width);
        self.mix.set(settings.mix);
        self.freeze.set(settings.freeze);
    }

    /// Put every control back to its default.
    pub fn reset_to_defaults(&self) {
        for (index, desc) in DESCRIPTORS.iter().enumerate() {
            self.set_value(index, desc.default);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_descriptors() {
        let params = ReverbParams::default();
        for (i, desc) in params.descriptors().iter().enumerate() {
            let val = params.get_value(i).unwrap();
            assert_eq!(
                val, desc.default,
                "param {i} ({}) default mismatch: got {val}, expected {}",
                desc.name, desc.default
            );
        }
        assert_eq!(params.snapshot(), ReverbSettings::default());
    }

    #[test]
    fn set_value_clamps() {
        let params = ReverbParams::default();
        params.set_value(0, 5.0);
        assert_eq!(params.size.get(), 1.0);
        params.set_value(3, -2.0);
        assert_eq!(params.mix.get(), 0.0);
        params.set_value(1, f32::NAN);
        assert_eq!(params.damp.get(), 0.5);
    }

    #[test]
    fn freeze_threshold() {
        let params = ReverbParams::default();
        params.set_value(4, 0.49);
        assert!(!params.freeze.get());
        params.set_value(4, 0.5);
        assert!(params.freeze.get());
        assert_eq!(params.get_value(4), Some(1.0));
        params.set_value(4, f32::NAN);
        assert!(!params.freeze.get());
    }

    #[test]
    fn index_lookup() {
        let params = ReverbParams::default();
        assert_eq!(params.index_by_id(1500), Some(0));
        assert_eq!(params.index_by_id(1504), Some(4));
        assert_eq!(params.index_by_id(999), None);
        assert_eq!(params.index_by_name("width"), Some(2));
        assert_eq!(params.index_by_name("dump"), None);
        for (i, desc) in params.descriptors().iter().enumerate() {
            assert_eq!(params.index_by_id(desc.id.0), Some(i));
        }
    }

    #[test]
    fn out_of_range_safe() {
        let params = ReverbParams::default();
        assert_eq!(params.get_value(99), None);
        assert_eq!(params.descriptor(99), None);
        params.set_value(99, 1.0);
        assert_eq!(params.snapshot(), ReverbSettings::default());
    }

    #[test]
    fn apply_and_reset() {
        let params = ReverbParams::default();
        let settings = ReverbSettings {
            size: 0.9,
            damp: 0.1,
            width: 1.0,
            mix: 0.25,
            freeze: true,
        };
        params.apply(&settings);
        assert_eq!(params.snapshot(), settings);

        params.reset_to_defaults();
        assert_eq!(params.snapshot(), ReverbSettings::default());
    }

    #[test]
    fn settings_map_to_engine_parameters() {
        let p = ReverbSettings {
            size: 0.8,
            damp: 0.3,
            width: 0.7,
            mix: 0.25,
            freeze: true,
        }
        .to_parameters();
        assert_eq!(p.room_size, 0.8);
        assert_eq!(p.damping, 0.3);
        assert_eq!(p.width, 0.7);
        assert_eq!(p.wet_level, 0.25);
        assert_eq!(p.dry_level, 0.75);
        assert!(p.is_frozen());
    }

    #[test]
    fn store_is_shareable_across_threads() {
        let params = std::sync::Arc::new(ReverbParams::default());
        let writer = {
            let params = std::sync::Arc::clone(&params);
            std::thread::spawn(move || {
                for i in 0..1000 {
                    params.mix.set(i as f32 / 1000.0);
                }
            })
        };
        for _ in 0..1000 {
            let mix = params.mix.get();
            assert!((0.0..=1.0).contains(&mix));
        }
        writer.join().unwrap();
        assert_eq!(params.mix.get(), 0.999);
    }
}
