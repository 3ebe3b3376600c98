//! Thread-safe shared state for the sala CLAP plugin.
//!
//! `SalaShared` lives for the lifetime of the plugin instance and is read by
//! both the main thread (params, state) and the audio thread (processing).
//! It owns the [`ReverbParams`] store; every value is an atomic, so neither
//! side ever locks.

use sala_core::ParamDescriptor;
use sala_reverb::{ReverbParams, ReverbSettings, StateError, load_state, save_state};

/// Shared state accessible from all plugin threads.
pub struct SalaShared {
    params: ReverbParams,
}

impl SalaShared {
    /// Create shared state with every parameter at its default.
    pub fn new() -> Self {
        Self {
            params: ReverbParams::new(),
        }
    }

    /// The parameter store the audio processor's bridge reads from.
    pub fn params(&self) -> &ReverbParams {
        &self.params
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        self.params.param_count()
    }

    /// Get parameter descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        self.params.descriptor(index)
    }

    /// All parameter descriptors.
    pub fn descriptors(&self) -> &'static [ParamDescriptor] {
        self.params.descriptors()
    }

    /// Find parameter index by stable `ParamId`.
    pub fn index_by_id(&self, id: u32) -> Option<usize> {
        self.params.index_by_id(id)
    }

    /// Read the current value of a parameter (lock-free).
    pub fn get_value(&self, index: usize) -> Option<f32> {
        self.params.get_value(index)
    }

    /// Write a parameter value (lock-free). Clamps to descriptor bounds.
    pub fn set_value(&self, index: usize, value: f32) {
        self.params.set_value(index, value);
    }

    /// Write a value addressed by stable id. Unknown ids are ignored.
    pub fn set_value_by_id(&self, id: u32, value: f32) {
        if let Some(index) = self.index_by_id(id) {
            self.set_value(index, value);
        }
    }

    /// Snapshot of all five controls.
    pub fn settings(&self) -> ReverbSettings {
        self.params.snapshot()
    }

    /// Serialize the current values as the plugin's state blob.
    pub fn save_state(&self) -> Result<Vec<u8>, StateError> {
        save_state(&self.params)
    }

    /// Restore values from a state blob. Returns how many were applied.
    pub fn load_state(&self, bytes: &[u8]) -> Result<usize, StateError> {
        load_state(&self.params, bytes)
    }
}

impl Default for SalaShared {
    fn default() -> Self {
        Self::new()
    }
}

impl clack_plugin::prelude::PluginShared<'_> for SalaShared {}
