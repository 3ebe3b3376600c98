//! Per-block glue between the parameter store and the engine.
//!
//! Each block is processed with the parameters pushed at the end of the
//! previous block, and only then are the store's current values read and
//! handed to the engine. A control change therefore becomes audible one block
//! after it is made; the engine's 10 ms ramps start from there.

use sala_core::{AudioBlock, Effect, ProcessSpec};
use tracing::debug;

use crate::params::ReverbParams;
use crate::reverb::{Reverb, ReverbParameters};

/// Drives a [`Reverb`] from a [`ReverbParams`] store.
///
/// Borrows the store; the plugin instance owns it.
///
/// # Example
///
/// ```rust
/// use sala_core::{AudioBlock, Effect, ProcessSpec};
/// use sala_reverb::{ReverbBridge, ReverbParams};
///
/// let params = ReverbParams::default();
/// let mut bridge = ReverbBridge::new(&params);
/// bridge.prepare(&ProcessSpec::new(44100.0, 64, 1));
///
/// params.mix.set(0.0);
/// let mut mono = [0.5f32; 64];
/// let mut channels: [&mut [f32]; 1] = [&mut mono];
/// bridge.process(&mut AudioBlock::new(&mut channels));
///
/// // The change is picked up after the block.
/// assert_eq!(bridge.parameters().dry_level, 1.0);
/// ```
#[derive(Debug)]
pub struct ReverbBridge<'a> {
    params: &'a ReverbParams,
    engine: Reverb,
    parameters: ReverbParameters,
    max_block_size: usize,
}

impl<'a> ReverbBridge<'a> {
    /// Create a bridge over `params` with an engine prepared for 44.1 kHz.
    pub fn new(params: &'a ReverbParams) -> Self {
        let engine = Reverb::new();
        let parameters = engine.parameters();
        Self {
            params,
            engine,
            parameters,
            max_block_size: 0,
        }
    }

    /// The parameter struct most recently handed to the engine.
    pub fn parameters(&self) -> ReverbParameters {
        self.parameters
    }

    /// The driven engine.
    pub fn engine(&self) -> &Reverb {
        &self.engine
    }

    /// Read the store and push it into the engine.
    fn update(&mut self) {
        self.parameters = self.params.snapshot().to_parameters();
        self.engine.set_parameters(&self.parameters);
    }
}

impl Effect for ReverbBridge<'_> {
    fn prepare(&mut self, spec: &ProcessSpec) {
        // Push the store first so prepare snaps the engine's ramps onto it.
        self.update();
        self.engine.prepare(spec);
        self.max_block_size = spec.maximum_block_size as usize;
        debug!(
            sample_rate = spec.sample_rate,
            max_block_size = spec.maximum_block_size,
            channels = spec.num_channels,
            "reverb prepared"
        );
    }

    fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
        if matches!(block.num_channels(), 1 | 2) {
            let engine = &mut self.engine;
            block.for_each_chunk(self.max_block_size, |channels| {
                engine.process_channels(channels);
            });
        }
        self.update();
    }

    fn reset(&mut self) {
        self.engine.reset();
    }
}
