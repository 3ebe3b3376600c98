//! Sala Reverb - the engine and everything that feeds it
//!
//! - [`Reverb`] - Freeverb-style stereo reverb implementing [`sala_core::Effect`]
//! - [`ReverbParameters`] - the engine's plain parameter struct
//! - [`ReverbParams`] - lock-free store for the five user-facing controls
//! - [`ReverbBridge`] - per-block glue: process, then push the controls into the engine
//! - [`BusLayout`] - which channel configurations the processor accepts
//! - [`save_state`] / [`load_state`] - JSON persistence keyed by stable parameter id
//!
//! ## Example
//!
//! ```rust
//! use sala_core::{AudioBlock, Effect, ProcessSpec};
//! use sala_reverb::{ReverbBridge, ReverbParams};
//!
//! let params = ReverbParams::default();
//! let mut bridge = ReverbBridge::new(&params);
//! bridge.prepare(&ProcessSpec::new(48000.0, 256, 2));
//!
//! params.size.set(0.9);
//!
//! let mut left = vec![0.0f32; 256];
//! let mut right = vec![0.0f32; 256];
//! left[0] = 1.0;
//! let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
//! bridge.process(&mut AudioBlock::new(&mut channels));
//! ```

pub mod bridge;
pub mod layout;
pub mod params;
pub mod reverb;
pub mod state;

pub use bridge::ReverbBridge;
pub use layout::{BusLayout, ChannelSet};
pub use params::{
    BoolParam, DAMP_ID, FREEZE_ID, FloatParam, MIX_ID, ReverbParams, ReverbSettings, SIZE_ID,
    WIDTH_ID,
};
pub use reverb::{Reverb, ReverbParameters};
pub use state::{StateError, load_state, read_state, save_state, write_state};
