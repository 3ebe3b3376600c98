//! Core Effect trait.
//!
//! The [`Effect`] trait is the seam between DSP code and whatever drives it:
//! the CLAP audio processor, the offline renderer, or a test.
//!
//! ## Design Decisions
//!
//! - **Block-based, multichannel**: effects see a whole [`AudioBlock`] so
//!   stereo-linked algorithms (like a reverb whose channels cross-feed) can
//!   process both channels in one pass.
//!
//! - **Prepare before process**: [`Effect::prepare`] is the only place an
//!   effect may allocate. Hosts call it again whenever the stream changes.
//!
//! - **Object-safe**: `dyn Effect` works for runtime selection, but generic
//!   dispatch is preferred on the audio path.

use crate::block::{AudioBlock, ProcessSpec};

/// Core trait for all audio effects.
///
/// # Example
///
/// ```rust
/// use sala_core::{AudioBlock, Effect, ProcessSpec};
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn prepare(&mut self, _spec: &ProcessSpec) {
///         // Gain has no buffers to size
///     }
///
///     fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
///         for ch in 0..block.num_channels() {
///             if let Some(samples) = block.channel_mut(ch) {
///                 for s in samples.iter_mut() {
///                     *s *= self.gain;
///                 }
///             }
///         }
///     }
///
///     fn reset(&mut self) {
///         // Gain has no internal state to reset
///     }
/// }
/// ```
pub trait Effect {
    /// Configure for a new stream.
    ///
    /// Called before the first block and whenever sample rate, maximum block
    /// size or channel count change. May allocate; never called from the
    /// real-time path.
    fn prepare(&mut self, spec: &ProcessSpec);

    /// Process one block in place.
    ///
    /// Must not allocate, lock or block.
    fn process(&mut self, block: &mut AudioBlock<'_, '_>);

    /// Reset internal state.
    ///
    /// Clears all internal state (delay lines, filter history, etc.)
    /// without changing parameters.
    fn reset(&mut self);

    /// Report processing latency in samples.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}
