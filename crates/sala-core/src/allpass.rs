//! Allpass filter for reverb diffusion.
//!
//! A Schroeder allpass that smears the comb bank output into a dense tail
//! without colouring its spectrum much.

use alloc::vec;
use alloc::vec::Vec;

use crate::flush_denormal;

/// Loop gain of every diffuser.
const FEEDBACK: f32 = 0.5;

/// Schroeder allpass filter with a fixed 0.5 loop gain.
///
/// # Example
///
/// ```rust
/// use sala_core::AllpassFilter;
///
/// let mut allpass = AllpassFilter::new(556);
/// assert_eq!(allpass.process(1.0), -1.0);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    buffer: Vec<f32>,
    index: usize,
}

impl AllpassFilter {
    /// Create an allpass with a delay of `size` samples (at least one).
    pub fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            index: 0,
        }
    }

    /// Resize the delay line. Clears state; allocates.
    pub fn set_size(&mut self, size: usize) {
        let size = size.max(1);
        if size != self.buffer.len() {
            self.buffer = vec![0.0; size];
            self.index = 0;
        }
        self.clear();
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let buffered = self.buffer[self.index];
        self.buffer[self.index] = flush_denormal(input + buffered * FEEDBACK);
        self.index += 1;
        if self.index >= self.buffer.len() {
            self.index = 0;
        }
        buffered - input
    }

    /// Clear the delay line.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
    }

    /// Delay length in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
