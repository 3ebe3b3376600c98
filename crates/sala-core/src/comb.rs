//! Comb filter for reverb algorithms.
//!
//! A feedback comb with a one-pole lowpass in the loop. Eight of these in
//! parallel per channel form the body of a Freeverb-style tail.

use alloc::vec;
use alloc::vec::Vec;

use crate::flush_denormal;

/// Comb filter with feedback and damping.
///
/// Damping and feedback are passed per sample so a caller can smooth them
/// across a block without the filter holding its own ramps.
///
/// # Example
///
/// ```rust
/// use sala_core::CombFilter;
///
/// let mut comb = CombFilter::new(1116);
/// let output = comb.process(1.0, 0.2, 0.84);
/// assert_eq!(output, 0.0); // nothing has come round the loop yet
/// ```
#[derive(Debug, Clone)]
pub struct CombFilter {
    buffer: Vec<f32>,
    index: usize,
    last: f32,
}

impl CombFilter {
    /// Create a comb with a delay of `size` samples (at least one).
    pub fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            index: 0,
            last: 0.0,
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
    ///
    /// `damp` is the lowpass coefficient in the loop (0 = bright),
    /// `feedback` the loop gain. Returns the delayed signal.
    #[inline]
    pub fn process(&mut self, input: f32, damp: f32, feedback: f32) -> f32 {
        let output = self.buffer[self.index];
        self.last = flush_denormal(output * (1.0 - damp) + self.last * damp);
        self.buffer[self.index] = flush_denormal(input + self.last * feedback);
        self.index += 1;
        if self.index >= self.buffer.len() {
            self.index = 0;
        }
        output
    }

    /// Clear the delay line and filter history.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.last = 0.0;
    }

    /// Delay length in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comb_basic() {
        let mut comb = CombFilter::new(100);

        let first = comb.process(1.0, 0.2, 0.5);
        assert_eq!(first, 0.0); // First output is from empty delay

        for _ in 0..99 {
            comb.process(0.0, 0.2, 0.5);
        }

        // The impulse comes out exactly one delay length later
        let echo = comb.process(0.0, 0.2, 0.5);
        assert_eq!(echo, 1.0);
    }

    #[test]
    fn test_comb_feedback_decay() {
        let mut comb = CombFilter::new(10);
        comb.process(1.0, 0.0, 0.8);

        let mut last_peak = 0.0f32;
        for _ in 0..200 {
            let out = comb.process(0.0, 0.0, 0.8);
            if out.abs() > 0.01 {
                if last_peak > 0.0 {
                    assert!(out.abs() <= last_peak + 1e-6, "Echo should decay");
                }
                last_peak = out.abs();
            }
        }
        assert!(last_peak < 0.2);
    }

    #[test]
    fn test_comb_unity_feedback_sustains() {
        let mut comb = CombFilter::new(8);
        comb.process(1.0, 0.0, 1.0);
        for _ in 0..(8 * 50 - 1) {
            comb.process(0.0, 0.0, 1.0);
        }
        assert_eq!(comb.process(0.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_comb_clear() {
        let mut comb = CombFilter::new(10);
        for _ in 0..20 {
            comb.process(1.0, 0.3, 0.8);
        }

        comb.clear();

        for _ in 0..20 {
            let out = comb.process(0.0, 0.3, 0.8);
            assert!(out.abs() < 1e-10, "Should be silent after clear");
        }
    }

    #[test]
    fn test_comb_damping() {
        let mut bright = CombFilter::new(20);
        let mut dark = CombFilter::new(20);

        bright.process(1.0, 0.0, 0.8);
        dark.process(1.0, 0.8, 0.8);

        let mut bright_sum = 0.0f32;
        let mut dark_sum = 0.0f32;
        for _ in 0..200 {
            bright_sum += bright.process(0.0, 0.0, 0.8).abs();
            dark_sum += dark.process(0.0, 0.8, 0.8).abs();
        }

        assert!(dark_sum < bright_sum, "Damping should remove energy");
    }

    #[test]
    fn test_comb_set_size() {
        let mut comb = CombFilter::new(10);
        comb.process(1.0, 0.0, 0.5);
        comb.set_size(25);
        assert_eq!(comb.capacity(), 25);
        for _ in 0..50 {
            assert_eq!(comb.process(0.0, 0.0, 0.5), 0.0);
        }

        comb.set_size(0);
        assert_eq!(comb.capacity(), 1);
    }

    #[test]
    fn test_comb_flushes_denormals() {
        let mut comb = CombFilter::new(4);
        comb.process(1e-30, 0.0, 0.5);
        for _ in 0..16 {
            let out = comb.process(0.0, 0.0, 0.5);
            assert_eq!(out, 0.0);
        }
    }
}
