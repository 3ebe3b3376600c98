//! Linear parameter smoothing for zipper-free changes.
//!
//! Gains and filter coefficients that follow host automation need smooth
//! transitions, otherwise every block boundary produces an audible step.
//! [`LinearSmoothedParam`] ramps at a constant rate so a change always lands
//! exactly after the configured time.
//!
//! ## Usage
//!
//! ```rust
//! use sala_core::LinearSmoothedParam;
//!
//! let mut gain = LinearSmoothedParam::with_config(1.0, 48000.0, 10.0);
//!
//! // Set new target - smoothing happens automatically
//! gain.set_target(0.5);
//!
//! // In audio callback, get smoothed value each sample
//! for _ in 0..480 { // 10ms at 48kHz
//!     let smoothed_gain = gain.advance();
//!     // Use smoothed_gain for processing...
//! }
//! assert!(gain.is_settled());
//! ```

/// Linear smoothed parameter.
///
/// Moves from the current value to the target in a fixed number of equal
/// steps. Setting the same target twice does not restart the ramp.
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    /// Current value
    current: f32,
    /// Target value
    target: f32,
    /// Increment per sample (can be positive or negative)
    increment: f32,
    /// Samples remaining until target reached
    samples_remaining: u32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Transition time in milliseconds
    transition_time_ms: f32,
}

impl LinearSmoothedParam {
    /// Create a new linear smoothed parameter.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate: 44100.0,
            transition_time_ms: 10.0,
        }
    }

    /// Create with full configuration.
    pub fn with_config(initial: f32, sample_rate: f32, transition_time_ms: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate,
            transition_time_ms,
        }
    }

    /// Reconfigure for a new stream and jump straight to the target.
    pub fn reset(&mut self, sample_rate: f32, transition_time_ms: f32) {
        self.sample_rate = sample_rate;
        self.transition_time_ms = transition_time_ms;
        self.snap_to_target();
    }

    /// Number of samples a full transition takes at the current settings.
    #[inline]
    pub fn ramp_samples(&self) -> u32 {
        (self.transition_time_ms / 1000.0 * self.sample_rate) as u32
    }

    /// Set the target value.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() < 1e-9 {
            return; // Same target, no change needed
        }

        self.target = target;

        let samples = self.ramp_samples();
        if samples == 0 {
            self.current = target;
            self.increment = 0.0;
            self.samples_remaining = 0;
        } else {
            self.increment = (target - self.current) / samples as f32;
            self.samples_remaining = samples;
        }
    }

    /// Set value immediately.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }

    /// Get next smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.increment;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                self.current = self.target; // Snap to exact target
            }
        }
        self.current
    }

    /// Get current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Check if transition is complete.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.samples_remaining == 0
    }

    /// Snap to target immediately.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }
}

impl Default for LinearSmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
