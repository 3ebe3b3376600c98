//! Freeverb-style stereo reverb.
//!
//! Eight parallel damped combs feed four series allpasses, once per channel.
//! The right channel's delay lines are slightly longer than the left's, which
//! decorrelates the two tails. Damping, feedback and the output gains follow
//! their targets through 10 ms linear ramps so automation never clicks.

use sala_core::{
    AllpassFilter, AudioBlock, CombFilter, Effect, LinearSmoothedParam, ProcessSpec,
};

/// Comb delay times in samples at the 44.1 kHz reference rate.
const COMB_TUNINGS: [usize; NUM_COMBS] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Allpass delay times in samples at the 44.1 kHz reference rate.
const ALLPASS_TUNINGS: [usize; NUM_ALLPASSES] = [556, 441, 341, 225];

const NUM_COMBS: usize = 8;
const NUM_ALLPASSES: usize = 4;

/// Extra delay added to every right-channel line.
const STEREO_SPREAD: usize = 23;

const REFERENCE_RATE: usize = 44_100;

/// Input gain into the comb bank while not frozen.
const FIXED_GAIN: f32 = 0.015;
const WET_SCALE: f32 = 3.0;
const DRY_SCALE: f32 = 2.0;
const ROOM_SCALE: f32 = 0.28;
const ROOM_OFFSET: f32 = 0.7;
const DAMP_SCALE: f32 = 0.4;

/// Ramp length of every smoothed value, in milliseconds.
const SMOOTHING_MS: f32 = 10.0;

/// Plain parameter set the engine consumes.
///
/// All fields are nominally 0–1. `freeze_mode` counts as on from 0.5 upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParameters {
    /// Room size; longer decay towards 1.
    pub room_size: f32,
    /// High-frequency absorption; darker towards 1.
    pub damping: f32,
    /// Reverb signal level.
    pub wet_level: f32,
    /// Direct signal level.
    pub dry_level: f32,
    /// Stereo width of the tail; 0 is mono.
    pub width: f32,
    /// Infinite sustain; new input is ignored while on.
    pub freeze_mode: f32,
}

impl Default for ReverbParameters {
    fn default() -> Self {
        Self {
            room_size: 0.5,
            damping: 0.5,
            wet_level: 0.33,
            dry_level: 0.4,
            width: 1.0,
            freeze_mode: 0.0,
        }
    }
}

impl ReverbParameters {
    /// Whether these parameters put the engine in freeze mode.
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.freeze_mode >= 0.5
    }
}

/// Delay length for a tuning at the given integer rate.
fn scaled_length(sample_rate: usize, tuning: usize) -> usize {
    sample_rate * tuning / REFERENCE_RATE
}

/// Freeverb-style stereo reverb.
///
/// # Example
///
/// ```rust
/// use sala_core::{Effect, ProcessSpec};
/// use sala_reverb::{Reverb, ReverbParameters};
///
/// let mut reverb = Reverb::new();
/// reverb.prepare(&ProcessSpec::new(48000.0, 512, 2));
/// reverb.set_parameters(&ReverbParameters { room_size: 0.8, ..Default::default() });
///
/// let mut left = [0.0f32; 512];
/// let mut right = [0.0f32; 512];
/// left[0] = 1.0;
/// reverb.process_stereo(&mut left, &mut right);
/// ```
#[derive(Debug, Clone)]
pub struct Reverb {
    combs: [[CombFilter; NUM_COMBS]; 2],
    allpasses: [[AllpassFilter; NUM_ALLPASSES]; 2],
    parameters: ReverbParameters,
    sample_rate: f64,
    gain: f32,
    damping: LinearSmoothedParam,
    feedback: LinearSmoothedParam,
    dry_gain: LinearSmoothedParam,
    wet_gain1: LinearSmoothedParam,
    wet_gain2: LinearSmoothedParam,
}

impl Reverb {
    /// Create a reverb with default parameters, prepared for 44.1 kHz.
    pub fn new() -> Self {
        let mut reverb = Self {
            combs: core::array::from_fn(|_| core::array::from_fn(|_| CombFilter::new(1))),
            allpasses: core::array::from_fn(|_| core::array::from_fn(|_| AllpassFilter::new(1))),
            parameters: ReverbParameters::default(),
            sample_rate: 0.0,
            gain: 0.0,
            damping: LinearSmoothedParam::default(),
            feedback: LinearSmoothedParam::default(),
            dry_gain: LinearSmoothedParam::default(),
            wet_gain1: LinearSmoothedParam::default(),
            wet_gain2: LinearSmoothedParam::default(),
        };
        reverb.set_parameters(&ReverbParameters::default());
        reverb.set_sample_rate(REFERENCE_RATE as f64);
        reverb
    }

    /// The parameters most recently handed to [`set_parameters`](Self::set_parameters).
    pub fn parameters(&self) -> ReverbParameters {
        self.parameters
    }

    /// Sample rate the delay lines are currently sized for.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Apply a new parameter set.
    ///
    /// Gains, damping and feedback ramp to their new targets; the input gain
    /// switches at once. Allocation-free.
    pub fn set_parameters(&mut self, parameters: &ReverbParameters) {
        let wet = parameters.wet_level * WET_SCALE;
        self.dry_gain.set_target(parameters.dry_level * DRY_SCALE);
        self.wet_gain1.set_target(0.5 * wet * (1.0 + parameters.width));
        self.wet_gain2.set_target(0.5 * wet * (1.0 - parameters.width));

        self.gain = if parameters.is_frozen() { 0.0 } else { FIXED_GAIN };
        self.parameters = *parameters;
        self.update_damping();
    }

    fn update_damping(&mut self) {
        let (damping, feedback) = if self.parameters.is_frozen() {
            (0.0, 1.0)
        } else {
            (
                self.parameters.damping * DAMP_SCALE,
                self.parameters.room_size * ROOM_SCALE + ROOM_OFFSET,
            )
        };
        self.damping.set_target(damping);
        self.feedback.set_target(feedback);
    }

    /// Resize every delay line for `sample_rate` and snap the smoothers.
    ///
    /// Allocates; call off the audio thread.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        let rate = sample_rate.max(0.0) as usize;

        for (i, &tuning) in COMB_TUNINGS.iter().enumerate() {
            self.combs[0][i].set_size(scaled_length(rate, tuning));
            self.combs[1][i].set_size(scaled_length(rate, tuning + STEREO_SPREAD));
        }
        for (i, &tuning) in ALLPASS_TUNINGS.iter().enumerate() {
            self.allpasses[0][i].set_size(scaled_length(rate, tuning));
            self.allpasses[1][i].set_size(scaled_length(rate, tuning + STEREO_SPREAD));
        }

        let sr = sample_rate as f32;
        for smoother in [
            &mut self.damping,
            &mut self.feedback,
            &mut self.dry_gain,
            &mut self.wet_gain1,
            &mut self.wet_gain2,
        ] {
            smoother.reset(sr, SMOOTHING_MS);
        }
        self.sample_rate = sample_rate;
    }

    /// Process two linked channels in place.
    ///
    /// Both channels are read for the reverb input; the shorter length wins.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        let [combs_l, combs_r] = &mut self.combs;
        let [allpasses_l, allpasses_r] = &mut self.allpasses;

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let input = (*l + *r) * self.gain;
            let damp = self.damping.advance();
            let feedback = self.feedback.advance();

            let mut out_l = 0.0;
            let mut out_r = 0.0;
            for (comb_l, comb_r) in combs_l.iter_mut().zip(combs_r.iter_mut()) {
                out_l += comb_l.process(input, damp, feedback);
                out_r += comb_r.process(input, damp, feedback);
            }
            for (ap_l, ap_r) in allpasses_l.iter_mut().zip(allpasses_r.iter_mut()) {
                out_l = ap_l.process(out_l);
                out_r = ap_r.process(out_r);
            }

            let dry = self.dry_gain.advance();
            let wet1 = self.wet_gain1.advance();
            let wet2 = self.wet_gain2.advance();

            *l = out_l * wet1 + out_r * wet2 + *l * dry;
            *r = out_r * wet1 + out_l * wet2 + *r * dry;
        }
    }

    /// Process a single channel in place through the left-hand network.
    pub fn process_mono(&mut self, samples: &mut [f32]) {
        for s in samples.iter_mut() {
            let input = *s * self.gain;
            let damp = self.damping.advance();
            let feedback = self.feedback.advance();

            let mut out = 0.0;
            for comb in &mut self.combs[0] {
                out += comb.process(input, damp, feedback);
            }
            for allpass in &mut self.allpasses[0] {
                out = allpass.process(out);
            }

            let dry = self.dry_gain.advance();
            let wet1 = self.wet_gain1.advance();
            *s = out * wet1 + *s * dry;
        }
    }

    /// Process a one- or two-channel slice set; other widths are left alone.
    pub fn process_channels(&mut self, channels: &mut [&mut [f32]]) {
        match channels {
            [mono] => self.process_mono(mono),
            [left, right] => self.process_stereo(left, right),
            _ => {}
        }
    }

    /// Delay lengths per channel, left then right. Used by tests and tooling.
    pub fn comb_lengths(&self) -> [[usize; NUM_COMBS]; 2] {
        core::array::from_fn(|ch| core::array::from_fn(|i| self.combs[ch][i].capacity()))
    }
}

impl Default for Reverb {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Reverb {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.set_sample_rate(spec.sample_rate);
        self.reset();
    }

    fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
        if let Some((left, right)) = block.stereo_mut() {
            self.process_stereo(left, right);
        } else if block.num_channels() == 1 {
            if let Some(mono) = block.channel_mut(0) {
                self.process_mono(mono);
            }
        }
    }

    fn reset(&mut self) {
        for comb in self.combs.iter_mut().flatten() {
            comb.clear();
        }
        for allpass in self.allpasses.iter_mut().flatten() {
            allpass.clear();
        }
    }
}
