//! Channel configurations the processor accepts.
//!
//! The reverb runs on a mono or stereo main bus and never changes the
//! channel count between input and output. A MIDI-effect build has no audio
//! path to protect and accepts anything.

use core::fmt;

/// Channel set of one bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSet {
    /// Bus not connected.
    Disabled,
    /// One channel.
    Mono,
    /// Left and right.
    Stereo,
    /// Any other channel count.
    Discrete(u32),
}

impl ChannelSet {
    /// Classify a raw channel count.
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => ChannelSet::Disabled,
            1 => ChannelSet::Mono,
            2 => ChannelSet::Stereo,
            n => ChannelSet::Discrete(n),
        }
    }

    /// Number of channels in the set.
    pub fn channel_count(self) -> u32 {
        match self {
            ChannelSet::Disabled => 0,
            ChannelSet::Mono => 1,
            ChannelSet::Stereo => 2,
            ChannelSet::Discrete(n) => n,
        }
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelSet::Disabled => f.write_str("disabled"),
            ChannelSet::Mono => f.write_str("mono"),
            ChannelSet::Stereo => f.write_str("stereo"),
            ChannelSet::Discrete(n) => write!(f, "{n} channels"),
        }
    }
}

/// Main input and output channel sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusLayout {
    /// Main input bus.
    pub input: ChannelSet,
    /// Main output bus.
    pub output: ChannelSet,
}

impl BusLayout {
    /// Layout with identical input and output sets.
    pub fn symmetric(set: ChannelSet) -> Self {
        Self {
            input: set,
            output: set,
        }
    }

    /// Layout from raw channel counts.
    pub fn from_counts(input: u32, output: u32) -> Self {
        Self {
            input: ChannelSet::from_count(input),
            output: ChannelSet::from_count(output),
        }
    }

    /// Whether the processor can run in this layout.
    ///
    /// Output must be mono or stereo and match the input exactly, unless the
    /// build is a MIDI effect.
    pub fn is_supported(&self, is_midi_effect: bool) -> bool {
        if is_midi_effect {
            return true;
        }
        matches!(self.output, ChannelSet::Mono | ChannelSet::Stereo) && self.input == self.output
    }
}

impl fmt::Display for BusLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in, {} out", self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matched_mono_and_stereo() {
        assert!(BusLayout::symmetric(ChannelSet::Mono).is_supported(false));
        assert!(BusLayout::symmetric(ChannelSet::Stereo).is_supported(false));
    }

    #[test]
    fn rejects_mismatched_sets() {
        assert!(!BusLayout::from_counts(1, 2).is_supported(false));
        assert!(!BusLayout::from_counts(2, 1).is_supported(false));
        assert!(!BusLayout::from_counts(0, 2).is_supported(false));
    }

    #[test]
    fn rejects_other_outputs() {
        assert!(!BusLayout::symmetric(ChannelSet::Disabled).is_supported(false));
        assert!(!BusLayout::symmetric(ChannelSet::Discrete(6)).is_supported(false));
        assert!(!BusLayout::from_counts(8, 8).is_supported(false));
    }

    #[test]
    fn midi_effect_accepts_anything() {
        assert!(BusLayout::from_counts(0, 0).is_supported(true));
        assert!(BusLayout::from_counts(1, 6).is_supported(true));
    }

    #[test]
    fn channel_counts_roundtrip() {
        for n in 0..10 {
            assert_eq!(ChannelSet::from_count(n).channel_count(), n);
        }
        assert_eq!(BusLayout::from_counts(1, 2).to_string(), "mono in, stereo out");
        assert_eq!(ChannelSet::Discrete(6).to_string(), "6 channels");
    }
}
