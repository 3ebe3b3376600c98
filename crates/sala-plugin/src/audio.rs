//! Audio processor for the sala CLAP plugin.
//!
//! Handles the real-time callback: writes host parameter events into the
//! shared store, then hands the port's channels to the [`ReverbBridge`], which
//! processes first and picks up the new values afterwards.

use crate::main_thread::{PLUGIN_LAYOUT, SalaMainThread};
use crate::shared::SalaShared;
use clack_extensions::params::PluginAudioProcessorParams;
use clack_plugin::prelude::*;
use sala_core::{AudioBlock, Effect, ProcessSpec};
use sala_reverb::{BusLayout, ReverbBridge};
use tracing::info;

/// Audio-thread processor wrapping the reverb bridge.
///
/// Created during `activate()`, destroyed during `deactivate()`.
pub struct SalaAudioProcessor<'a> {
    shared: &'a SalaShared,
    bridge: ReverbBridge<'a>,
}

impl<'a> PluginAudioProcessor<'a, SalaShared, SalaMainThread<'a>> for SalaAudioProcessor<'a> {
    fn activate(
        _host: HostAudioProcessorHandle<'a>,
        _main_thread: &mut SalaMainThread<'a>,
        shared: &'a SalaShared,
        audio_config: PluginAudioConfiguration,
    ) -> Result<Self, PluginError> {
        let mut bridge = ReverbBridge::new(shared.params());
        bridge.prepare(&ProcessSpec::new(
            audio_config.sample_rate,
            audio_config.max_frames_count,
            PLUGIN_LAYOUT.output.channel_count(),
        ));

        info!(
            sample_rate = audio_config.sample_rate,
            max_frames = audio_config.max_frames_count,
            "sala reverb activated"
        );

        Ok(Self { shared, bridge })
    }

    fn process(
        &mut self,
        _process: Process,
        mut audio: Audio,
        events: Events,
    ) -> Result<ProcessStatus, PluginError> {
        self.handle_events(events.input);
        self.process_audio(&mut audio)?;

        // Tail length is unbounded while frozen.
        Ok(ProcessStatus::Continue)
    }

    fn deactivate(self, _main_thread: &mut SalaMainThread<'_>) {}

    fn reset(&mut self) {
        self.bridge.reset();
    }
}

impl SalaAudioProcessor<'_> {
    /// Write incoming parameter events into the shared store.
    fn handle_events(&mut self, input: &InputEvents) {
        for event in input {
            if let Some(clack_plugin::events::spaces::CoreEventSpace::ParamValue(ev)) =
                event.as_core_event()
                && let Some(param_id) = ev.param_id()
            {
                self.shared.set_value_by_id(param_id.get(), ev.value() as f32);
            }
        }
    }

    /// Run the bridge over every mono or stereo port.
    ///
    /// Separate input/output buffers are copied to the output first so the
    /// bridge always works in place. Ports in an unsupported layout pass
    /// through unprocessed.
    fn process_audio(&mut self, audio: &mut Audio) -> Result<(), PluginError> {
        for mut port_pair in audio {
            let layout = port_layout(
                port_pair.input().map_or(0, |port| port.channel_count()),
                port_pair.output().map_or(0, |port| port.channel_count()),
            );
            let channels = port_pair.channels()?;

            // Extract f32 channels, skip f64-only ports.
            let Some(mut channels) = channels.into_f32() else {
                continue;
            };

            let pair_count = channels.channel_pair_count();
            let mut left = None;
            let mut right = None;
            for index in 0..pair_count {
                let output = channels.channel_pair(index).and_then(in_place_output);
                match index {
                    0 => left = output,
                    1 => right = output,
                    _ => {}
                }
            }

            if !layout.is_supported(false) {
                // An empty block skips the DSP but still applies parameter
                // changes, so they aren't held back a block.
                let mut passthrough: [&mut [f32]; 0] = [];
                self.bridge.process(&mut AudioBlock::new(&mut passthrough));
                continue;
            }

            match (left, right) {
                (Some(mono), None) => {
                    let mut block = [mono];
                    self.bridge.process(&mut AudioBlock::new(&mut block));
                }
                (Some(left), Some(right)) => {
                    let mut block = [left, right];
                    self.bridge.process(&mut AudioBlock::new(&mut block));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Bus layout of a port from its input and output channel counts, 0 for an
/// absent side.
fn port_layout(input_channels: u32, output_channels: u32) -> BusLayout {
    BusLayout::from_counts(input_channels, output_channels)
}

/// The writable buffer of a channel pair, holding the input signal.
fn in_place_output(pair: ChannelPair<'_, f32>) -> Option<&mut [f32]> {
    match pair {
        ChannelPair::InPlace(buf) => Some(buf),
        ChannelPair::InputOutput(input, output) => {
            let len = input.len().min(output.len());
            output[..len].copy_from_slice(&input[..len]);
            output[len..].fill(0.0);
            Some(output)
        }
        ChannelPair::OutputOnly(output) => {
            output.fill(0.0);
            Some(output)
        }
        ChannelPair::InputOnly(_) => None,
    }
}

impl PluginAudioProcessorParams for SalaAudioProcessor<'_> {
    fn flush(&mut self, input: &InputEvents, _output: &mut OutputEvents) {
        self.handle_events(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_place_pair_is_returned_as_is() {
        let mut buf = [0.5_f32, -0.25, 1.0];
        let out = in_place_output(ChannelPair::InPlace(&mut buf)).unwrap();
        assert_eq!(out, &[0.5, -0.25, 1.0]);
    }

    #[test]
    fn separate_buffers_copy_input_to_output() {
        let input = [0.1_f32, 0.2, 0.3, 0.4];
        let mut output = [9.0_f32; 4];
        let out = in_place_output(ChannelPair::InputOutput(&input, &mut output)).unwrap();
        assert_eq!(out, &input);
    }

    #[test]
    fn short_input_leaves_silent_tail() {
        let input = [0.7_f32, -0.7];
        let mut output = [9.0_f32; 5];
        let out = in_place_output(ChannelPair::InputOutput(&input, &mut output)).unwrap();
        assert_eq!(out, &[0.7, -0.7, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn output_only_is_silenced() {
        let mut output = [9.0_f32; 3];
        let out = in_place_output(ChannelPair::OutputOnly(&mut output)).unwrap();
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn input_only_has_no_output() {
        let input = [0.5_f32; 3];
        assert!(in_place_output(ChannelPair::InputOnly(&input)).is_none());
    }

    #[test]
    fn port_layout_uses_both_sides() {
        assert!(port_layout(2, 2).is_supported(false));
        assert!(port_layout(1, 1).is_supported(false));

        // Mismatched or absent sides must not look like a matched layout.
        assert!(!port_layout(1, 2).is_supported(false));
        assert!(!port_layout(2, 1).is_supported(false));
        assert!(!port_layout(0, 2).is_supported(false));
        assert!(!port_layout(2, 0).is_supported(false));
        assert!(!port_layout(3, 3).is_supported(false));
    }

    #[test]
    fn plugin_layout_matches_prepared_channel_count() {
        assert_eq!(PLUGIN_LAYOUT.output.channel_count(), 2);
        assert!(port_layout(
            PLUGIN_LAYOUT.input.channel_count(),
            PLUGIN_LAYOUT.output.channel_count()
        )
        .is_supported(false));
    }
}
