//! Main-thread plugin implementation.
//!
//! Answers parameter metadata queries, saves and restores state, and declares
//! the audio ports. Nothing here runs on the audio thread.

use crate::shared::SalaShared;
use clack_extensions::audio_ports::{
    AudioPortFlags, AudioPortInfo, AudioPortInfoWriter, AudioPortType, PluginAudioPortsImpl,
};
use clack_extensions::params::{
    ParamDisplayWriter, ParamInfo, ParamInfoFlags, ParamInfoWriter, PluginMainThreadParams,
};
use clack_extensions::state::PluginStateImpl;
use clack_plugin::prelude::*;
use clack_plugin::stream::{InputStream, OutputStream};
use clack_plugin::utils::Cookie;
use sala_core::ParamFlags;
use sala_reverb::{BusLayout, ChannelSet, read_state, write_state};
use tracing::warn;

/// Layout declared to the host: one stereo main port each way.
pub const PLUGIN_LAYOUT: BusLayout = BusLayout {
    input: ChannelSet::Stereo,
    output: ChannelSet::Stereo,
};

/// Main-thread state for the sala CLAP plugin.
pub struct SalaMainThread<'a> {
    shared: &'a SalaShared,
}

impl<'a> SalaMainThread<'a> {
    /// Create a new main-thread handler referencing the shared state.
    pub fn new(shared: &'a SalaShared) -> Self {
        Self { shared }
    }
}

impl<'a> PluginMainThread<'a, SalaShared> for SalaMainThread<'a> {}

// ── Parameter Extension ─────────────────────────────────────────────────────

/// Map sala `ParamFlags` to CLAP `ParamInfoFlags`.
fn map_flags(flags: ParamFlags) -> ParamInfoFlags {
    let mut clap_flags = ParamInfoFlags::empty();

    if flags.contains(ParamFlags::AUTOMATABLE) {
        clap_flags |= ParamInfoFlags::IS_AUTOMATABLE;
    }
    if flags.contains(ParamFlags::STEPPED) {
        clap_flags |= ParamInfoFlags::IS_STEPPED;
    }
    if flags.contains(ParamFlags::HIDDEN) {
        clap_flags |= ParamInfoFlags::IS_HIDDEN;
    }
    if flags.contains(ParamFlags::READ_ONLY) {
        clap_flags |= ParamInfoFlags::IS_READONLY;
    }

    clap_flags
}

impl PluginMainThreadParams for SalaMainThread<'_> {
    fn count(&mut self) -> u32 {
        self.shared.param_count() as u32
    }

    fn get_info(&mut self, param_index: u32, info: &mut ParamInfoWriter) {
        let Some(desc) = self.shared.descriptor(param_index as usize) else {
            return;
        };

        info.set(&ParamInfo {
            id: ClapId::new(desc.id.0),
            name: desc.name.as_bytes(),
            module: desc.group.as_bytes(),
            min_value: f64::from(desc.min),
            max_value: f64::from(desc.max),
            default_value: f64::from(desc.default),
            flags: map_flags(desc.flags),
            cookie: Cookie::default(),
        });
    }

    fn get_value(&mut self, param_id: ClapId) -> Option<f64> {
        let index = self.shared.index_by_id(param_id.get())?;
        self.shared.get_value(index).map(f64::from)
    }

    fn value_to_text(
        &mut self,
        param_id: ClapId,
        value: f64,
        writer: &mut ParamDisplayWriter,
    ) -> core::fmt::Result {
        use core::fmt::Write;

        match self
            .shared
            .index_by_id(param_id.get())
            .and_then(|index| self.shared.descriptor(index))
        {
            Some(desc) => write!(writer, "{}", desc.format_value(value as f32)),
            None => write!(writer, "{value:.2}"),
        }
    }

    fn text_to_value(&mut self, param_id: ClapId, text: &core::ffi::CStr) -> Option<f64> {
        let index = self.shared.index_by_id(param_id.get())?;
        let desc = self.shared.descriptor(index)?;
        desc.parse_value(text.to_str().ok()?).map(f64::from)
    }

    fn flush(&mut self, input: &InputEvents, _output: &mut OutputEvents) {
        for event in input {
            if let Some(clack_plugin::events::spaces::CoreEventSpace::ParamValue(ev)) =
                event.as_core_event()
                && let Some(param_id) = ev.param_id()
            {
                self.shared.set_value_by_id(param_id.get(), ev.value() as f32);
            }
        }
    }
}

// ── State Extension ─────────────────────────────────────────────────────────

/// State is a JSON object mapping stable `ParamId` to value:
///
/// ```json
/// {"1500": 0.5, "1501": 0.5, "1502": 0.5, "1503": 0.5, "1504": 0.0}
/// ```
impl PluginStateImpl for SalaMainThread<'_> {
    fn save(&mut self, output: &mut OutputStream) -> Result<(), PluginError> {
        write_state(self.shared.params(), output).map_err(|e| {
            warn!(error = %e, "failed to save state");
            PluginError::Message("Failed to save state")
        })
    }

    fn load(&mut self, input: &mut InputStream) -> Result<(), PluginError> {
        read_state(self.shared.params(), input)
            .map(|_| ())
            .map_err(|e| {
                warn!(error = %e, "failed to load state");
                PluginError::Message("Failed to load state")
            })
    }
}

// ── Audio Ports Extension ───────────────────────────────────────────────────

impl PluginAudioPortsImpl for SalaMainThread<'_> {
    fn count(&mut self, _is_input: bool) -> u32 {
        1
    }

    fn get(&mut self, index: u32, is_input: bool, writer: &mut AudioPortInfoWriter) {
        if index != 0 {
            return;
        }
        let set = if is_input {
            PLUGIN_LAYOUT.input
        } else {
            PLUGIN_LAYOUT.output
        };
        writer.set(&AudioPortInfo {
            id: ClapId::new(0),
            name: b"Main",
            channel_count: set.channel_count(),
            flags: AudioPortFlags::IS_MAIN,
            port_type: Some(if set == ChannelSet::Mono {
                AudioPortType::MONO
            } else {
                AudioPortType::STEREO
            }),
            in_place_pair: Some(ClapId::new(0)),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_layout_is_supported() {
        assert!(PLUGIN_LAYOUT.is_supported(false));
        assert_eq!(PLUGIN_LAYOUT.output.channel_count(), 2);
    }

    #[test]
    fn flags_map_to_clap() {
        let shared = SalaShared::new();
        let size = map_flags(shared.descriptor(0).unwrap().flags);
        assert!(size.contains(ParamInfoFlags::IS_AUTOMATABLE));
        assert!(!size.contains(ParamInfoFlags::IS_STEPPED));

        let freeze = map_flags(shared.descriptor(4).unwrap().flags);
        assert!(freeze.contains(ParamInfoFlags::IS_AUTOMATABLE | ParamInfoFlags::IS_STEPPED));
        assert!(map_flags(ParamFlags::NONE).is_empty());
    }
}
