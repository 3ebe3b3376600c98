//! CLAP plugin adapter for the sala reverb.
//!
//! Bridges the five-parameter store and [`ReverbBridge`](sala_reverb::ReverbBridge)
//! to the CLAP plugin format via the `clack-plugin` safe wrapper.
//!
//! # Architecture
//!
//! | sala | CLAP |
//! |------|------|
//! | `ParamId(u32)` | `clap_id` |
//! | `ParamDescriptor::format_value()` | `value_to_text()` |
//! | `ParamDescriptor::parse_value()` | `text_to_value()` |
//! | `ParamFlags::STEPPED` | `CLAP_PARAM_IS_STEPPED` |
//! | `save_state` / `load_state` | state extension |
//! | `BusLayout::is_supported` | audio port check per block |
//!
//! The plugin type is [`SalaReverb`]; the `sala-reverb` example target exports
//! it as a `.clap` binary:
//!
//! ```rust,ignore
//! clack_plugin::clack_export_entry!(
//!     clack_plugin::prelude::SinglePluginEntry<sala_plugin::SalaReverb>
//! );
//! ```

pub mod audio;
pub mod main_thread;
pub mod shared;

pub use audio::SalaAudioProcessor;
pub use main_thread::SalaMainThread;
pub use shared::SalaShared;

use clack_extensions::audio_ports::PluginAudioPorts;
use clack_extensions::params::PluginParams;
use clack_extensions::state::PluginState;
use clack_plugin::prelude::*;

/// Reverse-DNS CLAP identifier.
pub const PLUGIN_ID: &str = "com.sala.reverb";

/// Display name shown by hosts.
pub const PLUGIN_NAME: &str = "Sala Reverb";

/// The sala reverb as a CLAP plugin.
pub struct SalaReverb;

impl Plugin for SalaReverb {
    type AudioProcessor<'a> = SalaAudioProcessor<'a>;
    type Shared<'a> = SalaShared;
    type MainThread<'a> = SalaMainThread<'a>;

    fn declare_extensions(builder: &mut PluginExtensions<Self>, _shared: Option<&SalaShared>) {
        builder.register::<PluginAudioPorts>();
        builder.register::<PluginParams>();
        builder.register::<PluginState>();
    }
}

impl DefaultPluginFactory for SalaReverb {
    fn get_descriptor() -> PluginDescriptor {
        use clack_plugin::plugin::features::{AUDIO_EFFECT, REVERB, STEREO};

        PluginDescriptor::new(PLUGIN_ID, PLUGIN_NAME).with_features([AUDIO_EFFECT, REVERB, STEREO])
    }

    fn new_shared(_host: HostSharedHandle<'_>) -> Result<SalaShared, PluginError> {
        Ok(SalaShared::new())
    }

    fn new_main_thread<'a>(
        _host: HostMainThreadHandle<'a>,
        shared: &'a SalaShared,
    ) -> Result<SalaMainThread<'a>, PluginError> {
        Ok(SalaMainThread::new(shared))
    }
}
