//! Sala Reverb: CLAP audio effect plugin.
//!
//! Build with `cargo build -p sala-plugin --example sala-reverb --release`
//! and copy the resulting library to your CLAP folder as `sala-reverb.clap`.

use sala_plugin::SalaReverb;

clack_plugin::clack_export_entry!(clack_plugin::prelude::SinglePluginEntry<SalaReverb>);
