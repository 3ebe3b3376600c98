//! Display WAV file metadata.

use clap::Args;
use sala_io::{WavFormat, read_wav_info};
use sala_reverb::BusLayout;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;

    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };
    let channels = u32::from(info.channels);
    let layout = BusLayout::from_counts(channels, channels);

    println!("File:        {}", args.file.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {} ({})", info.channels, layout.input);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );
    println!(
        "Renderable:  {}",
        if layout.is_supported(false) { "yes" } else { "no (mono or stereo only)" }
    );

    Ok(())
}
