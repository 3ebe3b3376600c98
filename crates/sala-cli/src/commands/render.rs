//! Offline rendering of a WAV file through the reverb.

use super::common::{ParamOverrides, describe_settings, load_preset};
use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use sala_core::{linear_to_db, peak, rms};
use sala_io::{OfflineRenderer, read_wav, write_wav};
use sala_reverb::{BusLayout, ReverbBridge, ReverbParams};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct RenderArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML file to start from
    #[arg(short, long)]
    preset: Option<String>,

    #[command(flatten)]
    overrides: ParamOverrides,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Seconds of silence appended so the tail can ring out
    #[arg(long, default_value = "2.0")]
    tail: f64,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("--bit-depth must be 16, 24 or 32, got {}", args.bit_depth);
    }
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }
    if !args.tail.is_finite() || args.tail < 0.0 {
        anyhow::bail!("--tail must be a non-negative number of seconds");
    }

    println!("Reading {}...", args.input.display());
    let (mut channels, spec) =
        read_wav(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let frames = channels.first().map_or(0, Vec::len);

    let layout = BusLayout::from_counts(u32::from(spec.channels), u32::from(spec.channels));
    if !layout.is_supported(false) {
        anyhow::bail!("Unsupported channel layout: {layout} (sala renders mono or stereo files)");
    }

    println!(
        "  {} frames, {} Hz, {:.2}s, {}",
        frames,
        spec.sample_rate,
        frames as f64 / f64::from(spec.sample_rate),
        layout
    );

    let params = ReverbParams::new();
    if let Some(name) = &args.preset {
        let preset = load_preset(name)?;
        println!("Preset: {}", preset.name);
        preset.apply_to(&params);
    }
    args.overrides.apply(&params)?;
    let settings = params.snapshot();
    println!("Settings: {}", describe_settings(&settings));

    let input_level = levels(&channels);

    let renderer = OfflineRenderer::new(f64::from(spec.sample_rate), args.block_size)
        .with_tail_seconds(args.tail);

    let pb = ProgressBar::new((frames + renderer.tail_samples()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut bridge = ReverbBridge::new(&params);
    let rendered = renderer.render_with_progress(&mut bridge, &mut channels, |done, _| {
        pb.set_position(done as u64);
    });
    pb.finish_with_message("done");

    let output_level = levels(&channels);
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_level.0),
        linear_to_db(input_level.1)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(output_level.0),
        linear_to_db(output_level.1)
    );

    println!("\nWriting {}...", args.output.display());
    let out_spec = sala_io::WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };
    write_wav(&args.output, &channels, out_spec)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        frames = rendered,
        bits = args.bit_depth,
        "render complete"
    );
    println!("Done!");
    Ok(())
}

/// RMS and peak across all channels.
fn levels(channels: &[Vec<f32>]) -> (f32, f32) {
    if channels.is_empty() {
        return (0.0, 0.0);
    }
    let mean_square =
        channels.iter().map(|c| rms(c).powi(2)).sum::<f32>() / channels.len() as f32;
    let max_peak = channels.iter().map(|c| peak(c)).fold(0.0, f32::max);
    (mean_square.sqrt(), max_peak)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let channels = vec![vec![1.0, -1.0], vec![0.0, 0.5]];
        let (rms_level, peak_level) = levels(&channels);
        assert_eq!(peak_level, 1.0);
        // (1.0 + 0.125) / 2
        assert!((rms_level - 0.5625f32.sqrt()).abs() < 1e-6);
        assert_eq!(levels(&[]), (0.0, 0.0));
    }
}
