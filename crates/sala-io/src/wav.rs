//! WAV file reading and writing.
//!
//! Audio is exchanged in planar form: one `Vec<f32>` per channel, samples in
//! `[-1.0, 1.0]`. Integer files are scaled by `2^(bits - 1)` on the way in and
//! clamped on the way out.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use tracing::debug;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = u64::from(reader.duration());
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file format.
///
/// 32-bit files are written as float, everything else as integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample: 16, 24 or 32.
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Same format with a different channel count.
    pub fn with_channels(self, channels: u16) -> Self {
        Self { channels, ..self }
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file into planar channels.
///
/// Returns one buffer per channel, all the same length.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<Vec<f32>>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    let spec = WavSpec::from(hound_spec);
    let channels = usize::from(hound_spec.channels.max(1));

    let interleaved: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << (hound_spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / channels;
    let mut planar = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (buffer, &sample) in planar.iter_mut().zip(frame) {
            buffer.push(sample);
        }
    }

    debug!(
        channels,
        frames,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "read wav"
    );
    Ok((planar, spec))
}

/// Write planar channels to a WAV file.
///
/// `channels.len()` must equal `spec.channels` and every channel must have
/// the same length.
///
/// # Example
/// ```ignore
/// let silence = vec![vec![0.0; 48000]; 2];
/// write_wav("output.wav", &silence, WavSpec::default())?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, channels: &[Vec<f32>], spec: WavSpec) -> Result<()> {
    if channels.len() != usize::from(spec.channels) || channels.is_empty() {
        return Err(Error::ChannelMismatch {
            expected: spec.channels,
            actual: channels.len(),
        });
    }
    let frames = channels[0].len();
    if let Some((channel, buffer)) = channels
        .iter()
        .enumerate()
        .find(|(_, buffer)| buffer.len() != frames)
    {
        return Err(Error::RaggedChannels {
            channel,
            len: buffer.len(),
            expected: frames,
        });
    }
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit output (use 16, 24 or 32)",
            spec.bits_per_sample
        )));
    }

    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for i in 0..frames {
            for buffer in channels {
                writer.write_sample(buffer[i])?;
            }
        }
    } else {
        let scale = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for i in 0..frames {
            for buffer in channels {
                let value = (buffer[i] * scale).clamp(-scale, scale - 1.0) as i32;
                writer.write_sample(value)?;
            }
        }
    }

    writer.finalize()?;
    debug!(channels = channels.len(), frames, "wrote wav");
    Ok(())
}
