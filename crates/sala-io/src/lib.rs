//! Audio file I/O for the sala reverb.
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] load and save planar,
//!   one-`Vec`-per-channel audio
//! - **Offline rendering**: [`OfflineRenderer`] drives any [`Effect`] over a
//!   whole file in host-sized blocks, with an optional decay tail
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sala_io::{OfflineRenderer, read_wav, write_wav};
//! use sala_reverb::{ReverbBridge, ReverbParams};
//!
//! let (mut channels, spec) = read_wav("input.wav")?;
//!
//! let params = ReverbParams::default();
//! let mut bridge = ReverbBridge::new(&params);
//! OfflineRenderer::new(f64::from(spec.sample_rate), 512)
//!     .with_tail_seconds(2.0)
//!     .render(&mut bridge, &mut channels);
//!
//! write_wav("output.wav", &channels, spec)?;
//! ```
//!
//! [`Effect`]: sala_core::Effect

mod renderer;
mod wav;

pub use renderer::OfflineRenderer;
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Channel buffers don't match the spec they are written with.
    #[error("Channel mismatch: spec has {expected} channels, got {actual}")]
    ChannelMismatch {
        /// Channel count in the [`WavSpec`].
        expected: u16,
        /// Number of buffers supplied.
        actual: usize,
    },

    /// Channel buffers have different lengths.
    #[error("Channel {channel} has {len} samples, expected {expected}")]
    RaggedChannels {
        /// Offending channel index.
        channel: usize,
        /// Its length.
        len: usize,
        /// Length of channel 0.
        expected: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
