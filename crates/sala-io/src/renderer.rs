//! Offline rendering of planar audio through an [`Effect`].

use sala_core::{AudioBlock, Effect, ProcessSpec};
use tracing::debug;

/// Drives an effect over whole buffers the way a host would.
///
/// The effect is prepared once for the renderer's sample rate and block
/// size, then fed consecutive blocks of at most `block_size` samples. An
/// optional tail of silence is appended so reverberation can ring out.
///
/// # Example
///
/// ```rust
/// use sala_core::{AudioBlock, Effect, ProcessSpec};
/// use sala_io::OfflineRenderer;
///
/// struct Half;
///
/// impl Effect for Half {
///     fn prepare(&mut self, _spec: &ProcessSpec) {}
///     fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
///         for ch in 0..block.num_channels() {
///             if let Some(samples) = block.channel_mut(ch) {
///                 samples.iter_mut().for_each(|s| *s *= 0.5);
///             }
///         }
///     }
///     fn reset(&mut self) {}
/// }
///
/// let mut channels = vec![vec![1.0; 1000]];
/// let frames = OfflineRenderer::new(48000.0, 256)
///     .with_tail_samples(24)
///     .render(&mut Half, &mut channels);
///
/// assert_eq!(frames, 1024);
/// assert_eq!(channels[0][999], 0.5);
/// assert_eq!(channels[0][1023], 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfflineRenderer {
    sample_rate: f64,
    block_size: usize,
    tail_samples: usize,
}

impl OfflineRenderer {
    /// Create a renderer. A `block_size` of zero is treated as one.
    pub fn new(sample_rate: f64, block_size: usize) -> Self {
        Self {
            sample_rate,
            block_size: block_size.max(1),
            tail_samples: 0,
        }
    }

    /// Append `samples` frames of silence before rendering.
    pub fn with_tail_samples(mut self, samples: usize) -> Self {
        self.tail_samples = samples;
        self
    }

    /// Append `seconds` of silence before rendering. Negative values count as zero.
    pub fn with_tail_seconds(self, seconds: f64) -> Self {
        let samples = (seconds.max(0.0) * self.sample_rate).round() as usize;
        self.with_tail_samples(samples)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Samples per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Tail length in frames.
    pub fn tail_samples(&self) -> usize {
        self.tail_samples
    }

    /// The spec the effect is prepared with for `num_channels` channels.
    pub fn spec(&self, num_channels: usize) -> ProcessSpec {
        ProcessSpec::new(
            self.sample_rate,
            u32::try_from(self.block_size).unwrap_or(u32::MAX),
            u32::try_from(num_channels).unwrap_or(u32::MAX),
        )
    }

    /// Prepare `effect` and render `channels` through it in place.
    ///
    /// Returns the number of frames rendered, tail included.
    pub fn render<E: Effect + ?Sized>(&self, effect: &mut E, channels: &mut [Vec<f32>]) -> usize {
        self.render_with_progress(effect, channels, |_, _| {})
    }

    /// [`render`](Self::render), calling `progress(done, total)` in frames
    /// after every block.
    pub fn render_with_progress<E: Effect + ?Sized>(
        &self,
        effect: &mut E,
        channels: &mut [Vec<f32>],
        mut progress: impl FnMut(usize, usize),
    ) -> usize {
        let frames = channels.iter().map(Vec::len).max().unwrap_or(0);
        let total = frames + self.tail_samples;
        for channel in channels.iter_mut() {
            channel.resize(total, 0.0);
        }

        effect.prepare(&self.spec(channels.len()));
        debug!(
            channels = channels.len(),
            frames,
            tail = self.tail_samples,
            block_size = self.block_size,
            "rendering"
        );

        let mut start = 0;
        while start < total {
            let end = (start + self.block_size).min(total);
            let mut slices: Vec<&mut [f32]> =
                channels.iter_mut().map(|c| &mut c[start..end]).collect();
            effect.process(&mut AudioBlock::new(&mut slices));
            start = end;
            progress(start, total);
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the block sizes it sees and counts samples.
    #[derive(Default)]
    struct Recorder {
        spec: Option<ProcessSpec>,
        blocks: Vec<usize>,
        counter: f32,
    }

    impl Effect for Recorder {
        fn prepare(&mut self, spec: &ProcessSpec) {
            self.spec = Some(*spec);
        }

        fn process(&mut self, block: &mut AudioBlock<'_, '_>) {
            self.blocks.push(block.num_samples());
            let n = block.num_samples();
            for i in 0..n {
                for ch in 0..block.num_channels() {
                    if let Some(samples) = block.channel_mut(ch) {
                        samples[i] += self.counter;
                    }
                }
                self.counter += 1.0;
            }
        }

        fn reset(&mut self) {
            self.counter = 0.0;
        }
    }

    #[test]
    fn test_blocks_cover_input_in_order() {
        let mut channels = vec![vec![0.0; 1000], vec![0.0; 1000]];
        let mut effect = Recorder::default();
        let frames = OfflineRenderer::new(44100.0, 256).render(&mut effect, &mut channels);

        assert_eq!(frames, 1000);
        assert_eq!(effect.blocks, [256, 256, 256, 232]);
        assert_eq!(effect.spec, Some(ProcessSpec::new(44100.0, 256, 2)));
        for channel in &channels {
            for (i, &s) in channel.iter().enumerate() {
                assert_eq!(s, i as f32);
            }
        }
    }

    #[test]
    fn test_tail_is_appended_and_rendered() {
        let mut channels = vec![vec![1.0; 100]];
        let mut effect = Recorder::default();
        let renderer = OfflineRenderer::new(1000.0, 64).with_tail_seconds(0.05);
        assert_eq!(renderer.tail_samples(), 50);

        let frames = renderer.render(&mut effect, &mut channels);
        assert_eq!(frames, 150);
        assert_eq!(channels[0].len(), 150);
        assert_eq!(channels[0][99], 100.0);
        assert_eq!(channels[0][149], 149.0);
    }

    #[test]
    fn test_ragged_channels_padded() {
        let mut channels = vec![vec![0.0; 10], vec![0.0; 7]];
        OfflineRenderer::new(48000.0, 4).render(&mut Recorder::default(), &mut channels);
        assert_eq!(channels[1].len(), 10);
    }

    #[test]
    fn test_progress_reports_every_block() {
        let mut channels = vec![vec![0.0; 10]];
        let mut reports = Vec::new();
        OfflineRenderer::new(48000.0, 4).render_with_progress(
            &mut Recorder::default(),
            &mut channels,
            |done, total| reports.push((done, total)),
        );
        assert_eq!(reports, [(4, 10), (8, 10), (10, 10)]);
    }

    #[test]
    fn test_zero_block_size_and_empty_input() {
        let renderer = OfflineRenderer::new(48000.0, 0);
        assert_eq!(renderer.block_size(), 1);

        let mut effect = Recorder::default();
        let mut channels: Vec<Vec<f32>> = vec![Vec::new()];
        assert_eq!(renderer.render(&mut effect, &mut channels), 0);
        assert!(effect.blocks.is_empty());
        assert!(effect.spec.is_some());
    }

    #[test]
    fn test_negative_tail_is_zero() {
        assert_eq!(
            OfflineRenderer::new(48000.0, 64)
                .with_tail_seconds(-1.0)
                .tail_samples(),
            0
        );
    }
}
