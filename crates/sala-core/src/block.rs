//! Stream configuration and borrowed audio blocks.
//!
//! [`ProcessSpec`] describes the stream an effect is about to run in and is
//! handed to [`Effect::prepare`](crate::Effect::prepare) whenever the sample
//! rate, maximum block size or channel count changes. [`AudioBlock`] wraps the
//! per-channel slices of one processing quantum so effects can be driven from
//! plugin hosts, offline renderers and tests alike.

/// Stream configuration for preparing an effect.
///
/// Effects size their internal buffers from this in `prepare()`; processing a
/// block that doesn't fit a previously prepared spec is a logic error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Largest block the host will ever deliver, in samples per channel.
    pub maximum_block_size: u32,
    /// Number of channels the effect will be asked to process.
    pub num_channels: u32,
}

impl ProcessSpec {
    /// Create a new spec.
    pub const fn new(sample_rate: f64, maximum_block_size: u32, num_channels: u32) -> Self {
        Self {
            sample_rate,
            maximum_block_size,
            num_channels,
        }
    }
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self::new(44100.0, 512, 2)
    }
}

/// Mutable view over the channels of one processing quantum.
///
/// The block never owns sample memory: it borrows one slice per channel for
/// the duration of a single process call. All channels are viewed at the
/// length of the shortest one.
///
/// # Example
///
/// ```rust
/// use sala_core::AudioBlock;
///
/// let mut left = [0.5f32; 64];
/// let mut right = [0.25f32; 64];
/// let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
/// let mut block = AudioBlock::new(&mut channels);
///
/// assert_eq!(block.num_channels(), 2);
/// assert_eq!(block.num_samples(), 64);
/// if let Some((l, r)) = block.stereo_mut() {
///     l[0] = 0.0;
///     r[0] = 0.0;
/// }
/// ```
pub struct AudioBlock<'a, 'b> {
    channels: &'a mut [&'b mut [f32]],
    num_samples: usize,
}

impl<'a, 'b> AudioBlock<'a, 'b> {
    /// Wrap a set of channel slices.
    pub fn new(channels: &'a mut [&'b mut [f32]]) -> Self {
        let num_samples = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        Self {
            channels,
            num_samples,
        }
    }

    /// Number of channels in the block.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Whether the block holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_samples == 0 || self.channels.is_empty()
    }

    /// Mutable access to one channel.
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        let n = self.num_samples;
        self.channels.get_mut(index).map(|c| &mut c[..n])
    }

    /// Both channels of a two-channel block, or `None` for any other width.
    pub fn stereo_mut(&mut self) -> Option<(&mut [f32], &mut [f32])> {
        let n = self.num_samples;
        match &mut *self.channels {
            [left, right] => Some((&mut left[..n], &mut right[..n])),
            _ => None,
        }
    }

    /// Run `f` over consecutive sub-blocks of at most `chunk` samples.
    ///
    /// Used to keep a long host block within a prepared maximum size.
    /// `chunk == 0` processes the whole block at once. At most the first two
    /// channels are handed to `f`.
    pub fn for_each_chunk(&mut self, chunk: usize, mut f: impl FnMut(&mut [&mut [f32]])) {
        let total = self.num_samples;
        if chunk == 0 || total <= chunk {
            with_prefix(self.channels, 0, total, &mut f);
            return;
        }

        let mut start = 0;
        while start < total {
            let end = (start + chunk).min(total);
            with_prefix(self.channels, start, end, &mut f);
            start = end;
        }
    }

    /// Fill every channel with zeros.
    pub fn clear(&mut self) {
        let n = self.num_samples;
        for channel in self.channels.iter_mut() {
            channel[..n].fill(0.0);
        }
    }
}

/// Reborrow `channels[..][start..end]` as a fixed-capacity channel array.
///
/// Only the first two channels are forwarded.
fn with_prefix(
    channels: &mut [&mut [f32]],
    start: usize,
    end: usize,
    f: &mut impl FnMut(&mut [&mut [f32]]),
) {
    match channels {
        [] => f(&mut []),
        [only] => f(&mut [&mut only[start..end]]),
        [left, right, ..] => f(&mut [&mut left[start..end], &mut right[start..end]]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_reports_shape() {
        let mut a = [0.0f32; 32];
        let mut b = [0.0f32; 32];
        let mut channels: [&mut [f32]; 2] = [&mut a, &mut b];
        let block = AudioBlock::new(&mut channels);
        assert_eq!(block.num_channels(), 2);
        assert_eq!(block.num_samples(), 32);
        assert!(!block.is_empty());
    }

    #[test]
    fn block_uses_shortest_channel() {
        let mut a = [1.0f32; 32];
        let mut b = [1.0f32; 16];
        let mut channels: [&mut [f32]; 2] = [&mut a, &mut b];
        let mut block = AudioBlock::new(&mut channels);
        assert_eq!(block.num_samples(), 16);
        block.clear();
        drop(block);
        assert!(a[..16].iter().all(|&s| s == 0.0));
        assert!(a[16..].iter().all(|&s| s == 1.0));
    }

    #[test]
    fn stereo_mut_only_for_two_channels() {
        let mut a = [0.0f32; 8];
        let mut channels: [&mut [f32]; 1] = [&mut a];
        let mut block = AudioBlock::new(&mut channels);
        assert!(block.stereo_mut().is_none());
        assert!(block.channel_mut(0).is_some());
        assert!(block.channel_mut(1).is_none());
    }

    #[test]
    fn empty_block() {
        let mut channels: [&mut [f32]; 0] = [];
        let block = AudioBlock::new(&mut channels);
        assert!(block.is_empty());
        assert_eq!(block.num_samples(), 0);
    }

    #[test]
    fn chunks_cover_whole_block() {
        let mut a = [0.0f32; 10];
        let mut b = [0.0f32; 10];
        let mut channels: [&mut [f32]; 2] = [&mut a, &mut b];
        let mut block = AudioBlock::new(&mut channels);

        let mut sizes = [0usize; 4];
        let mut count = 0;
        block.for_each_chunk(4, |chunk| {
            sizes[count] = chunk[0].len();
            count += 1;
            for channel in chunk.iter_mut() {
                for s in channel.iter_mut() {
                    *s += 1.0;
                }
            }
        });

        assert_eq!(count, 3);
        assert_eq!(&sizes[..3], &[4, 4, 2]);
        drop(block);
        assert!(a.iter().all(|&s| s == 1.0));
        assert!(b.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn default_spec() {
        let spec = ProcessSpec::default();
        assert_eq!(spec.sample_rate, 44100.0);
        assert_eq!(spec.maximum_block_size, 512);
        assert_eq!(spec.num_channels, 2);
    }
}
