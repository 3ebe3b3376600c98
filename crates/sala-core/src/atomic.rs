//! Lock-free `f32` cell.
//!
//! Parameter values cross from the host's main thread to the audio thread
//! without locks: the bit pattern lives in an `AtomicU32`.

use core::sync::atomic::{AtomicU32, Ordering};

/// An `f32` that can be shared between threads.
///
/// # Example
///
/// ```rust
/// use core::sync::atomic::Ordering;
/// use sala_core::AtomicF32;
///
/// let value = AtomicF32::new(0.5);
/// value.store(0.75, Ordering::Relaxed);
/// assert_eq!(value.load(Ordering::Relaxed), 0.75);
/// ```
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Create a cell holding `value`.
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Read the current value.
    #[inline]
    pub fn load(&self, order: Ordering) -> f32 {
        f32::from_bits(self.0.load(order))
    }

    /// Replace the current value.
    #[inline]
    pub fn store(&self, value: f32, order: Ordering) {
        self.0.store(value.to_bits(), order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_special_values() {
        let cell = AtomicF32::default();
        assert_eq!(cell.load(Ordering::Relaxed), 0.0);
        for v in [-0.0f32, 1.0, f32::MIN_POSITIVE, f32::MAX] {
            cell.store(v, Ordering::Relaxed);
            assert_eq!(cell.load(Ordering::Relaxed).to_bits(), v.to_bits());
        }
    }
}
