//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.

use libm::{logf, sqrtf};

/// Flush values in the subnormal neighbourhood to zero.
///
/// Recirculating filters decay towards zero forever; once the signal gets
/// small enough the FPU falls into subnormal arithmetic, which is very slow on
/// most CPUs. The threshold is far below audibility.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Convert linear gain to decibels.
///
/// Zero and negative inputs map to the -200 dB floor instead of `-inf`.
///
/// # Example
/// ```rust
/// use sala_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Root-mean-square level of a buffer. Empty buffers are silent.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    sqrtf(sum / samples.len() as f32)
}

/// Absolute peak of a buffer.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_denormal() {
        // Normal values pass through
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.5), -0.5);
        assert_eq!(flush_denormal(1e-10), 1e-10);

        // Subnormal-range values are flushed to zero
        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-21), 0.0);
        assert_eq!(flush_denormal(1e-38), 0.0);
        assert_eq!(flush_denormal(0.0), 0.0);
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert!((linear_to_db(0.0) - (-200.0)).abs() < 0.01);
        assert!((linear_to_db(10.0) - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_rms_and_peak() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[1.0, -1.0, 1.0, -1.0]) - 1.0).abs() < 1e-6);
        assert!((rms(&[0.5; 64]) - 0.5).abs() < 1e-6);

        assert_eq!(peak(&[]), 0.0);
        assert_eq!(peak(&[0.1, -0.8, 0.3]), 0.8);
    }
}
