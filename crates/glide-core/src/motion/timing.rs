//! Time calculation utilities for frame-driven animations
//!
//! Works on millisecond timestamps handed in by the caller (the browser's
//! frame clock, or a simulated one), so every animation is deterministic.

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor, not clamped
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Number of frames needed to cover `duration_ms` at `frame_ms` per frame
#[inline]
pub fn frame_count(duration_ms: u64, frame_ms: u64) -> u64 {
    if frame_ms == 0 {
        return 1;
    }
    duration_ms.div_ceil(frame_ms).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(2000, 16), 125);
        assert_eq!(frame_count(10, 16), 1);
        assert_eq!(frame_count(100, 0), 1);
    }
}
