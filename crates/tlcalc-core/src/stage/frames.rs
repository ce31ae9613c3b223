//! Seconds to frame conversion.

/// Converts a non-negative duration in seconds to a whole number of frames.
///
/// Rounds half to even, so `0.5` frames becomes 0 and `1.5` becomes 2. Values
/// past `u64::MAX` saturate.
pub fn to_frames(secs: f64, fps: f64) -> u64 {
    (secs * fps).round_ties_even() as u64
}
