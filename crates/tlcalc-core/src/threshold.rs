//! Time budget: hours, seconds, or a clock string.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TlError};
use crate::stage::to_frames;

/// Total time budget for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    Hours(f64),
    Seconds(f64),
}

impl Threshold {
    pub fn as_secs(&self) -> f64 {
        match *self {
            Threshold::Hours(h) => h * 3600.0,
            Threshold::Seconds(s) => s,
        }
    }

    /// Budget in frames, rounded half to even like every other duration.
    pub fn to_frames(&self, fps: f64) -> u64 {
        to_frames(self.as_secs(), fps)
    }

    pub fn validate(&self) -> Result<()> {
        let secs = self.as_secs();
        if !secs.is_finite() || secs <= 0.0 {
            let raw = match *self {
                Threshold::Hours(h) => h,
                Threshold::Seconds(s) => s,
            };
            return Err(TlError::InvalidThreshold(raw));
        }
        Ok(())
    }
}

/// Parses `ss`, `ss.sss`, `mm:ss` or `hh:mm:ss` into seconds.
///
/// Components may be fractional; each must be finite and non-negative.
pub fn parse_clock(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let invalid = |reason| TlError::InvalidClock {
        input: input.to_string(),
        reason,
    };
    if trimmed.is_empty() {
        return Err(invalid("empty"));
    }

    let parts: Vec<&str> = trimmed.split(':').map(str::trim).collect();
    if parts.len() > 3 {
        return Err(invalid("expected hh:mm:ss, mm:ss or ss"));
    }

    let mut values = Vec::with_capacity(parts.len());
    for part in &parts {
        let v: f64 = part.parse().map_err(|_| invalid("not a number"))?;
        if !v.is_finite() {
            return Err(invalid("not a number"));
        }
        if v < 0.0 {
            return Err(invalid("negative component"));
        }
        values.push(v);
    }

    let (h, m, s) = match values.as_slice() {
        [s] => (0.0, 0.0, *s),
        [m, s] => (0.0, *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid("expected hh:mm:ss, mm:ss or ss")),
    };
    Ok(h * 3600.0 + m * 60.0 + s)
}
