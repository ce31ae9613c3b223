//! Human-readable output helpers.

/// Formats seconds as `h:mm:ss`, keeping a fractional part when there is one.
pub fn format_clock(secs: f64) -> String {
    let secs = secs.max(0.0);
    let whole = secs.floor() as u64;
    let frac = secs - whole as f64;
    let (h, m, s) = (whole / 3600, (whole % 3600) / 60, whole % 60);
    if frac > 1e-9 {
        let s = s as f64 + frac;
        format!("{h}:{m:02}:{s:06.3}")
    } else {
        format!("{h}:{m:02}:{s:02}")
    }
}

/// Probability as a percentage with five decimals.
pub fn format_percent(p: f64) -> String {
    format!("{:.5} %", p * 100.0)
}
