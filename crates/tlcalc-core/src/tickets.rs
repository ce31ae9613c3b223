//! Independent fixed-length budgets ("tickets").
//!
//! Each ticket is a fresh run from the first stage with the same budget; the
//! goal is met if any ticket finishes in time.

/// Default ticket length in seconds: one hour, the unit of the hour threshold.
pub const DEFAULT_TICKET_SECS: f64 = 3600.0;

/// `1 - (1 - p_single)^tickets`, with `p_single` clamped to `[0, 1]`.
pub fn probability_across_tickets(p_single: f64, tickets: u32) -> f64 {
    if tickets == 0 {
        return 0.0;
    }
    let miss = 1.0 - p_single.clamp(0.0, 1.0);
    1.0 - miss.powi(tickets.min(i32::MAX as u32) as i32)
}
