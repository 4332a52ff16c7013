//! Unit conversions between descriptor values and runtime values.

/// Simulation steps per in-game day.
pub const STEPS_PER_DAY: f32 = 24.0;

/// Condition lost per step so that `max` is gone after `days`.
///
/// Returns 0 when `days` is not positive.
pub fn decay_per_step(days: f32, max: f32) -> f32 {
    if days <= 0.0 {
        return 0.0;
    }
    max / (days * STEPS_PER_DAY)
}

/// Convert a percentage (0 to 100) into a fraction (0 to 1).
pub fn percent_to_fraction(percent: f32) -> f32 {
    percent / 100.0
}

/// Percent per hour needed to complete a process in `hours`.
///
/// Returns 0 when `hours` is not positive.
pub fn per_hour(hours: f32) -> f32 {
    if hours <= 0.0 {
        return 0.0;
    }
    100.0 / hours
}
