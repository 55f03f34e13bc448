use std::time::Duration;

/// Clamp a requested refresh interval to `floor`, warning when it was raised.
///
/// Returns the interval to use and whether clamping happened.
pub fn effective_interval(requested: Duration, floor: Duration) -> (Duration, bool) {
    if requested < floor {
        tracing::warn!(
            "refresh delay of {}s is below the minimum of {}s; using the minimum",
            requested.as_secs(),
            floor.as_secs()
        );
        (floor, true)
    } else {
        (requested, false)
    }
}
