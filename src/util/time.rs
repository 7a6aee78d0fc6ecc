use chrono::Utc;

/// Wall-clock seconds since the Unix epoch, with sub-millisecond precision.
///
/// Multiplied by 1000 this yields the millisecond value handed to the
/// mount-timestamp sink.
pub fn timestamp_in_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
