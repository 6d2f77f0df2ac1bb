//! Human-relative durations ("3d 4h ago").

use chrono::{DateTime, Utc};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Units from largest to smallest, with their display suffix.
const UNITS: [(u64, &str); 6] = [
    (YEAR, "y"),
    (MONTH, "m"),
    (DAY, "d"),
    (HOUR, "h"),
    (MINUTE, "mins"),
    (1, "s"),
];

/// Render the age of `instant` relative to `reference_secs` (unix seconds).
///
/// A unit is only used once the remaining delta is at least twice its size,
/// seconds excepted. At most two unit/count pairs are emitted. The `" ago"`
/// suffix is dropped only when `future` is set and `instant` lies after the
/// reference.
pub fn format_age(instant: DateTime<Utc>, future: bool, reference_secs: i64) -> String {
    format_delta(reference_secs - instant.timestamp(), future)
}

/// Same as [`format_age`], for a precomputed `reference - instant` delta.
pub fn format_delta(delta_secs: i64, future: bool) -> String {
    let negative = delta_secs < 0;
    let mut t = delta_secs.unsigned_abs();

    let mut parts: Vec<String> = Vec::with_capacity(2);
    for (i, (size, suffix)) in UNITS.iter().enumerate() {
        if t >= size.saturating_mul(2) || i == UNITS.len() - 1 {
            let n = t / size;
            parts.push(format!("{n}{suffix}"));
            t -= n * size;
            if parts.len() >= 2 {
                break;
            }
        }
    }

    let mut s = parts.join(" ");
    if !future || !negative {
        s.push_str(" ago");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const MINUTE: i64 = super::MINUTE as i64;
    const HOUR: i64 = super::HOUR as i64;
    const DAY: i64 = super::DAY as i64;
    const MONTH: i64 = super::MONTH as i64;
    const YEAR: i64 = super::YEAR as i64;

    #[test]
    fn test_small_values() {
        assert_eq!(format_delta(0, false), "0s ago");
        assert_eq!(format_delta(59, false), "59s ago");
        assert_eq!(format_delta(119, false), "119s ago");
        assert_eq!(format_delta(120, false), "2mins 0s ago");
    }

    #[test]
    fn test_two_pairs_max() {
        let s = format_delta(2 * YEAR + 3 * MONTH + 4 * DAY + 5, false);
        assert_eq!(s, "2y 3m ago");
    }

    #[test]
    fn test_twice_threshold() {
        // 25 hours is not yet "1d".
        assert_eq!(format_delta(25 * HOUR, false), "25h 0s ago");
        assert_eq!(format_delta(47 * HOUR, false), "47h 0s ago");
        assert_eq!(format_delta(2 * DAY + 3 * HOUR, false), "2d 3h ago");
    }

    #[test]
    fn test_future() {
        assert_eq!(format_delta(-3 * DAY, true), "3d 0s");
        // Future flag on a past moment still reads "ago".
        assert_eq!(format_delta(3 * DAY, true), "3d 0s ago");
        // Without the flag, a future moment still gets the suffix.
        assert_eq!(format_delta(-130, false), "2mins 10s ago");
    }

    #[test]
    fn test_larger_unit_first() {
        let order = ["y", "m", "d", "h", "mins", "s"];
        for delta in [5, 150, 7300, 200_000, 5_000_000, 90_000_000] {
            let s = format_delta(delta, false);
            let parts: Vec<&str> = s.trim_end_matches(" ago").split(' ').collect();
            assert!(parts.len() <= 2, "{s}");
            let rank = |p: &str| {
                let suffix = p.trim_start_matches(|c: char| c.is_ascii_digit());
                order.iter().position(|o| *o == suffix).unwrap()
            };
            if parts.len() == 2 {
                assert!(rank(parts[0]) < rank(parts[1]), "{s}");
            }
        }
    }

    #[test]
    fn test_extreme_deltas() {
        assert_eq!(format_delta(i64::MIN, false), "292471208677y 6m ago");
        assert_eq!(format_delta(i64::MIN, true), "292471208677y 6m");
        assert_eq!(format_delta(i64::MAX, false), "292471208677y 6m ago");
    }

    #[test]
    fn test_format_age_reference() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let reference = instant.timestamp() + 3 * HOUR + 10 * MINUTE;
        assert_eq!(format_age(instant, false, reference), "3h 10mins ago");
    }
}
