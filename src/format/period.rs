//! Reporting periods in UTC.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

/// Minutes around midnight within which an instant counts as a day change.
const DAY_CHANGE_SLACK_MINUTES: i64 = 2;

/// Render a reporting period such as "2024-3-1" or "2024-3-1 06:00 - 2024-3-2".
///
/// Reports are supposed to cover whole UTC days. A period that starts and ends
/// on day boundaries and spans about one day is shown as just its start date.
/// Ends that do not fall on a day boundary get a time of day.
pub fn format_period(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let begin_change = is_day_change(start);
    let end_change = is_day_change(end);

    let one_day_secs = 24 * (2 * 60 + 3600);
    if begin_change && end_change && (end - start).num_seconds().abs() < one_day_secs {
        return date_str(start);
    }

    let mut begin = date_str(start);
    if !begin_change {
        begin.push_str(&format!(" {:02}:{:02}", start.hour(), start.minute()));
    }
    let mut finish = date_str(end);
    if !end_change {
        finish.push_str(&format!(" {:02}:{:02}", end.hour(), end.minute()));
    }
    format!("{begin} - {finish}")
}

/// Full ISO form, used as the detail/title text of a period cell.
pub fn format_period_title(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!("{} - {}", start.to_rfc3339(), end.to_rfc3339())
}

fn date_str(dt: DateTime<Utc>) -> String {
    format!("{}-{}-{}", dt.year(), dt.month(), dt.day())
}

fn is_day_change(dt: DateTime<Utc>) -> bool {
    let slack = Duration::minutes(DAY_CHANGE_SLACK_MINUTES);
    date_str(dt - slack) != date_str(dt + slack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_whole_day() {
        assert_eq!(format_period(at(2024, 3, 1, 0, 0, 0), at(2024, 3, 2, 0, 0, 0)), "2024-3-1");
        // End one second before midnight still counts as a day change.
        assert_eq!(format_period(at(2024, 3, 1, 0, 0, 0), at(2024, 3, 1, 23, 59, 59)), "2024-3-1");
    }

    #[test]
    fn test_partial_days() {
        assert_eq!(
            format_period(at(2024, 3, 1, 6, 0, 0), at(2024, 3, 2, 0, 0, 0)),
            "2024-3-1 06:00 - 2024-3-2"
        );
        assert_eq!(
            format_period(at(2024, 3, 1, 0, 0, 0), at(2024, 3, 1, 12, 30, 0)),
            "2024-3-1 - 2024-3-1 12:30"
        );
    }

    #[test]
    fn test_multi_day() {
        assert_eq!(
            format_period(at(2024, 3, 1, 0, 0, 0), at(2024, 3, 8, 0, 0, 0)),
            "2024-3-1 - 2024-3-8"
        );
    }
}
