//! Cached MTA-STS policies as a flat table.

use crate::display::{Cell, DisplayRow, Table, Tone};
use crate::format::format_age;
use crate::rpc::types::{PolicyRecord, StsMx};

const COLUMNS: [&str; 12] = [
    "LastUse",
    "Domain",
    "Backoff",
    "RecordID",
    "Version",
    "Mode",
    "MX",
    "MaxAgeSeconds",
    "Extensions",
    "ValidEnd",
    "LastUpdate",
    "Inserted",
];

/// MX patterns in policy syntax, e.g. "*.example.org, mx.example.net".
pub fn format_sts_mx(mx: &[StsMx]) -> String {
    mx.iter()
        .map(|e| {
            if e.wildcard {
                format!("*.{}", e.domain.ascii)
            } else {
                e.domain.ascii.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// One row per cached policy. Ages are relative to `now_secs`; the end of
/// validity is the only one that lies ahead.
pub fn mtasts_policy_table(policies: &[PolicyRecord], now_secs: i64) -> Table {
    let rows = policies
        .iter()
        .map(|p| {
            let backoff = if p.backoff {
                Cell::new("yes").tone(Tone::Bad)
            } else {
                Cell::new("no")
            };
            let extensions = p
                .extensions
                .iter()
                .map(|e| format!("{}={}", e.key, e.value))
                .collect::<Vec<_>>()
                .join("; ");
            DisplayRow::new(vec![
                Cell::new(format_age(p.last_use, false, now_secs)),
                Cell::new(p.domain.as_str()),
                backoff,
                Cell::new(p.record_id.as_str()),
                Cell::new(p.version.as_str()),
                Cell::new(p.mode.as_str()),
                Cell::new(format_sts_mx(&p.mx)),
                Cell::number(p.max_age_seconds),
                Cell::new(extensions),
                Cell::new(format_age(p.valid_end, true, now_secs)),
                Cell::new(format_age(p.last_update, false, now_secs)),
                Cell::new(format_age(p.inserted, false, now_secs)),
            ])
        })
        .collect();
    Table::new(COLUMNS).with_rows(rows)
}
