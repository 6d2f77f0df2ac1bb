//! DMARC evaluations pending for outgoing aggregate reports.
//!
//! Evaluations are flat rows. Interval, addresses and policy rarely change
//! between consecutive evaluations and are only shown when they do.

use std::collections::BTreeMap;

use super::merge::{merge_unchanged, LastSeen};
use crate::display::{Cell, DisplayRow, Table, Tone};
use crate::format::{domain_name, domain_string};
use crate::rpc::types::{DkimAuthResult, Evaluation, EvaluationPolicy, EvaluationStat, SpfAuthResult};

const COLUMNS: [&str; 14] = [
    "ID",
    "Evaluated",
    "Optional",
    "Interval hours",
    "Addresses",
    "Policy",
    "IP",
    "Disposition",
    "Aligned DKIM/SPF",
    "Envelope to",
    "Envelope from",
    "Message from",
    "DKIM details",
    "SPF details",
];

const INTERVAL: usize = 3;
const ADDRESSES: usize = 4;
const POLICY: usize = 5;

/// Policy as "k=v; " pairs, skipping empty values.
pub fn format_policy(p: &EvaluationPolicy) -> String {
    let percentage = p.percentage.to_string();
    let options = p.reporting_options.join(",");
    let mut s = String::new();
    for (k, v) in [
        ("p", p.policy.as_str()),
        ("sp", p.subdomain_policy.as_str()),
        ("adkim", p.adkim.as_str()),
        ("aspf", p.aspf.as_str()),
        ("pct", percentage.as_str()),
        ("fo", options.as_str()),
    ] {
        if !v.is_empty() {
            s.push_str(&format!("{k}={v}; "));
        }
    }
    s
}

fn pass_fail(v: bool) -> &'static str {
    if v {
        "pass"
    } else {
        "fail"
    }
}

fn dkim_details(domain: &str, results: &[DkimAuthResult]) -> String {
    results
        .iter()
        .map(|r| {
            let other = if r.domain != domain {
                format!(", domain {}", r.domain)
            } else {
                String::new()
            };
            format!("selector {}{}: {}", r.selector, other, r.result)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn spf_details(domain: &str, results: &[SpfAuthResult]) -> String {
    results
        .iter()
        .map(|r| {
            let other = if r.domain != domain {
                format!(", domain {}", r.domain)
            } else {
                String::new()
            };
            format!("{}{}: {}", r.scope, other, r.result)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn evaluation_row(domain: &str, e: &Evaluation) -> DisplayRow {
    let mut disposition = e.disposition.clone();
    if !e.override_reasons.is_empty() {
        let kinds: Vec<&str> = e.override_reasons.iter().map(|r| r.kind.as_str()).collect();
        disposition.push_str(&format!(" ({})", kinds.join(", ")));
    }
    let disposition_tone = if e.disposition == "none" { Tone::Plain } else { Tone::Bad };
    let aligned_tone = if e.aligned_dkim_pass && e.aligned_spf_pass {
        Tone::Plain
    } else {
        Tone::Warn
    };
    let spf_failed = !e.aligned_spf_pass || e.spf_results.iter().any(|r| r.result != "pass");
    let dkim_failed = e.dkim_results.iter().any(|r| r.result != "pass");

    DisplayRow::new(vec![
        Cell::number(e.id),
        Cell::new(e.evaluated.format("%a, %d %b %Y %H:%M:%S GMT").to_string()),
        Cell::new(if e.optional { "Yes" } else { "" }),
        Cell::new(format!("{}h", e.interval_hours)),
        Cell::new(e.addresses.join(", ")),
        Cell::new(format_policy(&e.policy_published)),
        Cell::new(e.source_ip.as_str()),
        Cell::new(disposition).tone(disposition_tone),
        Cell::new(format!("{}/{}", pass_fail(e.aligned_dkim_pass), pass_fail(e.aligned_spf_pass)))
            .tone(aligned_tone),
        Cell::new(e.envelope_to.as_str()),
        Cell::new(e.envelope_from.as_str()),
        Cell::new(e.header_from.as_str()),
        Cell::new(dkim_details(domain, &e.dkim_results)).tone(if dkim_failed { Tone::Warn } else { Tone::Plain }),
        Cell::new(spf_details(domain, &e.spf_results)).tone(if spf_failed && !e.spf_results.is_empty() {
            Tone::Warn
        } else {
            Tone::Plain
        }),
    ])
}

/// Evaluations for one domain, with repeated interval, addresses and policy
/// blanked.
pub fn evaluation_table(domain: &str, evaluations: &[Evaluation]) -> Table {
    let table = Table::new(COLUMNS);
    if evaluations.is_empty() {
        return table.with_rows(vec![DisplayRow::new(vec![
            Cell::new("No evaluations.").colspan(COLUMNS.len())
        ])]);
    }

    let rows = evaluations.iter().map(|e| evaluation_row(domain, e)).collect();
    let (rows, _) = merge_unchanged(rows, &[INTERVAL, ADDRESSES, POLICY], LastSeen::new());
    table.with_rows(rows)
}

/// Per-domain evaluation totals, sorted by domain.
pub fn evaluation_stats_table(stats: &BTreeMap<String, EvaluationStat>) -> Table {
    let table = Table::new(["Domain", "Dispositions", "Evaluations", "Send report"]);
    if stats.is_empty() {
        return table.with_rows(vec![DisplayRow::new(vec![
            Cell::new("No evaluations.").colspan(4)
        ])]);
    }
    let rows = stats
        .values()
        .map(|s| {
            DisplayRow::new(vec![
                Cell::new(domain_string(&s.domain))
                    .title(format!("#dmarc/evaluations/{}", domain_name(&s.domain))),
                Cell::new(s.dispositions.join(" ")),
                Cell::number(s.count),
                Cell::new(if s.send_report { "yes" } else { "" }).right(),
            ])
        })
        .collect();
    table.with_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn evaluation(id: i64, interval: i64, policy: &str) -> Evaluation {
        Evaluation {
            id,
            policy_domain: "example.org".into(),
            evaluated: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            optional: false,
            interval_hours: interval,
            addresses: vec!["mailto:dmarc@example.org".into()],
            policy_published: EvaluationPolicy {
                policy: policy.into(),
                percentage: 100,
                ..Default::default()
            },
            source_ip: "192.0.2.1".into(),
            disposition: "none".into(),
            aligned_dkim_pass: true,
            aligned_spf_pass: false,
            override_reasons: Vec::new(),
            envelope_to: "example.net".into(),
            envelope_from: "example.org".into(),
            header_from: "example.org".into(),
            dkim_results: Vec::new(),
            spf_results: Vec::new(),
        }
    }

    #[test]
    fn test_format_policy() {
        let p = EvaluationPolicy {
            policy: "reject".into(),
            adkim: "s".into(),
            percentage: 100,
            reporting_options: vec!["1".into()],
            ..Default::default()
        };
        assert_eq!(format_policy(&p), "p=reject; adkim=s; pct=100; fo=1; ");
    }

    #[test]
    fn test_repeated_fields_blanked() {
        let evals = vec![
            evaluation(1, 24, "reject"),
            evaluation(2, 24, "reject"),
            evaluation(3, 1, "reject"),
            evaluation(4, 24, "none"),
        ];
        let table = evaluation_table("example.org", &evals);
        let col = |row: usize, col: usize| table.rows[row].cells[col].text.as_str();

        assert_eq!(col(0, INTERVAL), "24h");
        assert_eq!(col(0, ADDRESSES), "mailto:dmarc@example.org");
        assert_eq!(col(1, INTERVAL), "");
        assert_eq!(col(1, ADDRESSES), "");
        assert_eq!(col(1, POLICY), "");
        assert_eq!(col(2, INTERVAL), "1h");
        assert_eq!(col(2, POLICY), "");
        assert_eq!(col(3, INTERVAL), "24h");
        assert_eq!(col(3, POLICY), "p=none; pct=100; ");
        assert_eq!(col(0, 8), "pass/fail");
        assert_eq!(col(0, 1), "Fri, 01 Mar 2024 12:00:00 GMT");
    }

    #[test]
    fn test_empty_evaluations() {
        let table = evaluation_table("example.org", &[]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells[0].colspan, 14);
    }
}
