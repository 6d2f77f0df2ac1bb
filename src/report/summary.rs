//! Per-domain summaries of received DMARC and TLS reports.

use std::collections::BTreeMap;

use crate::display::{Cell, DisplayRow, Table, Tone};
use crate::format::domain_name;
use crate::rpc::types::{DmarcSummary, TlsrptSummary};

fn counts(map: &BTreeMap<String, i64>) -> String {
    map.iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn zero_is_good(n: i64) -> Cell {
    Cell::number(n).tone(if n == 0 { Tone::Good } else { Tone::Bad })
}

pub fn dmarc_summary_table(summaries: &[DmarcSummary]) -> Table {
    let rows = summaries
        .iter()
        .map(|s| {
            let rejected = format!("{}/{}", s.disposition_quarantine, s.disposition_reject);
            let rejected_tone = if s.disposition_quarantine == 0 && s.disposition_reject == 0 {
                Tone::Plain
            } else {
                Tone::Bad
            };
            DisplayRow::new(vec![
                Cell::new(s.domain.as_str()).title(format!("#domains/{}/dmarc", s.domain)),
                Cell::number(s.total),
                Cell::new(rejected).right().tone(rejected_tone),
                zero_is_good(s.dkim_fail),
                zero_is_good(s.spf_fail),
                Cell::new(counts(&s.policy_overrides)),
            ])
        })
        .collect();

    Table::new([
        "Domain",
        "Messages",
        "DMARC \"quarantine\"/\"reject\"",
        "DKIM \"fail\"",
        "SPF \"fail\"",
        "Policy overrides",
    ])
    .with_rows(rows)
}

pub fn tlsrpt_summary_table(summaries: &[TlsrptSummary]) -> Table {
    let rows = summaries
        .iter()
        .map(|s| {
            let name = domain_name(&s.policy_domain);
            DisplayRow::new(vec![
                Cell::new(name).title(format!("#tlsrpt/reports/{name}")),
                Cell::number(s.success),
                Cell::number(s.failure),
                Cell::new(counts(&s.result_type_counts)),
            ])
        })
        .collect();

    Table::new(["Policy domain", "Successes", "Failures", "Failure details"]).with_rows(rows)
}
