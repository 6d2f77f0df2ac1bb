//! DMARC aggregate reports as a report table.
//!
//! Levels: report (metadata, published policy) → record (source IP and
//! policy evaluation) → one row per DKIM or SPF authentication result.

use chrono::DateTime;

use super::table::{render, Layout, PolicyResult, Report};
use crate::display::{Cell, DisplayRow, Table, Tone};
use crate::format::{format_period, format_period_title};
use crate::rpc::types::{DkimAuthResult, DomainFeedback, PolicyPublished, ReportRecord, SpfAuthResult};

pub const LAYOUT: Layout = Layout {
    report: 4,
    result: 8,
    detail: 1,
};

const COLUMNS: [&str; 13] = [
    "ID",
    "Organisation",
    "Period (UTC)",
    "Policy",
    "Source IP",
    "Messages",
    "Result",
    "ADKIM",
    "ASPF",
    "SMTP to",
    "SMTP from",
    "Header from",
    "Auth Results",
];

fn alignment(mode: &str) -> &str {
    match mode {
        "r" => "relaxed",
        "s" => "strict",
        other => other,
    }
}

/// Short description of a published policy, e.g.
/// "dkim relaxed, spf strict, policy reject". The policy domain is only
/// mentioned when it differs from `domain`.
pub fn policy_summary(domain: &str, p: &PolicyPublished) -> String {
    let mut parts = Vec::new();
    if p.domain != domain {
        parts.push(p.domain.clone());
    }
    if !p.adkim.is_empty() {
        parts.push(format!("dkim {}", alignment(&p.adkim)));
    }
    if !p.aspf.is_empty() {
        parts.push(format!("spf {}", alignment(&p.aspf)));
    }
    if !p.policy.is_empty() {
        parts.push(format!("policy {}", p.policy));
    }
    if !p.subdomain_policy.is_empty() && p.subdomain_policy != p.policy {
        parts.push(format!("subdomain {}", p.subdomain_policy));
    }
    if p.percentage != 100 {
        parts.push(format!("{}%", p.percentage));
    }
    parts.join(", ")
}

fn report_cells(domain: &str, fb: &DomainFeedback) -> Vec<Cell> {
    let m = &fb.report_metadata;
    let range = (
        DateTime::from_timestamp(m.date_range.begin, 0),
        DateTime::from_timestamp(m.date_range.end, 0),
    );
    let mut period = match range {
        (Some(start), Some(end)) => {
            Cell::new(format_period(start, end)).title(format_period_title(start, end))
        }
        _ => {
            tracing::warn!(
                report = fb.id,
                begin = m.date_range.begin,
                end = m.date_range.end,
                "DMARC report period out of range"
            );
            Cell::empty()
        }
    };
    if !m.errors.is_empty() {
        period = Cell::new(format!("{}, errors", period.text))
            .title(m.errors.join("; "))
            .tone(Tone::Warn);
    }

    vec![
        Cell::new(fb.id.to_string()).title(format!("#domains/{}/dmarc/{}", domain, fb.id)),
        Cell::new(m.org_name.as_str()).title(format!("Email: {}, ReportID: {}", m.email, m.report_id)),
        period,
        Cell::new(policy_summary(domain, &fb.policy_published)),
    ]
}

fn record_cells(rec: &ReportRecord) -> Vec<Cell> {
    let pol = &rec.row.policy_evaluated;
    let ids = &rec.identifiers;

    let mut disposition = pol.disposition.clone();
    for reason in &pol.reasons {
        disposition.push_str("; ");
        disposition.push_str(&reason.kind);
        if !reason.comment.is_empty() {
            disposition.push_str(&format!(" ({})", reason.comment));
        }
    }
    let disposition_tone = if pol.disposition == "none" { Tone::Plain } else { Tone::Bad };
    let pass_tone = |v: &str| if v == "pass" { Tone::Plain } else { Tone::Warn };

    vec![
        Cell::new(rec.row.source_ip.as_str()),
        Cell::number(rec.row.count),
        Cell::new(disposition).tone(disposition_tone),
        Cell::new(pol.dkim.as_str()).tone(pass_tone(&pol.dkim)),
        Cell::new(pol.spf.as_str()).tone(pass_tone(&pol.spf)),
        Cell::new(ids.envelope_to.as_str()),
        Cell::new(ids.envelope_from.as_str()),
        Cell::new(ids.header_from.as_str()),
    ]
}

fn dkim_cell(domain: &str, r: &DkimAuthResult) -> Cell {
    let mut text = format!("dkim: {}", r.result);
    if !r.selector.is_empty() {
        text.push_str(&format!(", {}", r.selector));
    }
    let mut title = String::new();
    if !r.human_result.is_empty() {
        title.push_str(&format!("additional information: {}; ", r.human_result));
    }
    if r.domain != domain {
        title.push_str(&format!("domain: {}", r.domain));
    }
    let tone = match r.result.as_str() {
        "none" | "pass" => Tone::Plain,
        _ => Tone::Warn,
    };
    let cell = Cell::new(text).tone(tone);
    if title.is_empty() {
        cell
    } else {
        cell.title(title)
    }
}

fn spf_cell(r: &SpfAuthResult) -> Cell {
    let tone = match r.result.as_str() {
        "none" | "neutral" | "pass" => Tone::Plain,
        _ => Tone::Warn,
    };
    Cell::new(format!("spf: {}, {} {}", r.result, r.scope, r.domain)).tone(tone)
}

/// Build the report tree for one domain's DMARC reports.
pub fn dmarc_reports(domain: &str, reports: &[DomainFeedback]) -> Vec<Report> {
    reports
        .iter()
        .map(|fb| Report {
            cells: report_cells(domain, fb),
            results: fb
                .records
                .iter()
                .map(|rec| PolicyResult {
                    cells: record_cells(rec),
                    details: rec
                        .auth_results
                        .dkim
                        .iter()
                        .map(|r| vec![dkim_cell(domain, r)])
                        .chain(rec.auth_results.spf.iter().map(|r| vec![spf_cell(r)]))
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

pub fn dmarc_report_table(domain: &str, reports: &[DomainFeedback]) -> Table {
    Table {
        header: vec![DisplayRow::text(COLUMNS)],
        rows: render(LAYOUT, &dmarc_reports(domain, reports)),
    }
}
