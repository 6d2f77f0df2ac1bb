//! TLS reports as a report table.

use super::table::{render, Layout, PolicyResult, Report};
use crate::display::{Cell, DisplayRow, Table};
use crate::format::{format_period, format_period_title};
use crate::rpc::types::{FailureDetails, TlsPolicyResult, TlsReportRecord, TlsResult, TlsResultPolicy};

pub const LAYOUT: Layout = Layout {
    report: 3,
    result: 3,
    detail: 8,
};

const COLUMNS: [&str; 14] = [
    "ID",
    "From",
    "Period (UTC)",
    "Policy",
    "Successes",
    "Failures",
    "Result Type",
    "Sending MTA",
    "Receiving MX Host",
    "Receiving MX HELO",
    "Receiving IP",
    "Count",
    "More",
    "Code",
];

/// Policy type, with the mode appended for MTA-STS policies ("sts: enforce").
pub fn policy_type(policy: &TlsResultPolicy) -> String {
    let mut s = policy.kind.clone();
    if s == "sts" {
        if let Some(mode) = policy.string.iter().find_map(|l| l.strip_prefix("mode:")) {
            s.push_str(": ");
            s.push_str(mode.trim());
        }
    }
    s
}

fn report_cells(rec: &TlsReportRecord) -> Vec<Cell> {
    let r = &rec.report;
    let from = [&r.organization_name, &r.contact_info, &rec.mail_from]
        .into_iter()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_default();

    let period = match (r.date_range.start, r.date_range.end) {
        (Some(start), Some(end)) => {
            Cell::new(format_period(start, end)).title(format_period_title(start, end))
        }
        _ => Cell::empty(),
    };

    vec![
        Cell::new(rec.id.to_string()).title(format!("#tlsrpt/reports/{}/{}", rec.domain, rec.id)),
        Cell::new(from).title(format!(
            "Organization: {}; Contact info: {}; Report ID: {}; Mail from: {}",
            r.organization_name, r.contact_info, r.report_id, rec.mail_from
        )),
        period,
    ]
}

fn result_cells(pr: &TlsPolicyResult) -> Vec<Cell> {
    vec![
        Cell::new(policy_type(&pr.policy)).title(pr.policy.string.join("\n")),
        Cell::number(pr.summary.total_successful_session_count),
        Cell::number(pr.summary.total_failure_session_count),
    ]
}

fn detail_cells(d: &FailureDetails) -> Vec<Cell> {
    vec![
        Cell::new(d.result_type.as_str()),
        Cell::new(d.sending_mta_ip.as_str()),
        Cell::new(d.receiving_mx_hostname.as_str()),
        Cell::new(d.receiving_mx_helo.as_str()),
        Cell::new(d.receiving_ip.as_str()),
        Cell::number(d.failed_session_count),
        Cell::new(d.additional_information.as_str()),
        Cell::new(d.failure_reason_code.as_str()),
    ]
}

pub fn tls_reports(records: &[TlsReportRecord]) -> Vec<Report> {
    records
        .iter()
        .map(|rec| Report {
            cells: report_cells(rec),
            results: rec
                .report
                .policies
                .iter()
                .map(|pr| PolicyResult {
                    cells: result_cells(pr),
                    details: pr.failure_details.iter().map(detail_cells).collect(),
                })
                .collect(),
        })
        .collect()
}

/// Table with a grouped header: report, policy and failure detail columns.
pub fn tls_report_table(records: &[TlsReportRecord]) -> Table {
    let groups = DisplayRow::new(vec![
        Cell::new("Report").colspan(LAYOUT.report),
        Cell::new("Policy").colspan(LAYOUT.result),
        Cell::new("Failure Details").colspan(LAYOUT.detail),
    ]);
    Table {
        header: vec![groups, DisplayRow::text(COLUMNS)],
        rows: render(LAYOUT, &tls_reports(records)),
    }
}

/// Policy and failure detail columns of a single outgoing result.
const RESULT_LAYOUT: Layout = Layout {
    report: 0,
    result: 3,
    detail: 8,
};

const RESULTS_COLUMNS: [&str; 9] = [
    "Day (UTC)",
    "Recipient domain",
    "Policy domain",
    "Host",
    "Policies",
    "Success",
    "Failure",
    "Failure details",
    "Send report",
];

/// Location of the results page for a policy domain. Results where the
/// recipient domain is the policy domain are about the recipient domain,
/// others about one of its MX hosts.
pub fn results_location(r: &TlsResult) -> String {
    let kind = if r.recipient_domain == r.policy_domain { "rcptdom" } else { "host" };
    format!("tlsrpt/results/{}/{}", kind, r.policy_domain)
}

fn yes(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        ""
    }
}

/// Outgoing TLS results, one row per day and recipient/policy domain, with
/// session counts summed over the policies.
pub fn tls_results_table(results: &[TlsResult]) -> Table {
    let mut sorted: Vec<&TlsResult> = results.iter().collect();
    sorted.sort_by(|a, b| {
        (&a.day_utc, &a.recipient_domain, &a.policy_domain)
            .cmp(&(&b.day_utc, &b.recipient_domain, &b.policy_domain))
    });

    let mut rows: Vec<DisplayRow> = sorted
        .into_iter()
        .map(|r| {
            let (mut success, mut failed, mut details) = (0, 0, 0);
            let mut kinds: Vec<&str> = Vec::new();
            for pr in &r.results {
                success += pr.summary.total_successful_session_count;
                failed += pr.summary.total_failure_session_count;
                details += pr.failure_details.len();
                if !kinds.contains(&pr.policy.kind.as_str()) {
                    kinds.push(&pr.policy.kind);
                }
            }
            DisplayRow::new(vec![
                Cell::new(r.day_utc.as_str()),
                Cell::new(r.recipient_domain.as_str()),
                Cell::new(r.policy_domain.as_str()).title(format!("#{}", results_location(r))),
                Cell::new(yes(r.is_host)),
                Cell::new(kinds.join(", ")),
                Cell::number(success),
                Cell::number(failed),
                Cell::number(details),
                Cell::new(yes(r.send_report)).right(),
            ])
        })
        .collect();

    if rows.is_empty() {
        rows.push(DisplayRow::new(vec![Cell::new("No results.").colspan(RESULTS_COLUMNS.len())]));
    }
    Table::new(RESULTS_COLUMNS).with_rows(rows)
}

/// Policies and failure details of one outgoing result.
pub fn tls_result_table(result: &TlsResult) -> Table {
    let report = Report {
        cells: Vec::new(),
        results: result
            .results
            .iter()
            .map(|pr| PolicyResult {
                cells: result_cells(pr),
                details: pr.failure_details.iter().map(detail_cells).collect(),
            })
            .collect(),
    };
    let groups = DisplayRow::new(vec![
        Cell::new("Policy").colspan(RESULT_LAYOUT.result),
        Cell::new("Failure Details").colspan(RESULT_LAYOUT.detail),
    ]);
    Table {
        header: vec![groups, DisplayRow::text(COLUMNS[LAYOUT.report..].iter().copied())],
        rows: render(RESULT_LAYOUT, &[report]),
    }
}
