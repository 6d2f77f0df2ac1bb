use futures_util::future::{join, try_join};

use super::{crumbs, ConsoleViews, ViewResult};
use crate::display::{Block, Tone, View};
use crate::format::domain_string;
use crate::report::summary::tlsrpt_summary_table;
use crate::report::tlsrpt::{tls_report_table, tls_result_table, tls_results_table};
use crate::rpc::AdminApi;

fn yes_no(b: bool) -> &'static str {
    if b {
        "Yes"
    } else {
        "No"
    }
}

impl<A: AdminApi> ConsoleViews<A> {
    pub(super) fn tlsrpt_index(&self) -> View {
        crumbs(["TLSRPT"]).push(Block::Links(vec![
            ("tlsrpt/reports".into(), "Reports, incoming TLS reports.".into()),
            ("tlsrpt/results".into(), "Results, for outgoing TLS reports.".into()),
        ]))
    }

    pub(super) async fn tlsrpt_summaries(&self) -> ViewResult {
        let (start, end) = self.window();
        let summaries = self.api.tlsrpt_summaries(start, end, "").await?;

        let view = crumbs(["TLSRPT", "Reports"]).paragraph(format!(
            "Below a summary of TLS reports for the past {} days.",
            self.period_days()
        ));
        Ok(if summaries.is_empty() {
            view.push(Block::Notice(Tone::Warn, "No domains with TLS reports.".into()))
        } else {
            view.table(tlsrpt_summary_table(&summaries))
        })
    }

    pub(super) async fn domain_tlsrpt(&self, d: &str) -> ViewResult {
        let (start, end) = self.window();
        let (records, dnsdomain) =
            try_join(self.api.tls_reports(start, end, d), self.api.parse_domain(d)).await?;

        let view = crumbs([
            "TLSRPT",
            "Reports",
            format!("Domain {}", domain_string(&dnsdomain)).as_str(),
        ])
        .paragraph(format!(
            "Below the TLS reports for the past {} days.",
            self.period_days()
        ));
        Ok(if records.is_empty() {
            view.paragraph("No TLS reports for domain.")
        } else {
            view.table(tls_report_table(&records))
        })
    }

    pub(super) async fn domain_tlsrpt_report(&self, d: &str, id: i64) -> ViewResult {
        let (report, dnsdomain) =
            try_join(self.api.tls_report_id(d, id), self.api.parse_domain(d)).await?;

        Ok(crumbs([
            "TLSRPT",
            "Reports",
            format!("Domain {}", domain_string(&dnsdomain)).as_str(),
            format!("Report {id}").as_str(),
        ])
        .paragraph("Below is the raw report as received from the remote mail server.")
        .push(Block::Literal(format!("{report:#}"))))
    }

    pub(super) async fn tlsrpt_results(&self) -> ViewResult {
        let results = self.api.tlsrpt_results().await?;

        Ok(crumbs(["TLSRPT", "Results"])
            .paragraph(
                "Messages are delivered over SMTP with STARTTLS when the recipient domain's mail \
                 server supports or requires it. Successful and failed TLS connections are tracked \
                 per day, for recipient domains (MTA-STS) and for their MX hosts (DANE). A domain \
                 or host publishing a TLSRPT DNS record receives a report every 24 hours, by \
                 default only when there were failures.",
            )
            .table(tls_results_table(&results)))
    }

    /// Results for one policy domain. A failed TLSRPT record lookup is
    /// shown on the page, it does not fail it.
    pub(super) async fn tlsrpt_results_domain(&self, recipient: bool, d: &str) -> ViewResult {
        let (results, lookup) = join(
            self.api.tlsrpt_results_domain(recipient, d),
            self.api.lookup_tlsrpt_record(d),
        )
        .await;
        let (dnsdomain, results) = results?;

        let kind = if recipient { "Recipient domain" } else { "Host" };
        let mut view = crumbs([
            "TLSRPT",
            "Results",
            format!("{} {}", kind, domain_string(&dnsdomain)).as_str(),
        ])
        .heading("TLSRPT DNS record");
        match lookup {
            Ok(lookup) => {
                if !lookup.txt.is_empty() {
                    view = view.push(Block::Literal(lookup.txt));
                }
                if !lookup.error.is_empty() {
                    view = view.push(Block::Notice(Tone::Bad, lookup.error));
                }
            }
            Err(e) => {
                tracing::warn!(domain = %d, error = %e, "TLSRPT record lookup failed");
                view = view.push(Block::Notice(Tone::Bad, format!("error: {e}")));
            }
        }

        view = view.paragraph(format!(
            "Below are the results per day and {} domain that may be sent in a report.",
            if recipient { "policy" } else { "recipient" }
        ));
        if results.is_empty() {
            return Ok(view.paragraph("No results."));
        }
        for r in &results {
            let other = if recipient { &r.policy_domain } else { &r.recipient_domain };
            view = view
                .heading(format!("{} - {}", r.day_utc, other))
                .paragraph(format!(
                    "Send report (if TLSRPT policy exists and has address): {}",
                    yes_no(r.send_report)
                ))
                .paragraph(format!(
                    "Report about (MX) host (instead of recipient domain): {}",
                    yes_no(r.is_host)
                ))
                .table(tls_result_table(r));
        }
        Ok(view)
    }
}
