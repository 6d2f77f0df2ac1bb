use futures_util::future::try_join;

use super::{crumbs, ConsoleViews, ViewResult};
use crate::display::{Block, Tone, View};
use crate::format::domain_string;
use crate::report::dmarc::dmarc_report_table;
use crate::report::evaluations::{evaluation_stats_table, evaluation_table};
use crate::report::summary::dmarc_summary_table;
use crate::rpc::AdminApi;

impl<A: AdminApi> ConsoleViews<A> {
    pub(super) fn dmarc_index(&self) -> View {
        crumbs(["DMARC"]).push(Block::Links(vec![
            (
                "dmarc/reports".into(),
                "Reports, incoming DMARC aggregate reports.".into(),
            ),
            (
                "dmarc/evaluations".into(),
                "Evaluations, for outgoing DMARC aggregate reports.".into(),
            ),
        ]))
    }

    pub(super) async fn dmarc_summaries(&self) -> ViewResult {
        let (start, end) = self.window();
        let summaries = self.api.dmarc_summaries(start, end, "").await?;

        let view = crumbs(["DMARC", "Aggregate reporting summary"]).paragraph(format!(
            "Below a summary of DMARC aggregate reporting results for the past {} days.",
            self.period_days()
        ));
        Ok(if summaries.is_empty() {
            view.push(Block::Notice(Tone::Warn, "No domains with reports.".into()))
        } else {
            view.table(dmarc_summary_table(&summaries))
        })
    }

    pub(super) async fn domain_dmarc(&self, d: &str) -> ViewResult {
        let (start, end) = self.window();
        let (reports, dnsdomain) =
            try_join(self.api.dmarc_reports(start, end, d), self.api.domain(d)).await?;

        let view = crumbs([
            format!("Domain {}", domain_string(&dnsdomain)).as_str(),
            "DMARC aggregate reports",
        ])
        .paragraph(format!(
            "Below the DMARC aggregate reports for the past {} days.",
            self.period_days()
        ));
        Ok(if reports.is_empty() {
            view.paragraph("No DMARC reports for domain.")
        } else {
            view.table(dmarc_report_table(d, &reports))
        })
    }

    pub(super) async fn domain_dmarc_report(&self, d: &str, id: i64) -> ViewResult {
        let (report, dnsdomain) =
            try_join(self.api.dmarc_report_id(d, id), self.api.domain(d)).await?;

        Ok(crumbs([
            format!("Domain {}", domain_string(&dnsdomain)).as_str(),
            "DMARC aggregate reports",
            format!("Report {id}").as_str(),
        ])
        .paragraph("Below is the raw report as received from the remote mail server.")
        .push(Block::Literal(format!("{report:#}"))))
    }

    pub(super) async fn dmarc_evaluations(&self) -> ViewResult {
        let stats = self.api.dmarc_evaluation_stats().await?;

        Ok(crumbs(["DMARC", "Evaluations"])
            .paragraph(
                "Incoming messages are checked against the DMARC policy of the domain in the \
                 message From header. Evaluations are stored when the policy requests reporting, \
                 and sent in aggregate reports at the requested interval.",
            )
            .table(evaluation_stats_table(&stats)))
    }

    pub(super) async fn dmarc_evaluations_domain(&self, domain: &str) -> ViewResult {
        let (d, evaluations) = self.api.dmarc_evaluations_domain(domain).await?;

        Ok(crumbs([
            "DMARC",
            "Evaluations",
            format!("Domain {}", domain_string(&d)).as_str(),
        ])
        .paragraph(
            "The fields Interval hours, Addresses and Policy are only filled for the first row \
             and whenever a new value in the published DMARC record is encountered.",
        )
        .table(evaluation_table(domain, &evaluations)))
    }
}
