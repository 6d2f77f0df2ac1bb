use futures_util::future::{try_join, try_join4};

use super::{crumbs, ConsoleViews, ViewResult};
use crate::display::{Block, Cell, DisplayRow, Table, Tone};
use crate::format::domain_string;
use crate::report::summary::{dmarc_summary_table, tlsrpt_summary_table};
use crate::rpc::AdminApi;

impl<A: AdminApi> ConsoleViews<A> {
    pub(super) async fn domain(&self, d: &str) -> ViewResult {
        let (start, end) = self.window();
        let (dmarc, tlsrpt, localparts, dnsdomain) = try_join4(
            self.api.dmarc_summaries(start, end, d),
            self.api.tlsrpt_summaries(start, end, d),
            self.api.domain_localparts(d),
            self.api.domain(d),
        )
        .await?;

        let addresses = Table::new(["Address", "Account"]).with_rows(
            localparts
                .iter()
                .map(|(localpart, account)| {
                    let address = if localpart.is_empty() { "(catchall)" } else { localpart.as_str() };
                    DisplayRow::new(vec![
                        Cell::new(address),
                        Cell::new(account.as_str()).title(format!("#accounts/{account}")),
                    ])
                })
                .collect(),
        );

        let mut view = crumbs([format!("Domain {}", domain_string(&dnsdomain)).as_str()])
            .push(Block::Links(vec![
                (format!("domains/{d}/dnsrecords"), "Required DNS records".to_string()),
                (
                    format!("domains/{d}/dnscheck"),
                    "Check current actual DNS records and domain configuration".to_string(),
                ),
            ]))
            .heading("DMARC aggregate reports summary");
        view = if dmarc.is_empty() {
            view.push(Block::Notice(Tone::Warn, "No DMARC reports for domain.".into()))
        } else {
            view.table(dmarc_summary_table(&dmarc))
        };
        view = view.heading("TLS reports summary");
        view = if tlsrpt.is_empty() {
            view.push(Block::Notice(Tone::Warn, "No TLS reports for domain.".into()))
        } else {
            view.table(tlsrpt_summary_table(&tlsrpt))
        };
        Ok(view.heading("Addresses").table(addresses))
    }

    pub(super) async fn domain_dns_records(&self, d: &str) -> ViewResult {
        let (records, dnsdomain) = try_join(self.api.domain_records(d), self.api.domain(d)).await?;

        Ok(crumbs([format!("Domain {}", domain_string(&dnsdomain)).as_str(), "DNS Records"])
            .heading("Required DNS records")
            .push(Block::Literal(records.join("\n"))))
    }
}
