use futures_util::future::try_join3;

use super::{crumbs, ConsoleViews, ViewResult};
use crate::display::{Block, Tone};
use crate::format::{domain_name, domain_string};
use crate::rpc::AdminApi;

fn link(target: impl Into<String>, text: impl Into<String>) -> (String, String) {
    (target.into(), text.into())
}

impl<A: AdminApi> ConsoleViews<A> {
    pub(super) async fn index(&self) -> ViewResult {
        let (domains, queue_size, check_updates) = try_join3(
            self.api.domains(),
            self.api.queue_size(),
            self.api.check_updates_enabled(),
        )
        .await?;

        let mut view = crumbs([]);
        if !check_updates {
            view = view.push(Block::Notice(
                Tone::Warn,
                "Checking for updates has not been enabled in the server configuration. \
                 Make sure you stay up to date through another mechanism."
                    .into(),
            ));
        }

        view = view.push(Block::Links(vec![
            link("accounts", "Accounts"),
            link("queue", format!("Queue ({queue_size})")),
        ]));

        view = view.heading("Domains");
        view = if domains.is_empty() {
            view.push(Block::Notice(Tone::Bad, "No domains".into()))
        } else {
            view.push(Block::Links(
                domains
                    .iter()
                    .map(|d| link(format!("domains/{}", domain_name(d)), domain_string(d)))
                    .collect(),
            ))
        };

        Ok(view
            .heading("Reports")
            .push(Block::Links(vec![
                link("dmarc/reports", "DMARC"),
                link("tlsrpt/reports", "TLS"),
            ]))
            .heading("Operations")
            .push(Block::Links(vec![
                link("mtasts", "MTA-STS policies"),
                link("dmarc/evaluations", "DMARC evaluations"),
                link("tlsrpt/results", "TLS connection results"),
            ]))
            .heading("DNS blocklist status")
            .push(Block::Links(vec![link("dnsbl", "DNSBL status")]))
            .heading("Configuration")
            .push(Block::Links(vec![link("loglevels", "Log levels")])))
    }
}
