use super::{crumbs, ConsoleViews, ViewResult};
use crate::display::{Block, Cell, DisplayRow, Table, Tone};
use crate::report::mtasts::mtasts_policy_table;
use crate::rpc::AdminApi;

impl<A: AdminApi> ConsoleViews<A> {
    pub(super) async fn log_levels(&self) -> ViewResult {
        let levels = self.api.log_levels().await?;

        let rows = levels
            .iter()
            .map(|(pkg, level)| {
                let pkg = if pkg.is_empty() { "(default)" } else { pkg.as_str() };
                DisplayRow::text([pkg, level.as_str()])
            })
            .collect();

        Ok(crumbs(["Log levels"])
            .paragraph(
                "Log levels are set per package. Changes made at runtime are lost when the \
                 server restarts.",
            )
            .table(Table::new(["Package", "Level"]).with_rows(rows)))
    }

    pub(super) async fn dnsbl(&self) -> ViewResult {
        let status = self.api.dnsbl_status().await?;

        let view = crumbs(["DNS blocklist status for IPs"]);
        if status.is_empty() {
            return Ok(view.push(Block::Notice(Tone::Bad, "No IPs found.".into())));
        }

        let mut rows = Vec::new();
        for (ip, zones) in &status {
            let span = zones.len().max(1);
            let ip_cell = Cell::new(ip.as_str())
                .title(format!("https://multirbl.valli.org/lookup/{ip}.html"))
                .rowspan(span);
            if zones.is_empty() {
                rows.push(DisplayRow::new(vec![ip_cell, Cell::empty().colspan(2)]));
                continue;
            }
            let mut first = Some(ip_cell);
            for (zone, result) in zones {
                let tone = if result == "pass" { Tone::Plain } else { Tone::Bad };
                let mut cells: Vec<Cell> = first.take().into_iter().collect();
                cells.push(Cell::new(zone.as_str()));
                cells.push(Cell::new(result.as_str()).tone(tone));
                rows.push(DisplayRow::new(cells));
            }
        }

        Ok(view
            .paragraph("Use a third party DNSBL checker to see if an IP is on one of the many blocklists.")
            .table(Table::new(["IP", "Zone", "Result"]).with_rows(rows)))
    }

    pub(super) async fn mtasts_policies(&self) -> ViewResult {
        let policies = self.api.mtasts_policies().await?;
        let now = self.now().timestamp();

        let view = crumbs(["MTA-STS policies"])
            .paragraph(
                "MTA-STS lets email domains publish a policy requiring SMTP STARTTLS with a \
                 verified certificate for delivery to their MX hosts. See RFC 8461.",
            )
            .paragraph(
                "Policies below were fetched during outgoing deliveries and are cached until \
                 they expire. A policy in backoff has a DNS record, but its policy could not \
                 be fetched.",
            );
        Ok(if policies.is_empty() {
            view.paragraph("No data")
        } else {
            view.table(mtasts_policy_table(&policies, now))
        })
    }
}
