use futures_util::future::try_join;

use super::{crumbs, ConsoleViews, ViewResult};
use crate::display::{Cell, DisplayRow, Table};
use crate::format::{format_age, format_byte_size, ip_domain_string};
use crate::rpc::AdminApi;

const COLUMNS: [&str; 11] = [
    "ID",
    "Submitted",
    "From",
    "To",
    "Size",
    "Attempts",
    "Next attempt",
    "Last attempt",
    "Last error",
    "Require TLS",
    "Transport",
];

impl<A: AdminApi> ConsoleViews<A> {
    pub(super) async fn queue(&self) -> ViewResult {
        let (msgs, transports) = try_join(self.api.queue_list(), self.api.transports()).await?;
        let now = self.now().timestamp();

        let view = crumbs(["Queue"]);
        if msgs.is_empty() {
            return Ok(view.paragraph("Currently no messages in the queue."));
        }

        let mut rows = Vec::with_capacity(msgs.len());
        for m in &msgs {
            // An undecodable address fails the whole page.
            let from = format!("{}@{}", m.sender_localpart, ip_domain_string(&m.sender_domain)?);
            let to = format!("{}@{}", m.recipient_localpart, ip_domain_string(&m.recipient_domain)?);
            let require_tls = match m.require_tls {
                None => "default",
                Some(true) => "yes",
                Some(false) => "fallback to insecure",
            };
            let transport = if m.transport.is_empty() {
                "(default)".to_string()
            } else if transports.contains_key(&m.transport) {
                m.transport.clone()
            } else {
                format!("{} (unknown)", m.transport)
            };
            rows.push(DisplayRow::new(vec![
                Cell::number(m.id),
                Cell::new(format_age(m.queued, false, now)),
                Cell::new(from),
                Cell::new(to),
                Cell::new(format_byte_size(m.size)).right(),
                Cell::number(m.attempts),
                Cell::new(format_age(m.next_attempt, true, now)),
                Cell::new(m.last_attempt.map_or_else(|| "-".to_string(), |t| format_age(t, false, now))),
                Cell::new(if m.last_error.is_empty() { "-" } else { m.last_error.as_str() }),
                Cell::new(require_tls),
                Cell::new(transport),
            ]));
        }

        Ok(view
            .paragraph("The messages below are currently in the queue.")
            .table(Table::new(COLUMNS).with_rows(rows)))
    }
}
