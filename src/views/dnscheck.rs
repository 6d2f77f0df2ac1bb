use futures_util::future::try_join;

use super::{crumbs, ConsoleViews, ViewResult};
use crate::display::{Block, Cell, DisplayRow, Table, Tone, View};
use crate::format::domain_string;
use crate::rpc::types::{CheckNotes, CheckResult, TlsrptCheck};
use crate::rpc::AdminApi;

/// Append one check: its verdict, its details, then the records to add.
fn section(mut view: View, title: &str, notes: &CheckNotes, details: Vec<Block>) -> View {
    view = view.heading(title);
    if notes.is_ok() {
        view = view.push(Block::Notice(Tone::Good, "OK".into()));
    }
    for e in &notes.errors {
        view = view.push(Block::Notice(Tone::Bad, e.clone()));
    }
    for w in &notes.warnings {
        view = view.push(Block::Notice(Tone::Warn, w.clone()));
    }
    for block in details {
        view = view.push(block);
    }
    if !notes.instructions.is_empty() {
        view = view.paragraph("Instructions:");
        for i in &notes.instructions {
            view = view.push(Block::Literal(i.clone()));
        }
    }
    view
}

fn line(label: &str, value: &str) -> Option<Block> {
    (!value.is_empty()).then(|| Block::Paragraph(format!("{label}: {value}")))
}

fn tlsrpt_details(check: &TlsrptCheck) -> Vec<Block> {
    line("TXT record", &check.txt).into_iter().collect()
}

fn ip_rev_details(check: &CheckResult) -> Vec<Block> {
    let r = &check.ip_rev;
    if r.ip_names.is_empty() {
        return Vec::new();
    }
    let rows = r
        .ip_names
        .iter()
        .map(|(ip, names)| DisplayRow::text([ip.clone(), names.join(", ")]))
        .collect();
    vec![
        Block::Paragraph(format!("Hostname: {}", domain_string(&r.hostname))),
        Block::Table(Table::new(["IP", "Addresses"]).with_rows(rows)),
    ]
}

fn mx_details(check: &CheckResult) -> Vec<Block> {
    if check.mx.records.is_empty() {
        return Vec::new();
    }
    let rows = check
        .mx
        .records
        .iter()
        .map(|mx| {
            DisplayRow::new(vec![
                Cell::number(mx.pref),
                Cell::new(mx.host.as_str()),
                Cell::new(mx.ips.join(", ")),
            ])
        })
        .collect();
    vec![Block::Table(Table::new(["Preference", "Host", "IPs"]).with_rows(rows))]
}

fn dkim_details(check: &CheckResult) -> Vec<Block> {
    if check.dkim.records.is_empty() {
        return Vec::new();
    }
    let rows = check
        .dkim
        .records
        .iter()
        .map(|r| DisplayRow::text([r.selector.as_str(), r.txt.as_str()]))
        .collect();
    vec![Block::Table(Table::new(["Selector", "TXT record"]).with_rows(rows))]
}

fn srv_conf_details(check: &CheckResult) -> Vec<Block> {
    if check.srv_conf.srvs.is_empty() {
        return Vec::new();
    }
    let mut rows = Vec::new();
    for (service, records) in &check.srv_conf.srvs {
        if records.is_empty() {
            rows.push(DisplayRow::new(vec![
                Cell::new(service.as_str()),
                Cell::new("(none)").colspan(4),
            ]));
        }
        for r in records {
            rows.push(DisplayRow::new(vec![
                Cell::new(service.as_str()),
                Cell::number(r.priority),
                Cell::number(r.weight),
                Cell::number(r.port),
                Cell::new(r.target.as_str()),
            ]));
        }
    }
    vec![Block::Table(
        Table::new(["Service", "Priority", "Weight", "Port", "Host"]).with_rows(rows),
    )]
}

fn autodiscover_details(check: &CheckResult) -> Vec<Block> {
    if check.autodiscover.records.is_empty() {
        return Vec::new();
    }
    let rows = check
        .autodiscover
        .records
        .iter()
        .map(|r| {
            DisplayRow::new(vec![
                Cell::new(r.target.as_str()),
                Cell::number(r.port),
                Cell::number(r.priority),
                Cell::number(r.weight),
                Cell::new(r.ips.join(", ")),
            ])
        })
        .collect();
    vec![Block::Table(
        Table::new(["Host", "Port", "Priority", "Weight", "IPs"]).with_rows(rows),
    )]
}

/// All checks in a fixed order, each with its verdict and details.
pub fn check_sections(view: View, check: &CheckResult) -> View {
    let spf = [
        line("Domain TXT record", &check.spf.domain_txt),
        line("Host TXT record", &check.spf.host_txt),
    ];
    let dmarc = if check.dmarc.domain.is_empty() {
        Vec::new()
    } else {
        [
            line("Domain", &check.dmarc.domain),
            line("TXT record", &check.dmarc.txt),
        ]
        .into_iter()
        .flatten()
        .collect()
    };
    let mut mtasts: Vec<Block> = line("MTA-STS record", &check.mtasts.txt).into_iter().collect();
    if !check.mtasts.policy_text.is_empty() {
        mtasts.push(Block::Paragraph("MTA-STS policy:".into()));
        mtasts.push(Block::Literal(check.mtasts.policy_text.clone()));
    }
    let autoconf = [
        line("Client settings domain IPs", &check.autoconf.client_settings_domain_ips.join(", ")),
        line("IPs", &check.autoconf.ips.join(", ")),
    ];

    let view = section(view, "DNSSEC", &check.dnssec.notes, Vec::new());
    let view = section(view, "IPRev", &check.ip_rev.notes, ip_rev_details(check));
    let view = section(view, "MX", &check.mx.notes, mx_details(check));
    let view = section(view, "TLS", &check.tls.notes, Vec::new());
    let view = section(view, "DANE", &check.dane.notes, Vec::new());
    let view = section(view, "SPF", &check.spf.notes, spf.into_iter().flatten().collect());
    let view = section(view, "DKIM", &check.dkim.notes, dkim_details(check));
    let view = section(view, "DMARC", &check.dmarc.notes, dmarc);
    let view = section(view, "Host TLSRPT", &check.host_tlsrpt.notes, tlsrpt_details(&check.host_tlsrpt));
    let view = section(
        view,
        "Domain TLSRPT",
        &check.domain_tlsrpt.notes,
        tlsrpt_details(&check.domain_tlsrpt),
    );
    let view = section(view, "MTA-STS", &check.mtasts.notes, mtasts);
    let view = section(view, "SRV conf", &check.srv_conf.notes, srv_conf_details(check));
    let view = section(view, "Autoconf", &check.autoconf.notes, autoconf.into_iter().flatten().collect());
    section(view, "Autodiscover", &check.autodiscover.notes, autodiscover_details(check))
}

impl<A: AdminApi> ConsoleViews<A> {
    pub(super) async fn domain_dns_check(&self, d: &str) -> ViewResult {
        let (check, dnsdomain) = try_join(self.api.check_domain(d), self.api.domain(d)).await?;
        tracing::debug!(
            domain = %d,
            errors = check_error_count(&check),
            "Domain check finished"
        );

        let view = crumbs([format!("Domain {}", domain_string(&dnsdomain)).as_str(), "Check DNS"])
            .heading("DNS records and domain configuration check");
        Ok(check_sections(view, &check))
    }
}

/// Errors over all checks.
fn check_error_count(check: &CheckResult) -> usize {
    [
        &check.dnssec.notes,
        &check.ip_rev.notes,
        &check.mx.notes,
        &check.tls.notes,
        &check.dane.notes,
        &check.spf.notes,
        &check.dkim.notes,
        &check.dmarc.notes,
        &check.host_tlsrpt.notes,
        &check.domain_tlsrpt.notes,
        &check.mtasts.notes,
        &check.srv_conf.notes,
        &check.autoconf.notes,
        &check.autodiscover.notes,
    ]
    .iter()
    .map(|n| n.errors.len())
    .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::text::render_view_with;
    use crate::rpc::types::{MxRecord, SrvRecord};

    fn headings(view: &View) -> Vec<&str> {
        view.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_sections_in_order_and_ok_when_clean() {
        let view = check_sections(View::new(["Check"]), &CheckResult::default());
        assert_eq!(
            headings(&view),
            vec![
                "DNSSEC",
                "IPRev",
                "MX",
                "TLS",
                "DANE",
                "SPF",
                "DKIM",
                "DMARC",
                "Host TLSRPT",
                "Domain TLSRPT",
                "MTA-STS",
                "SRV conf",
                "Autoconf",
                "Autodiscover"
            ]
        );
        let oks = view
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Notice(Tone::Good, t) if t == "OK"))
            .count();
        assert_eq!(oks, 14);
    }

    #[test]
    fn test_errors_warnings_and_instructions() {
        let mut check = CheckResult::default();
        check.mx.records = vec![MxRecord {
            host: "mail.example.org.".into(),
            pref: 10,
            ips: vec!["192.0.2.1".into()],
        }];
        check.mx.notes.warnings = vec!["no ipv6 address".into()];
        check.spf.domain_txt = "v=spf1 mx -all".into();
        check.spf.notes.errors = vec!["no spf record for host".into()];
        check.spf.notes.instructions = vec!["mail.example.org. TXT \"v=spf1 a -all\"".into()];
        let imaps = SrvRecord {
            target: "mail.example.org.".into(),
            port: 993,
            priority: 0,
            weight: 1,
        };
        check.srv_conf.srvs.insert("_imaps".into(), vec![imaps]);
        check.srv_conf.srvs.insert("_pop3s".into(), Vec::new());

        let view = check_sections(View::new(["Check"]), &check);
        assert!(view
            .blocks
            .contains(&Block::Notice(Tone::Bad, "no spf record for host".into())));
        assert!(view
            .blocks
            .contains(&Block::Notice(Tone::Warn, "no ipv6 address".into())));
        assert_eq!(check_error_count(&check), 1);

        let text = render_view_with(&view, false);
        assert!(text.contains("mail.example.org.  192.0.2.1"), "{text}");
        assert!(text.contains("Domain TXT record: v=spf1 mx -all"), "{text}");
        assert!(text.contains("    mail.example.org. TXT \"v=spf1 a -all\""), "{text}");
        assert!(text.contains("_pop3s   (none)"), "{text}");
        assert!(!text.contains("Host TXT record"));
    }
}
