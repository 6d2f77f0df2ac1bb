//! Pages a location can resolve to.

/// A console page, with the values bound from its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Index,
    LogLevels,
    Accounts,
    Account(String),
    Domain(String),
    DomainDmarc(String),
    DomainDmarcReport { domain: String, id: i64 },
    DomainDnsRecords(String),
    DomainDnsCheck(String),
    Queue,
    TlsrptIndex,
    TlsrptSummaries,
    DomainTlsrpt(String),
    DomainTlsrptReport { domain: String, id: i64 },
    TlsrptResults,
    /// Results for a recipient domain, or for an MX host when `recipient` is false.
    TlsrptResultsDomain { recipient: bool, domain: String },
    MtastsPolicies,
    DmarcIndex,
    DmarcSummaries,
    DmarcEvaluations,
    DmarcEvaluationsDomain(String),
    Dnsbl,
}

impl Page {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::LogLevels => "loglevels",
            Page::Accounts => "accounts",
            Page::Account(_) => "account",
            Page::Domain(_) => "domain",
            Page::DomainDmarc(_) => "domain_dmarc",
            Page::DomainDmarcReport { .. } => "domain_dmarc_report",
            Page::DomainDnsRecords(_) => "domain_dnsrecords",
            Page::DomainDnsCheck(_) => "domain_dnscheck",
            Page::Queue => "queue",
            Page::TlsrptIndex => "tlsrpt",
            Page::TlsrptSummaries => "tlsrpt_reports",
            Page::DomainTlsrpt(_) => "domain_tlsrpt",
            Page::DomainTlsrptReport { .. } => "domain_tlsrpt_report",
            Page::TlsrptResults => "tlsrpt_results",
            Page::TlsrptResultsDomain { .. } => "tlsrpt_results_domain",
            Page::MtastsPolicies => "mtasts",
            Page::DmarcIndex => "dmarc",
            Page::DmarcSummaries => "dmarc_reports",
            Page::DmarcEvaluations => "dmarc_evaluations",
            Page::DmarcEvaluationsDomain(_) => "dmarc_evaluations_domain",
            Page::Dnsbl => "dnsbl",
        }
    }
}
