//! Admin API façade.
//!
//! # Data Flow
//! ```text
//! view function
//!     → AdminApi method (typed params)
//!     → client.rs: POST <base>/<Method> {"params": [...]}
//!     → {"result": ...} decoded into types.rs
//!       or {"error": {...}} mapped to RpcError
//! ```
//!
//! # Design Decisions
//! - Views depend on the trait only; tests substitute in-memory fakes
//! - Every call is async and may fail with `RpcError`
//! - Read-only calls may be retried, mutations never are

pub mod client;
pub mod error;
pub mod types;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

pub use client::HttpAdminClient;
pub use error::{RpcError, RpcResult};
use types::{
    AccountConfig, CheckResult, DmarcSummary, DnsblStatus, Domain, DomainFeedback, Evaluation,
    EvaluationStat, PolicyRecord, QueueMsg, TlsReportRecord, TlsResult, TlsrptRecordLookup,
    TlsrptSummary,
};

/// Remote operations of the admin API used by the console.
#[allow(async_fn_in_trait)]
pub trait AdminApi {
    /// Configured domains.
    async fn domains(&self) -> RpcResult<Vec<Domain>>;

    /// A configured domain, by name.
    async fn domain(&self, domain: &str) -> RpcResult<Domain>;

    /// Parse a domain name, which need not be configured.
    async fn parse_domain(&self, domain: &str) -> RpcResult<Domain>;

    /// Localpart to account name for a domain.
    async fn domain_localparts(&self, domain: &str) -> RpcResult<BTreeMap<String, String>>;

    /// Suggested DNS records for a domain, one zone file line each.
    async fn domain_records(&self, domain: &str) -> RpcResult<Vec<String>>;

    /// Check the live DNS records and connectivity of a domain. Slow.
    async fn check_domain(&self, domain: &str) -> RpcResult<CheckResult>;

    async fn accounts(&self) -> RpcResult<Vec<String>>;

    async fn account(&self, account: &str) -> RpcResult<AccountConfig>;

    /// Update sending limits and maximum message size (0 is unlimited).
    async fn set_account_limits(
        &self,
        account: &str,
        max_outgoing_messages_per_day: i64,
        max_first_time_recipients_per_day: i64,
        max_msg_size: u64,
    ) -> RpcResult<()>;

    async fn queue_size(&self) -> RpcResult<i64>;

    async fn queue_list(&self) -> RpcResult<Vec<QueueMsg>>;

    /// Configured transports, by name.
    async fn transports(&self) -> RpcResult<BTreeMap<String, serde_json::Value>>;

    async fn check_updates_enabled(&self) -> RpcResult<bool>;

    /// Package to log level; the empty package is the default level.
    async fn log_levels(&self) -> RpcResult<BTreeMap<String, String>>;

    async fn dnsbl_status(&self) -> RpcResult<DnsblStatus>;

    /// Summaries of DMARC reports overlapping the period, for one or all (empty) domains.
    async fn dmarc_summaries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        domain: &str,
    ) -> RpcResult<Vec<DmarcSummary>>;

    async fn dmarc_reports(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        domain: &str,
    ) -> RpcResult<Vec<DomainFeedback>>;

    /// A single DMARC report as stored, kept as raw JSON.
    async fn dmarc_report_id(&self, domain: &str, report_id: i64) -> RpcResult<serde_json::Value>;

    async fn dmarc_evaluation_stats(&self) -> RpcResult<BTreeMap<String, EvaluationStat>>;

    async fn dmarc_evaluations_domain(&self, domain: &str) -> RpcResult<(Domain, Vec<Evaluation>)>;

    async fn tlsrpt_summaries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        policy_domain: &str,
    ) -> RpcResult<Vec<TlsrptSummary>>;

    async fn tls_reports(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        policy_domain: &str,
    ) -> RpcResult<Vec<TlsReportRecord>>;

    /// A single TLS report as stored, kept as raw JSON.
    async fn tls_report_id(&self, domain: &str, report_id: i64) -> RpcResult<serde_json::Value>;

    /// TLS connection results pending for outgoing TLS reports.
    async fn tlsrpt_results(&self) -> RpcResult<Vec<TlsResult>>;

    /// TLS results for a recipient domain, or for an MX host when
    /// `recipient_domain` is false.
    async fn tlsrpt_results_domain(
        &self,
        recipient_domain: bool,
        policy_domain: &str,
    ) -> RpcResult<(Domain, Vec<TlsResult>)>;

    /// Look up the TLSRPT DNS record of a domain. A missing or broken
    /// record is reported in the result, not as an error.
    async fn lookup_tlsrpt_record(&self, domain: &str) -> RpcResult<TlsrptRecordLookup>;

    /// Cached MTA-STS policies.
    async fn mtasts_policies(&self) -> RpcResult<Vec<PolicyRecord>>;
}
