//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use mail_admin_console::display::text::render_view_with;
use mail_admin_console::display::View;
use mail_admin_console::routing::Surface;
use mail_admin_console::rpc::types::{
    AccountConfig, CheckResult, DmarcSummary, DnsblStatus, Domain, DomainFeedback, Evaluation,
    EvaluationStat, PolicyRecord, QueueMsg, TlsReportRecord, TlsResult, TlsrptRecordLookup,
    TlsrptSummary,
};
use mail_admin_console::rpc::{AdminApi, RpcError, RpcResult};

/// Limits passed to `set_account_limits`.
pub type LimitsCall = (String, i64, i64, u64);

/// In-memory admin API with per-method delays and failures.
///
/// Every call is counted by method name before any delay or failure applies.
#[derive(Default)]
pub struct FakeApi {
    calls: RefCell<HashMap<&'static str, usize>>,
    delays: HashMap<&'static str, Duration>,
    failures: HashMap<&'static str, RpcError>,
    pub domains: Vec<Domain>,
    pub accounts: Vec<String>,
    pub queue: Vec<QueueMsg>,
    pub log_levels: BTreeMap<String, String>,
    pub limits: RefCell<Vec<LimitsCall>>,
    pub check: CheckResult,
    pub tls_results: Vec<TlsResult>,
    pub tlsrpt_record: TlsrptRecordLookup,
    pub policies: Vec<PolicyRecord>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call of `method`.
    pub fn delay(mut self, method: &'static str, delay: Duration) -> Self {
        self.delays.insert(method, delay);
        self
    }

    /// Fail every call of `method` with `err`.
    pub fn fail(mut self, method: &'static str, err: RpcError) -> Self {
        self.failures.insert(method, err);
        self
    }

    pub fn calls(&self, method: &str) -> usize {
        self.calls.borrow().get(method).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }

    async fn enter(&self, method: &'static str) -> RpcResult<()> {
        *self.calls.borrow_mut().entry(method).or_default() += 1;
        if let Some(delay) = self.delays.get(method) {
            tokio::time::sleep(*delay).await;
        }
        match self.failures.get(method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Server error as the admin API reports a caller mistake.
pub fn user_error(message: &str) -> RpcError {
    RpcError::Server {
        code: "user:error".into(),
        message: message.into(),
    }
}

impl AdminApi for FakeApi {
    async fn domains(&self) -> RpcResult<Vec<Domain>> {
        self.enter("Domains").await?;
        Ok(self.domains.clone())
    }

    async fn domain(&self, domain: &str) -> RpcResult<Domain> {
        self.enter("Domain").await?;
        self.domains
            .iter()
            .find(|d| d.ascii == domain)
            .cloned()
            .ok_or_else(|| user_error("no such domain"))
    }

    async fn parse_domain(&self, domain: &str) -> RpcResult<Domain> {
        self.enter("ParseDomain").await?;
        Ok(Domain::new(domain))
    }

    async fn domain_localparts(&self, _domain: &str) -> RpcResult<BTreeMap<String, String>> {
        self.enter("DomainLocalparts").await?;
        Ok(BTreeMap::new())
    }

    async fn domain_records(&self, domain: &str) -> RpcResult<Vec<String>> {
        self.enter("DomainRecords").await?;
        Ok(vec![format!("{domain}. MX 10 mail.{domain}.")])
    }

    async fn check_domain(&self, domain: &str) -> RpcResult<CheckResult> {
        self.enter("CheckDomain").await?;
        Ok(CheckResult {
            domain: domain.to_string(),
            ..self.check.clone()
        })
    }

    async fn accounts(&self) -> RpcResult<Vec<String>> {
        self.enter("Accounts").await?;
        Ok(self.accounts.clone())
    }

    async fn account(&self, account: &str) -> RpcResult<AccountConfig> {
        self.enter("Account").await?;
        if !self.accounts.iter().any(|a| a == account) {
            return Err(user_error("no such account"));
        }
        Ok(AccountConfig::default())
    }

    async fn set_account_limits(
        &self,
        account: &str,
        max_outgoing_messages_per_day: i64,
        max_first_time_recipients_per_day: i64,
        max_msg_size: u64,
    ) -> RpcResult<()> {
        self.enter("SetAccountLimits").await?;
        self.limits.borrow_mut().push((
            account.to_string(),
            max_outgoing_messages_per_day,
            max_first_time_recipients_per_day,
            max_msg_size,
        ));
        Ok(())
    }

    async fn queue_size(&self) -> RpcResult<i64> {
        self.enter("QueueSize").await?;
        Ok(self.queue.len() as i64)
    }

    async fn queue_list(&self) -> RpcResult<Vec<QueueMsg>> {
        self.enter("QueueList").await?;
        Ok(self.queue.clone())
    }

    async fn transports(&self) -> RpcResult<BTreeMap<String, Value>> {
        self.enter("Transports").await?;
        Ok(BTreeMap::new())
    }

    async fn check_updates_enabled(&self) -> RpcResult<bool> {
        self.enter("CheckUpdatesEnabled").await?;
        Ok(true)
    }

    async fn log_levels(&self) -> RpcResult<BTreeMap<String, String>> {
        self.enter("LogLevels").await?;
        Ok(self.log_levels.clone())
    }

    async fn dnsbl_status(&self) -> RpcResult<DnsblStatus> {
        self.enter("DNSBLStatus").await?;
        Ok(DnsblStatus::default())
    }

    async fn dmarc_summaries(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _domain: &str,
    ) -> RpcResult<Vec<DmarcSummary>> {
        self.enter("DMARCSummaries").await?;
        Ok(Vec::new())
    }

    async fn dmarc_reports(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _domain: &str,
    ) -> RpcResult<Vec<DomainFeedback>> {
        self.enter("DMARCReports").await?;
        Ok(Vec::new())
    }

    async fn dmarc_report_id(&self, _domain: &str, report_id: i64) -> RpcResult<Value> {
        self.enter("DMARCReportID").await?;
        Ok(serde_json::json!({ "ID": report_id }))
    }

    async fn dmarc_evaluation_stats(&self) -> RpcResult<BTreeMap<String, EvaluationStat>> {
        self.enter("DMARCEvaluationStats").await?;
        Ok(BTreeMap::new())
    }

    async fn dmarc_evaluations_domain(&self, domain: &str) -> RpcResult<(Domain, Vec<Evaluation>)> {
        self.enter("DMARCEvaluationsDomain").await?;
        Ok((Domain::new(domain), Vec::new()))
    }

    async fn tlsrpt_summaries(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _policy_domain: &str,
    ) -> RpcResult<Vec<TlsrptSummary>> {
        self.enter("TLSRPTSummaries").await?;
        Ok(Vec::new())
    }

    async fn tls_reports(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _policy_domain: &str,
    ) -> RpcResult<Vec<TlsReportRecord>> {
        self.enter("TLSReports").await?;
        Ok(Vec::new())
    }

    async fn tls_report_id(&self, _domain: &str, report_id: i64) -> RpcResult<Value> {
        self.enter("TLSReportID").await?;
        Ok(serde_json::json!({ "ID": report_id }))
    }

    async fn tlsrpt_results(&self) -> RpcResult<Vec<TlsResult>> {
        self.enter("TLSRPTResults").await?;
        Ok(self.tls_results.clone())
    }

    async fn tlsrpt_results_domain(
        &self,
        recipient_domain: bool,
        policy_domain: &str,
    ) -> RpcResult<(Domain, Vec<TlsResult>)> {
        self.enter("TLSRPTResultsDomain").await?;
        let results = self
            .tls_results
            .iter()
            .filter(|r| {
                r.policy_domain == policy_domain
                    && (r.recipient_domain == policy_domain) == recipient_domain
            })
            .cloned()
            .collect();
        Ok((Domain::new(policy_domain), results))
    }

    async fn lookup_tlsrpt_record(&self, _domain: &str) -> RpcResult<TlsrptRecordLookup> {
        self.enter("LookupTLSRPTRecord").await?;
        Ok(self.tlsrpt_record.clone())
    }

    async fn mtasts_policies(&self) -> RpcResult<Vec<PolicyRecord>> {
        self.enter("MTASTSPolicies").await?;
        Ok(self.policies.clone())
    }
}

/// Surface that records what would have been displayed.
#[derive(Default)]
pub struct Recorder {
    /// Location and rendered text of every shown view, oldest first.
    pub shown: RefCell<Vec<(String, String)>>,
    pub alerts: RefCell<Vec<String>>,
}

impl Recorder {
    pub fn locations(&self) -> Vec<String> {
        self.shown.borrow().iter().map(|(l, _)| l.clone()).collect()
    }

    /// Rendered text of the view on display.
    pub fn displayed(&self) -> Option<String> {
        self.shown.borrow().last().map(|(_, text)| text.clone())
    }
}

impl Surface for Recorder {
    fn show(&self, location: &str, view: &View) {
        self.shown
            .borrow_mut()
            .push((location.to_string(), render_view_with(view, false)));
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// A request as received by the mock backend.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    /// Header names are lowercased.
    pub headers: HashMap<String, String>,
    pub body: String,
}

async fn read_request(socket: &mut TcpStream) -> Option<Captured> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let path = lines.next()?.split_whitespace().nth(1)?.to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    while buf.len() < head_end + length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[head_end..]).to_string();

    Some(Captured { path, headers, body })
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` sees each request and returns the status and JSON body to answer with.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(Captured) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
