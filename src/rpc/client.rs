//! HTTP client for the admin API with timeout and error handling.
//!
//! # Responsibilities
//! - Build method URLs from the configured base URL
//! - Send `{"params": [...]}` and unwrap `{"result": ...}` / `{"error": ...}`
//! - Enforce a per-call timeout
//! - Retry read-only calls according to the retry policy

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::timeout;
use url::Url;

use crate::config::ApiConfig;
use crate::observability::metrics;
use crate::resilience::retries::RetryPolicy;
use crate::rpc::error::{RpcError, RpcResult};
use crate::rpc::types::{
    AccountConfig, CheckResult, DmarcSummary, DnsblStatus, Domain, DomainFeedback, Evaluation,
    EvaluationStat, PolicyRecord, QueueMsg, TlsReportRecord, TlsResult, TlsrptRecordLookup,
    TlsrptSummary,
};
use crate::rpc::AdminApi;

/// Error object of a failed call.
#[derive(Debug, Deserialize)]
struct ServerError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Admin API client speaking JSON over HTTP.
#[derive(Clone)]
pub struct HttpAdminClient {
    client: Client,
    base_url: Url,
    csrf_header: String,
    token: Option<String>,
    timeout_duration: Duration,
    retry: RetryPolicy,
}

impl HttpAdminClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `config` - API endpoint configuration
    /// * `retry` - Retry policy for read-only calls
    pub fn new(config: &ApiConfig, retry: RetryPolicy) -> RpcResult<Self> {
        let mut base = config.base_url.clone();
        // Url::join drops the last path segment unless the base ends in a slash.
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url: Url = base
            .parse()
            .map_err(|e| RpcError::InvalidUrl(format!("'{}': {}", config.base_url, e)))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            csrf_header: config.csrf_header.clone(),
            token: None,
            timeout_duration: Duration::from_secs(config.timeout_secs),
            retry,
        })
    }

    /// Attach the session token sent with every call.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn method_url(&self, method: &str) -> RpcResult<Url> {
        self.base_url
            .join(method)
            .map_err(|e| RpcError::InvalidUrl(format!("{method}: {e}")))
    }

    /// Read-only call, retried on transient failures.
    async fn query<R: DeserializeOwned>(&self, method: &'static str, params: Value) -> RpcResult<R> {
        let params = &params;
        let result = self
            .retry
            .run(method, move || self.call_once(method, params))
            .await;
        metrics::record_rpc_call(method, result.is_ok());
        result
    }

    /// Mutating call, attempted once.
    async fn mutate<R: DeserializeOwned>(&self, method: &'static str, params: Value) -> RpcResult<R> {
        let result = self.call_once(method, &params).await;
        metrics::record_rpc_call(method, result.is_ok());
        result
    }

    async fn call_once<R: DeserializeOwned>(&self, method: &'static str, params: &Value) -> RpcResult<R> {
        let url = self.method_url(method)?;
        let mut request = self.client.post(url).json(&json!({ "params": params }));
        if let Some(token) = &self.token {
            request = request.header(self.csrf_header.as_str(), token.as_str());
        }

        tracing::debug!(method, "Calling admin API");

        let exchange = async {
            let resp = request
                .send()
                .await
                .map_err(|e| RpcError::Transport(e.to_string()))?;
            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|e| RpcError::Transport(e.to_string()))?;
            Ok::<_, RpcError>((status, body))
        };

        let (status, body) = timeout(self.timeout_duration, exchange)
            .await
            .map_err(|_| RpcError::Timeout {
                method: method.to_string(),
                secs: self.timeout_duration.as_secs(),
            })??;

        decode_response(method, status.as_u16(), &body)
    }
}

/// Unwrap a response body into the call result.
///
/// An error envelope wins over the HTTP status, so the server's message
/// reaches the operator even on 4xx/5xx responses.
fn decode_response<R: DeserializeOwned>(method: &str, status: u16, body: &str) -> RpcResult<R> {
    let envelope: Option<Value> = serde_json::from_str(body).ok();

    if let Some(err) = envelope.as_ref().and_then(|v| v.get("error")).filter(|e| !e.is_null()) {
        let err: ServerError = serde_json::from_value(err.clone()).map_err(|e| RpcError::Decode {
            method: method.to_string(),
            reason: e.to_string(),
        })?;
        return Err(RpcError::Server {
            code: err.code,
            message: err.message,
        });
    }

    if !(200..300).contains(&status) {
        return Err(RpcError::Status {
            method: method.to_string(),
            status,
        });
    }

    let mut envelope = envelope.ok_or_else(|| RpcError::Decode {
        method: method.to_string(),
        reason: "response is not JSON".to_string(),
    })?;
    let result = envelope
        .get_mut("result")
        .map(Value::take)
        .unwrap_or(Value::Null);
    serde_json::from_value(result).map_err(|e| RpcError::Decode {
        method: method.to_string(),
        reason: e.to_string(),
    })
}

impl AdminApi for HttpAdminClient {
    async fn domains(&self) -> RpcResult<Vec<Domain>> {
        let v: Option<Vec<Domain>> = self.query("Domains", json!([])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn domain(&self, domain: &str) -> RpcResult<Domain> {
        self.query("Domain", json!([domain])).await
    }

    async fn parse_domain(&self, domain: &str) -> RpcResult<Domain> {
        self.query("ParseDomain", json!([domain])).await
    }

    async fn domain_localparts(&self, domain: &str) -> RpcResult<BTreeMap<String, String>> {
        let v: Option<_> = self.query("DomainLocalparts", json!([domain])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn domain_records(&self, domain: &str) -> RpcResult<Vec<String>> {
        let v: Option<_> = self.query("DomainRecords", json!([domain])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn check_domain(&self, domain: &str) -> RpcResult<CheckResult> {
        self.query("CheckDomain", json!([domain])).await
    }

    async fn accounts(&self) -> RpcResult<Vec<String>> {
        let v: Option<_> = self.query("Accounts", json!([])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn account(&self, account: &str) -> RpcResult<AccountConfig> {
        self.query("Account", json!([account])).await
    }

    async fn set_account_limits(
        &self,
        account: &str,
        max_outgoing_messages_per_day: i64,
        max_first_time_recipients_per_day: i64,
        max_msg_size: u64,
    ) -> RpcResult<()> {
        self.mutate(
            "SetAccountLimits",
            json!([
                account,
                max_outgoing_messages_per_day,
                max_first_time_recipients_per_day,
                max_msg_size
            ]),
        )
        .await
    }

    async fn queue_size(&self) -> RpcResult<i64> {
        self.query("QueueSize", json!([])).await
    }

    async fn queue_list(&self) -> RpcResult<Vec<QueueMsg>> {
        let v: Option<_> = self.query("QueueList", json!([])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn transports(&self) -> RpcResult<BTreeMap<String, Value>> {
        let v: Option<_> = self.query("Transports", json!([])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn check_updates_enabled(&self) -> RpcResult<bool> {
        self.query("CheckUpdatesEnabled", json!([])).await
    }

    async fn log_levels(&self) -> RpcResult<BTreeMap<String, String>> {
        let v: Option<_> = self.query("LogLevels", json!([])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn dnsbl_status(&self) -> RpcResult<DnsblStatus> {
        let v: Option<_> = self.query("DNSBLStatus", json!([])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn dmarc_summaries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        domain: &str,
    ) -> RpcResult<Vec<DmarcSummary>> {
        let v: Option<_> = self
            .query("DMARCSummaries", json!([start, end, domain]))
            .await?;
        Ok(v.unwrap_or_default())
    }

    async fn dmarc_reports(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        domain: &str,
    ) -> RpcResult<Vec<DomainFeedback>> {
        let v: Option<_> = self.query("DMARCReports", json!([start, end, domain])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn dmarc_report_id(&self, domain: &str, report_id: i64) -> RpcResult<Value> {
        self.query("DMARCReportID", json!([domain, report_id])).await
    }

    async fn dmarc_evaluation_stats(&self) -> RpcResult<BTreeMap<String, EvaluationStat>> {
        let v: Option<_> = self.query("DMARCEvaluationStats", json!([])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn dmarc_evaluations_domain(&self, domain: &str) -> RpcResult<(Domain, Vec<Evaluation>)> {
        let (d, evals): (Domain, Option<Vec<Evaluation>>) = self
            .query("DMARCEvaluationsDomain", json!([domain]))
            .await?;
        Ok((d, evals.unwrap_or_default()))
    }

    async fn tlsrpt_summaries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        policy_domain: &str,
    ) -> RpcResult<Vec<TlsrptSummary>> {
        let v: Option<_> = self
            .query("TLSRPTSummaries", json!([start, end, policy_domain]))
            .await?;
        Ok(v.unwrap_or_default())
    }

    async fn tls_reports(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        policy_domain: &str,
    ) -> RpcResult<Vec<TlsReportRecord>> {
        let v: Option<_> = self
            .query("TLSReports", json!([start, end, policy_domain]))
            .await?;
        Ok(v.unwrap_or_default())
    }

    async fn tls_report_id(&self, domain: &str, report_id: i64) -> RpcResult<Value> {
        self.query("TLSReportID", json!([domain, report_id])).await
    }

    async fn tlsrpt_results(&self) -> RpcResult<Vec<TlsResult>> {
        let v: Option<_> = self.query("TLSRPTResults", json!([])).await?;
        Ok(v.unwrap_or_default())
    }

    async fn tlsrpt_results_domain(
        &self,
        recipient_domain: bool,
        policy_domain: &str,
    ) -> RpcResult<(Domain, Vec<TlsResult>)> {
        let (d, results): (Domain, Option<Vec<TlsResult>>) = self
            .query("TLSRPTResultsDomain", json!([recipient_domain, policy_domain]))
            .await?;
        Ok((d, results.unwrap_or_default()))
    }

    async fn lookup_tlsrpt_record(&self, domain: &str) -> RpcResult<TlsrptRecordLookup> {
        let (record, txt, error): (Option<Value>, Option<String>, Option<String>) =
            self.query("LookupTLSRPTRecord", json!([domain])).await?;
        Ok(TlsrptRecordLookup {
            record,
            txt: txt.unwrap_or_default(),
            error: error.unwrap_or_default(),
        })
    }

    async fn mtasts_policies(&self) -> RpcResult<Vec<PolicyRecord>> {
        let v: Option<_> = self.query("MTASTSPolicies", json!([])).await?;
        Ok(v.unwrap_or_default())
    }
}
