//! Wire schema of the admin API.
//!
//! Field names follow the server's JSON (PascalCase, with a few acronyms).
//! List and map fields may arrive as `null`; they deserialize as empty.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Accept `null` for any defaultable field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like `null_default`, for maps whose values may be `null` as well.
fn null_default_values<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Default + Deserialize<'de>,
{
    let map = Option::<BTreeMap<String, Option<V>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(map.into_iter().map(|(k, v)| (k, v.unwrap_or_default())).collect())
}

/// A DNS domain in ASCII and (optional) Unicode form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    #[serde(rename = "ASCII")]
    pub ascii: String,
    #[serde(rename = "Unicode")]
    pub unicode: String,
}

impl Domain {
    pub fn new(ascii: impl Into<String>) -> Self {
        Self {
            ascii: ascii.into(),
            unicode: String::new(),
        }
    }
}

/// Either an IP address (base64 of 4 or 16 bytes) or a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpDomain {
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "Domain")]
    pub domain: Domain,
}

/// Account settings as shown on the account page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccountConfig {
    pub domain: String,
    #[serde(deserialize_with = "null_default")]
    pub destinations: BTreeMap<String, serde_json::Value>,
    pub max_outgoing_messages_per_day: i64,
    pub max_first_time_recipients_per_day: i64,
    pub quota_message_size: u64,
}

/// A message in the outgoing delivery queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueMsg {
    #[serde(rename = "ID")]
    pub id: i64,
    pub queued: DateTime<Utc>,
    #[serde(default)]
    pub sender_localpart: String,
    #[serde(default)]
    pub sender_domain: IpDomain,
    #[serde(default)]
    pub recipient_localpart: String,
    #[serde(default)]
    pub recipient_domain: IpDomain,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub attempts: i64,
    pub next_attempt: DateTime<Utc>,
    #[serde(default)]
    pub last_attempt: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_error: String,
    #[serde(rename = "RequireTLS", default)]
    pub require_tls: Option<bool>,
    #[serde(default)]
    pub transport: String,
}

/// Per-domain summary of received DMARC aggregate reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DmarcSummary {
    pub domain: String,
    pub total: i64,
    pub disposition_none: i64,
    pub disposition_quarantine: i64,
    pub disposition_reject: i64,
    #[serde(rename = "DKIMFail")]
    pub dkim_fail: i64,
    #[serde(rename = "SPFFail")]
    pub spf_fail: i64,
    #[serde(deserialize_with = "null_default")]
    pub policy_overrides: BTreeMap<String, i64>,
}

/// Per-domain summary of received TLS reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TlsrptSummary {
    pub policy_domain: Domain,
    pub success: i64,
    pub failure: i64,
    #[serde(deserialize_with = "null_default")]
    pub result_type_counts: BTreeMap<String, i64>,
}

/// A stored DMARC aggregate report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DomainFeedback {
    #[serde(rename = "ID")]
    pub id: i64,
    pub domain: String,
    pub from_domain: String,
    pub report_metadata: ReportMetadata,
    pub policy_published: PolicyPublished,
    #[serde(deserialize_with = "null_default")]
    pub records: Vec<ReportRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReportMetadata {
    pub org_name: String,
    pub email: String,
    #[serde(rename = "ReportID")]
    pub report_id: String,
    pub date_range: DateRange,
    #[serde(deserialize_with = "null_default")]
    pub errors: Vec<String>,
}

/// Reporting interval in unix seconds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DateRange {
    pub begin: i64,
    pub end: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PolicyPublished {
    pub domain: String,
    #[serde(rename = "ADKIM")]
    pub adkim: String,
    #[serde(rename = "ASPF")]
    pub aspf: String,
    pub policy: String,
    pub subdomain_policy: String,
    pub percentage: i64,
}

/// One row of an aggregate report with its authentication results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReportRecord {
    pub row: Row,
    pub identifiers: Identifiers,
    pub auth_results: AuthResults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Row {
    #[serde(rename = "SourceIP")]
    pub source_ip: String,
    pub count: i64,
    pub policy_evaluated: PolicyEvaluated,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PolicyEvaluated {
    pub disposition: String,
    #[serde(rename = "DKIM")]
    pub dkim: String,
    #[serde(rename = "SPF")]
    pub spf: String,
    #[serde(deserialize_with = "null_default")]
    pub reasons: Vec<PolicyOverrideReason>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PolicyOverrideReason {
    #[serde(rename = "Type")]
    pub kind: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Identifiers {
    pub envelope_to: String,
    pub envelope_from: String,
    pub header_from: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthResults {
    #[serde(rename = "DKIM", deserialize_with = "null_default")]
    pub dkim: Vec<DkimAuthResult>,
    #[serde(rename = "SPF", deserialize_with = "null_default")]
    pub spf: Vec<SpfAuthResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DkimAuthResult {
    pub domain: String,
    pub selector: String,
    pub result: String,
    pub human_result: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SpfAuthResult {
    pub domain: String,
    pub scope: String,
    pub result: String,
}

/// A stored TLS report with the envelope it arrived in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TlsReportRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    pub domain: String,
    pub from_domain: String,
    pub mail_from: String,
    pub report: TlsReport,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TlsReport {
    pub organization_name: String,
    pub date_range: TlsDateRange,
    pub contact_info: String,
    #[serde(rename = "ReportID")]
    pub report_id: String,
    #[serde(deserialize_with = "null_default")]
    pub policies: Vec<TlsPolicyResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TlsDateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TlsPolicyResult {
    pub policy: TlsResultPolicy,
    pub summary: TlsSummary,
    #[serde(deserialize_with = "null_default")]
    pub failure_details: Vec<FailureDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TlsResultPolicy {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub string: Vec<String>,
    pub domain: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TlsSummary {
    pub total_successful_session_count: i64,
    pub total_failure_session_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FailureDetails {
    pub result_type: String,
    #[serde(rename = "SendingMTAIP")]
    pub sending_mta_ip: String,
    #[serde(rename = "ReceivingMXHostname")]
    pub receiving_mx_hostname: String,
    #[serde(rename = "ReceivingMXHelo")]
    pub receiving_mx_helo: String,
    #[serde(rename = "ReceivingIP")]
    pub receiving_ip: String,
    pub failed_session_count: i64,
    pub additional_information: String,
    pub failure_reason_code: String,
}

/// Outgoing DMARC evaluation totals for one domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct EvaluationStat {
    pub domain: Domain,
    #[serde(deserialize_with = "null_default")]
    pub dispositions: Vec<String>,
    pub count: i64,
    pub send_report: bool,
}

/// One stored DMARC evaluation of an incoming message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Evaluation {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(default)]
    pub policy_domain: String,
    pub evaluated: DateTime<Utc>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub interval_hours: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub policy_published: EvaluationPolicy,
    #[serde(rename = "SourceIP", default)]
    pub source_ip: String,
    #[serde(default)]
    pub disposition: String,
    #[serde(rename = "AlignedDKIMPass", default)]
    pub aligned_dkim_pass: bool,
    #[serde(rename = "AlignedSPFPass", default)]
    pub aligned_spf_pass: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub override_reasons: Vec<PolicyOverrideReason>,
    #[serde(default)]
    pub envelope_to: String,
    #[serde(default)]
    pub envelope_from: String,
    #[serde(default)]
    pub header_from: String,
    #[serde(rename = "DKIMResults", default, deserialize_with = "null_default")]
    pub dkim_results: Vec<DkimAuthResult>,
    #[serde(rename = "SPFResults", default, deserialize_with = "null_default")]
    pub spf_results: Vec<SpfAuthResult>,
}

/// The DMARC record as published when the evaluation was made.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct EvaluationPolicy {
    pub policy: String,
    pub subdomain_policy: String,
    #[serde(rename = "ADKIM")]
    pub adkim: String,
    #[serde(rename = "ASPF")]
    pub aspf: String,
    pub percentage: i64,
    #[serde(deserialize_with = "null_default")]
    pub reporting_options: Vec<String>,
}

/// IP to blocklist zone to status.
pub type DnsblStatus = BTreeMap<String, BTreeMap<String, String>>;

/// Problems found by one domain check, and records to add to fix them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CheckNotes {
    #[serde(deserialize_with = "null_default")]
    pub errors: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub warnings: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub instructions: Vec<String>,
}

impl CheckNotes {
    /// Neither errors nor warnings.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// A check that reports only notes (DNSSEC, TLS, DANE).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesCheck {
    #[serde(flatten)]
    pub notes: CheckNotes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct IpRevCheck {
    /// Name the IPs must resolve back to.
    pub hostname: Domain,
    #[serde(rename = "IPNames", deserialize_with = "null_default_values")]
    pub ip_names: BTreeMap<String, Vec<String>>,
    #[serde(flatten)]
    pub notes: CheckNotes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MxRecord {
    pub host: String,
    pub pref: i64,
    #[serde(rename = "IPs", deserialize_with = "null_default")]
    pub ips: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MxCheck {
    #[serde(deserialize_with = "null_default")]
    pub records: Vec<MxRecord>,
    #[serde(flatten)]
    pub notes: CheckNotes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SpfCheck {
    #[serde(rename = "DomainTXT")]
    pub domain_txt: String,
    #[serde(rename = "HostTXT")]
    pub host_txt: String,
    #[serde(flatten)]
    pub notes: CheckNotes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DkimRecord {
    pub selector: String,
    #[serde(rename = "TXT")]
    pub txt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DkimCheck {
    #[serde(deserialize_with = "null_default")]
    pub records: Vec<DkimRecord>,
    #[serde(flatten)]
    pub notes: CheckNotes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DmarcCheck {
    pub domain: String,
    #[serde(rename = "TXT")]
    pub txt: String,
    #[serde(flatten)]
    pub notes: CheckNotes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TlsrptCheck {
    #[serde(rename = "TXT")]
    pub txt: String,
    #[serde(flatten)]
    pub notes: CheckNotes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MtastsCheck {
    #[serde(rename = "TXT")]
    pub txt: String,
    pub policy_text: String,
    #[serde(flatten)]
    pub notes: CheckNotes,
}

/// A DNS SRV record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SrvRecord {
    pub target: String,
    pub port: u16,
    pub priority: u16,
    pub weight: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SrvConfCheck {
    /// Service name (e.g. "_imaps") to its records.
    #[serde(rename = "SRVs", deserialize_with = "null_default_values")]
    pub srvs: BTreeMap<String, Vec<SrvRecord>>,
    #[serde(flatten)]
    pub notes: CheckNotes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AutoconfCheck {
    #[serde(rename = "ClientSettingsDomainIPs", deserialize_with = "null_default")]
    pub client_settings_domain_ips: Vec<String>,
    #[serde(rename = "IPs", deserialize_with = "null_default")]
    pub ips: Vec<String>,
    #[serde(flatten)]
    pub notes: CheckNotes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AutodiscoverRecord {
    pub target: String,
    pub port: u16,
    pub priority: u16,
    pub weight: u16,
    #[serde(rename = "IPs", deserialize_with = "null_default")]
    pub ips: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AutodiscoverCheck {
    #[serde(deserialize_with = "null_default")]
    pub records: Vec<AutodiscoverRecord>,
    #[serde(flatten)]
    pub notes: CheckNotes,
}

/// Live check of a domain's DNS records and connectivity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckResult {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "DNSSEC")]
    pub dnssec: NotesCheck,
    #[serde(rename = "IPRev")]
    pub ip_rev: IpRevCheck,
    #[serde(rename = "MX")]
    pub mx: MxCheck,
    #[serde(rename = "TLS")]
    pub tls: NotesCheck,
    #[serde(rename = "DANE")]
    pub dane: NotesCheck,
    #[serde(rename = "SPF")]
    pub spf: SpfCheck,
    #[serde(rename = "DKIM")]
    pub dkim: DkimCheck,
    #[serde(rename = "DMARC")]
    pub dmarc: DmarcCheck,
    #[serde(rename = "HostTLSRPT")]
    pub host_tlsrpt: TlsrptCheck,
    #[serde(rename = "DomainTLSRPT")]
    pub domain_tlsrpt: TlsrptCheck,
    #[serde(rename = "MTASTS")]
    pub mtasts: MtastsCheck,
    #[serde(rename = "SRVConf")]
    pub srv_conf: SrvConfCheck,
    #[serde(rename = "Autoconf")]
    pub autoconf: AutoconfCheck,
    #[serde(rename = "Autodiscover")]
    pub autodiscover: AutodiscoverCheck,
}

/// TLS connection results gathered for an outgoing TLS report, per day and
/// recipient/policy domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TlsResult {
    #[serde(rename = "ID")]
    pub id: i64,
    pub policy_domain: String,
    #[serde(rename = "DayUTC")]
    pub day_utc: String,
    pub recipient_domain: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    /// Policy domain is an MX host (DANE) rather than a recipient domain.
    pub is_host: bool,
    pub send_report: bool,
    #[serde(deserialize_with = "null_default")]
    pub results: Vec<TlsPolicyResult>,
}

/// Outcome of looking up a domain's TLSRPT DNS record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TlsrptRecordLookup {
    /// Parsed record, absent when the lookup failed.
    pub record: Option<serde_json::Value>,
    pub txt: String,
    /// Empty when the lookup succeeded.
    pub error: String,
}

/// An MX pattern of an MTA-STS policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StsMx {
    /// Matches any single label in front of the domain.
    pub wildcard: bool,
    pub domain: Domain,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PolicyExtension {
    pub key: String,
    pub value: String,
}

/// A cached MTA-STS policy of a recipient domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyRecord {
    #[serde(default)]
    pub domain: String,
    pub inserted: DateTime<Utc>,
    pub valid_end: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub last_use: DateTime<Utc>,
    /// A record exists but the policy could not be fetched.
    #[serde(default)]
    pub backoff: bool,
    #[serde(rename = "RecordID", default)]
    pub record_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub mode: String,
    #[serde(rename = "MX", default, deserialize_with = "null_default")]
    pub mx: Vec<StsMx>,
    #[serde(default)]
    pub max_age_seconds: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub extensions: Vec<PolicyExtension>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_lists_decode_as_empty() {
        let json = r#"{"ID": 7, "Report": {"OrganizationName": "example", "Policies": null}}"#;
        let rec: TlsReportRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, 7);
        assert!(rec.report.policies.is_empty());
    }

    #[test]
    fn test_dmarc_feedback_fields() {
        let json = r#"{
            "ID": 3,
            "ReportMetadata": {"OrgName": "google.com", "ReportID": "abc", "DateRange": {"Begin": 1, "End": 2}},
            "PolicyPublished": {"Domain": "example.org", "ADKIM": "r", "Percentage": 100},
            "Records": [{"Row": {"SourceIP": "192.0.2.1", "Count": 4, "PolicyEvaluated": {"Disposition": "none", "DKIM": "pass", "SPF": "fail", "Reasons": null}},
                         "AuthResults": {"DKIM": [{"Domain": "example.org", "Selector": "s1", "Result": "pass"}], "SPF": null}}]
        }"#;
        let fb: DomainFeedback = serde_json::from_str(json).unwrap();
        assert_eq!(fb.report_metadata.report_id, "abc");
        assert_eq!(fb.policy_published.adkim, "r");
        assert_eq!(fb.records[0].row.count, 4);
        assert_eq!(fb.records[0].auth_results.dkim[0].selector, "s1");
        assert!(fb.records[0].auth_results.spf.is_empty());
    }

    #[test]
    fn test_check_notes_are_flattened() {
        let json = r#"{
            "Domain": "example.org",
            "MX": {"Records": [{"Host": "mail.example.org.", "Pref": 10, "IPs": null}], "Errors": null, "Warnings": ["no ipv6"], "Instructions": null},
            "SPF": {"DomainTXT": "v=spf1 mx -all", "DomainRecord": {"Version": "spf1"}, "Errors": ["host record missing"]},
            "SRVConf": {"SRVs": {"_imaps": [{"Target": "mail.example.org.", "Port": 993, "Priority": 0, "Weight": 1}], "_pop3s": null}}
        }"#;
        let check: CheckResult = serde_json::from_str(json).unwrap();
        assert_eq!(check.mx.records[0].pref, 10);
        assert!(check.mx.records[0].ips.is_empty());
        assert_eq!(check.mx.notes.warnings, vec!["no ipv6"]);
        assert!(!check.mx.notes.is_ok());
        assert_eq!(check.spf.domain_txt, "v=spf1 mx -all");
        assert_eq!(check.spf.notes.errors, vec!["host record missing"]);
        assert_eq!(check.srv_conf.srvs["_imaps"][0].port, 993);
        assert!(check.srv_conf.srvs["_pop3s"].is_empty());
        assert!(check.dnssec.notes.is_ok());
    }

    #[test]
    fn test_policy_record_fields() {
        let json = r#"{
            "Domain": "example.org",
            "Inserted": "2024-01-01T00:00:00Z",
            "ValidEnd": "2024-02-01T00:00:00Z",
            "LastUpdate": "2024-01-01T00:00:00Z",
            "LastUse": "2024-01-10T00:00:00Z",
            "RecordID": "20240101",
            "Version": "STSv1",
            "Mode": "enforce",
            "MX": [{"Wildcard": true, "Domain": {"ASCII": "example.org"}}],
            "MaxAgeSeconds": 86400,
            "Extensions": null
        }"#;
        let p: PolicyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(p.record_id, "20240101");
        assert!(p.mx[0].wildcard);
        assert!(p.extensions.is_empty());
        assert!(!p.backoff);
    }
}
