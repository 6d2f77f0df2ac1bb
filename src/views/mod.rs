//! Console pages.
//!
//! # Responsibilities
//! - Fetch the data for a page through `AdminApi`
//! - Format it into a `View` (formatters, report tables)
//! - Validate operator input before mutating calls
//!
//! # Data Flow
//! ```text
//! Navigator → PageHandler::render(page)
//!     → page function: concurrent AdminApi calls (try_join)
//!     → format / report → View
//! ```
//!
//! # Design Decisions
//! - A page either renders completely or fails; no partial views
//! - The reference time is read once per render, never cached
//! - Views hold no state between renders

mod accounts;
mod dmarc;
mod dnscheck;
mod domains;
mod index;
mod queue;
mod system;
mod tlsrpt;

use chrono::{DateTime, Duration, Utc};
use futures_util::future::{FutureExt, LocalBoxFuture};
use thiserror::Error;

use crate::config::ReportsConfig;
use crate::display::View;
use crate::format::{DecodeError, InvalidSizeError};
use crate::routing::{Page, PageHandler};
use crate::rpc::{AdminApi, RpcError};

pub use accounts::LimitsInput;

/// Title of the root breadcrumb.
pub const ROOT_CRUMB: &str = "Mail Admin";

/// Errors rendering a page or validating input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    InvalidSize(#[from] InvalidSizeError),

    #[error("invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },
}

pub type ViewResult = Result<View, ViewError>;

/// Page handler backed by an admin API.
pub struct ConsoleViews<A> {
    api: A,
    period: Duration,
    clock: fn() -> DateTime<Utc>,
}

impl<A: AdminApi> ConsoleViews<A> {
    pub fn new(api: A, reports: &ReportsConfig) -> Self {
        Self {
            api,
            period: Duration::days(reports.period_days),
            clock: Utc::now,
        }
    }

    /// Replace the clock used as reference time.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Reporting window ending now.
    fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let end = self.now();
        (end - self.period, end)
    }

    fn period_days(&self) -> i64 {
        self.period.num_days()
    }
}

/// Breadcrumbs starting at the root.
fn crumbs<const N: usize>(rest: [&str; N]) -> View {
    View::new(std::iter::once(ROOT_CRUMB).chain(rest))
}

impl<A: AdminApi> PageHandler for ConsoleViews<A> {
    type Error = ViewError;

    fn render<'a>(&'a self, page: &'a Page) -> LocalBoxFuture<'a, ViewResult> {
        async move {
            match page {
                Page::Index => self.index().await,
                Page::LogLevels => self.log_levels().await,
                Page::Accounts => self.accounts().await,
                Page::Account(name) => self.account(name).await,
                Page::Domain(d) => self.domain(d).await,
                Page::DomainDmarc(d) => self.domain_dmarc(d).await,
                Page::DomainDmarcReport { domain, id } => self.domain_dmarc_report(domain, *id).await,
                Page::DomainDnsRecords(d) => self.domain_dns_records(d).await,
                Page::DomainDnsCheck(d) => self.domain_dns_check(d).await,
                Page::Queue => self.queue().await,
                Page::TlsrptIndex => Ok(self.tlsrpt_index()),
                Page::TlsrptSummaries => self.tlsrpt_summaries().await,
                Page::DomainTlsrpt(d) => self.domain_tlsrpt(d).await,
                Page::DomainTlsrptReport { domain, id } => self.domain_tlsrpt_report(domain, *id).await,
                Page::TlsrptResults => self.tlsrpt_results().await,
                Page::TlsrptResultsDomain { recipient, domain } => {
                    self.tlsrpt_results_domain(*recipient, domain).await
                }
                Page::MtastsPolicies => self.mtasts_policies().await,
                Page::DmarcIndex => Ok(self.dmarc_index()),
                Page::DmarcSummaries => self.dmarc_summaries().await,
                Page::DmarcEvaluations => self.dmarc_evaluations().await,
                Page::DmarcEvaluationsDomain(d) => self.dmarc_evaluations_domain(d).await,
                Page::Dnsbl => self.dnsbl().await,
            }
        }
        .boxed_local()
    }
}
