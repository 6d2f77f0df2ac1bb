//! Route table and location lookup.
//!
//! # Responsibilities
//! - Store the ordered routes
//! - Resolve a location to a page, or report no match
//! - Reject tables where two routes could match the same location
//!
//! # Design Decisions
//! - Immutable after construction
//! - O(n) scan in declaration order; first full match wins
//! - Conflicts are a construction error, never a navigation-time one
//! - Explicit no-match rather than a silent default

use thiserror::Error;

use super::matcher::{ambiguous, match_segments, Capture, Matcher};
use super::page::Page;

/// Builds the page from the captures of a matched route.
pub type PageBuilder = fn(&[Capture<'_>]) -> Option<Page>;

#[derive(Clone)]
pub struct Route {
    pub pattern: Vec<Matcher>,
    pub build: PageBuilder,
}

impl Route {
    pub fn new(pattern: Vec<Matcher>, build: PageBuilder) -> Self {
        Self { pattern, build }
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &describe(&self.pattern))
            .finish_non_exhaustive()
    }
}

/// Two routes accept a common location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route {second} is ambiguous with route {first}: {pattern}")]
pub struct RouteConflict {
    pub first: usize,
    pub second: usize,
    pub pattern: String,
}

fn describe(pattern: &[Matcher]) -> String {
    pattern
        .iter()
        .map(|m| match m {
            Matcher::Literal(s) => *s,
            Matcher::Integer => "<int>",
            Matcher::Wildcard => "<*>",
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Ordered routes plus the page for the empty location.
#[derive(Debug, Clone)]
pub struct RouteTable {
    default: Page,
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(default: Page, routes: Vec<Route>) -> Result<Self, RouteConflict> {
        for (i, a) in routes.iter().enumerate() {
            for (j, b) in routes.iter().enumerate().skip(i + 1) {
                if ambiguous(&a.pattern, &b.pattern) {
                    return Err(RouteConflict {
                        first: i,
                        second: j,
                        pattern: describe(&b.pattern),
                    });
                }
            }
        }
        Ok(Self { default, routes })
    }

    /// Resolve a location, with or without its leading '#'.
    pub fn resolve(&self, location: &str) -> Option<Page> {
        let path = location.strip_prefix('#').unwrap_or(location);
        if path.is_empty() {
            return Some(self.default.clone());
        }

        let segments: Vec<&str> = path.split('/').collect();
        for route in &self.routes {
            if let Some(captures) = match_segments(&route.pattern, &segments) {
                let page = (route.build)(&captures);
                if page.is_none() {
                    tracing::warn!(location = %path, route = %describe(&route.pattern), "Route matched but page could not be built");
                }
                return page;
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn text(c: &[Capture<'_>], i: usize) -> Option<String> {
    c.get(i)?.text().map(str::to_string)
}

fn int(c: &[Capture<'_>], i: usize) -> Option<i64> {
    c.get(i)?.int()
}

/// The console's route table.
pub fn console_routes() -> Result<RouteTable, RouteConflict> {
    use Matcher::{Integer, Literal, Wildcard};

    let routes = vec![
        Route::new(vec![Literal("loglevels")], |_| Some(Page::LogLevels)),
        Route::new(vec![Literal("accounts")], |_| Some(Page::Accounts)),
        Route::new(vec![Literal("accounts"), Wildcard], |c| Some(Page::Account(text(c, 0)?))),
        Route::new(vec![Literal("domains"), Wildcard], |c| Some(Page::Domain(text(c, 0)?))),
        Route::new(vec![Literal("domains"), Wildcard, Literal("dmarc")], |c| {
            Some(Page::DomainDmarc(text(c, 0)?))
        }),
        Route::new(vec![Literal("domains"), Wildcard, Literal("dmarc"), Integer], |c| {
            Some(Page::DomainDmarcReport {
                domain: text(c, 0)?,
                id: int(c, 1)?,
            })
        }),
        Route::new(vec![Literal("domains"), Wildcard, Literal("dnsrecords")], |c| {
            Some(Page::DomainDnsRecords(text(c, 0)?))
        }),
        Route::new(vec![Literal("domains"), Wildcard, Literal("dnscheck")], |c| {
            Some(Page::DomainDnsCheck(text(c, 0)?))
        }),
        Route::new(vec![Literal("queue")], |_| Some(Page::Queue)),
        Route::new(vec![Literal("tlsrpt")], |_| Some(Page::TlsrptIndex)),
        Route::new(vec![Literal("tlsrpt"), Literal("reports")], |_| Some(Page::TlsrptSummaries)),
        Route::new(vec![Literal("tlsrpt"), Literal("reports"), Wildcard], |c| {
            Some(Page::DomainTlsrpt(text(c, 0)?))
        }),
        Route::new(vec![Literal("tlsrpt"), Literal("reports"), Wildcard, Integer], |c| {
            Some(Page::DomainTlsrptReport {
                domain: text(c, 0)?,
                id: int(c, 1)?,
            })
        }),
        Route::new(vec![Literal("tlsrpt"), Literal("results")], |_| Some(Page::TlsrptResults)),
        Route::new(vec![Literal("tlsrpt"), Literal("results"), Literal("rcptdom"), Wildcard], |c| {
            Some(Page::TlsrptResultsDomain {
                recipient: true,
                domain: text(c, 0)?,
            })
        }),
        Route::new(vec![Literal("tlsrpt"), Literal("results"), Literal("host"), Wildcard], |c| {
            Some(Page::TlsrptResultsDomain {
                recipient: false,
                domain: text(c, 0)?,
            })
        }),
        Route::new(vec![Literal("mtasts")], |_| Some(Page::MtastsPolicies)),
        Route::new(vec![Literal("dmarc")], |_| Some(Page::DmarcIndex)),
        Route::new(vec![Literal("dmarc"), Literal("reports")], |_| Some(Page::DmarcSummaries)),
        Route::new(vec![Literal("dmarc"), Literal("evaluations")], |_| Some(Page::DmarcEvaluations)),
        Route::new(vec![Literal("dmarc"), Literal("evaluations"), Wildcard], |c| {
            Some(Page::DmarcEvaluationsDomain(text(c, 0)?))
        }),
        Route::new(vec![Literal("dnsbl")], |_| Some(Page::Dnsbl)),
    ];

    RouteTable::new(Page::Index, routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        console_routes().unwrap()
    }

    #[test]
    fn test_console_routes_build() {
        assert_eq!(table().len(), 22);
    }

    #[test]
    fn test_empty_location_is_index() {
        assert_eq!(table().resolve(""), Some(Page::Index));
        assert_eq!(table().resolve("#"), Some(Page::Index));
    }

    #[test]
    fn test_resolve_pages() {
        let t = table();
        assert_eq!(t.resolve("#queue"), Some(Page::Queue));
        assert_eq!(t.resolve("accounts/mjl"), Some(Page::Account("mjl".into())));
        assert_eq!(
            t.resolve("#domains/example.org/dmarc/42"),
            Some(Page::DomainDmarcReport {
                domain: "example.org".into(),
                id: 42
            })
        );
        assert_eq!(
            t.resolve("tlsrpt/reports/example.org"),
            Some(Page::DomainTlsrpt("example.org".into()))
        );
        assert_eq!(
            t.resolve("dmarc/evaluations/example.org"),
            Some(Page::DmarcEvaluationsDomain("example.org".into()))
        );
    }

    #[test]
    fn test_resolve_check_and_results_pages() {
        let t = table();
        assert_eq!(
            t.resolve("#domains/example.org/dnscheck"),
            Some(Page::DomainDnsCheck("example.org".into()))
        );
        assert_eq!(t.resolve("tlsrpt/results"), Some(Page::TlsrptResults));
        assert_eq!(
            t.resolve("#tlsrpt/results/rcptdom/example.org"),
            Some(Page::TlsrptResultsDomain {
                recipient: true,
                domain: "example.org".into()
            })
        );
        assert_eq!(
            t.resolve("tlsrpt/results/host/mx.example.org"),
            Some(Page::TlsrptResultsDomain {
                recipient: false,
                domain: "mx.example.org".into()
            })
        );
        assert_eq!(t.resolve("#mtasts"), Some(Page::MtastsPolicies));
        assert_eq!(t.resolve("tlsrpt/results/other/example.org"), None);
        assert_eq!(t.resolve("tlsrpt/results/host"), None);
    }

    #[test]
    fn test_no_match() {
        let t = table();
        assert_eq!(t.resolve("#nope"), None);
        assert_eq!(t.resolve("domains/example.org/dmarc/abc"), None);
        assert_eq!(t.resolve("accounts/"), None);
        assert_eq!(t.resolve("queue/"), None);
    }

    #[test]
    fn test_conflict_rejected() {
        let routes = vec![
            Route::new(vec![Matcher::Literal("accounts"), Matcher::Wildcard], |_| Some(Page::Accounts)),
            Route::new(vec![Matcher::Literal("accounts"), Matcher::Literal("new")], |_| Some(Page::Accounts)),
        ];
        let err = RouteTable::new(Page::Index, routes).unwrap_err();
        assert_eq!(err.first, 0);
        assert_eq!(err.second, 1);
        assert_eq!(err.pattern, "accounts/new");
    }
}
