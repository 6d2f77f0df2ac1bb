//! Single-flight navigation.
//!
//! # Responsibilities
//! - Own the current-location marker
//! - Resolve locations through the route table and run the page handler
//! - Commit a handler's view only while its location is still current
//!
//! # Data Flow
//! ```text
//! navigate(location)
//!     → same as current? Unchanged
//!     → record location as current
//!     → resolve: no page? show "not found", NotFound
//!     → handler.render(page).await
//!     → current changed meanwhile? Superseded (result dropped)
//!     → Ok: surface.show, Committed
//!     → Err: surface.alert, Failed (previous display stays)
//! ```
//!
//! # Design Decisions
//! - Last started navigation wins at commit time, not last completed
//! - Superseded handlers run to completion; their result is discarded
//! - A failed location stays current, so navigating to it again is a no-op
//! - The marker is a RefCell: navigations interleave only at await points and
//!   no borrow is held across one

use std::cell::RefCell;
use std::fmt;

use futures_util::future::LocalBoxFuture;

use super::page::Page;
use super::router::RouteTable;
use crate::display::View;
use crate::observability::metrics;

/// Where views are shown.
pub trait Surface {
    /// Replace the displayed page.
    fn show(&self, location: &str, view: &View);

    /// Blocking notification of a failed navigation.
    fn alert(&self, message: &str);
}

/// Fetches data for a page and builds its view.
pub trait PageHandler {
    type Error: fmt::Display;

    fn render<'a>(&'a self, page: &'a Page) -> LocalBoxFuture<'a, Result<View, Self::Error>>;
}

/// Result of one navigation.
#[derive(Debug, PartialEq, Eq)]
pub enum NavigationOutcome<E> {
    /// Location was already current; nothing ran.
    Unchanged,
    Committed,
    /// No route matched; the "not found" page was shown.
    NotFound,
    /// A later navigation started before this one completed.
    Superseded,
    /// The handler failed; the user was alerted.
    Failed(E),
}

impl<E> NavigationOutcome<E> {
    pub fn label(&self) -> &'static str {
        match self {
            NavigationOutcome::Unchanged => "unchanged",
            NavigationOutcome::Committed => "committed",
            NavigationOutcome::NotFound => "not_found",
            NavigationOutcome::Superseded => "superseded",
            NavigationOutcome::Failed(_) => "failed",
        }
    }
}

pub struct Navigator<H, S> {
    routes: RouteTable,
    handler: H,
    surface: S,
    current: RefCell<Option<String>>,
}

fn normalize(location: &str) -> &str {
    location.strip_prefix('#').unwrap_or(location)
}

impl<H: PageHandler, S: Surface> Navigator<H, S> {
    pub fn new(routes: RouteTable, handler: H, surface: S) -> Self {
        Self {
            routes,
            handler,
            surface,
            current: RefCell::new(None),
        }
    }

    /// Location of the most recently started navigation.
    pub fn current(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn is_current(&self, location: &str) -> bool {
        self.current.borrow().as_deref() == Some(location)
    }

    /// Navigate to `location` (leading '#' optional).
    pub async fn navigate(&self, location: &str) -> NavigationOutcome<H::Error> {
        let location = normalize(location).to_string();
        let outcome = self.run(location.clone()).await;
        metrics::record_navigation(outcome.label());
        outcome
    }

    /// Render the current location again, even though it is unchanged.
    /// Returns `None` when nothing was navigated to yet.
    pub async fn reload(&self) -> Option<NavigationOutcome<H::Error>> {
        let location = self.current.borrow_mut().take()?;
        Some(self.navigate(&location).await)
    }

    async fn run(&self, location: String) -> NavigationOutcome<H::Error> {
        if self.is_current(&location) {
            tracing::debug!(location = %location, "Already current");
            return NavigationOutcome::Unchanged;
        }
        *self.current.borrow_mut() = Some(location.clone());

        let Some(page) = self.routes.resolve(&location) else {
            tracing::info!(location = %location, "No route for location");
            self.surface.show(&location, &View::not_found());
            return NavigationOutcome::NotFound;
        };

        tracing::debug!(location = %location, page = page.name(), "Navigating");
        let result = self.handler.render(&page).await;

        if !self.is_current(&location) {
            tracing::debug!(
                location = %location,
                current = ?self.current.borrow().as_deref(),
                ok = result.is_ok(),
                "Navigation superseded, result dropped"
            );
            return NavigationOutcome::Superseded;
        }

        match result {
            Ok(view) => {
                self.surface.show(&location, &view);
                NavigationOutcome::Committed
            }
            Err(e) => {
                tracing::warn!(location = %location, page = page.name(), error = %e, "Navigation failed");
                self.surface.alert(&format!("Error: {}", e));
                NavigationOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::router::console_routes;
    use futures_util::FutureExt;
    use std::cell::Cell;

    #[derive(Default)]
    struct Recorder {
        shown: RefCell<Vec<String>>,
        alerts: RefCell<Vec<String>>,
    }

    impl Surface for &Recorder {
        fn show(&self, location: &str, _view: &View) {
            self.shown.borrow_mut().push(location.to_string());
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    /// Fails for the queue page, succeeds immediately otherwise.
    #[derive(Default)]
    struct Immediate {
        calls: Cell<usize>,
    }

    impl PageHandler for Immediate {
        type Error = String;

        fn render<'a>(&'a self, page: &'a Page) -> LocalBoxFuture<'a, Result<View, String>> {
            self.calls.set(self.calls.get() + 1);
            let result = match page {
                Page::Queue => Err("queue unavailable".to_string()),
                _ => Ok(View::new([page.name()])),
            };
            async move { result }.boxed_local()
        }
    }

    #[tokio::test]
    async fn test_same_location_renders_once() {
        let recorder = Recorder::default();
        let nav = Navigator::new(console_routes().unwrap(), Immediate::default(), &recorder);

        assert_eq!(nav.navigate("#accounts").await, NavigationOutcome::Committed);
        assert_eq!(nav.navigate("accounts").await, NavigationOutcome::Unchanged);
        assert_eq!(nav.handler().calls.get(), 1);
        assert_eq!(*recorder.shown.borrow(), vec!["accounts"]);
    }

    #[tokio::test]
    async fn test_not_found_shows_fixed_page() {
        let recorder = Recorder::default();
        let nav = Navigator::new(console_routes().unwrap(), Immediate::default(), &recorder);

        assert_eq!(nav.navigate("#bogus/path").await, NavigationOutcome::NotFound);
        assert_eq!(nav.handler().calls.get(), 0);
        assert_eq!(nav.current().as_deref(), Some("bogus/path"));
        assert_eq!(*recorder.shown.borrow(), vec!["bogus/path"]);
    }

    #[tokio::test]
    async fn test_failure_alerts_and_keeps_marker() {
        let recorder = Recorder::default();
        let nav = Navigator::new(console_routes().unwrap(), Immediate::default(), &recorder);

        nav.navigate("dnsbl").await;
        let outcome = nav.navigate("queue").await;
        assert_eq!(outcome, NavigationOutcome::Failed("queue unavailable".to_string()));
        assert_eq!(*recorder.shown.borrow(), vec!["dnsbl"]);
        assert_eq!(*recorder.alerts.borrow(), vec!["Error: queue unavailable"]);
        assert_eq!(nav.current().as_deref(), Some("queue"));

        assert_eq!(nav.navigate("queue").await, NavigationOutcome::Unchanged);
        assert_eq!(recorder.alerts.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_reload_renders_again() {
        let recorder = Recorder::default();
        let nav = Navigator::new(console_routes().unwrap(), Immediate::default(), &recorder);

        assert!(nav.reload().await.is_none());
        nav.navigate("dmarc").await;
        assert_eq!(nav.reload().await, Some(NavigationOutcome::Committed));
        assert_eq!(nav.handler().calls.get(), 2);
    }
}
