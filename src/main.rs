//! Mail server admin console
//!
//! Interactive terminal front-end for a mail server's admin API.
//!
//! # Architecture Overview
//!
//! ```text
//!     stdin line ──▶ command ──▶ Navigator::navigate(location)
//!                                   │ (current marker, single-flight)
//!                                   ▼
//!                              RouteTable ──▶ Page
//!                                   │
//!                                   ▼
//!                              ConsoleViews ──▶ HttpAdminClient ──▶ admin API
//!                                   │
//!                                   ▼ format / report
//!                                  View ──▶ Terminal (stdout)
//! ```
//!
//! Navigations run concurrently on a single thread: a new location can be
//! entered while the previous page is still loading, and only the latest
//! one is shown.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use mail_admin_console::config::loader::{load_or_default, ConfigError};
use mail_admin_console::config::validation::validate_config;
use mail_admin_console::display::text::render_view;
use mail_admin_console::display::View;
use mail_admin_console::observability::logging::init_logging;
use mail_admin_console::resilience::retries::RetryPolicy;
use mail_admin_console::routing::{console_routes, Navigator, Surface};
use mail_admin_console::session::TokenStore;
use mail_admin_console::views::LimitsInput;
use mail_admin_console::{ConsoleConfig, ConsoleViews, HttpAdminClient};

#[derive(Parser)]
#[command(name = "mail-admin-console")]
#[command(about = "Interactive admin console for a mail server", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Admin API base URL, overrides the configuration
    #[arg(short, long)]
    url: Option<String>,

    /// File holding the session token, overrides the configuration
    #[arg(long)]
    token_file: Option<String>,

    /// Log level when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,

    /// Location to open first, e.g. "#queue"
    location: Option<String>,
}

const HELP: &str = "\
Commands:
  <location>                          open a page, e.g. #domains/example.org/dmarc
  reload                              render the current page again
  limits <account> <out> <first> <quota>
                                      set account limits, quota like 0, 20m or 1g
  token <value>                       store a session token
  logout                              remove the stored token
  help                                this text
  quit";

/// Renders views to stdout, alerts to stderr.
struct Terminal;

impl Surface for Terminal {
    fn show(&self, location: &str, view: &View) {
        println!("\n[#{location}]");
        print!("{}", render_view(view));
    }

    fn alert(&self, message: &str) {
        eprintln!("\n!! {message}");
    }
}

type Console = Navigator<ConsoleViews<HttpAdminClient>, Terminal>;

/// Why the command loop stopped.
enum Exit {
    Quit,
    /// The session token changed (`None` after logout); the API client is
    /// rebuilt with it.
    Token(Option<String>),
}

fn load(cli: &Cli) -> Result<ConsoleConfig, ConfigError> {
    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = &cli.url {
        config.api.base_url = url.clone();
    }
    if let Some(path) = &cli.token_file {
        config.session.token_path = Some(path.clone());
    }
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn build(config: &ConsoleConfig, token: Option<String>) -> Result<Console, Box<dyn Error>> {
    let client = HttpAdminClient::new(&config.api, RetryPolicy::from_config(&config.retries))?
        .with_token(token);
    let views = ConsoleViews::new(client, &config.reports);
    Ok(Navigator::new(console_routes()?, views, Terminal))
}

fn navigation<'a>(console: &'a Console, location: String) -> LocalBoxFuture<'a, ()> {
    async move {
        let outcome = console.navigate(&location).await;
        tracing::debug!(location = %location, outcome = outcome.label(), "Navigation finished");
    }
    .boxed_local()
}

fn set_limits<'a>(console: &'a Console, args: Vec<String>) -> LocalBoxFuture<'a, ()> {
    async move {
        let [account, out, first, quota] = match <[String; 4]>::try_from(args) {
            Ok(a) => a,
            Err(_) => {
                eprintln!("usage: limits <account> <out> <first> <quota>");
                return;
            }
        };
        let input = LimitsInput {
            max_outgoing_messages_per_day: &out,
            max_first_time_recipients_per_day: &first,
            quota_message_size: &quota,
        };
        match console.handler().set_account_limits(&account, &input).await {
            Ok(()) => {
                println!("limits saved for {account}");
                if console.current().as_deref() == Some(format!("accounts/{account}").as_str()) {
                    console.reload().await;
                }
            }
            Err(e) => console.surface().alert(&format!("Error: {e}")),
        }
    }
    .boxed_local()
}

async fn run(
    console: &Console,
    tokens: Option<&TokenStore>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<Exit, Box<dyn Error>> {
    let mut pending: FuturesUnordered<LocalBoxFuture<'_, ()>> = FuturesUnordered::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // Let loading pages finish before leaving.
                    while pending.next().await.is_some() {}
                    return Ok(Exit::Quit);
                };
                let mut words = line.split_whitespace().map(str::to_string);
                let Some(command) = words.next() else {
                    continue;
                };
                match command.as_str() {
                    "quit" | "q" => return Ok(Exit::Quit),
                    "help" | "?" => println!("{HELP}"),
                    "reload" | "r" => pending.push(
                        async move {
                            if let Some(outcome) = console.reload().await {
                                tracing::debug!(outcome = outcome.label(), "Reload finished");
                            }
                        }
                        .boxed_local(),
                    ),
                    "limits" => pending.push(set_limits(console, words.collect())),
                    "token" => {
                        let Some(token) = words.next() else {
                            eprintln!("usage: token <value>");
                            continue;
                        };
                        match tokens {
                            Some(store) => {
                                if let Err(e) = store.save(&token) {
                                    tracing::warn!(path = %store.path().display(), error = %e, "Cannot store token");
                                }
                            }
                            None => tracing::info!("No token path configured, token kept for this session only"),
                        }
                        return Ok(Exit::Token(Some(token)));
                    }
                    "logout" => {
                        if let Some(store) = tokens {
                            if let Err(e) = store.clear() {
                                tracing::warn!(path = %store.path().display(), error = %e, "Cannot remove token");
                            }
                        }
                        return Ok(Exit::Token(None));
                    }
                    _ => pending.push(navigation(console, command)),
                }
            }
            Some(()) = pending.next(), if !pending.is_empty() => {}
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;
    init_logging(&config.observability.log_level);

    tracing::info!(
        base_url = %config.api.base_url,
        timeout_secs = config.api.timeout_secs,
        retries = config.retries.enabled,
        "mail-admin-console starting"
    );

    let tokens = config.session.token_path.as_deref().map(TokenStore::new);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut location = cli.location.clone().unwrap_or_default();

    let mut token = tokens.as_ref().and_then(TokenStore::load);

    loop {
        let console = build(&config, token.clone())?;

        console.navigate(&location).await;
        match run(&console, tokens.as_ref(), &mut lines).await? {
            Exit::Quit => break,
            Exit::Token(new) => {
                token = new;
                location = console.current().unwrap_or_default();
            }
        }
    }

    tracing::info!("Console closed");
    Ok(())
}
