use std::path::PathBuf;

use clap::{Parser, Subcommand};

use mail_admin_console::config::loader::load_or_default;
use mail_admin_console::display::text::render_view;
use mail_admin_console::display::View;
use mail_admin_console::observability::logging::init_logging;
use mail_admin_console::resilience::retries::RetryPolicy;
use mail_admin_console::routing::{console_routes, NavigationOutcome, Navigator, Surface};
use mail_admin_console::session::TokenStore;
use mail_admin_console::views::LimitsInput;
use mail_admin_console::{ConsoleViews, HttpAdminClient};

#[derive(Parser)]
#[command(name = "admin-cli")]
#[command(about = "One-shot CLI for the mail server admin API", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Admin API base URL, overrides the configuration
    #[arg(short, long)]
    url: Option<String>,

    /// Session token, overrides the stored token
    #[arg(short, long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the page at a location, e.g. "#dmarc/reports"
    Show { location: String },
    /// Set sending limits and maximum message size of an account
    Limits {
        account: String,
        max_outgoing_per_day: String,
        max_first_time_per_day: String,
        /// Quota such as 0, 20m or 1g
        quota: String,
    },
}

/// Views to stdout, alerts to stderr.
struct Stdout;

impl Surface for Stdout {
    fn show(&self, _location: &str, view: &View) {
        print!("{}", render_view(view));
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.api.base_url = url;
    }
    init_logging(&config.observability.log_level);

    let token = cli.token.or_else(|| {
        config
            .session
            .token_path
            .as_deref()
            .map(TokenStore::new)
            .and_then(|store| store.load())
    });
    let client = HttpAdminClient::new(&config.api, RetryPolicy::from_config(&config.retries))?
        .with_token(token);
    let views = ConsoleViews::new(client, &config.reports);

    match cli.command {
        Commands::Show { location } => {
            let navigator = Navigator::new(console_routes()?, views, Stdout);
            match navigator.navigate(&location).await {
                NavigationOutcome::Failed(_) => std::process::exit(1),
                NavigationOutcome::NotFound => {
                    eprintln!("Error: no page at {location:?}");
                    std::process::exit(2);
                }
                _ => {}
            }
        }
        Commands::Limits {
            account,
            max_outgoing_per_day,
            max_first_time_per_day,
            quota,
        } => {
            let input = LimitsInput {
                max_outgoing_messages_per_day: &max_outgoing_per_day,
                max_first_time_recipients_per_day: &max_first_time_per_day,
                quota_message_size: &quota,
            };
            views.set_account_limits(&account, &input).await?;
            println!("limits saved for {account}");
        }
    }

    Ok(())
}
