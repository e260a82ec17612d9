//! Guildhall command line tool.
//!
//! Composition root for the session core: loads configuration, builds the
//! accounts client, bootstraps the session store, and drives the content
//! gate. Redirects are dispatched through a logging navigator.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use guildhall_client::{AccountsClient, PortalConfig};
use guildhall_session::api::Navigator;
use guildhall_session::entitlement::trial_end;
use guildhall_session::{PortalContext, SessionStore};

#[derive(Parser)]
#[command(name = "guildhallctl")]
#[command(version, about = "Guildhall member session tool", long_about = None)]
struct Cli {
    /// Accounts service base URL (overrides config)
    #[arg(long)]
    server_url: Option<String>,

    /// Path to a config file (TOML, JSON, or YAML)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the member that owns the ambient session
    Whoami,
    /// Evaluate the content gate for the current session
    Access,
}

/// Navigator that logs redirects instead of driving a browser.
struct LogNavigator {
    login_path: String,
}

impl Navigator for LogNavigator {
    fn redirect_to_login(&self) {
        tracing::info!(path = %self.login_path, "Redirecting to login");
    }

    fn redirect_to(&self, path: &str) {
        tracing::info!(%path, "Redirecting");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PortalConfig::from_file(path)?,
        None => PortalConfig::load()?,
    };
    if let Some(url) = cli.server_url {
        config.accounts.base_url = url;
    }

    let accounts = Arc::new(AccountsClient::new(
        &config.accounts.base_url,
        config.accounts.timeout_secs,
    ));
    let store = SessionStore::bootstrap(accounts).await;

    match cli.command {
        Commands::Whoami => whoami(&store),
        Commands::Access => access(store, &config),
    }

    Ok(())
}

fn whoami(store: &SessionStore) {
    let state = store.current();

    match state.user {
        Some(user) => {
            println!("{} <{}>", user.full_name, user.email);
            if user.is_pro_member {
                println!("membership: pro");
            } else if let Some(end) = trial_end(&user) {
                let status = if user.trial_used { "used" } else { "trial" };
                println!("membership: {} (window ends {})", status, end);
            } else {
                println!("membership: free");
            }
        }
        None => println!("Not authenticated"),
    }
}

fn access(store: SessionStore, config: &PortalConfig) {
    let navigator = Arc::new(LogNavigator {
        login_path: config.gate.login_path.clone(),
    });
    let context = PortalContext::new(store, navigator, config.gate.upsell_path.clone());

    let mut gate = context.gate();
    let state = gate.apply(&context.session.current(), Utc::now());

    println!("gate: {}", state);
}
