//! balanced-client
//!
//! Loads a client configuration, initializes every configured HTTP client
//! through the decoration hook, then inspects them or sends a request.
//!
//! # Architecture Overview
//!
//! ```text
//!   config (TOML) ──▶ lifecycle::startup
//!                         │
//!                         ├─▶ load_balancer::ServiceRegistry
//!                         ├─▶ context::ComponentContext ◀── decoration::ClientBuilderDecorator
//!                         │        │
//!                         │        ▼
//!                         └─▶ client::HttpClientBuilder ──build──▶ BalancedClient
//!                                                                     │
//!   GET http://<service-id>/path ──▶ filters (request-id, load-balancer) ──▶ instance
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use balanced_client::config::{load_config, AppConfig};
use balanced_client::lifecycle::start;
use balanced_client::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "balanced-client")]
#[command(about = "Load-balanced HTTP clients from a TOML configuration", long_about = None)]
struct Cli {
    /// Configuration file (defaults apply when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the initialized clients and their filters
    Inspect,
    /// Send a GET request through a named client
    Get {
        /// Client name from the configuration
        #[arg(short, long)]
        client: String,
        /// Request URL; use the service id as host for load-balanced clients
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability);
    tracing::info!(
        config = ?cli.config,
        services = config.services.len(),
        clients = config.clients.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let app = start(&config)?;

    match cli.command {
        Commands::Inspect => {
            println!("{}", serde_json::to_string_pretty(app.report())?);
        }
        Commands::Get { client, url } => {
            let Some(http) = app.client(&client) else {
                return Err(format!("unknown client '{client}'").into());
            };
            let request = http.get(url.as_str()).build()?;
            let response = http.execute(request).await?;

            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                eprintln!("Error: request returned status {}", status);
            }
            println!("{}", body);
        }
    }

    Ok(())
}
