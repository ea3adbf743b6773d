//! GMO Payment Gateway command-line client.
//!
//! # Usage
//!
//! ```bash
//! # Register a card transaction against the sandbox
//! gmopg call credit-card EntryTran OrderID=ORD1 JobCd=AUTH Amount=1000
//!
//! # Show the request without sending it (passwords masked)
//! gmopg call member-card SearchCardDetail MemberID=M1 CardSeq=0 --dry-run
//!
//! # Decode a raw response body
//! echo 'ErrCode=E01&ErrInfo=E01010001' | gmopg decode
//!
//! # Configure logging level
//! RUST_LOG=debug gmopg operations paypay
//! ```
//!
//! # Environment Variables
//!
//! - `GMOPG_CONFIG` — Path to TOML configuration file (default: `gmopg.toml`)
//! - `GMOPG_PAYMENT_URL`, `GMOPG_SITE_ID`, `GMOPG_SITE_PASS`, `GMOPG_SHOP_ID`,
//!   `GMOPG_SHOP_PASS`, `GMOPG_LOCALE` — Override the file values
//! - `RUST_LOG` — Log level filter (default: `info`)

use std::io::{BufWriter, Read, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gmopg_cli::commands::{self, CommandError};
use gmopg_cli::{Args, CliConfig, Command};

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        tracing::error!("gmopg failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CommandError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    let args = Args::parse();
    let mut out = BufWriter::new(std::io::stdout().lock());

    match args.command {
        Command::Operations { service } => commands::operations(service, &mut out)?,
        Command::Decode { body } => {
            let config = CliConfig::load_from(&args.config)?;
            let body = match body {
                Some(body) => body,
                None => {
                    let mut body = String::new();
                    std::io::stdin().read_to_string(&mut body)?;
                    body
                }
            };
            commands::decode(&config, &body, &mut out)?;
        }
        Command::Call(call) => {
            let config = CliConfig::load_from(&args.config)?;
            tracing::info!(
                config = %args.config.display(),
                url = config.gateway.base_url(),
                locale = %config.gateway.locale,
                "Loaded configuration"
            );
            if config.gateway.credentials.shop_id.is_empty()
                && config.gateway.credentials.site_id.is_empty()
            {
                tracing::warn!("No site or shop credentials configured");
            }
            let client = commands::client(&config);
            commands::call(&client, call, &mut out).await?;
        }
    }

    out.flush()?;
    Ok(())
}
