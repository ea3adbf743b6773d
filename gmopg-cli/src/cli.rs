//! Command-line arguments.

use std::path::PathBuf;

use gmopg::Service;

use crate::config::DEFAULT_CONFIG_PATH;

/// Calls GMO Payment Gateway operations and decodes raw gateway responses.
#[derive(clap::Parser, Debug)]
#[command(name = "gmopg", version, arg_required_else_help = true)]
pub struct Args {
    /// TOML configuration file. Missing files fall back to defaults and
    /// `GMOPG_*` environment variables.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "GMOPG_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Call one gateway operation and print the decoded response as JSON.
    Call(CallArgs),

    /// Decode a raw `key=value&...` response body and print it as JSON.
    Decode {
        /// The body to decode. Read from stdin when omitted.
        body: Option<String>,
    },

    /// List services and their operations.
    Operations {
        /// Only list this service (`credit-card`, `line-pay`, `paypay`,
        /// `member-card`).
        service: Option<Service>,
    },
}

/// Arguments of the `call` subcommand.
#[derive(clap::Args, Debug)]
pub struct CallArgs {
    /// Service name (`credit-card`, `line-pay`, `paypay`, `member-card`).
    pub service: Service,

    /// Operation name, e.g. `EntryTran` (case-insensitive).
    pub operation: String,

    /// Request attributes as `KEY=VALUE` pairs, sent in the given order.
    #[arg(value_name = "KEY=VALUE", value_parser = parse_attribute)]
    pub attributes: Vec<(String, String)>,

    /// Print the request that would be sent (passwords masked) instead of
    /// sending it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Parses one `KEY=VALUE` argument. The value may itself contain `=`.
fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}
