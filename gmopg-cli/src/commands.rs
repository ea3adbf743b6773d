//! Subcommand implementations.
//!
//! Output goes to the given writer as pretty JSON (or a plain table for
//! `operations`), so the binary can point it at stdout and tests at a
//! buffer.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use gmopg::{AttributeMap, GatewayClient, ResponseDecoder, Service};
use gmopg_http::HttpTransport;

use crate::cli::CallArgs;
use crate::config::CliConfig;

/// Boxed error returned by the subcommands.
pub type CommandError = Box<dyn std::error::Error + Send + Sync>;

/// Builds a client over the HTTP transport described by `config`.
#[must_use]
pub fn client(config: &CliConfig) -> GatewayClient {
    let mut transport = HttpTransport::new();
    if let Some(secs) = config.timeout_secs {
        transport = transport.with_timeout(Duration::from_secs(secs));
    }
    GatewayClient::new(config.gateway.clone(), transport).with_catalog(config.catalog())
}

/// Runs `call`: sends the operation (or prints the request for `--dry-run`).
///
/// # Errors
///
/// Returns an error for an unknown operation, a transport failure, or a
/// failed write.
pub async fn call(
    client: &GatewayClient,
    args: CallArgs,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let operation = args.service.find_operation(&args.operation)?;
    let attributes: AttributeMap = args.attributes.into_iter().collect();

    if args.dry_run {
        let request = client.build_request(operation, attributes).redacted();
        serde_json::to_writer_pretty(&mut *out, &request)?;
        writeln!(out)?;
        return Ok(());
    }

    tracing::info!(
        service = %args.service,
        operation = operation.name,
        url = %operation.url(client.config()),
        "Calling gateway"
    );
    let response = client.call(operation, attributes).await?;

    serde_json::to_writer_pretty(&mut *out, &response)?;
    writeln!(out)?;
    Ok(())
}

/// Runs `decode`: decodes a raw response body with the configured catalog.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn decode(config: &CliConfig, body: &str, out: &mut impl Write) -> Result<(), CommandError> {
    let decoder = ResponseDecoder::new(Arc::new(config.catalog()), config.gateway.locale.clone());
    let response = decoder.decode(body);
    serde_json::to_writer_pretty(&mut *out, &response)?;
    writeln!(out)?;
    Ok(())
}

/// Runs `operations`: prints one line per operation.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn operations(service: Option<Service>, out: &mut impl Write) -> Result<(), CommandError> {
    let services = service.map_or_else(|| Service::ALL.to_vec(), |service| vec![service]);
    for service in services {
        for descriptor in service.operations() {
            writeln!(
                out,
                "{:<12} {:<24} {:<40} {:?}",
                service.name(),
                descriptor.name,
                descriptor.path,
                descriptor.credentials
            )?;
        }
    }
    Ok(())
}
