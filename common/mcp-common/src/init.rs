//! Server initialization
//!
//! Logging goes to stderr because stdout carries the MCP protocol.

use rmcp::{transport::stdio, ServerHandler, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for an MCP server
///
/// `RUST_LOG` filters as usual, with `<crate_name>=info` added by default.
/// `LOG_FORMAT=json` switches to structured JSON lines.
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let directive = format!("{crate_name}=info");
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Serve an already constructed handler over stdio until the client hangs up
///
/// Unlike a `Default`-constructed server, the caller keeps ownership of any
/// state shared with other front ends (e.g. an HTTP sidecar).
pub async fn serve_stdio<S>(server: S) -> anyhow::Result<()>
where
    S: ServerHandler,
{
    let service = server.serve(stdio()).await?;
    tracing::info!("Server running on stdio, waiting for requests...");

    let reason = service.waiting().await?;
    tracing::info!(?reason, "Server shutting down");
    Ok(())
}
