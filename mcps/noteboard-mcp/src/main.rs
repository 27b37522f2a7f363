//! Note Board MCP Server
//!
//! Serves the shared board over MCP on stdio and, when a port is configured,
//! over a REST API as well. Both front ends share one store.

use clap::Parser;

use noteboard_mcp::config::Config;
use noteboard_mcp::{web, NoteBoardMcpServer, NoteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    mcp_common::init_tracing("noteboard_mcp")?;

    tracing::info!("Starting noteboard_mcp MCP Server");

    let store = NoteStore::new();

    let http = config.http_addr().map(|addr| {
        let store = store.clone();
        tokio::spawn(async move {
            let result = web::serve(addr, store).await;
            if let Err(e) = &result {
                tracing::error!("REST API stopped: {}", e);
            }
            result
        })
    });

    match (config.no_stdio, http) {
        (false, http) => {
            mcp_common::serve_stdio(NoteBoardMcpServer::new(store)).await?;
            if let Some(http) = http {
                http.abort();
            }
        }
        (true, Some(http)) => http.await??,
        (true, None) => anyhow::bail!("--no-stdio requires --http-port"),
    }

    tracing::info!("Server shutting down");
    Ok(())
}
