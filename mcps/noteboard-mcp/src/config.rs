//! Command line / environment configuration

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Shared ephemeral note board served over MCP (stdio) and optionally REST
#[derive(Parser, Debug, Clone)]
#[command(name = "noteboard-mcp", version, about)]
pub struct Config {
    /// Also serve the REST API on this port
    #[arg(long, env = "NOTEBOARD_HTTP_PORT")]
    pub http_port: Option<u16>,

    /// Bind address for the REST API
    #[arg(long, env = "NOTEBOARD_HTTP_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub http_host: IpAddr,

    /// Do not serve MCP on stdio (requires --http-port)
    #[arg(long, requires = "http_port")]
    pub no_stdio: bool,
}

impl Config {
    /// Socket address of the REST API, if enabled
    pub fn http_addr(&self) -> Option<SocketAddr> {
        self.http_port
            .map(|port| SocketAddr::new(self.http_host, port))
    }
}
