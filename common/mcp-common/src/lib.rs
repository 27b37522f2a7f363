//! MCP Common - shared plumbing for MCP servers
//!
//! - **Initialization**: [`init_tracing`] and [`serve_stdio`] for server startup
//! - **Results**: helpers for building `CallToolResult` responses
//! - **Errors**: conversion of domain errors into MCP errors
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process tool calls
//!
//! ```rust,ignore
//! use mcp_common::{init_tracing, serve_stdio};
//!
//! init_tracing("my_mcp")?;
//! serve_stdio(MyServer::new(state)).await?;
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, invalid_params, IntoMcpError, McpResult, ResultExt};
pub use init::{init_tracing, serve_stdio};
pub use result::{json_success, text_success, tool_error};

pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

pub use async_trait::async_trait;
