//! Note Board MCP Library
//!
//! A shared, ephemeral note board: clients create, list, update and delete
//! short notes, and every note self-destructs 10 minutes after creation.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use noteboard_mcp::{NoteBoardMcpServer, NoteStore};
//!
//! let store = NoteStore::new();
//! let server = NoteBoardMcpServer::new(store.clone());
//! // Serve via stdio, or call tools in-process through EmbeddableMcp
//! ```
//!
//! # Usage as Binary
//!
//! Run directly: `noteboard-mcp [--http-port 8787]`
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "noteboard": { "command": "./noteboard-mcp" } } }
//! ```

pub mod clock;
pub mod config;
pub mod params;
pub mod render;
pub mod scheduler;
pub mod server;
pub mod store;
pub mod types;
pub mod validation;
pub mod web;

pub use server::NoteBoardMcpServer;
pub use store::{NotePatch, NoteStore};
pub use types::{Note, NoteId};

pub use params::*;

pub use mcp_common::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
