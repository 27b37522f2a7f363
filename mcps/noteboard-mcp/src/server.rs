//! MCP Server implementation for the shared note board

use mcp_common::{
    async_trait, invalid_params, json_success, text_success, tool_error, EmbeddableError,
    EmbeddableMcp, EmbeddableResult, IntoMcpError, McpError, ResultExt,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::params::*;
use crate::store::NoteStore;
use crate::types::{ClearResponse, DeleteResponse, ListResponse};
use crate::validation::{validate_new, validate_patch, ValidationError};

const INSTRUCTIONS: &str = "Shared ephemeral note board. Any client can create, list, update \
     and delete short notes; every note self-destructs 10 minutes after it was created \
     (updates do not extend its life). Use board_snapshot for a compact overview.";

impl IntoMcpError for ValidationError {
    fn into_mcp_error(self) -> McpError {
        invalid_params(self.to_string())
    }
}

/// The main Note Board MCP Server
#[derive(Clone)]
pub struct NoteBoardMcpServer {
    store: NoteStore,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl NoteBoardMcpServer {
    /// Serve tools over an existing board
    pub fn new(store: NoteStore) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    #[tool(
        description = "Pin a new note to the shared board. Title (max 80 chars), description (max 500 chars) and author (max 40 chars) are required. The note expires 10 minutes after creation."
    )]
    async fn create_note(
        &self,
        Parameters(params): Parameters<CreateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let new = validate_new(&params.title, &params.description, &params.author)
            .to_mcp_err()?;
        let note = self
            .store
            .create(&new.title, &new.description, &new.author)
            .await;
        json_success(&note)
    }

    #[tool(description = "List every live note on the board, newest first.")]
    async fn list_notes(&self) -> Result<CallToolResult, McpError> {
        json_success(&ListResponse::from(self.store.list().await))
    }

    #[tool(
        description = "Update the title, description and/or author of a note. Omitted fields are kept. The expiry time is not extended."
    )]
    async fn update_note(
        &self,
        Parameters(params): Parameters<UpdateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let patch = validate_patch(params.title, params.description, params.author)
            .to_mcp_err()?;

        match self.store.update(&params.id, patch).await {
            Some(note) => json_success(&note),
            None => Ok(tool_error(format!(
                "note not found: {} (it may have expired or been deleted)",
                params.id
            ))),
        }
    }

    #[tool(description = "Delete a note by ID. Reports whether the note existed.")]
    async fn delete_note(
        &self,
        Parameters(params): Parameters<DeleteNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let deleted = self.store.delete(&params.id).await;
        json_success(&DeleteResponse {
            id: params.id,
            deleted,
        })
    }

    #[tool(description = "Remove every note from the board.")]
    async fn clear_notes(&self) -> Result<CallToolResult, McpError> {
        let cleared = self.store.clear().await;
        json_success(&ClearResponse { cleared })
    }

    #[tool(
        description = "Compact text overview of the board: id, title, description, author and minutes until expiry for each note."
    )]
    async fn board_snapshot(&self) -> Result<CallToolResult, McpError> {
        Ok(text_success(self.store.snapshot().await))
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for NoteBoardMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for NoteBoardMcpServer {
    fn server_name(&self) -> &str {
        "noteboard"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "create_note" => {
                let params: CreateNoteParams = serde_json::from_value(params)?;
                self.create_note(Parameters(params)).await.map_err(Into::into)
            }

            "list_notes" => self.list_notes().await.map_err(Into::into),

            "update_note" => {
                let params: UpdateNoteParams = serde_json::from_value(params)?;
                self.update_note(Parameters(params)).await.map_err(Into::into)
            }

            "delete_note" => {
                let params: DeleteNoteParams = serde_json::from_value(params)?;
                self.delete_note(Parameters(params)).await.map_err(Into::into)
            }

            "clear_notes" => self.clear_notes().await.map_err(Into::into),

            "board_snapshot" => self.board_snapshot().await.map_err(Into::into),

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
