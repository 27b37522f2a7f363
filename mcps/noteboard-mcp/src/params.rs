//! Parameter types for Note Board MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateNoteParams {
    #[schemars(description = "Short title, up to 80 characters")]
    pub title: String,

    #[schemars(description = "Note body, up to 500 characters")]
    pub description: String,

    #[schemars(description = "Who is posting the note, up to 40 characters")]
    pub author: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateNoteParams {
    #[schemars(description = "ID of the note to update")]
    pub id: String,

    #[schemars(description = "New title (omit or leave blank to keep the current one)")]
    #[serde(default)]
    pub title: Option<String>,

    #[schemars(description = "New description (omit or leave blank to keep the current one)")]
    #[serde(default)]
    pub description: Option<String>,

    #[schemars(description = "New author (omit or leave blank to keep the current one)")]
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteNoteParams {
    #[schemars(description = "ID of the note to delete")]
    pub id: String,
}
