//! Error conversion for MCP servers

use rmcp::ErrorData as McpError;

/// Type alias for MCP tool results
pub type McpResult<T> = Result<T, McpError>;

/// Conversion of a domain error into an MCP error
///
/// Implement this for a server's own error types so tool bodies can use
/// `.to_mcp_err()?`.
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

impl IntoMcpError for serde_json::Error {
    fn into_mcp_error(self) -> McpError {
        invalid_params(format!("invalid JSON: {self}"))
    }
}

impl IntoMcpError for anyhow::Error {
    fn into_mcp_error(self) -> McpError {
        internal_error(self.to_string())
    }
}

/// Adds `.to_mcp_err()` to any result whose error implements [`IntoMcpError`]
pub trait ResultExt<T> {
    fn to_mcp_err(self) -> McpResult<T>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> McpResult<T> {
        self.map_err(IntoMcpError::into_mcp_error)
    }
}

pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// Use when a tool receives arguments it cannot act on
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_ext_anyhow() {
        let result: Result<(), anyhow::Error> = Err(anyhow::anyhow!("boom"));
        let err = result.to_mcp_err().unwrap_err();
        assert!(err.message.contains("boom"));
    }

    #[test]
    fn test_serde_error_is_invalid_params() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err = parse.to_mcp_err().unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_invalid_params() {
        let err = invalid_params("bad param");
        assert!(err.message.contains("bad param"));
    }
}
