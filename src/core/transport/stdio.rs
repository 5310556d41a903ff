//! STDIO transport implementation.
//!
//! Newline-delimited JSON-RPC on stdin/stdout, handled by rmcp. Logs go to
//! stderr so they never corrupt the protocol stream.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve until the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - {} tools available via stdin/stdout", server.tools().len());

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::Session(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::Serve(e.to_string()))?;

        info!("STDIO transport finished: {:?}", reason);
        Ok(())
    }
}
