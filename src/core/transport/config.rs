//! Transport selection.
//!
//! `MCP_TRANSPORT` picks the transport (`stdio` unless told otherwise); the
//! HTTP listener is tuned with `MCP_HTTP_HOST`, `MCP_HTTP_PORT`,
//! `MCP_HTTP_PATH` and `MCP_HTTP_CORS`.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which transport serves the MCP session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Newline-delimited JSON-RPC on stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP listener settings.
#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Route that accepts JSON-RPC requests.
    pub rpc_path: String,
    /// Allow any origin, for browser-based clients.
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rpc_path: "/mcp".to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    fn from_lookup(var: &impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: var("MCP_HTTP_HOST").unwrap_or(defaults.host),
            port: var("MCP_HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            rpc_path: var("MCP_HTTP_PATH").unwrap_or(defaults.rpc_path),
            enable_cors: var("MCP_HTTP_CORS")
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0"))
                .unwrap_or(defaults.enable_cors),
        }
    }
}

#[cfg(not(any(feature = "stdio", feature = "http")))]
compile_error!("At least one transport feature must be enabled: stdio or http");

impl Default for TransportConfig {
    #[cfg(feature = "stdio")]
    fn default() -> Self {
        Self::Stdio
    }

    #[cfg(not(feature = "stdio"))]
    fn default() -> Self {
        Self::Http(HttpConfig::default())
    }
}

impl TransportConfig {
    /// Read the transport choice from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let Some(choice) = var("MCP_TRANSPORT") else {
            return Self::default();
        };

        match choice.to_lowercase().as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_lookup(&var)),
            other => {
                warn!("Transport '{}' is not available in this build, using the default", other);
                Self::default()
            }
        }
    }

    /// Short description for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}
