use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Failure of a single tool invocation. Nothing here is retried.
#[derive(Debug, Error)]
pub enum RaindropError {
    /// Required setting (the API token) is missing.
    #[error("{0}")]
    Configuration(String),

    /// Arguments failed schema validation; holds the joined violation list.
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// The API answered with a non-2xx status.
    #[error("Raindrop API error: {status_text}")]
    Upstream { status: u16, status_text: String },

    /// The API could not be reached, or its answer could not be read.
    #[error("{0}")]
    Network(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl RaindropError {
    pub fn missing_token() -> Self {
        RaindropError::Configuration("RAINDROP_TOKEN is not set".into())
    }

    pub fn upstream(status: reqwest::StatusCode) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_owned)
            .unwrap_or_else(|| status.as_u16().to_string());
        RaindropError::Upstream {
            status: status.as_u16(),
            status_text,
        }
    }

    /// Caller mistakes map to invalid params (-32602), everything else to internal error.
    pub fn into_mcp(self) -> McpError {
        match self {
            RaindropError::Validation(_) | RaindropError::UnknownTool(_) => {
                McpError::invalid_params(self.to_string(), None)
            }
            _ => McpError::internal_error(self.to_string(), None),
        }
    }
}

impl From<reqwest::Error> for RaindropError {
    fn from(e: reqwest::Error) -> Self {
        let message = with_causes(&e);
        if e.is_decode() {
            RaindropError::Network(format!("failed to decode Raindrop response: {message}"))
        } else {
            RaindropError::Network(message)
        }
    }
}

/// `outer: cause: root cause`, skipping causes the outer text already repeats.
fn with_causes(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
