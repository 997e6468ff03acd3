//! Error types for browser automation and page inspection.

use std::time::Duration;
use thiserror::Error;

/// Errors produced by the browser session, tools, and the inspection core.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    #[error("tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("script evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("failed to parse DOM snapshot: {0}")]
    SnapshotParse(String),

    /// Malformed inspection request. Raised before any DOM access occurs
    /// and never retried automatically.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// The document navigated away or was closed mid-traversal. The whole
    /// inspection fails; no partial envelope is returned.
    #[error("document became stale during inspection: {0}")]
    StaleDocument(String),

    /// A single node's handle went stale while its descriptor was being
    /// built. Internal: absorbed by the descriptor builder, never surfaced
    /// to callers.
    #[error("node detached during inspection")]
    DetachedNode,

    #[error("inspection timed out after {0:?}")]
    Timeout(Duration),

    #[error("tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BrowserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrowserError::InvalidParams("maxElements must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "invalid parameters: maxElements must be >= 1"
        );

        let err = BrowserError::ToolExecutionFailed {
            tool: "click".to_string(),
            reason: "no such element".to_string(),
        };
        assert_eq!(err.to_string(), "tool 'click' failed: no such element");
    }

    #[test]
    fn test_timeout_mentions_budget() {
        let err = BrowserError::Timeout(Duration::from_secs(30));
        assert!(err.to_string().contains("30"));
    }
}
