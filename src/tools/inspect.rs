use crate::error::{BrowserError, Result};
use crate::inspect::InspectionRequest;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for the inspect tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct InspectParams {
    /// Traversal policy: root selector, bounds, filters, mode
    #[serde(flatten)]
    pub request: InspectionRequest,

    /// Overall time budget in milliseconds; a timed-out inspection fails
    /// with no partial result (default: no budget)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

/// Tool exposing the page inspection core.
#[derive(Default)]
pub struct InspectTool;

impl Tool for InspectTool {
    type Params = InspectParams;

    fn name(&self) -> &str {
        "inspect"
    }

    fn execute_typed(&self, params: InspectParams, context: &mut ToolContext) -> Result<ToolResult> {
        let result = match params.timeout_ms {
            Some(ms) => context
                .session
                .inspect_with_timeout(&params.request, Duration::from_millis(ms))?,
            None => context.session.inspect(&params.request)?,
        };

        let envelope = serde_json::to_value(&result).map_err(|e| {
            BrowserError::ToolExecutionFailed {
                tool: "inspect".to_string(),
                reason: format!("failed to serialize result: {}", e),
            }
        })?;

        Ok(ToolResult::success_with(envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::InspectMode;

    #[test]
    fn test_inspect_params_defaults() {
        let params: InspectParams = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(params.request.root_selector, "body");
        assert_eq!(params.request.max_elements, 100);
        assert_eq!(params.request.max_depth, 3);
        assert_eq!(params.request.mode, InspectMode::All);
        assert!(params.timeout_ms.is_none());
    }

    #[test]
    fn test_inspect_params_flattened_request() {
        let params: InspectParams = serde_json::from_value(serde_json::json!({
            "rootSelector": "#content",
            "mode": "form",
            "maxElements": 25,
            "attributes": ["name", "type"],
            "timeout_ms": 5000
        }))
        .unwrap();

        assert_eq!(params.request.root_selector, "#content");
        assert_eq!(params.request.mode, InspectMode::Form);
        assert_eq!(params.request.max_elements, 25);
        assert_eq!(
            params.request.attributes.as_deref(),
            Some(["name".to_string(), "type".to_string()].as_slice())
        );
        assert_eq!(params.timeout_ms, Some(5000));
    }

    #[test]
    fn test_inspect_tool_metadata() {
        let tool = InspectTool;
        assert_eq!(tool.name(), "inspect");
        assert!(tool.parameters_schema().is_object());
    }
}
