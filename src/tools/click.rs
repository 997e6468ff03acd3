use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for the click tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickParams {
    /// CSS selector of the element to click; the first match is used
    pub selector: String,

    /// Retry attempts when the element is missing or not yet interactive
    /// (default: 2)
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_retries() -> u32 {
    2
}

/// Tool for clicking elements by CSS selector.
#[derive(Default)]
pub struct ClickTool;

impl Tool for ClickTool {
    type Params = ClickParams;

    fn name(&self) -> &str {
        "click"
    }

    fn execute_typed(&self, params: ClickParams, context: &mut ToolContext) -> Result<ToolResult> {
        let attempts = params.retries.max(1);
        context
            .session
            .with_retry(attempts, Duration::from_millis(250), |session| {
                session.click(&params.selector)
            })?;

        Ok(ToolResult::success_with(serde_json::json!({
            "selector": params.selector
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_params() {
        let params: ClickParams = serde_json::from_value(serde_json::json!({
            "selector": "#my-button"
        }))
        .unwrap();

        assert_eq!(params.selector, "#my-button");
        assert_eq!(params.retries, 2);
    }

    #[test]
    fn test_click_params_require_selector() {
        let result = serde_json::from_value::<ClickParams>(serde_json::json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_click_tool_metadata() {
        let tool = ClickTool;
        assert_eq!(tool.name(), "click");
    }
}
