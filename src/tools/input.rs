use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the input tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InputParams {
    /// CSS selector for the input element
    pub selector: String,

    /// Text to type into the element
    pub text: String,
}

/// Tool for typing text into form fields.
#[derive(Default)]
pub struct InputTool;

impl Tool for InputTool {
    type Params = InputParams;

    fn name(&self) -> &str {
        "input"
    }

    fn execute_typed(&self, params: InputParams, context: &mut ToolContext) -> Result<ToolResult> {
        context.session.type_text(&params.selector, &params.text)?;

        Ok(ToolResult::success_with(serde_json::json!({
            "selector": params.selector,
            "text_length": params.text.len()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_params() {
        let params: InputParams = serde_json::from_value(serde_json::json!({
            "selector": "input[name=q]",
            "text": "rust"
        }))
        .unwrap();

        assert_eq!(params.selector, "input[name=q]");
        assert_eq!(params.text, "rust");
    }

    #[test]
    fn test_input_tool_metadata() {
        let tool = InputTool;
        assert_eq!(tool.name(), "input");
    }
}
