//! MCP (Model Context Protocol) server implementation for browser
//! automation and page inspection.
//!
//! Wraps the internal tool implementations as rmcp-compatible tools.

pub mod handler;
pub use handler::BrowserServer;

use crate::tools::{ToolContext, ToolResult as InternalToolResult};
use rmcp::{
    tool_router, tool,
    ErrorData as McpError,
    model::{CallToolResult, Content},
    handler::server::wrapper::Parameters,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Navigate tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// URL to navigate to
    pub url: String,
    /// Wait for navigation to complete (default: true)
    #[serde(default = "default_true")]
    pub wait_for_load: bool,
}

/// Click tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickParams {
    /// CSS selector of the element to click (first match is used)
    pub selector: String,
}

/// Input tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InputParams {
    /// CSS selector of the input element
    pub selector: String,
    /// Text to input
    pub text: String,
}

/// Page inspection parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InspectPageParams {
    /// Selector of the subtree root (default: body)
    #[serde(default)]
    pub selector: Option<String>,
    /// Maximum number of elements to return (default: 100)
    #[serde(default)]
    pub max_elements: Option<usize>,
    /// Maximum traversal depth from the root (default: 3)
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Only emit these tags, e.g. ["a", "button"]
    #[serde(default)]
    pub element_types: Option<Vec<String>>,
    /// Restrict captured attributes to these names
    #[serde(default)]
    pub attributes: Option<Vec<String>>,
    /// Eligibility mode: "all", "clickable" or "form" (default: all)
    #[serde(default)]
    pub mode: Option<String>,
}

/// Parameters for the clickable/form element finders
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindElementsParams {
    /// Maximum number of elements to return (default: 50)
    #[serde(default)]
    pub max_elements: Option<usize>,
}

fn default_true() -> bool {
    true
}

/// Default cap for the find_clickable/find_form convenience tools.
const FIND_DEFAULT_MAX: usize = 50;

/// Convert internal ToolResult to MCP CallToolResult
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    if result.success {
        let text = if let Some(data) = result.data {
            serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
        } else {
            "Success".to_string()
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
        Err(McpError::internal_error(error_msg, None))
    }
}

impl BrowserServer {
    fn run_tool(
        &self,
        name: &str,
        params: serde_json::Value,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session();
        let mut context = ToolContext::new(&*session);

        let result = session
            .tool_registry()
            .execute(name, params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }

    fn inspect_json(params: InspectPageParams) -> serde_json::Value {
        let mut json = serde_json::Map::new();
        if let Some(selector) = params.selector {
            json.insert("rootSelector".to_string(), selector.into());
        }
        if let Some(max_elements) = params.max_elements {
            json.insert("maxElements".to_string(), max_elements.into());
        }
        if let Some(max_depth) = params.max_depth {
            json.insert("maxDepth".to_string(), max_depth.into());
        }
        if let Some(types) = params.element_types {
            json.insert("elementTypes".to_string(), serde_json::json!(types));
        }
        if let Some(attributes) = params.attributes {
            json.insert("attributes".to_string(), serde_json::json!(attributes));
        }
        if let Some(mode) = params.mode {
            json.insert("mode".to_string(), mode.into());
        }
        serde_json::Value::Object(json)
    }
}

#[tool_router]
impl BrowserServer {
    /// Navigate to a URL
    #[tool(description = "Navigate to a specified URL in the browser")]
    fn browser_navigate(
        &self,
        params: Parameters<NavigateParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool(
            "navigate",
            serde_json::json!({
                "url": params.0.url,
                "wait_for_load": params.0.wait_for_load
            }),
        )
    }

    /// Click on an element
    #[tool(description = "Click on the first element matching a CSS selector")]
    fn browser_click(&self, params: Parameters<ClickParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("click", serde_json::json!({ "selector": params.0.selector }))
    }

    /// Fill input field with text
    #[tool(description = "Type text into the first element matching a CSS selector")]
    fn browser_form_input_fill(
        &self,
        params: Parameters<InputParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool(
            "input",
            serde_json::json!({
                "selector": params.0.selector,
                "text": params.0.text
            }),
        )
    }

    /// Inspect the page structure
    #[tool(description = "Analyze page structure: a bounded, filtered walk of the DOM \
                          returning tag, text, attributes, visibility and position per element")]
    fn browser_inspect_page(
        &self,
        params: Parameters<InspectPageParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool("inspect", Self::inspect_json(params.0))
    }

    /// Find clickable elements
    #[tool(description = "Find clickable elements (links, buttons, inputs, elements with \
                          actionable roles or click handlers) on the current page")]
    fn browser_find_clickable_elements(
        &self,
        params: Parameters<FindElementsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool(
            "inspect",
            serde_json::json!({
                "mode": "clickable",
                "maxElements": params.0.max_elements.unwrap_or(FIND_DEFAULT_MAX)
            }),
        )
    }

    /// Find form elements
    #[tool(description = "Find form controls (inputs, selects, textareas, forms) on the \
                          current page")]
    fn browser_find_form_elements(
        &self,
        params: Parameters<FindElementsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool(
            "inspect",
            serde_json::json!({
                "mode": "form",
                "maxElements": params.0.max_elements.unwrap_or(FIND_DEFAULT_MAX)
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_json_passes_through_fields() {
        let params = InspectPageParams {
            selector: Some("#main".to_string()),
            max_elements: Some(10),
            max_depth: Some(2),
            element_types: Some(vec!["a".to_string()]),
            attributes: Some(vec!["href".to_string()]),
            mode: Some("clickable".to_string()),
        };

        let json = BrowserServer::inspect_json(params);
        assert_eq!(json["rootSelector"], "#main");
        assert_eq!(json["maxElements"], 10);
        assert_eq!(json["maxDepth"], 2);
        assert_eq!(json["elementTypes"][0], "a");
        assert_eq!(json["attributes"][0], "href");
        assert_eq!(json["mode"], "clickable");
    }

    #[test]
    fn test_inspect_json_omits_unset_fields() {
        let params = InspectPageParams {
            selector: None,
            max_elements: None,
            max_depth: None,
            element_types: None,
            attributes: None,
            mode: None,
        };

        let json = BrowserServer::inspect_json(params);
        assert!(json.as_object().unwrap().is_empty());
    }
}
