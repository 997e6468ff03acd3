//! Browser automation tools: navigate, click, input, inspect.
//!
//! Tools are typed ([`Tool`] with a serde/schemars parameter struct) and
//! dispatched by name through the [`ToolRegistry`], which is what both the
//! library surface and the MCP layer call into.

pub mod click;
pub mod inspect;
pub mod input;
pub mod navigate;
pub mod utils;

pub use click::{ClickParams, ClickTool};
pub use inspect::{InspectParams, InspectTool};
pub use input::{InputParams, InputTool};
pub use navigate::{NavigateParams, NavigateTool};

use crate::browser::BrowserSession;
use crate::error::{BrowserError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Execution context handed to every tool invocation.
pub struct ToolContext<'a> {
    pub session: &'a BrowserSession,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session }
    }
}

/// Outcome of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn success_with(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A typed browser automation tool.
pub trait Tool {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// JSON schema for the tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }
}

/// Object-safe adapter so heterogeneous tools can live in one registry.
trait DynTool {
    fn name(&self) -> &str;
    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed: T::Params = serde_json::from_value(params)
            .map_err(|e| BrowserError::InvalidParams(e.to_string()))?;
        self.execute_typed(typed, context)
    }
}

/// Name-indexed tool collection, in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool + Send + Sync>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Registry with the built-in tool set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(ClickTool);
        registry.register(InputTool);
        registry.register(InspectTool);
        registry
    }

    pub fn register<T: Tool + Send + Sync + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Execute a tool by name with JSON parameters.
    pub fn execute(
        &self,
        name: &str,
        params: serde_json::Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| BrowserError::UnknownTool(name.to_string()))?;
        tool.execute(params, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_contents() {
        let registry = ToolRegistry::with_defaults();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["navigate", "click", "input", "inspect"]);
    }

    #[test]
    fn test_contains() {
        let registry = ToolRegistry::with_defaults();
        assert!(registry.contains("inspect"));
        assert!(!registry.contains("screenshot"));
    }

    #[test]
    fn test_tool_result_constructors() {
        let ok = ToolResult::success_with(serde_json::json!({"n": 1}));
        assert!(ok.success);
        assert_eq!(ok.data.unwrap()["n"], 1);

        let err = ToolResult::failure("boom");
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_parameters_schema_is_object() {
        let tool = NavigateTool;
        assert!(tool.parameters_schema().is_object());
    }
}
