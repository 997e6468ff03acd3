use crate::error::Result;
use crate::tools::utils::normalize_url;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for the navigate tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// URL to navigate to
    pub url: String,

    /// Wait for navigation to complete (default: true)
    #[serde(default = "default_wait")]
    pub wait_for_load: bool,

    /// Retry attempts on navigation failure (default: 3)
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_wait() -> bool {
    true
}

fn default_retries() -> u32 {
    3
}

/// Tool for navigating to a URL, with whole-call retry and backoff.
#[derive(Default)]
pub struct NavigateTool;

impl Tool for NavigateTool {
    type Params = NavigateParams;

    fn name(&self) -> &str {
        "navigate"
    }

    fn execute_typed(
        &self,
        params: NavigateParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let normalized_url = normalize_url(&params.url);
        let attempts = params.retries.max(1);

        context
            .session
            .with_retry(attempts, Duration::from_millis(250), |session| {
                session.navigate(&normalized_url)?;
                if params.wait_for_load {
                    session.wait_for_navigation()?;
                }
                Ok(())
            })?;

        Ok(ToolResult::success_with(serde_json::json!({
            "original_url": params.url,
            "normalized_url": normalized_url,
            "waited": params.wait_for_load
        })))
    }
}
