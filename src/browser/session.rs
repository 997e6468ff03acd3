use crate::browser::config::{ConnectionOptions, LaunchOptions};
use crate::error::{BrowserError, Result};
use crate::inspect::{self, InspectionRequest, InspectionResult, TabDomSource};
use crate::tools::{ToolContext, ToolRegistry, ToolResult};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session owning one Chrome/Chromium instance.
///
/// The session is also the mutual-exclusion boundary for inspection:
/// callers serialize calls per session, and the inspection core assumes
/// single-caller access to the document it is handed.
pub struct BrowserSession {
    browser: Browser,
    tool_registry: ToolRegistry,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options.
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts
            .ignore_default_args
            .push(OsStr::new("--enable-automation"));
        launch_opts
            .args
            .push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Long idle timeout so the session survives quiet MCP clients
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }
        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        let browser =
            Browser::new(launch_opts).map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        browser
            .new_tab()
            .map_err(|e| BrowserError::LaunchFailed(format!("failed to create tab: {}", e)))?;

        Ok(Self {
            browser,
            tool_registry: ToolRegistry::with_defaults(),
        })
    }

    /// Connect to an existing browser instance via WebSocket.
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect(options.ws_url)
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            browser,
            tool_registry: ToolRegistry::with_defaults(),
        })
    }

    /// Launch a browser with default options.
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get the active tab.
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Get all tabs.
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| BrowserError::TabOperationFailed(format!("failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking document visibility and
    /// focus state. Falls back to visibility alone when no tab has focus.
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        for tab in &tabs {
            match tab.evaluate(
                "document.visibilityState === 'visible' && document.hasFocus()",
                false,
            ) {
                Ok(remote_object) => {
                    if let Some(value) = remote_object.value {
                        if value.as_bool().unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                }
                Err(e) => {
                    log::debug!("failed to check tab status: {}", e);
                    continue;
                }
            }
        }

        for tab in &tabs {
            match tab.evaluate("document.visibilityState === 'visible'", false) {
                Ok(remote_object) => {
                    if let Some(value) = remote_object.value {
                        if value.as_bool().unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                }
                Err(_) => continue,
            }
        }

        Err(BrowserError::TabOperationFailed(
            "no active tab found".to_string(),
        ))
    }

    /// Get the underlying Browser instance.
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate the active tab to a URL.
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?.navigate_to(url).map_err(|e| {
            BrowserError::NavigationFailed(format!("failed to navigate to {}: {}", url, e))
        })?;

        Ok(())
    }

    /// Wait for navigation to complete.
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationFailed(format!("navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Click the first element matching a CSS selector.
    pub fn click(&self, selector: &str) -> Result<()> {
        let tab = self.tab()?;
        let element = tab.find_element(selector).map_err(|e| {
            BrowserError::ElementNotFound(format!("element '{}' not found: {}", selector, e))
        })?;
        element
            .click()
            .map_err(|e| BrowserError::ToolExecutionFailed {
                tool: "click".to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }

    /// Type text into the first element matching a CSS selector.
    pub fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        let tab = self.tab()?;
        let element = tab.find_element(selector).map_err(|e| {
            BrowserError::ElementNotFound(format!("element '{}' not found: {}", selector, e))
        })?;
        element
            .type_into(text)
            .map_err(|e| BrowserError::ToolExecutionFailed {
                tool: "input".to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }

    /// Inspect the current page with no time bound.
    pub fn inspect(&self, request: &InspectionRequest) -> Result<InspectionResult> {
        let source = TabDomSource::new(self.tab()?);
        inspect::inspect(&source, request, None)
    }

    /// Inspect the current page, aborting once the budget is exhausted. A
    /// timed-out inspection returns no partial result.
    pub fn inspect_with_timeout(
        &self,
        request: &InspectionRequest,
        timeout: Duration,
    ) -> Result<InspectionResult> {
        let source = TabDomSource::new(self.tab()?);
        inspect::inspect(&source, request, Some(timeout))
    }

    /// Retry an operation with exponential backoff, at whole-operation
    /// granularity. Inspection calls are never retried here; retry is for
    /// navigation and interaction primitives.
    pub fn with_retry<T>(
        &self,
        attempts: u32,
        base_delay: Duration,
        mut operation: impl FnMut(&Self) -> Result<T>,
    ) -> Result<T> {
        let mut delay = base_delay;
        let mut attempt = 1;

        loop {
            match operation(self) {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= attempts => return Err(e),
                Err(e) => {
                    log::warn!(
                        "attempt {}/{} failed ({}), retrying in {:?}",
                        attempt,
                        attempts,
                        e,
                        delay
                    );
                    std::thread::sleep(delay);
                    delay *= 2;
                    attempt += 1;
                }
            }
        }
    }

    /// Get the tool registry.
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Execute a registered tool by name.
    pub fn execute_tool(&self, name: &str, params: serde_json::Value) -> Result<ToolResult> {
        let mut context = ToolContext::new(self);
        self.tool_registry.execute(name, params, &mut context)
    }

    /// Navigate back in browser history.
    pub fn go_back(&self) -> Result<()> {
        self.tab()?
            .evaluate("window.history.back(); true", false)
            .map_err(|e| BrowserError::NavigationFailed(format!("failed to go back: {}", e)))?;

        std::thread::sleep(Duration::from_millis(300));
        Ok(())
    }

    /// Navigate forward in browser history.
    pub fn go_forward(&self) -> Result<()> {
        self.tab()?
            .evaluate("window.history.forward(); true", false)
            .map_err(|e| BrowserError::NavigationFailed(format!("failed to go forward: {}", e)))?;

        std::thread::sleep(Duration::from_millis(300));
        Ok(())
    }

    /// Close all tabs, effectively shutting the browser down. The process
    /// itself exits when the Browser instance is dropped.
    pub fn close(&self) -> Result<()> {
        let tabs = self.get_tabs()?;
        for tab in tabs {
            let _ = tab.close(false);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests (require Chrome to be installed)
    #[test]
    #[ignore] // run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_navigate() {
        let session =
            BrowserSession::launch(LaunchOptions::new().headless(true)).expect("launch failed");

        let result = session.navigate("about:blank");
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_get_active_tab() {
        let session =
            BrowserSession::launch(LaunchOptions::new().headless(true)).expect("launch failed");

        assert!(session.get_active_tab().is_ok());
    }

    #[test]
    #[ignore]
    fn test_retry_recovers_after_navigation() {
        let session =
            BrowserSession::launch(LaunchOptions::new().headless(true)).expect("launch failed");

        let result = session.with_retry(3, Duration::from_millis(100), |s| {
            s.navigate("about:blank")
        });
        assert!(result.is_ok());
    }
}
