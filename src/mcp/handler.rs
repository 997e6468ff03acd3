//! rmcp server handler wiring for [`BrowserServer`].

use crate::browser::{BrowserSession, ConnectionOptions, LaunchOptions};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool_handler, ServerHandler};
use std::sync::Arc;

/// MCP server exposing browser automation and page inspection tools over
/// one browser session.
pub struct BrowserServer {
    session: Arc<BrowserSession>,
    tool_router: ToolRouter<BrowserServer>,
}

impl BrowserServer {
    /// Launch a browser with default options and wrap it in a server.
    pub fn new() -> crate::error::Result<Self> {
        Self::with_options(LaunchOptions::default())
    }

    /// Launch a browser with the given options and wrap it in a server.
    pub fn with_options(options: LaunchOptions) -> crate::error::Result<Self> {
        Ok(Self {
            session: Arc::new(BrowserSession::launch(options)?),
            tool_router: Self::tool_router(),
        })
    }

    /// Attach to an already-running browser instead of launching one.
    pub fn connect(options: ConnectionOptions) -> crate::error::Result<Self> {
        Ok(Self {
            session: Arc::new(BrowserSession::connect(options)?),
            tool_router: Self::tool_router(),
        })
    }

    /// The underlying browser session.
    pub fn session(&self) -> Arc<BrowserSession> {
        self.session.clone()
    }
}

#[tool_handler]
impl ServerHandler for BrowserServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Browser automation server. Navigate with browser_navigate, interact with \
                 browser_click and browser_form_input_fill, and analyze page structure with \
                 browser_inspect_page (or the clickable/form finders). Inspection results are \
                 flat, document-ordered element lists; totalElements exceeding the returned \
                 element count means the list was truncated."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
