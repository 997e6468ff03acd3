//! # browser-inspect
//!
//! Browser automation via the Chrome DevTools Protocol (CDP) with a
//! bounded, mode-driven page inspection core, exposed as a Model Context
//! Protocol (MCP) server for AI-driven automation.
//!
//! ## Features
//!
//! - **MCP Server**: navigate, click, type, and inspect tools for AI agents
//! - **Page Inspection**: depth- and count-bounded DOM traversal producing
//!   a flat, serializable element list with visibility and position data
//! - **Browser Session Management**: launch or connect to Chrome/Chromium
//!
//! ## MCP Server
//!
//! The recommended way to use this crate is via the MCP server binary:
//!
//! ```bash
//! # Run headless browser
//! cargo run --features mcp-server --bin mcp-server
//!
//! # Run with visible browser (useful for debugging)
//! cargo run --features mcp-server --bin mcp-server -- --headed
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use browser_inspect::{BrowserSession, LaunchOptions};
//! use browser_inspect::inspect::{InspectMode, InspectionRequest};
//!
//! # fn main() -> browser_inspect::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com")?;
//!
//! let request = InspectionRequest {
//!     mode: InspectMode::Clickable,
//!     max_depth: 5,
//!     ..Default::default()
//! };
//! let result = session.inspect(&request)?;
//! println!(
//!     "{} of {} clickable elements captured",
//!     result.elements.len(),
//!     result.total_elements
//! );
//! # Ok(())
//! # }
//! ```
//!
//! The inspection core itself is browser-agnostic: it runs against any
//! [`inspect::DomSource`], which is how the test suite exercises it
//! without Chrome.
//!
//! ## Module Overview
//!
//! - [`browser`]: browser session management and configuration
//! - [`inspect`]: the page inspection core (traversal, descriptors, envelope)
//! - [`tools`]: browser automation tools (navigate, click, input, inspect)
//! - [`error`]: error types and result alias
//! - [`mcp`]: Model Context Protocol server (requires `mcp-handler` feature)

pub mod browser;
pub mod error;
pub mod inspect;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use error::{BrowserError, Result};
pub use inspect::{
    ElementDescriptor, InspectMode, InspectionRequest, InspectionResult, Position, Viewport,
};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::BrowserServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
