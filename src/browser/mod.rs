//! Browser session management: launching or connecting to Chrome/Chromium
//! and the high-level navigation/interaction primitives tools build on.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
