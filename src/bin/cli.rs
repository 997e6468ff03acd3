//! One-shot page inspection from the command line.
//!
//! Launches a browser, navigates to the given URL, runs an inspection and
//! prints the JSON envelope to stdout.

use browser_inspect::inspect::{InspectMode, InspectionRequest};
use browser_inspect::{BrowserSession, LaunchOptions};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    All,
    Clickable,
    Form,
}

impl From<Mode> for InspectMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::All => InspectMode::All,
            Mode::Clickable => InspectMode::Clickable,
            Mode::Form => InspectMode::Form,
        }
    }
}

#[derive(Parser)]
#[command(name = "browser-inspect")]
#[command(version)]
#[command(about = "Inspect the DOM of a web page", long_about = None)]
struct Cli {
    /// URL to inspect
    url: String,

    /// Selector of the subtree root
    #[arg(long, default_value = "body")]
    selector: String,

    /// Eligibility mode
    #[arg(long, value_enum, default_value = "all")]
    mode: Mode,

    /// Maximum number of elements to emit
    #[arg(long, default_value_t = 100)]
    max_elements: usize,

    /// Maximum traversal depth from the root
    #[arg(long, default_value_t = 3)]
    max_depth: usize,

    /// Only emit these tags (repeatable)
    #[arg(long = "type", value_name = "TAG")]
    element_types: Vec<String>,

    /// Launch browser in headed mode
    #[arg(long, short = 'H')]
    headed: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let session = BrowserSession::launch(LaunchOptions::new().headless(!cli.headed))?;
    session.navigate(&cli.url)?;
    session.wait_for_navigation()?;

    let request = InspectionRequest {
        root_selector: cli.selector,
        max_elements: cli.max_elements,
        max_depth: cli.max_depth,
        element_types: if cli.element_types.is_empty() {
            None
        } else {
            Some(cli.element_types)
        },
        attributes: None,
        mode: cli.mode.into(),
    };

    let result = session.inspect(&request)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
