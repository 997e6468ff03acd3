//! Browser-inspect MCP Server
//!
//! Exposes browser automation and page inspection tools over the Model
//! Context Protocol, for AI assistants and other MCP clients.

use browser_inspect::browser::LaunchOptions;
use browser_inspect::mcp::BrowserServer;
use clap::{Parser, ValueEnum};
use rmcp::{transport::stdio, ServiceExt};

use rmcp::transport::{
    sse_server::{SseServer, SseServerConfig},
    streamable_http_server::{session::local::LocalSessionManager, StreamableHttpService},
};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// Server-Sent Events transport
    Sse,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "browser-inspect")]
#[command(version)]
#[command(about = "Browser automation MCP server", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<String>,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for SSE or HTTP transport (default: 3000)
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// SSE endpoint path (default: /sse)
    #[arg(long, default_value = "/sse")]
    sse_path: String,

    /// SSE POST path for messages (default: /message)
    #[arg(long, default_value = "/message")]
    sse_post_path: String,

    /// HTTP streamable endpoint path (default: /mcp)
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = LaunchOptions {
        headless: !cli.headed,
        ..Default::default()
    };
    if let Some(ref path) = cli.executable_path {
        options.chrome_path = Some(path.into());
    }
    if let Some(ref dir) = cli.user_data_dir {
        options.user_data_dir = Some(dir.into());
    }

    eprintln!("browser-inspect MCP server v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "Browser mode: {}",
        if options.headless { "headless" } else { "headed" }
    );

    match cli.transport {
        Transport::Stdio => {
            eprintln!("Transport: stdio");
            let service = BrowserServer::with_options(options)
                .map_err(|e| anyhow::anyhow!("failed to create browser server: {}", e))?;
            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            eprintln!("Server quit: {:?}", quit_reason);
            // Small delay so browser teardown can finish
            tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
        }
        Transport::Sse => {
            let bind_addr = format!("127.0.0.1:{}", cli.port);
            eprintln!("Transport: SSE at http://{}{}", bind_addr, cli.sse_path);

            let config = SseServerConfig {
                bind: bind_addr.parse()?,
                sse_path: cli.sse_path.clone(),
                post_path: cli.sse_post_path.clone(),
                ct: CancellationToken::new(),
                sse_keep_alive: None,
            };

            let (sse_server, router) = SseServer::new(config);

            let _cancellation_token = sse_server.with_service(move || {
                BrowserServer::with_options(options.clone())
                    .expect("failed to create browser server")
            });

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, router.into_make_service()).await?;
        }
        Transport::Http => {
            let bind_addr = format!("127.0.0.1:{}", cli.port);
            eprintln!("Transport: HTTP at http://{}{}", bind_addr, cli.http_path);

            let service_factory = move || {
                BrowserServer::with_options(options.clone())
                    .map_err(|e| std::io::Error::other(e.to_string()))
            };

            let http_service = StreamableHttpService::new(
                service_factory,
                LocalSessionManager::default().into(),
                Default::default(),
            );

            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
