mod config;
mod error;
mod guidance;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::AppError;
use server::SymptomGuidanceServer;
use symptom_core::{KnowledgeBase, RetrievalEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting symptom-guidance MCP server");

    let config = Config::from_env()?;
    info!(
        top_k = config.top_k,
        max_limit = config.max_limit,
        tcp = config.tcp_listen_addr.is_some(),
        "configuration loaded"
    );

    // Invalid knowledge base data is a build defect; refuse to start.
    let knowledge_base = KnowledgeBase::builtin().map_err(AppError::from)?;
    info!(
        conditions = %knowledge_base.condition_names().join(", "),
        "knowledge base ready"
    );
    let engine = Arc::new(RetrievalEngine::new(knowledge_base));

    let listen_addr = config.tcp_listen_addr.clone();
    let server = SymptomGuidanceServer::new(engine, config);

    if let Some(addr) = listen_addr {
        let listener = TcpListener::bind(&addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
