//! MCP server initialization for stdio and Streamable HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_http`] entry points that build the
//! [`CentralService`] (food store, tool catalog, completion client) and wire it
//! into a running server.

use crate::tools::ReapTools;
use anyhow::{Context, Result};
use reap::central::CentralService;
use reap::config::ReapConfig;
use rmcp::ServiceExt;
use std::sync::Arc;

/// Shared setup: open the store, derive the tool catalog, build the client.
fn setup_shared_state(config: &ReapConfig) -> Result<Arc<CentralService>> {
    if config.completion.api_key.is_empty() {
        tracing::warn!("no completion api key configured, set REAP_AI_TOKEN or OPENAI_API_KEY");
    }

    let central =
        CentralService::from_config(config).context("failed to initialize reap service")?;
    tracing::info!(
        model = %config.completion.model,
        backend = %config.storage.backend,
        "reap service ready"
    );
    Ok(Arc::new(central))
}

/// Start the server on the transport named in config.
pub async fn serve(config: ReapConfig) -> Result<()> {
    match config.server.transport.as_str() {
        "stdio" => serve_stdio(config).await,
        "http" => serve_http(config).await,
        other => anyhow::bail!("unknown transport: {other}. Supported: stdio, http"),
    }
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: ReapConfig) -> Result<()> {
    tracing::info!("starting Reap MCP server on stdio");

    let central = setup_shared_state(&config)?;

    let tools = ReapTools::new(central);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP transport.
pub async fn serve_http(config: ReapConfig) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let bind_addr = format!("{host}:{port}");

    tracing::info!(addr = %bind_addr, "starting Reap MCP server on HTTP");

    let central = setup_shared_state(&config)?;

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(ReapTools::new(central.clone())),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
