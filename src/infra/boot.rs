use std::net::SocketAddr;

use crate::infra::config::{Config, Mode};
use crate::infra::mcp::RaindropSvc;

pub async fn run_server(cfg: Config) -> anyhow::Result<()> {
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        api_base = %cfg.raindrop.base_url,
        token_set = cfg.raindrop.token.is_some(),
        "BOOT raindrop-mcp"
    );
    for w in &cfg.warnings {
        tracing::warn!(warning = %w, "configuration");
    }
    if cfg.raindrop.token.is_none() {
        tracing::warn!("RAINDROP_TOKEN is not set; tool calls will fail until it is configured");
    }

    let svc = RaindropSvc::from_config(&cfg.raindrop)?;

    match cfg.mode {
        Mode::Stdio => {
            tracing::info!("Raindrop MCP Server running on stdio");
            crate::infra::runtime::mcp_transport::serve_stdio(svc)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        Mode::Server => {
            let app = crate::infra::http_app::build_app(svc);
            let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "Raindrop MCP Server listening on /mcp");
            axum::serve(listener, app).await?;
        }
    }
    Ok(())
}
