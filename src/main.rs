//! Pizzeria 服务入口
//!
//! 加载配置、初始化日志、绑定端口后用实际地址构建回环调用，再启动 axum 服务；Ctrl-C 优雅退出。

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use pizzeria::{
    agent::{create_agent_components, ChatService},
    config::load_config,
    menu::MenuStore,
    observability, server,
};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    // 可选：第一个参数为额外的配置文件
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = load_config(config_path).context("Failed to load config")?;

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local = listener.local_addr().context("Failed to read bound address")?;
    let bound_base_url = format!("http://{}", local);

    let components = Arc::new(create_agent_components(&cfg, &bound_base_url));
    tracing::info!(
        app = %cfg.app.name,
        model = components.planner.model_name(),
        routes = components.catalog.routes().len(),
        schemas = components.catalog.schemas().len(),
        max_steps = components.max_steps,
        "agent components ready"
    );

    let shutdown = CancellationToken::new();
    let chat = ChatService::new(components, &cfg.server).with_cancel_token(shutdown.clone());
    let app = server::router(chat, Arc::new(MenuStore::seeded()));

    tracing::info!("Pizzeria listening on {}", bound_base_url);

    let signal = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => tracing::info!("Ctrl-C received, shutting down"),
                _ = signal.cancelled() => {}
            }
            signal.cancel();
        })
        .await
        .context("Server error")?;

    Ok(())
}
