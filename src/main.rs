use std::net::{IpAddr, SocketAddr};

use hub_refresh::{
    AppState,
    cache::Cache,
    config::Config,
    indexer::{IndexerClient, Refresher},
    router::create_router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // 设置 Redis 缓存
    let cache = Cache::connect(&config.redis_url).expect("Failed to create Redis client");

    // 设置应用状态
    let state = AppState {
        refresher: Refresher::new(cache, IndexerClient::new(config.indexer_endpoint.clone())),
        config,
    };

    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!(
        indexer = %state.config.indexer_endpoint,
        "Server listening on {}",
        addr
    );

    let app = create_router(state);

    // 启动服务器
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
