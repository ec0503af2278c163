use axum::{Router, routing::post};

use crate::{AppState, middleware::log_errors, routes};

// 刷新相关的路由
pub fn refresh_routes() -> Router<AppState> {
    Router::new().route("/refresh", post(routes::refresh::refresh_items))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let base = state.config.api_base_uri.trim_end_matches('/').to_string();

    // axum 不支持在根路径嵌套
    let router = if base.is_empty() {
        refresh_routes()
    } else {
        Router::new().nest(&base, refresh_routes())
    };

    let router = router.layer(axum::middleware::from_fn(log_errors));

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
