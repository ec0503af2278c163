use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    AppState,
    indexer::RefreshMode,
    models::Instance,
    routes::refresh::model::{RefreshRequest, RefreshResponse},
    utils::{ApiResponse, error_codes, error_to_api_response, success_to_api_response},
};

// 刷新身份关联账户的索引数据
pub async fn refresh_items(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Json<ApiResponse<RefreshResponse>> {
    // 请求体格式错误（包括未知的平台或网络编号）同样走统一响应结构
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("刷新请求体无效: {}", rejection.body_text());
            return error_to_api_response(
                error_codes::VALIDATION_ERROR,
                format!("无效的请求体: {}", rejection.body_text()),
            );
        }
    };

    let instance: Instance = match request.instance.parse() {
        Ok(instance) => instance,
        Err(err) => {
            return error_to_api_response(
                error_codes::VALIDATION_ERROR,
                format!("无效的instance参数: {}", err),
            );
        }
    };

    let mode = RefreshMode::from_latest(request.latest);

    match state
        .refresher
        .refresh(&instance, request.accounts, mode)
        .await
    {
        Ok(outcome) => success_to_api_response(RefreshResponse::from(outcome)),
        Err(err) => {
            tracing::error!("刷新索引数据错误: {:?}", err);
            error_to_api_response(error_codes::INTERNAL_ERROR, "刷新索引数据失败".into())
        }
    }
}
