use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::constants::NetworkId;
use crate::models::Account;

/// 索引服务响应中的错误信息，`code` 为 0 表示成功
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexerErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

/// 索引服务响应外层结构，只关心错误信息
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexerResponse {
    #[serde(default)]
    pub error: IndexerErrorBody,
}

/// 单次拉取的结果
///
/// 所有失败都是非致命的：在拉取处记录日志，不会传递给其他任务或汇总结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Delivered,
    TransportFailure(String),
    ApplicationFailure { status: u16, code: i64, msg: String },
}

impl FetchOutcome {
    pub fn is_soft_failure(&self) -> bool {
        !matches!(self, FetchOutcome::Delivered)
    }
}

/// 索引服务客户端
#[derive(Debug, Clone)]
pub struct IndexerClient {
    endpoint: String,
}

impl IndexerClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn item_url(&self) -> String {
        format!("{}/item", self.endpoint)
    }

    /// 单个 (账户, 网络) 组合的查询参数，身份字段统一小写
    pub fn item_query(account: &Account, network_id: NetworkId) -> [(&'static str, String); 6] {
        [
            ("proof", account.identity.to_lowercase()),
            ("platform_id", account.platform.as_i32().to_string()),
            ("network_id", network_id.as_i32().to_string()),
            ("profile_source_id", account.source.as_i32().to_string()),
            ("owner_id", account.profile_id.to_lowercase()),
            ("owner_platform_id", account.profile_platform.as_i32().to_string()),
        ]
    }

    /// 请求索引服务拉取单个账户在单个网络上的数据
    ///
    /// 每次调用都新建 HTTP 客户端，同一刷新任务内的请求不共享连接池。
    pub async fn fetch_item(&self, account: &Account, network_id: NetworkId) -> FetchOutcome {
        let client = reqwest::Client::new();

        let response = match client
            .get(self.item_url())
            .query(&Self::item_query(account, network_id))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    identity = %account.identity,
                    network_id = network_id.as_i32(),
                    error = %e,
                    "Indexer request failed"
                );
                return FetchOutcome::TransportFailure(e.to_string());
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    identity = %account.identity,
                    network_id = network_id.as_i32(),
                    error = %e,
                    "Failed to read indexer response"
                );
                return FetchOutcome::TransportFailure(e.to_string());
            }
        };

        let envelope = serde_json::from_str::<IndexerResponse>(&body);

        let outcome = match (status == StatusCode::OK, envelope) {
            (true, Ok(envelope)) if envelope.error.code == 0 => FetchOutcome::Delivered,
            (_, Ok(envelope)) => FetchOutcome::ApplicationFailure {
                status: status.as_u16(),
                code: envelope.error.code,
                msg: envelope.error.msg,
            },
            (true, Err(e)) => {
                FetchOutcome::TransportFailure(format!("malformed indexer response: {}", e))
            }
            (_, Err(_)) => FetchOutcome::ApplicationFailure {
                status: status.as_u16(),
                code: 0,
                msg: body,
            },
        };

        match &outcome {
            FetchOutcome::Delivered => {
                debug!(
                    identity = %account.identity,
                    network_id = network_id.as_i32(),
                    "Indexer fetch delivered"
                );
            }
            FetchOutcome::ApplicationFailure { status, code, msg } => {
                warn!(
                    identity = %account.identity,
                    network_id = network_id.as_i32(),
                    status,
                    code,
                    msg = %msg,
                    "Indexer returned an error"
                );
            }
            FetchOutcome::TransportFailure(reason) => {
                warn!(
                    identity = %account.identity,
                    network_id = network_id.as_i32(),
                    reason = %reason,
                    "Indexer response could not be decoded"
                );
            }
        }

        outcome
    }
}
