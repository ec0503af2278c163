use serde::{Deserialize, Serialize};

use crate::indexer::{RefreshOutcome, RefreshSummary};
use crate::models::Account;

// 刷新请求参数
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub instance: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    // 为 true 时等待所有拉取完成后再返回
    #[serde(default)]
    pub latest: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStatus {
    Completed,
    Scheduled,
    Skipped,
}

// 刷新响应
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub status: RefreshStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RefreshSummary>,
}

impl From<RefreshOutcome> for RefreshResponse {
    fn from(outcome: RefreshOutcome) -> Self {
        match outcome {
            RefreshOutcome::Completed(summary) => Self {
                status: RefreshStatus::Completed,
                summary: Some(summary),
            },
            // 丢弃句柄不会中止后台任务
            RefreshOutcome::Detached(_) => Self {
                status: RefreshStatus::Scheduled,
                summary: None,
            },
            RefreshOutcome::Skipped => Self {
                status: RefreshStatus::Skipped,
                summary: None,
            },
        }
    }
}
