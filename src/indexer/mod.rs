//! 索引服务刷新任务
//!
//! 刷新请求先经过 [`RefreshLock`] 去重，获得锁后由 [`Refresher`] 为每个
//! (账户, 网络) 组合并发调用一次索引服务。

mod fetch;
mod lock;
mod refresh;

pub use fetch::{FetchOutcome, IndexerClient, IndexerErrorBody, IndexerResponse};
pub use lock::{REFRESH_LOCK_TTL, RefreshLock};
pub use refresh::{
    RefreshError, RefreshMode, RefreshOutcome, RefreshSummary, Refresher, fetch_plan,
};
