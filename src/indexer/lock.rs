use std::time::Duration;

use chrono::Utc;

use crate::cache::{Cache, CacheResult};

/// 刷新锁的有效期，过期后自动释放
pub const REFRESH_LOCK_TTL: Duration = Duration::from_secs(10);

/// 基于缓存的分布式刷新锁
///
/// 锁不会续期也没有显式释放，值只是获取时间。任务运行超过 TTL 后，
/// 新的请求可以再次获得锁。
#[derive(Clone)]
pub struct RefreshLock {
    cache: Cache,
}

impl RefreshLock {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// 尝试获取锁，键已存在时返回 `false`
    ///
    /// 先读后写，并非原子的 check-and-set：两个调用方同时看到键不存在时都会获得锁。
    pub async fn try_acquire(&self, key: &str) -> CacheResult<bool> {
        match self.cache.get_raw(key).await {
            Ok(_) => Ok(false),
            Err(err) if err.is_not_found() => {
                self.cache
                    .set_raw(key, &Utc::now().to_rfc3339(), REFRESH_LOCK_TTL)
                    .await?;
                Ok(true)
            }
            Err(err) => Err(err),
        }
    }
}
