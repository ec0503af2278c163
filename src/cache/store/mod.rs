//! 缓存存储后端
//!
//! [`CacheStore`] 只处理原始字符串；序列化由 [`crate::cache::Cache`] 负责。

#[cfg(test)]
mod memory;
mod redis_store;

#[cfg(test)]
pub use memory::{MemoryStore, UnreachableStore};
pub use redis_store::RedisStore;

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::error::CacheResult;

/// 缓存存储后端的最小操作集合，每个操作对远端存储独立原子
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 读取字符串值，键不存在时返回 `None`
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// 写入字符串值，`ttl` 为零表示永不过期
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    async fn exists(&self, key: &str) -> CacheResult<bool>;

    /// 向有序集合添加成员，成员已存在时只更新分数
    async fn zadd(&self, set: &str, member: &str, score: f64) -> CacheResult<()>;

    /// 按分数降序返回 `[min, max]` 区间内的成员及分数，跳过前 `offset` 个，最多 `count` 个
    async fn zrevrange_by_score(
        &self,
        set: &str,
        min: f64,
        max: f64,
        offset: usize,
        count: usize,
    ) -> CacheResult<Vec<(String, f64)>>;
}
