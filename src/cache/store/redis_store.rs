use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use super::CacheStore;
use crate::cache::error::CacheResult;

/// Redis 存储后端
#[derive(Clone)]
pub struct RedisStore {
    redis_client: Arc<RedisClient>,
}

impl RedisStore {
    pub fn new(redis_client: Arc<RedisClient>) -> Self {
        Self { redis_client }
    }

    /// 根据连接地址创建后端，此时不会建立连接
    pub fn open(redis_url: &str) -> CacheResult<Self> {
        let client = RedisClient::open(redis_url)?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// 将分数边界转换为 Redis 接受的字符串
fn score_bound(score: f64) -> String {
    if score == f64::INFINITY {
        "+inf".to_string()
    } else if score == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        score.to_string()
    }
}

/// PSETEX 的毫秒数：不足 1 毫秒的非零 TTL 按 1 毫秒处理，超出范围时取最大值
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis().max(1)).unwrap_or(u64::MAX)
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        if ttl.is_zero() {
            let _: () = conn.set(key, value).await?;
        } else {
            let _: () = conn.pset_ex(key, value, ttl_millis(ttl)).await?;
        }

        Ok(())
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    async fn zadd(&self, set: &str, member: &str, score: f64) -> CacheResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.zadd(set, member, score).await?;
        Ok(())
    }

    async fn zrevrange_by_score(
        &self,
        set: &str,
        min: f64,
        max: f64,
        offset: usize,
        count: usize,
    ) -> CacheResult<Vec<(String, f64)>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        // ZREVRANGEBYSCORE 的参数顺序是 max, min
        let members: Vec<(String, f64)> = redis::cmd("ZREVRANGEBYSCORE")
            .arg(set)
            .arg(score_bound(max))
            .arg(score_bound(min))
            .arg("WITHSCORES")
            .arg("LIMIT")
            .arg(offset)
            .arg(count)
            .query_async(&mut conn)
            .await?;

        Ok(members)
    }
}
