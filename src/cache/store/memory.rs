use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::CacheStore;
use crate::cache::error::{CacheError, CacheResult};

/// 内存存储后端，仅用于测试
///
/// 过期时间基于 `tokio::time::Instant`，因此可以配合暂停的测试时钟使用。
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, (String, Option<Instant>)>>,
    sorted_sets: Mutex<HashMap<String, HashMap<String, f64>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn live_value(&self, key: &str) -> Option<String> {
        let mut values = self.values.lock().unwrap();
        match values.get(key) {
            Some((_, Some(expires_at))) if *expires_at <= Instant::now() => {
                values.remove(key);
                None
            }
            Some((value, _)) => Some(value.clone()),
            None => None,
        }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.live_value(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let expires_at = (!ttl.is_zero()).then(|| Instant::now() + ttl);
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        Ok(self.live_value(key).is_some())
    }

    async fn zadd(&self, set: &str, member: &str, score: f64) -> CacheResult<()> {
        self.sorted_sets
            .lock()
            .unwrap()
            .entry(set.to_string())
            .or_default()
            .insert(member.to_string(), score);
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
        let sorted_sets = self.sorted_sets.lock().unwrap();
        let Some(members) = sorted_sets.get(set) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<(String, f64)> = members
            .iter()
            .filter(|(_, score)| **score >= min && **score <= max)
            .map(|(member, score)| (member.clone(), *score))
            .collect();

        // 与 Redis 一致：分数降序，同分按成员字典序降序
        matched.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

        Ok(matched.into_iter().skip(offset).take(count).collect())
    }
}

/// 始终返回连接错误的存储后端，仅用于测试
pub struct UnreachableStore;

fn unreachable_error() -> CacheError {
    CacheError::Transport(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "connection refused",
    )))
}

#[async_trait]
impl CacheStore for UnreachableStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(unreachable_error())
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Err(unreachable_error())
    }

    async fn exists(&self, _key: &str) -> CacheResult<bool> {
        Err(unreachable_error())
    }

    async fn zadd(&self, _set: &str, _member: &str, _score: f64) -> CacheResult<()> {
        Err(unreachable_error())
    }

    async fn zrevrange_by_score(
        &self,
        _set: &str,
        _min: f64,
        _max: f64,
        _offset: usize,
        _count: usize,
    ) -> CacheResult<Vec<(String, f64)>> {
        Err(unreachable_error())
    }
}
