use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};

use crate::cache::error::{CacheError, CacheResult};
use crate::cache::models::ScoredMember;
use crate::cache::store::{CacheStore, RedisStore};

/// 类型化缓存客户端
///
/// 值以 JSON 形式存储；`*_raw` 方法直接读写字符串。除连接外不持有任何本地状态，
/// 所有数据都保存在远端存储中。
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
}

impl Cache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// 使用 Redis 作为后端创建缓存客户端
    pub fn connect(redis_url: &str) -> CacheResult<Self> {
        Ok(Self::new(Arc::new(RedisStore::open(redis_url)?)))
    }

    /// 读取原始字符串，键不存在时返回 `NotFound`
    pub async fn get_raw(&self, key: &str) -> CacheResult<String> {
        self.store
            .get(key)
            .await?
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    /// 写入原始字符串，`ttl` 为零表示永不过期
    pub async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.store.set(key, value, ttl).await
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        let json = self.get_raw(key).await?;
        serde_json::from_str(&json).map_err(CacheError::Decode)
    }

    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> CacheResult<()> {
        let json = serde_json::to_string(value).map_err(CacheError::Encode)?;
        self.set_raw(key, &json, ttl).await
    }

    pub async fn exists(&self, key: &str) -> CacheResult<bool> {
        self.store.exists(key).await
    }

    /// 添加有序集合成员
    ///
    /// 成员以序列化后的 JSON 标识，相同的值重复添加只会更新分数。
    pub async fn zadd<T: Serialize + ?Sized>(
        &self,
        set: &str,
        value: &T,
        score: f64,
    ) -> CacheResult<()> {
        let member = serde_json::to_string(value).map_err(CacheError::Encode)?;
        self.store.zadd(set, &member, score).await
    }

    /// 按分数降序获取 `[min, max]` 内的成员，跳过前 `offset` 个，最多返回 `count` 个
    pub async fn zrevrange<T: DeserializeOwned>(
        &self,
        set: &str,
        min: f64,
        max: f64,
        offset: usize,
        count: usize,
    ) -> CacheResult<Vec<T>> {
        let members = self
            .zrevrange_with_score(set, min, max, offset, count)
            .await?;
        Ok(members.into_iter().map(|member| member.value).collect())
    }

    /// 与 [`Cache::zrevrange`] 相同，同时返回每个成员的分数
    pub async fn zrevrange_with_score<T: DeserializeOwned>(
        &self,
        set: &str,
        min: f64,
        max: f64,
        offset: usize,
        count: usize,
    ) -> CacheResult<Vec<ScoredMember<T>>> {
        let raw = self
            .store
            .zrevrange_by_score(set, min, max, offset, count)
            .await?;

        raw.into_iter()
            .map(|(member, score)| -> CacheResult<ScoredMember<T>> {
                let value = serde_json::from_str(&member).map_err(CacheError::Decode)?;
                Ok(ScoredMember { value, score })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::MemoryStore;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Object {
        name: String,
        score: i64,
    }

    fn object(name: &str, score: i64) -> Object {
        Object {
            name: name.to_string(),
            score,
        }
    }

    fn memory_cache() -> Cache {
        Cache::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn get_returns_what_was_set() {
        let cache = memory_cache();
        let value = object("TestGetSet", 7);

        cache.set("TestGetSet", &value, Duration::ZERO).await.unwrap();

        let fetched: Object = cache.get("TestGetSet").await.unwrap();
        assert_eq!(fetched, value);
    }

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let cache = memory_cache();

        let err = cache.get::<Object>("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn get_with_wrong_shape_is_decode_error() {
        let cache = memory_cache();
        cache
            .set_raw("not-json", "plain text", Duration::ZERO)
            .await
            .unwrap();

        let err = cache.get::<Object>("not-json").await.unwrap_err();
        assert!(matches!(err, CacheError::Decode(_)));
    }

    // serde_json 只接受字符串作为 map 的键
    fn unencodable() -> HashMap<(i32, i32), i32> {
        HashMap::from([((1, 2), 3)])
    }

    #[tokio::test]
    async fn set_unencodable_value_is_encode_error() {
        let cache = memory_cache();

        let err = cache
            .set("tuple-keys", &unencodable(), Duration::ZERO)
            .await
            .unwrap_err();

        assert!(matches!(err, CacheError::Encode(_)));
        assert!(!cache.exists("tuple-keys").await.unwrap());
    }

    #[tokio::test]
    async fn zadd_unencodable_value_is_encode_error() {
        let cache = memory_cache();

        let err = cache.zadd("board", &unencodable(), 1.0).await.unwrap_err();
        assert!(matches!(err, CacheError::Encode(_)));

        let members: Vec<Object> = cache
            .zrevrange("board", f64::NEG_INFINITY, f64::INFINITY, 0, 10)
            .await
            .unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn exists_until_ttl_elapses() {
        let cache = memory_cache();
        assert!(!cache.exists("session").await.unwrap());

        cache
            .set("session", &object("s", 1), Duration::from_secs(10))
            .await
            .unwrap();
        assert!(cache.exists("session").await.unwrap());

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(cache.exists("session").await.unwrap());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!cache.exists("session").await.unwrap());
        assert!(cache.get_raw("session").await.unwrap_err().is_not_found());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ttl_never_expires() {
        let cache = memory_cache();
        cache.set_raw("forever", "1", Duration::ZERO).await.unwrap();

        tokio::time::advance(Duration::from_secs(86_400)).await;
        assert_eq!(cache.get_raw("forever").await.unwrap(), "1");
    }

    async fn seed_ranked_set(cache: &Cache, set: &str) {
        for n in 0..3 {
            cache
                .zadd(set, &object(&format!("{set}{n}"), n), n as f64)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn zrevrange_orders_by_descending_score() {
        let cache = memory_cache();
        seed_ranked_set(&cache, "TestZAdd").await;

        let members: Vec<Object> = cache.zrevrange("TestZAdd", 0.0, 2.0, 0, 3).await.unwrap();
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["TestZAdd2", "TestZAdd1", "TestZAdd0"]);
    }

    #[tokio::test]
    async fn zrevrange_respects_bounds_and_count() {
        let cache = memory_cache();
        seed_ranked_set(&cache, "TestZAdd").await;

        let members: Vec<Object> = cache.zrevrange("TestZAdd", 0.0, 1.0, 0, 1).await.unwrap();
        assert_eq!(members, vec![object("TestZAdd1", 1)]);
    }

    #[tokio::test]
    async fn zrevrange_skips_offset_highest_matches() {
        let cache = memory_cache();
        seed_ranked_set(&cache, "TestZAdd").await;

        let members: Vec<Object> = cache.zrevrange("TestZAdd", 0.0, 2.0, 1, 2).await.unwrap();
        assert_eq!(members, vec![object("TestZAdd1", 1), object("TestZAdd0", 0)]);
    }

    #[tokio::test]
    async fn zrevrange_with_score_returns_scores() {
        let cache = memory_cache();
        seed_ranked_set(&cache, "TestZAdd").await;

        let members: Vec<ScoredMember<Object>> = cache
            .zrevrange_with_score("TestZAdd", 1.0, 2.0, 0, 2)
            .await
            .unwrap();

        assert_eq!(
            members,
            vec![
                ScoredMember {
                    value: object("TestZAdd2", 2),
                    score: 2.0
                },
                ScoredMember {
                    value: object("TestZAdd1", 1),
                    score: 1.0
                },
            ]
        );
    }

    #[tokio::test]
    async fn zadd_same_value_updates_score() {
        let cache = memory_cache();
        let value = object("leader", 0);

        cache.zadd("board", &value, 1.0).await.unwrap();
        cache.zadd("board", &value, 5.0).await.unwrap();

        let members: Vec<ScoredMember<Object>> = cache
            .zrevrange_with_score("board", f64::NEG_INFINITY, f64::INFINITY, 0, 10)
            .await
            .unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].score, 5.0);
    }
}
