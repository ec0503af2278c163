use thiserror::Error;

pub type CacheResult<T> = Result<T, CacheError>;

/// 缓存操作错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache key not found: {0}")]
    NotFound(String),

    #[error("failed to encode cache value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode cache value: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("cache transport error: {0}")]
    Transport(#[from] redis::RedisError),
}

impl CacheError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}
