// 缓存模块
// 包含缓存客户端、存储后端和缓存键

mod client;
pub mod error;
pub mod keys;
pub mod models;
pub mod store;

// 重新导出常用类型，方便其他模块使用
pub use client::Cache;
pub use error::{CacheError, CacheResult};
pub use models::ScoredMember;
pub use store::{CacheStore, RedisStore};
