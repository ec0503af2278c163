//! 缓存数据模型
use serde::{Deserialize, Serialize};

/// 有序集合成员及其分数
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScoredMember<T> {
    pub value: T,
    pub score: f64,
}
