//! 缓存键模块
//! 提供各种缓存键生成函数
use sha2::{Digest, Sha256};

/// 刷新锁缓存键前缀
const REFRESH_LOCK_PREFIX: &str = "hub:refresh:";

/// 生成刷新锁缓存键
///
/// 请求字符串先做 SHA-256，保证键长度固定且与请求内容一一对应。
pub fn refresh_lock_key(request: &str) -> String {
    let digest = Sha256::digest(request.as_bytes());
    format!("{}{:x}", REFRESH_LOCK_PREFIX, digest)
}
