use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::PlatformId;

const SCHEME: &str = "rss3://";
const ACCOUNT_PREFIX: &str = "account:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstanceParseError {
    #[error("instance is missing a platform suffix: {0}")]
    MissingPlatform(String),

    #[error("instance has an empty identity: {0}")]
    EmptyIdentity(String),

    #[error("unknown platform suffix: {0}")]
    UnknownPlatform(String),
}

/// 刷新目标：身份及其平台后缀，例如 `account:0xabc@ethereum`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    identity: String,
    platform: PlatformId,
}

impl Instance {
    pub fn new(identity: &str, platform: PlatformId) -> Self {
        Self {
            identity: identity.to_string(),
            platform,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn platform(&self) -> PlatformId {
        self.platform
    }

    /// 规范化的请求字符串，用于生成刷新锁的键
    pub fn uri(&self) -> String {
        format!(
            "{}{}{}@{}",
            SCHEME,
            ACCOUNT_PREFIX,
            self.identity.to_lowercase(),
            self.platform.symbol()
        )
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}@{}", ACCOUNT_PREFIX, self.identity, self.platform)
    }
}

impl FromStr for Instance {
    type Err = InstanceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let rest = trimmed.strip_prefix(SCHEME).unwrap_or(trimmed);
        let rest = rest.strip_prefix(ACCOUNT_PREFIX).unwrap_or(rest);

        // 身份本身可能包含 '@'，以最后一个为准
        let (identity, suffix) = rest
            .rsplit_once('@')
            .ok_or_else(|| InstanceParseError::MissingPlatform(s.to_string()))?;

        if identity.is_empty() {
            return Err(InstanceParseError::EmptyIdentity(s.to_string()));
        }

        let platform = PlatformId::from_symbol(suffix)
            .ok_or_else(|| InstanceParseError::UnknownPlatform(suffix.to_string()))?;

        Ok(Self::new(identity, platform))
    }
}
