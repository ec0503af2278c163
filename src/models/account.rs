use serde::{Deserialize, Serialize};

use crate::constants::{NATIVE_NETWORK, NetworkId, PlatformId};
use crate::models::Instance;

/// 关联账户，`identity` 与 `profile_id` 始终为小写
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawAccount")]
pub struct Account {
    pub identity: String,
    pub platform: PlatformId,
    #[serde(rename = "profileID")]
    pub profile_id: String,
    pub profile_platform: PlatformId,
    pub source: NetworkId,
}

// 反序列化时经过 Account::new 统一大小写
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAccount {
    identity: String,
    platform: PlatformId,
    #[serde(rename = "profileID")]
    profile_id: String,
    profile_platform: PlatformId,
    source: NetworkId,
}

impl From<RawAccount> for Account {
    fn from(raw: RawAccount) -> Self {
        Account::new(
            &raw.identity,
            raw.platform,
            &raw.profile_id,
            raw.profile_platform,
            raw.source,
        )
    }
}

impl Account {
    pub fn new(
        identity: &str,
        platform: PlatformId,
        profile_id: &str,
        profile_platform: PlatformId,
        source: NetworkId,
    ) -> Self {
        Self {
            identity: identity.to_lowercase(),
            platform,
            profile_id: profile_id.to_lowercase(),
            profile_platform,
            source,
        }
    }

    /// 代表身份自身的账户，来源固定为原生网络
    pub fn own(instance: &Instance) -> Self {
        Self::new(
            instance.identity(),
            instance.platform(),
            instance.identity(),
            instance.platform(),
            NATIVE_NETWORK,
        )
    }
}
