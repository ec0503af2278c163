//! 平台与网络枚举，以及平台到网络的静态映射表

use std::fmt;

use serde::{Deserialize, Serialize};

/// 未知的平台或网络编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown id: {0}")]
pub struct UnknownId(pub i32);

/// 平台编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum PlatformId {
    Ethereum = 1,
    Solana = 2,
    Flow = 3,
    Arweave = 4,
    Rss = 5,
    Twitter = 6,
    Misskey = 7,
    Jike = 8,
    Github = 9,
}

impl PlatformId {
    pub const ALL: [PlatformId; 9] = [
        PlatformId::Ethereum,
        PlatformId::Solana,
        PlatformId::Flow,
        PlatformId::Arweave,
        PlatformId::Rss,
        PlatformId::Twitter,
        PlatformId::Misskey,
        PlatformId::Jike,
        PlatformId::Github,
    ];

    /// 身份后缀中使用的平台符号
    pub fn symbol(self) -> &'static str {
        match self {
            PlatformId::Ethereum => "ethereum",
            PlatformId::Solana => "solana",
            PlatformId::Flow => "flow",
            PlatformId::Arweave => "arweave",
            PlatformId::Rss => "rss",
            PlatformId::Twitter => "twitter",
            PlatformId::Misskey => "misskey",
            PlatformId::Jike => "jike",
            PlatformId::Github => "github",
        }
    }

    /// 根据平台符号查找平台，大小写不敏感
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.symbol().eq_ignore_ascii_case(symbol))
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<i32> for PlatformId {
    type Error = UnknownId;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_i32() == id)
            .ok_or(UnknownId(id))
    }
}

impl From<PlatformId> for i32 {
    fn from(platform: PlatformId) -> Self {
        platform.as_i32()
    }
}

/// 网络编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum NetworkId {
    Ethereum = 1,
    Polygon = 2,
    BinanceSmartChain = 3,
    Arbitrum = 4,
    Avalanche = 5,
    Fantom = 6,
    Gnosis = 7,
    Solana = 8,
    Flow = 9,
    Arweave = 10,
    Rss = 11,
    Twitter = 12,
    Misskey = 13,
    Jike = 14,
    Github = 15,
    Crossbell = 16,
}

impl NetworkId {
    pub const ALL: [NetworkId; 16] = [
        NetworkId::Ethereum,
        NetworkId::Polygon,
        NetworkId::BinanceSmartChain,
        NetworkId::Arbitrum,
        NetworkId::Avalanche,
        NetworkId::Fantom,
        NetworkId::Gnosis,
        NetworkId::Solana,
        NetworkId::Flow,
        NetworkId::Arweave,
        NetworkId::Rss,
        NetworkId::Twitter,
        NetworkId::Misskey,
        NetworkId::Jike,
        NetworkId::Github,
        NetworkId::Crossbell,
    ];

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for NetworkId {
    type Error = UnknownId;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|network| network.as_i32() == id)
            .ok_or(UnknownId(id))
    }
}

impl From<NetworkId> for i32 {
    fn from(network: NetworkId) -> Self {
        network.as_i32()
    }
}

/// 身份自身所在的原生网络，用作合成账户的来源
pub const NATIVE_NETWORK: NetworkId = NetworkId::Crossbell;

const ETHEREUM_NETWORKS: &[NetworkId] = &[
    NetworkId::Ethereum,
    NetworkId::Polygon,
    NetworkId::BinanceSmartChain,
    NetworkId::Arbitrum,
    NetworkId::Avalanche,
    NetworkId::Fantom,
    NetworkId::Gnosis,
    NetworkId::Crossbell,
];

/// 获取平台适用的网络列表
pub fn networks_for(platform: PlatformId) -> &'static [NetworkId] {
    match platform {
        PlatformId::Ethereum => ETHEREUM_NETWORKS,
        PlatformId::Solana => &[NetworkId::Solana],
        PlatformId::Flow => &[NetworkId::Flow],
        PlatformId::Arweave => &[NetworkId::Arweave],
        PlatformId::Rss => &[NetworkId::Rss],
        PlatformId::Twitter => &[NetworkId::Twitter],
        PlatformId::Misskey => &[NetworkId::Misskey],
        PlatformId::Jike => &[NetworkId::Jike],
        PlatformId::Github => &[NetworkId::Github],
    }
}
