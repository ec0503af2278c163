use std::env;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub indexer_endpoint: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key))
    }

    /// 从任意键值来源读取配置，缺少必需项时返回错误，可选项使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        Ok(Config {
            redis_url: lookup("REDIS_URL")?,
            indexer_endpoint: lookup("INDEXER_ENDPOINT")?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: lookup("SERVER_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
            api_base_uri: normalize_base_uri(
                &lookup("API_BASE_URI").unwrap_or_else(|_| "/api".into()),
            ),
        })
    }
}

/// 路由前缀统一为 `/xxx` 形式，空值或 `/` 表示不加前缀
fn normalize_base_uri(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
