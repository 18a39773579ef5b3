//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 管理租户哨兵值：已认证主体的 industryId 必须等于该值。
    pub admin_industry_id: String,
    /// 会话文件路径（cookie/local store 的本地对应物）。
    pub session_file: String,
    /// 外部协作方服务地址（HTTP 实现使用）。
    pub backend_base_url: String,
    /// 协作方请求超时（秒）。
    pub request_timeout_seconds: u64,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_industry_id =
            env::var("CONSOLE_ADMIN_INDUSTRY_ID").unwrap_or_else(|_| "ADMIN".to_string());
        let session_file = env::var("CONSOLE_SESSION_FILE")
            .unwrap_or_else(|_| ".console-session.json".to_string());
        let backend_base_url = env::var("CONSOLE_BACKEND_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
        let request_timeout_seconds =
            read_u64_with_default("CONSOLE_REQUEST_TIMEOUT_SECONDS", 30)?;

        Ok(Self {
            admin_industry_id,
            session_file,
            backend_base_url,
            request_timeout_seconds,
        })
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}
