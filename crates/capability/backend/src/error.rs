//! 协作方错误分类。
//!
//! 三类失败（见错误处理设计）：
//! - Validation：发出请求前即被拦截的输入错误，不会到达协作方
//! - Rejected：协作方拒绝（非 2xx），尽力携带响应体里的 message
//! - Connection：传输失败（网络不可达），界面按"连接错误"单独提示

/// 协作方调用错误。
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("request rejected (status {status}): {}", message.as_deref().unwrap_or("no detail"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("connection error: {0}")]
    Connection(String),
}

impl BackendError {
    /// 未找到资源（404 拒绝）。
    pub fn not_found(what: &str) -> Self {
        BackendError::Rejected {
            status: 404,
            message: Some(format!("{what} not found")),
        }
    }

    /// 是否为传输层失败。
    pub fn is_connection(&self) -> bool {
        matches!(self, BackendError::Connection(_))
    }
}
