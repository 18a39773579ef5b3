pub mod category;
pub mod permissions;
pub mod quality;
pub mod schema;
pub mod unit;

pub use category::StandardCategory;
pub use permissions::AccessTier;
pub use quality::{QualityParam, QualitySettings};
pub use unit::{CategoryDetail, IothubConfig, Unit, VirtualMeta};

/// 查看者上下文：所有模块共享的执行上下文。
///
/// 权限档位不缓存，每次通过 [`ViewerContext::tier`] 即时重算。
#[derive(Debug, Clone)]
pub struct ViewerContext {
    pub username: String,
    pub industry_id: String,
    pub permissions: Vec<String>,
}

impl ViewerContext {
    /// 构造显式身份与权限集合的查看者上下文。
    pub fn new(
        username: impl Into<String>,
        industry_id: impl Into<String>,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            username: username.into(),
            industry_id: industry_id.into(),
            permissions,
        }
    }

    /// 基于当前权限集合求访问档位。
    pub fn tier(&self) -> AccessTier {
        permissions::tier_of(&self.permissions)
    }
}

impl Default for ViewerContext {
    /// 空上下文（未登录查看者，所有判定均为 None 档）。
    fn default() -> Self {
        Self {
            username: "".to_string(),
            industry_id: "".to_string(),
            permissions: Vec::new(),
        }
    }
}
