//! 权限求值
//!
//! 对查看者权限集合的纯函数求值：
//! - tier_of：权限 token 集合 → 访问档位
//! - can_mutate_industry_structure：结构性变更（行业/类别/批量建单元/用户权限）
//! - can_edit_unit_meta：单元元数据记录编辑
//! - can_view_only：仅查看
//!
//! 设计原则：
//! - 无副作用、不缓存，权限集合变更后重新调用即可
//! - 未登录（空集合）一律返回 None 档，绝不 panic
//! - 所有变更入口在调用存储前重新判定一次（纵深防御），
//!   不依赖界面层是否已隐藏/禁用控件

/// 超级用户权限 token。
pub const SUPER_USER: &str = "SUPER_USER";
/// 管理员权限 token。
pub const ADMIN: &str = "ADMIN";
/// 普通用户权限 token。
pub const USER: &str = "USER";

/// 访问档位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTier {
    /// 完全访问：SUPER_USER 或 ADMIN。
    FullAccess,
    /// 受限访问：USER 且非完全访问。
    Limited,
    /// 无访问：其余情况（含未登录、空权限集合）。
    None,
}

impl AccessTier {
    /// 是否允许结构性变更。
    pub fn can_mutate_industry_structure(self) -> bool {
        matches!(self, AccessTier::FullAccess)
    }

    /// 是否允许编辑单元元数据记录。
    pub fn can_edit_unit_meta(self) -> bool {
        matches!(self, AccessTier::FullAccess | AccessTier::Limited)
    }

    /// 是否仅查看。
    pub fn can_view_only(self) -> bool {
        matches!(self, AccessTier::Limited)
    }
}

/// 权限集合 → 访问档位。
pub fn tier_of(permissions: &[String]) -> AccessTier {
    let has = |token: &str| permissions.iter().any(|item| item == token);
    if has(SUPER_USER) || has(ADMIN) {
        AccessTier::FullAccess
    } else if has(USER) {
        AccessTier::Limited
    } else {
        AccessTier::None
    }
}

/// 结构性变更判定（行业/类别创建编辑、批量建单元、用户权限）。
pub fn can_mutate_industry_structure(permissions: &[String]) -> bool {
    tier_of(permissions).can_mutate_industry_structure()
}

/// 单元元数据记录编辑判定。
pub fn can_edit_unit_meta(permissions: &[String]) -> bool {
    tier_of(permissions).can_edit_unit_meta()
}

/// 仅查看判定。
pub fn can_view_only(permissions: &[String]) -> bool {
    tier_of(permissions).can_view_only()
}
