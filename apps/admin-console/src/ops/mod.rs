//! 变更入口。
//!
//! 每个入口在调用协作方之前重新做一次权限判定（纵深防御，
//! 不依赖界面层是否已隐藏控件）、输入校验，成功后记录写入
//! 指标并尽力发送审计条目。

pub mod assignments;
pub mod industries;
pub mod unit_meta;
pub mod units;
pub mod users;

use console_backend::BackendError;
use domain::ViewerContext;

/// 操作层错误。
#[derive(Debug, thiserror::Error)]
pub enum OpError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// 结构性变更（行业/类别/批量建单元/用户权限）的权限复核。
pub(crate) fn require_structure_access(ctx: &ViewerContext) -> Result<(), OpError> {
    if !ctx.tier().can_mutate_industry_structure() {
        return Err(OpError::PermissionDenied(
            "structural change requires full access".to_string(),
        ));
    }
    Ok(())
}

/// 单元元数据编辑的权限复核（受限档也允许）。
pub(crate) fn require_meta_access(ctx: &ViewerContext) -> Result<(), OpError> {
    if !ctx.tier().can_edit_unit_meta() {
        return Err(OpError::PermissionDenied(
            "unit meta editing requires at least limited access".to_string(),
        ));
    }
    Ok(())
}

/// 必填字段：去首尾空格并检查非空。
pub(crate) fn normalize_required(value: &str, field: &str) -> Result<String, OpError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OpError::Validation(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}
