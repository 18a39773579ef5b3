//! 用户权限全量替换。

use crate::ops::{OpError, normalize_required, require_structure_access};
use crate::state::AppState;
use console_backend::{AuditEntry, UserAccount, UserApi, record_best_effort};
use console_telemetry::{record_write_failure, record_write_success};
use domain::ViewerContext;

/// 全量替换用户权限集合（发送完整集合，非差量）。
pub async fn replace_permissions(
    state: &AppState,
    ctx: &ViewerContext,
    user_id: &str,
    permissions: Vec<String>,
) -> Result<UserAccount, OpError> {
    require_structure_access(ctx)?;
    let permissions = permissions
        .iter()
        .map(|token| normalize_required(token, "permission"))
        .collect::<Result<Vec<_>, _>>()?;

    let payload = serde_json::json!({
        "userId": user_id,
        "permissions": permissions,
    });
    match state
        .user_api
        .replace_permissions(ctx, user_id, permissions)
        .await
    {
        Ok(updated) => {
            record_write_success();
            record_best_effort(
                state.audit.as_ref(),
                AuditEntry::new(&ctx.username, "user.replacePermissions", payload),
            )
            .await;
            Ok(updated)
        }
        Err(err) => {
            record_write_failure();
            Err(err.into())
        }
    }
}
