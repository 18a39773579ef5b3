//! 行业创建与改名。

use crate::ops::{OpError, normalize_required, require_structure_access};
use crate::state::AppState;
use console_backend::{AuditEntry, IndustryApi, IndustryRecord, record_best_effort};
use console_telemetry::{record_write_failure, record_write_success};
use domain::ViewerContext;
use uuid::Uuid;

/// 创建行业。
pub async fn create_industry(
    state: &AppState,
    ctx: &ViewerContext,
    industry_name: &str,
) -> Result<IndustryRecord, OpError> {
    require_structure_access(ctx)?;
    let industry_name = normalize_required(industry_name, "industryName")?;

    let record = IndustryRecord {
        industry_id: Uuid::new_v4().to_string(),
        industry_name,
    };
    match state.industry_api.create_industry(ctx, record).await {
        Ok(created) => {
            record_write_success();
            record_best_effort(
                state.audit.as_ref(),
                AuditEntry::new(
                    &ctx.username,
                    "industry.create",
                    serde_json::json!({
                        "industryId": created.industry_id,
                        "industryName": created.industry_name,
                    }),
                ),
            )
            .await;
            Ok(created)
        }
        Err(err) => {
            record_write_failure();
            Err(err.into())
        }
    }
}

/// 更新行业名称。
pub async fn rename_industry(
    state: &AppState,
    ctx: &ViewerContext,
    industry_id: &str,
    industry_name: &str,
) -> Result<IndustryRecord, OpError> {
    require_structure_access(ctx)?;
    let industry_name = normalize_required(industry_name, "industryName")?;

    match state
        .industry_api
        .update_industry(ctx, industry_id, industry_name)
        .await
    {
        Ok(updated) => {
            record_write_success();
            record_best_effort(
                state.audit.as_ref(),
                AuditEntry::new(
                    &ctx.username,
                    "industry.update",
                    serde_json::json!({
                        "industryId": updated.industry_id,
                        "industryName": updated.industry_name,
                    }),
                ),
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
