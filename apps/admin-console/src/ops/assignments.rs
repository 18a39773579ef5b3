//! 子类别成员全量替换。

use crate::ops::{OpError, require_structure_access};
use crate::state::AppState;
use console_backend::{AuditEntry, CategoryRecord, record_best_effort};
use console_catalog::{AssignmentEditor, unit_is_eligible};
use console_telemetry::{record_write_failure, record_write_success};
use domain::{Unit, ViewerContext};
use std::collections::HashMap;

/// 提交子类别成员草稿。
///
/// 提交前按候选规则复核草稿里的每个成员：不属于该类别候选
/// 集合的单元直接拒绝，不发往协作方。Ok(false) 表示已有提交
/// 在途、本次被忽略。
pub async fn replace_assignment(
    state: &AppState,
    ctx: &ViewerContext,
    industry_id: &str,
    category: &CategoryRecord,
    all_units: &[Unit],
    editor: &mut AssignmentEditor,
) -> Result<bool, OpError> {
    require_structure_access(ctx)?;

    let by_id: HashMap<&str, &Unit> = all_units
        .iter()
        .map(|unit| (unit.unit_id.as_str(), unit))
        .collect();
    for unit_id in editor.unit_ids() {
        let unit = by_id
            .get(unit_id.as_str())
            .ok_or_else(|| OpError::Validation(format!("unknown unit: {unit_id}")))?;
        if !unit_is_eligible(category.standard_category, unit) {
            return Err(OpError::Validation(format!(
                "unit {} not eligible for category {}",
                unit_id,
                category.standard_category.wire_id()
            )));
        }
    }

    let payload = serde_json::json!({
        "industryId": industry_id,
        "categoryId": category.category_id,
        "unitIds": editor.unit_ids().iter().cloned().collect::<Vec<_>>(),
    });
    match editor
        .commit(ctx, industry_id, state.assignment_api.as_ref())
        .await
    {
        Ok(true) => {
            record_write_success();
            record_best_effort(
                state.audit.as_ref(),
                AuditEntry::new(&ctx.username, "subCategory.replaceUnits", payload),
            )
            .await;
            Ok(true)
        }
        Ok(false) => Ok(false),
        Err(err) => {
            record_write_failure();
            Err(err.into())
        }
    }
}
