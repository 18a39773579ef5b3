//! 单元批量创建与表单提交。

use crate::ops::{OpError, require_structure_access};
use crate::state::AppState;
use api_contract::BulkUnitCount;
use console_backend::{AuditEntry, UnitApi, record_best_effort};
use console_forms::UnitFormController;
use console_telemetry::{record_write_failure, record_write_success};
use domain::{AccessTier, StandardCategory, Unit, ViewerContext};

/// 按类别计数批量创建单元。
pub async fn create_units_bulk(
    state: &AppState,
    ctx: &ViewerContext,
    industry_id: &str,
    counts: Vec<BulkUnitCount>,
) -> Result<Vec<Unit>, OpError> {
    require_structure_access(ctx)?;
    if counts.is_empty() {
        return Err(OpError::Validation("at least one category count required".to_string()));
    }
    for count in &counts {
        if StandardCategory::from_wire_id(&count.standard_category_id).is_none() {
            return Err(OpError::Validation(format!(
                "unknown category: {}",
                count.standard_category_id
            )));
        }
        if count.count == 0 {
            return Err(OpError::Validation(format!(
                "count must be positive for {}",
                count.standard_category_id
            )));
        }
    }

    let payload = serde_json::json!({
        "industryId": industry_id,
        "counts": counts
            .iter()
            .map(|count| serde_json::json!({
                "standardCategoryId": count.standard_category_id,
                "count": count.count,
            }))
            .collect::<Vec<_>>(),
    });
    match state.unit_api.create_units_bulk(ctx, industry_id, counts).await {
        Ok(created) => {
            record_write_success();
            record_best_effort(
                state.audit.as_ref(),
                AuditEntry::new(&ctx.username, "units.bulkCreate", payload),
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

/// 提交单元表单草稿。
///
/// 表单自身已按编辑范围限制字段写入；这里仍复核查看者至少
/// 持有受限档，然后转交表单的守护式提交。Ok(false) 表示本次
/// 被忽略（非编辑态或已有提交在途），不产生审计条目。
pub async fn submit_unit_form(
    state: &AppState,
    ctx: &ViewerContext,
    industry_id: &str,
    form: &mut UnitFormController,
) -> Result<bool, OpError> {
    if ctx.tier() == AccessTier::None {
        return Err(OpError::PermissionDenied(
            "unit editing requires at least limited access".to_string(),
        ));
    }

    let unit_id = form.draft().unit_id.clone();
    match form.submit(ctx, industry_id, state.unit_api.as_ref()).await {
        Ok(true) => {
            record_write_success();
            record_best_effort(
                state.audit.as_ref(),
                AuditEntry::new(
                    &ctx.username,
                    "unit.update",
                    serde_json::json!({
                        "industryId": industry_id,
                        "unitId": unit_id,
                    }),
                ),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::{build_state, full_viewer, limited_viewer};
    use console_backend::SnapshotApi;
    use domain::ViewerContext;
    use domain::schema::UnitField;

    #[tokio::test]
    async fn bulk_create_rejects_unknown_category_and_zero_count() {
        let (state, _audit) = build_state();
        let ctx = full_viewer();

        let unknown = create_units_bulk(
            &state,
            &ctx,
            "industry-1",
            vec![BulkUnitCount {
                standard_category_id: "NOT_A_CATEGORY".to_string(),
                count: 2,
            }],
        )
        .await;
        assert!(matches!(unknown, Err(OpError::Validation(_))));

        let zero = create_units_bulk(
            &state,
            &ctx,
            "industry-1",
            vec![BulkUnitCount {
                standard_category_id: "STOCK_CATEGORY".to_string(),
                count: 0,
            }],
        )
        .await;
        assert!(matches!(zero, Err(OpError::Validation(_))));
    }

    #[tokio::test]
    async fn bulk_create_requires_full_access() {
        let (state, _audit) = build_state();
        let result = create_units_bulk(
            &state,
            &limited_viewer(),
            "industry-1",
            vec![BulkUnitCount {
                standard_category_id: "SOURCE_CATEGORY".to_string(),
                count: 1,
            }],
        )
        .await;
        assert!(matches!(result, Err(OpError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn bulk_create_emits_audit_with_counts() {
        let (state, audit) = build_state();
        let created = create_units_bulk(
            &state,
            &full_viewer(),
            "industry-1",
            vec![BulkUnitCount {
                standard_category_id: "ENERGY_CATEGORY".to_string(),
                count: 2,
            }],
        )
        .await
        .expect("bulk create");
        assert_eq!(created.len(), 2);

        let entries = audit.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].endpoint, "units.bulkCreate");
    }

    #[tokio::test]
    async fn anonymous_viewer_cannot_submit_form() {
        let (state, _audit) = build_state();
        let ctx = ViewerContext::default();
        let unit = Unit::new("u-1", StandardCategory::Source);
        let mut form = UnitFormController::load(unit, &ctx);

        let result = submit_unit_form(&state, &ctx, "industry-1", &mut form).await;
        assert!(matches!(result, Err(OpError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn form_submit_persists_and_audits() {
        let (state, audit) = build_state();
        let ctx = full_viewer();
        let snapshot = state
            .snapshot_api
            .fetch_industry_snapshot(&ctx, "industry-1")
            .await
            .expect("snapshot");
        let unit = snapshot
            .units
            .iter()
            .find(|unit| unit.unit_id == "unit-1")
            .expect("unit-1")
            .clone();

        let mut form = UnitFormController::load(unit, &ctx);
        assert!(form.begin_edit());
        assert!(form.set_field(
            UnitField::UnitName,
            console_forms::FieldInput::Text("Borewell Pump A".to_string()),
        ));

        let submitted = submit_unit_form(&state, &ctx, "industry-1", &mut form)
            .await
            .expect("submit");
        assert!(submitted);

        let entries = audit.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].endpoint, "unit.update");
        assert_eq!(entries[0].payload["unitId"], "unit-1");
    }
}
