//! 单元元数据记录的创建与更新。

use crate::ops::{OpError, normalize_required, require_meta_access};
use crate::state::AppState;
use console_backend::{AuditEntry, ImageAttachment, UnitMetaApi, UnitMetaRecord, record_best_effort};
use console_telemetry::{record_write_failure, record_write_success};
use domain::ViewerContext;

/// 创建或更新单元元数据记录，图片可选。
///
/// 审计负载不携带图片字节，只记录文件名。
pub async fn upsert_unit_meta(
    state: &AppState,
    ctx: &ViewerContext,
    mut record: UnitMetaRecord,
    image: Option<ImageAttachment>,
) -> Result<UnitMetaRecord, OpError> {
    require_meta_access(ctx)?;
    record.unit_id = normalize_required(&record.unit_id, "unitId")?;
    if let Some(attachment) = &image {
        if !attachment.content_type.starts_with("image/") {
            return Err(OpError::Validation(format!(
                "unsupported attachment type: {}",
                attachment.content_type
            )));
        }
        if attachment.bytes.is_empty() {
            return Err(OpError::Validation("empty image attachment".to_string()));
        }
    }

    let payload = serde_json::json!({
        "unitId": record.unit_id,
        "imageFilename": image.as_ref().map(|attachment| attachment.filename.clone()),
    });
    match state.unit_meta_api.upsert_unit_meta(ctx, record, image).await {
        Ok(stored) => {
            record_write_success();
            record_best_effort(
                state.audit.as_ref(),
                AuditEntry::new(&ctx.username, "unitMeta.upsert", payload),
            )
            .await;
            Ok(stored)
        }
        Err(err) => {
            record_write_failure();
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::{build_state, limited_viewer};
    use domain::ViewerContext;

    fn record() -> UnitMetaRecord {
        UnitMetaRecord {
            unit_id: "unit-1".to_string(),
            make: "Grundfos".to_string(),
            model: "SP-11".to_string(),
            ..UnitMetaRecord::default()
        }
    }

    #[tokio::test]
    async fn limited_tier_may_edit_unit_meta() {
        let (state, audit) = build_state();
        let stored = upsert_unit_meta(&state, &limited_viewer(), record(), None)
            .await
            .expect("upsert");
        assert_eq!(stored.make, "Grundfos");

        let entries = audit.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].endpoint, "unitMeta.upsert");
    }

    #[tokio::test]
    async fn anonymous_viewer_is_rejected() {
        let (state, _audit) = build_state();
        let result = upsert_unit_meta(&state, &ViewerContext::default(), record(), None).await;
        assert!(matches!(result, Err(OpError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn non_image_attachment_is_rejected() {
        let (state, _audit) = build_state();
        let attachment = ImageAttachment {
            filename: "pump.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![1, 2, 3],
        };
        let result =
            upsert_unit_meta(&state, &limited_viewer(), record(), Some(attachment)).await;
        assert!(matches!(result, Err(OpError::Validation(_))));
    }
}
