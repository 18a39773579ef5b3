//! 单元元数据写接口的内存实现。

use super::{InMemoryBackend, ensure_viewer, lock_failed};
use crate::error::BackendError;
use crate::models::{ImageAttachment, UnitMetaRecord};
use crate::traits::UnitMetaApi;
use domain::ViewerContext;

#[async_trait::async_trait]
impl UnitMetaApi for InMemoryBackend {
    /// 创建或更新元数据记录；附带图片时仅保留文件名。
    async fn upsert_unit_meta(
        &self,
        ctx: &ViewerContext,
        record: UnitMetaRecord,
        image: Option<ImageAttachment>,
    ) -> Result<UnitMetaRecord, BackendError> {
        ensure_viewer(ctx)?;
        let mut stored = record;
        if let Some(image) = image {
            stored.image_filename = Some(image.filename);
        }
        let mut unit_meta = self.unit_meta.write().map_err(|_| lock_failed())?;
        unit_meta.insert(stored.unit_id.clone(), stored.clone());
        Ok(stored)
    }
}
