//! 子类别成员写接口的内存实现。

use super::{InMemoryBackend, ensure_viewer, lock_failed};
use crate::error::BackendError;
use crate::traits::AssignmentApi;
use domain::ViewerContext;

#[async_trait::async_trait]
impl AssignmentApi for InMemoryBackend {
    /// 全量替换子类别成员集合。
    async fn replace_assignment(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
        category_id: &str,
        sub_category_id: &str,
        unit_ids: Vec<String>,
    ) -> Result<(), BackendError> {
        ensure_viewer(ctx)?;
        let mut categories = self.categories.write().map_err(|_| lock_failed())?;
        let list = categories
            .get_mut(industry_id)
            .ok_or_else(|| BackendError::not_found("industry"))?;
        let category = list
            .iter_mut()
            .find(|item| item.category_id == category_id)
            .ok_or_else(|| BackendError::not_found("category"))?;
        let sub_category = category
            .sub_categories
            .iter_mut()
            .find(|item| item.sub_category_id == sub_category_id)
            .ok_or_else(|| BackendError::not_found("sub-category"))?;
        sub_category.unit_ids = unit_ids.into_iter().collect();
        Ok(())
    }
}
