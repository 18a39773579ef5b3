//! 单元写接口的内存实现。

use super::{InMemoryBackend, ensure_viewer, lock_failed};
use crate::error::BackendError;
use crate::traits::UnitApi;
use api_contract::BulkUnitCount;
use domain::{StandardCategory, Unit, ViewerContext};
use uuid::Uuid;

#[async_trait::async_trait]
impl UnitApi for InMemoryBackend {
    /// 批量创建单元（按类别计数）。
    async fn create_units_bulk(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
        counts: Vec<BulkUnitCount>,
    ) -> Result<Vec<Unit>, BackendError> {
        ensure_viewer(ctx)?;
        if !self
            .industries
            .read()
            .map_err(|_| lock_failed())?
            .contains_key(industry_id)
        {
            return Err(BackendError::not_found("industry"));
        }
        let mut created = Vec::new();
        for request in counts {
            let category = StandardCategory::from_wire_id(&request.standard_category_id)
                .ok_or_else(|| {
                    BackendError::Validation(format!(
                        "unknown standardCategoryId: {}",
                        request.standard_category_id
                    ))
                })?;
            for index in 0..request.count {
                let mut unit = Unit::new(Uuid::new_v4().to_string(), category);
                unit.unit_name = format!("{}-{}", category.wire_id(), index + 1);
                created.push(unit);
            }
        }
        let mut units = self.units.write().map_err(|_| lock_failed())?;
        units
            .entry(industry_id.to_string())
            .or_default()
            .extend(created.clone());
        Ok(created)
    }

    /// 以完整记录替换既有单元。
    async fn update_unit(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
        unit: &Unit,
    ) -> Result<(), BackendError> {
        ensure_viewer(ctx)?;
        let mut units = self.units.write().map_err(|_| lock_failed())?;
        let list = units
            .get_mut(industry_id)
            .ok_or_else(|| BackendError::not_found("industry"))?;
        let slot = list
            .iter_mut()
            .find(|item| item.unit_id == unit.unit_id)
            .ok_or_else(|| BackendError::not_found("unit"))?;
        *slot = unit.clone();
        Ok(())
    }
}
