//! 行业写接口的内存实现。

use super::{InMemoryBackend, ensure_viewer, lock_failed};
use crate::error::BackendError;
use crate::models::IndustryRecord;
use crate::traits::IndustryApi;
use domain::ViewerContext;

#[async_trait::async_trait]
impl IndustryApi for InMemoryBackend {
    /// 创建行业。
    async fn create_industry(
        &self,
        ctx: &ViewerContext,
        record: IndustryRecord,
    ) -> Result<IndustryRecord, BackendError> {
        ensure_viewer(ctx)?;
        let mut industries = self.industries.write().map_err(|_| lock_failed())?;
        if industries.contains_key(&record.industry_id) {
            return Err(BackendError::Rejected {
                status: 409,
                message: Some("industry exists".to_string()),
            });
        }
        industries.insert(record.industry_id.clone(), record.clone());
        Ok(record)
    }

    /// 更新行业名称。
    async fn update_industry(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
        industry_name: String,
    ) -> Result<IndustryRecord, BackendError> {
        ensure_viewer(ctx)?;
        let mut industries = self.industries.write().map_err(|_| lock_failed())?;
        let record = industries
            .get_mut(industry_id)
            .ok_or_else(|| BackendError::not_found("industry"))?;
        record.industry_name = industry_name;
        Ok(record.clone())
    }
}
