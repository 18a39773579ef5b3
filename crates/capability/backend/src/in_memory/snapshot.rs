//! 读接口的内存实现。

use super::{InMemoryBackend, ensure_viewer, lock_failed};
use crate::error::BackendError;
use crate::models::{IndustrySnapshot, TelemetryPoint, TelemetrySelector, UnitMetaRecord, UserAccount};
use crate::traits::SnapshotApi;
use domain::ViewerContext;

#[async_trait::async_trait]
impl SnapshotApi for InMemoryBackend {
    /// 按行业取完整快照。
    async fn fetch_industry_snapshot(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
    ) -> Result<IndustrySnapshot, BackendError> {
        ensure_viewer(ctx)?;
        let industry = self
            .industries
            .read()
            .map_err(|_| lock_failed())?
            .get(industry_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("industry"))?;
        let units = self
            .units
            .read()
            .map_err(|_| lock_failed())?
            .get(industry_id)
            .cloned()
            .unwrap_or_default();
        let categories = self
            .categories
            .read()
            .map_err(|_| lock_failed())?
            .get(industry_id)
            .cloned()
            .unwrap_or_default();
        Ok(IndustrySnapshot {
            industry,
            units,
            categories,
        })
    }

    /// 按行业取用户列表。
    async fn fetch_users(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
    ) -> Result<Vec<UserAccount>, BackendError> {
        ensure_viewer(ctx)?;
        let users = self
            .users
            .read()
            .map_err(|_| lock_failed())?
            .get(industry_id)
            .cloned()
            .unwrap_or_default();
        Ok(users)
    }

    /// 按单元取元数据记录。
    async fn fetch_unit_meta(
        &self,
        ctx: &ViewerContext,
        unit_id: &str,
    ) -> Result<Option<UnitMetaRecord>, BackendError> {
        ensure_viewer(ctx)?;
        let meta = self
            .unit_meta
            .read()
            .map_err(|_| lock_failed())?
            .get(unit_id)
            .cloned();
        Ok(meta)
    }

    /// 取最新遥测快照。
    async fn fetch_latest_telemetry(
        &self,
        ctx: &ViewerContext,
        selector: TelemetrySelector,
    ) -> Result<Vec<TelemetryPoint>, BackendError> {
        ensure_viewer(ctx)?;
        let telemetry = self.telemetry.read().map_err(|_| lock_failed())?;
        let points = match selector {
            TelemetrySelector::One(unit_id) => {
                telemetry.get(&unit_id).cloned().into_iter().collect()
            }
            TelemetrySelector::All => telemetry.values().cloned().collect(),
        };
        Ok(points)
    }
}
