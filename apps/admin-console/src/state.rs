//! 应用状态：协作方接口与审计旁路的动态分发句柄。

use console_backend::{
    AssignmentApi, AuditSink, InMemoryBackend, IndustryApi, SnapshotApi, UnitApi, UnitMetaApi,
    UserApi,
};
use console_config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub snapshot_api: Arc<dyn SnapshotApi>,
    pub industry_api: Arc<dyn IndustryApi>,
    pub unit_api: Arc<dyn UnitApi>,
    pub assignment_api: Arc<dyn AssignmentApi>,
    pub user_api: Arc<dyn UserApi>,
    pub unit_meta_api: Arc<dyn UnitMetaApi>,
    pub audit: Arc<dyn AuditSink>,
    pub admin_industry_id: String,
}

impl AppState {
    /// 以单个协作方实现装配全部接口句柄。
    pub fn new(
        backend: Arc<InMemoryBackend>,
        audit: Arc<dyn AuditSink>,
        config: &AppConfig,
    ) -> Self {
        Self {
            snapshot_api: backend.clone(),
            industry_api: backend.clone(),
            unit_api: backend.clone(),
            assignment_api: backend.clone(),
            user_api: backend.clone(),
            unit_meta_api: backend,
            audit,
            admin_industry_id: config.admin_industry_id.clone(),
        }
    }
}
