//! 协作方接口 Trait 定义
//!
//! 设计原则：
//! - 所有接口显式接收 ViewerContext（不依赖环境全局的"当前查看者"）
//! - 所有接口返回 BackendError
//! - 使用 async_trait 支持动态分发
//!
//! HTTP 实现不在本仓库范围内；内存实现见 in_memory 模块。

use crate::error::BackendError;
use crate::models::{
    ImageAttachment, IndustryRecord, IndustrySnapshot, TelemetryPoint, TelemetrySelector,
    UnitMetaRecord, UserAccount,
};
use api_contract::BulkUnitCount;
use async_trait::async_trait;
use domain::{Unit, ViewerContext};

/// 读接口：行业快照与关联资源。
#[async_trait]
pub trait SnapshotApi: Send + Sync {
    /// 按行业取完整快照（单元 + 类别 + 行业记录）。
    async fn fetch_industry_snapshot(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
    ) -> Result<IndustrySnapshot, BackendError>;

    /// 按行业取用户列表及其权限。
    async fn fetch_users(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
    ) -> Result<Vec<UserAccount>, BackendError>;

    /// 按单元取元数据记录。
    async fn fetch_unit_meta(
        &self,
        ctx: &ViewerContext,
        unit_id: &str,
    ) -> Result<Option<UnitMetaRecord>, BackendError>;

    /// 取最新遥测快照（单个单元或 ALL）。
    async fn fetch_latest_telemetry(
        &self,
        ctx: &ViewerContext,
        selector: TelemetrySelector,
    ) -> Result<Vec<TelemetryPoint>, BackendError>;
}

/// 行业写接口。
#[async_trait]
pub trait IndustryApi: Send + Sync {
    /// 创建行业。
    async fn create_industry(
        &self,
        ctx: &ViewerContext,
        record: IndustryRecord,
    ) -> Result<IndustryRecord, BackendError>;

    /// 更新行业名称。
    async fn update_industry(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
        industry_name: String,
    ) -> Result<IndustryRecord, BackendError>;
}

/// 单元写接口。
#[async_trait]
pub trait UnitApi: Send + Sync {
    /// 批量创建单元（按类别计数）。
    async fn create_units_bulk(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
        counts: Vec<BulkUnitCount>,
    ) -> Result<Vec<Unit>, BackendError>;

    /// 更新单元（完整的、按类别裁剪的记录）。
    async fn update_unit(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
        unit: &Unit,
    ) -> Result<(), BackendError>;
}

/// 子类别成员写接口。
#[async_trait]
pub trait AssignmentApi: Send + Sync {
    /// 全量替换子类别成员（发送完整成员列表，非差量）。
    async fn replace_assignment(
        &self,
        ctx: &ViewerContext,
        industry_id: &str,
        category_id: &str,
        sub_category_id: &str,
        unit_ids: Vec<String>,
    ) -> Result<(), BackendError>;
}

/// 用户权限写接口。
#[async_trait]
pub trait UserApi: Send + Sync {
    /// 全量替换用户权限集合。
    ///
    /// HTTP 实现以重复键查询参数编码列表；此处只约定完整集合语义。
    async fn replace_permissions(
        &self,
        ctx: &ViewerContext,
        user_id: &str,
        permissions: Vec<String>,
    ) -> Result<UserAccount, BackendError>;
}

/// 单元元数据写接口。
#[async_trait]
pub trait UnitMetaApi: Send + Sync {
    /// 创建或更新元数据记录（multipart，图片可选）。
    async fn upsert_unit_meta(
        &self,
        ctx: &ViewerContext,
        record: UnitMetaRecord,
        image: Option<ImageAttachment>,
    ) -> Result<UnitMetaRecord, BackendError>;
}

/// 审计旁路接口。
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// 记录一次成功写的审计条目。
    async fn record(&self, entry: crate::audit::AuditEntry) -> Result<(), BackendError>;
}
