//! 外部协作方边界
//!
//! 管理控制台对 REST 后端的依赖收拢为一组异步 trait：
//! 读（行业快照、用户、元数据、遥测）与写（行业、单元、
//! 关联、权限、元数据）。所有写操作为同步请求/响应语义，
//! 2xx 即成功，其余一律归为失败。
//!
//! 审计旁路在选定的成功写之后触发；其失败被吞掉，只记日志
//! 与计数，绝不向用户上抛，也不重试。

mod audit;
mod error;
mod in_memory;
mod models;
mod traits;

pub use audit::{AuditEntry, record_best_effort};
pub use error::BackendError;
pub use in_memory::{FailingAuditSink, InMemoryBackend, RecordingAuditSink};
pub use models::{
    CategoryRecord, ImageAttachment, IndustryRecord, IndustrySnapshot, SubCategoryRecord,
    TelemetryPoint, TelemetrySelector, UnitMetaRecord, UserAccount,
};
pub use traits::{
    AssignmentApi, AuditSink, IndustryApi, SnapshotApi, UnitApi, UnitMetaApi, UserApi,
};
