//! 协作方内存实现
//!
//! 仅用于本地演示和测试，语义与约定的 REST 边界一致：
//! 写操作全量替换、读操作返回快照副本。

mod assignment;
mod audit_sink;
mod industry;
mod snapshot;
mod unit;
mod unit_meta;
mod user;

pub use audit_sink::{FailingAuditSink, RecordingAuditSink};

use crate::error::BackendError;
use crate::models::{
    CategoryRecord, IndustryRecord, SubCategoryRecord, TelemetryPoint, UnitMetaRecord,
    UserAccount,
};
use domain::{StandardCategory, Unit, ViewerContext};
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

/// 协作方内存实现。
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储；
/// 键为行业 ID（单元元数据与遥测按单元 ID 键）。
pub struct InMemoryBackend {
    pub(crate) industries: RwLock<HashMap<String, IndustryRecord>>,
    pub(crate) units: RwLock<HashMap<String, Vec<Unit>>>,
    pub(crate) categories: RwLock<HashMap<String, Vec<CategoryRecord>>>,
    pub(crate) users: RwLock<HashMap<String, Vec<UserAccount>>>,
    pub(crate) unit_meta: RwLock<HashMap<String, UnitMetaRecord>>,
    pub(crate) telemetry: RwLock<HashMap<String, TelemetryPoint>>,
}

impl InMemoryBackend {
    /// 空存储。
    pub fn new() -> Self {
        Self {
            industries: RwLock::new(HashMap::new()),
            units: RwLock::new(HashMap::new()),
            categories: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            unit_meta: RwLock::new(HashMap::new()),
            telemetry: RwLock::new(HashMap::new()),
        }
    }

    /// 内置演示行业（industry-1）。
    ///
    /// 含一个源头类别（附两个子类别）、三个单元、一名受限用户
    /// 与一条最新遥测。
    pub fn with_demo_industry() -> Self {
        let backend = Self::new();
        let industry_id = "industry-1".to_string();
        {
            let mut industries = backend.industries.write().expect("fresh lock");
            industries.insert(
                industry_id.clone(),
                IndustryRecord {
                    industry_id: industry_id.clone(),
                    industry_name: "Demo Waterworks".to_string(),
                },
            );
        }
        {
            let mut units = backend.units.write().expect("fresh lock");
            let mut borewell = Unit::new("unit-1", StandardCategory::Source);
            borewell.unit_name = "Borewell Pump 1".to_string();
            let mut tank = Unit::new("unit-2", StandardCategory::Stock);
            tank.unit_name = "Overhead Tank".to_string();
            let mut derived = Unit::new("unit-3", StandardCategory::Virtual);
            derived.unit_name = "Total Inflow".to_string();
            units.insert(industry_id.clone(), vec![borewell, tank, derived]);
        }
        {
            let mut categories = backend.categories.write().expect("fresh lock");
            categories.insert(
                industry_id.clone(),
                vec![CategoryRecord {
                    category_id: "cat-1".to_string(),
                    display_name: "Water Sources".to_string(),
                    standard_category: StandardCategory::Source,
                    si_unit: "m³".to_string(),
                    enabled: true,
                    sub_categories: vec![
                        SubCategoryRecord {
                            sub_category_id: "sub-1".to_string(),
                            name: "Borewells".to_string(),
                            unit_ids: BTreeSet::from(["unit-1".to_string()]),
                        },
                        SubCategoryRecord {
                            sub_category_id: "sub-2".to_string(),
                            name: "Derived".to_string(),
                            unit_ids: BTreeSet::new(),
                        },
                    ],
                }],
            );
        }
        {
            let mut telemetry = backend.telemetry.write().expect("fresh lock");
            telemetry.insert(
                "unit-1".to_string(),
                TelemetryPoint {
                    unit_id: "unit-1".to_string(),
                    ts_ms: 1_700_000_000_000,
                    value: 12.5,
                },
            );
        }
        {
            let mut users = backend.users.write().expect("fresh lock");
            users.insert(
                industry_id,
                vec![UserAccount {
                    user_id: "user-1".to_string(),
                    username: "operator".to_string(),
                    permissions: vec!["USER".to_string()],
                }],
            );
        }
        backend
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// 验证查看者上下文非空。
pub(crate) fn ensure_viewer(ctx: &ViewerContext) -> Result<(), BackendError> {
    if ctx.username.is_empty() {
        return Err(BackendError::Validation("viewer required".to_string()));
    }
    Ok(())
}

/// 锁中毒按协作方不可用处理。
pub(crate) fn lock_failed() -> BackendError {
    BackendError::Connection("backend store unavailable".to_string())
}
