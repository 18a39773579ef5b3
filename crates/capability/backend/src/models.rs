//! 协作方数据模型
//!
//! 定义快照与写操作涉及的记录：
//! - 行业模型：IndustryRecord、IndustrySnapshot
//! - 类别层级：CategoryRecord、SubCategoryRecord
//! - 用户模型：UserAccount
//! - 单元元数据：UnitMetaRecord、ImageAttachment
//! - 遥测快照：TelemetrySelector、TelemetryPoint

use std::collections::BTreeSet;

use domain::{StandardCategory, Unit};

/// 行业（租户）记录。
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryRecord {
    pub industry_id: String,
    pub industry_name: String,
}

/// 某行业的只读快照：单元 + 类别 + 行业记录。
///
/// 客户端不做本地乐观合并；任何成功写之后总是整体重取。
#[derive(Debug, Clone)]
pub struct IndustrySnapshot {
    pub industry: IndustryRecord,
    pub units: Vec<Unit>,
    pub categories: Vec<CategoryRecord>,
}

/// 子类别：持有单元 ID 集合（无重复、无序）。
#[derive(Debug, Clone, PartialEq)]
pub struct SubCategoryRecord {
    pub sub_category_id: String,
    pub name: String,
    pub unit_ids: BTreeSet<String>,
}

/// 类别：有序持有若干子类别。
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub category_id: String,
    pub display_name: String,
    pub standard_category: StandardCategory,
    pub si_unit: String,
    pub enabled: bool,
    pub sub_categories: Vec<SubCategoryRecord>,
}

/// 用户账号（管理面）。
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub user_id: String,
    pub username: String,
    pub permissions: Vec<String>,
}

/// 单元元数据记录（设备铭牌信息）。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitMetaRecord {
    pub unit_id: String,
    pub make: String,
    pub model: String,
    pub serial_number: String,
    pub location: String,
    pub notes: String,
    pub image_filename: Option<String>,
}

/// 元数据上传附带的图片（multipart 可选部分）。
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 遥测快照选择器：单个单元或全部。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetrySelector {
    One(String),
    All,
}

/// 最新遥测条目。
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryPoint {
    pub unit_id: String,
    pub ts_ms: i64,
    pub value: f64,
}
