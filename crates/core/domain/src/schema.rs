//! 单元类型 schema
//!
//! 按 standardCategoryId 的声明式查表，无状态：
//! - 类别适用的属性组
//! - 表单字段的可见性 / 可编辑性 / 所需访问档位
//! - 水质参数目录
//!
//! 表单控制器据此决定逐字段行为；本模块只做查表，不持有草稿。

use crate::category::StandardCategory;
use crate::permissions::AccessTier;
use crate::quality::QualityParam;

/// 属性组（对应线上记录的字段分组）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeGroup {
    Common,
    Stock,
    Energy,
    FlowLike,
    VirtualMeta,
    QualityParams,
}

/// 类别适用的属性组集合。
pub fn attribute_groups(category: StandardCategory) -> &'static [AttributeGroup] {
    match category {
        StandardCategory::Stock => &[AttributeGroup::Common, AttributeGroup::Stock],
        StandardCategory::Energy => &[AttributeGroup::Common, AttributeGroup::Energy],
        StandardCategory::Virtual => &[AttributeGroup::Common, AttributeGroup::VirtualMeta],
        StandardCategory::Quality => &[AttributeGroup::Common, AttributeGroup::QualityParams],
        StandardCategory::Source
        | StandardCategory::GroundWater
        | StandardCategory::Manual => &[AttributeGroup::Common, AttributeGroup::FlowLike],
    }
}

/// 水质参数目录（固定 9 项）。
pub fn quality_catalogue() -> &'static [QualityParam] {
    &QualityParam::CATALOGUE
}

/// 字段取值种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Flag,
}

/// 表单可寻址的单元字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitField {
    UnitName,
    DeviceId,
    StandardCategory,
    UnitThreshold,
    IsDeployed,
    InterpolationDisabled,
    AlertEnabled,
    Height,
    MaxCapacity,
    UnitType,
    FlowFactor,
    IothubDeviceId,
    IothubDeviceType,
    IothubSlaveId,
    IothubMeterType,
    IothubStreamId,
    IothubTankHeight,
    IothubSensorHeight,
    Calculations,
}

impl UnitField {
    /// 字段是否适用于给定类别。
    pub fn applies_to(self, category: StandardCategory) -> bool {
        match self {
            UnitField::UnitName
            | UnitField::DeviceId
            | UnitField::StandardCategory
            | UnitField::UnitThreshold
            | UnitField::IsDeployed
            | UnitField::InterpolationDisabled
            | UnitField::IothubDeviceId
            | UnitField::IothubDeviceType
            | UnitField::IothubSlaveId
            | UnitField::IothubMeterType
            | UnitField::IothubStreamId => true,
            // 水质类的告警开关在参数级配置上，不走整单元字段。
            UnitField::AlertEnabled => category != StandardCategory::Quality,
            UnitField::Height
            | UnitField::MaxCapacity
            | UnitField::IothubTankHeight
            | UnitField::IothubSensorHeight => category == StandardCategory::Stock,
            UnitField::UnitType => category == StandardCategory::Energy,
            UnitField::FlowFactor => {
                category == StandardCategory::Energy || category.is_flow_like()
            }
            UnitField::Calculations => category == StandardCategory::Virtual,
        }
    }

    /// 字段是否可经表单写入（UnitType 仅展示，只读）。
    pub fn is_editable(self) -> bool {
        !matches!(self, UnitField::UnitType)
    }

    /// 写入该字段所需的最低访问档位。
    ///
    /// 描述性字段允许受限档编辑；结构性字段（类别、设备、
    /// 传输配置、类别扩展数值）仅完全访问档可改。
    pub fn required_tier(self) -> AccessTier {
        match self {
            UnitField::UnitName
            | UnitField::UnitThreshold
            | UnitField::InterpolationDisabled
            | UnitField::AlertEnabled => AccessTier::Limited,
            _ => AccessTier::FullAccess,
        }
    }

    /// 字段取值种类。
    pub fn kind(self) -> FieldKind {
        match self {
            UnitField::UnitName
            | UnitField::DeviceId
            | UnitField::StandardCategory
            | UnitField::UnitType
            | UnitField::IothubDeviceId
            | UnitField::IothubDeviceType
            | UnitField::IothubSlaveId
            | UnitField::IothubMeterType
            | UnitField::IothubStreamId
            | UnitField::Calculations => FieldKind::Text,
            UnitField::UnitThreshold
            | UnitField::Height
            | UnitField::MaxCapacity
            | UnitField::FlowFactor
            | UnitField::IothubTankHeight
            | UnitField::IothubSensorHeight => FieldKind::Number,
            UnitField::IsDeployed
            | UnitField::InterpolationDisabled
            | UnitField::AlertEnabled => FieldKind::Flag,
        }
    }
}

/// "Unit Type" 字段是否展示（仅能耗类，且只读）。
pub fn shows_unit_type(category: StandardCategory) -> bool {
    category == StandardCategory::Energy
}

/// "Flow Factor" 字段是否展示（能耗类与流量类，库存类不展示）。
pub fn shows_flow_factor(category: StandardCategory) -> bool {
    category == StandardCategory::Energy || category.is_flow_like()
}

/// "Height"/"Max Capacity" 是否展示（仅库存类）。
pub fn shows_stock_dimensions(category: StandardCategory) -> bool {
    category == StandardCategory::Stock
}
