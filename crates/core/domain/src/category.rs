//! 标准类别：单元的七种设备类别及其线上标识。

/// 标准类别枚举。
///
/// Source/GroundWater/Manual 统称流量类（flow-like），
/// 它们共用相同的扩展属性组。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardCategory {
    Source,
    Energy,
    Stock,
    Quality,
    Virtual,
    GroundWater,
    Manual,
}

impl StandardCategory {
    /// 全部类别（用于批量创建与 schema 遍历）。
    pub const ALL: [StandardCategory; 7] = [
        StandardCategory::Source,
        StandardCategory::Energy,
        StandardCategory::Stock,
        StandardCategory::Quality,
        StandardCategory::Virtual,
        StandardCategory::GroundWater,
        StandardCategory::Manual,
    ];

    /// 线上标识（standardCategoryId 字段值）。
    pub fn wire_id(self) -> &'static str {
        match self {
            StandardCategory::Source => "SOURCE_CATEGORY",
            StandardCategory::Energy => "ENERGY_CATEGORY",
            StandardCategory::Stock => "STOCK_CATEGORY",
            StandardCategory::Quality => "QUALITY_CATEGORY",
            StandardCategory::Virtual => "VIRTUAL_CATEGORY",
            StandardCategory::GroundWater => "GROUND_WATER_CATEGORY",
            StandardCategory::Manual => "MANUAL_CATEGORY",
        }
    }

    /// 由线上标识解析类别。
    pub fn from_wire_id(value: &str) -> Option<Self> {
        StandardCategory::ALL
            .into_iter()
            .find(|category| category.wire_id() == value)
    }

    /// 是否属于流量类（非 stock/energy/virtual/quality）。
    pub fn is_flow_like(self) -> bool {
        matches!(
            self,
            StandardCategory::Source | StandardCategory::GroundWater | StandardCategory::Manual
        )
    }
}
