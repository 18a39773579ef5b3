//! 单元模型
//!
//! 单元在七种设备类别上多态，这里以带标签联合表达：
//! 公共字段 + 恰好一个类别扩展块 [`CategoryDetail`]。
//! 序列化按类别裁剪由 api-contract 完成；由于扩展块互斥，
//! 跨类别字段泄漏在构造层面即被排除。

use std::collections::BTreeMap;

use crate::category::StandardCategory;
use crate::quality::{QualityParam, QualitySettings};

/// 设备传输子记录（iothubConfig）。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IothubConfig {
    pub device_id: String,
    pub device_type: String,
    pub slave_id: String,
    pub meter_type: String,
    pub stream_id: String,
    /// 仅库存类单元携带。
    pub tank_height: Option<f64>,
    /// 仅库存类单元携带。
    pub sensor_height: Option<f64>,
}

/// 虚拟单元的计算元数据。
///
/// units 与 sub_categories 保持插入有序且去重；
/// 重复 token 的加入是静默 no-op。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VirtualMeta {
    pub units: Vec<String>,
    pub calculations: String,
    pub sub_categories: Vec<String>,
}

impl VirtualMeta {
    /// 追加引用单元，重复则 no-op。返回是否实际加入。
    pub fn push_unit(&mut self, unit_id: &str) -> bool {
        if unit_id.is_empty() || self.units.iter().any(|item| item == unit_id) {
            return false;
        }
        self.units.push(unit_id.to_string());
        true
    }

    /// 移除引用单元，不存在则 no-op。
    pub fn remove_unit(&mut self, unit_id: &str) {
        self.units.retain(|item| item != unit_id);
    }

    /// 追加引用子类别，重复则 no-op。返回是否实际加入。
    pub fn push_sub_category(&mut self, sub_category_id: &str) -> bool {
        if sub_category_id.is_empty()
            || self.sub_categories.iter().any(|item| item == sub_category_id)
        {
            return false;
        }
        self.sub_categories.push(sub_category_id.to_string());
        true
    }

    /// 移除引用子类别，不存在则 no-op。
    pub fn remove_sub_category(&mut self, sub_category_id: &str) {
        self.sub_categories.retain(|item| item != sub_category_id);
    }
}

/// 类别扩展块：每个单元恰好携带一个。
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDetail {
    /// 库存类（水箱等）。
    Stock { height: f64, max_capacity: f64 },
    /// 能耗类。
    Energy { unit_type: String, flow_factor: f64 },
    /// 流量类（源头/地下水/手工）。
    FlowLike { flow_factor: f64 },
    /// 虚拟计算类。
    Virtual { meta: VirtualMeta },
    /// 水质类：参数键 → 参数配置的单一映射。
    Quality {
        params: BTreeMap<QualityParam, QualitySettings>,
    },
}

impl CategoryDetail {
    /// 给定类别的空扩展块。
    pub fn default_for(category: StandardCategory) -> Self {
        match category {
            StandardCategory::Stock => CategoryDetail::Stock {
                height: 0.0,
                max_capacity: 0.0,
            },
            StandardCategory::Energy => CategoryDetail::Energy {
                unit_type: "".to_string(),
                flow_factor: 0.0,
            },
            StandardCategory::Virtual => CategoryDetail::Virtual {
                meta: VirtualMeta::default(),
            },
            StandardCategory::Quality => CategoryDetail::Quality {
                params: BTreeMap::new(),
            },
            StandardCategory::Source
            | StandardCategory::GroundWater
            | StandardCategory::Manual => CategoryDetail::FlowLike { flow_factor: 0.0 },
        }
    }

    /// 扩展块是否与类别一致。
    pub fn matches_category(&self, category: StandardCategory) -> bool {
        match self {
            CategoryDetail::Stock { .. } => category == StandardCategory::Stock,
            CategoryDetail::Energy { .. } => category == StandardCategory::Energy,
            CategoryDetail::FlowLike { .. } => category.is_flow_like(),
            CategoryDetail::Virtual { .. } => category == StandardCategory::Virtual,
            CategoryDetail::Quality { .. } => category == StandardCategory::Quality,
        }
    }
}

/// 单元记录。
///
/// unit_id 由外部系统分配，客户端视为不可变的不透明字符串。
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub unit_id: String,
    pub unit_name: String,
    pub device_id: String,
    pub standard_category: StandardCategory,
    pub is_deployed: bool,
    pub unit_threshold: f64,
    pub interpolation_disabled: bool,
    /// 整单元告警开关；水质类单元以参数级开关为准，此值被忽略。
    pub alert_enabled: bool,
    pub iothub: IothubConfig,
    pub detail: CategoryDetail,
}

impl Unit {
    /// 给定类别的空白单元，带文档化默认值
    /// （alert_enabled 对非水质类默认 true，其余布尔默认 false，数值默认 0）。
    pub fn new(unit_id: impl Into<String>, category: StandardCategory) -> Self {
        Self {
            unit_id: unit_id.into(),
            unit_name: "".to_string(),
            device_id: "".to_string(),
            standard_category: category,
            is_deployed: false,
            unit_threshold: 0.0,
            interpolation_disabled: false,
            alert_enabled: category != StandardCategory::Quality,
            iothub: IothubConfig::default(),
            detail: CategoryDetail::default_for(category),
        }
    }

    /// 使扩展块与 standard_category 一致。
    ///
    /// 载入外部快照时调用：若快照携带了与类别不符的扩展块，
    /// 用该类别的空扩展块替换，防止陈旧的跨类别数据进入草稿。
    pub fn normalize(&mut self) {
        if !self.detail.matches_category(self.standard_category) {
            self.detail = CategoryDetail::default_for(self.standard_category);
        }
        if self.standard_category != StandardCategory::Stock {
            self.iothub.tank_height = None;
            self.iothub.sensor_height = None;
        }
    }

    /// 水质参数映射（仅水质类单元）。
    pub fn quality_params(&self) -> Option<&BTreeMap<QualityParam, QualitySettings>> {
        match &self.detail {
            CategoryDetail::Quality { params } => Some(params),
            _ => None,
        }
    }

    /// 水质参数映射的可变引用。
    pub fn quality_params_mut(
        &mut self,
    ) -> Option<&mut BTreeMap<QualityParam, QualitySettings>> {
        match &mut self.detail {
            CategoryDetail::Quality { params } => Some(params),
            _ => None,
        }
    }

    /// 虚拟元数据（仅虚拟类单元）。
    pub fn virtual_meta(&self) -> Option<&VirtualMeta> {
        match &self.detail {
            CategoryDetail::Virtual { meta } => Some(meta),
            _ => None,
        }
    }

    /// 虚拟元数据的可变引用。
    pub fn virtual_meta_mut(&mut self) -> Option<&mut VirtualMeta> {
        match &mut self.detail {
            CategoryDetail::Virtual { meta } => Some(meta),
            _ => None,
        }
    }
}
