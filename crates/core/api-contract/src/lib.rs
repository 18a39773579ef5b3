//! 稳定的 DTO 与线上契约。
//!
//! 单元记录的序列化按类别裁剪：只有该类别适用的属性组会出现在
//! 负载里。水质参数在领域层是单一映射，上线时投影为旧契约的
//! 五张并行映射（siUnit/lowThreshold/highThreshold/min/max）加
//! 参数级 alertEnabled 映射，键集合始终一致。

use std::collections::BTreeMap;

use domain::quality::{QualityParam, QualitySettings};
use domain::{CategoryDetail, IothubConfig, StandardCategory, Unit, VirtualMeta};
use serde::{Deserialize, Serialize};

/// 契约解析错误。
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("unknown standardCategoryId: {0}")]
    UnknownCategory(String),
}

/// 设备传输子记录（iothubConfig）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IothubConfigDto {
    pub device_id: String,
    pub device_type: String,
    pub slave_id: String,
    pub meter_type: String,
    pub stream_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tank_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_height: Option<f64>,
}

impl IothubConfigDto {
    fn from_domain(config: &IothubConfig, category: StandardCategory) -> Self {
        // 罐体字段仅库存类上线。
        let stock = category == StandardCategory::Stock;
        Self {
            device_id: config.device_id.clone(),
            device_type: config.device_type.clone(),
            slave_id: config.slave_id.clone(),
            meter_type: config.meter_type.clone(),
            stream_id: config.stream_id.clone(),
            tank_height: if stock { config.tank_height } else { None },
            sensor_height: if stock { config.sensor_height } else { None },
        }
    }

    fn into_domain(self) -> IothubConfig {
        IothubConfig {
            device_id: self.device_id,
            device_type: self.device_type,
            slave_id: self.slave_id,
            meter_type: self.meter_type,
            stream_id: self.stream_id,
            tank_height: self.tank_height,
            sensor_height: self.sensor_height,
        }
    }
}

/// alertEnabled 的类型相关形态：
/// 非水质类为布尔，水质类为参数键 → 布尔的映射。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertEnabledDto {
    Flag(bool),
    PerParam(BTreeMap<String, bool>),
}

/// 虚拟单元元数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMetaDto {
    pub units: Vec<String>,
    pub calculations: String,
    pub sub_categories: Vec<String>,
}

/// 单元记录线上形态（读与整单元写共用）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDto {
    pub unit_id: String,
    pub unit_name: String,
    pub device_id: String,
    pub standard_category_id: String,
    pub is_deployed: bool,
    pub unit_threshold: f64,
    pub interpolation_disabled: bool,
    pub alert_enabled: AlertEnabledDto,
    pub iothub_config: IothubConfigDto,

    // 库存类扩展
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<f64>,

    // 能耗类扩展（unitType 只读展示）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<String>,
    // 能耗类与流量类共用
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_factor: Option<f64>,

    // 虚拟类扩展
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<VirtualMetaDto>,

    // 水质类扩展：params 列表 + 按参数键并行的映射
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub si_unit: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_threshold: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_threshold: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<BTreeMap<String, f64>>,
}

impl UnitDto {
    /// 领域单元 → 线上形态，只携带该类别适用的属性组。
    pub fn from_unit(unit: &Unit) -> Self {
        let category = unit.standard_category;
        let mut dto = Self {
            unit_id: unit.unit_id.clone(),
            unit_name: unit.unit_name.clone(),
            device_id: unit.device_id.clone(),
            standard_category_id: category.wire_id().to_string(),
            is_deployed: unit.is_deployed,
            unit_threshold: unit.unit_threshold,
            interpolation_disabled: unit.interpolation_disabled,
            alert_enabled: AlertEnabledDto::Flag(unit.alert_enabled),
            iothub_config: IothubConfigDto::from_domain(&unit.iothub, category),
            height: None,
            max_capacity: None,
            unit_type: None,
            flow_factor: None,
            meta: None,
            params: None,
            si_unit: None,
            low_threshold: None,
            high_threshold: None,
            min: None,
            max: None,
        };
        match &unit.detail {
            CategoryDetail::Stock {
                height,
                max_capacity,
            } => {
                dto.height = Some(*height);
                dto.max_capacity = Some(*max_capacity);
            }
            CategoryDetail::Energy {
                unit_type,
                flow_factor,
            } => {
                dto.unit_type = Some(unit_type.clone());
                dto.flow_factor = Some(*flow_factor);
            }
            CategoryDetail::FlowLike { flow_factor } => {
                dto.flow_factor = Some(*flow_factor);
            }
            CategoryDetail::Virtual { meta } => {
                dto.meta = Some(VirtualMetaDto {
                    units: meta.units.clone(),
                    calculations: meta.calculations.clone(),
                    sub_categories: meta.sub_categories.clone(),
                });
            }
            CategoryDetail::Quality { params } => {
                let mut keys = Vec::new();
                let mut si_unit = BTreeMap::new();
                let mut low = BTreeMap::new();
                let mut high = BTreeMap::new();
                let mut min = BTreeMap::new();
                let mut max = BTreeMap::new();
                let mut alert = BTreeMap::new();
                for (param, settings) in params {
                    let key = param.key().to_string();
                    keys.push(key.clone());
                    si_unit.insert(key.clone(), settings.si_unit.clone());
                    low.insert(key.clone(), settings.low_threshold);
                    high.insert(key.clone(), settings.high_threshold);
                    min.insert(key.clone(), settings.min);
                    max.insert(key.clone(), settings.max);
                    alert.insert(key, settings.alert_enabled);
                }
                dto.params = Some(keys);
                dto.si_unit = Some(si_unit);
                dto.low_threshold = Some(low);
                dto.high_threshold = Some(high);
                dto.min = Some(min);
                dto.max = Some(max);
                dto.alert_enabled = AlertEnabledDto::PerParam(alert);
            }
        }
        dto
    }

    /// 线上形态 → 领域单元。
    ///
    /// 缺失的可选数值回退为 0；水质映射以 params 列表为准合并，
    /// 目录之外的键被丢弃，缺失的映射项取默认配置。
    pub fn into_unit(self) -> Result<Unit, ContractError> {
        let category = StandardCategory::from_wire_id(&self.standard_category_id)
            .ok_or_else(|| ContractError::UnknownCategory(self.standard_category_id.clone()))?;
        let detail = match category {
            StandardCategory::Stock => CategoryDetail::Stock {
                height: self.height.unwrap_or(0.0),
                max_capacity: self.max_capacity.unwrap_or(0.0),
            },
            StandardCategory::Energy => CategoryDetail::Energy {
                unit_type: self.unit_type.clone().unwrap_or_default(),
                flow_factor: self.flow_factor.unwrap_or(0.0),
            },
            StandardCategory::Virtual => {
                let meta = self.meta.clone().map(|meta| VirtualMeta {
                    units: meta.units,
                    calculations: meta.calculations,
                    sub_categories: meta.sub_categories,
                });
                CategoryDetail::Virtual {
                    meta: meta.unwrap_or_default(),
                }
            }
            StandardCategory::Quality => {
                let alert = match &self.alert_enabled {
                    AlertEnabledDto::PerParam(map) => map.clone(),
                    AlertEnabledDto::Flag(_) => BTreeMap::new(),
                };
                let mut params = BTreeMap::new();
                for key in self.params.clone().unwrap_or_default() {
                    let Some(param) = QualityParam::from_key(&key) else {
                        continue;
                    };
                    let defaults = QualitySettings::default();
                    let settings = QualitySettings {
                        si_unit: self
                            .si_unit
                            .as_ref()
                            .and_then(|map| map.get(&key).cloned())
                            .unwrap_or(defaults.si_unit),
                        low_threshold: self
                            .low_threshold
                            .as_ref()
                            .and_then(|map| map.get(&key).copied())
                            .unwrap_or(defaults.low_threshold),
                        high_threshold: self
                            .high_threshold
                            .as_ref()
                            .and_then(|map| map.get(&key).copied())
                            .unwrap_or(defaults.high_threshold),
                        min: self
                            .min
                            .as_ref()
                            .and_then(|map| map.get(&key).copied())
                            .unwrap_or(defaults.min),
                        max: self
                            .max
                            .as_ref()
                            .and_then(|map| map.get(&key).copied())
                            .unwrap_or(defaults.max),
                        alert_enabled: alert.get(&key).copied().unwrap_or(false),
                    };
                    params.insert(param, settings);
                }
                CategoryDetail::Quality { params }
            }
            StandardCategory::Source
            | StandardCategory::GroundWater
            | StandardCategory::Manual => CategoryDetail::FlowLike {
                flow_factor: self.flow_factor.unwrap_or(0.0),
            },
        };
        let alert_enabled = match self.alert_enabled {
            AlertEnabledDto::Flag(value) => value,
            AlertEnabledDto::PerParam(_) => false,
        };
        let mut unit = Unit {
            unit_id: self.unit_id,
            unit_name: self.unit_name,
            device_id: self.device_id,
            standard_category: category,
            is_deployed: self.is_deployed,
            unit_threshold: self.unit_threshold,
            interpolation_disabled: self.interpolation_disabled,
            alert_enabled,
            iothub: self.iothub_config.into_domain(),
            detail,
        };
        unit.normalize();
        Ok(unit)
    }
}

/// 行业（租户）记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryDto {
    pub industry_id: String,
    pub industry_name: String,
}

/// 行业创建请求体。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndustryRequest {
    pub industry_name: String,
}

/// 行业更新请求体。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIndustryRequest {
    pub industry_name: Option<String>,
}

/// 子类别记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryDto {
    pub sub_category_id: String,
    pub name: String,
    pub unit_ids: Vec<String>,
}

/// 类别记录（含其子类别）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub category_id: String,
    pub display_name: String,
    pub standard_category_id: String,
    pub si_unit: String,
    pub enabled: bool,
    pub sub_categories: Vec<SubCategoryDto>,
}

/// 子类别成员全量替换请求体（始终发送完整成员列表，而非差量）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceAssignmentRequest {
    pub category_id: String,
    pub sub_category_id: String,
    pub unit_ids: Vec<String>,
}

/// 按类别计数的批量建单元请求体。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUnitCount {
    pub standard_category_id: String,
    pub count: u32,
}

/// 用户记录（管理面）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: String,
    pub username: String,
    pub permissions: Vec<String>,
}

/// 单元元数据记录（设备铭牌信息）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitMetaDto {
    pub unit_id: String,
    pub make: String,
    pub model: String,
    pub serial_number: String,
    pub location: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_filename: Option<String>,
}

/// 最新遥测快照条目。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshotDto {
    pub unit_id: String,
    pub ts_ms: i64,
    pub value: f64,
}

/// 从协作方失败响应体中尽力提取 message 字段。
pub fn extract_error_message(body: &serde_json::Value) -> Option<String> {
    for key in ["message", "error", "detail"] {
        if let Some(value) = body.get(key).and_then(|value| value.as_str()) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
