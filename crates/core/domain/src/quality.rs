//! 水质参数目录与参数级配置。
//!
//! 目录固定为 9 项理化参数，每项带默认国际单位。
//! 参数级配置收拢为单一结构 [`QualitySettings`]，
//! 替代五张按相同参数键同步的并行映射。

/// 可选水质参数（固定目录）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityParam {
    Ph,
    Tds,
    Cod,
    Tss,
    Bod,
    DissolvedOxygen,
    Temperature,
    Ec,
    Turbidity,
}

impl QualityParam {
    /// 目录全集（9 项）。
    pub const CATALOGUE: [QualityParam; 9] = [
        QualityParam::Ph,
        QualityParam::Tds,
        QualityParam::Cod,
        QualityParam::Tss,
        QualityParam::Bod,
        QualityParam::DissolvedOxygen,
        QualityParam::Temperature,
        QualityParam::Ec,
        QualityParam::Turbidity,
    ];

    /// 线上键名（params 列表与各映射的键）。
    pub fn key(self) -> &'static str {
        match self {
            QualityParam::Ph => "pH",
            QualityParam::Tds => "TDS",
            QualityParam::Cod => "COD",
            QualityParam::Tss => "TSS",
            QualityParam::Bod => "BOD",
            QualityParam::DissolvedOxygen => "DO",
            QualityParam::Temperature => "Temperature",
            QualityParam::Ec => "EC",
            QualityParam::Turbidity => "Turbidity",
        }
    }

    /// 展示名。
    pub fn label(self) -> &'static str {
        match self {
            QualityParam::Ph => "pH",
            QualityParam::Tds => "Total Dissolved Solids",
            QualityParam::Cod => "Chemical Oxygen Demand",
            QualityParam::Tss => "Total Suspended Solids",
            QualityParam::Bod => "Biochemical Oxygen Demand",
            QualityParam::DissolvedOxygen => "Dissolved Oxygen",
            QualityParam::Temperature => "Temperature",
            QualityParam::Ec => "Electrical Conductivity",
            QualityParam::Turbidity => "Turbidity",
        }
    }

    /// 默认国际单位（用于界面预填，新增参数时 siUnit 初值为空串）。
    pub fn default_si_unit(self) -> &'static str {
        match self {
            QualityParam::Ph => "pH",
            QualityParam::Tds => "mg/L",
            QualityParam::Cod => "mg/L",
            QualityParam::Tss => "mg/L",
            QualityParam::Bod => "mg/L",
            QualityParam::DissolvedOxygen => "mg/L",
            QualityParam::Temperature => "°C",
            QualityParam::Ec => "µS/cm",
            QualityParam::Turbidity => "NTU",
        }
    }

    /// 由线上键名解析参数，目录之外返回 None。
    pub fn from_key(value: &str) -> Option<Self> {
        QualityParam::CATALOGUE
            .into_iter()
            .find(|param| param.key() == value)
    }
}

/// 单个水质参数的配置。
#[derive(Debug, Clone, PartialEq)]
pub struct QualitySettings {
    pub si_unit: String,
    pub low_threshold: f64,
    pub high_threshold: f64,
    pub min: f64,
    pub max: f64,
    pub alert_enabled: bool,
}

impl Default for QualitySettings {
    /// 新增参数时的默认配置。
    fn default() -> Self {
        Self {
            si_unit: "".to_string(),
            low_threshold: 0.0,
            high_threshold: 100.0,
            min: 0.0,
            max: 1000.0,
            alert_enabled: false,
        }
    }
}

/// 可编辑的参数级字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityField {
    SiUnit,
    LowThreshold,
    HighThreshold,
    Min,
    Max,
    AlertEnabled,
}
