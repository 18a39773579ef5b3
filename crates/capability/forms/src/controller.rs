//! 表单状态机与逐字段写入规则。

use console_backend::{BackendError, UnitApi};
use domain::quality::{QualityField, QualityParam, QualitySettings};
use domain::schema::{FieldKind, UnitField};
use domain::{AccessTier, CategoryDetail, StandardCategory, Unit, ViewerContext};

/// 表单模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    View,
    Edit,
}

/// 编辑范围，载入表单时按查看者档位一次性判定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// 完全访问档：全部可编辑字段可写。
    Full,
    /// 受限档：仅描述性字段可写。
    MetaOnly,
    /// 无权限档：永远停留在 VIEW。
    ReadOnly,
}

impl EditScope {
    fn for_tier(tier: AccessTier) -> Self {
        match tier {
            AccessTier::FullAccess => EditScope::Full,
            AccessTier::Limited => EditScope::MetaOnly,
            AccessTier::None => EditScope::ReadOnly,
        }
    }

    /// 该范围下给定字段是否可写。
    fn covers(self, field: UnitField) -> bool {
        match self {
            EditScope::Full => true,
            EditScope::MetaOnly => field.required_tier() == AccessTier::Limited,
            EditScope::ReadOnly => false,
        }
    }

    /// 该范围下结构性操作（类别扩展、参数集合、虚拟引用）是否可用。
    fn covers_structure(self) -> bool {
        self == EditScope::Full
    }
}

/// 字段输入值（文本控件交文本，开关控件交布尔）。
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    Flag(bool),
}

/// 数值字段的文本输入：解析失败与非有限值回落为 0。
fn coerce_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// 单元表单控制器。
///
/// 持有单元草稿与提交在途标志；所有写入先过模式、schema、
/// 编辑范围三道闸，任何一道不过即静默 no-op 并返回 false。
pub struct UnitFormController {
    draft: Unit,
    mode: FormMode,
    scope: EditScope,
    submitting: bool,
    meta_unit_input: String,
    meta_sub_category_input: String,
}

impl UnitFormController {
    /// 用快照中的单元载入表单。
    ///
    /// 草稿先归一化（扩展块与类别对齐、清除不适用的传输字段），
    /// 编辑范围按查看者当前档位定格，初始为 VIEW。
    pub fn load(mut unit: Unit, viewer: &ViewerContext) -> Self {
        unit.normalize();
        let scope = EditScope::for_tier(viewer.tier());
        tracing::debug!(unit_id = %unit.unit_id, ?scope, "unit form loaded");
        Self {
            draft: unit,
            mode: FormMode::View,
            scope,
            submitting: false,
            meta_unit_input: String::new(),
            meta_sub_category_input: String::new(),
        }
    }

    /// 当前草稿。
    pub fn draft(&self) -> &Unit {
        &self.draft
    }

    /// 当前模式。
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// 载入时定格的编辑范围。
    pub fn scope(&self) -> EditScope {
        self.scope
    }

    /// 是否有提交在途。
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// 字段在当前状态下是否可写（供界面渲染禁用态）。
    pub fn field_enabled(&self, field: UnitField) -> bool {
        self.mode == FormMode::Edit
            && field.is_editable()
            && field.applies_to(self.draft.standard_category)
            && self.scope.covers(field)
    }

    /// 进入编辑模式。ReadOnly 范围下拒绝并保持 VIEW。
    pub fn begin_edit(&mut self) -> bool {
        if !matches!(self.scope, EditScope::Full | EditScope::MetaOnly) {
            return false;
        }
        self.mode = FormMode::Edit;
        true
    }

    /// 写入一个公共/扩展字段。
    ///
    /// 不可写（模式、类别适用性、编辑范围、取值种类任一不符）
    /// 时静默忽略并返回 false。
    pub fn set_field(&mut self, field: UnitField, input: FieldInput) -> bool {
        if !self.field_enabled(field) {
            return false;
        }
        match (field.kind(), input) {
            (FieldKind::Text, FieldInput::Text(value)) => self.set_text(field, value),
            (FieldKind::Number, FieldInput::Text(value)) => {
                self.set_number(field, coerce_number(&value))
            }
            (FieldKind::Flag, FieldInput::Flag(value)) => self.set_flag(field, value),
            _ => false,
        }
    }

    fn set_text(&mut self, field: UnitField, value: String) -> bool {
        match field {
            UnitField::UnitName => self.draft.unit_name = value,
            UnitField::DeviceId => self.draft.device_id = value,
            UnitField::StandardCategory => return self.change_category(&value),
            UnitField::IothubDeviceId => self.draft.iothub.device_id = value,
            UnitField::IothubDeviceType => self.draft.iothub.device_type = value,
            UnitField::IothubSlaveId => self.draft.iothub.slave_id = value,
            UnitField::IothubMeterType => self.draft.iothub.meter_type = value,
            UnitField::IothubStreamId => self.draft.iothub.stream_id = value,
            UnitField::Calculations => match self.draft.virtual_meta_mut() {
                Some(meta) => meta.calculations = value,
                None => return false,
            },
            _ => return false,
        }
        true
    }

    fn set_number(&mut self, field: UnitField, value: f64) -> bool {
        match field {
            UnitField::UnitThreshold => self.draft.unit_threshold = value,
            UnitField::IothubTankHeight => self.draft.iothub.tank_height = Some(value),
            UnitField::IothubSensorHeight => self.draft.iothub.sensor_height = Some(value),
            UnitField::Height => match &mut self.draft.detail {
                CategoryDetail::Stock { height, .. } => *height = value,
                _ => return false,
            },
            UnitField::MaxCapacity => match &mut self.draft.detail {
                CategoryDetail::Stock { max_capacity, .. } => *max_capacity = value,
                _ => return false,
            },
            UnitField::FlowFactor => match &mut self.draft.detail {
                CategoryDetail::Energy { flow_factor, .. }
                | CategoryDetail::FlowLike { flow_factor } => *flow_factor = value,
                _ => return false,
            },
            _ => return false,
        }
        true
    }

    fn set_flag(&mut self, field: UnitField, value: bool) -> bool {
        match field {
            UnitField::IsDeployed => self.draft.is_deployed = value,
            UnitField::InterpolationDisabled => self.draft.interpolation_disabled = value,
            UnitField::AlertEnabled => self.draft.alert_enabled = value,
            _ => return false,
        }
        true
    }

    /// 改类别：扩展块整体换为新类别的空块，旧扩展数据丢弃。
    fn change_category(&mut self, wire_id: &str) -> bool {
        let Some(category) = StandardCategory::from_wire_id(wire_id) else {
            return false;
        };
        if category == self.draft.standard_category {
            return true;
        }
        self.draft.standard_category = category;
        self.draft.detail = CategoryDetail::default_for(category);
        self.draft.normalize();
        true
    }

    /// 加入一个水质参数，带默认配置。
    ///
    /// 非水质草稿、目录外键名、参数已存在均为静默 no-op。
    pub fn add_param(&mut self, key: &str) -> bool {
        if self.mode != FormMode::Edit || !self.scope.covers_structure() {
            return false;
        }
        let Some(param) = QualityParam::from_key(key) else {
            return false;
        };
        let Some(params) = self.draft.quality_params_mut() else {
            return false;
        };
        if params.contains_key(&param) {
            return false;
        }
        params.insert(param, QualitySettings::default());
        true
    }

    /// 移除一个水质参数：参数本身与其全部配置一并原子移除。
    pub fn remove_param(&mut self, key: &str) -> bool {
        if self.mode != FormMode::Edit || !self.scope.covers_structure() {
            return false;
        }
        let Some(param) = QualityParam::from_key(key) else {
            return false;
        };
        match self.draft.quality_params_mut() {
            Some(params) => params.remove(&param).is_some(),
            None => false,
        }
    }

    /// 写入已选参数的一个配置字段；参数未选中则 no-op。
    ///
    /// 参数级告警开关属描述性字段，受限档可写；其余参数字段
    /// 与类别扩展数值同档，仅完全访问档可写。
    pub fn set_param_field(&mut self, key: &str, field: QualityField, input: FieldInput) -> bool {
        if self.mode != FormMode::Edit {
            return false;
        }
        let allowed = match field {
            QualityField::AlertEnabled => self.scope != EditScope::ReadOnly,
            _ => self.scope.covers_structure(),
        };
        if !allowed {
            return false;
        }
        let Some(param) = QualityParam::from_key(key) else {
            return false;
        };
        let Some(params) = self.draft.quality_params_mut() else {
            return false;
        };
        let Some(settings) = params.get_mut(&param) else {
            return false;
        };
        match (field, input) {
            (QualityField::SiUnit, FieldInput::Text(value)) => settings.si_unit = value,
            (QualityField::LowThreshold, FieldInput::Text(value)) => {
                settings.low_threshold = coerce_number(&value)
            }
            (QualityField::HighThreshold, FieldInput::Text(value)) => {
                settings.high_threshold = coerce_number(&value)
            }
            (QualityField::Min, FieldInput::Text(value)) => settings.min = coerce_number(&value),
            (QualityField::Max, FieldInput::Text(value)) => settings.max = coerce_number(&value),
            (QualityField::AlertEnabled, FieldInput::Flag(value)) => {
                settings.alert_enabled = value
            }
            _ => return false,
        }
        true
    }

    /// 虚拟单元引用输入框缓冲。
    pub fn set_meta_unit_input(&mut self, value: impl Into<String>) {
        self.meta_unit_input = value.into();
    }

    /// 当前引用单元输入框内容。
    pub fn meta_unit_input(&self) -> &str {
        &self.meta_unit_input
    }

    /// 把输入框内容加入引用单元列表。
    ///
    /// 成功加入才清空输入框；重复 token 静默 no-op，输入框保留
    /// 原样，操作者自行修正。
    pub fn add_meta_unit(&mut self) -> bool {
        if self.mode != FormMode::Edit || !self.scope.covers_structure() {
            return false;
        }
        let token = self.meta_unit_input.trim().to_string();
        let Some(meta) = self.draft.virtual_meta_mut() else {
            return false;
        };
        if meta.push_unit(&token) {
            self.meta_unit_input.clear();
            return true;
        }
        false
    }

    /// 从引用单元列表移除一项。
    pub fn remove_meta_unit(&mut self, unit_id: &str) -> bool {
        if self.mode != FormMode::Edit || !self.scope.covers_structure() {
            return false;
        }
        match self.draft.virtual_meta_mut() {
            Some(meta) => {
                meta.remove_unit(unit_id);
                true
            }
            None => false,
        }
    }

    /// 虚拟子类别引用输入框缓冲。
    pub fn set_meta_sub_category_input(&mut self, value: impl Into<String>) {
        self.meta_sub_category_input = value.into();
    }

    /// 当前引用子类别输入框内容。
    pub fn meta_sub_category_input(&self) -> &str {
        &self.meta_sub_category_input
    }

    /// 把输入框内容加入引用子类别列表，规则同 [`Self::add_meta_unit`]。
    pub fn add_meta_sub_category(&mut self) -> bool {
        if self.mode != FormMode::Edit || !self.scope.covers_structure() {
            return false;
        }
        let token = self.meta_sub_category_input.trim().to_string();
        let Some(meta) = self.draft.virtual_meta_mut() else {
            return false;
        };
        if meta.push_sub_category(&token) {
            self.meta_sub_category_input.clear();
            return true;
        }
        false
    }

    /// 从引用子类别列表移除一项。
    pub fn remove_meta_sub_category(&mut self, sub_category_id: &str) -> bool {
        if self.mode != FormMode::Edit || !self.scope.covers_structure() {
            return false;
        }
        match self.draft.virtual_meta_mut() {
            Some(meta) => {
                meta.remove_sub_category(sub_category_id);
                true
            }
            None => false,
        }
    }

    /// 提交整份草稿。
    ///
    /// 返回 Ok(false) 表示本次被忽略：非编辑模式，或同一表单
    /// 实例已有提交在途。成功后回到 VIEW，由调用方重取快照刷新
    /// 列表；失败时草稿原样保留、停留在 EDIT，可直接重试。
    pub async fn submit(
        &mut self,
        ctx: &ViewerContext,
        industry_id: &str,
        client: &dyn UnitApi,
    ) -> Result<bool, BackendError> {
        if self.mode != FormMode::Edit {
            return Ok(false);
        }
        if self.submitting {
            tracing::debug!(unit_id = %self.draft.unit_id, "submit ignored: already in flight");
            return Ok(false);
        }
        self.submitting = true;
        let result = client.update_unit(ctx, industry_id, &self.draft).await;
        self.submitting = false;
        match result {
            Ok(()) => {
                self.mode = FormMode::View;
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(unit_id = %self.draft.unit_id, error = %err, "unit submit failed");
                Err(err)
            }
        }
    }
}
