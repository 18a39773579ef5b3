use api_contract::BulkUnitCount;
use async_trait::async_trait;
use console_backend::{BackendError, InMemoryBackend, SnapshotApi, UnitApi};
use console_forms::{FieldInput, FormMode, UnitFormController};
use domain::quality::QualityField;
use domain::schema::UnitField;
use domain::{CategoryDetail, StandardCategory, Unit, ViewerContext};

fn full_viewer() -> ViewerContext {
    ViewerContext::new("root", "ADMIN", vec!["SUPER_USER".to_string()])
}

fn limited_viewer() -> ViewerContext {
    ViewerContext::new("operator", "industry-1", vec!["USER".to_string()])
}

fn none_viewer() -> ViewerContext {
    ViewerContext::new("guest", "industry-1", Vec::new())
}

fn text(value: &str) -> FieldInput {
    FieldInput::Text(value.to_string())
}

/// 始终失败的单元写接口，用于验证失败路径保留草稿。
struct FailingUnitApi;

#[async_trait]
impl UnitApi for FailingUnitApi {
    async fn create_units_bulk(
        &self,
        _ctx: &ViewerContext,
        _industry_id: &str,
        _counts: Vec<BulkUnitCount>,
    ) -> Result<Vec<Unit>, BackendError> {
        Err(BackendError::Connection("unreachable".to_string()))
    }

    async fn update_unit(
        &self,
        _ctx: &ViewerContext,
        _industry_id: &str,
        _unit: &Unit,
    ) -> Result<(), BackendError> {
        Err(BackendError::Connection("unreachable".to_string()))
    }
}

#[test]
fn none_tier_is_permanently_read_only() {
    let unit = Unit::new("u-1", StandardCategory::Source);
    let mut form = UnitFormController::load(unit, &none_viewer());

    assert!(!form.begin_edit());
    assert_eq!(form.mode(), FormMode::View);
    assert!(!form.set_field(UnitField::UnitName, text("renamed")));
    assert_eq!(form.draft().unit_name, "");
}

#[test]
fn limited_tier_category_write_is_silent_noop() {
    let unit = Unit::new("u-1", StandardCategory::Source);
    let mut form = UnitFormController::load(unit, &limited_viewer());
    assert!(form.begin_edit());

    assert!(!form.set_field(UnitField::StandardCategory, text("ENERGY_CATEGORY")));
    assert_eq!(form.draft().standard_category, StandardCategory::Source);
    assert!(!form.set_field(UnitField::IothubDeviceId, text("dev-7")));
    assert_eq!(form.draft().iothub.device_id, "");
}

#[test]
fn limited_tier_edits_descriptive_fields() {
    let unit = Unit::new("u-1", StandardCategory::Source);
    let mut form = UnitFormController::load(unit, &limited_viewer());
    assert!(form.begin_edit());

    assert!(form.set_field(UnitField::UnitName, text("Borewell 2")));
    assert!(form.set_field(UnitField::UnitThreshold, text("42.5")));
    assert!(form.set_field(UnitField::AlertEnabled, FieldInput::Flag(false)));
    assert!(form.set_field(UnitField::InterpolationDisabled, FieldInput::Flag(true)));

    assert_eq!(form.draft().unit_name, "Borewell 2");
    assert_eq!(form.draft().unit_threshold, 42.5);
    assert!(!form.draft().alert_enabled);
    assert!(form.draft().interpolation_disabled);
}

#[test]
fn numeric_text_coerces_unparseable_input_to_zero() {
    let unit = Unit::new("u-1", StandardCategory::Source);
    let mut form = UnitFormController::load(unit, &full_viewer());
    assert!(form.begin_edit());

    assert!(form.set_field(UnitField::UnitThreshold, text("12.5")));
    assert_eq!(form.draft().unit_threshold, 12.5);
    assert!(form.set_field(UnitField::UnitThreshold, text("abc")));
    assert_eq!(form.draft().unit_threshold, 0.0);
}

#[test]
fn unit_type_is_display_only() {
    let unit = Unit::new("u-1", StandardCategory::Energy);
    let mut form = UnitFormController::load(unit, &full_viewer());
    assert!(form.begin_edit());

    assert!(!form.field_enabled(UnitField::UnitType));
    assert!(!form.set_field(UnitField::UnitType, text("kWh")));
}

#[test]
fn category_change_swaps_extension_block() {
    let mut unit = Unit::new("u-1", StandardCategory::Stock);
    unit.detail = CategoryDetail::Stock {
        height: 3.0,
        max_capacity: 5000.0,
    };
    unit.iothub.tank_height = Some(3.2);
    let mut form = UnitFormController::load(unit, &full_viewer());
    assert!(form.begin_edit());

    assert!(form.set_field(UnitField::StandardCategory, text("ENERGY_CATEGORY")));
    assert_eq!(form.draft().standard_category, StandardCategory::Energy);
    assert_eq!(
        form.draft().detail,
        CategoryDetail::Energy {
            unit_type: "".to_string(),
            flow_factor: 0.0
        }
    );
    assert_eq!(form.draft().iothub.tank_height, None);

    // 线上目录之外的类别标识被拒绝，草稿不变。
    assert!(!form.set_field(UnitField::StandardCategory, text("NOT_A_CATEGORY")));
    assert_eq!(form.draft().standard_category, StandardCategory::Energy);
}

#[test]
fn stock_fields_rejected_outside_stock_category() {
    let unit = Unit::new("u-1", StandardCategory::Source);
    let mut form = UnitFormController::load(unit, &full_viewer());
    assert!(form.begin_edit());

    assert!(!form.set_field(UnitField::Height, text("2.5")));
    assert!(!form.set_field(UnitField::MaxCapacity, text("100")));
    assert!(!form.set_field(UnitField::IothubTankHeight, text("2.5")));
    assert!(form.set_field(UnitField::FlowFactor, text("1.5")));
}

#[test]
fn quality_param_add_defaults_and_atomic_remove() {
    let unit = Unit::new("u-1", StandardCategory::Quality);
    let mut form = UnitFormController::load(unit, &full_viewer());
    assert!(form.begin_edit());

    assert!(form.add_param("pH"));
    let settings = form.draft().quality_params().unwrap();
    let entry = settings.values().next().unwrap();
    assert_eq!(entry.si_unit, "");
    assert_eq!(entry.low_threshold, 0.0);
    assert_eq!(entry.high_threshold, 100.0);
    assert_eq!(entry.min, 0.0);
    assert_eq!(entry.max, 1000.0);
    assert!(!entry.alert_enabled);

    // 重复加入与目录外键名均为 no-op。
    assert!(!form.add_param("pH"));
    assert!(!form.add_param("Chlorine"));

    assert!(form.set_param_field("pH", QualityField::LowThreshold, text("6.5")));
    assert!(form.set_param_field("pH", QualityField::AlertEnabled, FieldInput::Flag(true)));

    assert!(form.remove_param("pH"));
    assert!(form.draft().quality_params().unwrap().is_empty());
    // 未选中参数的字段写入是 no-op。
    assert!(!form.set_param_field("pH", QualityField::Min, text("1")));
}

#[test]
fn whole_unit_alert_flag_not_applicable_to_quality() {
    let unit = Unit::new("u-1", StandardCategory::Quality);
    let mut form = UnitFormController::load(unit, &full_viewer());
    assert!(form.begin_edit());

    assert!(!form.set_field(UnitField::AlertEnabled, FieldInput::Flag(true)));
}

#[test]
fn limited_tier_toggles_param_alert_but_not_thresholds() {
    let mut unit = Unit::new("u-1", StandardCategory::Quality);
    {
        let mut seeded = UnitFormController::load(unit.clone(), &full_viewer());
        seeded.begin_edit();
        seeded.add_param("TDS");
        unit = seeded.draft().clone();
    }
    let mut form = UnitFormController::load(unit, &limited_viewer());
    assert!(form.begin_edit());

    assert!(form.set_param_field("TDS", QualityField::AlertEnabled, FieldInput::Flag(true)));
    assert!(!form.set_param_field("TDS", QualityField::HighThreshold, text("250")));
    assert!(!form.add_param("pH"));
    assert!(!form.remove_param("TDS"));
}

#[test]
fn virtual_meta_buffer_clears_only_on_successful_add() {
    let unit = Unit::new("u-1", StandardCategory::Virtual);
    let mut form = UnitFormController::load(unit, &full_viewer());
    assert!(form.begin_edit());

    form.set_meta_unit_input("unit-9");
    assert!(form.add_meta_unit());
    assert_eq!(form.meta_unit_input(), "");
    assert_eq!(form.draft().virtual_meta().unwrap().units, vec!["unit-9"]);

    // 重复 token 拒绝入列，输入框保留待修正。
    form.set_meta_unit_input("unit-9");
    assert!(!form.add_meta_unit());
    assert_eq!(form.meta_unit_input(), "unit-9");

    // 空白输入同样拒绝。
    form.set_meta_unit_input("   ");
    assert!(!form.add_meta_unit());

    form.set_meta_sub_category_input("sub-2");
    assert!(form.add_meta_sub_category());
    assert!(form.remove_meta_sub_category("sub-2"));
    assert!(
        form.draft()
            .virtual_meta()
            .unwrap()
            .sub_categories
            .is_empty()
    );

    assert!(form.remove_meta_unit("unit-9"));
    assert!(form.draft().virtual_meta().unwrap().units.is_empty());
}

#[tokio::test]
async fn submit_persists_draft_and_returns_to_view() {
    let backend = InMemoryBackend::with_demo_industry();
    let ctx = full_viewer();
    let snapshot = backend
        .fetch_industry_snapshot(&ctx, "industry-1")
        .await
        .expect("snapshot");
    let unit = snapshot
        .units
        .iter()
        .find(|unit| unit.unit_id == "unit-2")
        .expect("unit-2")
        .clone();

    let mut form = UnitFormController::load(unit, &ctx);
    assert!(form.begin_edit());
    assert!(form.set_field(UnitField::UnitName, text("Overhead Tank A")));
    assert!(form.set_field(UnitField::Height, text("4.2")));

    let submitted = form
        .submit(&ctx, "industry-1", &backend as &dyn UnitApi)
        .await
        .expect("submit");
    assert!(submitted);
    assert_eq!(form.mode(), FormMode::View);

    // 成功后再次提交是 no-op（已回到 VIEW）。
    let again = form
        .submit(&ctx, "industry-1", &backend as &dyn UnitApi)
        .await
        .expect("submit");
    assert!(!again);

    let refreshed = backend
        .fetch_industry_snapshot(&ctx, "industry-1")
        .await
        .expect("snapshot");
    let stored = refreshed
        .units
        .iter()
        .find(|unit| unit.unit_id == "unit-2")
        .expect("unit-2");
    assert_eq!(stored.unit_name, "Overhead Tank A");
    assert_eq!(
        stored.detail,
        CategoryDetail::Stock {
            height: 4.2,
            max_capacity: 0.0
        }
    );
}

#[tokio::test]
async fn failed_submit_preserves_draft_in_edit_mode() {
    let unit = Unit::new("u-1", StandardCategory::Source);
    let ctx = full_viewer();
    let mut form = UnitFormController::load(unit, &ctx);
    assert!(form.begin_edit());
    assert!(form.set_field(UnitField::UnitName, text("Pump 9")));

    let result = form.submit(&ctx, "industry-1", &FailingUnitApi).await;
    assert!(matches!(result, Err(BackendError::Connection(_))));
    assert_eq!(form.mode(), FormMode::Edit);
    assert_eq!(form.draft().unit_name, "Pump 9");
    assert!(!form.is_submitting());
}
