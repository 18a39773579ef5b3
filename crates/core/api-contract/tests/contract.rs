use api_contract::{AlertEnabledDto, UnitDto, extract_error_message};
use domain::quality::{QualityParam, QualitySettings};
use domain::{CategoryDetail, StandardCategory, Unit};

fn stock_unit() -> Unit {
    let mut unit = Unit::new("u-stock", StandardCategory::Stock);
    unit.unit_name = "Tank A".to_string();
    unit.detail = CategoryDetail::Stock {
        height: 5.0,
        max_capacity: 100.0,
    };
    unit.iothub.tank_height = Some(5.2);
    unit.iothub.sensor_height = Some(0.3);
    unit
}

#[test]
fn stock_payload_carries_only_stock_extension() {
    let value = serde_json::to_value(UnitDto::from_unit(&stock_unit())).expect("serialize");
    assert_eq!(value["standardCategoryId"], "STOCK_CATEGORY");
    assert_eq!(value["height"], 5.0);
    assert_eq!(value["maxCapacity"], 100.0);
    assert!(value.get("unitType").is_none());
    assert!(value.get("flowFactor").is_none());
    assert!(value.get("meta").is_none());
    assert!(value.get("params").is_none());
    assert_eq!(value["iothubConfig"]["tankHeight"], 5.2);
}

#[test]
fn energy_payload_has_unit_type_and_flow_factor_but_no_tank_fields() {
    let mut unit = Unit::new("u-energy", StandardCategory::Energy);
    unit.detail = CategoryDetail::Energy {
        unit_type: "3-phase".to_string(),
        flow_factor: 1.5,
    };
    let value = serde_json::to_value(UnitDto::from_unit(&unit)).expect("serialize");
    assert_eq!(value["unitType"], "3-phase");
    assert_eq!(value["flowFactor"], 1.5);
    assert!(value.get("height").is_none());
    assert!(value["iothubConfig"].get("tankHeight").is_none());
    assert_eq!(value["alertEnabled"], true);
}

#[test]
fn quality_payload_projects_parallel_maps_with_identical_keys() {
    let mut unit = Unit::new("u-quality", StandardCategory::Quality);
    let params = unit.quality_params_mut().expect("quality detail");
    params.insert(QualityParam::Ph, QualitySettings::default());
    params.insert(
        QualityParam::Turbidity,
        QualitySettings {
            si_unit: "NTU".to_string(),
            alert_enabled: true,
            ..QualitySettings::default()
        },
    );

    let value = serde_json::to_value(UnitDto::from_unit(&unit)).expect("serialize");
    let keys: Vec<&str> = value["params"]
        .as_array()
        .expect("params")
        .iter()
        .map(|item| item.as_str().expect("key"))
        .collect();
    assert_eq!(keys.len(), 2);
    for map_name in ["siUnit", "lowThreshold", "highThreshold", "min", "max", "alertEnabled"] {
        let map = value[map_name].as_object().unwrap_or_else(|| {
            panic!("{map_name} should be an object");
        });
        let mut map_keys: Vec<&str> = map.keys().map(String::as_str).collect();
        map_keys.sort_unstable();
        let mut expected = keys.clone();
        expected.sort_unstable();
        assert_eq!(map_keys, expected, "{map_name}");
    }
    assert_eq!(value["alertEnabled"]["Turbidity"], true);
}

#[test]
fn round_trip_rebuilds_quality_settings_from_params_list() {
    let mut unit = Unit::new("u-quality", StandardCategory::Quality);
    unit.quality_params_mut().expect("quality detail").insert(
        QualityParam::Ph,
        QualitySettings {
            si_unit: "pH".to_string(),
            low_threshold: 6.5,
            high_threshold: 8.5,
            min: 0.0,
            max: 14.0,
            alert_enabled: true,
        },
    );
    let dto = UnitDto::from_unit(&unit);
    let rebuilt = dto.into_unit().expect("into_unit");
    assert_eq!(rebuilt.quality_params(), unit.quality_params());
}

#[test]
fn unknown_category_id_is_rejected() {
    let mut dto = UnitDto::from_unit(&stock_unit());
    dto.standard_category_id = "BOREWELL".to_string();
    assert!(dto.into_unit().is_err());
}

#[test]
fn desynced_wire_maps_fall_back_to_defaults() {
    // params 列出了 pH，但五张映射里只有部分键：缺失项取默认配置。
    let mut dto = UnitDto::from_unit(&Unit::new("u-q", StandardCategory::Quality));
    dto.params = Some(vec!["pH".to_string(), "Chlorine".to_string()]);
    dto.si_unit = None;
    let unit = dto.into_unit().expect("into_unit");
    let params = unit.quality_params().expect("quality detail");
    // 目录之外的键被丢弃。
    assert_eq!(params.len(), 1);
    let settings = params.get(&QualityParam::Ph).expect("pH entry");
    assert_eq!(settings.high_threshold, 100.0);
    assert_eq!(settings.max, 1000.0);
    assert!(!settings.alert_enabled);
}

#[test]
fn alert_enabled_deserializes_both_shapes() {
    let flag: AlertEnabledDto = serde_json::from_value(serde_json::json!(true)).expect("flag");
    assert_eq!(flag, AlertEnabledDto::Flag(true));
    let map: AlertEnabledDto =
        serde_json::from_value(serde_json::json!({ "pH": false })).expect("map");
    assert!(matches!(map, AlertEnabledDto::PerParam(_)));
}

#[test]
fn error_message_extraction_is_best_effort() {
    let body = serde_json::json!({ "message": "unit name exists" });
    assert_eq!(
        extract_error_message(&body).as_deref(),
        Some("unit name exists")
    );
    assert_eq!(extract_error_message(&serde_json::json!({})), None);
    assert_eq!(extract_error_message(&serde_json::json!({ "message": "" })), None);
}
