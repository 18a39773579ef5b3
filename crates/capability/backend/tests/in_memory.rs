use api_contract::BulkUnitCount;
use console_backend::{
    AssignmentApi, BackendError, InMemoryBackend, SnapshotApi, TelemetrySelector, UnitApi,
    UnitMetaApi, UnitMetaRecord, UserApi,
};
use domain::{StandardCategory, Unit, ViewerContext};

fn admin_ctx() -> ViewerContext {
    ViewerContext::new("root", "ADMIN", vec!["SUPER_USER".to_string()])
}

#[tokio::test]
async fn demo_snapshot_contains_seeded_records() {
    let backend = InMemoryBackend::with_demo_industry();
    let snapshot = backend
        .fetch_industry_snapshot(&admin_ctx(), "industry-1")
        .await
        .expect("snapshot");
    assert_eq!(snapshot.industry.industry_name, "Demo Waterworks");
    assert_eq!(snapshot.units.len(), 3);
    assert_eq!(snapshot.categories.len(), 1);
    assert_eq!(snapshot.categories[0].sub_categories.len(), 2);
}

#[tokio::test]
async fn empty_viewer_is_rejected_before_dispatch() {
    let backend = InMemoryBackend::with_demo_industry();
    let err = backend
        .fetch_industry_snapshot(&ViewerContext::default(), "industry-1")
        .await
        .expect_err("anonymous viewer");
    assert!(matches!(err, BackendError::Validation(_)));
}

#[tokio::test]
async fn bulk_create_generates_units_per_category_count() {
    let backend = InMemoryBackend::with_demo_industry();
    let created = backend
        .create_units_bulk(
            &admin_ctx(),
            "industry-1",
            vec![
                BulkUnitCount {
                    standard_category_id: "ENERGY_CATEGORY".to_string(),
                    count: 2,
                },
                BulkUnitCount {
                    standard_category_id: "QUALITY_CATEGORY".to_string(),
                    count: 1,
                },
            ],
        )
        .await
        .expect("bulk create");
    assert_eq!(created.len(), 3);
    assert_eq!(created[0].standard_category, StandardCategory::Energy);
    assert_eq!(created[2].standard_category, StandardCategory::Quality);

    let snapshot = backend
        .fetch_industry_snapshot(&admin_ctx(), "industry-1")
        .await
        .expect("snapshot");
    assert_eq!(snapshot.units.len(), 6);
}

#[tokio::test]
async fn bulk_create_rejects_unknown_category_id() {
    let backend = InMemoryBackend::with_demo_industry();
    let err = backend
        .create_units_bulk(
            &admin_ctx(),
            "industry-1",
            vec![BulkUnitCount {
                standard_category_id: "BOREWELL".to_string(),
                count: 1,
            }],
        )
        .await
        .expect_err("unknown category");
    assert!(matches!(err, BackendError::Validation(_)));
}

#[tokio::test]
async fn update_unit_replaces_whole_record() {
    let backend = InMemoryBackend::with_demo_industry();
    let mut unit = Unit::new("unit-1", StandardCategory::Source);
    unit.unit_name = "Borewell Pump 1 (renamed)".to_string();
    backend
        .update_unit(&admin_ctx(), "industry-1", &unit)
        .await
        .expect("update");

    let snapshot = backend
        .fetch_industry_snapshot(&admin_ctx(), "industry-1")
        .await
        .expect("snapshot");
    let stored = snapshot
        .units
        .iter()
        .find(|item| item.unit_id == "unit-1")
        .expect("unit-1");
    assert_eq!(stored.unit_name, "Borewell Pump 1 (renamed)");

    let missing = Unit::new("unit-404", StandardCategory::Source);
    let err = backend
        .update_unit(&admin_ctx(), "industry-1", &missing)
        .await
        .expect_err("unknown unit");
    assert!(matches!(err, BackendError::Rejected { status: 404, .. }));
}

#[tokio::test]
async fn replace_assignment_is_full_set_semantics() {
    let backend = InMemoryBackend::with_demo_industry();
    // sub-1 原本含 unit-1；全量替换后旧成员不保留。
    backend
        .replace_assignment(
            &admin_ctx(),
            "industry-1",
            "cat-1",
            "sub-1",
            vec!["unit-3".to_string()],
        )
        .await
        .expect("replace");

    let snapshot = backend
        .fetch_industry_snapshot(&admin_ctx(), "industry-1")
        .await
        .expect("snapshot");
    let sub = &snapshot.categories[0].sub_categories[0];
    assert!(!sub.unit_ids.contains("unit-1"));
    assert!(sub.unit_ids.contains("unit-3"));
}

#[tokio::test]
async fn replace_permissions_is_full_set_semantics() {
    let backend = InMemoryBackend::with_demo_industry();
    let updated = backend
        .replace_permissions(&admin_ctx(), "user-1", vec!["ADMIN".to_string()])
        .await
        .expect("replace");
    assert_eq!(updated.permissions, vec!["ADMIN".to_string()]);

    let users = backend
        .fetch_users(&admin_ctx(), "industry-1")
        .await
        .expect("users");
    assert_eq!(users[0].permissions, vec!["ADMIN".to_string()]);
}

#[tokio::test]
async fn telemetry_selector_filters_latest_points() {
    let backend = InMemoryBackend::with_demo_industry();
    let one = backend
        .fetch_latest_telemetry(&admin_ctx(), TelemetrySelector::One("unit-1".to_string()))
        .await
        .expect("one");
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].value, 12.5);

    let missing = backend
        .fetch_latest_telemetry(&admin_ctx(), TelemetrySelector::One("unit-404".to_string()))
        .await
        .expect("missing");
    assert!(missing.is_empty());

    let all = backend
        .fetch_latest_telemetry(&admin_ctx(), TelemetrySelector::All)
        .await
        .expect("all");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn unit_meta_upsert_keeps_image_filename() {
    let backend = InMemoryBackend::with_demo_industry();
    let record = UnitMetaRecord {
        unit_id: "unit-1".to_string(),
        make: "Grundfos".to_string(),
        model: "SP-5A".to_string(),
        ..UnitMetaRecord::default()
    };
    let stored = backend
        .upsert_unit_meta(
            &admin_ctx(),
            record,
            Some(console_backend::ImageAttachment {
                filename: "pump.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: vec![0xff, 0xd8],
            }),
        )
        .await
        .expect("upsert");
    assert_eq!(stored.image_filename.as_deref(), Some("pump.jpg"));

    let fetched = backend
        .fetch_unit_meta(&admin_ctx(), "unit-1")
        .await
        .expect("fetch")
        .expect("record");
    assert_eq!(fetched.make, "Grundfos");
}
