use super::*;
use chrono::TimeZone;

fn user() -> User {
    User {
        id: "user_1".to_string(),
        email: "surveyor@example.com".to_string(),
        display_name: "Surveyor".to_string(),
    }
}

fn mutation(mutation_type: MutationType) -> LoiMutation {
    LoiMutation {
        loi_id: "loi_1".to_string(),
        survey_id: "survey_1".to_string(),
        job_id: "job_1".to_string(),
        mutation_type,
        location: Some(Point::new(-122.084, 37.422)),
        polygon_vertices: Vec::new(),
        client_timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_create_sets_created_and_last_modified() {
    let map = mutation(MutationType::Create).to_storage_map(&user()).unwrap();

    assert_eq!(map[JOB_ID], json!("job_1"));
    assert_eq!(map[LOCATION], json!({"latitude": 37.422, "longitude": -122.084}));
    assert_eq!(map[CREATED], map[LAST_MODIFIED]);
    assert_eq!(map[CREATED]["user"]["displayName"], json!("Surveyor"));
    assert_eq!(map[CREATED]["clientTimestamp"], json!("2024-05-01T12:00:00Z"));
}

#[test]
fn test_update_sets_only_last_modified() {
    let map = mutation(MutationType::Update).to_storage_map(&user()).unwrap();

    assert!(map.get(CREATED).is_none());
    assert_eq!(map[LAST_MODIFIED]["user"]["id"], json!("user_1"));
}

#[test]
fn test_polygon_geometry_is_always_written() {
    let mut polygon = mutation(MutationType::Create);
    polygon.location = None;
    polygon.polygon_vertices = vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)];

    let map = polygon.to_storage_map(&user()).unwrap();

    assert!(map.get(LOCATION).is_none());
    assert_eq!(
        map[GEOMETRY],
        json!({
            "type": "Polygon",
            "coordinates": [
                {"latitude": 2.0, "longitude": 1.0},
                {"latitude": 4.0, "longitude": 3.0},
            ],
        })
    );
}

#[test]
fn test_delete_and_unknown_are_rejected() {
    for mutation_type in [MutationType::Delete, MutationType::Unknown] {
        let err = mutation(mutation_type).to_storage_map(&user()).unwrap_err();
        assert_eq!(err, MutationError::UnsupportedType(mutation_type));
    }
    assert_eq!(
        MutationError::UnsupportedType(MutationType::Delete).to_string(),
        "unsupported mutation type Delete"
    );
}

#[test]
fn test_to_feature_prefers_point_location() {
    let feature = mutation(MutationType::Create).to_feature();
    assert_eq!(feature.id, "loi_1");
    assert_eq!(feature.feature_type, FeatureType::LocationOfInterest);
    assert_eq!(feature.geometry.as_point(), Some(&Point::new(-122.084, 37.422)));

    let mut polygon = mutation(MutationType::Create);
    polygon.location = None;
    polygon.polygon_vertices = vec![Point::new(1.0, 2.0)];
    assert_eq!(
        polygon.to_feature().geometry,
        Geometry::Polygon {
            vertices: vec![Point::new(1.0, 2.0)]
        }
    );
}
