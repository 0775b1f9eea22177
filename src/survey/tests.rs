use super::*;
use crate::geometry::{CameraPosition, Point};

#[test]
fn test_no_active_survey_initially() {
    let repository = SurveyRepository::new();
    assert!(repository.active_survey().is_none());
}

#[test]
fn test_activate_and_clear_survey() {
    let repository = SurveyRepository::new();
    let mut rx = repository.subscribe_active_survey();

    repository.activate_survey(Survey::new("survey_1", "Tree census"));
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().as_ref().unwrap().id, "survey_1");

    repository.clear_active_survey();
    assert!(repository.active_survey().is_none());
    assert!(rx.borrow_and_update().is_none());
}

#[test]
fn test_camera_positions_are_per_survey() {
    let repository = SurveyRepository::new();
    let position = CameraPosition::new(Point::new(8.5, 47.3), 12.0);

    repository.set_camera_position("survey_1", position);

    assert_eq!(repository.last_camera_position("survey_1"), Some(position));
    assert_eq!(repository.last_camera_position("survey_2"), None);
}

#[test]
fn test_camera_position_overwritten() {
    let repository = SurveyRepository::new();
    repository.set_camera_position("survey_1", CameraPosition::new(Point::new(1.0, 1.0), 5.0));
    let latest = CameraPosition::new(Point::new(2.0, 2.0), 9.0);
    repository.set_camera_position("survey_1", latest);

    let store: &dyn CameraPositionStore = &repository;
    assert_eq!(store.last_camera_position("survey_1"), Some(latest));
}

#[test]
fn test_back_to_back_changes_are_all_published() {
    let repository = SurveyRepository::new();
    let mut changes = repository.subscribe_survey_changes();

    repository.activate_survey(Survey::new("survey_1", "Trees"));
    repository.activate_survey(Survey::new("survey_2", "Wells"));
    repository.clear_active_survey();

    assert_eq!(changes.try_recv().unwrap().unwrap().id, "survey_1");
    assert_eq!(changes.try_recv().unwrap().unwrap().id, "survey_2");
    assert!(changes.try_recv().unwrap().is_none());
    assert!(changes.try_recv().is_err());
    assert_eq!(repository.active_survey(), None);
}
