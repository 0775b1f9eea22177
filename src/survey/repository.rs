use crate::geometry::CameraPosition;
use crate::survey::Survey;
use dashmap::DashMap;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

/// Lookup of the last camera position saved for a survey
pub trait CameraPositionStore: Send + Sync {
    fn last_camera_position(&self, survey_id: &str) -> Option<CameraPosition>;
}

/// Holds the active survey and per-survey camera positions
///
/// The active survey is a state slot: new observers immediately see the
/// current value. Every change is also published in order on a broadcast
/// channel so back-to-back changes are not collapsed.
pub struct SurveyRepository {
    active_tx: watch::Sender<Option<Survey>>,

    /// Every active-survey change, in order
    changes_tx: broadcast::Sender<Option<Survey>>,

    /// Last camera position per survey id
    camera_positions: DashMap<String, CameraPosition>,
}

impl SurveyRepository {
    pub fn new() -> Self {
        let (active_tx, _) = watch::channel(None);
        let (changes_tx, _) = broadcast::channel(64);
        Self {
            active_tx,
            changes_tx,
            camera_positions: DashMap::new(),
        }
    }

    /// Make `survey` the active survey
    pub fn activate_survey(&self, survey: Survey) {
        info!(survey_id = %survey.id, "Survey activated");
        self.publish(Some(survey));
    }

    pub fn clear_active_survey(&self) {
        info!("Active survey cleared");
        self.publish(None);
    }

    fn publish(&self, survey: Option<Survey>) {
        self.active_tx.send_replace(survey.clone());
        // No subscribers is fine
        let _ = self.changes_tx.send(survey);
    }

    pub fn active_survey(&self) -> Option<Survey> {
        self.active_tx.borrow().clone()
    }

    pub fn subscribe_active_survey(&self) -> watch::Receiver<Option<Survey>> {
        self.active_tx.subscribe()
    }

    /// Every change from now on, including repeated changes between polls
    pub fn subscribe_survey_changes(&self) -> broadcast::Receiver<Option<Survey>> {
        self.changes_tx.subscribe()
    }

    /// Remember where the camera was for `survey_id`
    pub fn set_camera_position(&self, survey_id: &str, position: CameraPosition) {
        debug!(survey_id = %survey_id, target = %position.target, "Saving camera position");
        self.camera_positions.insert(survey_id.to_string(), position);
    }

    pub fn last_camera_position(&self, survey_id: &str) -> Option<CameraPosition> {
        self.camera_positions.get(survey_id).map(|p| *p)
    }
}

impl CameraPositionStore for SurveyRepository {
    fn last_camera_position(&self, survey_id: &str) -> Option<CameraPosition> {
        SurveyRepository::last_camera_position(self, survey_id)
    }
}

impl Default for SurveyRepository {
    fn default() -> Self {
        Self::new()
    }
}
