use crate::camera::CameraUpdateBroker;
use crate::datacollection::{LocationTaskData, TaskResponse};
use crate::feature::Feature;
use crate::geometry::CameraPosition;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Records the answer to a drop-a-pin task
///
/// Each recorded position replaces the published pin: observers of
/// `subscribe_features` always see at most one feature.
pub struct PinResponseRecorder {
    task_id: String,
    response_tx: watch::Sender<Option<TaskResponse>>,
    features_tx: watch::Sender<HashSet<Feature>>,
    broker: Arc<CameraUpdateBroker>,
}

impl PinResponseRecorder {
    pub fn new(task_id: impl Into<String>, broker: Arc<CameraUpdateBroker>) -> Self {
        let (response_tx, _) = watch::channel(None);
        let (features_tx, _) = watch::channel(HashSet::new());

        Self {
            task_id: task_id.into(),
            response_tx,
            features_tx,
            broker,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Record `position` as the answer and publish a pin at its target
    pub fn record_position(&self, position: CameraPosition) {
        let feature = Feature::user_point(position.target);
        debug!(
            task_id = %self.task_id,
            feature_id = %feature.id,
            target = %position.target,
            "Pin dropped"
        );

        self.response_tx
            .send_replace(Some(TaskResponse::Location(LocationTaskData::new(position))));
        self.features_tx.send_replace(HashSet::from([feature]));
    }

    /// Forget the answer and remove the pin
    pub fn clear_response(&self) {
        info!(task_id = %self.task_id, "Response cleared");
        self.response_tx.send_replace(None);
        self.features_tx.send_replace(HashSet::new());
    }

    pub fn response(&self) -> Option<TaskResponse> {
        self.response_tx.borrow().clone()
    }

    pub fn subscribe_response(&self) -> watch::Receiver<Option<TaskResponse>> {
        self.response_tx.subscribe()
    }

    /// Currently published pin set (empty or one feature)
    pub fn features(&self) -> HashSet<Feature> {
        self.features_tx.borrow().clone()
    }

    pub fn subscribe_features(&self) -> watch::Receiver<HashSet<Feature>> {
        self.features_tx.subscribe()
    }

    /// Ask the map to pan and zoom in to the current pin.
    ///
    /// Returns false when no pin has been dropped.
    pub fn center_on_pin(&self) -> bool {
        let target = self
            .features_tx
            .borrow()
            .iter()
            .find_map(|f| f.geometry.as_point().copied());

        match target {
            Some(point) => {
                self.broker.request_pan_and_zoom_in(point);
                true
            }
            None => false,
        }
    }
}
