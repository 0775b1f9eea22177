// Device location fixes and their hot broadcast source

use crate::geometry::Point;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// A raw location fix as reported by the device
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,

    /// Horizontal accuracy radius in meters, if the provider reports one
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub accuracy_meters: Option<f64>,

    pub recorded_at: DateTime<Utc>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_accuracy(mut self, accuracy_meters: f64) -> Self {
        self.accuracy_meters = Some(accuracy_meters);
        self
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// Hot stream of location fixes
///
/// Fixes published while nobody listens are dropped. Subscribers only see
/// fixes published after they subscribed.
pub struct LocationSource {
    location_tx: broadcast::Sender<Location>,
}

impl LocationSource {
    pub fn new(capacity: usize) -> Self {
        let (location_tx, _) = broadcast::channel(capacity.max(1));
        Self { location_tx }
    }

    /// Publish a fix to every current subscriber
    pub fn publish(&self, location: Location) {
        debug!(
            latitude = location.latitude,
            longitude = location.longitude,
            "Location update"
        );
        // No subscribers is fine
        let _ = self.location_tx.send(location);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Location> {
        self.location_tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.location_tx.receiver_count()
    }
}

impl Default for LocationSource {
    fn default() -> Self {
        Self::new(crate::config::default_location_buffer())
    }
}
