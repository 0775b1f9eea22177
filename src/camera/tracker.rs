use crate::camera::CameraUpdate;
use crate::geometry::Point;

/// Where a location-following camera is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackingState {
    /// No fix seen yet
    AwaitingFirst,
    /// First fix handled; only pan from now on
    Tracking,
}

/// Turns location fixes into camera updates.
///
/// The first fix brings the user to their location at a sensible zoom;
/// every later fix only pans so a zoom chosen by the user is kept.
#[derive(Clone, Debug)]
pub struct LocationTracker {
    state: TrackingState,
}

impl LocationTracker {
    pub fn new() -> Self {
        Self {
            state: TrackingState::AwaitingFirst,
        }
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn next(&mut self, point: Point) -> CameraUpdate {
        match self.state {
            TrackingState::AwaitingFirst => {
                self.state = TrackingState::Tracking;
                CameraUpdate::pan_and_zoom_in(point)
            }
            TrackingState::Tracking => CameraUpdate::pan(point),
        }
    }
}

impl Default for LocationTracker {
    fn default() -> Self {
        Self::new()
    }
}
