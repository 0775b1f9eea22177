use crate::camera::CameraUpdate;
use crate::geometry::{CameraPosition, Point};
use tracing::debug;

/// The visible region of a map surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: Point,
    pub zoom_level: f64,

    /// Level `PanAndZoomIn` zooms in to
    default_zoom_level: f64,
}

impl Viewport {
    pub fn new(center: Point, zoom_level: f64, default_zoom_level: f64) -> Self {
        Self {
            center,
            zoom_level,
            default_zoom_level,
        }
    }

    /// Move the viewport as instructed by `update`
    pub fn apply(&mut self, update: &CameraUpdate) {
        debug!(update = %update, "Update camera");
        match *update {
            CameraUpdate::Pan { center } => {
                self.center = center;
            }
            CameraUpdate::PanAndZoomIn { center } => {
                self.center = center;
                self.zoom_level = self.zoom_level.max(self.default_zoom_level);
            }
            CameraUpdate::PanAndZoom { center, zoom_level } => {
                self.center = center;
                self.zoom_level = zoom_level;
            }
        }
    }

    pub fn camera_position(&self) -> CameraPosition {
        CameraPosition::new(self.center, self.zoom_level)
    }
}
