use crate::geometry::{CameraPosition, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction for how the map viewport should move
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraUpdate {
    /// Move the center, keep the current zoom
    Pan { center: Point },

    /// Move the center and zoom in to the default "close" level.
    /// Never zooms out.
    PanAndZoomIn { center: Point },

    /// Move the center and restore a stored zoom level exactly
    PanAndZoom { center: Point, zoom_level: f64 },
}

impl CameraUpdate {
    pub fn pan(center: Point) -> Self {
        CameraUpdate::Pan { center }
    }

    pub fn pan_and_zoom_in(center: Point) -> Self {
        CameraUpdate::PanAndZoomIn { center }
    }

    /// Restore `position`, using `default_zoom_level` if it was saved without a zoom
    pub fn pan_and_zoom(position: CameraPosition, default_zoom_level: f64) -> Self {
        CameraUpdate::PanAndZoom {
            center: position.target,
            zoom_level: position.zoom_level.unwrap_or(default_zoom_level),
        }
    }

    pub fn center(&self) -> Point {
        match self {
            CameraUpdate::Pan { center }
            | CameraUpdate::PanAndZoomIn { center }
            | CameraUpdate::PanAndZoom { center, .. } => *center,
        }
    }
}

impl fmt::Display for CameraUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraUpdate::Pan { center } => write!(f, "pan({})", center),
            CameraUpdate::PanAndZoomIn { center } => write!(f, "pan_and_zoom_in({})", center),
            CameraUpdate::PanAndZoom { center, zoom_level } => {
                write!(f, "pan_and_zoom({}, z={})", center, zoom_level)
            }
        }
    }
}
