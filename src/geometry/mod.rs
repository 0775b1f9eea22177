// Geographic value types shared by the camera and data collection layers

use serde::{Deserialize, Serialize};
use std::fmt;


/// Longitude/latitude pair in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// A single position on the map
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub coordinate: Coordinate,
}

impl Point {
    /// Map origin, used when nothing better is known
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            coordinate: Coordinate::new(longitude, latitude),
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude
    }
}

impl From<Coordinate> for Point {
    fn from(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl fmt::Display for Point {
    /// Formats as "lat, lng" with meter-level precision
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude(), self.longitude())
    }
}

/// Geometry attached to a map feature
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Point(Point),
    Polygon { vertices: Vec<Point> },
}

impl Geometry {
    /// Returns the point if this geometry is a single point
    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Geometry::Point(point) => Some(point),
            Geometry::Polygon { .. } => None,
        }
    }
}

impl From<Point> for Geometry {
    fn from(point: Point) -> Self {
        Geometry::Point(point)
    }
}

/// Where the map camera is looking
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPosition {
    pub target: Point,

    /// Zoom level, absent when the camera never settled on one
    #[serde(rename = "zoomLevel", skip_serializing_if = "Option::is_none", default)]
    pub zoom_level: Option<f64>,
}

impl CameraPosition {
    pub fn new(target: Point, zoom_level: f64) -> Self {
        Self {
            target,
            zoom_level: Some(zoom_level),
        }
    }

    pub fn at(target: Point) -> Self {
        Self {
            target,
            zoom_level: None,
        }
    }
}
