use crate::geometry::{Geometry, Point};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Kind of entity drawn on the map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    /// Point placed by the user while answering a task
    UserPoint,
    /// Existing location of interest loaded from a survey
    LocationOfInterest,
}

/// A renderable map entity
///
/// Two features are the same feature when their ids match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    pub geometry: Geometry,
}

impl Feature {
    /// New user-placed point with a freshly generated id
    pub fn user_point(point: Point) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            feature_type: FeatureType::UserPoint,
            geometry: Geometry::Point(point),
        }
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Feature {}

impl Hash for Feature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
