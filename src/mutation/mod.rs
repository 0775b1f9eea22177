use crate::feature::{Feature, FeatureType};
use crate::geometry::{Geometry, Point};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;

#[cfg(test)]
mod tests;

/// Storage keys of a location of interest document
pub const JOB_ID: &str = "jobId";
pub const LOCATION: &str = "location";
pub const GEOMETRY: &str = "geometry";
pub const GEOMETRY_TYPE: &str = "type";
pub const GEOMETRY_COORDINATES: &str = "coordinates";
pub const POLYGON_TYPE: &str = "Polygon";
pub const CREATED: &str = "created";
pub const LAST_MODIFIED: &str = "lastModified";

/// What a mutation does to its location of interest
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationType {
    Create,
    Update,
    Delete,
    Unknown,
}

/// Author of a mutation
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// Who changed a document and when, as stored alongside it
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuditInfo {
    pub user: User,
    #[serde(rename = "clientTimestamp")]
    pub client_timestamp: DateTime<Utc>,
}

/// Pending local change to a location of interest
#[derive(Clone, Debug, PartialEq)]
pub struct LoiMutation {
    pub loi_id: String,
    pub survey_id: String,
    pub job_id: String,
    pub mutation_type: MutationType,
    pub location: Option<Point>,
    pub polygon_vertices: Vec<Point>,
    pub client_timestamp: DateTime<Utc>,
}

/// Mutation conversion errors
#[derive(Debug, Clone, PartialEq)]
pub enum MutationError {
    /// Only creates and updates can be written as a document
    UnsupportedType(MutationType),
    /// Audit info could not be encoded
    Serialization(String),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::UnsupportedType(t) => {
                write!(f, "unsupported mutation type {:?}", t)
            }
            MutationError::Serialization(e) => write!(f, "failed to encode audit info: {}", e),
        }
    }
}

impl std::error::Error for MutationError {}

impl LoiMutation {
    /// Document fields to merge into storage for this mutation
    ///
    /// Creates set both `created` and `lastModified`; updates only
    /// `lastModified`.
    pub fn to_storage_map(&self, user: &User) -> Result<Map<String, Value>, MutationError> {
        let mut map = Map::new();
        map.insert(JOB_ID.to_string(), Value::String(self.job_id.clone()));
        if let Some(point) = &self.location {
            map.insert(LOCATION.to_string(), geo_point(point));
        }
        let mut geometry = Map::new();
        geometry.insert(GEOMETRY_TYPE.to_string(), Value::String(POLYGON_TYPE.to_string()));
        geometry.insert(
            GEOMETRY_COORDINATES.to_string(),
            Value::Array(self.polygon_vertices.iter().map(geo_point).collect()),
        );
        map.insert(GEOMETRY.to_string(), Value::Object(geometry));

        let audit_info = serde_json::to_value(AuditInfo {
            user: user.clone(),
            client_timestamp: self.client_timestamp,
        })
        .map_err(|e| MutationError::Serialization(e.to_string()))?;
        match self.mutation_type {
            MutationType::Create => {
                map.insert(CREATED.to_string(), audit_info.clone());
                map.insert(LAST_MODIFIED.to_string(), audit_info);
            }
            MutationType::Update => {
                map.insert(LAST_MODIFIED.to_string(), audit_info);
            }
            MutationType::Delete | MutationType::Unknown => {
                return Err(MutationError::UnsupportedType(self.mutation_type));
            }
        }

        Ok(map)
    }

    /// Map feature drawing this location of interest
    ///
    /// A point location wins over polygon vertices.
    pub fn to_feature(&self) -> Feature {
        let geometry = match self.location {
            Some(point) => Geometry::Point(point),
            None => Geometry::Polygon {
                vertices: self.polygon_vertices.clone(),
            },
        };
        Feature {
            id: self.loi_id.clone(),
            feature_type: FeatureType::LocationOfInterest,
            geometry,
        }
    }
}

fn geo_point(point: &Point) -> Value {
    json!({
        "latitude": point.latitude(),
        "longitude": point.longitude(),
    })
}
