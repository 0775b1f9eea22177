use crate::geometry::Point;
use anyhow::{Context, Result};
use serde::Deserialize;

/// Complete surveymap configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub broker: BrokerConfig,
}

/// Camera behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    /// Zoom level used when panning "close" to a point
    #[serde(default = "default_zoom_level")]
    pub default_zoom_level: f64,
    /// Where the camera goes when a survey has no saved position
    #[serde(default)]
    pub fallback_longitude: f64,
    #[serde(default)]
    pub fallback_latitude: f64,
}

fn default_zoom_level() -> f64 {
    18.0
}

impl CameraConfig {
    pub fn fallback_point(&self) -> Point {
        Point::new(self.fallback_longitude, self.fallback_latitude)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_zoom_level: default_zoom_level(),
            fallback_longitude: 0.0,
            fallback_latitude: 0.0,
        }
    }
}

/// Channel sizing for the camera update broker
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    /// Pending updates buffered per subscriber before the merge task waits
    #[serde(default = "default_subscriber_buffer")]
    pub subscriber_buffer: usize,
    /// Location fixes retained for a lagging subscriber
    #[serde(default = "default_location_buffer")]
    pub location_buffer: usize,
}

fn default_subscriber_buffer() -> usize {
    64
}

pub(crate) fn default_location_buffer() -> usize {
    100
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            subscriber_buffer: default_subscriber_buffer(),
            location_buffer: default_location_buffer(),
        }
    }
}

impl MapConfig {
    /// Build from env vars, falling back to defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    /// Override fields from `SURVEYMAP_*` env vars; unparsable values are ignored
    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse::<f64>("SURVEYMAP_DEFAULT_ZOOM_LEVEL") {
            self.camera.default_zoom_level = v;
        }
        if let Some(v) = env_parse::<f64>("SURVEYMAP_FALLBACK_LONGITUDE") {
            self.camera.fallback_longitude = v;
        }
        if let Some(v) = env_parse::<f64>("SURVEYMAP_FALLBACK_LATITUDE") {
            self.camera.fallback_latitude = v;
        }
        if let Some(v) = env_parse::<usize>("SURVEYMAP_SUBSCRIBER_BUFFER") {
            self.broker.subscriber_buffer = v;
        }
        if let Some(v) = env_parse::<usize>("SURVEYMAP_LOCATION_BUFFER") {
            self.broker.location_buffer = v;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<MapConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path))?;
    let config: MapConfig =
        toml::from_str(&contents).with_context(|| format!("Failed to parse config {}", path))?;
    Ok(config)
}
