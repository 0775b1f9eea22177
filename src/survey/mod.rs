// Surveys, the active-survey slot and saved camera positions

mod repository;

pub use repository::{CameraPositionStore, SurveyRepository};

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// A data collection survey
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Survey {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
        }
    }
}
