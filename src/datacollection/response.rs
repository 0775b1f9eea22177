use crate::geometry::CameraPosition;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Kind of answer a task expects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskType {
    Text,
    Number,
    DropAPin,
}

/// A single prompt within a job
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: String,
    pub label: String,
    pub task_type: TaskType,
}

/// The set of tasks answered together for one location of interest
#[derive(Clone, Debug, Default)]
pub struct Job {
    pub id: String,
    pub tasks: Vec<Task>,
}

impl Job {
    pub fn get_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}

/// Answer to a drop-a-pin task: where the map camera was when the pin dropped
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocationTaskData {
    pub camera_position: CameraPosition,
}

impl LocationTaskData {
    pub fn new(camera_position: CameraPosition) -> Self {
        Self { camera_position }
    }

    /// "lat, lng" of the pin
    pub fn details_text(&self) -> String {
        self.camera_position.target.to_string()
    }
}

/// Recorded answer of a task
#[derive(Clone, Debug, PartialEq)]
pub enum TaskResponse {
    Text(String),
    Number(f64),
    Location(LocationTaskData),
}

impl TaskResponse {
    pub fn details_text(&self) -> String {
        match self {
            TaskResponse::Text(text) => text.clone(),
            TaskResponse::Number(number) => number.to_string(),
            TaskResponse::Location(data) => data.details_text(),
        }
    }

    /// Encode for local storage; `None` (logged) if encoding fails
    pub fn to_json(&self) -> Option<Value> {
        match self {
            TaskResponse::Text(text) => Some(Value::String(text.clone())),
            TaskResponse::Number(number) => Some(Value::from(*number)),
            TaskResponse::Location(data) => match serde_json::to_value(data.camera_position) {
                Ok(value) => Some(value),
                Err(e) => {
                    error!(error = %e, "Error building JSON for location response");
                    None
                }
            },
        }
    }

    /// Decode a stored answer for a task of type `task_type`
    ///
    /// Returns `None` when the JSON does not fit the task type.
    pub fn from_json(task_type: TaskType, value: &Value) -> Option<TaskResponse> {
        match task_type {
            TaskType::Text => value.as_str().map(|s| TaskResponse::Text(s.to_string())),
            TaskType::Number => value.as_f64().map(TaskResponse::Number),
            TaskType::DropAPin => serde_json::from_value::<CameraPosition>(value.clone())
                .ok()
                .map(|p| TaskResponse::Location(LocationTaskData::new(p))),
        }
    }
}

/// Answers keyed by task id
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseMap {
    responses: BTreeMap<String, TaskResponse>,
}

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_response(&mut self, task_id: impl Into<String>, response: TaskResponse) {
        self.responses.insert(task_id.into(), response);
    }

    pub fn get_response(&self, task_id: &str) -> Option<&TaskResponse> {
        self.responses.get(task_id)
    }

    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.responses.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Encode as a JSON object keyed by task id, the local storage format
    ///
    /// Answers that fail to encode are left out.
    pub fn to_json_string(&self) -> String {
        let object: Map<String, Value> = self
            .responses
            .iter()
            .filter_map(|(task_id, response)| {
                response.to_json().map(|value| (task_id.clone(), value))
            })
            .collect();
        Value::Object(object).to_string()
    }

    /// Decode the local storage format
    ///
    /// Answers for tasks unknown to `job`, or that don't fit their task type,
    /// are dropped. Unparsable input yields an empty map.
    pub fn from_json_str(job: &Job, json: Option<&str>) -> ResponseMap {
        let mut map = ResponseMap::new();
        let Some(json) = json else {
            return map;
        };

        let object = match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                error!(job_id = %job.id, "Stored responses are not a JSON object");
                return map;
            }
            Err(e) => {
                error!(job_id = %job.id, error = %e, "Error parsing stored responses");
                return map;
            }
        };

        for (task_id, value) in object {
            let Some(task) = job.get_task(&task_id) else {
                debug!(task_id = %task_id, "Bad response in local db: unknown task id");
                continue;
            };
            match TaskResponse::from_json(task.task_type, &value) {
                Some(response) => map.put_response(task_id, response),
                None => debug!(task_id = %task_id, "Bad response in local db: type mismatch"),
            }
        }

        map
    }
}
