mod pin;
mod response;

pub use pin::PinResponseRecorder;
pub use response::{Job, LocationTaskData, ResponseMap, Task, TaskResponse, TaskType};
