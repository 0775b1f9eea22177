mod broker;
mod tracker;
mod update;
mod viewport;

pub use broker::{CameraUpdateBroker, CameraUpdateStream};
pub use tracker::{LocationTracker, TrackingState};
pub use update::CameraUpdate;
pub use viewport::Viewport;
