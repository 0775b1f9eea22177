// Geographic value types
pub mod geometry;

// Map features
pub mod feature;

// Configuration loading
pub mod config;

// Device location fixes
pub mod location;

// Surveys and saved camera positions
pub mod survey;

// Camera updates and the broker merging their sources
pub mod camera;

// Task answers and the drop-a-pin recorder
pub mod datacollection;

// Location of interest mutations and their storage form
pub mod mutation;
