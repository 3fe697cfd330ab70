pub mod controller;
pub mod status_cache;


pub use controller::{ControlHandle, Controller};
pub use status_cache::StatusCache;
