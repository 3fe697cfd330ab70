pub mod assigner;
pub mod coordinator;
pub mod scheduler;

mod assigner_tests;
mod coordinator_tests;

pub use coordinator::Coordinator;
