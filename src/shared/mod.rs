pub mod error;
pub mod macros;
pub mod structs;

pub use error::CommandError;
pub use error::ConfigError;
pub use error::ControlError;
pub use error::DispatchError;
pub use structs::Assignment;
pub use structs::Behaviour;
pub use structs::CallDirection;
pub use structs::Direction;
pub use structs::ElevatorState;
pub use structs::Request;
pub use structs::ResumeReport;
pub use structs::StateChange;
pub use structs::Statistics;
pub use structs::SystemStatus;
pub use structs::Zone;
