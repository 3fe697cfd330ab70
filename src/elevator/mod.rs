pub mod fsm;
pub mod targets;
pub mod zone;


pub use fsm::ElevatorFSM;
pub use zone::{ZoneTable, LOBBY};
