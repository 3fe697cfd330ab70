/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::CallDirection;

/***************************************/
/*            Error types              */
/***************************************/
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    #[error("floor {0} is outside the building")]
    InvalidFloor(u8),

    #[error("no {direction} call exists at floor {floor}")]
    InvalidDirectionAtBoundary { floor: u8, direction: CallDirection },

    #[error("no elevator can currently serve floor {0}")]
    NoEligibleElevator(u8),

    #[error("elevator {elevator} rejected floor {floor}")]
    ElevatorBusyOrConflict { elevator: u8, floor: u8 },

    #[error("unknown elevator id {0}")]
    UnknownElevatorId(u8),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    #[error("controller thread is not running")]
    Disconnected,

    #[error("request rejected: {0}")]
    Dispatch(#[from] DispatchError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("'{0}' is not a call direction (up/down)")]
    InvalidDirection(String),
}
