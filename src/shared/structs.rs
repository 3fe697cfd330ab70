/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::CommandError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
    #[serde(rename = "door_opening")]
    DoorOpening,
    #[serde(rename = "door_open")]
    DoorOpen,
    #[serde(rename = "door_closing")]
    DoorClosing,
    #[serde(rename = "emergency")]
    Emergency,
}

impl Behaviour {
    pub fn as_str(&self) -> &'static str {
        match self {
            Behaviour::Idle => "idle",
            Behaviour::Moving => "moving",
            Behaviour::DoorOpening => "door_opening",
            Behaviour::DoorOpen => "door_open",
            Behaviour::DoorClosing => "door_closing",
            Behaviour::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Idle => "idle",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/**
 * Direction of a hall call button. Only up and down buttons exist on a floor,
 * so an external request can never carry `Direction::Idle`.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Up,
    Down,
}

impl CallDirection {
    pub fn index(&self) -> usize {
        match self {
            CallDirection::Up => 0,
            CallDirection::Down => 1,
        }
    }
}

impl From<CallDirection> for Direction {
    fn from(item: CallDirection) -> Self {
        match item {
            CallDirection::Up => Direction::Up,
            CallDirection::Down => Direction::Down,
        }
    }
}

impl fmt::Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Direction::from(*self).fmt(f)
    }
}

impl FromStr for CallDirection {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(CallDirection::Up),
            "down" | "d" => Ok(CallDirection::Down),
            other => Err(CommandError::InvalidDirection(other.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    LowRise,
    MidRise,
    HighRise,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::LowRise => f.write_str("low_rise"),
            Zone::MidRise => f.write_str("mid_rise"),
            Zone::HighRise => f.write_str("high_rise"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Internal,
    External,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Internal => f.write_str("internal"),
            RequestKind::External => f.write_str("external"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub source_floor: u8,
    pub target_floor: u8,
    pub direction: Direction,
    pub kind: RequestKind,
}

impl Request {
    pub fn internal(current_floor: u8, target_floor: u8) -> Request {
        let direction = if target_floor > current_floor {
            Direction::Up
        } else {
            Direction::Down
        };
        Request {
            source_floor: current_floor,
            target_floor,
            direction,
            kind: RequestKind::Internal,
        }
    }

    pub fn external(floor: u8, direction: CallDirection) -> Request {
        Request {
            source_floor: floor,
            target_floor: floor,
            direction: direction.into(),
            kind: RequestKind::External,
        }
    }
}

/// Outcome of an accepted external request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Assignment {
    Assigned(u8),
    AlreadyServed(u8),
}

impl Assignment {
    pub fn elevator(&self) -> u8 {
        match *self {
            Assignment::Assigned(id) | Assignment::AlreadyServed(id) => id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElevatorState {
    pub id: u8,
    pub floor: u8,
    pub direction: Direction,
    #[serde(rename = "state")]
    pub behaviour: Behaviour,
    pub door_open: bool,
    pub pending_targets: Vec<u8>,
    pub zone: Zone,
    pub zone_range: (u8, u8),
}

/// One elevator's transition over a single tick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    pub id: u8,
    pub old_behaviour: Behaviour,
    pub new_behaviour: Behaviour,
    pub old_floor: u8,
    pub new_floor: u8,
    pub old_direction: Direction,
    pub new_direction: Direction,
    pub served_floor: Option<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeReport {
    pub resumed: Vec<u8>,
    pub not_in_emergency: Vec<u8>,
}

impl ResumeReport {
    pub fn all_resumed(&self) -> bool {
        self.not_in_emergency.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total_floors: u8,
    pub total_elevators: usize,
    pub active_requests: usize,
    pub ticks: u64,
    pub completed_stops: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SystemStatus {
    pub tick: u64,
    #[serde(rename = "hallCalls")]
    pub hall_calls: Vec<[bool; 2]>,
    pub elevators: Vec<ElevatorState>,
}
