/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::DoorConfig;
use crate::elevator::targets::{Target, TargetQueue};
use crate::elevator::zone::ZoneRange;
use crate::shared::{Behaviour, Direction, ElevatorState};

/// What a single tick does to a car, derived from its current state.
enum Event {
    TargetsPending,
    FloorReached,
    PassedFloor,
    DwellElapsed,
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Simulated elevator car.
 *
 * The `ElevatorFSM` (Finite State Machine) owns the position, direction, door state and
 * target queue of one car, and advances them by one discrete tick per call to `step`.
 * It never looks at other cars; assignment decisions are made by the coordinator.
 *
 * # Fields
 * - `id`:            Stable elevator id, 1-based.
 * - `zone`:          Floor range this car serves. The lobby is always servable.
 * - `floor`:         Current floor.
 * - `direction`:     Direction of travel. `Idle` exactly when `targets` is empty.
 * - `behaviour`:     Motion/door state.
 * - `targets`:       Floors to stop at, sorted for the current direction.
 * - `door_timer`:    Ticks left in the current door state.
 * - `doors`:         Configured dwell length of each door state.
 */
#[derive(Clone, Debug)]
pub struct ElevatorFSM {
    id: u8,
    zone: ZoneRange,
    floor: u8,
    direction: Direction,
    behaviour: Behaviour,
    targets: TargetQueue,
    door_timer: u32,
    doors: DoorConfig,
}

impl ElevatorFSM {
    pub fn new(id: u8, zone: ZoneRange, doors: DoorConfig) -> ElevatorFSM {
        ElevatorFSM {
            id,
            zone,
            floor: crate::elevator::LOBBY,
            direction: Direction::Idle,
            behaviour: Behaviour::Idle,
            targets: TargetQueue::new(),
            door_timer: 0,
            doors,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    pub fn targets(&self) -> &TargetQueue {
        &self.targets
    }

    pub fn door_open(&self) -> bool {
        matches!(self.behaviour, Behaviour::DoorOpening | Behaviour::DoorOpen)
    }

    pub fn is_emergency(&self) -> bool {
        self.behaviour == Behaviour::Emergency
    }

    pub fn can_serve(&self, floor: u8) -> bool {
        self.zone.can_serve(floor)
    }

    /// Queues a floor. Rejected when the floor is out of zone or already queued.
    pub fn add_target(&mut self, floor: u8, tag: Direction) -> bool {
        if !self.can_serve(floor) {
            return false;
        }
        self.targets.insert(Target { floor, direction: tag }, self.direction)
    }

    /// Advances the car by one tick. Returns the floor whose service was
    /// completed during this tick, if any.
    pub fn step(&mut self) -> Option<u8> {
        let event = match self.next_event() {
            Some(event) => event,
            None => return None,
        };
        self.handle_event(event)
    }

    pub fn emergency_stop(&mut self) {
        self.behaviour = Behaviour::Emergency;
        self.direction = Direction::Idle;
        self.targets.clear();
        self.door_timer = 0;
    }

    pub fn resume_service(&mut self) -> bool {
        if self.behaviour != Behaviour::Emergency {
            return false;
        }
        self.behaviour = Behaviour::Idle;
        true
    }

    pub fn state(&self) -> ElevatorState {
        ElevatorState {
            id: self.id,
            floor: self.floor,
            direction: self.direction,
            behaviour: self.behaviour,
            door_open: self.door_open(),
            pending_targets: self.targets.floors(),
            zone: self.zone.zone,
            zone_range: self.zone.bounds(),
        }
    }

    fn next_event(&mut self) -> Option<Event> {
        match self.behaviour {
            Behaviour::Emergency => None,
            Behaviour::Idle if self.targets.is_empty() => None,
            Behaviour::Idle => Some(Event::TargetsPending),
            Behaviour::Moving if self.targets.contains(self.floor) => Some(Event::FloorReached),
            Behaviour::Moving => Some(Event::PassedFloor),
            Behaviour::DoorOpening | Behaviour::DoorOpen | Behaviour::DoorClosing => {
                self.door_timer = self.door_timer.saturating_sub(1);
                if self.door_timer == 0 {
                    Some(Event::DwellElapsed)
                } else {
                    None
                }
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<u8> {
        match event {
            Event::TargetsPending => {
                self.behaviour = Behaviour::Moving;
                self.update_direction();
                None
            }
            Event::FloorReached => {
                self.behaviour = Behaviour::DoorOpening;
                self.door_timer = self.doors.opening_ticks;
                None
            }
            Event::PassedFloor => {
                if self.targets.is_empty() {
                    self.behaviour = Behaviour::Idle;
                    self.direction = Direction::Idle;
                    return None;
                }
                if self.direction == Direction::Idle {
                    self.update_direction();
                }
                self.floor = match self.direction {
                    Direction::Up => self.floor.saturating_add(1).min(self.zone.max_floor),
                    Direction::Down => self.floor.saturating_sub(1).max(crate::elevator::LOBBY),
                    Direction::Idle => self.floor,
                };
                self.update_direction();
                None
            }
            Event::DwellElapsed => match self.behaviour {
                Behaviour::DoorOpening => {
                    self.behaviour = Behaviour::DoorOpen;
                    self.door_timer = self.doors.open_ticks;
                    None
                }
                Behaviour::DoorOpen => {
                    self.behaviour = Behaviour::DoorClosing;
                    self.door_timer = self.doors.closing_ticks;
                    None
                }
                _ => {
                    let served = self.targets.remove(self.floor).map(|t| t.floor);
                    self.behaviour = Behaviour::Idle;
                    self.update_direction();
                    served
                }
            },
        }
    }

    // Keeps the direction consistent with the queue and re-sorts it.
    fn update_direction(&mut self) {
        let next = match self.targets.front() {
            Some(target) => target,
            None => {
                self.direction = Direction::Idle;
                return;
            }
        };

        match self.direction {
            Direction::Idle => {
                self.direction = if next.floor > self.floor {
                    Direction::Up
                } else {
                    Direction::Down
                };
            }
            Direction::Up if self.targets.all_below(self.floor) => {
                self.direction = Direction::Down;
            }
            Direction::Down if self.targets.all_above(self.floor) => {
                self.direction = Direction::Up;
            }
            _ => {}
        }

        self.targets.sort_for(self.direction);
    }
}
