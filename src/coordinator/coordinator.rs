/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::coordinator::assigner::HallRequestAssigner;
use crate::coordinator::scheduler;
use crate::elevator::{ElevatorFSM, ZoneTable, LOBBY};
use crate::shared::{
    Assignment, Behaviour, CallDirection, ConfigError, DispatchError, ElevatorState, Request,
    ResumeReport, StateChange, Statistics, SystemStatus,
};

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Single entry point to the dispatch engine.
 *
 * The `Coordinator` owns every car, the zone table and the hall call latches.
 * It admits internal and external requests, hands them to the best car, and
 * advances the whole building one tick at a time. It holds no global state and
 * does no I/O; callers serialize access to it (see `control::Controller`).
 *
 * # Fields
 * - `zones`:            Static zone table the cars were built from.
 * - `elevators`:        Cars in id order; elevator `id` lives at index `id - 1`.
 * - `assigner`:         Scoring used to pick a car for an external call.
 * - `hall_calls`:       Up/down call latches per floor, index `floor - 1`.
 * - `tick`:             Number of ticks applied so far.
 * - `completed_stops`:  Number of floors served so far.
 */
pub struct Coordinator {
    zones: ZoneTable,
    elevators: Vec<ElevatorFSM>,
    assigner: HallRequestAssigner,
    hall_calls: Vec<[bool; 2]>,
    tick: u64,
    completed_stops: u64,
}

impl Coordinator {
    pub fn new(config: &Config) -> Result<Coordinator, ConfigError> {
        let zones = ZoneTable::from_config(config)?;
        info!(
            "Initializing system with {} floors and {} elevators",
            zones.n_floors(),
            zones.len()
        );

        let elevators = zones
            .iter()
            .map(|(id, range)| {
                info!("Initialized E{} - zone {}, floors {:?}", id, range.zone, range.bounds());
                ElevatorFSM::new(id, range, config.doors)
            })
            .collect();

        Ok(Coordinator {
            hall_calls: vec![[false; 2]; zones.n_floors() as usize],
            zones,
            elevators,
            assigner: HallRequestAssigner::new(config.dispatch.busy_penalty),
            tick: 0,
            completed_stops: 0,
        })
    }

    pub fn n_floors(&self) -> u8 {
        self.zones.n_floors()
    }

    pub fn elevators(&self) -> &[ElevatorFSM] {
        &self.elevators
    }

    /// Request raised from inside car `elevator_id`.
    pub fn submit_internal_request(&mut self, elevator_id: u8, floor: u8) -> Result<(), DispatchError> {
        let index = self.elevator_index(elevator_id)?;
        self.check_floor(floor)?;

        let elevator = &mut self.elevators[index];
        if elevator.is_emergency() || !elevator.can_serve(floor) {
            warn!("REJECTED: internal request F{} for E{} - not eligible", floor, elevator_id);
            return Err(DispatchError::NoEligibleElevator(floor));
        }

        let request = Request::internal(elevator.floor(), floor);
        if !elevator.add_target(request.target_floor, request.direction) {
            warn!("REJECTED: internal request F{} for E{} - already queued", floor, elevator_id);
            return Err(DispatchError::ElevatorBusyOrConflict {
                elevator: elevator_id,
                floor,
            });
        }

        info!(
            "REQUEST: {} F{} assigned to E{} at F{}, targets {:?}",
            request.kind,
            request.target_floor,
            elevator_id,
            request.source_floor,
            elevator.targets().floors()
        );
        Ok(())
    }

    /// Request raised by a hall call button.
    pub fn submit_external_request(
        &mut self,
        floor: u8,
        direction: CallDirection,
    ) -> Result<Assignment, DispatchError> {
        self.check_floor(floor)?;
        if (floor == self.n_floors() && direction == CallDirection::Up)
            || (floor == LOBBY && direction == CallDirection::Down)
        {
            warn!("REJECTED: external request F{} {} - no such button", floor, direction);
            return Err(DispatchError::InvalidDirectionAtBoundary { floor, direction });
        }

        let request = Request::external(floor, direction);
        let assignment = if floor == LOBBY {
            match self.admit_lobby_call()? {
                Some(assignment) => assignment,
                None => self.assign(request)?,
            }
        } else {
            self.assign(request)?
        };

        self.hall_calls[floor as usize - 1][direction.index()] = true;
        Ok(assignment)
    }

    /// Advances every car by one tick.
    pub fn tick(&mut self) -> Vec<StateChange> {
        let changes = scheduler::advance(&mut self.elevators);
        self.tick += 1;

        for floor in changes.iter().filter_map(|c| c.served_floor) {
            self.completed_stops += 1;
            self.hall_calls[floor as usize - 1] = [false; 2];
        }

        changes
    }

    pub fn emergency_stop_all(&mut self) {
        for elevator in self.elevators.iter_mut() {
            elevator.emergency_stop();
        }
        for latch in self.hall_calls.iter_mut() {
            *latch = [false; 2];
        }
        warn!("EMERGENCY: all elevators stopped");
    }

    pub fn resume_all(&mut self) -> ResumeReport {
        let mut report = ResumeReport::default();
        for elevator in self.elevators.iter_mut() {
            if elevator.resume_service() {
                report.resumed.push(elevator.id());
            } else {
                report.not_in_emergency.push(elevator.id());
            }
        }
        info!(
            "RESUME: resumed {:?}, not in emergency {:?}",
            report.resumed, report.not_in_emergency
        );
        report
    }

    pub fn snapshot(&self) -> Vec<ElevatorState> {
        self.elevators.iter().map(ElevatorFSM::state).collect()
    }

    pub fn elevator_status(&self, elevator_id: u8) -> Result<ElevatorState, DispatchError> {
        let index = self.elevator_index(elevator_id)?;
        Ok(self.elevators[index].state())
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            total_floors: self.n_floors(),
            total_elevators: self.elevators.len(),
            active_requests: self.elevators.iter().map(|e| e.targets().len()).sum(),
            ticks: self.tick,
            completed_stops: self.completed_stops,
        }
    }

    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            tick: self.tick,
            hall_calls: self.hall_calls.clone(),
            elevators: self.snapshot(),
        }
    }

    // A car idle at the lobby takes the call directly; a car already heading
    // there means the call is answered. `None` falls through to scoring.
    fn admit_lobby_call(&mut self) -> Result<Option<Assignment>, DispatchError> {
        let waiting = self
            .elevators
            .iter()
            .find(|e| e.floor() == LOBBY && e.behaviour() == Behaviour::Idle)
            .map(|e| (e.id(), e.targets().contains(LOBBY)));

        match waiting {
            Some((id, true)) => {
                info!("REQUEST: lobby call already served by E{}", id);
                return Ok(Some(Assignment::AlreadyServed(id)));
            }
            Some((id, false)) => {
                self.submit_internal_request(id, LOBBY)?;
                return Ok(Some(Assignment::Assigned(id)));
            }
            None => {}
        }

        let coming = self.elevators.iter().find(|e| e.targets().contains(LOBBY));
        if let Some(elevator) = coming {
            info!("REQUEST: lobby call already served by E{}", elevator.id());
            return Ok(Some(Assignment::AlreadyServed(elevator.id())));
        }

        Ok(None)
    }

    fn assign(&mut self, request: Request) -> Result<Assignment, DispatchError> {
        let floor = request.target_floor;
        let index = match self.assigner.assign(&self.elevators, floor, Some(request.direction)) {
            Some(index) => index,
            None => {
                warn!("REJECTED: external request F{} - no eligible elevator", floor);
                return Err(DispatchError::NoEligibleElevator(floor));
            }
        };

        let zone = self.zones.zone_for_floor(floor);
        let elevator = &mut self.elevators[index];
        if !elevator.add_target(floor, request.direction) {
            warn!("REJECTED: {} request F{} - E{} already queued it", request.kind, floor, elevator.id());
            return Err(DispatchError::ElevatorBusyOrConflict {
                elevator: elevator.id(),
                floor,
            });
        }

        info!(
            "REQUEST: {} F{} {} ({}) assigned to E{} at F{}, targets {:?}",
            request.kind,
            floor,
            request.direction,
            zone.map_or("lobby".to_string(), |z| z.to_string()),
            elevator.id(),
            elevator.floor(),
            elevator.targets().floors()
        );
        Ok(Assignment::Assigned(elevator.id()))
    }

    fn elevator_index(&self, elevator_id: u8) -> Result<usize, DispatchError> {
        let index = (elevator_id as usize).wrapping_sub(1);
        if index < self.elevators.len() {
            Ok(index)
        } else {
            Err(DispatchError::UnknownElevatorId(elevator_id))
        }
    }

    fn check_floor(&self, floor: u8) -> Result<(), DispatchError> {
        if floor < 1 || floor > self.n_floors() {
            return Err(DispatchError::InvalidFloor(floor));
        }
        Ok(())
    }
}
