/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::time::{Duration, Instant};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::control::StatusCache;
use crate::coordinator::Coordinator;
use crate::shared::{
    Assignment, CallDirection, ControlError, DispatchError, ElevatorState, ResumeReport,
    StateChange, Statistics, SystemStatus,
};

/***************************************/
/*               Enums                 */
/***************************************/
pub enum Command {
    InternalRequest {
        elevator: u8,
        floor: u8,
        reply: cbc::Sender<Result<(), DispatchError>>,
    },
    ExternalRequest {
        floor: u8,
        direction: CallDirection,
        reply: cbc::Sender<Result<Assignment, DispatchError>>,
    },
    EmergencyStop {
        reply: cbc::Sender<()>,
    },
    Resume {
        reply: cbc::Sender<ResumeReport>,
    },
    Status {
        reply: cbc::Sender<SystemStatus>,
    },
    ElevatorStatus {
        elevator: u8,
        reply: cbc::Sender<Result<ElevatorState, DispatchError>>,
    },
    Statistics {
        reply: cbc::Sender<Statistics>,
    },
    Step {
        ticks: u32,
        reply: cbc::Sender<Vec<StateChange>>,
    },
}

enum Event {
    Command(Command),
    Tick,
    Terminate,
    HandlesDropped,
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Owns the coordinator and serializes every access to it.
 *
 * The controller runs on its own thread. Requests arrive as `Command`s over a
 * crossbeam channel and are answered on a per-command reply channel; ticks come
 * from a `cbc::tick` timer. Since one thread handles both, a request never
 * observes a half-applied tick. A message on the terminate channel stops the
 * loop between two messages.
 *
 * # Fields
 * - `coordinator`:     The dispatch engine.
 * - `command_rx`:      Receives commands from `ControlHandle`s.
 * - `terminate_rx`:    Receives the shutdown signal.
 * - `tick_interval`:   Time between ticks, or `None` to tick only on `Command::Step`.
 * - `status_cache`:    Refreshed after every tick, accepted request and status query.
 */
pub struct Controller {
    coordinator: Coordinator,
    command_rx: cbc::Receiver<Command>,
    terminate_rx: cbc::Receiver<()>,
    tick_interval: Option<Duration>,
    status_cache: StatusCache,
}

impl Controller {
    pub fn new(
        coordinator: Coordinator,
        tick_interval: Option<Duration>,
        status_ttl: Duration,
    ) -> (Controller, ControlHandle, cbc::Sender<()>) {
        let (command_tx, command_rx) = cbc::unbounded::<Command>();
        let (terminate_tx, terminate_rx) = cbc::bounded::<()>(1);
        let status_cache = StatusCache::new(status_ttl);

        let controller = Controller {
            coordinator,
            command_rx,
            terminate_rx,
            tick_interval,
            status_cache: status_cache.clone(),
        };
        let handle = ControlHandle {
            command_tx,
            status_cache,
        };

        (controller, handle, terminate_tx)
    }

    pub fn run(mut self) {
        let ticker = match self.tick_interval {
            Some(interval) => cbc::tick(interval),
            None => cbc::never::<Instant>(),
        };
        self.status_cache.store(self.coordinator.status());
        info!("Controller started, tick interval {:?}", self.tick_interval);

        loop {
            match self.wait_for_event(&ticker) {
                Event::Command(command) => self.handle_command(command),
                Event::Tick => {
                    self.tick();
                }
                Event::Terminate => {
                    info!("Controller terminated");
                    break;
                }
                Event::HandlesDropped => {
                    info!("All control handles dropped, controller stopping");
                    break;
                }
            }
        }

        let stats = self.coordinator.statistics();
        info!(
            "Controller stopped after {} ticks, {} stops completed",
            stats.ticks, stats.completed_stops
        );
    }

    fn wait_for_event(&self, ticker: &cbc::Receiver<Instant>) -> Event {
        cbc::select! {
            recv(self.terminate_rx) -> _ => Event::Terminate,
            recv(self.command_rx) -> command => match command {
                Ok(command) => Event::Command(command),
                Err(_) => Event::HandlesDropped,
            },
            recv(ticker) -> _ => Event::Tick,
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::InternalRequest { elevator, floor, reply } => {
                let result = self.coordinator.submit_internal_request(elevator, floor);
                if result.is_ok() {
                    self.status_cache.store(self.coordinator.status());
                }
                let _ = reply.send(result);
            }
            Command::ExternalRequest { floor, direction, reply } => {
                let result = self.coordinator.submit_external_request(floor, direction);
                if result.is_ok() {
                    self.status_cache.store(self.coordinator.status());
                }
                let _ = reply.send(result);
            }
            Command::EmergencyStop { reply } => {
                self.coordinator.emergency_stop_all();
                self.status_cache.store(self.coordinator.status());
                let _ = reply.send(());
            }
            Command::Resume { reply } => {
                let report = self.coordinator.resume_all();
                self.status_cache.store(self.coordinator.status());
                let _ = reply.send(report);
            }
            Command::Status { reply } => {
                let status = self.coordinator.status();
                self.status_cache.store(status.clone());
                let _ = reply.send(status);
            }
            Command::ElevatorStatus { elevator, reply } => {
                let _ = reply.send(self.coordinator.elevator_status(elevator));
            }
            Command::Statistics { reply } => {
                let _ = reply.send(self.coordinator.statistics());
            }
            Command::Step { ticks, reply } => {
                let mut changes = Vec::new();
                for _ in 0..ticks {
                    changes.extend(self.tick());
                }
                let _ = reply.send(changes);
            }
        }
    }

    fn tick(&mut self) -> Vec<StateChange> {
        let changes = self.coordinator.tick();
        if !changes.is_empty() {
            debug!("Tick applied, {} elevators changed", changes.len());
        }
        self.status_cache.store(self.coordinator.status());
        changes
    }
}

/**
 * Cloneable client side of a running `Controller`.
 *
 * Every call blocks until the controller answered. `status` is served from the
 * status cache while it is fresh.
 */
#[derive(Clone)]
pub struct ControlHandle {
    command_tx: cbc::Sender<Command>,
    status_cache: StatusCache,
}

impl ControlHandle {
    pub fn submit_internal_request(&self, elevator: u8, floor: u8) -> Result<(), ControlError> {
        self.request(|reply| Command::InternalRequest { elevator, floor, reply })?
            .map_err(ControlError::from)
    }

    pub fn submit_external_request(
        &self,
        floor: u8,
        direction: CallDirection,
    ) -> Result<Assignment, ControlError> {
        self.request(|reply| Command::ExternalRequest { floor, direction, reply })?
            .map_err(ControlError::from)
    }

    pub fn emergency_stop_all(&self) -> Result<(), ControlError> {
        self.request(|reply| Command::EmergencyStop { reply })
    }

    pub fn resume_all(&self) -> Result<ResumeReport, ControlError> {
        self.request(|reply| Command::Resume { reply })
    }

    pub fn status(&self) -> Result<SystemStatus, ControlError> {
        if let Some(status) = self.status_cache.fresh() {
            return Ok(status);
        }
        self.request(|reply| Command::Status { reply })
    }

    pub fn elevator_status(&self, elevator: u8) -> Result<ElevatorState, ControlError> {
        self.request(|reply| Command::ElevatorStatus { elevator, reply })?
            .map_err(ControlError::from)
    }

    pub fn statistics(&self) -> Result<Statistics, ControlError> {
        self.request(|reply| Command::Statistics { reply })
    }

    /// Applies `ticks` ticks right away, independent of the tick timer.
    pub fn step(&self, ticks: u32) -> Result<Vec<StateChange>, ControlError> {
        self.request(|reply| Command::Step { ticks, reply })
    }

    fn request<T>(&self, command: impl FnOnce(cbc::Sender<T>) -> Command) -> Result<T, ControlError> {
        let (reply_tx, reply_rx) = cbc::bounded::<T>(1);
        self.command_tx
            .send(command(reply_tx))
            .map_err(|_| ControlError::Disconnected)?;
        reply_rx.recv().map_err(|_| ControlError::Disconnected)
    }
}
