/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt::Write;
use std::io::BufRead;
use std::thread::Builder;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::console::command::{parse_line, ConsoleCommand, HELP};
use crate::control::ControlHandle;
use crate::shared::{
    Assignment, ControlError, ElevatorState, ResumeReport, Statistics, SystemStatus,
};

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Line based front end for a running controller.
 *
 * # Fields
 * - `handle`:          Connection to the controller thread.
 * - `tick_interval`:   Tick timer of the controller, `None` when time only advances on `wait`.
 * - `json`:            Print status, statistics and reports as JSON instead of text.
 */
pub struct Console {
    handle: ControlHandle,
    tick_interval: Option<Duration>,
    json: bool,
}

impl Console {
    pub fn new(handle: ControlHandle, tick_interval: Option<Duration>, json: bool) -> Console {
        Console {
            handle,
            tick_interval,
            json,
        }
    }

    /// Executes lines until `quit`, end of input, or the controller goes away.
    pub fn run(&self, lines: cbc::Receiver<String>) -> Result<(), ControlError> {
        for line in lines.iter() {
            debug!("Console input: {}", line.trim_end());
            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping console line '{}': {}", line.trim(), e);
                    println!("Error: {}", e);
                    continue;
                }
            };

            if command == ConsoleCommand::Quit {
                info!("Quit requested from console");
                break;
            }
            if let Some(output) = self.execute(command)? {
                println!("{}", output);
            }
        }
        Ok(())
    }

    /**
     * Runs one command against the controller and renders the answer.
     *
     * Rejected requests are part of the output. Only a lost controller is
     * returned as an error.
     */
    pub fn execute(&self, command: ConsoleCommand) -> Result<Option<String>, ControlError> {
        let output = match command {
            ConsoleCommand::Go { elevator, floor } => {
                match self.handle.submit_internal_request(elevator, floor) {
                    Ok(()) => format!("Elevator {} will stop at floor {}", elevator, floor),
                    Err(e) => rejected(e)?,
                }
            }
            ConsoleCommand::Call { floor, direction } => {
                match self.handle.submit_external_request(floor, direction) {
                    Ok(assignment) => {
                        let outcome = match assignment {
                            Assignment::Assigned(_) => "assigned to",
                            Assignment::AlreadyServed(_) => "already served by",
                        };
                        format!(
                            "Hall call {} at floor {} {} elevator {}",
                            direction,
                            floor,
                            outcome,
                            assignment.elevator()
                        )
                    }
                    Err(e) => rejected(e)?,
                }
            }
            ConsoleCommand::Status => {
                let status = self.handle.status()?;
                self.render(&status, render_status)
            }
            ConsoleCommand::Elevator(id) => match self.handle.elevator_status(id) {
                Ok(state) => self.render(&state, render_elevator),
                Err(e) => rejected(e)?,
            },
            ConsoleCommand::Stats => {
                let stats = self.handle.statistics()?;
                self.render(&stats, render_statistics)
            }
            ConsoleCommand::Emergency => {
                self.handle.emergency_stop_all()?;
                "Emergency stop: all elevators halted".to_string()
            }
            ConsoleCommand::Resume => {
                let report = self.handle.resume_all()?;
                self.render(&report, render_resume)
            }
            ConsoleCommand::Wait(ticks) => {
                self.wait(ticks)?;
                return Ok(None);
            }
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::Quit => return Ok(None),
        };
        Ok(Some(output))
    }

    fn wait(&self, ticks: u32) -> Result<(), ControlError> {
        match self.tick_interval {
            Some(interval) => std::thread::sleep(interval * ticks),
            None => {
                self.handle.step(ticks)?;
            }
        }
        Ok(())
    }

    fn render<T: Serialize>(&self, value: &T, as_text: fn(&T) -> String) -> String {
        if !self.json {
            return as_text(value);
        }
        match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize output: {}", e);
                as_text(value)
            }
        }
    }
}

/// Reads lines on a separate thread so the console can block on a channel.
pub fn spawn_input_reader(reader: Box<dyn BufRead + Send>) -> std::io::Result<cbc::Receiver<String>> {
    let (line_tx, line_rx) = cbc::unbounded::<String>();
    Builder::new().name("console_input".into()).spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read console input: {}", e);
                    break;
                }
            }
        }
    })?;
    Ok(line_rx)
}

/***************************************/
/*          Local functions            */
/***************************************/
fn rejected(error: ControlError) -> Result<String, ControlError> {
    match error {
        ControlError::Dispatch(e) => Ok(format!("Rejected: {}", e)),
        ControlError::Disconnected => Err(error),
    }
}

fn render_status(status: &SystemStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tick {}", status.tick);
    let _ = writeln!(
        out,
        "{:>3}  {:<10} {:<7} {:>5}  {:<5} {:<13} {:<6} {}",
        "ID", "ZONE", "RANGE", "FLOOR", "DIR", "STATE", "DOOR", "TARGETS"
    );
    for elevator in &status.elevators {
        let _ = writeln!(out, "{}", elevator_row(elevator));
    }

    let calls: Vec<String> = status
        .hall_calls
        .iter()
        .enumerate()
        .flat_map(|(i, [up, down])| {
            let floor = i + 1;
            let up = up.then(|| format!("{} up", floor));
            let down = down.then(|| format!("{} down", floor));
            up.into_iter().chain(down)
        })
        .collect();
    if calls.is_empty() {
        out.push_str("Hall calls: none");
    } else {
        let _ = write!(out, "Hall calls: {}", calls.join(", "));
    }
    out
}

fn render_elevator(elevator: &ElevatorState) -> String {
    elevator_row(elevator)
}

fn elevator_row(elevator: &ElevatorState) -> String {
    let (min, max) = elevator.zone_range;
    format!(
        "{:>3}  {:<10} {:<7} {:>5}  {:<5} {:<13} {:<6} {:?}",
        elevator.id,
        elevator.zone.to_string(),
        format!("{}-{}", min, max),
        elevator.floor,
        elevator.direction.as_str(),
        elevator.behaviour.as_str(),
        if elevator.door_open { "open" } else { "closed" },
        elevator.pending_targets,
    )
}

fn render_statistics(stats: &Statistics) -> String {
    format!(
        "Floors: {}, elevators: {}, active requests: {}, ticks: {}, completed stops: {}",
        stats.total_floors, stats.total_elevators, stats.active_requests, stats.ticks, stats.completed_stops
    )
}

fn render_resume(report: &ResumeReport) -> String {
    let mut out = format!("Resumed elevators {:?}", report.resumed);
    if !report.all_resumed() {
        let _ = write!(out, ", not in emergency: {:?}", report.not_in_emergency);
    }
    out
}
