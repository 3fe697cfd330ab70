/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::str::FromStr;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CallDirection, CommandError};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Go { elevator: u8, floor: u8 },
    Call { floor: u8, direction: CallDirection },
    Status,
    Elevator(u8),
    Stats,
    Emergency,
    Resume,
    Wait(u32),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  go <elevator> <floor>    press a floor button inside an elevator
  call <floor> <up|down>   press a hall call button
  status                   show every elevator and the active hall calls
  elevator <id>            show a single elevator
  stats                    show system statistics
  emergency                stop all elevators
  resume                   resume all elevators after an emergency stop
  wait <ticks>             let the simulation run for some ticks
  help                     show this text
  quit                     stop the simulation";

/***************************************/
/*             Public API              */
/***************************************/

/// Parses one console line. Blank lines and `#` comments give `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, CommandError> {
    let line = match line.find('#') {
        Some(start) => &line[..start],
        None => line,
    };
    let mut words = line.split_whitespace();
    let keyword = match words.next() {
        Some(keyword) => keyword.to_ascii_lowercase(),
        None => return Ok(None),
    };

    let command = match keyword.as_str() {
        "go" => ConsoleCommand::Go {
            elevator: number(words.next(), "go", "<elevator> <floor>")?,
            floor: number(words.next(), "go", "<elevator> <floor>")?,
        },
        "call" => ConsoleCommand::Call {
            floor: number(words.next(), "call", "<floor> <up|down>")?,
            direction: direction(words.next(), "call", "<floor> <up|down>")?,
        },
        "status" => ConsoleCommand::Status,
        "elevator" => ConsoleCommand::Elevator(number(words.next(), "elevator", "<id>")?),
        "stats" => ConsoleCommand::Stats,
        "emergency" => ConsoleCommand::Emergency,
        "resume" => ConsoleCommand::Resume,
        "wait" => ConsoleCommand::Wait(number(words.next(), "wait", "<ticks>")?),
        "help" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => return Err(CommandError::UnknownCommand(keyword)),
    };

    Ok(Some(command))
}

/***************************************/
/*          Local functions            */
/***************************************/
fn number<T: FromStr>(
    word: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<T, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument { command, expected })?;
    word.parse::<T>()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

fn direction(
    word: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<CallDirection, CommandError> {
    word.ok_or(CommandError::MissingArgument { command, expected })?
        .parse::<CallDirection>()
}
