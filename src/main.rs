/***************************************/
/*        3rd party libraries          */
/***************************************/
use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::thread::Builder;
use std::time::Duration;

/***************************************/
/*              Modules                */
/***************************************/
mod config;
mod console;
mod control;
mod coordinator;
mod elevator;
#[macro_use]
mod shared;

/***************************************/
/*           Local modules             */
/***************************************/
use config::Config;
use console::Console;
use control::Controller;
use coordinator::Coordinator;

/// Zoned multi-elevator dispatch simulator.
#[derive(Parser, Debug)]
#[clap(name = "zoned-elevators", version)]
struct Args {
    /// Configuration file, defaults are used when it does not exist
    #[clap(long, default_value = "config.toml")]
    config: PathBuf,

    /// Read console commands from this file instead of stdin
    #[clap(long)]
    script: Option<PathBuf>,

    /// Print status, statistics and reports as JSON
    #[clap(long)]
    json: bool,

    /// Tick interval in milliseconds, overrides the configuration file
    #[clap(long)]
    tick_ms: Option<u64>,

    /// Disable the tick timer, time only advances on `wait`
    #[clap(long)]
    manual: bool,
}

/***************************************/
/*                Main                 */
/***************************************/
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let mut config = if args.config.exists() {
        unwrap_or_exit!(config::load_config(&args.config), "failed to load configuration")
    } else {
        warn!("{} not found, using the default configuration", args.config.display());
        Config::default()
    };
    if let Some(tick_ms) = args.tick_ms {
        config.system.tick_interval_ms = tick_ms;
    }
    unwrap_or_exit!(config.validate(), "invalid configuration");

    let tick_interval = if args.manual {
        None
    } else {
        Some(Duration::from_millis(config.system.tick_interval_ms))
    };
    let status_ttl = Duration::from_millis(config.system.status_ttl_ms);

    // Start the controller
    let coordinator = unwrap_or_exit!(Coordinator::new(&config), "failed to build the elevator system");
    info!(
        "Simulating {} floors with {} elevators",
        coordinator.n_floors(),
        coordinator.elevators().len()
    );
    let (controller, handle, terminate_tx) = Controller::new(coordinator, tick_interval, status_ttl);
    let controller_thread = unwrap_or_exit!(
        Builder::new().name("controller".into()).spawn(move || controller.run()),
        "failed to start the controller thread"
    );

    // Start the console
    let input: Box<dyn BufRead + Send> = match &args.script {
        Some(path) => Box::new(BufReader::new(unwrap_or_exit!(
            File::open(path),
            format!("failed to open script {}", path.display())
        ))),
        None => Box::new(BufReader::new(std::io::stdin())),
    };
    let lines = unwrap_or_exit!(console::spawn_input_reader(input), "failed to start the console reader");
    let console = Console::new(handle, tick_interval, args.json);
    if let Err(e) = console.run(lines) {
        warn!("Console stopped: {}", e);
    }

    // Shut down
    let _ = terminate_tx.send(());
    if controller_thread.join().is_err() {
        log::error!("Controller thread panicked");
        std::process::exit(1);
    }
}
