mod config;
mod display;
mod error;
mod logging;
mod manager;
mod process;

use std::io;
use std::process::ExitCode;

use config::MonitorConfig;
use error::MonitorError;
use manager::monitoring::source_for;
use manager::signals::Shutdown;
use manager::Monitor;

fn main() -> ExitCode {
    logging::init();

    // Configuration is fixed once here and only read afterwards
    let config = MonitorConfig::from_env();

    match run(config) {
        Ok(()) => {
            println!("\nExiting...");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(config: MonitorConfig) -> Result<(), MonitorError> {
    let shutdown = Shutdown::install()?;
    println!("Initializing Monitor...");

    let source = source_for(&config.source);
    let mut monitor = Monitor::new(config, source).with_clear_screen(display::stdout_is_terminal());
    monitor.run(&mut io::stdout().lock(), &shutdown)
}
