//! Desktop simulator for the wristlog watch app.
//!
//! Reads `wristlog.toml` (or the file named by `WRISTLOG_CONFIG`), starts the
//! app against [`SimulatorHost`] and writes accelerometer records to
//! `<log_dir>/session_<tag>.bin`.

use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};

use wristlog_simulator::{DEFAULT_CONFIG_PATH, SimError, SimulatorConfig, SimulatorHost};

fn run() -> Result<(), SimError> {
    let config_path = std::env::var_os("WRISTLOG_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = SimulatorConfig::load(&config_path)?;

    let size = config.display_size();
    info!(
        "Display: {}×{} {:?} (scale {}×)",
        size.width, size.height, config.screen, config.window_scale
    );

    let mut host = SimulatorHost::new(&config)?;
    wristlog_core::run(&mut host, config.watch)?;

    info!(
        "Records written to {}",
        host.datalog().session_path(config.watch.log.tag).display()
    );
    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();
    info!("Starting wristlog simulator");

    match run() {
        Ok(()) => {
            info!("Simulator exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
