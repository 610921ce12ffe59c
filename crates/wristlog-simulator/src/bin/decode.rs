//! Print the accelerometer records of a data-logging session file.
//!
//! ```text
//! wristlog-decode datalog/session_1.bin
//! ```

use std::process::ExitCode;

use log::warn;

use wristlog_core::record::Records;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1) else {
        eprintln!("usage: wristlog-decode <session file>");
        return ExitCode::from(2);
    };

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{}: {}", path.to_string_lossy(), e);
            return ExitCode::FAILURE;
        }
    };

    let records = Records::new(&bytes);
    let trailing = records.trailing_bytes();
    for record in records {
        println!(
            "({}, {}, {}, {})",
            record.timestamp, record.x, record.y, record.z
        );
    }

    if trailing > 0 {
        warn!("Ignoring {} trailing bytes", trailing);
    }
    ExitCode::SUCCESS
}
