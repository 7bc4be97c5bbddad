// src/main.rs

// Declare modules
pub mod color;
pub mod config;
pub mod form;
pub mod layout;
pub mod serializer;
pub mod session;
pub mod wall;

use std::io::BufRead;

use anyhow::Context;
use log::{error, info};

use crate::config::Config;
use crate::session::{parse_command, Session, SessionStatus};

/// Main entry point for the `cratelight` configurator.
///
/// Reads one command per line from stdin and processes each to
/// completion; a rejected command is reported and the session continues,
/// matching the dialog-and-carry-on behavior of an interactive tool.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting cratelight...");

    let config = Config::load_from_env().context("Failed to load configuration")?;
    info!(
        "Configuration loaded. Output directory: {}",
        config.output.directory.display()
    );

    let mut session = Session::new(config);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let input = match parse_command(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(e) => {
                error!("{:#}", e);
                continue;
            }
        };
        match session.process(input) {
            Ok(SessionStatus::Running) => {}
            Ok(SessionStatus::Shutdown) => {
                info!("Session requested shutdown. Exiting.");
                break;
            }
            Err(e) => {
                // An edit the model refused, or a failed export. Report
                // and keep the session alive with its prior state.
                error!("{:#}", e);
            }
        }
    }

    info!("cratelight exited successfully.");
    Ok(())
}
