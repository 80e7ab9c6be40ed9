mod cli;
mod commands;
mod logging;
mod profile;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use crossbeam_channel::unbounded;
use thiserror::Error;

use crate::cli::{Cli, Command};
use crate::commands::{list_devices, poll_loop, watch_loop};
use crate::profile::{load_profile, ProfileError};

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Gamepad(#[from] xpad_gamepad::Error),
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),
    #[error("failed to set Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

fn run(cli: Cli) -> Result<(), CliError> {
    let profile =
        load_profile(cli.profile.as_deref())?.with_overrides(cli.deadzone, cli.dampen)?;
    let backend = xpad_gamepad::default_backend()?;

    match cli.command {
        Command::List => list_devices(backend.as_ref()),
        Command::Poll { index, interval_ms } => {
            let (stop_tx, stop_rx) = unbounded::<()>();
            ctrlc::set_handler(move || {
                let _ = stop_tx.send(());
            })?;
            poll_loop(backend, index, profile.config_for(index), interval_ms, &stop_rx)
        }
        Command::Watch {
            index,
            interval_ms,
            rumble_triggers,
        } => {
            let (stop_tx, stop_rx) = unbounded::<()>();
            ctrlc::set_handler(move || {
                let _ = stop_tx.send(());
            })?;
            watch_loop(
                backend,
                index,
                profile.config_for(index),
                interval_ms,
                rumble_triggers,
                &stop_rx,
            )
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if logging::setup(cli.verbose, cli.no_color).is_err() {
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error!("{e}");
            ExitCode::FAILURE
        }
    }
}
