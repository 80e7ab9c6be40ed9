use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// List connected controllers and their battery state.
    List,
    /// Print stick, button and D-pad values on every tick.
    Poll {
        /// Controller slot to read
        #[arg(short, long, default_value_t = 0)]
        index: u32,
        /// Delay between reads
        #[arg(long, default_value_t = 10)]
        interval_ms: u64,
    },
    /// Print every axis and button event as it happens.
    Watch {
        /// Controller slot to read
        #[arg(short, long, default_value_t = 0)]
        index: u32,
        /// Delay between reads
        #[arg(long, default_value_t = 10)]
        interval_ms: u64,
        /// Drive the rumble motors from the triggers
        #[arg(long)]
        rumble_triggers: bool,
    },
}

/// Read Xbox controllers through XInput and report their changes.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Sensitivity profile (defaults to ./xpad.yaml when present)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Override the deadzone of every controller
    #[arg(long)]
    pub deadzone: Option<f64>,

    /// Override the dampen threshold of every controller
    #[arg(long)]
    pub dampen: Option<f64>,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}
