//! Time value utilities on the command line.
//!
//! Handy for checking what a timesheet cell will show before exporting:
//!
//! ```text
//! chronix time to-clock 7.75        # 07:45
//! chronix time to-decimal 7:45      # 7.75
//! chronix time sum 01:30 00:45      # 02:15
//! chronix time repair 9:5           # 9:05
//! ```

use crate::{
    libs::{
        messages::Message,
        time::{clock_to_decimal, decimal_to_clock, repair_clock_input, sum_clock_values, to_number},
    },
    msg_print, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
enum TimeCommands {
    #[command(about = "Decimal hours to HH:MM")]
    ToClock { hours: String },
    #[command(about = "HH:MM (or a decimal) to decimal hours, clamped to 0..24")]
    ToDecimal { value: String },
    #[command(about = "Sum HH:MM values without a daily cap")]
    Sum { values: Vec<String> },
    #[command(about = "Normalize partially typed input such as 9 or 9:5")]
    Repair { value: String },
}

#[derive(Debug, Args)]
pub struct TimeArgs {
    #[command(subcommand)]
    command: TimeCommands,
}

pub fn cmd(args: TimeArgs) -> Result<()> {
    match args.command {
        TimeCommands::ToClock { hours } => {
            msg_print!(decimal_to_clock(Some(to_number(&hours))));
        }
        TimeCommands::ToDecimal { value } => {
            msg_print!(format!("{:.2}", clock_to_decimal(&value)));
        }
        TimeCommands::Sum { values } => {
            msg_print!(sum_clock_values(&values));
        }
        TimeCommands::Repair { value } => {
            let repaired = repair_clock_input(&value);
            if !repaired.is_empty() && !repaired.contains(':') {
                msg_warning!(Message::InvalidClockInput(value));
            }
            msg_print!(repaired);
        }
    }
    Ok(())
}
