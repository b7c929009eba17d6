use anyhow::Result;

mod args;
mod exit_status;

pub use args::{Arguments, Command, CommonArgs, ExtractArgs, UpdateArgs};
pub use exit_status::ExitStatus;

use crate::commands;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Extract(cmd)) => commands::extract::run(cmd),
        Some(Command::Update(cmd)) => commands::update::run(cmd),
        Some(Command::Init) => commands::init(),
        None => unreachable!("with_command_or_help returned Some without a command"),
    }
}
