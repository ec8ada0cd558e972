mod concat;
mod detect;
mod extract;
mod recover;
mod renumber;
mod run;
mod verify;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Detect(args) => detect::run_detect(args, ctx),
        Command::Extract(args) => extract::run_extract(args, ctx),
        Command::Recover(args) => recover::run_recover(args, ctx),
        Command::Concat(args) => concat::run_concat(args, ctx),
        Command::Renumber(args) => renumber::run_renumber(args, ctx),
        Command::Verify(args) => verify::run_verify(args, ctx),
        Command::Run(args) => run::run_pipeline(args, ctx),
    }
}
