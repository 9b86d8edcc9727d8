mod count;
mod elements;

use count::run_count;
use elements::run_elements;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Count(args) => run_count(args, ctx),
        Command::Elements(args) => run_elements(args),
    }
}
