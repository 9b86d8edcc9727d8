use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.verbosity.log_filter()),
    )
    .format_timestamp(None)
    .init();

    let ctx = display::Context::detect().with_quiet(cli.verbosity.quiet);

    if ctx.interactive {
        display::print_banner();
    }

    match commands::dispatch(cli.command, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
