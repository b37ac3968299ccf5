//! Binary entry point: parse flags, start file logging, and drive the Ratatui
//! event loop over an empty roster until the user exits.
use clap::Parser;
use student_roster::config::Cli;
use student_roster::logging::init_logging;
use student_roster::{run_app, App, Roster};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_config())?;

    let mut app = App::new(Roster::new());
    run_app(&mut app)
}
