//! Console entry point for the car inventory manager.
//!
//! # Responsibility
//! - Parse arguments, start logging, and run the menu loop on stdio.
//! - Exit with status 0 when the operator chooses exit.

mod config;
mod console;
mod menu;

use carlot_core::{init_logging, serializer_for, CarService};
use clap::Parser;
use config::Cli;
use console::Console;
use log::info;
use menu::Menu;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match init_logging(cli.log_level, &cli.log_dir()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            None
        }
    };

    let storage = cli.storage();
    info!(
        "event=cli_start module=cli status=ok format={} path={}",
        storage.format,
        storage.path.display()
    );

    let service = CarService::new(serializer_for(storage.format, storage.path));
    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout(), io::stderr());
    let mut menu = Menu::new(service, console);

    match menu.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fatal console error: {err}");
            ExitCode::FAILURE
        }
    }
}
