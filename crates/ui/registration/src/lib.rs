pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod headless;
pub mod logging;
pub mod services;
pub mod style;
pub mod tui;

use color_eyre::Result;

use crate::app::App;
use crate::cli::{Cli, Cmd};
use crate::config::Config;

/// Entry point shared by the binary: hooks, logging, config, then TUI or headless submit.
///
/// Returns the process exit code.
pub async fn run(cli: Cli) -> Result<i32> {
    crate::errors::init()?;
    // vor dem Laden der Config, damit deren Warnungen im Log landen
    let _guard = crate::logging::init(&crate::config::get_data_dir())?;
    let config = Config::new(&cli.overrides())?;

    let client = crate::services::submission_client(&config)?;

    match cli.cmd {
        None | Some(Cmd::Run) => {
            let mut app = App::new(config, client, cli.tick_rate, cli.frame_rate)?;
            app.run().await?;
            Ok(headless::EXIT_OK)
        }
        Some(Cmd::Submit(args)) => {
            let snapshot = headless::submit(client, args.into()).await;
            let (lines, code) = headless::report(&snapshot);
            for line in lines {
                if code == headless::EXIT_OK {
                    println!("{line}");
                } else {
                    eprintln!("{line}");
                }
            }
            Ok(code)
        }
    }
}
