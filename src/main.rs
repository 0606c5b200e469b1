#![forbid(unsafe_code)]

use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use bellview::app::{Config, TerminalEvents, TerminalSurface, prepare, run_loop, settle};
use bellview::{Result, Stage};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bellview=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn run(config: &Config) -> Result<()> {
    let mut controller = prepare(config)?;
    let mut surface = TerminalSurface::enter().map_err(|e| e.in_stage(Stage::Render))?;
    let outcome = run_loop(&mut controller, &mut surface, &mut TerminalEvents);
    let restored = surface.restore();
    settle(outcome, restored)
}

fn main() -> ExitCode {
    let config = Config::parse();
    if let Err(err) = init_tracing(config.log_file.as_deref()) {
        eprintln!("error: cannot set up logging: {err}");
        return ExitCode::FAILURE;
    }
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // On stderr the log line would repeat the message below.
            if config.log_file.is_some() {
                error!(stage = ?err.stage(), "{err}");
            }
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
