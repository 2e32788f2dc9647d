//! Starts the window manager: parse the command line, install the log
//! subscriber, load the configuration, and hand over to the core event
//! loop on the Xlib backend.
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tagwm_core::{Manager, XlibDisplayServer};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Use this configuration file instead of the XDG location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Check the configuration file and exit
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    if cli.check {
        config::check(cli.config.as_deref())?;
        println!("configuration OK");
        return Ok(());
    }

    tracing::info!("tagwm {} booting", env!("CARGO_PKG_VERSION"));
    let config = config::load(cli.config.as_deref());
    let mut manager = Manager::<config::Config, XlibDisplayServer>::new(config);
    manager.register_child_hook();
    manager.event_loop();
    manager.cleanup();
    tracing::info!("tagwm shut down");
    Ok(())
}

/// `RUST_LOG`-style filtering, `info` when unset.
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
