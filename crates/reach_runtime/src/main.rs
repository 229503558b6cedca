//! Reach Runtime
//!
//! Replays a recorded VR session through the interaction tools and prints
//! what happened. Controller tracking and rendering live elsewhere; this
//! binary feeds recorded poses and trigger values instead.
//!
//! Run with: cargo run --bin reach -- [session.toml]
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variable: `REACH_CONFIG=/path/to/reach.toml`
//! 2. `reach.toml` in the working directory
//! 3. Built-in defaults

mod error;
mod runtime;
mod session;

use crate::error::Result;
use crate::runtime::Runtime;
use crate::session::Session;
use reach_interact::InteractionConfig;
use std::path::Path;

const CONFIG_ENV: &str = "REACH_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "reach.toml";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = load_config()?;

    let session = match std::env::args().nth(1) {
        Some(path) => Session::load(path)?,
        None => {
            log::info!("No session given, replaying the built-in demo");
            Session::demo()?
        }
    };

    let mut runtime = Runtime::new(config, &session)?;
    let stats = runtime.run(&session.frames);
    stats.print_summary();
    Ok(())
}

fn load_config() -> Result<InteractionConfig> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let config = InteractionConfig::load_from_file(&path)?;
        log::info!("Loaded config from {} ({})", path, CONFIG_ENV);
        return Ok(config);
    }

    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        let config = InteractionConfig::load_from_file(DEFAULT_CONFIG_FILE)?;
        log::info!("Loaded config from {}", DEFAULT_CONFIG_FILE);
        return Ok(config);
    }

    log::info!("Using default interaction config");
    Ok(InteractionConfig::default())
}
