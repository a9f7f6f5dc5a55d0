use slr_core::cmd::cli::Cli;
use slr_core::cmd::config::Config;

use clap::Parser;
use log::debug;
use std::process;

fn main() {
    let cfg: Config = Cli::parse().into_config();

    // RUST_LOG wins over --verbose
    let default_filter = if cfg.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    debug!("{:?}", cfg.action);
    if let Err(e) = cfg.run() {
        eprintln!("{e}");
        process::exit(1);
    }
}
