use regplot_core::cmd::cli::Cli;
use regplot_core::cmd::config::Config;

use clap::Parser;
use std::process;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let cfg: Config = cli.into_config();
    log::debug!("running {:?}", cfg.action);
    if let Err(e) = cfg.run() {
        eprintln!("{e}");
        process::exit(1);
    }
}
