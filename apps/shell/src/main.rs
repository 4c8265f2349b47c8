mod cli;
mod command;
mod session;

use crate::cli::Cli;
use crate::session::Session;
use anyhow::Context;
use capable::Capable;
use capable::domain::config::{CapableConfig, LoggingConfig};
use capable::kernel::config::load_config;
use capable_logger::{Logger, parse_level};
use clap::Parser;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg: CapableConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    if let Some(level) = cli.log_level {
        cfg.logging.level = level;
    }

    let _log = init_logger(&cfg.logging)?;

    Session::start(Capable::from_config(&cfg), tokio::io::stdout(), tokio::io::stderr())?
        .run(BufReader::new(tokio::io::stdin()))
        .await
}

fn init_logger(logging: &LoggingConfig) -> anyhow::Result<Logger> {
    let level = parse_level(&logging.level)?;
    let mut builder = Logger::builder().name(env!("CARGO_BIN_NAME")).level(level);
    if let Some(directives) = &logging.filter {
        builder = builder.filter(directives);
    }
    if let Some(dir) = &logging.path {
        builder = builder.file(dir, logging.json);
    }

    Ok(builder.init()?)
}
