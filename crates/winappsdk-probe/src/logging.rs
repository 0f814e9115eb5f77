use std::io;

use eyre::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};
use winappsdk::config::Log;

const LOG_ENV: &str = "WINAPPSDK_LOG";

pub fn setup_logging(log: &Log) -> Result<()> {
    let default = match &log.level {
        Some(level) => level.parse::<LevelFilter>()?,
        None if cfg!(debug_assertions) => LevelFilter::TRACE,
        None => LevelFilter::INFO,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_target(log.target)
        .with_env_filter(env_filter)
        .with_writer(io::stderr);

    if log.json {
        builder.json().finish().try_init()?;
    } else {
        builder.finish().try_init()?;
    }

    Ok(())
}
