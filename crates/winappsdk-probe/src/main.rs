mod cli;
mod logging;
mod panic;

use std::process::ExitCode;

use eyre::Result;
use shared::paths::get_exe_dir;
use tracing::error;
use winappsdk::{Config, config::CONFIG_FILE};

use cli::Args;
use logging::setup_logging;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Args = argh::from_env();

    let path = match &args.config {
        Some(path) => path.clone(),
        None => get_exe_dir()?.join(CONFIG_FILE),
    };

    let mut config = Config::load_or_default(&path)?;
    args.apply(&mut config.runtime);

    setup_logging(&config.log)?;
    panic::set_hook(path);

    probe(&config)
}

#[cfg(windows)]
fn probe(config: &Config) -> Result<()> {
    use tracing::info;
    use winappsdk::RuntimeInitializer;

    let runtime = RuntimeInitializer::from_config(&config.runtime)?;

    info!(
        threading_model = %runtime.threading_model(),
        has_package_identity = runtime.has_package_identity(),
        self_contained = runtime.self_contained(),
        bootstrapped = runtime.is_bootstrapped(),
        "Windows App SDK runtime ready"
    );

    // teardown runs here
    drop(runtime);
    info!("Windows App SDK runtime shut down");

    Ok(())
}

#[cfg(not(windows))]
fn probe(_config: &Config) -> Result<()> {
    eyre::bail!("the Windows App SDK runtime is only available on windows")
}
