use std::path::PathBuf;

use argh::FromArgs;
use winappsdk::{ThreadingModel, config::RuntimeConfig};

/// Initializes the Windows App SDK runtime, reports its state, and shuts it down again
#[derive(Debug, Default, FromArgs)]
pub struct Args {
    /// enter a multi-threaded apartment instead of a single-threaded one
    #[argh(switch)]
    pub multi: bool,

    /// skip the bootstrapper; the app ships its own copy of the runtime
    #[argh(switch)]
    pub self_contained: bool,

    /// config file to use instead of winappsdk.toml next to the executable
    #[argh(option)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Flags only ever turn things on; they never undo the config
    pub fn apply(&self, runtime: &mut RuntimeConfig) {
        if self.multi {
            runtime.threading_model = ThreadingModel::Multi;
        }

        if self.self_contained {
            runtime.self_contained = true;
        }
    }
}
