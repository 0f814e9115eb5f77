//! Scoped initialization of the Windows Runtime and, when the process has no
//! package identity, the Windows App SDK bootstrapper.
//!
//! ```ignore
//! use winappsdk::{ThreadingModel, WindowsAppRuntimeInitializer};
//!
//! fn main() {
//!     let _runtime = match WindowsAppRuntimeInitializer::new(ThreadingModel::Single, false) {
//!         Ok(runtime) => runtime,
//!         Err(e) => panic!("Failed to initialize WindowsAppRuntimeInitializer: {e}"),
//!     };
//!
//!     // initialization code here; the runtime shuts down when `_runtime` drops
//! }
//! ```

mod bootstrap;
pub mod config;
mod error;
#[cfg(windows)]
mod identity;
mod initializer;
pub mod locate;
pub mod platform;
mod threading;
mod version;

pub use bootstrap::{
    INITIALIZE_SYMBOL, MddBootstrapInitialize2, MddBootstrapShutdown, SHUTDOWN_SYMBOL,
};
pub use config::Config;
pub use error::{InitError, ParseError};
#[cfg(windows)]
pub use identity::process_has_identity;
pub use initializer::{Settings, WindowsAppRuntimeInitializer};
pub use locate::{BOOTSTRAP_DLL, Locator, RESOURCE_SUBDIR};
pub use platform::{FarProc, Library, Platform};
pub use threading::{RoInitType, ThreadingModel};
pub use version::{BootstrapOption, BootstrapOptions, PackageVersion, Release, RuntimeVersion};

#[cfg(windows)]
pub use initializer::RuntimeInitializer;
#[cfg(windows)]
pub use platform::Win32;

/// Initializes the runtime for the calling thread with the production platform.
#[cfg(windows)]
pub fn create(
    threading_model: ThreadingModel,
    self_contained: bool,
) -> Result<RuntimeInitializer, InitError> {
    WindowsAppRuntimeInitializer::new(threading_model, self_contained)
}
