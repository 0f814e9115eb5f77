use std::{ffi::CStr, iter, mem};

use tracing::{info, trace};
use windows_core::{HRESULT, PCWSTR};

use crate::{
    error::InitError,
    locate::BOOTSTRAP_DLL,
    platform::{Library, Platform},
    version::{BootstrapOptions, PackageVersion, RuntimeVersion},
};

pub const INITIALIZE_SYMBOL: &CStr = c"MddBootstrapInitialize2";
pub const SHUTDOWN_SYMBOL: &CStr = c"MddBootstrapShutdown";

pub type MddBootstrapInitialize2 =
    unsafe extern "system" fn(u32, PCWSTR, PackageVersion, BootstrapOptions) -> HRESULT;
pub type MddBootstrapShutdown = unsafe extern "system" fn();

type RawProc = unsafe extern "system" fn() -> isize;

/// The loaded bootstrapper and its two entry points.
///
/// Drop calls `MddBootstrapShutdown`, then unloads the library. That happens
/// once the library is loaded, whether or not [`Session::initialize`]
/// succeeded.
pub(crate) struct Session<L> {
    initialize: MddBootstrapInitialize2,
    shutdown: MddBootstrapShutdown,
    // dropped after `Drop::drop` ran, so the library outlives the shutdown call
    _library: L,
}

impl<L: Library> Session<L> {
    /// Locate and load the bootstrapper, and resolve its entry points.
    /// Every failure here is a broken deployment and fatal.
    pub(crate) fn load<P>(platform: &P) -> Self
    where
        P: Platform<Library = L>,
    {
        let Some(path) = platform.locate_bootstrap() else {
            platform.fatal(&format!("{BOOTSTRAP_DLL} not found!"));
        };

        trace!(path = %path.display(), "loading bootstrap library");

        let library = match platform.load_library(&path) {
            Ok(library) => library,
            Err(e) => platform.fatal(&format!("Failed to load {BOOTSTRAP_DLL}: {e}")),
        };

        let initialize = resolve(platform, &library, INITIALIZE_SYMBOL);
        let shutdown = resolve(platform, &library, SHUTDOWN_SYMBOL);

        // SAFETY: These are the documented signatures of the exports. The
        //         library is kept alive for as long as the pointers are used
        let initialize = unsafe { mem::transmute::<RawProc, MddBootstrapInitialize2>(initialize) };
        // SAFETY: same as above
        let shutdown = unsafe { mem::transmute::<RawProc, MddBootstrapShutdown>(shutdown) };

        Self {
            initialize,
            shutdown,
            _library: library,
        }
    }

    /// Call `MddBootstrapInitialize2`. A failure is recoverable
    pub(crate) fn initialize(
        &self,
        version: &RuntimeVersion,
        options: BootstrapOptions,
    ) -> Result<(), InitError> {
        let tag = version
            .tag
            .encode_utf16()
            .chain(iter::once(0))
            .collect::<Vec<_>>();

        info!(release = %version, options = options.0, "initializing windows app sdk");

        // SAFETY: tag is NUL terminated and outlives the call, the library is loaded
        let hr = unsafe {
            (self.initialize)(
                version.release.major_minor(),
                PCWSTR::from_raw(tag.as_ptr()),
                version.min_version,
                options,
            )
        };

        hr.ok().map_err(InitError::Bootstrap)?;

        trace!("bootstrap initialized");

        Ok(())
    }
}

impl<L> Drop for Session<L> {
    fn drop(&mut self) {
        trace!("shutting down bootstrap");

        // SAFETY: the library is still loaded
        unsafe {
            (self.shutdown)();
        }
    }
}

fn resolve<P: Platform>(platform: &P, library: &P::Library, name: &CStr) -> RawProc {
    trace!(symbol = ?name, "resolving");

    match library.symbol(name) {
        Some(f) => f,
        None => platform.fatal(&format!(
            "{} not found in {BOOTSTRAP_DLL}",
            name.to_string_lossy()
        )),
    }
}
