use std::{
    ffi::CStr,
    iter,
    os::windows::ffi::OsStrExt,
    path::{Path, PathBuf},
};

use shared::{popup::fatal, utils::OwnedModule};
use tracing::error;
use windows::{
    Win32::System::{
        LibraryLoader::{GetProcAddress, LoadLibraryW},
        WinRT::{RoInitialize, RoUninitialize},
    },
    core::{PCSTR, PCWSTR, Result},
};

use super::{FarProc, Library, Platform};
use crate::{
    config::RuntimeConfig, identity::process_has_identity, locate::Locator, threading::RoInitType,
};

/// The real thing
#[derive(Debug, Clone)]
pub struct Win32 {
    locator: Locator,
    fatal_popup: bool,
}

impl Win32 {
    pub fn new(locator: Locator, fatal_popup: bool) -> Self {
        Self {
            locator,
            fatal_popup,
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        let locator = Locator::new().with_resource_dir(config.resource_dir.clone());
        Self::new(locator, config.fatal_popup)
    }
}

impl Default for Win32 {
    fn default() -> Self {
        Self::new(Locator::new(), true)
    }
}

impl Platform for Win32 {
    type Library = OwnedModule;

    fn ro_initialize(&self, init_type: RoInitType) -> Result<()> {
        // SAFETY: Standard function, any RO_INIT_TYPE value is checked by the OS
        unsafe { RoInitialize(init_type.into()) }
    }

    fn ro_uninitialize(&self) {
        // SAFETY: only called by the owner of a successful `ro_initialize`
        unsafe {
            RoUninitialize();
        }
    }

    fn has_package_identity(&self) -> bool {
        process_has_identity()
    }

    fn locate_bootstrap(&self) -> Option<PathBuf> {
        self.locator.locate()
    }

    fn load_library(&self, path: &Path) -> Result<Self::Library> {
        let path = path
            .as_os_str()
            .encode_wide()
            .chain(iter::once(0))
            .collect::<Vec<_>>();

        // SAFETY: Standard function, and our string is NUL terminated
        let module = unsafe { LoadLibraryW(PCWSTR::from_raw(path.as_ptr()))? };

        // SAFETY: freshly loaded, and only the wrapper frees it
        Ok(unsafe { OwnedModule::new(module) })
    }

    fn fatal(&self, message: &str) -> ! {
        error!("{message}");
        fatal("Windows App SDK", message, self.fatal_popup);
    }
}

impl Library for OwnedModule {
    fn symbol(&self, name: &CStr) -> FarProc {
        // SAFETY: module is alive for as long as self, name is NUL terminated
        unsafe { GetProcAddress(self.as_raw_module(), PCSTR::from_raw(name.as_ptr().cast())) }
    }
}
