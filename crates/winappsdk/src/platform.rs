//! Native collaborators of the initializer.
//!
//! Everything the initializer does to the process goes through [`Platform`],
//! so the sequencing logic is independent of where the calls land.

#[cfg(windows)]
mod win32;

use std::{
    ffi::CStr,
    path::{Path, PathBuf},
};

use windows_core::Result;

use crate::threading::RoInitType;

#[cfg(windows)]
pub use win32::Win32;

/// Address of an export, same shape as the native `FARPROC`
pub type FarProc = Option<unsafe extern "system" fn() -> isize>;

pub trait Platform {
    type Library: Library;

    /// Enter the Windows Runtime apartment for the calling thread
    fn ro_initialize(&self, init_type: RoInitType) -> Result<()>;

    /// Leave the apartment. Must not fail
    fn ro_uninitialize(&self);

    /// Whether the process runs with a package identity. Side-effect free
    fn has_package_identity(&self) -> bool;

    /// Path of the bootstrap dll, `None` if it isn't deployed
    fn locate_bootstrap(&self) -> Option<PathBuf>;

    fn load_library(&self, path: &Path) -> Result<Self::Library>;

    /// Broken deployment. Reports `message` and terminates the process
    fn fatal(&self, message: &str) -> !;
}

/// A loaded module. Dropping it unloads the module
pub trait Library {
    /// Resolve an exported symbol by exact name
    fn symbol(&self, name: &CStr) -> FarProc;
}
