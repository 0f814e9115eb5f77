use std::path::PathBuf;

use shared::paths::get_exe_dir;
use tracing::{trace, warn};

/// File name of the Windows App SDK bootstrapper
pub const BOOTSTRAP_DLL: &str = "Microsoft.WindowsAppRuntime.Bootstrap.dll";
/// Directory next to the executable that bundled resources are copied into
pub const RESOURCE_SUBDIR: &str = "winappsdk.resources";

/// Finds the bootstrap dll shipped alongside the application
#[derive(Debug, Clone, Default)]
pub struct Locator {
    resource_dir: Option<PathBuf>,
    base_dir: Option<PathBuf>,
}

impl Locator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checked before anything else
    pub fn with_resource_dir(mut self, dir: impl Into<Option<PathBuf>>) -> Self {
        self.resource_dir = dir.into();
        self
    }

    /// Replaces the executable's directory as the search base
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Candidate dll paths, in search order
    pub fn candidates(&self) -> Vec<PathBuf> {
        let base = match &self.base_dir {
            Some(dir) => Some(dir.clone()),
            None => match get_exe_dir() {
                Ok(dir) => Some(dir),
                Err(e) => {
                    warn!(err = %e, "failed to resolve exe dir");
                    None
                }
            },
        };

        let mut dirs = Vec::with_capacity(3);
        dirs.extend(self.resource_dir.clone());
        if let Some(base) = base {
            dirs.push(base.join(RESOURCE_SUBDIR));
            dirs.push(base);
        }

        dirs.into_iter().map(|dir| dir.join(BOOTSTRAP_DLL)).collect()
    }

    /// First candidate that exists as a file
    pub fn locate(&self) -> Option<PathBuf> {
        self.candidates().into_iter().find(|path| {
            trace!(path = %path.display(), "Looking for bootstrap dll");
            path.is_file()
        })
    }
}
