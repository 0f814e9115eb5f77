use std::{env, path::PathBuf, sync::OnceLock};

use eyre::{Result, eyre};
use tracing::trace;

/// Directory of the running executable. Resources ship next to it.
pub fn get_exe_dir() -> Result<PathBuf> {
    static CACHE: OnceLock<PathBuf> = OnceLock::new();

    if let Some(cache) = CACHE.get() {
        return Ok(cache.clone());
    }

    let exe = env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| eyre!("executable path {} has no parent", exe.display()))?
        .to_owned();

    trace!(path = %dir.display(), "Resolved exe dir");

    _ = CACHE.set(dir.clone());
    Ok(dir)
}
