use thiserror::Error;
use windows_core::HRESULT;

/// Recoverable initialization failure.
///
/// Deployment problems (missing or broken bootstrap dll) are not represented
/// here; those terminate the process through [`crate::Platform::fatal`].
#[derive(Error, Debug)]
pub enum InitError {
    /// `RoInitialize` rejected the requested apartment
    #[error("RoInitialize failed: {0}")]
    Apartment(windows_core::Error),

    /// `MddBootstrapInitialize2` returned a failure
    #[error("MddBootstrapInitialize2 failed: {0}")]
    Bootstrap(windows_core::Error),
}

impl InitError {
    /// The native result code
    pub fn code(&self) -> HRESULT {
        match self {
            InitError::Apartment(e) | InitError::Bootstrap(e) => e.code(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown threading model `{0}`, expected `single` or `multi`")]
    ThreadingModel(String),

    #[error("invalid release `{0}`, expected `major.minor`")]
    Release(String),

    #[error("invalid package version `{0}`, expected `major.minor.build.revision`")]
    PackageVersion(String),
}
