use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::{
    bootstrap::Session,
    error::InitError,
    platform::Platform,
    threading::ThreadingModel,
    version::{BootstrapOptions, RuntimeVersion},
};
#[cfg(windows)]
use crate::{config::RuntimeConfig, platform::Win32};

/// Construction inputs of [`WindowsAppRuntimeInitializer`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub threading_model: ThreadingModel,
    /// The app ships its own copy of the runtime, so the bootstrapper is skipped
    pub self_contained: bool,
    pub version: RuntimeVersion,
    pub options: BootstrapOptions,
}

impl Settings {
    pub fn new(threading_model: ThreadingModel, self_contained: bool) -> Self {
        Self {
            threading_model,
            self_contained,
            ..Default::default()
        }
    }
}

/// Initializes the Windows Runtime, and the Windows App SDK bootstrapper if
/// needed, for as long as this value lives.
///
/// Teardown happens on drop, in this order: `RoUninitialize`,
/// `MddBootstrapShutdown`, unload of the bootstrap dll.
///
/// Apartments are per thread, so this is neither `Send` nor `Sync`. Only one
/// should exist per process; nothing guards against more.
pub struct WindowsAppRuntimeInitializer<P: Platform> {
    platform: P,
    threading_model: ThreadingModel,
    self_contained: bool,
    has_package_identity: bool,
    should_bootstrap: bool,
    session: Option<Session<P::Library>>,
    _not_send: PhantomData<*mut ()>,
}

/// The initializer on the real Win32 platform
#[cfg(windows)]
pub type RuntimeInitializer = WindowsAppRuntimeInitializer<Win32>;

#[cfg(windows)]
impl WindowsAppRuntimeInitializer<Win32> {
    pub fn new(threading_model: ThreadingModel, self_contained: bool) -> Result<Self, InitError> {
        Self::with_settings(&Settings::new(threading_model, self_contained))
    }

    pub fn with_settings(settings: &Settings) -> Result<Self, InitError> {
        Self::with_platform(Win32::default(), settings)
    }

    pub fn from_config(config: &RuntimeConfig) -> Result<Self, InitError> {
        Self::with_platform(Win32::from_config(config), &config.settings())
    }
}

impl<P: Platform> WindowsAppRuntimeInitializer<P> {
    pub fn with_platform(platform: P, settings: &Settings) -> Result<Self, InitError> {
        let Settings {
            threading_model,
            self_contained,
            ..
        } = *settings;

        trace!(%threading_model, "RoInitialize");
        platform
            .ro_initialize(threading_model.into())
            .map_err(InitError::Apartment)?;

        let has_package_identity = platform.has_package_identity();
        let should_bootstrap = !has_package_identity && !self_contained;

        debug!(
            has_package_identity,
            self_contained, should_bootstrap, "runtime initialized"
        );

        // from here on, drop undoes the apartment
        let mut this = Self {
            platform,
            threading_model,
            self_contained,
            has_package_identity,
            should_bootstrap,
            session: None,
            _not_send: PhantomData,
        };

        if !should_bootstrap {
            return Ok(this);
        }

        // stored first, so a failed initialize still gets its shutdown on drop
        let session = this
            .session
            .insert(Session::load(&this.platform));
        session.initialize(&settings.version, settings.options)?;

        Ok(this)
    }

    pub fn threading_model(&self) -> ThreadingModel {
        self.threading_model
    }

    pub fn self_contained(&self) -> bool {
        self.self_contained
    }

    /// Queried once at construction
    pub fn has_package_identity(&self) -> bool {
        self.has_package_identity
    }

    pub fn should_bootstrap(&self) -> bool {
        self.should_bootstrap
    }

    /// Whether the bootstrap library is loaded and will be shut down on drop
    pub fn is_bootstrapped(&self) -> bool {
        self.session.is_some()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }
}

impl<P: Platform> Drop for WindowsAppRuntimeInitializer<P> {
    fn drop(&mut self) {
        trace!("RoUninitialize");
        self.platform.ro_uninitialize();

        // shutdown, then unload
        drop(self.session.take());
    }
}
