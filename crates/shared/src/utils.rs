#[cfg(windows)]
pub use module::OwnedModule;

#[cfg(windows)]
mod module {
    use windows::{Win32::Foundation::HMODULE, core::Free};

    /// A module loaded with `LoadLibraryW`. Frees itself on drop
    #[repr(transparent)]
    #[derive(Debug)]
    pub struct OwnedModule(HMODULE);

    impl OwnedModule {
        /// # Safety
        ///
        /// `module` must come from a successful `LoadLibrary*` call, and nothing
        /// else may free it.
        pub unsafe fn new(module: HMODULE) -> Self {
            Self(module)
        }

        /// Note: the module gets freed at end of scope; it is POSSIBLE to keep a copy
        ///       of this since HMODULE: Copy
        pub fn as_raw_module(&self) -> HMODULE {
            self.0
        }
    }

    impl Drop for OwnedModule {
        fn drop(&mut self) {
            unsafe {
                self.0.free();
            }
        }
    }
}
