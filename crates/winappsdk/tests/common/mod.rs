//! A platform that records every native call instead of making it.
//!
//! The bootstrap entry points handed out by [`MockLibrary`] are real
//! `extern "system"` functions, so the initializer's transmute and call path
//! runs unchanged. Each test runs on its own thread, hence thread locals.

#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    ffi::CStr,
    mem,
    path::{Path, PathBuf},
};

use windows_core::{HRESULT, PCWSTR, Result};
use winappsdk::{
    BOOTSTRAP_DLL, BootstrapOptions, FarProc, INITIALIZE_SYMBOL, Library,
    MddBootstrapInitialize2, MddBootstrapShutdown, PackageVersion, Platform, RoInitType,
    SHUTDOWN_SYMBOL,
};

pub const S_OK: HRESULT = HRESULT(0);
pub const E_FAIL: HRESULT = HRESULT(0x8000_4005_u32 as i32);
pub const RPC_E_CHANGED_MODE: HRESULT = HRESULT(0x8001_0106_u32 as i32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    RoInitialize(RoInitType),
    RoUninitialize,
    IdentityQuery,
    Locate,
    Load(PathBuf),
    Resolve(String),
    Initialize {
        major_minor: u32,
        tag: String,
        min_version: PackageVersion,
        options: BootstrapOptions,
    },
    Shutdown,
    Unload,
}

thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
    static INITIALIZE_RESULT: Cell<HRESULT> = const { Cell::new(S_OK) };
}

fn record(call: Call) {
    CALLS.with_borrow_mut(|calls| calls.push(call));
}

/// Everything recorded so far on this thread; clears the log
pub fn take_calls() -> Vec<Call> {
    CALLS.with_borrow_mut(mem::take)
}

pub fn count(call: &Call) -> usize {
    CALLS.with_borrow(|calls| calls.iter().filter(|c| *c == call).count())
}

/// What the next `MddBootstrapInitialize2` call returns
pub fn set_initialize_result(hr: HRESULT) {
    INITIALIZE_RESULT.set(hr);
}

pub fn bootstrap_path() -> PathBuf {
    Path::new(r"C:\app\winappsdk.resources").join(BOOTSTRAP_DLL)
}

#[derive(Debug, Clone)]
pub struct MockPlatform {
    pub ro_result: HRESULT,
    pub identity: bool,
    pub bootstrap: Option<PathBuf>,
    pub load_result: HRESULT,
    pub missing_symbol: Option<&'static CStr>,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            ro_result: S_OK,
            identity: false,
            bootstrap: Some(bootstrap_path()),
            load_result: S_OK,
            missing_symbol: None,
        }
    }
}

impl MockPlatform {
    pub fn packaged() -> Self {
        Self {
            identity: true,
            ..Default::default()
        }
    }

    pub fn without_dll() -> Self {
        Self {
            bootstrap: None,
            ..Default::default()
        }
    }

    pub fn broken_dll() -> Self {
        Self {
            load_result: E_FAIL,
            ..Default::default()
        }
    }
}

impl Platform for MockPlatform {
    type Library = MockLibrary;

    fn ro_initialize(&self, init_type: RoInitType) -> Result<()> {
        record(Call::RoInitialize(init_type));
        self.ro_result.ok()
    }

    fn ro_uninitialize(&self) {
        record(Call::RoUninitialize);
    }

    fn has_package_identity(&self) -> bool {
        record(Call::IdentityQuery);
        self.identity
    }

    fn locate_bootstrap(&self) -> Option<PathBuf> {
        record(Call::Locate);
        self.bootstrap.clone()
    }

    fn load_library(&self, path: &Path) -> Result<Self::Library> {
        record(Call::Load(path.to_owned()));
        self.load_result.ok()?;

        Ok(MockLibrary {
            missing_symbol: self.missing_symbol,
        })
    }

    fn fatal(&self, message: &str) -> ! {
        panic!("fatal: {message}");
    }
}

pub struct MockLibrary {
    missing_symbol: Option<&'static CStr>,
}

type RawProc = unsafe extern "system" fn() -> isize;

impl Library for MockLibrary {
    fn symbol(&self, name: &CStr) -> FarProc {
        record(Call::Resolve(name.to_string_lossy().into_owned()));

        if self.missing_symbol == Some(name) {
            return None;
        }

        if name == INITIALIZE_SYMBOL {
            let f: MddBootstrapInitialize2 = mock_initialize;
            Some(unsafe { mem::transmute::<MddBootstrapInitialize2, RawProc>(f) })
        } else if name == SHUTDOWN_SYMBOL {
            let f: MddBootstrapShutdown = mock_shutdown;
            Some(unsafe { mem::transmute::<MddBootstrapShutdown, RawProc>(f) })
        } else {
            None
        }
    }
}

impl Drop for MockLibrary {
    fn drop(&mut self) {
        record(Call::Unload);
    }
}

unsafe extern "system" fn mock_initialize(
    major_minor: u32,
    tag: PCWSTR,
    min_version: PackageVersion,
    options: BootstrapOptions,
) -> HRESULT {
    // read it by hand; wide strings aren't `wchar_t` everywhere
    let mut wide = Vec::new();
    let mut ptr = tag.as_ptr();
    loop {
        let c = unsafe { *ptr };
        if c == 0 {
            break;
        }
        wide.push(c);
        ptr = unsafe { ptr.add(1) };
    }

    record(Call::Initialize {
        major_minor,
        tag: String::from_utf16_lossy(&wide),
        min_version,
        options,
    });

    INITIALIZE_RESULT.get()
}

unsafe extern "system" fn mock_shutdown() {
    record(Call::Shutdown);
}
