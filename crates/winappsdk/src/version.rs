use std::{fmt, ops::BitOr, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Windows App SDK release the bootstrapper is asked for, `major.minor`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Release {
    pub major: u16,
    pub minor: u16,
}

impl Release {
    /// The 1.6 release
    pub const DEFAULT: Self = Self { major: 1, minor: 6 };

    /// Packed `0xMMMMNNNN` form, same as `WINDOWSAPPSDK_RELEASE_MAJORMINOR`
    pub fn major_minor(self) -> u32 {
        (u32::from(self.major) << 16) | u32::from(self.minor)
    }
}

impl Default for Release {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Release {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Release(s.to_owned());

        let (major, minor) = s.trim().split_once('.').ok_or_else(err)?;
        let major = major.parse().map_err(|_| err())?;
        let minor = minor.parse().map_err(|_| err())?;

        Ok(Self { major, minor })
    }
}

impl TryFrom<String> for Release {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Release> for String {
    fn from(value: Release) -> Self {
        value.to_string()
    }
}

/// Native `PACKAGE_VERSION`, passed by value to the bootstrapper.
/// Zero means "any version of the requested release".
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageVersion {
    pub revision: u16,
    pub build: u16,
    pub minor: u16,
    pub major: u16,
}

const _: () = assert!(size_of::<PackageVersion>() == size_of::<u64>());

impl PackageVersion {
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            revision,
            build,
            minor,
            major,
        }
    }

    /// The union view of `PACKAGE_VERSION`
    pub fn as_u64(self) -> u64 {
        (u64::from(self.major) << 48)
            | (u64::from(self.minor) << 32)
            | (u64::from(self.build) << 16)
            | u64::from(self.revision)
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl FromStr for PackageVersion {
    type Err = ParseError;

    /// Accepts 1 to 4 dotted parts; missing trailing parts are zero
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::PackageVersion(s.to_owned());

        let mut parts = [0u16; 4];
        let mut count = 0;
        for part in s.trim().split('.') {
            let slot = parts.get_mut(count).ok_or_else(err)?;
            *slot = part.parse().map_err(|_| err())?;
            count += 1;
        }

        let [major, minor, build, revision] = parts;
        Ok(Self::new(major, minor, build, revision))
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PackageVersion> for String {
    fn from(value: PackageVersion) -> Self {
        value.to_string()
    }
}

/// Native `MddBootstrapInitializeOptions` flags
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BootstrapOptions(pub u32);

impl BootstrapOptions {
    pub const NONE: Self = Self(0);
    pub const ON_ERROR_DEBUG_BREAK: Self = Self(0x0001);
    pub const ON_ERROR_DEBUG_BREAK_IF_DEBUGGER_ATTACHED: Self = Self(0x0002);
    pub const ON_ERROR_FAIL_FAST: Self = Self(0x0004);
    pub const ON_NO_MATCH_SHOW_UI: Self = Self(0x0008);
    pub const ON_PACKAGE_IDENTITY_NOOP: Self = Self(0x0010);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Prompt the user to install the runtime when no compatible one is found
impl Default for BootstrapOptions {
    fn default() -> Self {
        Self::ON_NO_MATCH_SHOW_UI
    }
}

impl BitOr for BootstrapOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Config-facing name of a single [`BootstrapOptions`] flag
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BootstrapOption {
    OnErrorDebugBreak,
    OnErrorDebugBreakIfDebuggerAttached,
    OnErrorFailFast,
    OnNoMatchShowUi,
    OnPackageIdentityNoop,
}

impl From<BootstrapOption> for BootstrapOptions {
    fn from(value: BootstrapOption) -> Self {
        match value {
            BootstrapOption::OnErrorDebugBreak => Self::ON_ERROR_DEBUG_BREAK,
            BootstrapOption::OnErrorDebugBreakIfDebuggerAttached => {
                Self::ON_ERROR_DEBUG_BREAK_IF_DEBUGGER_ATTACHED
            }
            BootstrapOption::OnErrorFailFast => Self::ON_ERROR_FAIL_FAST,
            BootstrapOption::OnNoMatchShowUi => Self::ON_NO_MATCH_SHOW_UI,
            BootstrapOption::OnPackageIdentityNoop => Self::ON_PACKAGE_IDENTITY_NOOP,
        }
    }
}

impl FromIterator<BootstrapOption> for BootstrapOptions {
    fn from_iter<T: IntoIterator<Item = BootstrapOption>>(iter: T) -> Self {
        iter.into_iter()
            .map(Self::from)
            .fold(Self::NONE, BitOr::bitor)
    }
}

/// Everything `MddBootstrapInitialize2` needs to pick a runtime
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeVersion {
    pub release: Release,
    /// Empty for stable releases, e.g. `preview1` otherwise
    pub tag: String,
    pub min_version: PackageVersion,
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tag.is_empty() {
            write!(f, "{}", self.release)
        } else {
            write!(f, "{}-{}", self.release, self.tag)
        }
    }
}
