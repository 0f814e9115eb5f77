use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
#[cfg(windows)]
use windows::Win32::System::WinRT::RO_INIT_TYPE;

use crate::error::ParseError;

/// Apartment concurrency mode requested from `RoInitialize`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadingModel {
    #[default]
    Single,
    Multi,
}

/// Value of the native `RO_INIT_TYPE` handed to `RoInitialize`
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RoInitType(pub i32);

impl RoInitType {
    pub const SINGLETHREADED: Self = Self(0);
    pub const MULTITHREADED: Self = Self(1);
}

impl From<ThreadingModel> for RoInitType {
    fn from(value: ThreadingModel) -> Self {
        match value {
            ThreadingModel::Single => RoInitType::SINGLETHREADED,
            ThreadingModel::Multi => RoInitType::MULTITHREADED,
        }
    }
}

#[cfg(windows)]
impl From<RoInitType> for RO_INIT_TYPE {
    fn from(value: RoInitType) -> Self {
        RO_INIT_TYPE(value.0)
    }
}

impl fmt::Display for ThreadingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = match self {
            ThreadingModel::Single => "single",
            ThreadingModel::Multi => "multi",
        };

        write!(f, "{model}")
    }
}

impl FromStr for ThreadingModel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("single") {
            Ok(Self::Single)
        } else if s.eq_ignore_ascii_case("multi") {
            Ok(Self::Multi)
        } else {
            Err(ParseError::ThreadingModel(s.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_native_apartment() {
        assert_eq!(RoInitType::from(ThreadingModel::Single), RoInitType(0));
        assert_eq!(RoInitType::from(ThreadingModel::Multi), RoInitType(1));
    }

    #[cfg(windows)]
    #[test]
    fn values_match_windows_headers() {
        use windows::Win32::System::WinRT::{RO_INIT_MULTITHREADED, RO_INIT_SINGLETHREADED};

        assert_eq!(RO_INIT_TYPE::from(RoInitType::SINGLETHREADED), RO_INIT_SINGLETHREADED);
        assert_eq!(RO_INIT_TYPE::from(RoInitType::MULTITHREADED), RO_INIT_MULTITHREADED);
    }

    #[test]
    fn default_is_single() {
        assert_eq!(ThreadingModel::default(), ThreadingModel::Single);
    }

    #[test]
    fn parses_case_insensitive() {
        assert_eq!("Single".parse::<ThreadingModel>().unwrap(), ThreadingModel::Single);
        assert_eq!("MULTI".parse::<ThreadingModel>().unwrap(), ThreadingModel::Multi);
        assert!(matches!(
            "both".parse::<ThreadingModel>(),
            Err(ParseError::ThreadingModel(s)) if s == "both"
        ));
    }
}
