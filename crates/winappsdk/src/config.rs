use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, trace};

use crate::{
    initializer::Settings,
    threading::ThreadingModel,
    version::{BootstrapOption, PackageVersion, Release, RuntimeVersion},
};

/// File name looked up next to the executable
pub const CONFIG_FILE: &str = "winappsdk.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub runtime: RuntimeConfig,
    pub log: Log,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// `single` or `multi`
    pub threading_model: ThreadingModel,
    /// Set when the app bundles the runtime itself; skips the bootstrapper
    pub self_contained: bool,
    /// Windows App SDK release to bootstrap, e.g. "1.6"
    pub release: Release,
    /// Release channel tag; empty for stable
    pub version_tag: String,
    /// Minimum runtime package version, "0.0.0.0" accepts any
    pub min_version: PackageVersion,
    /// Bootstrapper behavior flags, e.g. "on-no-match-show-ui"
    pub options: Vec<BootstrapOption>,
    /// Directory holding the bootstrap dll, if not next to the executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_dir: Option<PathBuf>,
    /// Show an error popup before exiting on a broken deployment
    pub fatal_popup: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            threading_model: ThreadingModel::default(),
            self_contained: false,
            release: Release::default(),
            version_tag: String::new(),
            min_version: PackageVersion::default(),
            options: vec![BootstrapOption::OnNoMatchShowUi],
            resource_dir: None,
            fatal_popup: true,
        }
    }
}

impl RuntimeConfig {
    pub fn settings(&self) -> Settings {
        Settings {
            threading_model: self.threading_model,
            self_contained: self.self_contained,
            version: RuntimeVersion {
                release: self.release,
                tag: self.version_tag.clone(),
                min_version: self.min_version,
            },
            options: self.options.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Log {
    /// configure logger level; also settable through env var WINAPPSDK_LOG
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// whether to display log targets
    pub target: bool,
    /// emit json lines instead of human readable output
    pub json: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        trace!(path = %path.display(), "Loading config");

        let config = match fs::read_to_string(path) {
            Ok(v) => v,
            Err(e) => {
                error!("failed to read config: {e}");
                return Err(e.into());
            }
        };

        match toml::from_str::<Config>(&config) {
            Ok(v) => Ok(v),
            Err(e) => {
                error!("failed to deserialize config: {e}");
                Err(e.into())
            }
        }
    }

    /// Defaults when the file doesn't exist; a broken file is still an error
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            trace!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::version::BootstrapOptions;

    #[test]
    fn empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());

        let settings = config.runtime.settings();
        assert_eq!(settings.threading_model, ThreadingModel::Single);
        assert!(!settings.self_contained);
        assert_eq!(settings.version.release.major_minor(), 0x0001_0006);
        assert_eq!(settings.version.tag, "");
        assert_eq!(settings.version.min_version, PackageVersion::default());
        assert_eq!(settings.options, BootstrapOptions::ON_NO_MATCH_SHOW_UI);
    }

    #[test]
    fn parses_full_runtime_section() {
        let config: Config = toml::from_str(
            r#"
            [runtime]
            threading_model = "multi"
            self_contained = true
            release = "1.7"
            version_tag = "experimental1"
            min_version = "7000.1.2.3"
            options = ["on-no-match-show-ui", "on-error-fail-fast"]
            resource_dir = 'C:\app\res'
            fatal_popup = false

            [log]
            level = "trace"
            json = true
            "#,
        )
        .unwrap();

        let runtime = &config.runtime;
        assert_eq!(runtime.threading_model, ThreadingModel::Multi);
        assert!(runtime.self_contained);
        assert!(!runtime.fatal_popup);
        assert_eq!(runtime.resource_dir.as_deref(), Some(Path::new(r"C:\app\res")));

        let settings = runtime.settings();
        assert_eq!(settings.version.release, Release { major: 1, minor: 7 });
        assert_eq!(settings.version.tag, "experimental1");
        assert_eq!(settings.version.min_version, PackageVersion::new(7000, 1, 2, 3));
        assert_eq!(settings.options.0, 0x8 | 0x4);

        assert_eq!(config.log.level.as_deref(), Some("trace"));
        assert!(config.log.json);
        assert!(!config.log.target);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(toml::from_str::<Config>("[runtime]\nthreading_model = \"both\"").is_err());
        assert!(toml::from_str::<Config>("[runtime]\nrelease = \"1\"").is_err());
        assert!(toml::from_str::<Config>("[runtime]\nmin_version = \"x.y\"").is_err());
        assert!(toml::from_str::<Config>("[runtime]\noptions = [\"shout\"]").is_err());
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn load_or_default_handles_missing_and_broken_files() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);

        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
        assert!(Config::load(&path).is_err());

        fs::write(&path, "[runtime]\nself_contained = true\n").unwrap();
        assert!(Config::load_or_default(&path).unwrap().runtime.self_contained);

        fs::write(&path, "[runtime\n").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }
}
