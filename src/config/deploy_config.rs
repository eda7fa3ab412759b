//! Deployment configuration resolution
//!
//! Merges CLI flags, environment probing and platform detection into one
//! read-only snapshot the pipeline steps work from.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use super::Platform;
use crate::system::qt;

/// Stamp file beside the executable, holding the revision prefix of the
/// last completed run.
pub const STAMP_FILE_NAME: &str = ".deploy.stamp";

/// Build mode selecting the Windows output tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "PascalCase")]
pub enum Mode {
    #[default]
    Release,
    Beta,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Release => "Release",
            Self::Beta => "Beta",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter snapshot collected from the platform-conditional CLI flags
#[derive(Debug, Clone, Default)]
pub struct DeployParams {
    pub mode: Mode,
    pub qt_version: Option<String>,
    pub qt_path: Option<PathBuf>,
    pub daemon_path: Option<PathBuf>,
    pub lrc_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

/// Resolved settings for one staging run; never mutated after resolution
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub platform: Platform,
    pub mode: Mode,
    /// Directory of the running executable; relative defaults hang off it
    pub client_dir: PathBuf,
    pub daemon_dir: PathBuf,
    pub lrc_dir: PathBuf,
    /// Unset means "use the Qt toolchain on PATH"
    pub qt_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// First characters of the current git commit hash
    pub stamp: String,
}

/// Directory containing the running executable
pub fn client_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot locate the running executable")?;
    Ok(exe
        .parent()
        .context("executable has no parent directory")?
        .to_path_buf())
}

impl DeployConfig {
    /// Resolve the effective configuration. Aborts the run on unsupported Qt
    /// versions and creates the output directory when it is missing.
    pub fn resolve(
        platform: Platform,
        params: DeployParams,
        client_dir: PathBuf,
        stamp: String,
    ) -> Result<Self> {
        let qt_dir = match platform {
            Platform::Windows => {
                let version = params
                    .qt_version
                    .as_deref()
                    .unwrap_or(qt::DEFAULT_WINDOWS_VERSION);
                qt::ensure_supported(version)?;
                Some(qt::windows_install_dir(version)?)
            }
            Platform::Unix => match params.qt_path {
                Some(path) => Some(path),
                None => {
                    let version = qt::probe_system_version()?;
                    qt::ensure_supported(&version)?;
                    None
                }
            },
        };

        let daemon_dir = params
            .daemon_path
            .unwrap_or_else(|| client_dir.join("..").join("daemon"));
        let lrc_dir = params
            .lrc_path
            .unwrap_or_else(|| client_dir.join("..").join("lrc"));

        let output_dir = match params.output_path {
            Some(path) => path,
            None => match platform {
                Platform::Windows => client_dir.join("x64").join(params.mode.as_str()),
                Platform::Unix => client_dir.join("build-local"),
            },
        };
        if !output_dir.exists() {
            fs::create_dir_all(&output_dir).with_context(|| {
                format!("cannot create output directory {}", output_dir.display())
            })?;
        }

        Ok(Self {
            platform,
            mode: params.mode,
            client_dir,
            daemon_dir,
            lrc_dir,
            qt_dir,
            output_dir,
            stamp,
        })
    }

    pub fn stamp_file(&self) -> PathBuf {
        self.client_dir.join(STAMP_FILE_NAME)
    }

    /// Ringtones shipped with the daemon
    pub fn ringtones_source(&self) -> PathBuf {
        self.daemon_dir.join("ringtones")
    }

    pub fn ringtones_dest(&self) -> PathBuf {
        self.output_dir.join("ringtones")
    }

    pub fn lrc_translations_source(&self) -> PathBuf {
        self.lrc_dir.join("translations")
    }

    pub fn client_translations_source(&self) -> PathBuf {
        self.client_dir.join("translations")
    }

    pub fn lrc_translations_dest(&self) -> PathBuf {
        self.output_dir
            .join("share")
            .join("libringclient")
            .join("translations")
    }

    pub fn client_translations_dest(&self) -> PathBuf {
        self.output_dir.join("share").join("ring").join("translations")
    }

    /// The produced application binary windeployqt works against
    pub fn app_binary(&self) -> PathBuf {
        self.output_dir.join("Jami.exe")
    }

    /// QML sources windeployqt scans for imports
    pub fn qml_dir(&self) -> PathBuf {
        self.client_dir.join("src")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolve_in(
        tmp: &TempDir,
        platform: Platform,
        params: DeployParams,
    ) -> Result<DeployConfig> {
        DeployConfig::resolve(
            platform,
            params,
            tmp.path().to_path_buf(),
            "deadbeef".to_string(),
        )
    }

    #[test]
    fn unix_defaults_to_build_local_and_creates_it() {
        let tmp = TempDir::new().unwrap();
        let params = DeployParams {
            qt_path: Some(PathBuf::from("/opt/qt")),
            ..Default::default()
        };

        let config = resolve_in(&tmp, Platform::Unix, params).unwrap();

        assert_eq!(config.output_dir, tmp.path().join("build-local"));
        assert!(config.output_dir.is_dir());
        assert_eq!(config.qt_dir, Some(PathBuf::from("/opt/qt")));
    }

    #[test]
    fn windows_output_tree_follows_mode() {
        let tmp = TempDir::new().unwrap();
        let params = DeployParams {
            mode: Mode::Beta,
            qt_version: Some("5.15.2".to_string()),
            ..Default::default()
        };

        let config = resolve_in(&tmp, Platform::Windows, params).unwrap();

        assert_eq!(config.output_dir, tmp.path().join("x64").join("Beta"));
        let qt_dir = config.qt_dir.unwrap();
        assert!(qt_dir.to_string_lossy().ends_with("msvc2019_64"));
    }

    #[test]
    fn windows_default_qt_version_is_assumed() {
        let tmp = TempDir::new().unwrap();
        let config = resolve_in(&tmp, Platform::Windows, DeployParams::default()).unwrap();

        let qt_dir = config.qt_dir.unwrap().to_string_lossy().into_owned();
        assert!(qt_dir.contains("5.15.0"));
        assert!(qt_dir.ends_with("msvc2019_64"));
    }

    #[test]
    fn unsupported_qt_version_aborts_resolution() {
        let tmp = TempDir::new().unwrap();
        let params = DeployParams {
            qt_version: Some("5.13.0".to_string()),
            ..Default::default()
        };

        assert!(resolve_in(&tmp, Platform::Windows, params).is_err());
    }

    #[test]
    fn explicit_output_path_is_created() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("staging").join("deep");
        let params = DeployParams {
            qt_path: Some(PathBuf::from("/opt/qt")),
            output_path: Some(out.clone()),
            ..Default::default()
        };

        let config = resolve_in(&tmp, Platform::Unix, params).unwrap();

        assert_eq!(config.output_dir, out);
        assert!(out.is_dir());
    }

    #[test]
    fn source_trees_default_next_to_the_client() {
        let tmp = TempDir::new().unwrap();
        let params = DeployParams {
            qt_path: Some(PathBuf::from("/opt/qt")),
            ..Default::default()
        };

        let config = resolve_in(&tmp, Platform::Unix, params).unwrap();

        assert_eq!(config.daemon_dir, tmp.path().join("..").join("daemon"));
        assert_eq!(config.lrc_dir, tmp.path().join("..").join("lrc"));
        assert_eq!(config.ringtones_source(), config.daemon_dir.join("ringtones"));
    }

    #[test]
    fn destination_trees_hang_off_the_output_dir() {
        let tmp = TempDir::new().unwrap();
        let params = DeployParams {
            qt_path: Some(PathBuf::from("/opt/qt")),
            ..Default::default()
        };

        let config = resolve_in(&tmp, Platform::Unix, params).unwrap();
        let out = &config.output_dir;

        assert_eq!(
            config.lrc_translations_dest(),
            out.join("share").join("libringclient").join("translations")
        );
        assert_eq!(
            config.client_translations_dest(),
            out.join("share").join("ring").join("translations")
        );
        assert_eq!(config.app_binary(), out.join("Jami.exe"));
    }
}
