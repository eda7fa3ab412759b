//! Qt toolchain discovery
//!
//! Locates the Qt installation the client was built against and derives the
//! paths of the deployment tools (`lrelease`, `windeployqt`).

use anyhow::{Context, Result, bail};
use colored::*;
use regex::Regex;
use std::path::{Path, PathBuf};

use super::command;
use crate::config::Platform;

/// Assumed Qt version when `--qtVersion` is not given on Windows
pub const DEFAULT_WINDOWS_VERSION: &str = "5.15.0";

/// Oldest Qt 5 minor version the client builds against
const MIN_SUPPORTED_MINOR: u32 = 14;

/// Split a dotted version string into (major, minor).
pub fn parse_version(version: &str) -> Result<(u32, u32)> {
    let re = Regex::new(r"^(\d+)\.(\d+)(?:\.\d+)?$").unwrap();
    let caps = re
        .captures(version.trim())
        .with_context(|| format!("malformed Qt version {version:?}"))?;
    Ok((caps[1].parse()?, caps[2].parse()?))
}

/// Abort the run when the toolchain is older than the client supports.
pub fn ensure_supported(version: &str) -> Result<()> {
    let (_, minor) = parse_version(version)?;
    if minor < MIN_SUPPORTED_MINOR {
        println!("{}", "Qt version not supported".yellow());
        bail!("Qt {version} is older than 5.{MIN_SUPPORTED_MINOR}");
    }
    Ok(())
}

/// Conventional install location of a Qt version on Windows.
/// Qt 5.14 ships msvc2017_64 kits, 5.15 onward msvc2019_64.
pub fn windows_install_dir(version: &str) -> Result<PathBuf> {
    let (_, minor) = parse_version(version)?;
    let toolset = if minor < 15 { "msvc2017_64" } else { "msvc2019_64" };
    Ok(PathBuf::from(format!(r"C:\Qt\{version}\{toolset}")))
}

/// Ask the qmake on PATH which Qt it belongs to.
pub fn probe_system_version() -> Result<String> {
    let output = command::run_captured("qmake", ["-v"])?;
    parse_qmake_output(&output)
}

/// Extract the version number out of `qmake -v` output.
pub fn parse_qmake_output(output: &str) -> Result<String> {
    let re = Regex::new(r"Using Qt version (\d+\.\d+(?:\.\d+)?)").unwrap();
    let caps = re
        .captures(output)
        .context("cannot parse Qt version from qmake output")?;
    Ok(caps[1].to_string())
}

/// The translation compiler: under the resolved Qt installation, or the bare
/// command name when the system Qt is in use.
pub fn lrelease_command(qt_dir: Option<&Path>, platform: Platform) -> PathBuf {
    match qt_dir {
        Some(dir) => dir
            .join("bin")
            .join(format!("lrelease{}", platform.exe_suffix())),
        None => PathBuf::from("lrelease"),
    }
}

/// The Qt runtime deployment utility (Windows only).
pub fn windeployqt_command(qt_dir: &Path) -> PathBuf {
    qt_dir.join("bin").join("windeployqt.exe")
}
