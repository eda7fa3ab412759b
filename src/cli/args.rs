//! Command line argument parsing
//!
//! The flag set is platform-conditional: Windows selects the Qt kit by
//! version number and supports a Beta output tree, the other platforms point
//! at a Qt installation directly (or fall back to the Qt on PATH).

use clap::Parser;
use std::path::PathBuf;

use crate::config::{DeployParams, Mode};

/// Runtime staging helper for the Jami desktop client
#[derive(Parser)]
#[command(name = "jami-deploy")]
#[command(about = "Copy runtime files into the client deployment directory")]
pub struct Cli {
    /// Release or Beta mode
    #[cfg(windows)]
    #[arg(short, long, value_enum, default_value_t = Mode::Release)]
    pub mode: Mode,

    /// Qt version the client was built against, e.g. 5.15.2
    #[cfg(windows)]
    #[arg(short, long = "qtVersion")]
    pub qt_version: Option<String>,

    /// Qt installation path; omit to use the Qt toolchain on PATH
    #[cfg(not(windows))]
    #[arg(short, long = "qtPath")]
    pub qt_path: Option<PathBuf>,

    /// Daemon source tree path
    #[arg(short, long = "daemonPath")]
    pub daemon_path: Option<PathBuf>,

    /// Lrc source tree path
    #[arg(short, long = "lrcPath")]
    pub lrc_path: Option<PathBuf>,

    /// Output directory, created if missing
    #[arg(short, long = "outputPath")]
    pub output_path: Option<PathBuf>,
}

impl Cli {
    /// Flatten the platform-conditional flag set into one parameter snapshot.
    pub fn into_params(self) -> DeployParams {
        DeployParams {
            #[cfg(windows)]
            mode: self.mode,
            #[cfg(not(windows))]
            mode: Mode::Release,
            #[cfg(windows)]
            qt_version: self.qt_version,
            #[cfg(not(windows))]
            qt_version: None,
            #[cfg(windows)]
            qt_path: None,
            #[cfg(not(windows))]
            qt_path: self.qt_path,
            daemon_path: self.daemon_path,
            lrc_path: self.lrc_path,
            output_path: self.output_path,
        }
    }
}
