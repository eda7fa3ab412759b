//! Windows runtime dependency staging
//!
//! Copies the prebuilt codec and crypto libraries the daemon links against,
//! plus icon, license and qt.conf, into the output directory, then lets
//! windeployqt stage the remaining Qt runtime next to the produced
//! executable.

use anyhow::{Context, Result, bail};
use colored::*;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DeployConfig;
use crate::system::{command, qt};

/// ffmpeg libraries under the daemon contrib build tree
const FFMPEG_LIBS: [&str; 7] = [
    "avcodec-58.dll",
    "avutil-56.dll",
    "avformat-58.dll",
    "avdevice-58.dll",
    "swresample-3.dll",
    "swscale-5.dll",
    "avfilter-7.dll",
];

/// OpenSSL libraries under the daemon contrib build tree
const OPENSSL_LIBS: [&str; 2] = ["libcrypto-1_1-x64.dll", "libssl-1_1-x64.dll"];

pub fn copy_runtime_files(config: &DeployConfig) -> Result<()> {
    let files = runtime_file_list(&config.daemon_dir, &config.client_dir);
    copy_files(&files, &config.output_dir)?;
    deploy_qt_runtime(config)
}

/// The fixed list of files every deployment needs, derived from the daemon
/// build tree and the client directory.
fn runtime_file_list(daemon_dir: &Path, client_dir: &Path) -> Vec<PathBuf> {
    let ffmpeg_bin = daemon_dir
        .join("contrib")
        .join("build")
        .join("ffmpeg")
        .join("Build")
        .join("win32")
        .join("x64")
        .join("bin");
    let openssl = daemon_dir.join("contrib").join("build").join("openssl");

    let mut files: Vec<PathBuf> = FFMPEG_LIBS.iter().map(|lib| ffmpeg_bin.join(lib)).collect();
    files.extend(OPENSSL_LIBS.iter().map(|lib| openssl.join(lib)));
    files.push(client_dir.join("qt.conf"));
    files.push(client_dir.join("images").join("jami.ico"));
    files.push(client_dir.join("License.rtf"));
    files
}

/// Copy each file into `dest`, failing fast on the first missing source.
/// Files copied before the failure stay in place.
fn copy_files(files: &[PathBuf], dest: &Path) -> Result<()> {
    for file in files {
        println!(
            "{}",
            format!("Copying: {} -> {}", file.display(), dest.display()).blue()
        );
        if !file.exists() {
            println!("{}", format!("{} does not exist", file.display()).red());
            bail!("missing runtime file {}", file.display());
        }
        let name = file
            .file_name()
            .with_context(|| format!("runtime file {} has no file name", file.display()))?;
        let target = dest.join(name);
        fs::copy(file, &target)
            .with_context(|| format!("cannot copy {} to {}", file.display(), target.display()))?;
    }
    Ok(())
}

/// Run windeployqt against Jami.exe to pull in the remaining Qt runtime.
fn deploy_qt_runtime(config: &DeployConfig) -> Result<()> {
    let qt_dir = config
        .qt_dir
        .as_deref()
        .context("windeployqt needs a resolved Qt installation")?;

    command::run(
        qt::windeployqt_command(qt_dir),
        [
            OsStr::new("--qmldir"),
            config.qml_dir().as_os_str(),
            OsStr::new("--release"),
            config.app_binary().as_os_str(),
        ],
    )
}
