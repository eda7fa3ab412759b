//! Ringtone asset staging

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use crate::config::DeployConfig;

/// Copy every ringtone shipped with the daemon into the output tree.
pub fn copy_ringtones(config: &DeployConfig) -> Result<()> {
    println!("{}", "Copying ringtones...".cyan());
    copy_dir_files(&config.ringtones_source(), &config.ringtones_dest())
}

/// Flat copy of the files of `source` into `dest`, created on demand.
/// The enumeration only yields existing files, so there is no per-file
/// existence check.
fn copy_dir_files(source: &Path, dest: &Path) -> Result<()> {
    if !dest.exists() {
        fs::create_dir_all(dest).with_context(|| format!("cannot create {}", dest.display()))?;
    }

    let entries =
        fs::read_dir(source).with_context(|| format!("cannot read {}", source.display()))?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        println!(
            "{}",
            format!(
                "Copying ringtone: {} -> {}",
                entry.file_name().to_string_lossy(),
                dest.display()
            )
            .blue()
        );
        fs::copy(entry.path(), dest.join(entry.file_name()))
            .with_context(|| format!("cannot copy {}", entry.path().display()))?;
    }

    Ok(())
}
