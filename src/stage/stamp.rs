//! Deployment stamp gate
//!
//! The stamp file records the revision of the last completed staging run so a
//! repeated invocation can skip the whole pipeline. It is written only after
//! every step succeeded; an aborted run leaves the old stamp in place.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::system::command;

/// Length of the revision prefix persisted in the stamp file
const STAMP_LEN: usize = 8;

/// First characters of the current git commit hash.
pub fn current_revision() -> Result<String> {
    let hash = command::run_captured("git", ["rev-parse", "HEAD"])?;
    Ok(hash.trim().chars().take(STAMP_LEN).collect())
}

/// Whether the stamp file already records `stamp`.
pub fn is_up_to_date(stamp_file: &Path, stamp: &str) -> bool {
    fs::read_to_string(stamp_file)
        .map(|contents| contents.trim() == stamp)
        .unwrap_or(false)
}

/// Record `stamp` as the revision of a completed run.
pub fn write_stamp(stamp_file: &Path, stamp: &str) -> Result<()> {
    fs::write(stamp_file, stamp)
        .with_context(|| format!("cannot write stamp file {}", stamp_file.display()))
}
