//! Translation compilation and staging
//!
//! Runs lrelease over the lrc and client `.ts` sources and copies the
//! produced `.qm` files into their per-project destination trees. There is no
//! incremental skip: every run recompiles and recopies.

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DeployConfig;
use crate::system::{command, qt};

pub fn release_and_copy_translations(config: &DeployConfig) -> Result<()> {
    let lrelease = qt::lrelease_command(config.qt_dir.as_deref(), config.platform);

    println!("{}", "Release lrc translations...".cyan());
    release_set(
        &lrelease,
        &config.lrc_translations_source(),
        &config.lrc_translations_dest(),
    )?;

    println!("{}", "Release client translations...".cyan());
    release_set(
        &lrelease,
        &config.client_translations_source(),
        &config.client_translations_dest(),
    )
}

/// Compile every `.ts` file of one source tree, then copy the `.qm` output
/// into `dest`, created on demand.
fn release_set(lrelease: &Path, source: &Path, dest: &Path) -> Result<()> {
    if !dest.exists() {
        fs::create_dir_all(dest).with_context(|| format!("cannot create {}", dest.display()))?;
    }

    for ts in files_with_extension(source, "ts")? {
        command::run(lrelease, [ts.as_os_str()])?;
    }

    for qm in files_with_extension(source, "qm")? {
        println!(
            "{}",
            format!(
                "Copying translation file: {} -> {}",
                qm.display(),
                dest.display()
            )
            .blue()
        );
        let name = qm
            .file_name()
            .with_context(|| format!("translation file {} has no file name", qm.display()))?;
        fs::copy(&qm, dest.join(name))
            .with_context(|| format!("cannot copy {}", qm.display()))?;
    }

    Ok(())
}

/// Files of `dir` carrying the given extension, in directory order.
fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("cannot read {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == ext) {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn filters_by_extension() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("app_fr.ts"), "").unwrap();
        fs::write(tmp.path().join("app_de.ts"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("old.ts")).unwrap();

        let files = files_with_extension(tmp.path(), "ts").unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "ts"));
    }

    #[test]
    fn copies_compiled_files_into_a_created_destination() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("translations");
        let dest = tmp.path().join("share").join("translations");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("app_fr.qm"), "qm").unwrap();

        // `true` stands in for lrelease; the sources compile to nothing.
        fs::write(src.join("app_fr.ts"), "ts").unwrap();
        release_set(Path::new("true"), &src, &dest).unwrap();

        assert!(dest.join("app_fr.qm").is_file());
    }

    #[test]
    fn rerun_recopies_without_incremental_skip() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("translations");
        let dest = tmp.path().join("dest");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("app_fr.qm"), "first").unwrap();

        release_set(Path::new("true"), &src, &dest).unwrap();
        fs::write(src.join("app_fr.qm"), "second").unwrap();
        release_set(Path::new("true"), &src, &dest).unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("app_fr.qm")).unwrap(),
            "second"
        );
    }

    #[test]
    fn failing_compiler_aborts_the_set() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("translations");
        let dest = tmp.path().join("dest");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("app_fr.ts"), "ts").unwrap();

        assert!(release_set(Path::new("false"), &src, &dest).is_err());
    }
}
