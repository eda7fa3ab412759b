//! Shared external command invocation
//!
//! Every collaborator (git, qmake, lrelease, windeployqt) is run through one
//! of these two helpers. A non-zero exit status is fatal to the whole run.

use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

/// Run an external command, streaming its output to the terminal.
pub fn run<I, S>(program: impl AsRef<OsStr>, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("failed to launch {}", Path::new(program).display()))?;

    if !status.success() {
        bail!("{} exited with {}", Path::new(program).display(), status);
    }

    Ok(())
}

/// Run an external command and capture its standard output as text.
pub fn run_captured<I, S>(program: impl AsRef<OsStr>, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("failed to launch {}", Path::new(program).display()))?;

    if !output.status.success() {
        bail!(
            "{} exited with {}: {}",
            Path::new(program).display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout() {
        let output = run_captured("echo", ["hello"]).unwrap();
        assert!(output.contains("hello"));
    }

    #[test]
    fn missing_program_is_an_error() {
        assert!(run_captured("nonexistent_command_12345", ["x"]).is_err());
    }

    #[test]
    fn nonzero_exit_is_an_error() {
        assert!(run("sh", ["-c", "exit 1"]).is_err());
        assert!(run("sh", ["-c", "exit 0"]).is_ok());
    }

    #[test]
    fn captured_nonzero_exit_is_an_error() {
        assert!(run_captured("sh", ["-c", "echo boom >&2; exit 3"]).is_err());
    }
}
