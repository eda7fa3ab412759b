//! Runtime staging helper for the Jami desktop client
//!
//! Copies the prebuilt runtime dependencies, Qt runtime files, ringtones and
//! compiled translations into the deployment output directory. The whole run
//! is skipped when the deploy stamp already matches the current revision.

use anyhow::Result;
use clap::Parser;
use colored::*;

mod cli;
mod config;
mod stage;
mod system;

use cli::Cli;
use config::{DeployConfig, Platform};

fn main() -> Result<()> {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let client_dir = config::client_dir()?;
    let stamp = stage::current_revision()?;

    // Stamp gate: nothing to do when this revision is already staged.
    if stage::is_up_to_date(&client_dir.join(config::STAMP_FILE_NAME), &stamp) {
        println!("{}", "Deployment stamp up-to-date".green());
        return Ok(());
    }

    let cli = Cli::parse();
    let config = DeployConfig::resolve(Platform::current(), cli.into_params(), client_dir, stamp)?;

    print_banner(&config);

    if config.platform == Platform::Windows {
        stage::copy_runtime_files(&config)?;
        stage::copy_ringtones(&config)?;
    }

    stage::release_and_copy_translations(&config)?;

    stage::write_stamp(&config.stamp_file(), &config.stamp)?;
    println!("{}", "Copy completed".green());

    Ok(())
}

/// Print the effective settings in the order the run uses them.
fn print_banner(config: &DeployConfig) {
    let rule = "****************************************".cyan();
    println!("{rule}");
    println!("{}", "copying deployment files...".blue());
    println!(
        "{}",
        format!("using daemonDir:    {}", config.daemon_dir.display()).blue()
    );
    println!(
        "{}",
        format!("using lrcDir:       {}", config.lrc_dir.display()).blue()
    );
    match &config.qt_dir {
        Some(qt_dir) => println!(
            "{}",
            format!("using QtDir:        {}", qt_dir.display()).blue()
        ),
        None => println!("{}", "using system Qt".blue()),
    }
    if config.platform == Platform::Windows {
        println!("{}", format!("{} mode", config.mode).blue());
    }
    println!("{rule}");
}
