//! Configuration module for the staging run

mod deploy_config;
mod platform;

pub use deploy_config::{DeployConfig, DeployParams, Mode, STAMP_FILE_NAME, client_dir};
pub use platform::Platform;
