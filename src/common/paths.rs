//! Configuration file paths
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/asl-smoke/`
//! - macOS: `~/Library/Application Support/asl-smoke/`
//! - Windows: `%APPDATA%\asl-smoke\`

use std::path::PathBuf;

const APP_NAME: &str = "asl-smoke";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
