//! Quaerendo CLI library.
//!
//! Configuration management, command execution, and output formatting for
//! the `quaerendo` binary. The binary is a thin presentation layer: all
//! session, request, and view state comes from `quaerendo-sdk`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

use quaerendo_sdk::{ApiClient, FileTokenStore, Session};
use std::path::PathBuf;

/// Open the session for the active profile and build a client around it.
///
/// Returns the client together with the token storage path it reads from.
pub fn open_client(config: &Config) -> Result<(ApiClient, PathBuf)> {
    let profile = config.get_active_profile()?;
    let storage = config.storage_path(profile)?;

    let session = Session::open(FileTokenStore::new(&storage));
    let client = ApiClient::with_timeout(&profile.api_url, session, config.settings.timeout())?;

    Ok((client, storage))
}
